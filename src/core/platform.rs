//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use serde::de;
use std::fmt;
use std::str::FromStr;

/// The set of target platforms a module can be planned for.
///
/// An unrecognized platform is not an error at this layer: it collapses into
/// the [Platform::Unsupported] sentinel, which then travels through every
/// platform-dependent path so the downstream toolchain can decide whether to
/// reject the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Win64,
    Linux,
    Mac,
    Android,
    Unsupported,
}

impl Platform {
    /// Detects the platform matching the host machine.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Self::Win64
        } else if cfg!(target_os = "macos") {
            Self::Mac
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Unsupported
        }
    }

    pub fn is_supported(&self) -> bool {
        match self {
            Self::Unsupported => false,
            _ => true,
        }
    }

    /// Derives the file name of a static library from a bare dependency name.
    pub fn staticlib_name(&self, name: &str) -> String {
        match self {
            Self::Win64 => format!("{}.lib", name),
            Self::Linux | Self::Mac | Self::Android => format!("lib{}.a", name),
            Self::Unsupported => format!("{}.unsupported", name),
        }
    }

    /// Derives the file name of a dynamic library from a bare dependency name.
    pub fn dylib_name(&self, name: &str) -> String {
        match self {
            Self::Win64 => format!("{}.dll", name),
            Self::Linux | Self::Android => format!("lib{}.so", name),
            Self::Mac => format!("lib{}.dylib", name),
            Self::Unsupported => format!("{}.unsupported", name),
        }
    }
}

impl FromStr for Platform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_ref() {
            "win64" | "windows" => Self::Win64,
            "linux" => Self::Linux,
            "mac" | "macos" => Self::Mac,
            "android" => Self::Android,
            _ => Self::Unsupported,
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win64 => write!(f, "Win64"),
            Self::Linux => write!(f, "Linux"),
            Self::Mac => write!(f, "Mac"),
            Self::Android => write!(f, "Android"),
            Self::Unsupported => write!(f, "Unsupported"),
        }
    }
}

impl<'de> de::Deserialize<'de> for Platform {
    fn deserialize<D>(deserializer: D) -> Result<Platform, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct PlatformVisitor;

        impl<'de> de::Visitor<'de> for PlatformVisitor {
            type Value = Platform;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a target platform name")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                // parsing never fails; unknown names become the sentinel
                Ok(Platform::from_str(v).unwrap())
            }
        }

        deserializer.deserialize_str(PlatformVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_str_known() {
        assert_eq!(Platform::from_str("win64").unwrap(), Platform::Win64);
        assert_eq!(Platform::from_str("Win64").unwrap(), Platform::Win64);
        assert_eq!(Platform::from_str("LINUX").unwrap(), Platform::Linux);
        assert_eq!(Platform::from_str("macos").unwrap(), Platform::Mac);
    }

    #[test]
    fn from_str_sentinel() {
        // unknown platforms resolve to the sentinel rather than failing
        assert_eq!(Platform::from_str("ps5").unwrap(), Platform::Unsupported);
        assert_eq!(Platform::from_str("").unwrap(), Platform::Unsupported);
        assert_eq!(Platform::from_str("ps5").unwrap().is_supported(), false);
    }

    #[test]
    fn path_tokens() {
        assert_eq!(Platform::Win64.to_string(), "Win64");
        assert_eq!(Platform::Unsupported.to_string(), "Unsupported");
    }

    #[test]
    fn library_file_names() {
        assert_eq!(Platform::Win64.staticlib_name("core"), "core.lib");
        assert_eq!(Platform::Win64.dylib_name("avstream"), "avstream.dll");
        assert_eq!(Platform::Linux.staticlib_name("core"), "libcore.a");
        assert_eq!(Platform::Linux.dylib_name("avstream"), "libavstream.so");
        assert_eq!(Platform::Mac.dylib_name("avstream"), "libavstream.dylib");
        // the sentinel stays detectable in derived file names
        assert_eq!(
            Platform::Unsupported.dylib_name("avstream"),
            "avstream.unsupported"
        );
    }
}
