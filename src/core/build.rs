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

use crate::core::platform::Platform;
use crate::core::profile::Profile;
use crate::core::profile::ProfileMap;
use crate::util::filesystem::Standardize;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

/// Directory holding prebuilt dependency libraries, two levels above a module.
const LIBRARIES_DIR: &str = "Libraries";
/// Directory holding built module binaries, two levels above a module.
const BINARIES_DIR: &str = "Binaries";
/// Default SDK root location when no environment override is captured.
const DEFAULT_SDK_DIR: &str = "include";

/// How a dependency set is combined at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    Static,
    Dynamic,
}

impl FromStr for LinkMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "static" => Ok(Self::Static),
            "dynamic" => Ok(Self::Dynamic),
            _ => Err(Error::LinkModeUnknown(s.to_string())),
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// The immutable inputs for one resolution pass.
///
/// Constructed once per build invocation and read-only thereafter. The SDK
/// root override is captured from the process environment at construction
/// time, never re-read during resolution, so that identical contexts always
/// resolve identically.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildContext {
    platform: Platform,
    profile: Profile,
    link_mode: LinkMode,
    dirs: ProfileMap,
    module_dir: PathBuf,
    libraries_dir: PathBuf,
    binaries_dir: PathBuf,
    sdk_override: Option<PathBuf>,
}

impl BuildContext {
    /// Creates a context anchored at the module's own directory.
    ///
    /// The libraries and binaries directories live two levels above the
    /// module, next to its plugin root.
    pub fn new(module_dir: &Path) -> Self {
        let anchor = module_dir.join("..").join("..");
        Self {
            platform: Platform::host(),
            profile: Profile::Development,
            link_mode: LinkMode::Dynamic,
            dirs: ProfileMap::new(),
            module_dir: module_dir.to_path_buf(),
            libraries_dir: anchor.join(LIBRARIES_DIR).standardize(),
            binaries_dir: anchor.join(BINARIES_DIR).standardize(),
            sdk_override: None,
        }
    }

    /// Sets the target platform.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Sets the build configuration tier.
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the link mode.
    pub fn link_mode(mut self, mode: LinkMode) -> Self {
        self.link_mode = mode;
        self
    }

    /// Sets the configuration-tier directory mapping.
    pub fn dirs(mut self, dirs: ProfileMap) -> Self {
        self.dirs = dirs;
        self
    }

    /// Sets the SDK root override directly.
    pub fn sdk_override(mut self, path: Option<PathBuf>) -> Self {
        self.sdk_override = path;
        self
    }

    /// Captures the SDK root override from the environment variable `key`.
    ///
    /// An unset or empty variable is not an error, only a fallback trigger.
    /// This is the single environment read of a resolution pass.
    pub fn sdk_from_env(self, key: &str) -> Self {
        let value = match std::env::var(key) {
            Ok(s) => match s.is_empty() {
                true => None,
                false => Some(PathBuf::from(s)),
            },
            Err(_) => None,
        };
        self.sdk_override(value)
    }

    pub fn get_platform(&self) -> &Platform {
        &self.platform
    }

    pub fn get_profile(&self) -> &Profile {
        &self.profile
    }

    pub fn get_link_mode(&self) -> &LinkMode {
        &self.link_mode
    }

    pub fn get_module_dir(&self) -> &PathBuf {
        &self.module_dir
    }

    pub fn get_libraries_dir(&self) -> &PathBuf {
        &self.libraries_dir
    }

    pub fn get_binaries_dir(&self) -> &PathBuf {
        &self.binaries_dir
    }

    /// Checks whether an environment override was captured at construction.
    pub fn has_sdk_override(&self) -> bool {
        self.sdk_override.is_some()
    }

    /// Returns the SDK root: the captured override when present, otherwise
    /// the default root inside the libraries directory.
    pub fn sdk_root(&self) -> PathBuf {
        match &self.sdk_override {
            Some(p) => p.clone(),
            None => self.libraries_dir.join(DEFAULT_SDK_DIR),
        }
    }

    /// Returns the physical directory name for the context's tier.
    pub fn config_dir_name(&self) -> &str {
        self.dirs.dir_name(&self.profile)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn anchored_directories() {
        let ctx = BuildContext::new(Path::new("Plugins/Teleport/Source/Teleport"));
        assert_eq!(
            ctx.get_libraries_dir(),
            &PathBuf::from("Plugins/Teleport/Libraries")
        );
        assert_eq!(
            ctx.get_binaries_dir(),
            &PathBuf::from("Plugins/Teleport/Binaries")
        );
    }

    #[test]
    fn sdk_root_fallback() {
        let ctx = BuildContext::new(Path::new("Plugins/Teleport/Source/Teleport"));
        assert_eq!(
            ctx.sdk_root(),
            PathBuf::from("Plugins/Teleport/Libraries/include")
        );
        assert_eq!(ctx.has_sdk_override(), false);
    }

    #[test]
    fn sdk_root_override() {
        let ctx = BuildContext::new(Path::new("Plugins/Teleport/Source/Teleport"))
            .sdk_override(Some(PathBuf::from("/custom/sdk")));
        assert_eq!(ctx.sdk_root(), PathBuf::from("/custom/sdk"));
        assert_eq!(ctx.has_sdk_override(), true);
    }

    #[test]
    fn sdk_root_from_env() {
        std::env::set_var("LINKPLAN_TEST_A_SDK_DIR", "/opt/teleport");
        let ctx = BuildContext::new(Path::new("Source/Mod"))
            .sdk_from_env("LINKPLAN_TEST_A_SDK_DIR");
        assert_eq!(ctx.sdk_root(), PathBuf::from("/opt/teleport"));
    }

    #[test]
    fn sdk_root_from_env_empty_is_fallback() {
        std::env::set_var("LINKPLAN_TEST_B_SDK_DIR", "");
        let ctx = BuildContext::new(Path::new("Source/Mod"))
            .sdk_from_env("LINKPLAN_TEST_B_SDK_DIR");
        assert_eq!(ctx.has_sdk_override(), false);
        assert_eq!(ctx.sdk_root(), PathBuf::from("Libraries/include"));
    }

    #[test]
    fn config_dir_name_is_total() {
        let ctx = BuildContext::new(Path::new("Source/Mod")).profile(Profile::Debug);
        assert_eq!(ctx.config_dir_name(), "Release");
    }
}
