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

use crate::error::Error;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The build configuration tiers a module can be planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Debug,
    Development,
    Shipping,
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "debug" => Ok(Self::Debug),
            "development" => Ok(Self::Development),
            "shipping" => Ok(Self::Shipping),
            _ => Err(Error::ProfileUnknown(s.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Development => write!(f, "development"),
            Self::Shipping => write!(f, "shipping"),
        }
    }
}

/// Every tier historically collapses into this single physical directory.
const COLLAPSED_DIR_NAME: &str = "Release";

/// Maps each configuration tier to the physical directory name prebuilt
/// libraries live under.
///
/// The default map sends every tier to the same `"Release"` directory, which
/// is the long-observed layout of the shipped SDK binaries. A module may
/// override any tier through its `[directories]` table without touching the
/// resolution algorithm.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileMap {
    debug: Option<String>,
    development: Option<String>,
    shipping: Option<String>,
}

impl ProfileMap {
    pub fn new() -> Self {
        Self {
            debug: None,
            development: None,
            shipping: None,
        }
    }

    /// Returns the physical directory name for the given tier.
    ///
    /// Total and deterministic over the [Profile] set.
    pub fn dir_name(&self, profile: &Profile) -> &str {
        let entry = match profile {
            Profile::Debug => &self.debug,
            Profile::Development => &self.development,
            Profile::Shipping => &self.shipping,
        };
        entry.as_deref().unwrap_or(COLLAPSED_DIR_NAME)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn collapsed_by_default() {
        let map = ProfileMap::new();
        // every tier maps to the same physical directory
        assert_eq!(map.dir_name(&Profile::Debug), "Release");
        assert_eq!(map.dir_name(&Profile::Development), "Release");
        assert_eq!(map.dir_name(&Profile::Shipping), "Release");
    }

    #[test]
    fn tier_override() {
        let map: ProfileMap = toml::from_str(
            r#"
debug = "Debug"
"#,
        )
        .unwrap();
        assert_eq!(map.dir_name(&Profile::Debug), "Debug");
        // unlisted tiers keep the collapsed name
        assert_eq!(map.dir_name(&Profile::Shipping), "Release");
    }

    #[test]
    fn from_str_tiers() {
        assert_eq!(Profile::from_str("debug").unwrap(), Profile::Debug);
        assert_eq!(Profile::from_str("Shipping").unwrap(), Profile::Shipping);
        assert_eq!(
            Profile::from_str("release"),
            Err(Error::ProfileUnknown(String::from("release")))
        );
    }
}
