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

use crate::core::build::LinkMode;
use crate::core::linkage::Format;
use crate::core::platform::Platform;
use crate::core::profile::Profile;
use crate::error::Error;
use crate::error::LastError;
use serde_derive::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use toml_edit::Document;

pub const CONFIG_FILE: &str = "config.toml";

/// The user-level configuration file.
///
/// `[defaults]` supplies values for command-line options left unset, and
/// `[env]` entries become `env.*` substitution variables for path templates,
/// which is where machine-specific installation paths belong.
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    defaults: Option<Defaults>,
    env: Option<HashMap<String, String>>,
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            defaults: None,
            env: None,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                return Err(Error::ConfigParseFailed(
                    path.to_path_buf(),
                    LastError(e.to_string()),
                ))
            }
        };
        match Self::from_str(&contents) {
            Ok(r) => Ok(r),
            Err(e) => Err(Error::ConfigParseFailed(
                path.to_path_buf(),
                LastError(e.to_string()),
            )),
        }
    }

    pub fn get_env(&self) -> Option<&HashMap<String, String>> {
        self.env.as_ref()
    }

    pub fn get_defaults(&self) -> Defaults {
        self.defaults.clone().unwrap_or_default()
    }
}

/// Fallback values consulted when a command-line option is omitted.
#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    platform: Option<Platform>,
    profile: Option<Profile>,
    link: Option<LinkMode>,
    format: Option<Format>,
}

impl Defaults {
    pub fn get_platform(&self) -> Option<Platform> {
        self.platform
    }

    pub fn get_profile(&self) -> Option<Profile> {
        self.profile
    }

    pub fn get_link(&self) -> Option<LinkMode> {
        self.link
    }

    pub fn get_format(&self) -> Option<Format> {
        self.format
    }
}

/// An editable view of a configuration file that keeps the author's
/// formatting and comments intact across a round trip.
pub struct ConfigDocument {
    document: Document,
}

impl FromStr for ConfigDocument {
    type Err = toml_edit::TomlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            document: s.parse::<Document>()?,
        })
    }
}

impl ConfigDocument {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                return Err(Error::ConfigParseFailed(
                    path.to_path_buf(),
                    LastError(e.to_string()),
                ))
            }
        };
        match Self::from_str(&contents) {
            Ok(r) => Ok(r),
            Err(e) => Err(Error::ConfigParseFailed(
                path.to_path_buf(),
                LastError(e.to_string()),
            )),
        }
    }

    /// Writes `value` at `table.key`, creating the table if it is missing.
    pub fn set(&mut self, table: &str, key: &str, value: &str) {
        self.document[table][key] = toml_edit::value(value);
    }

    /// Removes the entry at `table.key`.
    pub fn unset(&mut self, table: &str, key: &str) -> Result<(), Error> {
        let entry = self
            .document
            .get_mut(table)
            .and_then(|t| t.as_table_mut())
            .and_then(|t| t.remove(key));
        match entry {
            Some(_) => Ok(()),
            None => Err(Error::ConfigKeyMissing(format!("{}.{}", table, key))),
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), Error> {
        match std::fs::write(path, self.document.to_string()) {
            Ok(()) => Ok(()),
            Err(e) => Err(Error::ConfigNotSaved(LastError(e.to_string()))),
        }
    }
}

impl std::fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.document)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const C_0: &str = r#"
# This is a blank configuration file.
"#;

    const C_1: &str = r#"
# linkplan configuration file

[defaults]
platform = "win64"
profile = "development"
link = "dynamic"
format = "tsv"

[env]
CUDA_PATH = "C:/Program Files/NVIDIA GPU Computing Toolkit/CUDA/v11.6"
"#;

    #[test]
    fn parse_empty_config() {
        match Config::from_str(C_0) {
            Ok(r) => assert_eq!(r, Config::new()),
            Err(e) => {
                println!("{}", e);
                panic!("failed to parse")
            }
        }
    }

    #[test]
    fn parse_basic_config() {
        let cfg = Config::from_str(C_1).unwrap();
        assert_eq!(cfg.get_defaults().get_platform(), Some(Platform::Win64));
        assert_eq!(cfg.get_defaults().get_format(), Some(Format::Tsv));
        assert_eq!(
            cfg.get_env().unwrap().get("CUDA_PATH").unwrap(),
            "C:/Program Files/NVIDIA GPU Computing Toolkit/CUDA/v11.6"
        );
    }

    #[test]
    fn edit_round_trip() {
        let mut doc = ConfigDocument::from_str(C_1).unwrap();
        doc.set("defaults", "profile", "shipping");
        doc.unset("env", "CUDA_PATH").unwrap();
        // the edited text must still parse as a valid configuration
        let cfg = Config::from_str(&doc.to_string()).unwrap();
        assert_eq!(cfg.get_defaults().get_profile(), Some(Profile::Shipping));
        assert_eq!(cfg.get_env().unwrap().get("CUDA_PATH"), None);
        // the file comment survives the round trip
        assert_eq!(doc.to_string().contains("# linkplan configuration file"), true);
    }

    #[test]
    fn unset_missing_key() {
        let mut doc = ConfigDocument::from_str(C_0).unwrap();
        assert_eq!(
            doc.unset("defaults", "platform"),
            Err(Error::ConfigKeyMissing(String::from("defaults.platform")))
        );
    }
}
