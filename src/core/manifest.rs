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

use crate::core::profile::ProfileMap;
use crate::core::spec::DependencySpec;
use crate::error::Error;
use crate::error::LastError;
use crate::util::environment;
use serde_derive::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::path::Path;
use std::str::FromStr;

pub const MODULE_MANIFEST_FILE: &str = "Linkplan.toml";

pub trait FromFile: FromStr
where
    Self: Sized,
    <Self as FromStr>::Err: 'static + StdError,
{
    fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                return Err(Error::ManifestParseFailed(
                    path.to_path_buf(),
                    LastError(e.to_string()),
                ))
            }
        };
        match Self::from_str(&contents) {
            Ok(r) => Ok(r),
            Err(e) => Err(Error::ManifestParseFailed(
                path.to_path_buf(),
                LastError(e.to_string()),
            )),
        }
    }
}

/// The per-module declaration file: the module itself, an optional
/// configuration-tier directory mapping, and the ordered dependency list.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    module: Module,
    #[serde(default)]
    directories: ProfileMap,
    #[serde(rename = "dependency", default)]
    dependencies: Vec<DependencySpec>,
}

impl FromStr for Manifest {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl FromFile for Manifest {}

impl Manifest {
    /// Reads the manifest file belonging to the module directory `dir`.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        Self::from_file(&dir.join(MODULE_MANIFEST_FILE))
    }

    /// Composes a [String] to write to a clean manifest file.
    pub fn write_empty_manifest(name: &str) -> String {
        format!(
            r#"[module]
name = "{}"
# sdk-env = "{}"

# [directories]
# debug = "Debug"

# [[dependency]]
# name = "avstream"
# kind = "dynamic"
# include = ["avstream/Include"]
# path = "lib/{{{{ config }}}}"
"#,
            name,
            Module::derive_sdk_env_key(name)
        )
    }

    pub fn get_module(&self) -> &Module {
        &self.module
    }

    pub fn get_directories(&self) -> &ProfileMap {
        &self.directories
    }

    pub fn get_deps(&self) -> &Vec<DependencySpec> {
        &self.dependencies
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Module {
    name: String,
    #[serde(rename = "sdk-env")]
    sdk_env: Option<String>,
}

impl Module {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// The environment variable consulted for this module's SDK root.
    ///
    /// Defaults to the module's normalized name with the `_SDK_DIR` suffix
    /// when the manifest does not name one explicitly.
    pub fn sdk_env_key(&self) -> String {
        match &self.sdk_env {
            Some(key) => environment::normalize_key(key),
            None => Self::derive_sdk_env_key(&self.name),
        }
    }

    fn derive_sdk_env_key(name: &str) -> String {
        format!(
            "{}{}",
            environment::normalize_key(name),
            environment::SDK_DIR_SUFFIX
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::spec::DependencyKind;

    const M_1: &str = r#"
[module]
name = "teleport"
sdk-env = "TELEPORT_SDK_DIR"

[directories]
debug = "Debug"

[[dependency]]
name = "libavstream"
kind = "dynamic"
include = ["libavstream/Include"]
path = "lib/{{ config }}"
when.link = "dynamic"

[[dependency]]
name = "basisu"
kind = "static"
path = "thirdparty/basis_universal/{{ config }}"
"#;

    const M_2: &str = r#"
[module]
name = "render-core"
"#;

    #[test]
    fn parse_full_manifest() {
        let man = Manifest::from_str(M_1).unwrap();
        assert_eq!(man.get_module().get_name(), "teleport");
        assert_eq!(man.get_module().sdk_env_key(), "TELEPORT_SDK_DIR");
        assert_eq!(man.get_deps().len(), 2);
        assert_eq!(man.get_deps()[0].get_name(), "libavstream");
        assert_eq!(man.get_deps()[1].get_kind(), &DependencyKind::Static);
        assert_eq!(
            man.get_directories().dir_name(&crate::core::profile::Profile::Debug),
            "Debug"
        );
    }

    #[test]
    fn parse_minimal_manifest() {
        let man = Manifest::from_str(M_2).unwrap();
        assert_eq!(man.get_deps().is_empty(), true);
        // the variable name is derived from the module name
        assert_eq!(man.get_module().sdk_env_key(), "RENDER_CORE_SDK_DIR");
    }

    #[test]
    fn empty_manifest_is_reparsable() {
        let text = Manifest::write_empty_manifest("teleport");
        let man = Manifest::from_str(&text).unwrap();
        assert_eq!(man.get_module().get_name(), "teleport");
        assert_eq!(man.get_deps().is_empty(), true);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = Manifest::from_str(
            r#"
[module]
name = "teleport"
mystery = 1
"#,
        );
        assert_eq!(result.is_err(), true);
    }
}
