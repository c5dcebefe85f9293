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

use crate::core::config::Config;
use crate::core::swap::SwapTable;
use crate::error::Fault;
use std::collections::btree_set::IntoIter;
use std::collections::btree_set::Iter;
use std::collections::BTreeSet;
use std::hash::Hash;
use std::path::Path;

pub const LINKPLAN_HOME: &str = "LINKPLAN_HOME";
pub const NO_COLOR: &str = "NO_COLOR";

/// Suffix appended to a module's normalized name to form the default
/// environment variable that overrides its SDK root.
pub const SDK_DIR_SUFFIX: &str = "_SDK_DIR";

pub const DOT_ENV_FILE: &str = ".env";

#[derive(Eq, Clone)]
pub struct EnvVar {
    key: String,
    value: String,
}

impl PartialEq for EnvVar {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Ord for EnvVar {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for EnvVar {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl Hash for EnvVar {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // only hash by the key name
        self.key.hash(state);
    }
}

impl EnvVar {
    pub fn with(key: &str, value: &str) -> Self {
        Self::new().key(key).value(value)
    }

    pub fn new() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
        }
    }

    /// Sets the environment key.
    pub fn key(mut self, s: &str) -> Self {
        // normalize the key name upon entry
        self.key = normalize_key(s);
        self
    }

    /// Sets the environment value.
    pub fn value(mut self, s: &str) -> Self {
        self.value = s.to_owned();
        self
    }

    pub fn get_key(&self) -> &str {
        &self.key
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }

    /// Transforms the entry into a substitution variable.
    ///
    /// The key is lowercased and placed under the `env.` namespace; the value
    /// is left unmodified.
    pub fn to_variable(&self) -> (String, String) {
        (
            format!("env.{}", self.key.to_lowercase()),
            self.value.to_owned(),
        )
    }
}

/// Standardizes an environment variable name to UPPER_SNAKE form.
pub fn normalize_key(s: &str) -> String {
    s.to_ascii_uppercase().replace('-', "_")
}

impl std::fmt::Debug for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=\"{}\"", self.key, self.value)
    }
}

impl std::fmt::Display for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

pub struct Environment(BTreeSet<EnvVar>);

impl Environment {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, var: EnvVar) -> bool {
        self.0.insert(var)
    }

    pub fn add(mut self, var: EnvVar) -> Self {
        self.0.insert(var);
        self
    }

    pub fn iter(&self) -> Iter<'_, EnvVar> {
        self.0.iter()
    }

    pub fn into_iter(self) -> IntoIter<EnvVar> {
        self.0.into_iter()
    }

    pub fn get(&self, key: &str) -> Option<&EnvVar> {
        self.0.get(&EnvVar::new().key(key))
    }

    /// Collects entries from the `[env]` table of a configuration file.
    pub fn from_config(mut self, config: &Config) -> Result<Self, Fault> {
        if let Some(map) = config.get_env() {
            map.iter().for_each(|(key, val)| {
                self.insert(EnvVar::new().key(key).value(val));
            });
        }
        Ok(self)
    }

    /// Collects entries from a '.env' file living at `root`.
    ///
    /// Silently skips text lines that do not have the proper `=` delimiter
    /// between key and value. Adds nothing if the file does not exist.
    pub fn from_env_file(mut self, root: &Path) -> Result<Self, Fault> {
        let env_file = root.join(DOT_ENV_FILE);
        if env_file.exists() == true {
            let contents = std::fs::read_to_string(&env_file)?;
            for line in contents.split_terminator('\n') {
                if let Some((name, value)) = line.split_once('=') {
                    self.insert(EnvVar::new().key(name).value(value));
                }
            }
        }
        Ok(self)
    }

    /// Converts every entry into a substitution variable under the `env.`
    /// namespace.
    pub fn to_swap_table(&self) -> SwapTable {
        let mut table = SwapTable::new();
        self.iter().for_each(|e| {
            let (key, value) = e.to_variable();
            table.add(&key, &value);
        });
        table
    }

    /// Reads a variable from the process environment.
    pub fn read(key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(v) => Some(v),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_keys() {
        assert_eq!(EnvVar::new().key("teleport-sdk-dir").get_key(), "TELEPORT_SDK_DIR");
        assert_eq!(EnvVar::new().key("CUDA_PATH").get_key(), "CUDA_PATH");
    }

    #[test]
    fn swap_namespace() {
        let var = EnvVar::with("CUDA_PATH", "C:/cuda/v11.6");
        assert_eq!(
            var.to_variable(),
            (String::from("env.cuda_path"), String::from("C:/cuda/v11.6"))
        );
    }

    #[test]
    fn keyed_identity() {
        let mut env = Environment::new();
        env.insert(EnvVar::with("A", "1"));
        // same key does not duplicate
        env.insert(EnvVar::with("a", "2"));
        assert_eq!(env.iter().count(), 1);
        assert_eq!(env.get("A").unwrap().get_value(), "1");
    }

    #[test]
    fn read_env_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DOT_ENV_FILE),
            "TELEPORT_SDK_DIR=/opt/teleport\nmalformed line\n",
        )
        .unwrap();
        let env = Environment::new().from_env_file(dir.path()).unwrap();
        assert_eq!(env.iter().count(), 1);
        assert_eq!(env.get("TELEPORT_SDK_DIR").unwrap().get_value(), "/opt/teleport");
    }
}
