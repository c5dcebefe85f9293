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
use crate::core::manifest;
use crate::error::Error;
use crate::error::Hint;
use std::env;
use std::path::Path;
use std::path::PathBuf;

/// Program-level state assembled before a subcommand runs: the home
/// directory, the user configuration, and the working module (when the
/// current directory sits inside one).
pub struct Context {
    home_path: PathBuf,
    config_path: PathBuf,
    config: Config,
    module_path: Option<PathBuf>,
}

impl Context {
    pub fn new() -> Context {
        let home = env::temp_dir();
        Context {
            config_path: home.join(crate::core::config::CONFIG_FILE),
            home_path: home,
            config: Config::new(),
            module_path: None,
        }
    }

    /// Sets the home directory. By default this is `$HOME/.linkplan`. If set
    /// by `key`, it must be an existing directory.
    pub fn home(mut self, key: &str) -> Result<Context, Error> {
        self.home_path = if let Ok(s) = env::var(key) {
            let hp = PathBuf::from(s);
            // do not allow a non-existent directory to be set for the home
            if hp.exists() == false {
                return Err(Error::HomeMissing(hp));
            }
            hp
        } else {
            let hp = match home::home_dir() {
                Some(p) => p.join(".linkplan"),
                None => return Err(Error::HomeNotFound),
            };
            // create the directory if it does not exist
            if hp.exists() == false {
                std::fs::create_dir_all(&hp)
                    .map_err(|_| Error::HomeMissing(hp.clone()))?;
            }
            hp
        };
        Ok(self)
    }

    /// Loads the configuration file `s` living directly under the home
    /// directory, creating a blank one on first use.
    pub fn settings(mut self, s: &str) -> Result<Context, Error> {
        let cfg_path = self.home_path.join(s);
        if cfg_path.exists() == false {
            std::fs::write(&cfg_path, "")
                .map_err(|e| Error::ConfigNotSaved(crate::error::LastError(e.to_string())))?;
        }
        self.config = Config::from_file(&cfg_path)?;
        self.config_path = cfg_path;
        Ok(self)
    }

    /// Detects whether the current directory is within a module and remembers
    /// its location.
    pub fn current_module_dir(mut self) -> Result<Context, Error> {
        self.module_path = match env::current_dir() {
            Ok(cwd) => Context::find_module_path(&cwd),
            Err(_) => None,
        };
        Ok(self)
    }

    /// Finds the complete path to the nearest module directory.
    ///
    /// Backtracks from `dir` toward the filesystem root until finding the
    /// first directory holding a module manifest file.
    pub fn find_module_path(dir: &Path) -> Option<PathBuf> {
        let mut cwd = dir.to_path_buf();
        loop {
            if cwd.join(manifest::MODULE_MANIFEST_FILE).is_file() == true {
                break Some(cwd);
            } else if cwd.pop() == false {
                break None;
            }
        }
    }

    pub fn get_home_path(&self) -> &PathBuf {
        &self.home_path
    }

    pub fn get_config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn get_module_path(&self) -> Option<&PathBuf> {
        self.module_path.as_ref()
    }

    /// Returns the working module's directory or fails because the command
    /// must be run from within one.
    pub fn jump_to_module(&self) -> Result<&PathBuf, Error> {
        match &self.module_path {
            Some(p) => Ok(p),
            None => Err(Error::NoModuleFound(Hint::InitModule)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn find_module_path_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path().join("Source/Render");
        std::fs::create_dir_all(&module).unwrap();
        std::fs::write(dir.path().join(manifest::MODULE_MANIFEST_FILE), "").unwrap();

        // found from a nested directory
        let found = Context::find_module_path(&module).unwrap();
        assert_eq!(found, dir.path().to_path_buf());
    }

    #[test]
    fn find_module_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Context::find_module_path(dir.path()), None);
    }
}
