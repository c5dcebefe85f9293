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

use crate::commands::helps::env;
use crate::core::context::Context;
use crate::core::manifest::Manifest;
use crate::util::environment;
use crate::util::environment::EnvVar;
use crate::util::environment::Environment;
use crate::util::filesystem;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Env {
    keys: Vec<String>,
}

impl Subcommand<Context> for Env {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(env::HELP))?;
        Ok(Env {
            // Remaining args are the keys to look up
            keys: cli.remainder()?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        // assemble environment information
        let mut env = Environment::new()
            .add(EnvVar::with(
                environment::LINKPLAN_HOME,
                &filesystem::into_std_str(c.get_home_path().clone()),
            ))
            .add(EnvVar::with(
                environment::NO_COLOR,
                &Environment::read(environment::NO_COLOR).unwrap_or(String::new()),
            ))
            .from_config(c.get_config())?;

        // report the working module's sdk variable and its captured state
        if let Some(module_dir) = c.get_module_path() {
            if let Ok(manifest) = Manifest::load(module_dir) {
                let key = manifest.get_module().sdk_env_key();
                let value = Environment::read(&key).unwrap_or(String::new());
                env = env.add(EnvVar::with(&key, &value));
            }
            env = env.from_env_file(module_dir)?;
        }

        self.run(env)
    }
}

impl Env {
    fn run(&self, env: Environment) -> proc::Result {
        let mut result = String::new();

        match self.keys.is_empty() {
            // print debugging output (all variables)
            true => {
                env.iter().for_each(|e| {
                    if result.is_empty() == false {
                        result.push('\n');
                    }
                    result.push_str(&format!("{:?}", e))
                });
            }
            // print values only
            false => {
                let mut initial = true;
                self.keys.iter().for_each(|k| {
                    if initial == false {
                        result.push('\n');
                    }
                    if let Some(entry) = env.get(k) {
                        result.push_str(entry.get_value());
                    }
                    initial = false;
                });
            }
        }

        println!("{}", result);
        Ok(())
    }
}
