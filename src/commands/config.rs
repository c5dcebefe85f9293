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

use crate::commands::helps::config;
use crate::core;
use crate::core::config::ConfigDocument;
use crate::core::context::Context;
use crate::error::Error;
use crate::error::LastError;
use std::str::FromStr;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Entry(String, String);

impl FromStr for Entry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // split on first '=' sign
        match s.split_once('=') {
            Some(e) => Ok(Entry(e.0.to_owned(), e.1.to_owned())),
            None => Err(Error::EntrySeparatorMissing(s.to_string())),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Config {
    set: Vec<Entry>,
    unset: Vec<String>,
}

impl Subcommand<Context> for Config {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(config::HELP))?;
        Ok(Config {
            // Options
            set: cli
                .get_all(Arg::option("set").value("key=value"))?
                .unwrap_or(Vec::new()),
            unset: cli
                .get_all(Arg::option("unset").value("key"))?
                .unwrap_or(Vec::new()),
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        let mut cfg = ConfigDocument::from_file(c.get_config_path())?;

        // display the configuration and exit
        if self.set.is_empty() == true && self.unset.is_empty() == true {
            println!("{}", cfg);
            return Ok(());
        }

        for entry in &self.set {
            // split by dots to get the table.key pair
            match entry.0.split_once('.') {
                Some((table, key)) => cfg.set(table, key, &entry.1),
                None => return Err(Error::ConfigKeyUnsupported(entry.0.to_string()))?,
            }
        }

        for key in &self.unset {
            match key.split_once('.') {
                Some((table, k)) => cfg.unset(table, k)?,
                None => return Err(Error::ConfigKeyUnsupported(key.to_string()))?,
            }
        }

        // is the config file still okay?
        if let Err(e) = core::config::Config::from_str(&cfg.to_string()) {
            return Err(Error::ConfigNotSaved(LastError(e.to_string())))?;
        }

        cfg.write(c.get_config_path())?;
        Ok(())
    }
}
