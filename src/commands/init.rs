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

use crate::commands::helps::init;
use crate::core::context::Context;
use crate::core::manifest::Manifest;
use crate::core::manifest::MODULE_MANIFEST_FILE;
use crate::error::Error;
use crate::error::Hint;
use crate::error::LastError;
use crate::util::filesystem;
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Init {
    name: Option<String>,
    path: Option<PathBuf>,
}

impl Subcommand<Context> for Init {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(init::HELP))?;
        Ok(Init {
            // Options
            name: cli.get(Arg::option("name").value("module"))?,
            // Optional positionals
            path: cli.get(Arg::positional("path"))?,
        })
    }

    fn execute(self, _: &Context) -> proc::Result {
        let dest = match &self.path {
            Some(p) => p.clone(),
            None => std::env::current_dir()?,
        };
        let manifest_path = dest.join(MODULE_MANIFEST_FILE);
        if manifest_path.exists() == true {
            return Err(Error::ManifestAlreadyExists(
                manifest_path,
                Hint::EditManifest,
            ))?;
        }

        // derive the module name from the directory when not given
        let name = match &self.name {
            Some(n) => n.clone(),
            None => match dest.file_name().and_then(|f| f.to_str()) {
                Some(f) => f.to_string(),
                None => return Err(Error::ModuleNameMissing(Hint::NameSeparate))?,
            },
        };

        std::fs::create_dir_all(&dest)?;
        std::fs::write(&manifest_path, Manifest::write_empty_manifest(&name))
            .map_err(|e| Error::ConfigNotSaved(LastError(e.to_string())))?;

        println!(
            "info: created module manifest {:?}",
            filesystem::into_std_str(manifest_path)
        );
        Ok(())
    }
}
