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

use crate::commands::helps::stage;
use crate::commands::plan::Plan;
use crate::core::build::LinkMode;
use crate::core::context::Context;
use crate::core::manifest::Manifest;
use crate::core::platform::Platform;
use crate::core::profile::Profile;
use crate::error::Error;
use crate::error::Hint;
use crate::error::LastError;
use crate::util::filesystem;
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Stage {
    platform: Option<Platform>,
    profile: Option<Profile>,
    link: Option<LinkMode>,
    to: Option<String>,
    verbose: bool,
}

impl Subcommand<Context> for Stage {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(stage::HELP))?;
        Ok(Stage {
            // Flags
            verbose: cli.check(Arg::flag("verbose"))?,
            // Options
            platform: cli.get(Arg::option("platform").value("name"))?,
            profile: cli.get(Arg::option("profile").value("tier"))?,
            link: cli.get(Arg::option("link").value("mode"))?,
            to: cli.get(Arg::option("to").value("dir"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        // verify running from a module directory
        let module_dir = c.jump_to_module()?;
        let manifest = Manifest::load(module_dir)?;

        let linkage = Plan::run(c, module_dir, &manifest, self.platform, self.profile, self.link)?;

        // execute the copies the resolver only described
        let mut files = 0;
        let mut bytes = 0;
        for copy in linkage.get_runtime_deps() {
            let src = copy.get_source();
            if src.exists() == false {
                return Err(Error::RuntimeFileMissing(src.clone(), Hint::CheckManifest))?;
            }
            let dst = match &self.to {
                // resolve the override against the module directory
                Some(dir) => match src.file_name() {
                    Some(name) => {
                        PathBuf::from(filesystem::resolve_rel_path(module_dir, dir)).join(name)
                    }
                    None => continue,
                },
                None => copy.get_destination().clone(),
            };
            match filesystem::copy_file(src, &dst, true) {
                Ok(b) => {
                    if self.verbose == true {
                        println!(
                            "info: staged {} -> {}",
                            filesystem::into_std_str(src.clone()),
                            filesystem::into_std_str(dst)
                        );
                    }
                    files += 1;
                    bytes += b;
                }
                Err(e) => {
                    return Err(Error::StageCopyFailed(src.clone(), LastError(e.to_string())))?
                }
            }
        }

        println!("info: staged {} runtime files ({} bytes)", files, bytes);
        Ok(())
    }
}
