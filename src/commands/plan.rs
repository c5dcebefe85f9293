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

use colored::Colorize;

use crate::commands::helps::plan;
use crate::core::build::BuildContext;
use crate::core::build::LinkMode;
use crate::core::context::Context;
use crate::core::linkage;
use crate::core::linkage::Format;
use crate::core::linkage::ResolvedLinkage;
use crate::core::manifest::Manifest;
use crate::core::platform::Platform;
use crate::core::profile::Profile;
use crate::error::Error;
use crate::error::LastError;
use crate::util::environment::Environment;
use crate::util::filesystem;
use crate::util::filesystem::Standardize;
use std::path::Path;
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

/// Directory under the plugin root where plan files are written.
const OUTPUT_DIR: &str = "Intermediate";

#[derive(Debug, PartialEq)]
pub struct Plan {
    platform: Option<Platform>,
    profile: Option<Profile>,
    link: Option<LinkMode>,
    format: Option<Format>,
    out_dir: Option<String>,
}

impl Subcommand<Context> for Plan {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(plan::HELP))?;
        Ok(Plan {
            // Options
            platform: cli.get(Arg::option("platform").value("name"))?,
            profile: cli.get(Arg::option("profile").value("tier"))?,
            link: cli.get(Arg::option("link").value("mode"))?,
            format: cli.get(Arg::option("format").value("scheme"))?,
            out_dir: cli.get(Arg::option("out-dir").value("dir"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        // verify running from a module directory
        let module_dir = c.jump_to_module()?;
        let manifest = Manifest::load(module_dir)?;

        let linkage = Self::run(c, module_dir, &manifest, self.platform, self.profile, self.link)?;

        // surface missing runtime binaries as a warning, never an error here
        for copy in linkage.get_runtime_deps() {
            if copy.get_source().exists() == false {
                println!(
                    "{}: runtime dependency {:?} does not exist yet",
                    "warning".yellow(),
                    filesystem::into_std_str(copy.get_source().clone())
                );
            }
        }

        // write the plan where the orchestrator expects it
        let format = self
            .format
            .or(c.get_config().get_defaults().get_format())
            .unwrap_or_default();
        let out_path = match &self.out_dir {
            Some(dir) => PathBuf::from(dir),
            None => module_dir.join("..").join("..").join(OUTPUT_DIR).standardize(),
        };
        std::fs::create_dir_all(&out_path)
            .map_err(|e| Error::PlanNotSaved(LastError(e.to_string())))?;
        let plan_path = out_path.join(format.get_filename());
        std::fs::write(&plan_path, linkage.to_plan_string(&format)?)
            .map_err(|e| Error::PlanNotSaved(LastError(e.to_string())))?;

        println!(
            "info: linkage plan written to {:?}",
            filesystem::into_std_str(plan_path)
        );
        Ok(())
    }
}

impl Plan {
    /// Performs the backend logic for computing a module's linkage.
    ///
    /// Options left as [None] fall back to the configuration file's
    /// `[defaults]` table and then to the built-in defaults.
    pub fn run(
        c: &Context,
        module_dir: &Path,
        manifest: &Manifest,
        platform: Option<Platform>,
        profile: Option<Profile>,
        link: Option<LinkMode>,
    ) -> Result<ResolvedLinkage, Error> {
        let defaults = c.get_config().get_defaults();
        let platform = platform
            .or(defaults.get_platform())
            .unwrap_or(Platform::host());
        let profile = profile
            .or(defaults.get_profile())
            .unwrap_or(Profile::Development);
        let link = link.or(defaults.get_link()).unwrap_or(LinkMode::Dynamic);

        if platform.is_supported() == false {
            println!(
                "{}: platform is not supported; the plan will carry the {} tag",
                "warning".yellow(),
                platform
            );
        }

        // the single environment read of the resolution pass
        let sdk_key = manifest.get_module().sdk_env_key();
        let ctx = BuildContext::new(module_dir)
            .platform(platform)
            .profile(profile)
            .link_mode(link)
            .dirs(manifest.get_directories().clone())
            .sdk_from_env(&sdk_key);
        if ctx.has_sdk_override() == false {
            println!(
                "info: {} not set; using default sdk root {:?}",
                sdk_key,
                filesystem::into_std_str(ctx.sdk_root())
            );
        }

        // collect caller-supplied substitution variables
        let extras = Environment::new()
            .from_config(c.get_config())
            .map_err(|e| {
                Error::ConfigParseFailed(c.get_config_path().clone(), LastError(e.to_string()))
            })?
            .from_env_file(module_dir)
            .map_err(|e| {
                Error::ManifestParseFailed(module_dir.to_path_buf(), LastError(e.to_string()))
            })?
            .to_swap_table();

        let linkage = linkage::resolve(&ctx, manifest.get_deps(), &extras)?;
        println!(
            "info: resolved {} include paths, {} libraries, {} runtime files",
            linkage.get_include_paths().len(),
            linkage.get_libraries().len(),
            linkage.get_runtime_deps().len()
        );
        Ok(linkage)
    }
}
