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

use crate::core::build::BuildContext;
use crate::core::spec::DependencyKind;
use crate::core::spec::DependencySpec;
use crate::core::spec::Root;
use crate::core::swap;
use crate::core::swap::SwapTable;
use crate::error::Error;
use crate::util::filesystem;
use crate::util::filesystem::Standardize;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Serialized layout of a written plan file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Tsv,
    Json,
}

impl Default for Format {
    fn default() -> Self {
        Self::Tsv
    }
}

impl Format {
    /// The file name a plan of this format is written under.
    pub fn get_filename(&self) -> &str {
        match self {
            Self::Tsv => "linkage.tsv",
            Self::Json => "linkage.json",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            _ => Err(Error::FormatUnknown(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tsv => write!(f, "tsv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A file that must be copied next to the built binary for it to run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeFile {
    source: PathBuf,
    destination: PathBuf,
}

impl RuntimeFile {
    pub fn get_source(&self) -> &PathBuf {
        &self.source
    }

    pub fn get_destination(&self) -> &PathBuf {
        &self.destination
    }
}

/// The four-part linkage result handed to the build orchestrator.
///
/// Produced fresh on every [resolve] call; immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLinkage {
    include_paths: Vec<PathBuf>,
    libraries: Vec<PathBuf>,
    delay_load: Vec<String>,
    runtime_deps: Vec<RuntimeFile>,
}

impl ResolvedLinkage {
    pub fn get_include_paths(&self) -> &Vec<PathBuf> {
        &self.include_paths
    }

    pub fn get_libraries(&self) -> &Vec<PathBuf> {
        &self.libraries
    }

    pub fn get_delay_load(&self) -> &Vec<String> {
        &self.delay_load
    }

    pub fn get_runtime_deps(&self) -> &Vec<RuntimeFile> {
        &self.runtime_deps
    }

    /// Creates the plan file contents in the tab-separated format.
    ///
    /// The line format is SECTION\tFIELD(\tFIELD), one entry per line, in
    /// resolution order.
    pub fn to_tsv_string(&self) -> String {
        let mut result = String::new();
        for dir in &self.include_paths {
            result += &format!("INCLUDE\t{}\n", filesystem::into_std_str(dir.clone()));
        }
        for lib in &self.libraries {
            result += &format!("LINK\t{}\n", filesystem::into_std_str(lib.clone()));
        }
        for file in &self.delay_load {
            result += &format!("DELAY\t{}\n", file);
        }
        for copy in &self.runtime_deps {
            result += &format!(
                "COPY\t{}\t{}\n",
                filesystem::into_std_str(copy.source.clone()),
                filesystem::into_std_str(copy.destination.clone())
            );
        }
        result
    }

    /// Creates the plan file contents in the json format.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Creates the plan file contents for the given `format`.
    pub fn to_plan_string(&self, format: &Format) -> Result<String, Error> {
        match format {
            Format::Tsv => Ok(self.to_tsv_string()),
            Format::Json => match self.to_json_string() {
                Ok(s) => Ok(s),
                Err(e) => Err(Error::PlanNotSaved(crate::error::LastError(e.to_string()))),
            },
        }
    }
}

/// Transforms the declared `specs` plus the build context into the four-part
/// linkage result.
///
/// Pure path computation: no filesystem access, no environment reads, no
/// hidden state. Identical inputs always produce a structurally identical
/// result. Entries whose condition rejects the context contribute nothing to
/// any output list. Two surviving specs that resolve the same library or
/// binary path under different kinds are rejected as a configuration error.
///
/// `extras` carries caller-supplied substitution variables (such as `env.*`
/// entries from the configuration file) made available to every template.
pub fn resolve(
    ctx: &BuildContext,
    specs: &[DependencySpec],
    extras: &SwapTable,
) -> Result<ResolvedLinkage, Error> {
    let mut table = extras.clone();
    table.add("platform", &ctx.get_platform().to_string());
    table.add("profile", &ctx.get_profile().to_string());
    table.add("config", ctx.config_dir_name());
    table.add("sdk", &filesystem::into_std_str(ctx.sdk_root()));
    table.add(
        "libraries",
        &filesystem::into_std_str(ctx.get_libraries_dir().clone()),
    );
    table.add(
        "binaries",
        &filesystem::into_std_str(ctx.get_binaries_dir().clone()),
    );

    let mut include_paths: Vec<PathBuf> = Vec::new();
    let mut libraries: Vec<PathBuf> = Vec::new();
    let mut delay_load: Vec<String> = Vec::new();
    let mut runtime_deps: Vec<RuntimeFile> = Vec::new();
    // tracks every resolved library/binary path to fail closed on conflicts
    let mut kinds: HashMap<String, DependencyKind> = HashMap::new();

    // destination directory for runtime copies, alongside the built binary
    let stage_dir = ctx.get_binaries_dir().join(ctx.get_platform().to_string());

    for spec in specs {
        if spec.accepts(ctx) == false {
            continue;
        }
        table.add("name", spec.get_name());

        let root = match spec.get_root() {
            Root::Sdk => ctx.sdk_root(),
            Root::Libraries => ctx.get_libraries_dir().clone(),
            Root::Binaries => ctx.get_binaries_dir().clone(),
        };

        for dir in spec.get_include() {
            let dir = root.join(swap::substitute(dir, &table)).standardize();
            let key = filesystem::into_std_str(dir.clone());
            // keep first-seen order while rejecting duplicates
            if include_paths
                .iter()
                .any(|p| filesystem::into_std_str(p.clone()) == key)
                == false
            {
                include_paths.push(dir);
            }
        }

        let lib_dir = match spec.get_path() {
            Some(template) => root.join(swap::substitute(template, &table)).standardize(),
            None => root,
        };

        match spec.get_kind() {
            DependencyKind::Header => (),
            DependencyKind::Static => {
                let file = match spec.get_lib() {
                    Some(f) => swap::substitute(f, &table),
                    None => ctx.get_platform().staticlib_name(spec.get_name()),
                };
                let full = lib_dir.join(file).standardize();
                insert_kind(&mut kinds, spec, &full, DependencyKind::Static)?;
                libraries.push(full);
            }
            DependencyKind::Dynamic => {
                let file = match spec.get_bin() {
                    Some(f) => swap::substitute(f, &table),
                    None => ctx.get_platform().dylib_name(spec.get_name()),
                };
                let full = lib_dir.join(&file).standardize();
                insert_kind(&mut kinds, spec, &full, DependencyKind::Dynamic)?;
                delay_load.push(file.clone());
                runtime_deps.push(RuntimeFile {
                    source: full,
                    destination: stage_dir.join(&file).standardize(),
                });
                for template in spec.get_runtime() {
                    let source = lib_dir
                        .join(swap::substitute(template, &table))
                        .standardize();
                    if let Some(file_name) = source.file_name() {
                        let destination = stage_dir.join(file_name).standardize();
                        runtime_deps.push(RuntimeFile {
                            source: source,
                            destination: destination,
                        });
                    }
                }
            }
        }
    }

    Ok(ResolvedLinkage {
        include_paths: include_paths,
        libraries: libraries,
        delay_load: delay_load,
        runtime_deps: runtime_deps,
    })
}

/// Records the kind a resolved path was claimed under, rejecting a second
/// claim of a different kind.
fn insert_kind(
    kinds: &mut HashMap<String, DependencyKind>,
    spec: &DependencySpec,
    path: &PathBuf,
    kind: DependencyKind,
) -> Result<(), Error> {
    let key = filesystem::into_std_str(path.clone());
    match kinds.insert(key, kind) {
        Some(prev) => {
            if prev != kind {
                Err(Error::DependencyConflict(
                    spec.get_name().to_string(),
                    path.clone(),
                    kind,
                    prev,
                ))
            } else {
                Ok(())
            }
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::build::LinkMode;
    use crate::core::platform::Platform;
    use crate::core::profile::Profile;
    use crate::core::spec::Condition;
    use std::path::Path;

    fn test_context() -> BuildContext {
        BuildContext::new(Path::new("Plugins/Sample/Source/Render"))
            .platform(Platform::Win64)
            .profile(Profile::Development)
            .link_mode(LinkMode::Dynamic)
    }

    #[test]
    fn single_static_scenario() {
        let ctx = test_context();
        let specs = vec![DependencySpec::new("core", DependencyKind::Static)
            .path("lib/{{ config }}")
            .include("core/include")];
        let linkage = resolve(&ctx, &specs, &SwapTable::new()).unwrap();

        assert_eq!(
            linkage.get_libraries(),
            &vec![PathBuf::from("Plugins/Sample/Libraries/lib/Release/core.lib")]
        );
        assert_eq!(
            linkage.get_include_paths(),
            &vec![PathBuf::from("Plugins/Sample/Libraries/core/include")]
        );
        assert_eq!(linkage.get_delay_load().is_empty(), true);
        assert_eq!(linkage.get_runtime_deps().is_empty(), true);
    }

    #[test]
    fn deterministic() {
        let ctx = test_context();
        let specs = vec![
            DependencySpec::new("avstream", DependencyKind::Dynamic)
                .path("lib/{{ config }}")
                .include("avstream/Include")
                .runtime("efp.dll"),
            DependencySpec::new("draco", DependencyKind::Static).path("draco/{{ config }}"),
        ];
        let a = resolve(&ctx, &specs, &SwapTable::new()).unwrap();
        let b = resolve(&ctx, &specs, &SwapTable::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn declaration_order_is_preserved() {
        let ctx = test_context();
        let specs = vec![
            DependencySpec::new("alpha", DependencyKind::Static),
            DependencySpec::new("beta", DependencyKind::Static),
            DependencySpec::new("gamma", DependencyKind::Static),
        ];
        let linkage = resolve(&ctx, &specs, &SwapTable::new()).unwrap();
        assert_eq!(
            linkage.get_libraries(),
            &vec![
                PathBuf::from("Plugins/Sample/Libraries/alpha.lib"),
                PathBuf::from("Plugins/Sample/Libraries/beta.lib"),
                PathBuf::from("Plugins/Sample/Libraries/gamma.lib"),
            ]
        );
    }

    #[test]
    fn rejected_specs_contribute_nothing() {
        // the static aggregate set and the lone dynamic server swap as
        // disjoint alternatives under the link mode
        let specs = vec![
            DependencySpec::new("avstream", DependencyKind::Static)
                .path("lib/{{ config }}")
                .include("avstream/Include")
                .when(Condition::new().link(LinkMode::Static)),
            DependencySpec::new("efp", DependencyKind::Static)
                .path("lib/{{ config }}")
                .when(Condition::new().link(LinkMode::Static)),
            DependencySpec::new("TeleportServer", DependencyKind::Dynamic)
                .path("server/{{ config }}")
                .when(Condition::new().link(LinkMode::Dynamic)),
        ];

        let ctx = test_context().link_mode(LinkMode::Dynamic);
        let linkage = resolve(&ctx, &specs, &SwapTable::new()).unwrap();
        assert_eq!(linkage.get_libraries().is_empty(), true);
        // no include path from the skipped aggregate set either
        assert_eq!(linkage.get_include_paths().is_empty(), true);
        assert_eq!(
            linkage.get_delay_load(),
            &vec![String::from("TeleportServer.dll")]
        );
        assert_eq!(linkage.get_runtime_deps().len(), 1);

        let ctx = test_context().link_mode(LinkMode::Static);
        let linkage = resolve(&ctx, &specs, &SwapTable::new()).unwrap();
        assert_eq!(linkage.get_libraries().len(), 2);
        assert_eq!(linkage.get_delay_load().is_empty(), true);
        assert_eq!(linkage.get_runtime_deps().is_empty(), true);
    }

    #[test]
    fn include_paths_deduplicate_first_seen() {
        let ctx = test_context();
        let specs = vec![
            DependencySpec::new("avstream", DependencyKind::Header).include("shared/include"),
            DependencySpec::new("server", DependencyKind::Header)
                .include("server/include")
                .include("shared/include"),
        ];
        let linkage = resolve(&ctx, &specs, &SwapTable::new()).unwrap();
        assert_eq!(
            linkage.get_include_paths(),
            &vec![
                PathBuf::from("Plugins/Sample/Libraries/shared/include"),
                PathBuf::from("Plugins/Sample/Libraries/server/include"),
            ]
        );
    }

    #[test]
    fn dynamic_dependency_is_complete() {
        let ctx = test_context();
        let specs = vec![DependencySpec::new("avstream", DependencyKind::Dynamic)
            .path("lib/{{ config }}")
            .runtime("efp.dll")];
        let linkage = resolve(&ctx, &specs, &SwapTable::new()).unwrap();

        // exactly one delay-load entry and its own binary plus the extra copy
        assert_eq!(linkage.get_delay_load(), &vec![String::from("avstream.dll")]);
        assert_eq!(linkage.get_runtime_deps().len(), 2);
        let own = &linkage.get_runtime_deps()[0];
        assert_eq!(
            own.get_source(),
            &PathBuf::from("Plugins/Sample/Libraries/lib/Release/avstream.dll")
        );
        assert_eq!(
            own.get_destination(),
            &PathBuf::from("Plugins/Sample/Binaries/Win64/avstream.dll")
        );
        // dynamic dependencies never join the link line
        assert_eq!(linkage.get_libraries().is_empty(), true);
    }

    #[test]
    fn conflicting_kinds_fail_closed() {
        let ctx = test_context();
        let specs = vec![
            DependencySpec::new("core", DependencyKind::Static)
                .path("lib")
                .lib("core.bin"),
            DependencySpec::new("core-dyn", DependencyKind::Dynamic)
                .path("lib")
                .bin("core.bin"),
        ];
        let result = resolve(&ctx, &specs, &SwapTable::new());
        match result {
            Err(Error::DependencyConflict(name, path, kind, prev)) => {
                assert_eq!(name, "core-dyn");
                assert_eq!(path, PathBuf::from("Plugins/Sample/Libraries/lib/core.bin"));
                assert_eq!(kind, DependencyKind::Dynamic);
                assert_eq!(prev, DependencyKind::Static);
            }
            _ => panic!("expected a dependency conflict"),
        }
    }

    #[test]
    fn same_kind_duplicate_is_tolerated() {
        let ctx = test_context();
        let specs = vec![
            DependencySpec::new("core", DependencyKind::Static).path("lib"),
            DependencySpec::new("core", DependencyKind::Static).path("lib"),
        ];
        let linkage = resolve(&ctx, &specs, &SwapTable::new()).unwrap();
        // the link line is kept verbatim, repeats included
        assert_eq!(linkage.get_libraries().len(), 2);
    }

    #[test]
    fn sdk_rooted_spec() {
        let ctx = test_context().sdk_override(Some(PathBuf::from("/custom/sdk")));
        let specs = vec![DependencySpec::new("draco", DependencyKind::Static)
            .root(Root::Sdk)
            .path("thirdparty/draco/{{ config }}")
            .include("thirdparty/draco/include")];
        let linkage = resolve(&ctx, &specs, &SwapTable::new()).unwrap();
        assert_eq!(
            linkage.get_libraries(),
            &vec![PathBuf::from("/custom/sdk/thirdparty/draco/Release/draco.lib")]
        );
        assert_eq!(
            linkage.get_include_paths(),
            &vec![PathBuf::from("/custom/sdk/thirdparty/draco/include")]
        );
    }

    #[test]
    fn caller_supplied_variables() {
        let ctx = test_context();
        let mut extras = SwapTable::new();
        extras.add("env.cuda_path", "/opt/cuda/v11.6");
        // an absolute template passes through the root join unchanged
        let specs = vec![DependencySpec::new("cudart", DependencyKind::Static)
            .path("{{ env.cuda_path }}/lib/x64")];
        let linkage = resolve(&ctx, &specs, &extras).unwrap();
        assert_eq!(
            linkage.get_libraries(),
            &vec![PathBuf::from("/opt/cuda/v11.6/lib/x64/cudart.lib")]
        );
    }

    #[test]
    fn unsupported_platform_is_sentinel_not_error() {
        let ctx = test_context().platform(Platform::Unsupported);
        let specs = vec![DependencySpec::new("avstream", DependencyKind::Dynamic)
            .path("lib/{{ platform }}")];
        let linkage = resolve(&ctx, &specs, &SwapTable::new()).unwrap();
        assert_eq!(
            linkage.get_runtime_deps()[0].get_source(),
            &PathBuf::from("Plugins/Sample/Libraries/lib/Unsupported/avstream.unsupported")
        );
    }

    #[test]
    fn tsv_plan_layout() {
        let ctx = test_context();
        let specs = vec![DependencySpec::new("avstream", DependencyKind::Dynamic)
            .path("lib/{{ config }}")
            .include("avstream/Include")];
        let linkage = resolve(&ctx, &specs, &SwapTable::new()).unwrap();
        let plan = linkage.to_tsv_string();
        assert_eq!(
            plan,
            "\
INCLUDE\tPlugins/Sample/Libraries/avstream/Include
DELAY\tavstream.dll
COPY\tPlugins/Sample/Libraries/lib/Release/avstream.dll\tPlugins/Sample/Binaries/Win64/avstream.dll
"
        );
    }
}
