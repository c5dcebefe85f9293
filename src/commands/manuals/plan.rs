// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    plan - compute a module's linkage plan

SYNOPSIS
    linkplan plan [options]

DESCRIPTION
    This command resolves the module's declared native dependencies into the
    four lists a build orchestrator consumes: include directories, libraries
    to link, libraries to delay-load, and runtime files to copy next to the
    built binary. The command must run from within a module: the nearest
    directory holding a 'Linkplan.toml' file is the working module.

    Resolution is pure path computation. Dependency paths are composed from
    the module's anchors (the 'Libraries' and 'Binaries' directories two
    levels above the module) and the SDK root. The SDK root defaults to the
    'include' directory inside the libraries directory; setting the module's
    SDK environment variable overrides it. The variable's name is the
    module's name in UPPER_SNAKE form with the '_SDK_DIR' suffix, unless the
    manifest names one explicitly with the 'sdk-env' key.

    Path templates may reference substitution variables with the
    '{{ variable }}' syntax: 'platform', 'profile', 'config' (the physical
    configuration directory name), 'sdk', 'libraries', 'binaries', 'name',
    and any 'env.*' entries contributed by the configuration file's [env]
    table. Entries whose 'when' condition rejects the current platform,
    profile, or link mode contribute nothing to the plan.

    Missing files on disk never fail this command; a runtime dependency that
    does not exist yet is reported as a warning for the orchestrator to act
    on.

OPTIONS
    --platform <name>
        Target platform to resolve for. An unrecognized name resolves with
        the 'Unsupported' tag rather than failing.

    --profile <tier>
        Build configuration tier: 'debug', 'development', or 'shipping'.

    --link <mode>
        Combine dependencies as 'static' archives or reference a 'dynamic'
        library at build time.

    --format <scheme>
        Plan file layout: 'tsv' (default) or 'json'.

    --out-dir <dir>
        Directory where the plan file is written. Defaults to the
        'Intermediate' directory under the plugin root.

EXAMPLES
    linkplan plan
    linkplan plan --platform win64 --profile shipping
    linkplan plan --link static --format json
"#;
