// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    stage - copy runtime dependencies next to the built binary

SYNOPSIS
    linkplan stage [options]

DESCRIPTION
    This command resolves the module's linkage exactly as 'linkplan plan'
    does and then executes the runtime file copies the plan only describes.
    Each runtime dependency is copied into the module's binaries directory
    under the platform's name, creating directories as needed and
    overwriting stale copies.

    Unlike planning, staging touches the filesystem: a runtime dependency
    whose source file does not exist is a configuration error and stops the
    command.

OPTIONS
    --platform <name>
        Target platform to resolve for.

    --profile <tier>
        Build configuration tier: 'debug', 'development', or 'shipping'.

    --link <mode>
        Combine dependencies as 'static' archives or reference a 'dynamic'
        library at build time.

    --to <dir>
        Overwrite the destination directory for every copied file.

    --verbose
        Display each file copy as it happens.

EXAMPLES
    linkplan stage
    linkplan stage --platform win64 --to ../../Binaries/Win64 --verbose
"#;
