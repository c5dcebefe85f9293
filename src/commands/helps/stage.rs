// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Copy runtime dependencies next to the built binary.

Usage:
    linkplan stage [options]

Options:
    --platform <name>   target platform to resolve for
    --profile <tier>    build configuration tier
    --link <mode>       combine dependencies as 'static' or 'dynamic'
    --to <dir>          overwrite the destination directory
    --verbose           display each file copy

Use 'linkplan help stage' to read more about the command.
"#;
