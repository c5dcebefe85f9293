// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Display linkplan environment information.

Usage:
    linkplan env [options]

Options:
    <key>...     lookup environment variables to display their values

Use 'linkplan help env' to read more about the command.
"#;
