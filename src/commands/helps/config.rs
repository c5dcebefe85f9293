// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Modify configuration values.

Usage:
    linkplan config [options]

Options:
    --set <key=value>...    write the value at the key's entry
    --unset <key>...        delete the key's entry

Use 'linkplan help config' to read more about the command.
"#;
