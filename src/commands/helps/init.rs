// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Create a new module manifest.

Usage:
    linkplan init [options] [<path>]

Options:
    <path>            directory to initialize (defaults to the current directory)
    --name <module>   module name to use instead of the directory name

Use 'linkplan help init' to read more about the command.
"#;
