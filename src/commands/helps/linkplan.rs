// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"linkplan is a native dependency resolver for plugin modules.

Usage:
    linkplan [options] [command]

Commands:
    plan            compute a module's linkage plan
    stage           copy runtime dependencies next to the built binary
    env             display environment information
    config          modify configuration values
    init            create a new module manifest
    help            read in-depth documentation about a topic

Options:
    --version       print the version information and exit
    --help, -h      print this help information and exit

Use 'linkplan help <command>' for more information about a command.
"#;
