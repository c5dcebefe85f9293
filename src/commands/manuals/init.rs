// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    init - create a new module manifest

SYNOPSIS
    linkplan init [options] [<path>]

DESCRIPTION
    This command writes a starter 'Linkplan.toml' manifest into the given
    directory, making it a module that the other commands can work from. The
    module's name defaults to the directory's name. The command refuses to
    overwrite an existing manifest.

OPTIONS
    <path>
        Directory to initialize. Defaults to the current directory and is
        created if it does not exist.

    --name <module>
        Module name to use instead of the directory name.

EXAMPLES
    linkplan init
    linkplan init --name teleport Source/Teleport
"#;
