// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    env - display environment information

SYNOPSIS
    linkplan env [options]

DESCRIPTION
    This command prints the environment linkplan operates in: the home
    directory, the entries of the configuration file's [env] table, and,
    when run from within a module, the module's SDK environment variable
    with its captured value. Variables from a '.env' file in the module
    directory are included as well.

    With no arguments, every known variable is printed in KEY="value" form.
    Given one or more keys, only their raw values are printed, one per line.

OPTIONS
    <key>...
        Lookup environment variables to display their values.

EXAMPLES
    linkplan env
    linkplan env LINKPLAN_HOME
    linkplan env TELEPORT_SDK_DIR
"#;
