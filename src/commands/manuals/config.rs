// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    config - modify configuration values

SYNOPSIS
    linkplan config [options]

DESCRIPTION
    This command edits the configuration file living in the linkplan home
    directory. Keys take the 'table.key' form. The [defaults] table supplies
    values for command-line options left unset ('defaults.platform',
    'defaults.profile', 'defaults.link', 'defaults.format'). The [env] table
    holds machine-specific values that become 'env.*' substitution variables
    for dependency path templates, which is where toolkit installation
    directories belong.

    With no options, the current configuration file is printed. Edits keep
    the file's comments and formatting intact, and the file is validated
    before it is saved.

OPTIONS
    --set <key=value>...
        Write the value at the key's entry.

    --unset <key>...
        Delete the key's entry.

EXAMPLES
    linkplan config
    linkplan config --set defaults.platform=win64
    linkplan config --set env.CUDA_PATH="C:/Program Files/NVIDIA GPU Computing Toolkit/CUDA/v11.6"
    linkplan config --unset env.CUDA_PATH
"#;
