// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Compute a module's linkage plan.

Usage:
    linkplan plan [options]

Options:
    --platform <name>   target platform to resolve for
    --profile <tier>    build configuration tier
    --link <mode>       combine dependencies as 'static' or 'dynamic'
    --format <scheme>   plan file layout: 'tsv' or 'json'
    --out-dir <dir>     directory where the plan file is written

Use 'linkplan help plan' to read more about the command.
"#;
