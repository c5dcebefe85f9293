use std::collections::HashMap;

/// Lookup table for substitution variables available to path templates.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapTable(HashMap<String, String>);

impl SwapTable {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn add(&mut self, key: &str, value: &str) -> Option<String> {
        self.0.insert(key.to_string(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }
}

const L_DELIMITER: &str = "{{";
const R_DELIMITER: &str = "}}";

/// Performs variable replacement on the given `text`, looking up variables in
/// the `table` to swap with their values.
///
/// A variable whose key is not present in the table is emitted verbatim, as is
/// a variable that is never closed.
pub fn substitute(text: &str, table: &SwapTable) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(L_DELIMITER) {
        result.push_str(&rest[..start]);
        let body = &rest[start + L_DELIMITER.len()..];
        match body.find(R_DELIMITER) {
            Some(end) => {
                let key = body[..end].trim();
                match table.get(key) {
                    Some(value) => result.push_str(value),
                    // leave the unknown variable untouched
                    None => result.push_str(&rest[start..start + L_DELIMITER.len() + end + R_DELIMITER.len()]),
                }
                rest = &body[end + R_DELIMITER.len()..];
            }
            // never closed
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
mod test {
    use super::*;

    fn create_table() -> SwapTable {
        let mut table = SwapTable::new();
        table.add("platform", "Win64");
        table.add("config", "Release");
        table.add("env.cuda_path", "C:/cuda/v11.6");
        table
    }

    #[test]
    fn replace_variables() {
        let table = create_table();
        assert_eq!(
            substitute("lib/{{ config }}", &table),
            String::from("lib/Release")
        );
        assert_eq!(
            substitute("{{platform}}/{{ config }}/avstream.lib", &table),
            String::from("Win64/Release/avstream.lib")
        );
        assert_eq!(
            substitute("{{ env.cuda_path }}/lib/x64", &table),
            String::from("C:/cuda/v11.6/lib/x64")
        );
    }

    #[test]
    fn unknown_variable_is_kept() {
        let table = create_table();
        assert_eq!(
            substitute("lib/{{ mystery }}/core.lib", &table),
            String::from("lib/{{ mystery }}/core.lib")
        );
    }

    #[test]
    fn unclosed_variable_is_kept() {
        let table = create_table();
        assert_eq!(
            substitute("lib/{{ config", &table),
            String::from("lib/{{ config")
        );
    }

    #[test]
    fn no_variables() {
        let table = create_table();
        assert_eq!(substitute("plain/path", &table), String::from("plain/path"));
        assert_eq!(substitute("", &table), String::from(""));
    }
}
