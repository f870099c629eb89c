// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Handles list-or-string-or-false settings.

use serde::Deserialize;

use super::inputs::parse_list;

/// Lists may be written as a YAML sequence, a comma separated string, or
/// `false` to disable the list entirely.
pub fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match ListEntry::deserialize(deserializer)? {
        ListEntry::Items(items) => Ok(items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()),
        ListEntry::Text(text) => Ok(parse_list(&text)),
        ListEntry::Flag(false) => Ok(Vec::new()),
        ListEntry::Flag(true) => Err(serde::de::Error::custom(
            "expected a list, a comma separated string, or false",
        )),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEntry {
    Items(Vec<String>),
    Text(String),
    Flag(bool),
}
