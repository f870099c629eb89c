// ABOUTME: Reads action inputs from the environment with GitHub Actions conventions.
// ABOUTME: Parses booleans and comma/newline separated lists.

use crate::error::{Error, Result};

/// Source of raw input values, usually the process environment.
///
/// For a key `FOO` the lookup tries `INPUT_FOO` (set by the Actions runner for
/// `with:` inputs) and then `FOO` (set through `env:`). Empty values count as unset.
pub struct Inputs<F> {
    lookup: F,
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl Inputs<fn(&str) -> Option<String>> {
    pub fn from_env() -> Self {
        Inputs::new(env_lookup as fn(&str) -> Option<String>)
    }
}

impl<F> Inputs<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Value of the first key that is set.
    pub fn get(&self, key: &str) -> Option<String> {
        let input_key = format!("INPUT_{}", key.to_ascii_uppercase().replace(' ', "_"));
        [input_key.as_str(), key]
            .into_iter()
            .filter_map(|k| (self.lookup)(k))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    }

    /// Value of the first of `keys` that is set.
    pub fn get_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.get(k))
    }

    pub fn required(&self, keys: &[&str]) -> Result<String> {
        self.get_any(keys)
            .ok_or_else(|| Error::MissingInput(keys.join(" or ")))
    }

    pub fn boolean(&self, key: &str) -> Result<Option<bool>> {
        self.get(key).map(|v| parse_bool(key, &v)).transpose()
    }

    /// Comma or newline separated list. `false` disables the list (empty vec).
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|v| parse_list(&v))
    }
}

pub(crate) fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        other => Err(Error::InvalidConfig(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}

pub(crate) fn parse_list(value: &str) -> Vec<String> {
    if value.trim().eq_ignore_ascii_case("false") {
        return Vec::new();
    }

    value
        .split([',', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
