//! Options and arguments as data: the record of a parse, and the content of
//! `-include` files.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionAndValue {
    /// Name without leading dash.
    pub name: String,
    /// Empty for options used without a value.
    #[serde(default)]
    pub value: String,
}

impl OptionAndValue {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsAndArguments {
    #[serde(default)]
    pub options: Vec<OptionAndValue>,
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl OptionsAndArguments {
    /// Read an options file: JSON when the extension is `.json`, the line
    /// format of [`from_text`](Self::from_text) otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::from_text(&content))
        }
    }

    /// One `-option [value]` per line; blank lines and `#` comments are
    /// skipped, any other line is an argument.
    pub fn from_text(content: &str) -> Self {
        let mut parsed = Self::default();
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.strip_prefix('-') {
                Some(rest) => {
                    let rest = rest.strip_prefix('-').unwrap_or(rest);
                    let (name, value) = match rest.split_once(char::is_whitespace) {
                        Some((name, value)) => (name, value.trim()),
                        None => (rest, ""),
                    };
                    parsed.options.push(OptionAndValue::new(name, value));
                }
                None => parsed.arguments.push(line.to_string()),
            }
        }
        parsed
    }

    /// `(name, value)` pairs as accepted by
    /// [`Handler::apply_options_vector`](crate::Handler::apply_options_vector).
    pub fn option_pairs(&self) -> Vec<(String, String)> {
        self.options
            .iter()
            .map(|option| (option.name.clone(), option.value.clone()))
            .collect()
    }
}

/// Renders as an equivalent command line.
impl fmt::Display for OptionsAndArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::new();
        for option in &self.options {
            words.push(format!("-{}", option.name));
            if !option.value.is_empty() {
                words.push(quote_if_needed(&option.value));
            }
        }
        words.extend(self.arguments.iter().map(|argument| quote_if_needed(argument)));
        f.write_str(&words.join(" "))
    }
}

fn quote_if_needed(word: &str) -> String {
    if word.is_empty() || word.contains(char::is_whitespace) {
        format!("'{word}'")
    } else {
        word.to_string()
    }
}
