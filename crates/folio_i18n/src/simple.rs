use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::message::Message;

const MAX_CATALOG_ENTRIES: usize = 10_000;
const MAX_KEY_BYTES: usize = 128;
const MAX_VALUE_BYTES: usize = 16 * 1024;

fn is_valid_key(key: &str) -> bool {
    let mut it = key.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
}

/// A flat string catalog parsed from a YAML mapping:
///
/// ```yaml
/// chart.no_data: "No data available"
/// chart.point: "{label}: {value}"
/// ```
///
/// Placeholders `{name}` are replaced by message arguments; `{{` and `}}`
/// produce literal braces. Unknown placeholders are kept verbatim.
#[derive(Clone, Debug, Default)]
pub struct SimpleCatalog {
    entries: FxHashMap<String, String>,
}

impl SimpleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrite entries with those of `other`.
    pub fn merge(&mut self, other: SimpleCatalog) {
        self.entries.extend(other.entries);
    }

    /// Parse a YAML mapping of string keys to string values.
    pub fn parse(src: &str) -> Result<Self, SimpleParseError> {
        let value: serde_yaml::Value = serde_yaml::from_str(src)
            .map_err(|e| SimpleParseError::Yaml(format!("yaml parse error: {e}")))?;
        let raw = match value {
            serde_yaml::Value::Mapping(m) => m,
            serde_yaml::Value::Null => return Ok(Self::new()),
            _ => {
                return Err(SimpleParseError::Yaml(
                    "catalog root must be a mapping".to_string(),
                ))
            }
        };
        if raw.len() > MAX_CATALOG_ENTRIES {
            return Err(SimpleParseError::TooManyEntries(MAX_CATALOG_ENTRIES));
        }

        let mut cat = Self::new();
        for (k, v) in raw {
            let Some(key) = k.as_str() else {
                return Err(SimpleParseError::Yaml(
                    "yaml keys must be strings".to_string(),
                ));
            };
            if !is_valid_key(key) {
                return Err(SimpleParseError::InvalidKey(key.to_string()));
            }
            if key.len() > MAX_KEY_BYTES {
                return Err(SimpleParseError::TooLong {
                    key: key.to_string(),
                    max: MAX_KEY_BYTES,
                });
            }
            let Some(val) = v.as_str() else {
                return Err(SimpleParseError::Yaml(format!(
                    "yaml value for key `{key}` must be a string"
                )));
            };
            if val.len() > MAX_VALUE_BYTES {
                return Err(SimpleParseError::TooLong {
                    key: key.to_string(),
                    max: MAX_VALUE_BYTES,
                });
            }
            cat.insert(key, val);
        }
        Ok(cat)
    }

    pub fn format_message(&self, msg: &Message) -> Option<String> {
        let tmpl = self.get(msg.id.as_ref())?;
        Some(apply_placeholders(tmpl, msg))
    }
}

#[derive(Debug, Error)]
pub enum SimpleParseError {
    #[error("yaml catalog error: {0}")]
    Yaml(String),

    #[error("invalid key `{0}` (allowed: [A-Za-z0-9][A-Za-z0-9_.-]*)")]
    InvalidKey(String),

    #[error("entry `{key}` is too long (max {max} bytes)")]
    TooLong { key: String, max: usize },

    #[error("too many entries (max {0})")]
    TooManyEntries(usize),
}

fn apply_placeholders(tmpl: &str, msg: &Message) -> String {
    if !tmpl.contains('{') && !tmpl.contains('}') {
        return tmpl.to_string();
    }

    let mut out = String::with_capacity(tmpl.len() + 16);
    let mut chars = tmpl.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    name.push(n);
                }
                match (closed, msg.find_arg(name.trim())) {
                    (true, Some(v)) => out.push_str(&v.to_string()),
                    (true, None) => {
                        out.push('{');
                        out.push_str(&name);
                        out.push('}');
                    }
                    (false, _) => {
                        out.push('{');
                        out.push_str(&name);
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}
