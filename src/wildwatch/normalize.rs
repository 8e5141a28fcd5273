//! Flattening of loosely-typed classifier fields into display text.
//!
//! The classification service answers with fields whose shape varies from
//! call to call: a plain string, an object, a list, or a string that itself
//! holds encoded JSON. [`FieldValue`] decodes that once at the boundary and
//! [`normalize`] renders any of the shapes to a single string.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    PlainText(String),
    /// Key/value pairs in the order the service sent them.
    StructuredMap(Vec<(String, FieldValue)>),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Decode a raw JSON value. A top-level string holding an encoded object or
    /// list is parsed; one that fails to parse stays plain text.
    pub fn decode(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::from_text(text),
            other => Self::decode_nested(other),
        }
    }

    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if (trimmed.starts_with('{') || trimmed.starts_with('['))
            && let Ok(parsed) = serde_json::from_str::<Value>(trimmed)
            && (parsed.is_object() || parsed.is_array())
        {
            return Self::decode_nested(&parsed);
        }
        Self::PlainText(text.to_string())
    }

    fn decode_nested(value: &Value) -> Self {
        match value {
            Value::Null => Self::PlainText(String::new()),
            Value::Bool(b) => Self::PlainText(b.to_string()),
            Value::Number(n) => Self::PlainText(n.to_string()),
            Value::String(s) => Self::PlainText(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::decode_nested).collect()),
            Value::Object(map) => Self::StructuredMap(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::decode_nested(v)))
                    .collect(),
            ),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::PlainText(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Case-insensitive key lookup on a structured map.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        match self {
            Self::StructuredMap(pairs) => lookup(pairs, key),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::PlainText(text) => text.trim().is_empty(),
            Self::StructuredMap(pairs) => pairs.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::decode(&value))
    }
}

fn lookup<'a>(pairs: &'a [(String, FieldValue)], key: &str) -> Option<&'a FieldValue> {
    pairs
        .iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

fn non_empty_text<'a>(pairs: &'a [(String, FieldValue)], key: &str) -> Option<&'a str> {
    lookup(pairs, key)
        .and_then(FieldValue::as_text)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

pub fn normalize(value: &FieldValue) -> String {
    match value {
        FieldValue::PlainText(text) => text.clone(),
        FieldValue::List(items) => render_list(items),
        FieldValue::StructuredMap(pairs) => render_map(pairs),
    }
}

pub fn normalize_opt(value: Option<&FieldValue>) -> String {
    value.map(normalize).unwrap_or_default()
}

pub fn normalize_value(value: &Value) -> String {
    normalize(&FieldValue::decode(value))
}

fn render_list(items: &[FieldValue]) -> String {
    items
        .iter()
        .map(render_list_item)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_list_item(item: &FieldValue) -> String {
    match item {
        FieldValue::PlainText(text) => format!("• {text}"),
        FieldValue::List(_) => format!("• {}", inline(item)),
        FieldValue::StructuredMap(pairs) => {
            if let Some(action) = render_action(pairs) {
                return action;
            }
            pairs
                .iter()
                .map(|(k, v)| format!("{k}: {}", inline(v)))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// `**Action** (Link): Description` for items shaped like a call to action.
fn render_action(pairs: &[(String, FieldValue)]) -> Option<String> {
    let action = non_empty_text(pairs, "action")?;
    let description = non_empty_text(pairs, "description")?;
    let mut out = format!("**{action}**");
    if let Some(link) = non_empty_text(pairs, "link") {
        out.push_str(&format!(" ({link})"));
    }
    out.push_str(&format!(": {description}"));
    Some(out)
}

fn render_map(pairs: &[(String, FieldValue)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| match value {
            FieldValue::List(items) => {
                let mut block = format!("{key}:");
                for item in items {
                    block.push_str(&format!("\n• {}", inline(item)));
                }
                block
            }
            FieldValue::StructuredMap(inner) => format!("{key}:\n{}", render_map(inner)),
            FieldValue::PlainText(text) => format!("{key}: {text}"),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn inline(value: &FieldValue) -> String {
    match value {
        FieldValue::PlainText(text) => text.clone(),
        FieldValue::List(items) => items.iter().map(inline).collect::<Vec<_>>().join(", "),
        FieldValue::StructuredMap(pairs) => pairs
            .iter()
            .map(|(k, v)| format!("{k}: {}", inline(v)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
