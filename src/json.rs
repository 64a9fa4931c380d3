/* ---------- JSON helpers ---------- */

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("JSON stringify error: {0}")]
    Stringify(serde_json::Error),
}

pub fn parse(input: &str) -> Result<Value, JsonError> {
    Ok(serde_json::from_str(input)?)
}

/// Two-space indentation, keys in document order.
pub fn format(input: &str) -> Result<String, JsonError> {
    let v = parse(input)?;
    serde_json::to_string_pretty(&v).map_err(JsonError::Stringify)
}

pub fn minify(input: &str) -> Result<String, JsonError> {
    let v = parse(input)?;
    serde_json::to_string(&v).map_err(JsonError::Stringify)
}

/// Error still worth showing after an edit. Input that parses clears it;
/// otherwise the last Format/Minify message stays.
pub fn error_after_edit(input: &str, shown: Option<String>) -> Option<String> {
    if parse(input).is_ok() {
        None
    } else {
        shown
    }
}

pub fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Text for a leaf in the tree view. Strings are quoted, containers are not
/// leaves and render as their compact form.
pub fn scalar_label(v: &Value) -> String {
    match v {
        Value::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}

/// How many nodes of each kind a document contains. Nulls are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeStats {
    pub strings: usize,
    pub numbers: usize,
    pub booleans: usize,
    pub objects: usize,
    pub arrays: usize,
}

impl TypeStats {
    pub fn collect(v: &Value) -> Self {
        let mut stats = Self::default();
        stats.visit(v);
        stats
    }

    fn visit(&mut self, v: &Value) {
        match v {
            Value::Null => {}
            Value::Bool(_) => self.booleans += 1,
            Value::Number(_) => self.numbers += 1,
            Value::String(_) => self.strings += 1,
            Value::Array(items) => {
                self.arrays += 1;
                items.iter().for_each(|child| self.visit(child));
            }
            Value::Object(map) => {
                self.objects += 1;
                map.values().for_each(|child| self.visit(child));
            }
        }
    }

    /// Non-zero kinds only, in a fixed order.
    pub fn entries(&self) -> Vec<(&'static str, usize)> {
        [
            ("String", self.strings),
            ("Number", self.numbers),
            ("Boolean", self.booleans),
            ("Object", self.objects),
            ("Array", self.arrays),
        ]
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .collect()
    }

    pub fn total(&self) -> usize {
        self.strings + self.numbers + self.booleans + self.objects + self.arrays
    }
}
