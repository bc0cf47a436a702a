//! Message values passed to log calls
//!
//! Messages stay structured (`serde_json::Value`) all the way to the sink so
//! objects remain inspectable instead of being flattened into the title.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages(Vec<Value>);

impl Messages {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.0.push(value.into());
        self
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn first(&self) -> Option<&Value> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    /// Plain-text rendering: strings verbatim, other values as compact JSON
    pub fn to_plain(&self) -> String {
        self.0
            .iter()
            .map(value_to_plain)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn value_to_plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl From<&str> for Messages {
    fn from(s: &str) -> Self {
        Self(vec![Value::String(s.to_string())])
    }
}

impl From<String> for Messages {
    fn from(s: String) -> Self {
        Self(vec![Value::String(s)])
    }
}

impl From<Value> for Messages {
    fn from(value: Value) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<Value>> for Messages {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for Messages {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Messages {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
