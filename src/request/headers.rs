//! Effective request headers: SSE-friendly defaults overlaid with user headers.

use super::PARAM_HEADERS;
use crate::{Error, ErrorContext, Result, Stage};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

/// Headers every streaming request starts from.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("Accept", "text/event-stream"),
    ("Cache-Control", "no-cache"),
    ("Connection", "keep-alive"),
];

/// Ordered header name/value pairs, defaults first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveHeaders {
    entries: Vec<(String, String)>,
}

impl Default for EffectiveHeaders {
    fn default() -> Self {
        Self {
            entries: DEFAULT_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EffectiveHeaders {
    /// Overlay user headers onto the defaults. A user key equal to a default
    /// key replaces that default in place; other keys are appended.
    pub fn merged(user: &Map<String, Value>) -> Self {
        let mut headers = Self::default();
        for (name, value) in user {
            headers.set(name.clone(), coerce_header_value(value));
        }
        headers
    }

    fn set(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a wire header map. Names differing only by case collapse,
    /// and the later entry (the user's) wins.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in self.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                Error::invalid_input_with_context(
                    format!("invalid header name: {:?}", name),
                    ErrorContext::parameter(PARAM_HEADERS)
                        .in_stage(Stage::HeaderEncoding)
                        .caused_by(e),
                )
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                Error::invalid_input_with_context(
                    format!("invalid value for header {:?}", name),
                    ErrorContext::parameter(format!("{PARAM_HEADERS}.{name}"))
                        .in_stage(Stage::HeaderEncoding)
                        .caused_by(e),
                )
            })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

/// String form of a JSON header value. Strings are used verbatim; scalars use
/// their Python-style spelling so hosts that forwarded `true`/`null` keep working.
fn coerce_header_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
