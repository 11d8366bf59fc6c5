//! Request specification and fail-fast validation.
//!
//! A [`RequestSpec`] is built from the raw tool parameter mapping. Every check
//! here runs before any network I/O, so a rejected invocation never opens a
//! connection.

pub mod headers;

pub use headers::{EffectiveHeaders, DEFAULT_HEADERS};

use crate::{Error, ErrorContext, Result};
use reqwest::Method;
use serde_json::{Map, Value};

/// Parameter names accepted by the tool.
pub const PARAM_URL: &str = "url";
pub const PARAM_METHOD: &str = "method";
pub const PARAM_BODY: &str = "body";
pub const PARAM_HEADERS: &str = "headers";

const DEFAULT_METHOD: &str = "GET";

/// A validated streaming request. Immutable once built.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    url: String,
    method: Method,
    body: Option<Value>,
    headers: EffectiveHeaders,
}

impl RequestSpec {
    /// Validate a raw parameter mapping.
    ///
    /// Checks run in order: url, headers, body, method. The first failure is
    /// returned as [`Error::InvalidInput`].
    pub fn from_parameters(parameters: &Map<String, Value>) -> Result<Self> {
        let url = validate_url(optional_str(parameters, PARAM_URL)?)?;

        let user_headers = match non_empty(optional_str(parameters, PARAM_HEADERS)?) {
            Some(raw) => parse_headers(raw)?,
            None => Map::new(),
        };
        let headers = EffectiveHeaders::merged(&user_headers);
        // Surface unusable names/values now rather than at send time.
        headers.to_header_map()?;

        let body = match non_empty(optional_str(parameters, PARAM_BODY)?) {
            Some(raw) => Some(parse_body(raw)?),
            None => None,
        };

        let method = parse_method(
            non_empty(optional_str(parameters, PARAM_METHOD)?).unwrap_or(DEFAULT_METHOD),
        )?;

        Ok(Self {
            url,
            method,
            body,
            headers,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Parsed JSON payload, if a body was supplied.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &EffectiveHeaders {
        &self.headers
    }
}

fn invalid(message: impl Into<String>, field: &str) -> Error {
    Error::invalid_input_with_context(
        message,
        ErrorContext::parameter(field),
    )
}

fn optional_str<'a>(parameters: &'a Map<String, Value>, name: &str) -> Result<Option<&'a str>> {
    match parameters.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(invalid(
            format!("{} must be a string, got {}", name, json_type_name(other)),
            name,
        )),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn validate_url(url: Option<&str>) -> Result<String> {
    let url = match url {
        Some(u) if !u.is_empty() => u,
        _ => return Err(invalid("URL cannot be empty", PARAM_URL)),
    };
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid(
            "URL must start with http:// or https://",
            PARAM_URL,
        ));
    }
    Ok(url.to_string())
}

fn parse_headers(raw: &str) -> Result<Map<String, Value>> {
    const MSG: &str = "headers must be a valid JSON object string";
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::invalid_input_with_context(
            MSG,
            ErrorContext::parameter(PARAM_HEADERS)
                .caused_by(format!("expected object, got {}", json_type_name(&other))),
        )),
        Err(e) => Err(Error::invalid_input_with_context(
            MSG,
            ErrorContext::parameter(PARAM_HEADERS).caused_by(e),
        )),
    }
}

fn parse_body(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|e| {
        Error::invalid_input_with_context(
            "body must be a valid JSON string",
            ErrorContext::parameter(PARAM_BODY).caused_by(e),
        )
    })
}

fn parse_method(raw: &str) -> Result<Method> {
    Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| invalid(format!("invalid HTTP method: {:?}", raw), PARAM_METHOD))
}
