//! Tool descriptor, parsed from the embedded YAML shipped with the crate.

use crate::{Error, ErrorContext, Result, Stage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BUILTIN_MANIFEST: &str = include_str!("http_request_stream.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolManifest {
    pub identity: ToolIdentity,
    pub description: ToolDescription,
    pub parameters: Vec<ToolParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_variables: Vec<OutputVariable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolIdentity {
    pub name: String,
    pub author: String,
    /// Localized labels keyed by locale (e.g. `en_US`)
    pub label: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescription {
    pub human: BTreeMap<String, String>,
    pub llm: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    String,
    Number,
    Boolean,
}

/// Where the host collects the value: from the model (`llm`) or a user form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterForm {
    Llm,
    Form,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub form: ParameterForm,
    #[serde(default)]
    pub label: BTreeMap<String, String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputVariable {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ToolManifest {
    /// The manifest of the bundled `http_request_stream` tool.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_MANIFEST)
    }

    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| {
            Error::unexpected_with_context(
                "failed to parse tool manifest",
                ErrorContext::at(Stage::Manifest).caused_by(e),
            )
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            Error::unexpected_with_context(
                "failed to render tool manifest",
                ErrorContext::at(Stage::Manifest).caused_by(e),
            )
        })
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}
