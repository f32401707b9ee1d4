//! Tool schemas advertised to language models.
//!
//! A [`ToolDefinition`] is the provider-neutral description of a callable
//! tool. Definitions come either from static declarations or from an
//! OpenAPI document via [`generate`].

mod openapi;

pub use openapi::{generate, nhl_tools, HTTP_METHODS, NHL_OPENAPI_DOCUMENT};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A single tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    /// JSON Schema type name ("string", "integer", ...).
    #[serde(rename = "type")]
    pub param_type: String,
    pub description: String,
    pub required: bool,
}

/// A callable tool: name, description and ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    /// Create a tool with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn with_parameter(
        mut self,
        name: &str,
        param_type: &str,
        description: &str,
        required: bool,
    ) -> Self {
        self.parameters.push(ToolParameter {
            name: name.to_string(),
            param_type: param_type.to_string(),
            description: description.to_string(),
            required,
        });
        self
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of the required parameters, in declaration order.
    pub fn required(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// JSON Schema object describing the tool input.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": param.param_type,
                    "description": param.description,
                }),
            );
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required(),
        })
    }
}
