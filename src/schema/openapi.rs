//! OpenAPI document to tool definition conversion.

use super::ToolDefinition;
use crate::error::{Result, StatlineError};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use tracing::debug;

/// HTTP methods that become tools. Other path-item keys are ignored.
pub const HTTP_METHODS: [&str; 5] = ["get", "post", "put", "patch", "delete"];

/// OpenAPI description of the public NHL stats and search services.
pub const NHL_OPENAPI_DOCUMENT: &str = include_str!("nhl_openapi.yaml");

#[derive(Debug, Deserialize)]
struct Operation {
    #[serde(rename = "operationId")]
    operation_id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    #[serde(default)]
    parameters: Vec<Parameter>,
}

#[derive(Debug, Deserialize)]
struct Parameter {
    name: String,
    #[serde(default)]
    required: bool,
    description: Option<String>,
    schema: Option<ParameterSchema>,
}

#[derive(Debug, Deserialize)]
struct ParameterSchema {
    #[serde(rename = "type")]
    schema_type: Option<String>,
}

/// Generate tool definitions from an OpenAPI document (YAML or JSON).
///
/// Tools follow the order in which operations appear in the document. Any
/// syntax or structural problem fails the whole generation, as does a tool
/// name or parameter name that appears twice.
pub fn generate(document: &str) -> Result<Vec<ToolDefinition>> {
    let root: Value = serde_yaml::from_str(document)
        .map_err(|e| StatlineError::SpecParse(format!("Invalid YAML specification: {}", e)))?;

    let root = root
        .as_mapping()
        .ok_or_else(|| StatlineError::SpecParse("document root must be a mapping".to_string()))?;

    let paths = match root.get("paths") {
        None => return Ok(Vec::new()),
        Some(paths) => as_mapping(paths, "paths")?,
    };

    let mut tools = Vec::new();
    let mut names = HashSet::new();

    for (path, path_item) in paths {
        let path = path
            .as_str()
            .ok_or_else(|| StatlineError::SpecParse(format!("path key {:?} is not a string", path)))?;
        let path_item = as_mapping(path_item, path)?;

        for (method, operation) in path_item {
            let Some(method) = method.as_str() else {
                continue;
            };
            if !HTTP_METHODS.contains(&method) {
                continue;
            }

            let operation: Operation = serde_yaml::from_value(operation.clone()).map_err(|e| {
                StatlineError::SpecParse(format!("{} {}: {}", method, path, e))
            })?;

            let tool = to_tool(method, path, operation)?;
            if !names.insert(tool.name.clone()) {
                return Err(StatlineError::SpecParse(format!(
                    "{} {}: duplicate tool name '{}'",
                    method, path, tool.name
                )));
            }
            tools.push(tool);
        }
    }

    debug!("Generated {} tools from OpenAPI document", tools.len());
    Ok(tools)
}

/// Tools generated from the embedded NHL document.
pub fn nhl_tools() -> Result<Vec<ToolDefinition>> {
    generate(NHL_OPENAPI_DOCUMENT)
}

fn as_mapping<'a>(value: &'a Value, context: &str) -> Result<&'a Mapping> {
    value
        .as_mapping()
        .ok_or_else(|| StatlineError::SpecParse(format!("'{}' must be a mapping", context)))
}

fn to_tool(method: &str, path: &str, operation: Operation) -> Result<ToolDefinition> {
    let name = operation
        .operation_id
        .unwrap_or_else(|| format!("{}_{}", method, path.replace('/', "_")));
    let description = operation
        .description
        .or(operation.summary)
        .unwrap_or_default();

    let mut tool = ToolDefinition::new(name, description);
    for param in operation.parameters {
        if tool.parameter(&param.name).is_some() {
            return Err(StatlineError::SpecParse(format!(
                "{} {}: duplicate parameter '{}'",
                method, path, param.name
            )));
        }
        let param_type = param
            .schema
            .and_then(|s| s.schema_type)
            .unwrap_or_else(|| "string".to_string());
        tool = tool.with_parameter(
            &param.name,
            &param_type,
            param.description.as_deref().unwrap_or_default(),
            param.required,
        );
    }

    Ok(tool)
}
