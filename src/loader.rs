// SPDX-License-Identifier: MIT

//! Condition loader - JSON/YAML file loading and parsing
//!
//! Loads expression trees, variable bindings and flow edges from files.
//! The format is chosen from the file extension.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::condition::Expression;
use crate::error::FlowCondError;
use crate::flow::FlowEdge;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick a format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, FlowCondError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(FlowCondError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Loads condition inputs from JSON or YAML files
pub struct ConditionLoader;

impl ConditionLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load an expression tree
    pub fn load_expression<P: AsRef<Path>>(&self, path: P) -> Result<Expression, FlowCondError> {
        Self::load(path.as_ref())
    }

    /// Load variable bindings; the file must hold a mapping
    pub fn load_variables<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<HashMap<String, Value>, FlowCondError> {
        Self::load(path.as_ref())
    }

    /// Load a list of flow edges
    pub fn load_edges<P: AsRef<Path>>(&self, path: P) -> Result<Vec<FlowEdge>, FlowCondError> {
        Self::load(path.as_ref())
    }

    /// Parse any supported document from a string
    pub fn parse<T: DeserializeOwned>(content: &str, format: Format) -> Result<T, FlowCondError> {
        let parsed = match format {
            Format::Json => serde_json::from_str(content)?,
            Format::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(parsed)
    }

    fn load<T: DeserializeOwned>(path: &Path) -> Result<T, FlowCondError> {
        let format = Format::from_path(path)?;
        let content = fs::read_to_string(path)?;
        log::debug!("Loaded {} ({:?})", path.display(), format);
        Self::parse(&content, format)
    }
}

impl Default for ConditionLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{is_valid, OperandNode, Operator};
    use serde_json::json;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.YAML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("dir/a.yml")).unwrap(), Format::Yaml);
        assert!(matches!(
            Format::from_path(Path::new("a.toml")),
            Err(FlowCondError::UnsupportedFormat(_))
        ));
        assert!(Format::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_parse_yaml_expression() {
        let yaml = r#"
operator: and
operands:
  - operator: gte
    operands:
      - type: variable
        value: humidity
      - type: constant
        value: 60
        dataType: number
  - type: function
    value: isDaytime
"#;
        let expr: Expression = ConditionLoader::parse(yaml, Format::Yaml).unwrap();
        assert!(is_valid(&expr));
        assert_eq!(
            expr,
            Expression::condition(
                Operator::And,
                vec![
                    Expression::condition(
                        Operator::Gte,
                        vec![
                            OperandNode::variable("humidity").into(),
                            OperandNode::constant(60)
                                .with_data_type(crate::condition::DataType::Number)
                                .into(),
                        ]
                    ),
                    OperandNode::function("isDaytime").into(),
                ]
            )
        );
    }

    #[test]
    fn test_parse_json_variables() {
        let vars: HashMap<String, Value> =
            ConditionLoader::parse(r#"{"temp": 25, "tags": ["a"]}"#, Format::Json).unwrap();
        assert_eq!(vars["temp"], json!(25));
        assert_eq!(vars["tags"], json!(["a"]));
    }

    #[test]
    fn test_variables_must_be_mapping() {
        let result: Result<HashMap<String, Value>, _> =
            ConditionLoader::parse("[1, 2]", Format::Json);
        assert!(matches!(result, Err(FlowCondError::Json(_))));
    }

    #[test]
    fn test_parse_yaml_edges() {
        let yaml = r#"
- id: e1
  source: start
  target: alarm
  isConditional: true
  conditionExpression: '{"operator":"gt","operands":[{"type":"variable","value":"temp"},{"type":"constant","value":30}]}'
- id: e2
  source: start
  target: idle
"#;
        let edges: Vec<FlowEdge> = ConditionLoader::parse(yaml, Format::Yaml).unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges[0].is_conditional);
        assert!(!edges[1].is_conditional);
        assert!(edges[1].condition_expression.is_none());
    }

    #[test]
    fn test_invalid_yaml_returns_error() {
        let result: Result<Vec<FlowEdge>, _> =
            ConditionLoader::parse("- id: [unclosed", Format::Yaml);
        assert!(matches!(result, Err(FlowCondError::Yaml(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let loader = ConditionLoader::new();
        let result = loader.load_expression("definitely/not/here.json");
        assert!(matches!(result, Err(FlowCondError::Io(_))));
    }
}
