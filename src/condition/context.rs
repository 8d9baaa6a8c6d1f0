// SPDX-License-Identifier: MIT

//! Caller-supplied bindings for a single evaluation

use serde_json::Value;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Zero-argument function callable from a condition
pub type ContextFunction =
    Arc<dyn Fn() -> Result<Value, Box<dyn Error + Send + Sync>> + Send + Sync>;

/// Variables and functions visible to an evaluation
#[derive(Clone, Default)]
pub struct EvaluationContext {
    variables: HashMap<String, Value>,
    functions: HashMap<String, ContextFunction>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from a map of variables
    pub fn with_variables(variables: HashMap<String, Value>) -> Self {
        Self {
            variables,
            functions: HashMap::new(),
        }
    }

    /// Create a context from a JSON object; other values give no variables
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::with_variables(map.into_iter().collect()),
            other => {
                log::warn!("Context is not a JSON object, ignoring: {}", other);
                Self::new()
            }
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_variable(name, value);
        self
    }

    pub fn with_function<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn() -> Result<Value, Box<dyn Error + Send + Sync>> + Send + Sync + 'static,
    {
        self.register_function(name, function);
        self
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn register_function<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn() -> Result<Value, Box<dyn Error + Send + Sync>> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
    }

    /// Look up a variable by exact name, then as a dotted path
    /// (e.g. "device.temp")
    pub fn variable(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.variables.get(name) {
            return Some(value);
        }
        if !name.contains('.') {
            return None;
        }

        let mut parts = name.split('.');
        let mut current = self.variables.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub fn function(&self, name: &str) -> Option<&ContextFunction> {
        self.functions.get(name)
    }

    /// Get all variable names
    pub fn variable_names(&self) -> impl Iterator<Item = &String> {
        self.variables.keys()
    }
}

impl fmt::Debug for EvaluationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<&String> = self.functions.keys().collect();
        functions.sort();
        f.debug_struct("EvaluationContext")
            .field("variables", &self.variables)
            .field("functions", &functions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_context() {
        let ctx = EvaluationContext::new();
        assert!(ctx.variable("anything").is_none());
        assert!(ctx.function("now").is_none());
    }

    #[test]
    fn test_exact_name_wins_over_path() {
        let ctx = EvaluationContext::new()
            .with_variable("device.temp", 1)
            .with_variable("device", json!({"temp": 2}));
        assert_eq!(ctx.variable("device.temp"), Some(&json!(1)));
    }

    #[test]
    fn test_dotted_path() {
        let ctx = EvaluationContext::new().with_variable("result", json!({"data": {"value": 42}}));

        assert_eq!(ctx.variable("result.data"), Some(&json!({"value": 42})));
        assert_eq!(ctx.variable("result.data.value"), Some(&json!(42)));
        assert_eq!(ctx.variable("result.nonexistent"), None);
        assert_eq!(ctx.variable("missing.data"), None);
    }

    #[test]
    fn test_from_json() {
        let ctx = EvaluationContext::from_json(json!({"a": 1, "b": "hello"}));
        assert_eq!(ctx.variable("a"), Some(&json!(1)));
        assert_eq!(ctx.variable("b"), Some(&json!("hello")));

        let ctx = EvaluationContext::from_json(json!([1, 2]));
        assert_eq!(ctx.variable_names().count(), 0);
    }

    #[test]
    fn test_registered_function_is_callable() {
        let ctx = EvaluationContext::new().with_function("answer", || Ok(json!(42)));
        let function = ctx.function("answer").unwrap();
        assert_eq!(function().unwrap(), json!(42));
    }

    #[test]
    fn test_debug_lists_function_names() {
        let ctx = EvaluationContext::new()
            .with_function("b", || Ok(Value::Null))
            .with_function("a", || Ok(Value::Null));
        let debug = format!("{:?}", ctx);
        assert!(debug.contains(r#"functions: ["a", "b"]"#));
    }
}
