// SPDX-License-Identifier: MIT

//! Typed error handling for flowcond
//!
//! The engine operations themselves (`evaluate`, `is_valid`, `to_text`) are
//! total. These types describe why a tree was rejected or could not be
//! evaluated or rendered, and the failures of the surrounding loader and CLI.

use thiserror::Error;

use crate::condition::{Arity, Operator};

/// Top-level error type for flowcond
#[derive(Debug, Error)]
pub enum FlowCondError {
    /// Configuration errors (invalid env var or flag value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File extension the loader does not know how to decode
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Structural problems found by the validator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The root of the tree is a leaf rather than a condition
    #[error("Expected a condition node at the root, found an operand")]
    NotACondition,

    /// The node has neither an operator nor a recognised operand type
    #[error("Malformed expression node")]
    MalformedNode,

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Operator '{operator}' has no operands")]
    EmptyOperands { operator: Operator },

    #[error("Operator '{operator}' expects {expected} operand(s), found {found}")]
    ArityMismatch {
        operator: Operator,
        expected: Arity,
        found: usize,
    },

    /// An operand slot holds neither a condition nor a well-formed operand
    #[error("Operand {index} of '{operator}' is malformed")]
    MalformedOperand { operator: Operator, index: usize },
}

/// Failures while reducing a tree to a boolean
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Unsupported operator: {0}")]
    UnknownOperator(String),

    #[error("Cannot evaluate a malformed expression node")]
    MalformedNode,

    #[error("Operator '{operator}' is missing operand {index}")]
    MissingOperand { operator: Operator, index: usize },
}

/// Failures while producing display text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Unsupported operator: {0}")]
    UnknownOperator(String),

    #[error("Cannot render a malformed expression node")]
    MalformedNode,

    #[error("Operator '{operator}' is missing operand {index}")]
    MissingOperand { operator: Operator, index: usize },
}

impl FlowCondError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
