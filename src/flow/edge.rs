// SPDX-License-Identifier: MIT

//! Conditional edges between flow nodes

use serde::{Deserialize, Serialize};

use crate::condition::{self, EvaluationContext, Expression};

/// An edge in a flow graph
///
/// A conditional edge carries its condition as a serialized expression tree.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub is_conditional: bool,
    /// JSON-encoded condition tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
}

impl FlowEdge {
    /// Create an unconditional edge
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
            is_conditional: false,
            condition_expression: None,
        }
    }

    /// Attach a condition, making the edge conditional
    pub fn with_condition(mut self, expr: &Expression) -> Result<Self, serde_json::Error> {
        self.condition_expression = Some(serde_json::to_string(expr)?);
        self.is_conditional = true;
        Ok(self)
    }

    /// Decode the condition tree, if the edge has one
    pub fn condition(&self) -> Result<Option<Expression>, serde_json::Error> {
        match self.condition_expression.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => serde_json::from_str(raw).map(Some),
        }
    }
}

/// Check whether an edge can be followed
///
/// Unconditional edges always pass. A conditional edge passes only when its
/// condition decodes, validates and evaluates to true.
pub fn edge_passes(edge: &FlowEdge, context: &EvaluationContext) -> bool {
    if !edge.is_conditional {
        return true;
    }

    let expr = match edge.condition() {
        Ok(Some(expr)) => expr,
        Ok(None) => {
            log::warn!("Conditional edge '{}' has no condition", edge.id);
            return false;
        }
        Err(e) => {
            log::error!("Failed to decode condition of edge '{}': {}", edge.id, e);
            return false;
        }
    };

    if let Err(e) = condition::validate(&expr) {
        log::error!("Invalid condition on edge '{}': {}", edge.id, e);
        return false;
    }

    let passes = condition::evaluate(&expr, context);
    log::debug!(
        "Edge '{}' ({} -> {}) condition: {}",
        edge.id,
        edge.source,
        edge.target,
        passes
    );
    passes
}

/// Outgoing edges of `source`, in declaration order, that can be followed
pub fn select_edges<'a>(
    edges: &'a [FlowEdge],
    source: &str,
    context: &EvaluationContext,
) -> Vec<&'a FlowEdge> {
    edges
        .iter()
        .filter(|edge| edge.source == source)
        .filter(|edge| edge_passes(edge, context))
        .collect()
}
