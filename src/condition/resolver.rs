// SPDX-License-Identifier: MIT

//! Operand resolution
//!
//! Turns a leaf of the tree into a runtime value. Resolution never fails:
//! anything that cannot be resolved becomes `null`.

use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};

use super::ast::{OperandKind, OperandNode};
use super::context::EvaluationContext;

/// Resolve an operand against the context
pub fn resolve(operand: &OperandNode, context: &EvaluationContext) -> Value {
    match operand.kind {
        OperandKind::Constant => operand.value.clone(),
        OperandKind::Variable => operand
            .name()
            .and_then(|name| context.variable(&name).cloned())
            .unwrap_or(Value::Null),
        OperandKind::Function => resolve_function(operand, context),
    }
}

fn resolve_function(operand: &OperandNode, context: &EvaluationContext) -> Value {
    let Some(name) = operand.name() else {
        log::warn!("Function operand has no name: {}", operand.value);
        return Value::Null;
    };

    let Some(function) = context.function(&name) else {
        log::warn!("Function '{}' is not defined", name);
        return Value::Null;
    };

    match panic::catch_unwind(AssertUnwindSafe(|| function())) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            log::warn!("Function '{}' failed: {}", name, e);
            Value::Null
        }
        Err(_) => {
            log::warn!("Function '{}' panicked", name);
            Value::Null
        }
    }
}
