// SPDX-License-Identifier: MIT

//! Structural validation of condition trees

use super::ast::{ConditionNode, Expression};
use crate::error::ValidationError;

/// Check that a tree is well formed
pub fn is_valid(expr: &Expression) -> bool {
    match validate(expr) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Rejected condition: {}", e);
            false
        }
    }
}

/// Validate a tree, reporting the first problem found depth-first
///
/// The root must be a condition. Every condition needs a known operator and
/// an operand count its arity accepts (`and`/`or` take one or more); every
/// operand is a valid nested condition or a variable, constant or function.
pub fn validate(expr: &Expression) -> Result<(), ValidationError> {
    match expr {
        Expression::Condition(node) => validate_condition(node),
        Expression::Operand(_) => Err(ValidationError::NotACondition),
        Expression::Malformed(_) => Err(ValidationError::MalformedNode),
    }
}

fn validate_condition(node: &ConditionNode) -> Result<(), ValidationError> {
    let operator = node
        .operator
        .known()
        .ok_or_else(|| ValidationError::UnknownOperator(node.operator.to_string()))?;

    if node.operands.is_empty() {
        return Err(ValidationError::EmptyOperands { operator });
    }

    let arity = operator.arity();
    if !arity.accepts(node.operands.len()) {
        return Err(ValidationError::ArityMismatch {
            operator,
            expected: arity,
            found: node.operands.len(),
        });
    }

    for (index, operand) in node.operands.iter().enumerate() {
        match operand {
            Expression::Condition(nested) => validate_condition(nested)?,
            Expression::Operand(_) => {}
            Expression::Malformed(_) => {
                return Err(ValidationError::MalformedOperand { operator, index })
            }
        }
    }

    Ok(())
}
