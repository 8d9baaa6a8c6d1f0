// SPDX-License-Identifier: MIT

//! Human-readable rendering of condition trees

use serde_json::Value;

use super::ast::{ConditionNode, DataType, Expression, OperandKind, OperandNode, Operator};
use super::locale::Locale;
use crate::error::RenderError;

/// Render a tree as English text
pub fn to_text(expr: &Expression) -> String {
    to_text_localized(expr, Locale::En)
}

/// Render a tree in the given locale
///
/// Trees that cannot be rendered (unknown operator, missing operand) give
/// the locale's invalid-expression text.
pub fn to_text_localized(expr: &Expression, locale: Locale) -> String {
    match render(expr, locale) {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to render condition: {}", e);
            locale.invalid_expression().to_string()
        }
    }
}

fn render(expr: &Expression, locale: Locale) -> Result<String, RenderError> {
    match expr {
        Expression::Condition(node) => render_condition(node, locale),
        Expression::Operand(operand) => Ok(render_operand(operand, locale)),
        Expression::Malformed(_) => Err(RenderError::MalformedNode),
    }
}

/// Render a child: nested conditions are parenthesized
fn render_slot(expr: &Expression, locale: Locale) -> Result<String, RenderError> {
    match expr {
        Expression::Condition(node) => Ok(format!("({})", render_condition(node, locale)?)),
        Expression::Operand(operand) => Ok(render_operand(operand, locale)),
        Expression::Malformed(_) => Ok(locale.unknown_operand().to_string()),
    }
}

fn render_condition(node: &ConditionNode, locale: Locale) -> Result<String, RenderError> {
    let operator = node
        .operator
        .known()
        .ok_or_else(|| RenderError::UnknownOperator(node.operator.to_string()))?;

    let slot = |index: usize| -> Result<String, RenderError> {
        let expr = node
            .operands
            .get(index)
            .ok_or(RenderError::MissingOperand { operator, index })?;
        render_slot(expr, locale)
    };

    match operator {
        Operator::And | Operator::Or => {
            let joiner = if operator == Operator::And {
                locale.conjunction()
            } else {
                locale.disjunction()
            };
            let parts = node
                .operands
                .iter()
                .map(|operand| render_slot(operand, locale))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(parts.join(&format!(" {} ", joiner)))
        }
        Operator::Not => Ok(format!("{} {}", locale.negation(), slot(0)?)),
        Operator::IsNull | Operator::IsNotNull => Ok(format!(
            "{} {}",
            slot(0)?,
            locale.null_check(operator == Operator::IsNull)
        )),
        _ => {
            let (infix, closing) = locale.binary_phrase(operator);
            let text = format!("{} {} {}", slot(0)?, infix, slot(1)?);
            Ok(match closing {
                Some(closing) => format!("{} {}", text, closing),
                None => text,
            })
        }
    }
}

fn render_operand(operand: &OperandNode, locale: Locale) -> String {
    match operand.kind {
        OperandKind::Variable => locale.variable(&bare(&operand.value)),
        OperandKind::Function => locale.function(&bare(&operand.value)),
        OperandKind::Constant => {
            let quoted = match operand.data_type {
                Some(data_type) => data_type == DataType::String,
                None => operand.value.is_string(),
            };
            if quoted {
                format!("\"{}\"", bare(&operand.value))
            } else {
                bare(&operand.value)
            }
        }
    }
}

/// Literal text of a value; strings without JSON quoting
fn bare(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
