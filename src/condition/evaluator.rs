// SPDX-License-Identifier: MIT

//! Condition expression evaluator

use serde_json::Value;
use std::cmp::Ordering;
use std::panic::{self, AssertUnwindSafe};

use super::ast::{ConditionNode, Expression, Operator};
use super::context::EvaluationContext;
use super::resolver::resolve;
use crate::error::EvalError;

/// Evaluate a condition tree against a context
///
/// Any failure is logged and reported as `false`. A context function that
/// fails or panics resolves to `null` without aborting the rest of the tree.
/// Panics are still reported by the process panic hook (stderr by default).
pub fn evaluate(expr: &Expression, context: &EvaluationContext) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| evaluate_expression(expr, context))) {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            log::error!("Failed to evaluate condition: {}", e);
            false
        }
        Err(_) => {
            log::error!("Condition evaluation panicked");
            false
        }
    }
}

/// Truthiness used for logical operators and the final result:
/// `null`, `false`, `0`, `""`, `[]` and `{}` are false
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn evaluate_expression(expr: &Expression, context: &EvaluationContext) -> Result<bool, EvalError> {
    match expr {
        Expression::Condition(node) => evaluate_condition(node, context),
        Expression::Operand(operand) => Ok(is_truthy(&resolve(operand, context))),
        Expression::Malformed(_) => Err(EvalError::MalformedNode),
    }
}

fn evaluate_condition(node: &ConditionNode, context: &EvaluationContext) -> Result<bool, EvalError> {
    let operator = node
        .operator
        .known()
        .ok_or_else(|| EvalError::UnknownOperator(node.operator.to_string()))?;

    // Every operand is resolved before the operator applies; and/or do not short-circuit
    let values = node
        .operands
        .iter()
        .map(|operand| operand_value(operand, context))
        .collect::<Result<Vec<_>, _>>()?;

    apply(operator, &values)
}

fn operand_value(expr: &Expression, context: &EvaluationContext) -> Result<Value, EvalError> {
    match expr {
        Expression::Condition(node) => evaluate_condition(node, context).map(Value::Bool),
        Expression::Operand(operand) => Ok(resolve(operand, context)),
        Expression::Malformed(raw) => {
            log::debug!("Malformed operand resolves to null: {}", raw);
            Ok(Value::Null)
        }
    }
}

fn apply(operator: Operator, values: &[Value]) -> Result<bool, EvalError> {
    let result = match operator {
        Operator::Eq => {
            let (left, right) = pair(operator, values)?;
            strict_equals(left, right)
        }
        Operator::Neq => {
            let (left, right) = pair(operator, values)?;
            !strict_equals(left, right)
        }
        Operator::Gt => ordered(operator, values, |o| o == Ordering::Greater)?,
        Operator::Lt => ordered(operator, values, |o| o == Ordering::Less)?,
        Operator::Gte => ordered(operator, values, |o| o != Ordering::Less)?,
        Operator::Lte => ordered(operator, values, |o| o != Ordering::Greater)?,
        Operator::And => values.iter().all(is_truthy),
        Operator::Or => values.iter().any(is_truthy),
        Operator::Not => !is_truthy(single(operator, values)?),
        Operator::Contains => text(operator, values, |s, sub| s.contains(sub))?,
        Operator::StartsWith => text(operator, values, |s, prefix| s.starts_with(prefix))?,
        Operator::EndsWith => text(operator, values, |s, suffix| s.ends_with(suffix))?,
        Operator::In => {
            let (item, collection) = pair(operator, values)?;
            membership(item, collection).unwrap_or(false)
        }
        Operator::NotIn => {
            let (item, collection) = pair(operator, values)?;
            membership(item, collection)
                .map(|found| !found)
                .unwrap_or(false)
        }
        Operator::IsNull => single(operator, values)?.is_null(),
        Operator::IsNotNull => !single(operator, values)?.is_null(),
    };
    Ok(result)
}

fn single(operator: Operator, values: &[Value]) -> Result<&Value, EvalError> {
    values
        .first()
        .ok_or(EvalError::MissingOperand { operator, index: 0 })
}

fn pair(operator: Operator, values: &[Value]) -> Result<(&Value, &Value), EvalError> {
    let left = single(operator, values)?;
    let right = values
        .get(1)
        .ok_or(EvalError::MissingOperand { operator, index: 1 })?;
    Ok((left, right))
}

/// Equality without cross-type coercion; numbers compare by value (1 == 1.0)
fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| strict_equals(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| strict_equals(x, y)))
        }
        _ => left == right,
    }
}

/// Numbers order numerically, strings lexicographically; anything else is unordered
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn ordered<F>(operator: Operator, values: &[Value], accept: F) -> Result<bool, EvalError>
where
    F: Fn(Ordering) -> bool,
{
    let (left, right) = pair(operator, values)?;
    Ok(compare(left, right).map(accept).unwrap_or(false))
}

fn text<F>(operator: Operator, values: &[Value], check: F) -> Result<bool, EvalError>
where
    F: Fn(&str, &str) -> bool,
{
    let (left, right) = pair(operator, values)?;
    Ok(match (left, right) {
        (Value::String(s), Value::String(other)) => check(s, other),
        _ => false,
    })
}

/// `None` when the collection is not an array
fn membership(item: &Value, collection: &Value) -> Option<bool> {
    match collection {
        Value::Array(items) => Some(items.iter().any(|v| strict_equals(v, item))),
        _ => None,
    }
}
