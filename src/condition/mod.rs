// SPDX-License-Identifier: MIT

//! Condition expressions
//!
//! This module provides the expression tree and the three operations over it:
//! - `evaluate` - reduce a tree to a boolean against an `EvaluationContext`
//! - `is_valid` / `validate` - structural well-formedness
//! - `to_text` - human-readable rendering
//!
//! Trees are built by an editor or decoded from JSON such as
//! `{"operator": "in", "operands": [{"type": "variable", "value": "color"},
//! {"type": "constant", "value": ["red", "blue"]}]}`.

mod ast;
mod context;
mod evaluator;
mod locale;
mod renderer;
mod resolver;
mod validator;

pub use ast::{
    Arity, Category, ConditionNode, DataType, Expression, OperandKind, OperandNode, Operator,
    OperatorInfo, OperatorTag,
};
pub use context::{ContextFunction, EvaluationContext};
pub use evaluator::{evaluate, is_truthy};
pub use locale::Locale;
pub use renderer::{to_text, to_text_localized};
pub use resolver::resolve;
pub use validator::{is_valid, validate};
