// SPDX-License-Identifier: MIT

//! flowcond: boolean condition expressions for flow graphs
//!
//! Conditions are trees of operators over variables, constants and
//! functions. The engine evaluates them against caller-supplied bindings,
//! checks them for structural validity and renders them as text.

pub mod condition;
pub mod config;
pub mod error;
pub mod flow;
pub mod loader;

pub use error::FlowCondError;
