// SPDX-License-Identifier: MIT

//! Flow graph routing
//!
//! Decides which outgoing edges of a node can be followed by evaluating
//! the conditions attached to them.

mod edge;

pub use edge::{edge_passes, select_edges, FlowEdge};
