//! Navigation policy (route table, role guard).
//!
//! Compiles route configuration into a lookup table and answers
//! allow/redirect for a navigation attempt from stored session state.

pub mod guard;
pub mod routes;

pub use guard::{DenyReason, GuardDecision, RouteGuard};
pub use routes::{RouteRule, RouteTable};
