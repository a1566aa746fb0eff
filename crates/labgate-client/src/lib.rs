//! labgate client library entry.
//!
//! Wires configuration, session storage, the authentication backend and the
//! navigation guard into one stack. Consumed by the `labgate` binary and by
//! integration tests.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod interceptor;
pub mod policy;
pub mod session;
pub mod store;
