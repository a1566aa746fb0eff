//! labgate core: session model, role normalization, wire types and form
//! validators shared by the client runtime and any other front end.
//!
//! This crate carries no transport or runtime dependencies so the policy
//! rules can be reused (and tested) without a network or a storage backend.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `LabgateError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod role;
pub mod session;
pub mod validation;

/// Shared result type.
pub use error::{ErrorCode, LabgateError, Result};
pub use role::{normalize_role, roles_match};
pub use session::Session;
