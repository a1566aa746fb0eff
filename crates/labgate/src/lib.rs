//! Top-level facade crate for labgate.
//!
//! Re-exports the core types and the client library so users can depend on a single crate.

pub mod core {
    pub use labgate_core::*;
}

pub mod client {
    pub use labgate_client::*;
}
