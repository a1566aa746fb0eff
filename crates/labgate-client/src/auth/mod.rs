//! Authentication: the backend collaborator and the service that ties it
//! to session storage.

pub mod backend;
pub mod service;

pub use backend::{AuthBackend, HttpAuthBackend};
pub use service::AuthService;
