//! # adm-auth
//!
//! Staff session handling for the admissions review area.
//!
//! - [`gate::SessionGate`] decides whether a request reaches a protected page
//!   or is redirected to the login page with a `next` parameter.
//! - [`session::SessionStore`] verifies cookie values in flag or token mode.
//! - [`cookie`] parses `Cookie` headers and builds `Set-Cookie` values.
//!
//! The gate is transport-agnostic: it takes a path, a query string, and the
//! raw `Cookie` header, and returns a decision.

pub mod cookie;
pub mod error;
pub mod gate;
pub mod session;

pub use error::AuthError;
pub use gate::{GateDecision, Login, SessionGate};
