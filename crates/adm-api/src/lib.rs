//! # adm-api
//!
//! Review API surface for the admissions service.
//!
//! - `GET/POST /api/applications`, `GET/PATCH /api/applications/{id}`
//! - `GET /api/universities`
//! - `POST /api/admin/login`, `POST /api/admin/logout`, `POST /api/logout`
//! - `GET/POST /login` and the gated console under `/admin`
//!
//! [`app::ReviewApp`] is transport-agnostic and is what the tests drive;
//! [`server::Server`] puts it behind `tiny_http`.

pub mod app;
pub mod error;
pub mod handlers;
pub mod http;
pub mod server;

pub use app::ReviewApp;
pub use error::ApiError;
pub use http::{ApiRequest, ApiResponse, Method};
pub use server::{Server, ShutdownHandle};
