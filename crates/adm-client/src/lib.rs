//! # adm-client
//!
//! Client side of the review workflow.
//!
//! - [`api::ReviewApi`]: list, get, and patch-status operations.
//! - [`http::HttpReviewApi`]: `reqwest` implementation against a running server.
//! - [`list_view::ListView`] and [`detail_view::DetailView`]: view state with
//!   optimistic status changes reconciled against the server.

pub mod api;
pub mod detail_view;
pub mod error;
pub mod http;
pub mod list_view;

pub use api::ReviewApi;
pub use error::ClientError;
pub use http::HttpReviewApi;
