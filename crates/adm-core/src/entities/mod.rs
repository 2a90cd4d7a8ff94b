//! Entity structs for the admissions domain.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod application;
mod university;

pub use application::{Application, NewApplication};
pub use university::University;
