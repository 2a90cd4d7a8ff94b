//! # adm-core
//!
//! Core types shared across the admissions review crates.
//!
//! - Entity structs for applications and the read-only university reference
//! - `ApplicationStatus` and the transition policy of the review workflow
//! - Identifier sanity checks run before any store access
//! - The search/filter computation used by the review list
//! - Cross-cutting error types and the `{ data, error }` response envelope

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod search;
pub mod workflow;
