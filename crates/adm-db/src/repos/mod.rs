//! Repositories, one module per table.

pub mod application;
pub mod university;
