//! Domain vocabulary shared across the buildtrack crates.
//!
//! This crate has no internal dependencies so it can be used by the
//! database layer, the cloud collaborators, and the API server alike.

pub mod activity;
pub mod document;
pub mod error;
pub mod types;
