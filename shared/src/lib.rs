//! Shared types and models for the Certificate Verification Platform
//!
//! This crate contains the certificate record, its type-driven field rules,
//! input validation and the repository contract. It is used by the API
//! client, the command line tool, and the browser form (via WASM).

pub mod models;
pub mod repository;
pub mod rules;
pub mod types;
pub mod validation;

pub use models::*;
pub use repository::*;
pub use rules::*;
pub use types::*;
pub use validation::*;
