//! Domain models for the Certificate Verification Platform

mod certificate;
mod form;

pub use certificate::*;
pub use form::*;
