//! Certificate Verification Platform - API client and admin tooling
//!
//! Talks to the certificate backend over HTTP, validates input locally with
//! the rules from the `shared` crate, and backs the `certctl` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod services;
pub mod session;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use external::CertificateApiClient;
pub use session::{Session, TokenStore};
