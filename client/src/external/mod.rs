//! External API integrations

pub mod certificate_api;

pub use certificate_api::CertificateApiClient;
