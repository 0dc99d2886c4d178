//! Business logic services for the certificate client

pub mod certificate;
pub mod dashboard;
pub mod verification;

pub use certificate::CertificateService;
pub use dashboard::{DashboardService, DashboardSummary};
pub use verification::{VerificationService, VerifiedCertificate};
