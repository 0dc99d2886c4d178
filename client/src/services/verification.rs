//! Public certificate verification

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use shared::{Certificate, CertificateRepository, CertificateStatus};

use crate::error::{ClientError, ClientResult};

/// Result of a successful lookup
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedCertificate {
    pub certificate: Certificate,
    /// Status as of the verification date
    pub effective_status: CertificateStatus,
    pub verified_on: NaiveDate,
}

/// Read-only lookup by public certificate ID
#[derive(Clone)]
pub struct VerificationService<R> {
    repo: R,
}

impl<R: CertificateRepository> VerificationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn verify(&self, certificate_id: &str) -> ClientResult<VerifiedCertificate> {
        self.verify_on(certificate_id, Utc::now().date_naive()).await
    }

    /// Verify as of the given day. Blank input is rejected without a request.
    pub async fn verify_on(
        &self,
        certificate_id: &str,
        today: NaiveDate,
    ) -> ClientResult<VerifiedCertificate> {
        let certificate_id = certificate_id.trim();
        if certificate_id.is_empty() {
            return Err(ClientError::EmptyCertificateId);
        }

        let certificate = self.repo.get_by_public_id(certificate_id).await?;
        let effective_status = certificate.effective_status(today);
        tracing::debug!(id = certificate_id, status = %effective_status, "certificate verified");

        Ok(VerifiedCertificate {
            certificate,
            effective_status,
            verified_on: today,
        })
    }
}
