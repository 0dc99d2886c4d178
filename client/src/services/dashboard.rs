//! Admin dashboard summary

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use shared::{Certificate, CertificateRepository, CertificateStatus, CertificateType};

use crate::error::ClientResult;

/// Counts and recent additions shown on the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_certificates: usize,
    /// Most recently added last
    pub recent_certificates: Vec<Certificate>,
    pub by_type: BTreeMap<CertificateType, usize>,
    pub by_status: BTreeMap<CertificateStatus, usize>,
}

#[derive(Clone)]
pub struct DashboardService<R> {
    repo: R,
}

impl<R: CertificateRepository> DashboardService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn summary(&self, recent_count: usize) -> ClientResult<DashboardSummary> {
        let certificates = self.repo.list().await?;
        Ok(summarize(certificates, recent_count, Utc::now().date_naive()))
    }
}

/// Build the summary from a backend-ordered list
pub fn summarize(
    certificates: Vec<Certificate>,
    recent_count: usize,
    today: NaiveDate,
) -> DashboardSummary {
    let mut by_type: BTreeMap<CertificateType, usize> =
        CertificateType::ALL.iter().map(|t| (*t, 0)).collect();
    let mut by_status: BTreeMap<CertificateStatus, usize> =
        CertificateStatus::ALL.iter().map(|s| (*s, 0)).collect();

    for certificate in &certificates {
        *by_type.entry(certificate.record.certificate_type).or_default() += 1;
        *by_status.entry(certificate.effective_status(today)).or_default() += 1;
    }

    DashboardSummary {
        total_certificates: certificates.len(),
        recent_certificates: recent(&certificates, recent_count).to_vec(),
        by_type,
        by_status,
    }
}

/// The last `count` certificates, in backend order
pub fn recent(certificates: &[Certificate], count: usize) -> &[Certificate] {
    &certificates[certificates.len().saturating_sub(count)..]
}
