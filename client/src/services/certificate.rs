//! Certificate administration service
//!
//! Input is validated locally before any request is made; the repository
//! only ever sees drafts that passed validation.

use shared::{Certificate, CertificateForm, CertificateRepository, DATE_FORMAT};

use crate::error::ClientResult;

/// Admin operations over a certificate repository
#[derive(Clone)]
pub struct CertificateService<R> {
    repo: R,
}

impl<R: CertificateRepository> CertificateService<R> {
    /// Create a new CertificateService instance
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validate the form and create the certificate
    pub async fn create_certificate(&self, form: CertificateForm) -> ClientResult<Certificate> {
        let draft = form.into_draft()?;
        let certificate = self.repo.create(draft).await?;
        tracing::info!(
            storage_id = %certificate.storage_id,
            id = %certificate.record.id,
            "certificate created"
        );
        Ok(certificate)
    }

    /// Get a certificate by storage ID
    pub async fn get_certificate(&self, storage_id: &str) -> ClientResult<Certificate> {
        Ok(self.repo.get_by_id(storage_id).await?)
    }

    /// Form pre-filled with the stored record, for editing
    pub async fn edit_form(&self, storage_id: &str) -> ClientResult<CertificateForm> {
        let certificate = self.get_certificate(storage_id).await?;
        Ok(CertificateForm::from(&certificate.record))
    }

    /// List all certificates in backend order
    pub async fn list_certificates(&self) -> ClientResult<Vec<Certificate>> {
        Ok(self.repo.list().await?)
    }

    /// Certificates whose ID, recipient, title or issue date contain `term`
    pub async fn search_certificates(&self, term: &str) -> ClientResult<Vec<Certificate>> {
        let certificates = self.repo.list().await?;
        Ok(certificates
            .into_iter()
            .filter(|c| matches_search(c, term))
            .collect())
    }

    /// Validate the form and replace the stored record
    pub async fn update_certificate(
        &self,
        storage_id: &str,
        form: CertificateForm,
    ) -> ClientResult<Certificate> {
        let draft = form.into_draft()?;
        let certificate = self.repo.update(storage_id, draft).await?;
        tracing::info!(storage_id, id = %certificate.record.id, "certificate updated");
        Ok(certificate)
    }

    /// Delete a certificate by storage ID
    pub async fn delete_certificate(&self, storage_id: &str) -> ClientResult<()> {
        self.repo.delete(storage_id).await?;
        tracing::info!(storage_id, "certificate deleted");
        Ok(())
    }
}

/// Case-insensitive match against the columns shown in the admin list.
/// A blank term matches everything.
pub fn matches_search(certificate: &Certificate, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    let record = &certificate.record;
    let issue_date = record.issue_date.format(DATE_FORMAT).to_string();
    [
        record.id.as_str(),
        record.recipient_name.as_str(),
        record.certificate_title.as_str(),
        issue_date.as_str(),
    ]
    .iter()
    .any(|column| column.to_lowercase().contains(&term))
}
