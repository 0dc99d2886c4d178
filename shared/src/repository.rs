//! Certificate repository contract
//!
//! Callers work against [`CertificateRepository`]; the HTTP client in the
//! `client` crate and [`InMemoryCertificateRepository`] both implement it.

use std::future::Future;
use std::sync::RwLock;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Certificate, CertificateDraft};

/// Errors signalled by a certificate repository
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Certificate not found: {0}")]
    NotFound(String),

    /// 403 - the caller may not view or act on the record
    #[error("Forbidden")]
    Forbidden,

    /// 401 - the session is missing or was rejected
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Anything else, including network failures and undecodable responses
    #[error("Repository error: {0}")]
    Unknown(String),
}

impl RepositoryError {
    /// Map an HTTP status code to an error category
    pub fn from_status(status: u16, context: impl Into<String>) -> Self {
        let context = context.into();
        match status {
            401 => RepositoryError::Unauthorized,
            403 => RepositoryError::Forbidden,
            404 => RepositoryError::NotFound(context),
            409 => RepositoryError::Conflict(context),
            _ => RepositoryError::Unknown(format!("HTTP {status}: {context}")),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence operations over the certificate collection.
///
/// `storage_id` keys every admin read and mutation; the public `id` is only
/// used by [`CertificateRepository::get_by_public_id`].
pub trait CertificateRepository: Send + Sync {
    fn create(
        &self,
        draft: CertificateDraft,
    ) -> impl Future<Output = RepositoryResult<Certificate>> + Send;

    fn get_by_id(
        &self,
        storage_id: &str,
    ) -> impl Future<Output = RepositoryResult<Certificate>> + Send;

    fn get_by_public_id(
        &self,
        id: &str,
    ) -> impl Future<Output = RepositoryResult<Certificate>> + Send;

    /// All certificates in backend order
    fn list(&self) -> impl Future<Output = RepositoryResult<Vec<Certificate>>> + Send;

    /// Replace the stored record in full
    fn update(
        &self,
        storage_id: &str,
        draft: CertificateDraft,
    ) -> impl Future<Output = RepositoryResult<Certificate>> + Send;

    fn delete(&self, storage_id: &str) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// Repository kept in process memory, in insertion order
#[derive(Debug, Default)]
pub struct InMemoryCertificateRepository {
    certificates: RwLock<Vec<Certificate>>,
}

impl InMemoryCertificateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with existing records
    pub fn with_certificates(certificates: Vec<Certificate>) -> Self {
        Self {
            certificates: RwLock::new(certificates),
        }
    }

    pub fn len(&self) -> usize {
        self.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RepositoryResult<std::sync::RwLockReadGuard<'_, Vec<Certificate>>> {
        self.certificates
            .read()
            .map_err(|_| RepositoryError::Unknown("certificate store poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<std::sync::RwLockWriteGuard<'_, Vec<Certificate>>> {
        self.certificates
            .write()
            .map_err(|_| RepositoryError::Unknown("certificate store poisoned".to_string()))
    }
}

impl CertificateRepository for InMemoryCertificateRepository {
    async fn create(&self, draft: CertificateDraft) -> RepositoryResult<Certificate> {
        let mut certificates = self.write()?;
        if certificates.iter().any(|c| c.record.id == draft.id) {
            return Err(RepositoryError::Conflict(format!(
                "certificate id {} already exists",
                draft.id
            )));
        }
        let certificate = Certificate::new(Uuid::new_v4().simple().to_string(), draft);
        tracing::debug!(
            storage_id = %certificate.storage_id,
            id = %certificate.record.id,
            "stored certificate"
        );
        certificates.push(certificate.clone());
        Ok(certificate)
    }

    async fn get_by_id(&self, storage_id: &str) -> RepositoryResult<Certificate> {
        self.read()?
            .iter()
            .find(|c| c.storage_id == storage_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(storage_id.to_string()))
    }

    async fn get_by_public_id(&self, id: &str) -> RepositoryResult<Certificate> {
        self.read()?
            .iter()
            .find(|c| c.record.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn list(&self) -> RepositoryResult<Vec<Certificate>> {
        Ok(self.read()?.clone())
    }

    async fn update(
        &self,
        storage_id: &str,
        draft: CertificateDraft,
    ) -> RepositoryResult<Certificate> {
        let mut certificates = self.write()?;
        if certificates
            .iter()
            .any(|c| c.storage_id != storage_id && c.record.id == draft.id)
        {
            return Err(RepositoryError::Conflict(format!(
                "certificate id {} already exists",
                draft.id
            )));
        }
        let existing = certificates
            .iter_mut()
            .find(|c| c.storage_id == storage_id)
            .ok_or_else(|| RepositoryError::NotFound(storage_id.to_string()))?;
        existing.record = draft;
        Ok(existing.clone())
    }

    async fn delete(&self, storage_id: &str) -> RepositoryResult<()> {
        let mut certificates = self.write()?;
        let before = certificates.len();
        certificates.retain(|c| c.storage_id != storage_id);
        if certificates.len() == before {
            return Err(RepositoryError::NotFound(storage_id.to_string()));
        }
        Ok(())
    }
}
