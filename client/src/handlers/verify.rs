//! Public verification handler

use super::certificate::render_certificate;
use super::{AppState, Reply};
use crate::error::ClientResult;
use crate::services::VerificationService;

/// Look up a certificate by its public ID
pub async fn verify(state: &AppState, certificate_id: &str) -> ClientResult<Reply> {
    let service = VerificationService::new(state.public_api()?);
    let verified = service.verify(certificate_id).await?;

    let text = format!(
        "Certificate verified.\n{}",
        render_certificate(&verified.certificate, verified.effective_status)
    );
    Reply::new(&verified, text)
}
