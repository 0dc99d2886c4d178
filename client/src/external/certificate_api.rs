//! HTTP client for the certificate backend
//!
//! Implements [`CertificateRepository`] over the backend's REST API. Admin
//! routes carry the session's bearer token; the public verification route
//! never does.

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::{
    Certificate, CertificateDraft, CertificateRepository, RepositoryError, RepositoryResult,
};

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Certificate backend API client
#[derive(Clone)]
pub struct CertificateApiClient {
    client: Client,
    base_url: Url,
    session: Option<Session>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// Error body some backend routes return
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl CertificateApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Configuration(format!("HTTP client: {}", e)))?;
        Self::with_client(client, &config.base_url)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: &str) -> ClientResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    fn with_client(client: Client, base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ClientError::Configuration(format!("invalid API base URL {base_url}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "API base URL {base_url} cannot carry a path"
            )));
        }
        Ok(Self {
            client,
            base_url,
            session: None,
        })
    }

    /// Attach the session used for admin requests
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Exchange admin credentials for a session.
    ///
    /// A rejected login is reported as invalid credentials, never as an
    /// expired session.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        let url = self.endpoint(&["admin", "login"])?;
        tracing::debug!(%url, username, "logging in");

        let response = self
            .client
            .post(url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        if matches!(status, 400 | 401 | 403) {
            return Err(ClientError::InvalidCredentials);
        }

        let body: LoginResponse = read_json(response, "login").await?;
        match body.token {
            Some(token) if !token.is_empty() => Ok(Session::new(token)),
            _ => Err(
                RepositoryError::Unknown("Login failed: no token received".to_string()).into(),
            ),
        }
    }

    /// Look up a certificate on the public verification route
    pub async fn verify(&self, id: &str) -> RepositoryResult<Certificate> {
        let url = self.endpoint(&["verify", id])?;
        tracing::debug!(%url, "verifying certificate");
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        read_json(response, id).await
    }

    fn endpoint(&self, segments: &[&str]) -> RepositoryResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RepositoryError::Unknown("API base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn admin_endpoint(&self, storage_id: Option<&str>) -> RepositoryResult<Url> {
        match storage_id {
            Some(storage_id) => self.endpoint(&["admin", "certificates", storage_id]),
            None => self.endpoint(&["admin", "certificates"]),
        }
    }

    /// Attach the bearer token; without a session the backend answers 401
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => builder.bearer_auth(session.token()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> RepositoryResult<Response> {
        self.authorized(builder)
            .send()
            .await
            .map_err(transport_error)
    }
}

fn transport_error(e: reqwest::Error) -> RepositoryError {
    RepositoryError::Unknown(format!("Request failed: {}", e))
}

/// Check the status and decode a JSON body
async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> RepositoryResult<T> {
    let response = check_status(response, context).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| RepositoryError::Unknown(format!("Failed to parse response: {}", e)))
}

async fn check_status(response: Response, context: &str) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or(body);
    tracing::debug!(status = status.as_u16(), %message, "backend returned an error");

    let context = if message.is_empty() {
        context.to_string()
    } else {
        format!("{}: {}", context, message)
    };
    Err(RepositoryError::from_status(status.as_u16(), context))
}

impl CertificateRepository for CertificateApiClient {
    async fn create(&self, draft: CertificateDraft) -> RepositoryResult<Certificate> {
        let url = self.admin_endpoint(None)?;
        tracing::debug!(%url, id = %draft.id, "creating certificate");
        let response = self.send(self.client.post(url).json(&draft)).await?;
        read_json(response, &draft.id).await
    }

    async fn get_by_id(&self, storage_id: &str) -> RepositoryResult<Certificate> {
        let url = self.admin_endpoint(Some(storage_id))?;
        let response = self.send(self.client.get(url)).await?;
        read_json(response, storage_id).await
    }

    async fn get_by_public_id(&self, id: &str) -> RepositoryResult<Certificate> {
        self.verify(id).await
    }

    async fn list(&self) -> RepositoryResult<Vec<Certificate>> {
        let url = self.admin_endpoint(None)?;
        let response = self.send(self.client.get(url)).await?;
        read_json(response, "certificates").await
    }

    async fn update(
        &self,
        storage_id: &str,
        draft: CertificateDraft,
    ) -> RepositoryResult<Certificate> {
        let url = self.admin_endpoint(Some(storage_id))?;
        tracing::debug!(%url, id = %draft.id, "updating certificate");
        let response = self.send(self.client.put(url).json(&draft)).await?;
        read_json(response, storage_id).await
    }

    async fn delete(&self, storage_id: &str) -> RepositoryResult<()> {
        let url = self.admin_endpoint(Some(storage_id))?;
        let response = self.send(self.client.delete(url)).await?;
        check_status(response, storage_id).await?;
        Ok(())
    }
}
