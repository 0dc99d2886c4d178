//! Command handlers for `certctl`
//!
//! Each handler performs one command and returns a [`Reply`] holding both a
//! JSON value and a text rendering; the caller picks which to print.

pub mod auth;
pub mod certificate;
pub mod rules;
pub mod verify;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::cli::Command;
use crate::config::Config;
use crate::error::ClientResult;
use crate::external::CertificateApiClient;
use crate::session::TokenStore;

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tokens: TokenStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let tokens = TokenStore::new(config.session.token_path.clone());
        Self {
            config: Arc::new(config),
            tokens,
        }
    }

    /// Client without credentials, for public routes
    pub fn public_api(&self) -> ClientResult<CertificateApiClient> {
        CertificateApiClient::new(&self.config.api)
    }

    /// Client carrying the stored session, for admin routes
    pub fn admin_api(&self) -> ClientResult<CertificateApiClient> {
        let session = self.tokens.require(Utc::now().timestamp())?;
        Ok(self.public_api()?.with_session(session))
    }
}

/// Output of one command
#[derive(Debug, Clone)]
pub struct Reply {
    value: serde_json::Value,
    text: String,
}

impl Reply {
    pub fn new<T: Serialize>(value: &T, text: impl Into<String>) -> ClientResult<Self> {
        Ok(Self {
            value: serde_json::to_value(value)?,
            text: text.into(),
        })
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn render(&self, json: bool) -> ClientResult<String> {
        if json {
            Ok(serde_json::to_string_pretty(&self.value)?)
        } else {
            Ok(self.text.clone())
        }
    }
}

/// Run a parsed command.
///
/// When the backend rejects the session, the stored token is discarded so the
/// next admin command asks for a fresh login.
pub async fn run(state: &AppState, command: Command) -> ClientResult<Reply> {
    let result = match command {
        Command::Verify { certificate_id } => verify::verify(state, &certificate_id).await,
        Command::Login { username, password } => {
            auth::login(state, &username, password.as_deref()).await
        }
        Command::Logout => auth::logout(state),
        Command::Dashboard { recent } => certificate::dashboard(state, recent).await,
        Command::List { search } => certificate::list(state, search.as_deref()).await,
        Command::Show { storage_id } => certificate::show(state, &storage_id).await,
        Command::Add { form } => certificate::add(state, form.into_form()).await,
        Command::Edit { storage_id, form } => certificate::edit(state, &storage_id, form).await,
        Command::Delete { storage_id } => certificate::delete(state, &storage_id).await,
        Command::Rules { certificate_type } => rules::rules(&certificate_type),
    };

    if let Err(err) = &result {
        if err.is_session_invalid() {
            tracing::warn!("session rejected, run `certctl login` again");
            if let Err(clear_err) = state.tokens.clear() {
                tracing::warn!(error = %clear_err, "could not remove stored session");
            }
        }
    }
    result
}
