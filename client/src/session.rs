//! Admin session handling
//!
//! The backend issues a JWT at login. The client never verifies its
//! signature (the backend does that on every request); it only reads the
//! claims to notice an expired token before sending it.

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Bearer token for admin requests
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// Claims the client cares about; everything is optional because the
/// backend decides what it puts in the token
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Read the token's claims without checking the signature
    pub fn claims(&self) -> ClientResult<Claims> {
        let header =
            decode_header(&self.token).map_err(|e| ClientError::MalformedToken(e.to_string()))?;

        let mut validation = Validation::new(header.alg);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(&self.token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(|e| ClientError::MalformedToken(e.to_string()))
    }

    /// Whether the token's `exp` lies at or before `now` (unix seconds).
    /// Tokens without `exp`, or that cannot be read, are left to the backend.
    pub fn is_expired(&self, now: i64) -> bool {
        self.claims()
            .ok()
            .and_then(|claims| claims.exp)
            .is_some_and(|exp| exp <= now)
    }

    /// Display name from the token, if any
    pub fn subject(&self) -> Option<String> {
        self.claims()
            .ok()
            .and_then(|claims| claims.username.or(claims.sub))
    }
}

/// Token persisted to a file between command invocations
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored session, or `None` when nobody is logged in
    pub fn load(&self) -> ClientResult<Option<Session>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Session::new(token)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Stored session that has not expired yet
    pub fn require(&self, now: i64) -> ClientResult<Session> {
        let session = self.load()?.ok_or(ClientError::NotLoggedIn)?;
        if session.is_expired(now) {
            tracing::warn!(path = %self.path.display(), "stored session has expired");
            self.clear()?;
            return Err(ClientError::NotLoggedIn);
        }
        Ok(session)
    }

    pub fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, session.token())?;
        tracing::debug!(path = %self.path.display(), "saved session token");
        Ok(())
    }

    /// Remove the stored token; a missing file is not an error
    pub fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "cleared session token");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
