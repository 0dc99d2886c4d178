//! Authentication handlers

use std::io::{self, BufRead, Write};

use serde::Serialize;

use super::{AppState, Reply};
use crate::error::ClientResult;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub logged_out: bool,
}

/// Exchange credentials for a session and store it
pub async fn login(
    state: &AppState,
    username: &str,
    password: Option<&str>,
) -> ClientResult<Reply> {
    let password = match password {
        Some(password) => password.to_string(),
        None => read_password()?,
    };

    let api = state.public_api()?;
    let session = api.login(username, &password).await?;
    state.tokens.save(&session)?;

    // The token is opaque to us unless it happens to be a readable JWT
    let expires_at = session.claims().ok().and_then(|claims| claims.exp);
    tracing::info!(username, "logged in");

    Reply::new(
        &LoginResponse {
            username: username.to_string(),
            expires_at,
        },
        format!("Logged in as {}.", username),
    )
}

/// One line from stdin, without the trailing newline
fn read_password() -> ClientResult<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Forget the stored session
pub fn logout(state: &AppState) -> ClientResult<Reply> {
    state.tokens.clear()?;
    Reply::new(&LogoutResponse { logged_out: true }, "Logged out.")
}
