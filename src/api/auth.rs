use std::fmt;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde_json::json;
use tracing::{debug, info};

use crate::credentials::{Credentials, Grant};
use crate::error::{Error, Result};
use crate::models::token::TokenResponse;

pub const APPLICATION_ID_HEADER: &str = "X-Application-Id";
pub const API_KEY_HEADER: &str = "Zenoti-Api-Key";
pub const CENTER_ID_HEADER: &str = "X-Center-Id";

const MASK_PREFIX: usize = 6;
const MASK_SUFFIX: usize = 4;

/// A bearer token. `Debug` only ever shows the masked form.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    /// First six and last four characters; short tokens are hidden entirely.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= MASK_PREFIX + MASK_SUFFIX {
            return "***".to_string();
        }
        let prefix: String = chars[..MASK_PREFIX].iter().collect();
        let suffix: String = chars[chars.len() - MASK_SUFFIX..].iter().collect();
        format!("{}...{}", prefix, suffix)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&self.masked()).finish()
    }
}

/// Outcome of a token exchange. Displays masked or in full depending on how
/// it was requested; the token itself is the same either way.
#[derive(Debug, Clone)]
pub struct TokenResult {
    pub token: AccessToken,
    pub expires_in: Option<u64>,
    mask: bool,
}

impl TokenResult {
    pub fn new(token: AccessToken, expires_in: Option<u64>, mask: bool) -> Self {
        Self {
            token,
            expires_in,
            mask,
        }
    }
}

impl fmt::Display for TokenResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mask {
            f.write_str(&self.token.masked())
        } else {
            f.write_str(self.token.secret())
        }
    }
}

/// Exchanges credentials for a bearer token and stamps requests with the
/// headers Zenoti expects.
pub struct TokenProvider {
    credentials: Credentials,
    http: Client,
}

impl TokenProvider {
    pub fn new(credentials: Credentials, http: Client) -> Self {
        Self { credentials, http }
    }

    /// Fetch a fresh token. Credentials are validated first, so a
    /// misconfigured environment never reaches the network.
    pub async fn get_token(&self, mask: bool) -> Result<TokenResult> {
        self.credentials.validate()?;
        let endpoint = self.credentials.token_endpoint()?;
        let grant = self.credentials.grant()?;

        info!(%endpoint, grant = grant_kind(&grant), "requesting access token");
        let resp = self.token_request(&endpoint, &grant).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Auth { status, body });
        }

        let body = resp.text().await?;
        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|err| {
            debug!(error = %err, "token response is not JSON");
            Error::Auth {
                status,
                body: body.clone(),
            }
        })?;
        let token = parsed.access_token().ok_or_else(|| Error::Auth {
            status,
            body: format!("token response did not contain an access token: {}", body),
        })?;

        let result = TokenResult::new(AccessToken::new(token), parsed.expires_in(), mask);
        debug!(token = ?result.token, expires_in = ?result.expires_in, "access token acquired");
        Ok(result)
    }

    fn token_request(&self, endpoint: &str, grant: &Grant<'_>) -> RequestBuilder {
        let request = self
            .http
            .post(endpoint)
            .header(ACCEPT, "application/json");

        match grant {
            Grant::Password {
                account_name,
                username,
                password,
                app_id,
                app_secret,
                device_id,
            } => request.header(APPLICATION_ID_HEADER, *app_id).json(&json!({
                "account_name": account_name,
                "user_name": username,
                "password": password,
                "grant_type": "password",
                "app_id": app_id,
                "app_secret": app_secret,
                "device_id": device_id,
            })),
            Grant::ClientCredentials {
                client_id,
                client_secret,
            } => request.form(&[
                ("client_id", *client_id),
                ("client_secret", *client_secret),
                ("grant_type", "client_credentials"),
            ]),
        }
    }

    /// Add bearer, application id, API key and center headers. Optional
    /// headers are only sent when configured.
    pub fn attach_auth(&self, request: RequestBuilder, token: &AccessToken) -> RequestBuilder {
        let mut request = request
            .bearer_auth(token.secret())
            .header(ACCEPT, "application/json");

        if let Some(app_id) = &self.credentials.app_id {
            request = request.header(APPLICATION_ID_HEADER, app_id);
        }
        if let Some(api_key) = &self.credentials.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }
        if let Some(center_id) = &self.credentials.center_id {
            request = request.header(CENTER_ID_HEADER, center_id);
        }
        request
    }
}

fn grant_kind(grant: &Grant<'_>) -> &'static str {
    match grant {
        Grant::Password { .. } => "password",
        Grant::ClientCredentials { .. } => "client_credentials",
    }
}
