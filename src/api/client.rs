use reqwest::{Client, Request, RequestBuilder, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::auth::{AccessToken, TokenProvider};
use crate::credentials::Credentials;
use crate::error::{Error, Result};

pub struct ZenotiClient {
    pub base_url: String,
    pub token: AccessToken,
    pub auth: TokenProvider,
    pub http: Client,
}

impl ZenotiClient {
    /// Exchange credentials for a token and return a client ready to call
    /// the API. One token exchange per call; nothing is cached.
    pub async fn connect(credentials: &Credentials) -> Result<Self> {
        let http = http_client()?;
        let auth = TokenProvider::new(credentials.clone(), http.clone());
        let issued = auth.get_token(true).await?;
        info!(token = %issued, "authenticated");

        Self::with_token(credentials, issued.token, http)
    }

    /// Build a client around an already issued token.
    pub fn with_token(credentials: &Credentials, token: AccessToken, http: Client) -> Result<Self> {
        Ok(Self {
            base_url: credentials.api_base()?,
            token,
            auth: TokenProvider::new(credentials.clone(), http.clone()),
            http,
        })
    }

    /// Append `segments` to the base URL, percent-encoding each one so ids
    /// containing `/`, `?` or `#` stay inside their own path segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| Error::config(format!("invalid base URL {}: {}", self.base_url, err)))?;
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("base URL {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn get(&self, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        Ok(self.auth.attach_auth(self.http.get(url), &self.token))
    }

    pub(crate) fn post(&self, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        Ok(self.auth.attach_auth(self.http.post(url), &self.token))
    }

    /// Send a prepared request and hand back the JSON body untouched. An
    /// empty success body becomes `null`; a non-JSON one is passed through as
    /// a string, since the call itself already succeeded.
    pub(crate) async fn send_json(&self, action: &'static str, request: Request) -> Result<Value> {
        info!(method = %request.method(), url = %request.url(), "{}", action);
        let resp = self.http.execute(request).await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                action,
                status,
                body,
            });
        }

        debug!(%status, "{} succeeded", action);
        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(%status, error = %err, "{} returned a non-JSON body", action);
                Ok(Value::String(body))
            }
        }
    }
}

pub fn http_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
