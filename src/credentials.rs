use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_TEMPLATES_PATH: &str = "data/templates.json";

const BASE_URL: &str = "ZENOTI_BASE_URL";
const TOKEN_URL: &str = "ZENOTI_TOKEN_URL";
const APP_ID: &str = "ZENOTI_APP_ID";
const APP_SECRET: &str = "ZENOTI_APP_SECRET";
const LEGACY_CLIENT_ID: &str = "ZENOTI_CLIENT_ID";
const LEGACY_CLIENT_SECRET: &str = "ZENOTI_CLIENT_SECRET";
const API_KEY: &str = "ZENOTI_API_KEY";
const ACCOUNT_NAME: &str = "ZENOTI_ACCOUNT_NAME";
const USERNAME: &str = "ZENOTI_USERNAME";
const PASSWORD: &str = "ZENOTI_PASSWORD";
const DEVICE_ID: &str = "ZENOTI_DEVICE_ID";
const CENTER_ID: &str = "ZENOTI_CENTER_ID";
const TEMPLATES_PATH: &str = "ZENOTI_TEMPLATES_PATH";

/// Everything the tool knows about the Zenoti tenant it talks to.
///
/// Built once at startup and handed to each component by reference. Fields
/// are optional because which ones are required depends on the command:
/// template management needs none of them.
#[derive(Clone)]
pub struct Credentials {
    pub base_url: Option<String>,
    pub token_url: Option<String>,
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    pub api_key: Option<String>,
    pub account_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub device_id: Option<String>,
    pub center_id: Option<String>,
    pub templates_path: PathBuf,
}

/// The grant used for the token exchange, picked from whichever credential
/// fields are populated.
#[derive(Debug, PartialEq, Eq)]
pub enum Grant<'a> {
    Password {
        account_name: Option<&'a str>,
        username: &'a str,
        password: &'a str,
        app_id: &'a str,
        app_secret: Option<&'a str>,
        device_id: Option<&'a str>,
    },
    ClientCredentials {
        client_id: &'a str,
        client_secret: &'a str,
    },
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build credentials from an arbitrary variable source. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            base_url: get(BASE_URL),
            token_url: get(TOKEN_URL),
            app_id: get(APP_ID).or_else(|| get(LEGACY_CLIENT_ID)),
            app_secret: get(APP_SECRET).or_else(|| get(LEGACY_CLIENT_SECRET)),
            api_key: get(API_KEY),
            account_name: get(ACCOUNT_NAME),
            username: get(USERNAME),
            password: get(PASSWORD),
            device_id: get(DEVICE_ID),
            center_id: get(CENTER_ID),
            templates_path: get(TEMPLATES_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_PATH)),
        }
    }

    /// API root with any trailing version segment removed.
    pub fn api_base(&self) -> Result<String> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| Error::config(format!("{} is not set", BASE_URL)))?;
        Ok(normalize_base_url(base))
    }

    pub fn token_endpoint(&self) -> Result<String> {
        match self.token_url.as_deref() {
            Some(url) => Ok(url.trim_end_matches('/').to_string()),
            None => Ok(format!("{}/v1/tokens", self.api_base()?)),
        }
    }

    pub fn grant(&self) -> Result<Grant<'_>> {
        let app_id = self
            .app_id
            .as_deref()
            .ok_or_else(|| Error::config(format!("{} is not set", APP_ID)))?;

        if self.app_secret.is_none() && self.api_key.is_none() {
            return Err(Error::config(format!(
                "either {} or {} must be set",
                APP_SECRET, API_KEY
            )));
        }

        if let (Some(username), Some(password)) =
            (self.username.as_deref(), self.password.as_deref())
        {
            return Ok(Grant::Password {
                account_name: self.account_name.as_deref(),
                username,
                password,
                app_id,
                app_secret: self.app_secret.as_deref(),
                device_id: self.device_id.as_deref(),
            });
        }

        match self.app_secret.as_deref() {
            Some(client_secret) => Ok(Grant::ClientCredentials {
                client_id: app_id,
                client_secret,
            }),
            None => Err(Error::config(format!(
                "no grant credentials: set {} and {}, or {}",
                USERNAME, PASSWORD, APP_SECRET
            ))),
        }
    }

    /// Check everything a token exchange needs without touching the network.
    pub fn validate(&self) -> Result<()> {
        self.api_base()?;
        self.grant()?;
        Ok(())
    }
}

/// Load `KEY=value` pairs from `path` into the process environment. Variables
/// already set win over the file. A missing file is fine; a malformed one is
/// reported instead of silently leaving credentials unset.
pub fn load_env_file(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(Error::config(format!(
            "failed to load {}: {}",
            path.display(),
            err
        ))),
    }
}

/// Strip trailing slashes and a trailing `/vN` segment, so both
/// `https://api.zenoti.com` and `https://api.zenoti.com/v1/` resolve to the
/// same root.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((head, last)) if is_version_segment(last) && !head.ends_with('/') => {
            head.trim_end_matches('/').to_string()
        }
        _ => trimmed.to_string(),
    }
}

fn is_version_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(chars.next(), Some('v' | 'V'))
        && segment.len() > 1
        && chars.all(|c| c.is_ascii_digit())
}
