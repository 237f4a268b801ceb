use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Token endpoint response. Depending on the grant, Zenoti returns the token
/// at the top level or wrapped in a `credentials` object.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    access_token: Option<String>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    expires_in: Option<u64>,
    credentials: Option<NestedCredentials>,
}

#[derive(Debug, Deserialize)]
struct NestedCredentials {
    access_token: Option<String>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    expires_in: Option<u64>,
}

/// Expiry is informational only, so accept `3600` or `"3600"` and drop
/// anything else rather than failing the exchange.
fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl TokenResponse {
    pub fn access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .or_else(|| self.credentials.as_ref()?.access_token.as_deref())
            .filter(|t| !t.is_empty())
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
            .or_else(|| self.credentials.as_ref()?.expires_in)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::TokenResponse;

    #[test]
    fn reads_top_level_token() {
        let resp: TokenResponse =
            serde_json::from_value(json!({"access_token": "abc", "expires_in": 3600})).unwrap();
        assert_eq!(resp.access_token(), Some("abc"));
        assert_eq!(resp.expires_in(), Some(3600));
    }

    #[test]
    fn reads_nested_credentials() {
        let resp: TokenResponse = serde_json::from_value(json!({
            "credentials": {"access_token": "nested", "expires_in": 86400, "token_type": "bearer"}
        }))
        .unwrap();
        assert_eq!(resp.access_token(), Some("nested"));
        assert_eq!(resp.expires_in(), Some(86400));
    }

    #[test]
    fn expiry_accepts_numeric_strings_and_ignores_junk() {
        let resp: TokenResponse =
            serde_json::from_value(json!({"access_token": "abc", "expires_in": "3599"})).unwrap();
        assert_eq!(resp.expires_in(), Some(3599));

        let resp: TokenResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "expires_in": "soon",
            "credentials": {"expires_in": [1]}
        }))
        .unwrap();
        assert_eq!(resp.access_token(), Some("abc"));
        assert_eq!(resp.expires_in(), None);

        let resp: TokenResponse =
            serde_json::from_value(json!({"access_token": "abc", "expires_in": -5})).unwrap();
        assert_eq!(resp.expires_in(), None);
    }

    #[test]
    fn empty_or_missing_token_is_none() {
        let resp: TokenResponse = serde_json::from_value(json!({"access_token": ""})).unwrap();
        assert_eq!(resp.access_token(), None);

        let resp: TokenResponse = serde_json::from_value(json!({"error": "nope"})).unwrap();
        assert_eq!(resp.access_token(), None);
        assert_eq!(resp.expires_in(), None);
    }
}
