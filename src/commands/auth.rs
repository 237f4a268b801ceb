use anyhow::{Context, Result};

use crate::api::auth::TokenProvider;
use crate::api::client::http_client;
use crate::credentials::Credentials;

pub async fn run(credentials: &Credentials, mask: bool) -> Result<()> {
    let provider = TokenProvider::new(credentials.clone(), http_client()?);
    let issued = provider
        .get_token(mask)
        .await
        .context("Failed to acquire access token")?;

    if mask {
        println!("Token acquired (masked): {}", issued);
    } else {
        println!("{}", issued);
    }
    Ok(())
}
