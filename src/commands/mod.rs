pub mod auth;
pub mod booking;
pub mod invoices;
pub mod templates;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::payload::read_json_object;

/// Response bodies go to stdout untouched, pretty-printed.
fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{}", rendered);
    Ok(())
}

fn read_overrides(path: Option<&Path>) -> Result<Option<Value>> {
    path.map(|p| read_json_object(p).context("Invalid overrides file"))
        .transpose()
}
