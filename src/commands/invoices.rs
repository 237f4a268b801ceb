use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::{print_json, read_overrides};
use crate::dispatch::Dispatcher;

pub async fn list(
    dispatcher: &Dispatcher<'_>,
    location_id: Option<&str>,
    status: &str,
) -> Result<()> {
    let invoices = dispatcher
        .list_invoices(location_id, status)
        .await
        .context("Failed to list invoices")?;
    print_json(&invoices)
}

pub async fn create(
    dispatcher: &Dispatcher<'_>,
    location_id: Option<&str>,
    name: &str,
    overrides_file: Option<&Path>,
) -> Result<()> {
    let overrides = read_overrides(overrides_file)?;
    let invoice = dispatcher
        .create_invoice(location_id, name, overrides)
        .await
        .with_context(|| format!("Failed to create invoice from template '{}'", name))?;
    print_json(&invoice)
}
