mod api;
mod cli;
mod commands;
mod credentials;
mod dispatch;
mod error;
mod models;
mod payload;
mod templates;
#[cfg(test)]
mod test_support;

use std::path::Path;

use clap::Parser;
use cli::{Cli, Commands};
use credentials::Credentials;
use dispatch::Dispatcher;
use templates::TemplateStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = credentials::load_env_file(Path::new(".env.local")) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut credentials = Credentials::from_env();
    if let Some(path) = &cli.templates_path {
        credentials.templates_path = path.clone();
    }
    let store = TemplateStore::new(credentials.templates_path.clone());
    let dispatcher = Dispatcher::new(&credentials, &store);

    let result = match &cli.command {
        Commands::AuthToken { no_mask, .. } => commands::auth::run(&credentials, !no_mask).await,
        Commands::ListInvoices {
            location_id,
            status,
        } => commands::invoices::list(&dispatcher, location_id.as_deref(), status).await,
        Commands::ListAppointments {
            location_id,
            start_date,
            end_date,
            include_no_show_cancel,
            therapist_id,
        } => {
            commands::booking::list(
                &dispatcher,
                location_id.as_deref(),
                *start_date,
                *end_date,
                *include_no_show_cancel,
                therapist_id.clone(),
            )
            .await
        }
        Commands::ListTemplates => commands::templates::list(&store),
        Commands::ShowTemplate { name } => commands::templates::show(&store, name),
        Commands::AddTemplate { name, file } => commands::templates::add(&store, name, file),
        Commands::RemoveTemplate { name } => commands::templates::remove(&store, name),
        Commands::CreateInvoice {
            location_id,
            name,
            overrides_file,
        } => {
            commands::invoices::create(
                &dispatcher,
                location_id.as_deref(),
                name,
                overrides_file.as_deref(),
            )
            .await
        }
        Commands::BookAppointment {
            location_id,
            name,
            overrides_file,
        } => {
            commands::booking::book(
                &dispatcher,
                location_id.as_deref(),
                name,
                overrides_file.as_deref(),
            )
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout stays parseable JSON. `RUST_LOG`
/// wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "zenoti_tool=debug"
    } else {
        "zenoti_tool=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
