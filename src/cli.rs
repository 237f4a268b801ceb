use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::api::invoices::DEFAULT_INVOICE_STATUS;

#[derive(Parser)]
#[command(name = "zenoti-tool")]
#[command(about = "Utilities for Zenoti invoice and booking workflows")]
pub struct Cli {
    /// Path to the templates file (overrides ZENOTI_TEMPLATES_PATH)
    #[arg(long, global = true)]
    pub templates_path: Option<PathBuf>,

    /// Log requests and token exchanges to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and display an access token using the configured credentials
    AuthToken {
        /// Redact the middle of the token (default)
        #[arg(long, overrides_with = "no_mask")]
        mask: bool,

        /// Print the full token
        #[arg(long, overrides_with = "mask")]
        no_mask: bool,
    },

    /// List invoices for a location
    ListInvoices {
        /// Location/center identifier (defaults to ZENOTI_CENTER_ID)
        location_id: Option<String>,

        /// Invoice status filter; "all" disables filtering
        #[arg(long, default_value = DEFAULT_INVOICE_STATUS)]
        status: String,
    },

    /// List appointments for a location within a date window (max 7 days)
    ListAppointments {
        /// Location/center identifier (defaults to ZENOTI_CENTER_ID)
        location_id: Option<String>,

        /// Start date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Defaults to the day after start.
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Include No Show and Cancel statuses
        #[arg(long)]
        include_no_show_cancel: bool,

        /// Only appointments for this therapist
        #[arg(long)]
        therapist_id: Option<String>,
    },

    /// List stored templates
    ListTemplates,

    /// Print a stored template's payload
    ShowTemplate {
        name: String,
    },

    /// Add or replace a template from a JSON file
    AddTemplate {
        name: String,

        /// Path to a JSON object to store as the payload
        file: PathBuf,
    },

    /// Remove a template by name
    RemoveTemplate {
        name: String,
    },

    /// Create an invoice from a stored template
    CreateInvoice {
        /// Location/center identifier (defaults to ZENOTI_CENTER_ID)
        #[arg(short, long)]
        location_id: Option<String>,

        /// Template name
        name: String,

        /// JSON file merged on top of the template
        #[arg(long)]
        overrides_file: Option<PathBuf>,
    },

    /// Book an appointment from a stored template
    BookAppointment {
        /// Location/center identifier (defaults to ZENOTI_CENTER_ID)
        #[arg(short, long)]
        location_id: Option<String>,

        /// Template name
        name: String,

        /// JSON file merged on top of the template
        #[arg(long)]
        overrides_file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::{Cli, Commands};

    #[test]
    fn auth_token_masks_unless_told_otherwise() {
        let cli = Cli::parse_from(["zenoti-tool", "auth-token"]);
        assert!(matches!(cli.command, Commands::AuthToken { no_mask: false, .. }));

        let cli = Cli::parse_from(["zenoti-tool", "auth-token", "--mask", "--no-mask"]);
        assert!(matches!(cli.command, Commands::AuthToken { no_mask: true, mask: false }));

        let cli = Cli::parse_from(["zenoti-tool", "auth-token", "--no-mask", "--mask"]);
        assert!(matches!(cli.command, Commands::AuthToken { no_mask: false, mask: true }));
    }

    #[test]
    fn list_invoices_defaults_to_open() {
        let cli = Cli::parse_from(["zenoti-tool", "list-invoices"]);
        match cli.command {
            Commands::ListInvoices {
                location_id,
                status,
            } => {
                assert_eq!(location_id, None);
                assert_eq!(status, "Open");
            }
            _ => panic!("expected list-invoices"),
        }
    }

    #[test]
    fn create_invoice_accepts_short_location_flag() {
        let cli = Cli::parse_from([
            "zenoti-tool",
            "create-invoice",
            "-l",
            "c-1",
            "My Invoice",
            "--overrides-file",
            "o.json",
            "--templates-path",
            "/tmp/t.json",
        ]);

        assert_eq!(cli.templates_path.as_deref(), Some(Path::new("/tmp/t.json")));
        match cli.command {
            Commands::CreateInvoice {
                location_id,
                name,
                overrides_file,
            } => {
                assert_eq!(location_id.as_deref(), Some("c-1"));
                assert_eq!(name, "My Invoice");
                assert_eq!(overrides_file.unwrap().to_str(), Some("o.json"));
            }
            _ => panic!("expected create-invoice"),
        }
    }
}
