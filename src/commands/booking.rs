use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use crate::commands::{print_json, read_overrides};
use crate::dispatch::Dispatcher;
use crate::models::appointment::AppointmentQuery;

pub async fn book(
    dispatcher: &Dispatcher<'_>,
    location_id: Option<&str>,
    name: &str,
    overrides_file: Option<&Path>,
) -> Result<()> {
    let overrides = read_overrides(overrides_file)?;
    let booking = dispatcher
        .book_appointment(location_id, name, overrides)
        .await
        .with_context(|| format!("Failed to book appointment from template '{}'", name))?;
    print_json(&booking)
}

pub async fn list(
    dispatcher: &Dispatcher<'_>,
    location_id: Option<&str>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    include_no_show_cancel: bool,
    therapist_id: Option<String>,
) -> Result<()> {
    let today = Local::now().date_naive();
    let query = AppointmentQuery::new(
        start_date,
        end_date,
        today,
        include_no_show_cancel,
        therapist_id,
    )?;

    let appointments = dispatcher
        .list_appointments(location_id, &query)
        .await
        .context("Failed to list appointments")?;
    print_json(&appointments)
}
