use chrono::{Days, NaiveDate};

use crate::error::{Error, Result};

/// Zenoti rejects appointment listings spanning more than a week.
const MAX_WINDOW_DAYS: i64 = 7;

/// Filters for the appointment listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub include_no_show_cancel: bool,
    pub therapist_id: Option<String>,
}

impl AppointmentQuery {
    /// Start defaults to `today`, end to the day after start.
    pub fn new(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        today: NaiveDate,
        include_no_show_cancel: bool,
        therapist_id: Option<String>,
    ) -> Result<Self> {
        let start_date = start_date.unwrap_or(today);
        let end_date = match end_date {
            Some(end) => end,
            None => start_date
                .checked_add_days(Days::new(1))
                .ok_or_else(|| Error::config("start_date is out of range"))?,
        };

        if end_date <= start_date {
            return Err(Error::config("end_date must be after start_date"));
        }
        if (end_date - start_date).num_days() > MAX_WINDOW_DAYS {
            return Err(Error::config(format!(
                "the range between start_date and end_date cannot exceed {} days",
                MAX_WINDOW_DAYS
            )));
        }

        Ok(Self {
            start_date,
            end_date,
            include_no_show_cancel,
            therapist_id,
        })
    }

    pub fn query_pairs(&self, center_id: &str) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("center_id", center_id.to_string()),
            ("start_date", self.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", self.end_date.format("%Y-%m-%d").to_string()),
            (
                "include_no_show_cancel",
                self.include_no_show_cancel.to_string(),
            ),
        ];
        if let Some(therapist_id) = &self.therapist_id {
            pairs.push(("therapist_id", therapist_id.clone()));
        }
        pairs
    }
}
