//! Utility functions shared across the import and repository layers.

use chrono::{Datelike, NaiveDateTime};

/// Derive the weekly batch key for a timestamp.
///
/// Keys use the zero-padded ISO year-week form, e.g. `2025-W36`. The ISO
/// year can differ from the calendar year around January 1st.
#[must_use]
pub fn week_key_for(date: NaiveDateTime) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// First whitespace-delimited token of a cell, or the empty string.
#[must_use]
pub fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}
