//! Where fixes come from.
//!
//! A [`LocationSource`] answers "which fixes did this group record between
//! these dates". The selection is validated before any source is touched.

pub mod file;
pub mod memory;

pub use file::FileSource;
pub use memory::{Group, MemoryStore};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use crate::core::Fix;
use thiserror::Error;

/// Date format accepted in a selection
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum SourceError {
    /// Group or date range not provided
    #[error("Select a group and a start and end date")]
    MissingSelection,

    #[error("Invalid date {0:?}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// The source could not produce a result
    #[error("Fetching locations failed: {0}")]
    Fetch(String),
}

/// A selection as entered by the user; any part may be missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationQuery {
    pub group_id: Option<u32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A complete, parsed selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub group_id: u32,
    /// Midnight of the start date
    pub start: NaiveDateTime,
    /// Midnight of the end date
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Both bounds are inclusive
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.start <= time && time <= self.end
    }
}

impl LocationQuery {
    pub fn new(group_id: u32, start_date: &str, end_date: &str) -> Self {
        Self {
            group_id: Some(group_id),
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
        }
    }

    pub fn validate(&self) -> Result<DateRange, SourceError> {
        let group_id = self.group_id.filter(|&id| id != 0);
        let start = self.start_date.as_deref().filter(|s| !s.trim().is_empty());
        let end = self.end_date.as_deref().filter(|s| !s.trim().is_empty());

        let (Some(group_id), Some(start), Some(end)) = (group_id, start, end) else {
            return Err(SourceError::MissingSelection);
        };

        Ok(DateRange {
            group_id,
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }
}

fn parse_date(text: &str) -> Result<NaiveDateTime, SourceError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| SourceError::InvalidDate(text.to_string()))
}

/// Provider of fixes for a selection
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Fixes in the range, ordered by timestamp
    async fn fetch(&self, range: &DateRange) -> Result<Vec<Fix>, SourceError>;
}
