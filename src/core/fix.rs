use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;

/// Timestamp format used on the wire and in the timeline
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One timestamped latitude/longitude observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// Opaque timestamp text, shown as-is in the timeline
    pub timestamp: String,

    /// Latitude in degrees (WGS84)
    pub latitude: f64,

    /// Longitude in degrees (WGS84)
    pub longitude: f64,
}

impl Fix {
    /// Create a new fix
    pub fn new(timestamp: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            latitude,
            longitude,
        }
    }

    /// Create a fix from a parsed timestamp, formatted for the wire
    pub fn at(time: NaiveDateTime, latitude: f64, longitude: f64) -> Self {
        Self::new(time.format(TIMESTAMP_FORMAT).to_string(), latitude, longitude)
    }

    /// Parse the timestamp, if it is in the wire format
    pub fn parsed_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}
