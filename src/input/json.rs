use anyhow::{Context, Result};
use crate::core::Fix;

/// Parse fixes from the location endpoint's JSON wire format:
/// an array of `{ latitude, longitude, timestamp }` objects
pub fn load_json(data: &[u8]) -> Result<Vec<Fix>> {
    serde_json::from_slice(data).context("Failed to parse location JSON")
}
