use anyhow::{Context, Result};
use crate::core::Fix;

/// Load fixes from CSV data
///
/// Supports flexible column names:
/// - timestamp,latitude,longitude
/// - time,lat,lon
/// - ts,lat,lng
///
/// Rows are kept in file order; timestamps are taken verbatim.
pub fn load_csv(data: &[u8]) -> Result<Vec<Fix>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(data);

    let headers = rdr.headers()?;
    let (time_idx, lat_idx, lon_idx) = detect_columns(headers)?;

    let mut fixes = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result.context("Failed to read CSV row")?;

        let timestamp = record.get(time_idx).context("Missing timestamp column")?;
        let latitude = parse_degrees(record.get(lat_idx), -90.0..=90.0)
            .with_context(|| format!("Bad latitude on row {}", row + 1))?;
        let longitude = parse_degrees(record.get(lon_idx), -180.0..=180.0)
            .with_context(|| format!("Bad longitude on row {}", row + 1))?;

        fixes.push(Fix::new(timestamp, latitude, longitude));
    }

    Ok(fixes)
}

fn parse_degrees(field: Option<&str>, range: std::ops::RangeInclusive<f64>) -> Result<f64> {
    let value: f64 = field.context("Missing column")?.parse()?;
    if !range.contains(&value) {
        anyhow::bail!("{} is outside {:?}", value, range);
    }
    Ok(value)
}

/// Detect column indices from CSV headers
fn detect_columns(headers: &csv::StringRecord) -> Result<(usize, usize, usize)> {
    let time_idx = find_column(headers, &["timestamp", "time", "ts", "t"])?;
    let lat_idx = find_column(headers, &["latitude", "lat"])?;
    let lon_idx = find_column(headers, &["longitude", "lon", "lng", "long"])?;

    Ok((time_idx, lat_idx, lon_idx))
}

/// Find a column by checking possible names
fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Result<usize> {
    for (idx, header) in headers.iter().enumerate() {
        let header_lower = header.to_lowercase();
        if names.iter().any(|&name| header_lower == name) {
            return Ok(idx);
        }
    }

    anyhow::bail!("Could not find column with names: {:?}", names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_csv_any_column_order() {
        let data = b"Lon, Lat, Timestamp\n77.2244, 28.5355, 2025-07-17 10:00:00\n77.2188, 28.5827, 2025-07-18 12:00:00\n";
        let fixes = load_csv(data).unwrap();
        assert_eq!(
            fixes,
            vec![
                Fix::new("2025-07-17 10:00:00", 28.5355, 77.2244),
                Fix::new("2025-07-18 12:00:00", 28.5827, 77.2188),
            ]
        );
    }

    #[test]
    fn test_load_csv_errors() {
        assert!(load_csv(b"when,where\n1,2\n").is_err());
        assert!(load_csv(b"time,lat,lon\n2025-07-17 10:00:00,91.0,0.0\n").is_err());
        assert!(load_csv(b"time,lat,lon\n2025-07-17 10:00:00,north,0.0\n").is_err());
    }
}
