pub mod csv;
pub mod json;

pub use self::csv::load_csv;
pub use self::json::load_json;

use anyhow::Result;
use crate::core::Fix;
use std::path::Path;

/// Input format detection result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputFormat {
    Json,
    Csv,
    Unknown,
}

/// Detect the format of an input file by looking at its first bytes
pub fn detect_format(data: &[u8]) -> InputFormat {
    if is_json(data) {
        return InputFormat::Json;
    }

    if is_csv(data) {
        return InputFormat::Csv;
    }

    InputFormat::Unknown
}

fn is_json(data: &[u8]) -> bool {
    // location exports are a top-level array
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'[')
}

fn is_csv(data: &[u8]) -> bool {
    let sample = std::str::from_utf8(&data[..data.len().min(500)]);
    match sample {
        // a header plus rows with at least lat, lon and time
        Ok(text) => text
            .lines()
            .take(5)
            .any(|line| line.chars().filter(|&c| c == ',').count() >= 2),
        Err(_) => false,
    }
}

/// Load fixes from a file, auto-detecting format
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Fix>> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;

    match detect_format(&data) {
        InputFormat::Json => load_json(&data),
        InputFormat::Csv => load_csv(&data),
        InputFormat::Unknown => anyhow::bail!("Unknown input format: {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(b"  \n[{\"latitude\": 1}]"), InputFormat::Json);
        assert_eq!(detect_format(b"timestamp,lat,lon\n2025-07-15 09:00:00,1,2\n"), InputFormat::Csv);
        assert_eq!(detect_format(b"hello"), InputFormat::Unknown);
        assert_eq!(detect_format(&[0xFF, 0xFE, 0x00]), InputFormat::Unknown);
    }

    #[test]
    fn test_load_file_by_content() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("path.dat");
        std::fs::write(
            &json,
            r#"[{"latitude": 28.5355, "longitude": 77.2244, "timestamp": "2025-07-17 10:00:00"}]"#,
        )
        .unwrap();
        assert_eq!(load_file(&json).unwrap().len(), 1);

        let csv = dir.path().join("path.txt");
        std::fs::write(&csv, "time,lat,lng\n2025-07-17 10:00:00,28.5355,77.2244\n").unwrap();
        assert_eq!(load_file(&csv).unwrap()[0].longitude, 77.2244);

        let junk = dir.path().join("junk");
        std::fs::write(&junk, "nothing here").unwrap();
        assert!(load_file(&junk).is_err());
    }
}
