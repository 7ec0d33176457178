use async_trait::async_trait;
use crate::core::Fix;
use crate::input::load_file;
use crate::source::{DateRange, LocationSource, SourceError};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Fixes read from a JSON or CSV export.
///
/// Exports hold a single path, so the group id is ignored. Only the date
/// range filters; fixes whose timestamp cannot be parsed are dropped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LocationSource for FileSource {
    async fn fetch(&self, range: &DateRange) -> Result<Vec<Fix>, SourceError> {
        let path = self.path.clone();
        let fixes = tokio::task::spawn_blocking(move || load_file(&path))
            .await
            .map_err(|e| SourceError::Fetch(e.to_string()))?
            .map_err(|e| SourceError::Fetch(format!("{:#}", e)))?;

        let total = fixes.len();
        let mut kept: Vec<(chrono::NaiveDateTime, Fix)> = fixes
            .into_iter()
            .filter_map(|fix| match fix.parsed_time() {
                Some(time) => Some((time, fix)),
                None => {
                    warn!(timestamp = %fix.timestamp, "skipping fix with unreadable timestamp");
                    None
                }
            })
            .filter(|(time, _)| range.contains(*time))
            .collect();
        // stable, so equal timestamps keep file order
        kept.sort_by_key(|(time, _)| *time);

        debug!(path = %self.path.display(), total, kept = kept.len(), "loaded file source");
        Ok(kept.into_iter().map(|(_, fix)| fix).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LocationQuery;

    #[tokio::test]
    async fn test_file_source_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.csv");
        std::fs::write(
            &path,
            "timestamp,latitude,longitude\n\
             2025-07-18 12:00:00,28.5827,77.2188\n\
             2025-07-17 10:00:00,28.5355,77.2244\n\
             2025-08-01 10:00:00,0.0,0.0\n\
             sometime,1.0,1.0\n",
        )
        .unwrap();

        let range = LocationQuery::new(1, "2025-07-17", "2025-07-19").validate().unwrap();
        let fixes = FileSource::new(&path).fetch(&range).await.unwrap();
        let stamps: Vec<&str> = fixes.iter().map(|f| f.timestamp.as_str()).collect();
        assert_eq!(stamps, vec!["2025-07-17 10:00:00", "2025-07-18 12:00:00"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let range = LocationQuery::new(1, "2025-07-17", "2025-07-19").validate().unwrap();
        let err = FileSource::new("/nonexistent/trip.json").fetch(&range).await.unwrap_err();
        assert!(matches!(err, SourceError::Fetch(_)));
    }
}
