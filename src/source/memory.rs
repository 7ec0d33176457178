use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::{fix::TIMESTAMP_FORMAT, Fix};
use crate::source::{DateRange, LocationSource, SourceError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A tracked group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone)]
struct Location {
    group_id: u32,
    latitude: f64,
    longitude: f64,
    timestamp: NaiveDateTime,
}

/// In-memory store of groups and their timestamped locations
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    groups: Vec<Group>,
    locations: Vec<Location>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo groups and their paths
    pub fn sample() -> Self {
        let mut store = Self::new();
        for (id, name) in ["Group Alpha", "Group Bravo", "Group Charlie", "Group Delta", "Group Echo"]
            .into_iter()
            .enumerate()
        {
            store.add_group(id as u32 + 1, name);
        }

        let seed: [(u32, f64, f64, &str); 15] = [
            (1, 28.6139, 76.2090, "2025-07-15 09:00:00"),
            (1, 28.6304, 77.2177, "2025-07-15 11:30:00"),
            (1, 28.5245, 77.1855, "2025-07-16 14:00:00"),
            (1, 29.5245, 78.1855, "2025-07-17 14:00:00"),
            (1, 30.5245, 79.1855, "2025-07-18 14:00:00"),
            (1, 31.5245, 80.1855, "2025-07-19 14:00:00"),
            (1, 28.5245, 77.1855, "2025-07-20 14:00:00"),
            (2, 28.5355, 77.2244, "2025-07-17 10:00:00"),
            (2, 28.5827, 77.2188, "2025-07-18 12:00:00"),
            (3, 28.6562, 77.2410, "2025-07-19 08:00:00"),
            (3, 28.6791, 77.2294, "2025-07-19 15:00:00"),
            (4, 28.7041, 77.1025, "2025-07-20 11:00:00"),
            (4, 28.6981, 77.1105, "2025-07-20 13:00:00"),
            (5, 28.4595, 77.0266, "2025-07-16 18:00:00"),
            (5, 28.4715, 77.0306, "2025-07-17 19:00:00"),
        ];
        for (group_id, lat, lon, time) in seed {
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(time, TIMESTAMP_FORMAT) {
                store.add_location(group_id, lat, lon, timestamp);
            }
        }
        store
    }

    pub fn add_group(&mut self, id: u32, name: &str) {
        self.groups.push(Group {
            id,
            name: name.to_string(),
        });
    }

    pub fn add_location(&mut self, group_id: u32, latitude: f64, longitude: f64, timestamp: NaiveDateTime) {
        self.locations.push(Location {
            group_id,
            latitude,
            longitude,
            timestamp,
        });
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: u32) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Locations of a group inside the range, oldest first
    pub fn query(&self, range: &DateRange) -> Vec<Fix> {
        let mut matching: Vec<&Location> = self
            .locations
            .iter()
            .filter(|l| l.group_id == range.group_id && range.contains(l.timestamp))
            .collect();
        matching.sort_by_key(|l| l.timestamp);

        matching
            .into_iter()
            .map(|l| Fix::at(l.timestamp, l.latitude, l.longitude))
            .collect()
    }
}

#[async_trait]
impl LocationSource for MemoryStore {
    async fn fetch(&self, range: &DateRange) -> Result<Vec<Fix>, SourceError> {
        let fixes = self.query(range);
        debug!(group = range.group_id, count = fixes.len(), "queried memory store");
        Ok(fixes)
    }
}
