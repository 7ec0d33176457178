//! In-memory render surface.
//!
//! Keeps the features a map layer would hold so they can be inspected and
//! hit-tested without a real map widget.

use crate::core::{Coordinate, Fix, Segment};
use crate::ports::RenderPort;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// RGBA color
pub type Rgba = [u8; 4];

/// Style of a fix marker: a filled circle with a contrasting border
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub radius_px: f64,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width_px: f64,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            radius_px: 6.0,
            fill: [0xFF, 0x33, 0x33, 0xFF],
            stroke: [0xFF, 0xFF, 0xFF, 0xFF],
            stroke_width_px: 2.0,
        }
    }
}

/// Style of a segment: a dashed line with an arrow glyph at the midpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub color: Rgba,
    pub width_px: f64,
    /// Dash and gap lengths
    pub dash_px: [f64; 2],
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            color: [0x00, 0x55, 0xFF, 0xFF],
            width_px: 2.0,
            dash_px: [6.0, 6.0],
        }
    }
}

/// A feature on the layer
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Point {
        coordinate: Coordinate,
        timestamp: String,
    },
    Segment {
        start: Coordinate,
        end: Coordinate,
        arrow_at: Coordinate,
        arrow_rotation: f64,
    },
}

/// Vector layer holding point and segment features
#[derive(Debug, Default)]
pub struct Scene {
    features: Mutex<Vec<Feature>>,
    pub point_style: PointStyle,
    pub segment_style: SegmentStyle,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn features(&self) -> MutexGuard<'_, Vec<Feature>> {
        self.features.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every feature, in insertion order
    pub fn snapshot(&self) -> Vec<Feature> {
        self.features().clone()
    }

    pub fn point_count(&self) -> usize {
        self.features()
            .iter()
            .filter(|f| matches!(f, Feature::Point { .. }))
            .count()
    }

    pub fn segment_count(&self) -> usize {
        self.features()
            .iter()
            .filter(|f| matches!(f, Feature::Segment { .. }))
            .count()
    }

    /// Timestamp of the point nearest to `at`, if one lies within `tolerance`.
    ///
    /// This is the click lookup: selecting a marker shows when it was recorded.
    pub fn feature_at(&self, at: Coordinate, tolerance: f64) -> Option<String> {
        self.features()
            .iter()
            .filter_map(|f| match f {
                Feature::Point { coordinate, timestamp } => {
                    Some((coordinate.distance(&at), timestamp))
                }
                Feature::Segment { .. } => None,
            })
            .filter(|(d, _)| *d <= tolerance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, ts)| ts.clone())
    }
}

impl RenderPort for Scene {
    fn add_point(&self, fix: &Fix) {
        self.features().push(Feature::Point {
            coordinate: Coordinate::from(fix),
            timestamp: fix.timestamp.clone(),
        });
    }

    fn add_segment(&self, segment: &Segment) {
        self.features().push(Feature::Segment {
            start: segment.start,
            end: segment.end,
            arrow_at: segment.midpoint,
            arrow_rotation: segment.rotation,
        });
    }

    fn clear_all(&self) {
        self.features().clear();
    }
}
