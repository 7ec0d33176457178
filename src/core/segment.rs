//! Segment geometry: the line between two consecutive fixes, its midpoint,
//! and the rotation of the direction arrow drawn there.

use std::f64::consts::FRAC_PI_2;
use serde::{Deserialize, Serialize};
use crate::core::{Coordinate, Fix};

/// Line connecting two consecutive fixes, with its arrow placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Fix,
    pub to: Fix,
    /// Projected position of `from`
    pub start: Coordinate,
    /// Projected position of `to`
    pub end: Coordinate,
    /// Where the arrow glyph is anchored
    pub midpoint: Coordinate,
    /// Arrow rotation in radians, in the renderer's rotation convention
    pub rotation: f64,
}

impl Segment {
    /// Length of the line in projected units
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Build the segment ending at `curr`
pub fn segment_for(prev: &Fix, curr: &Fix) -> Segment {
    let start = Coordinate::from(prev);
    let end = Coordinate::from(curr);

    Segment {
        from: prev.clone(),
        to: curr.clone(),
        start,
        end,
        midpoint: midpoint(start, end),
        rotation: arrow_rotation(start, end),
    }
}

/// Component-wise mean of two coordinates
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Rotation for an arrow glyph pointing "up" by default so it follows `a -> b`.
///
/// Renderers rotate clockwise, so the travel angle is negated and offset by a
/// quarter turn. A zero-length segment has no direction and gets 0.
pub fn arrow_rotation(a: Coordinate, b: Coordinate) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    -dy.atan2(dx) + FRAC_PI_2
}
