//! Projected map coordinates.
//!
//! The map works in spherical Web Mercator (EPSG:3857). Everything the
//! renderer and camera see is in this space, never raw degrees.

use serde::{Deserialize, Serialize};
use crate::core::Fix;

/// Earth radius used by spherical Web Mercator, in meters
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator square
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// A point in projected map space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Project a longitude/latitude pair in degrees
    pub fn from_lon_lat(longitude: f64, latitude: f64) -> Self {
        let lat = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = EARTH_RADIUS * longitude.to_radians();
        let y = EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();
        Self { x, y }
    }

    pub fn distance(&self, other: &Coordinate) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<&Fix> for Coordinate {
    fn from(fix: &Fix) -> Self {
        Coordinate::from_lon_lat(fix.longitude, fix.latitude)
    }
}

/// Axis-aligned bounding box in projected space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// Smallest extent containing every coordinate, or `None` if there are none
    pub fn from_coordinates<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = coordinates.into_iter();
        let first = iter.next()?;
        let mut extent = Extent {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for c in iter {
            extent.min_x = extent.min_x.min(c.x);
            extent.min_y = extent.min_y.min(c.y);
            extent.max_x = extent.max_x.max(c.x);
            extent.max_y = extent.max_y.max(c.y);
        }
        Some(extent)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}
