pub mod fix;
pub mod geo;
pub mod segment;

pub use fix::Fix;
pub use geo::{Coordinate, Extent};
pub use segment::{segment_for, Segment};
