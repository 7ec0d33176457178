//! Output ports through which playback drives the outside world.
//!
//! The playback engine never talks to a concrete map library. It issues
//! commands through these three capability traits:
//! - [`RenderPort`]: point markers and segment arrows on the map
//! - [`TimelinePort`]: the textual list of visited timestamps
//! - [`CameraPort`]: panning and fitting the viewport
//!
//! All calls are synchronous and fire-and-forget.

pub mod console;
#[cfg(test)]
pub mod recording;
pub mod scene;

pub use console::{ConsoleCamera, ConsoleRender, ConsoleTimeline};
#[cfg(test)]
pub use recording::{PortCall, RecordingPorts};
pub use scene::Scene;

use crate::core::{Coordinate, Extent, Fix, Segment};
use std::sync::Arc;

/// Render surface for point markers and segment arrows
pub trait RenderPort: Send + Sync {
    /// Draw a marker at the fix, keeping its timestamp as metadata
    fn add_point(&self, fix: &Fix);

    /// Draw a dashed line plus a rotated arrow at the midpoint
    fn add_segment(&self, segment: &Segment);

    /// Remove every point and segment
    fn clear_all(&self);
}

/// Timeline list of visited timestamps
pub trait TimelinePort: Send + Sync {
    /// Append an entry; the newest entry must be scrolled into view
    fn append_entry(&self, timestamp: &str);

    fn clear(&self);
}

/// Map viewport control
pub trait CameraPort: Send + Sync {
    /// Animated pan to `center`, keeping the current zoom
    fn center_on(&self, center: Coordinate, duration_ms: u64);

    /// Animated fit of the view to `extent`
    fn fit_to_bounds(&self, extent: Extent, padding_px: u32, duration_ms: u64);
}

/// The three output ports, shared between the supervisor and a live session
#[derive(Clone)]
pub struct Ports {
    pub render: Arc<dyn RenderPort>,
    pub timeline: Arc<dyn TimelinePort>,
    pub camera: Arc<dyn CameraPort>,
}

impl Ports {
    pub fn new(
        render: Arc<dyn RenderPort>,
        timeline: Arc<dyn TimelinePort>,
        camera: Arc<dyn CameraPort>,
    ) -> Self {
        Self { render, timeline, camera }
    }

    /// Ports that write to the terminal
    pub fn console() -> Self {
        Self::new(
            Arc::new(ConsoleRender::default()),
            Arc::new(ConsoleTimeline::default()),
            Arc::new(ConsoleCamera),
        )
    }

    /// Reset the map layer and the timeline list
    pub fn clear(&self) {
        self.render.clear_all();
        self.timeline.clear();
    }
}
