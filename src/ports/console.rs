use crate::core::{Coordinate, Extent, Fix, Segment};
use crate::ports::{CameraPort, RenderPort, Scene, TimelinePort};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Render port that keeps features in a [`Scene`] and logs each command
#[derive(Debug, Default)]
pub struct ConsoleRender {
    scene: Scene,
}

impl ConsoleRender {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl RenderPort for ConsoleRender {
    fn add_point(&self, fix: &Fix) {
        debug!(
            timestamp = %fix.timestamp,
            lat = fix.latitude,
            lon = fix.longitude,
            "add point"
        );
        self.scene.add_point(fix);
    }

    fn add_segment(&self, segment: &Segment) {
        debug!(
            from = %segment.from.timestamp,
            to = %segment.to.timestamp,
            rotation = segment.rotation,
            length_m = segment.length(),
            degenerate = segment.is_degenerate(),
            "add segment"
        );
        self.scene.add_segment(segment);
    }

    fn clear_all(&self) {
        debug!("clear map layer");
        self.scene.clear_all();
    }
}

/// Timeline printed to stdout, one line per entry.
///
/// A terminal always shows the newest line, which gives the auto-scroll
/// behaviour for free.
#[derive(Debug, Default)]
pub struct ConsoleTimeline {
    entries: AtomicUsize,
}

impl ConsoleTimeline {
    pub fn len(&self) -> usize {
        self.entries.load(Ordering::SeqCst)
    }
}

impl TimelinePort for ConsoleTimeline {
    fn append_entry(&self, timestamp: &str) {
        let n = self.entries.fetch_add(1, Ordering::SeqCst) + 1;
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{:>4}  {}", n, timestamp);
        let _ = out.flush();
    }

    fn clear(&self) {
        self.entries.store(0, Ordering::SeqCst);
    }
}

/// Camera that reports viewport moves as log events
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleCamera;

impl CameraPort for ConsoleCamera {
    fn center_on(&self, center: Coordinate, duration_ms: u64) {
        debug!(x = center.x, y = center.y, duration_ms, "center on");
    }

    fn fit_to_bounds(&self, extent: Extent, padding_px: u32, duration_ms: u64) {
        let center = extent.center();
        info!(
            center_x = center.x,
            center_y = center.y,
            width_m = extent.width(),
            height_m = extent.height(),
            padding_px,
            duration_ms,
            "fit to path bounds"
        );
    }
}
