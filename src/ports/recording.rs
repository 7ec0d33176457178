//! Port doubles that record every command, for playback tests.

use crate::core::{Coordinate, Extent, Fix, Segment};
use crate::ports::{CameraPort, Ports, RenderPort, TimelinePort};
use std::sync::{Arc, Mutex};

/// One command issued through any of the ports
#[derive(Debug, Clone, PartialEq)]
pub enum PortCall {
    AddPoint(Fix),
    AddSegment(Segment),
    ClearAll,
    AppendEntry(String),
    ClearTimeline,
    CenterOn(Coordinate, u64),
    FitToBounds(Extent, u32, u64),
}

impl PortCall {
    pub fn is_clear(&self) -> bool {
        matches!(self, PortCall::ClearAll | PortCall::ClearTimeline)
    }
}

/// Records calls from all three ports into one ordered log
#[derive(Debug, Default, Clone)]
pub struct RecordingPorts {
    calls: Arc<Mutex<Vec<PortCall>>>,
}

impl RecordingPorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle this recorder as all three ports
    pub fn ports(&self) -> Ports {
        Ports::new(
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            Arc::new(self.clone()),
        )
    }

    fn push(&self, call: PortCall) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<PortCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Take all recorded calls, leaving the log empty
    pub fn take_calls(&self) -> Vec<PortCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn points(&self) -> Vec<Fix> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                PortCall::AddPoint(fix) => Some(fix),
                _ => None,
            })
            .collect()
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                PortCall::AddSegment(seg) => Some(seg),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&PortCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }
}

impl RenderPort for RecordingPorts {
    fn add_point(&self, fix: &Fix) {
        self.push(PortCall::AddPoint(fix.clone()));
    }

    fn add_segment(&self, segment: &Segment) {
        self.push(PortCall::AddSegment(segment.clone()));
    }

    fn clear_all(&self) {
        self.push(PortCall::ClearAll);
    }
}

impl TimelinePort for RecordingPorts {
    fn append_entry(&self, timestamp: &str) {
        self.push(PortCall::AppendEntry(timestamp.to_string()));
    }

    fn clear(&self) {
        self.push(PortCall::ClearTimeline);
    }
}

impl CameraPort for RecordingPorts {
    fn center_on(&self, center: Coordinate, duration_ms: u64) {
        self.push(PortCall::CenterOn(center, duration_ms));
    }

    fn fit_to_bounds(&self, extent: Extent, padding_px: u32, duration_ms: u64) {
        self.push(PortCall::FitToBounds(extent, padding_px, duration_ms));
    }
}
