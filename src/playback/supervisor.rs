//! Owner of the single live playback session.

use crate::core::Fix;
use crate::playback::{PathModel, PlaybackConfig, PlaybackController, PlaybackError, PlaybackState};
use crate::ports::Ports;
use tracing::{info, warn};

/// Accepts playback requests and makes sure at most one session plays.
///
/// A new request supersedes the previous one: the old session is cancelled,
/// the ports are cleared, and a fresh session starts.
pub struct SessionSupervisor {
    ports: Ports,
    config: PlaybackConfig,
    current: Option<PlaybackController>,
}

impl SessionSupervisor {
    pub fn new(ports: Ports, config: PlaybackConfig) -> Self {
        Self {
            ports,
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Replace whatever is playing with a replay of `fixes`
    pub fn request_playback(&mut self, fixes: Vec<Fix>) -> Result<(), PlaybackError> {
        self.reset();

        if fixes.is_empty() {
            warn!("playback requested with no fixes");
            return Err(PlaybackError::EmptyResult);
        }

        let model = PathModel::new(fixes)?;
        let mut controller = PlaybackController::new(model, self.ports.clone(), self.config.clone());
        controller.start()?;
        self.current = Some(controller);
        Ok(())
    }

    /// Cancel the live session, if any. Returns whether one was playing.
    pub fn cancel(&mut self) -> bool {
        match self.current.as_mut() {
            Some(controller) if controller.is_playing() => controller.cancel().is_ok(),
            _ => false,
        }
    }

    /// Cancel the live session and clear the map and timeline
    pub fn reset(&mut self) {
        if self.cancel() {
            info!("superseded live playback session");
        }
        self.current = None;
        self.ports.clear();
    }

    /// State of the most recent session, if there is one
    pub fn state(&self) -> Option<PlaybackState> {
        self.current.as_ref().map(PlaybackController::state)
    }

    pub fn revealed_count(&self) -> usize {
        self.current.as_ref().map_or(0, PlaybackController::revealed_count)
    }

    /// Wait until the current session completes or is cancelled
    pub async fn wait(&mut self) {
        if let Some(controller) = self.current.as_mut() {
            controller.finished().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PortCall, RecordingPorts};
    use std::time::Duration;
    use tokio::time;

    const TICK_MS: u64 = 2000;

    fn path(tag: &str, n: usize) -> Vec<Fix> {
        (0..n)
            .map(|i| Fix::new(format!("{}-{}", tag, i), 28.0 + i as f64 * 0.05, 77.0 - i as f64 * 0.05))
            .collect()
    }

    fn supervisor(recorder: &RecordingPorts) -> SessionSupervisor {
        SessionSupervisor::new(recorder.ports(), PlaybackConfig::default())
    }

    async fn wait_ticks(ticks: u64) {
        time::sleep(Duration::from_millis(ticks * TICK_MS + TICK_MS / 2)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_plays_to_completion() {
        let recorder = RecordingPorts::new();
        let mut sup = supervisor(&recorder);

        sup.request_playback(path("a", 4)).unwrap();
        assert_eq!(sup.state(), Some(PlaybackState::Playing));
        sup.wait().await;

        assert_eq!(sup.state(), Some(PlaybackState::Completed));
        let calls = recorder.calls();
        assert_eq!(calls[0], PortCall::ClearAll);
        assert_eq!(calls[1], PortCall::ClearTimeline);
        assert_eq!(recorder.points().len(), 4);
        assert_eq!(recorder.segments().len(), 3);
        assert_eq!(recorder.count(|c| matches!(c, PortCall::AppendEntry(_))), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_request_supersedes_first() {
        let recorder = RecordingPorts::new();
        let mut sup = supervisor(&recorder);

        sup.request_playback(path("first", 10)).unwrap();
        wait_ticks(3).await;
        assert_eq!(sup.revealed_count(), 3);

        sup.request_playback(path("second", 5)).unwrap();
        sup.wait().await;
        // let any stray ticks of the first session come due
        wait_ticks(10).await;

        let calls = recorder.calls();
        let clears: Vec<usize> = calls
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_clear())
            .map(|(i, _)| i)
            .collect();
        // one pair per request, nothing in between
        assert_eq!(clears.len(), 4);
        assert_eq!(calls[clears[2]], PortCall::ClearAll);
        assert_eq!(calls[clears[3]], PortCall::ClearTimeline);
        assert_eq!(clears[3], clears[2] + 1);

        let after: Vec<&PortCall> = calls[clears[3] + 1..].iter().collect();
        let points: Vec<&Fix> = after
            .iter()
            .filter_map(|c| match c {
                PortCall::AddPoint(fix) => Some(fix),
                _ => None,
            })
            .collect();
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|f| f.timestamp.starts_with("second")));
        let segments = after.iter().filter(|c| matches!(c, PortCall::AddSegment(_))).count();
        assert_eq!(segments, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_requests_leave_one_session() {
        let recorder = RecordingPorts::new();
        let mut sup = supervisor(&recorder);

        for i in 0..5 {
            sup.request_playback(path(&format!("r{}", i), 3)).unwrap();
        }
        sup.wait().await;
        wait_ticks(5).await;

        let points = recorder.points();
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|f| f.timestamp.starts_with("r4")));
        assert_eq!(recorder.count(|c| matches!(c, PortCall::FitToBounds(..))), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_request_reports_no_data() {
        let recorder = RecordingPorts::new();
        let mut sup = supervisor(&recorder);

        assert_eq!(sup.request_playback(Vec::new()).unwrap_err(), PlaybackError::EmptyResult);
        assert!(sup.state().is_none());

        wait_ticks(3).await;
        assert_eq!(recorder.calls(), vec![PortCall::ClearAll, PortCall::ClearTimeline]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_request_stops_live_session() {
        let recorder = RecordingPorts::new();
        let mut sup = supervisor(&recorder);

        sup.request_playback(path("a", 6)).unwrap();
        wait_ticks(2).await;
        assert!(sup.request_playback(Vec::new()).is_err());
        recorder.take_calls();

        wait_ticks(6).await;
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let recorder = RecordingPorts::new();
        let mut sup = supervisor(&recorder);
        assert!(!sup.cancel());

        sup.request_playback(path("a", 6)).unwrap();
        wait_ticks(1).await;
        assert!(sup.cancel());
        assert_eq!(sup.state(), Some(PlaybackState::Cancelled));
        assert!(!sup.cancel());

        let before = recorder.calls().len();
        wait_ticks(6).await;
        assert_eq!(recorder.calls().len(), before);
    }
}
