//! Ties a selection, a location source and the playback supervisor together.

use crate::playback::{PlaybackError, SessionSupervisor};
use crate::source::{LocationQuery, LocationSource, SourceError};
use thiserror::Error;
use tracing::{info, warn};

/// Anything that stops a replay from starting. Each is shown to the user.
#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// Blocking, user-facing notification
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Notifier that writes to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("[pathplay] {}", message);
    }
}

/// Validate the selection, fetch its fixes and start playing them.
///
/// Every failure is reported through `notifier` and leaves the map and the
/// timeline cleared with nothing playing.
pub async fn replay(
    source: &dyn LocationSource,
    query: &LocationQuery,
    supervisor: &mut SessionSupervisor,
    notifier: &dyn Notifier,
) -> Result<(), ReplayError> {
    let result = start_replay(source, query, supervisor).await;
    if let Err(e) = &result {
        warn!(error = %e, "replay not started");
        notifier.alert(&e.to_string());
    }
    result
}

async fn start_replay(
    source: &dyn LocationSource,
    query: &LocationQuery,
    supervisor: &mut SessionSupervisor,
) -> Result<(), ReplayError> {
    let range = query.validate()?;

    let fixes = match source.fetch(&range).await {
        Ok(fixes) => fixes,
        Err(e) => {
            supervisor.reset();
            return Err(e.into());
        }
    };

    info!(group = range.group_id, count = fixes.len(), "fetched fixes");
    supervisor.request_playback(fixes)?;
    Ok(())
}
