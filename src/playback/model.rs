use crate::core::Fix;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Cannot play back an empty path")]
    EmptyPath,

    /// Advancing past the last fix. A caller bug, never user-facing.
    #[error("Path already fully revealed ({len} fixes)")]
    Exhausted { len: usize },
}

/// The fixes of one playback session and how many have been revealed
#[derive(Debug, Clone)]
pub struct PathModel {
    fixes: Vec<Fix>,
    revealed: usize,
}

impl PathModel {
    pub fn new(fixes: Vec<Fix>) -> Result<Self, PathError> {
        if fixes.is_empty() {
            return Err(PathError::EmptyPath);
        }
        Ok(Self { fixes, revealed: 0 })
    }

    /// Reveal the next fix
    pub fn advance(&mut self) -> Result<&Fix, PathError> {
        let fix = self.fixes.get(self.revealed).ok_or(PathError::Exhausted {
            len: self.fixes.len(),
        })?;
        self.revealed += 1;
        Ok(fix)
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.fixes.len()
    }

    /// The fix revealed just before the latest one
    pub fn previous_fix(&self) -> Option<&Fix> {
        self.revealed.checked_sub(2).map(|i| &self.fixes[i])
    }

    /// The most recently revealed fix
    pub fn current_fix(&self) -> Option<&Fix> {
        self.revealed.checked_sub(1).map(|i| &self.fixes[i])
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn revealed(&self) -> &[Fix] {
        &self.fixes[..self.revealed]
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }
}
