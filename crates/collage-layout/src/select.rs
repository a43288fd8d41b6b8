//! Layout selection strategies
//!
//! The search ranks every feasible arrangement; a [`LayoutSelector`] decides
//! which one is rendered. Automatic and manual choices share the same seam.

use crate::layout::{LayoutCandidate, LayoutKind};
use crate::types::{CollageError, Result};

/// Picks one arrangement from a ranked, non-empty candidate list
pub trait LayoutSelector: Send + Sync {
    /// Return the position of the chosen candidate in `candidates`
    fn select(&self, candidates: &[LayoutCandidate]) -> Result<usize>;
}

/// Take the best-scored arrangement
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestScore;

impl LayoutSelector for HighestScore {
    fn select(&self, candidates: &[LayoutCandidate]) -> Result<usize> {
        if candidates.is_empty() {
            return Err(CollageError::NoFeasibleLayout);
        }
        Ok(0)
    }
}

/// Force a specific arrangement
#[derive(Debug, Clone, Copy)]
pub struct PreferredLayout(pub LayoutKind);

impl LayoutSelector for PreferredLayout {
    fn select(&self, candidates: &[LayoutCandidate]) -> Result<usize> {
        candidates
            .iter()
            .position(|c| c.kind == self.0)
            .ok_or(CollageError::LayoutUnavailable(self.0))
    }
}

impl<F> LayoutSelector for F
where
    F: Fn(&[LayoutCandidate]) -> Result<usize> + Send + Sync,
{
    fn select(&self, candidates: &[LayoutCandidate]) -> Result<usize> {
        self(candidates)
    }
}
