//! Display suitability checks for a single candidate.

use kiosk_core::{AspectRatioBounds, AssetType, Candidate, SelectionConfig};
use thiserror::Error;

/// Why a candidate cannot be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("asset is not an image")]
    WrongType,
    #[error("asset is in the trash")]
    Trashed,
    #[error("asset is archived")]
    Archived,
    #[error("aspect ratio does not fit the viewport")]
    AspectRatio,
}

/// Pure predicate over one candidate and the request's display flags.
#[derive(Debug, Clone, Copy)]
pub struct SuitabilityFilter {
    required_type: AssetType,
    show_archived: bool,
    aspect_ratio: AspectRatioBounds,
}

impl SuitabilityFilter {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            required_type: AssetType::Image,
            show_archived: config.show_archived,
            aspect_ratio: config.aspect_ratio,
        }
    }

    /// First failing check, if any. All checks are independent.
    pub fn check(&self, candidate: &Candidate) -> Result<(), Rejection> {
        if candidate.asset_type != self.required_type {
            return Err(Rejection::WrongType);
        }
        if candidate.is_trashed {
            return Err(Rejection::Trashed);
        }
        if candidate.is_archived && !self.show_archived {
            return Err(Rejection::Archived);
        }
        if !self.ratio_fits(candidate) {
            return Err(Rejection::AspectRatio);
        }
        Ok(())
    }

    pub fn accepts(&self, candidate: &Candidate) -> bool {
        self.check(candidate).is_ok()
    }

    // Without bounds every asset fits; with bounds an unknown ratio does not.
    fn ratio_fits(&self, candidate: &Candidate) -> bool {
        if self.aspect_ratio.is_unbounded() {
            return true;
        }
        candidate
            .aspect_ratio()
            .is_some_and(|ratio| self.aspect_ratio.contains(ratio))
    }
}
