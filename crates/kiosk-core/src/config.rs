//! Per-request selection configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the flags one selection call reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Allow archived assets to be displayed.
    #[serde(default)]
    pub show_archived: bool,
    /// Keep the unused remainder of a fetched batch for later requests.
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
    /// Number of assets requested from the server per fetch.
    #[serde(default = "default_fetch_size")]
    pub fetch_size: u32,
    /// Maximum number of fetch attempts per selection.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Acceptable width/height ratio for the requesting viewport.
    #[serde(default)]
    pub aspect_ratio: AspectRatioBounds,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_fetch_size() -> u32 {
    1000
}

fn default_max_retries() -> u32 {
    3
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            show_archived: false,
            cache_enabled: default_cache_enabled(),
            fetch_size: default_fetch_size(),
            max_retries: default_max_retries(),
            aspect_ratio: AspectRatioBounds::default(),
        }
    }
}

impl SelectionConfig {
    pub fn with_show_archived(mut self, show: bool) -> Self {
        self.show_archived = show;
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn with_fetch_size(mut self, size: u32) -> Self {
        self.fetch_size = size;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_aspect_ratio(mut self, bounds: AspectRatioBounds) -> Self {
        self.aspect_ratio = bounds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch_size == 0 {
            return Err(Error::InvalidConfig("fetch_size must be at least 1".into()));
        }
        if self.max_retries == 0 {
            return Err(Error::InvalidConfig("max_retries must be at least 1".into()));
        }
        self.aspect_ratio.validate()
    }
}

/// Viewport orientation a display asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Any,
    Portrait,
    Landscape,
}

/// Inclusive bounds on width / height. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AspectRatioBounds {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl AspectRatioBounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn for_orientation(orientation: Orientation) -> Self {
        // Square images belong to neither orientation.
        match orientation {
            Orientation::Any => Self::default(),
            Orientation::Portrait => Self::new(None, Some(1.0 - f64::EPSILON)),
            Orientation::Landscape => Self::new(Some(1.0 + f64::EPSILON), None),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, ratio: f64) -> bool {
        self.min.is_none_or(|min| ratio >= min) && self.max.is_none_or(|max| ratio <= max)
    }

    pub fn validate(&self) -> Result<()> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "aspect ratio bound must be a non-negative number, got {}",
                    bound
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(Error::InvalidConfig(format!(
                "aspect ratio min {} exceeds max {}",
                min, max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SelectionConfig::default();
        assert!(!config.show_archived);
        assert!(config.cache_enabled);
        assert_eq!(config.fetch_size, 1000);
        assert_eq!(config.max_retries, 3);
        assert!(config.aspect_ratio.is_unbounded());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: SelectionConfig = serde_json::from_str(r#"{"show_archived": true}"#).unwrap();
        assert!(config.show_archived);
        assert!(config.cache_enabled);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_orientation_bounds() {
        let portrait = AspectRatioBounds::for_orientation(Orientation::Portrait);
        assert!(portrait.contains(0.75));
        assert!(!portrait.contains(1.0));
        assert!(!portrait.contains(1.5));

        let landscape = AspectRatioBounds::for_orientation(Orientation::Landscape);
        assert!(landscape.contains(1.5));
        assert!(!landscape.contains(1.0));

        let any = AspectRatioBounds::for_orientation(Orientation::Any);
        assert!(any.contains(1.0));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let bounds = AspectRatioBounds::new(Some(2.0), Some(1.0));
        assert!(matches!(bounds.validate(), Err(Error::InvalidConfig(_))));

        let negative = AspectRatioBounds::new(Some(-1.0), None);
        assert!(negative.validate().is_err());

        let zero_retries = SelectionConfig::default().with_max_retries(0);
        assert!(zero_retries.validate().is_err());
    }
}
