//! Configuration for description normalization and lithology interpolation.

use crate::error::{BoreSliceError, Result};
use serde::{Deserialize, Serialize};

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Description normalization configuration.
    pub text: TextConfig,

    /// Spatial interpolation configuration.
    pub interpolation: InterpolationConfig,
}

impl Config {
    /// Checks every section for values that cannot work.
    pub fn validate(&self) -> Result<()> {
        self.text.validate()?;
        self.interpolation.validate()
    }
}

/// Description normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Convert descriptions to lowercase.
    /// Default: true.
    pub lowercase: bool,

    /// Apply Unicode normalization (NFC) before lowercasing. Recomposes
    /// decomposed input, so text is no longer returned byte for byte.
    /// Default: false.
    pub unicode_normalize: bool,

    /// Regex fragment marking composite terms such as "sandwithclay".
    /// Default: "with".
    pub composite_joiner: String,

    /// Split composite terms at all.
    /// Default: true.
    pub split_composites: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            unicode_normalize: false,
            composite_joiner: "with".to_string(),
            split_composites: true,
        }
    }
}

impl TextConfig {
    fn validate(&self) -> Result<()> {
        if self.split_composites && self.composite_joiner.is_empty() {
            return Err(BoreSliceError::Config(
                "composite_joiner must not be empty when split_composites is set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Neighbour weighting scheme for k-NN voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weighting {
    /// Every neighbour gets the same vote.
    Uniform,
    /// Votes weighted by inverse distance.
    #[default]
    Distance,
}

/// Spatial interpolation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolationConfig {
    /// Number of neighbours taking part in each vote.
    /// Default: 10.
    pub n_neighbors: usize,

    /// Vote weighting.
    /// Default: inverse distance.
    pub weighting: Weighting,

    /// Mesh resolution in metres for bounding-box entry points.
    /// Default: 100.
    pub grid_resolution: f64,

    /// Evaluate mesh points on the rayon pool.
    /// Default: true.
    pub parallel: bool,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            n_neighbors: 10,
            weighting: Weighting::Distance,
            grid_resolution: 100.0,
            parallel: true,
        }
    }
}

impl InterpolationConfig {
    fn validate(&self) -> Result<()> {
        if self.n_neighbors == 0 {
            return Err(BoreSliceError::Config("n_neighbors must be at least 1".to_string()));
        }
        if !(self.grid_resolution.is_finite() && self.grid_resolution > 0.0) {
            return Err(BoreSliceError::Config(format!(
                "grid_resolution must be a positive number, got {}",
                self.grid_resolution
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.text.composite_joiner, "with");
        assert_eq!(config.interpolation.n_neighbors, 10);
        assert_eq!(config.interpolation.weighting, Weighting::Distance);
        assert!(!config.text.unicode_normalize);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_neighbors_rejected() {
        let mut config = Config::default();
        config.interpolation.n_neighbors = 0;
        assert!(matches!(config.validate(), Err(BoreSliceError::Config(_))));
    }

    #[test]
    fn test_bad_resolution_rejected() {
        let mut config = Config::default();
        config.interpolation.grid_resolution = -5.0;
        assert!(matches!(config.validate(), Err(BoreSliceError::Config(_))));
    }

    #[test]
    fn test_empty_joiner_rejected() {
        let mut config = Config::default();
        config.text.composite_joiner.clear();
        assert!(matches!(config.validate(), Err(BoreSliceError::Config(_))));

        config.text.split_composites = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"interpolation": {"n_neighbors": 4, "weighting": "Uniform"}}"#).unwrap();
        assert_eq!(config.interpolation.n_neighbors, 4);
        assert_eq!(config.interpolation.weighting, Weighting::Uniform);
        assert!(config.interpolation.parallel);
        assert!(config.text.lowercase);
    }
}
