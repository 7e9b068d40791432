//! Scene configuration
//!
//! Every field has a default, so an empty YAML document (or no document at
//! all) yields the stock site: a ten-flower garden and the looping song.

use serde::Deserialize;
use crate::error::{GardenError, Result};

/// Top-level YAML document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub garden: GardenConfig,
    pub song: SongConfig,
}

/// Rules for the virtual garden
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Maximum number of flowers the garden holds
    pub max_flowers: usize,
    /// Growth of a freshly planted flower
    pub initial_growth: f32,
    /// Growth added by one watering
    pub growth_step: f32,
    /// Seconds between the watering click and the growth step
    pub watering_delay: f32,
    /// World-space y of planted flowers (just above the ground plane)
    pub planting_height: f32,
    /// Image used for the ground plane
    pub ground_texture: String,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            max_flowers: 10,
            initial_growth: 0.1,
            growth_step: 0.2,
            watering_delay: 2.0,
            planting_height: -0.9,
            ground_texture: "/images/soil.webp".to_string(),
        }
    }
}

/// Settings for the song scene
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SongConfig {
    pub audio_src: String,
    pub looping: bool,
    pub title: String,
    /// Shown while the bouquet is open
    pub quote: String,
}

impl Default for SongConfig {
    fn default() -> Self {
        Self {
            audio_src: "/music/flores.mp3".to_string(),
            looping: true,
            title: "Floricienta - Canción del momento".to_string(),
            quote: "Donde florecen los sueños, siempre brilla el sol.".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SiteConfig = if yaml.trim().is_empty() {
            SiteConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.garden.validate()?;
        Ok(config)
    }
}

impl GardenConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_flowers == 0 {
            return Err(GardenError::InvalidConfig(
                "max_flowers must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.initial_growth) {
            return Err(GardenError::InvalidConfig(format!(
                "initial_growth {} is outside [0, 1]",
                self.initial_growth
            )));
        }
        if !(0.0..=1.0).contains(&self.growth_step) {
            return Err(GardenError::InvalidConfig(format!(
                "growth_step {} is outside [0, 1]",
                self.growth_step
            )));
        }
        if !self.watering_delay.is_finite() || self.watering_delay < 0.0 {
            return Err(GardenError::InvalidConfig(format!(
                "watering_delay {} must be finite and non-negative",
                self.watering_delay
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = SiteConfig::from_yaml("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.garden.max_flowers, 10);
        assert_eq!(config.song.audio_src, "/music/flores.mp3");
    }

    #[test]
    fn test_partial_override() {
        let yaml = r#"
garden:
  max_flowers: 7
  watering_delay: 0.5
song:
  looping: false
"#;
        let config = SiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.garden.max_flowers, 7);
        assert!((config.garden.watering_delay - 0.5).abs() < 0.0001);
        // Untouched fields keep their defaults
        assert!((config.garden.growth_step - 0.2).abs() < 0.0001);
        assert_eq!(config.garden.ground_texture, "/images/soil.webp");
        assert!(!config.song.looping);
        assert_eq!(config.song.audio_src, "/music/flores.mp3");
    }

    #[test]
    fn test_rejects_zero_cap() {
        let err = SiteConfig::from_yaml("garden:\n  max_flowers: 0\n").unwrap_err();
        assert!(matches!(err, GardenError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_out_of_range_growth() {
        let err = SiteConfig::from_yaml("garden:\n  growth_step: 1.5\n").unwrap_err();
        assert!(matches!(err, GardenError::InvalidConfig(_)));

        let err = SiteConfig::from_yaml("garden:\n  initial_growth: -0.1\n").unwrap_err();
        assert!(matches!(err, GardenError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_unbounded_delay() {
        let err = SiteConfig::from_yaml("garden:\n  watering_delay: .inf\n").unwrap_err();
        assert!(matches!(err, GardenError::InvalidConfig(_)));

        let err = SiteConfig::from_yaml("garden:\n  watering_delay: .nan\n").unwrap_err();
        assert!(matches!(err, GardenError::InvalidConfig(_)));

        let err = SiteConfig::from_yaml("garden:\n  watering_delay: -1.0\n").unwrap_err();
        assert!(matches!(err, GardenError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let err = SiteConfig::from_yaml("garden: [1, 2").unwrap_err();
        assert!(matches!(err, GardenError::Config(_)));
    }
}
