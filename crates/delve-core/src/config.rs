//! Generation settings
//!
//! One `GenConfig` value is threaded through every stage of a build. Config
//! files are JSON with kebab-case keys; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ConfigError;

/// How MST columns are divided among the workers each round
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PartitionMode {
    /// Every column is assigned; the last worker takes the remainder.
    #[default]
    Strict,
    /// `floor(n / workers)` columns per worker; the remainder is never scanned.
    Faithful,
}

/// Settings for a level build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenConfig {
    pub map_width: usize,
    pub map_height: usize,
    pub grid_spacing: usize,

    /// Per-grid-cell node inclusion probability
    pub node_chance: f64,

    /// Corridor stroke width in cells
    pub road_width: f64,
    pub room_radius: f64,
    pub room_radius_variance: f64,
    /// Exponent applied to `degree - 1` when rolling for a room
    #[serde(rename = "room-prob-coefficient")]
    pub room_probability_coefficient: f64,

    #[serde(rename = "num-threads")]
    pub worker_count: usize,
    pub partition: PartitionMode,

    /// Box chance for floor cells crowded by walls
    pub box_chance: f64,
    pub chest_chance: f64,
    /// Box chance for any floor cell
    pub other_box_chance: f64,
    #[serde(rename = "num-merchants")]
    pub merchant_count: usize,
    /// Retry bound for trapdoor/merchant/spawn placement
    pub max_placement_attempts: u32,

    pub seed: Option<u64>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            map_width: 48,
            map_height: 48,
            grid_spacing: 8,
            node_chance: 0.8,

            road_width: 2.0,
            room_radius: 3.0,
            room_radius_variance: 0.0,
            room_probability_coefficient: -0.9,

            worker_count: 4,
            partition: PartitionMode::Strict,

            box_chance: 0.035,
            chest_chance: 0.03,
            other_box_chance: 0.0,
            merchant_count: 1,
            max_placement_attempts: 10_000,

            seed: None,
        }
    }
}

impl GenConfig {
    /// Load settings from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse_config(&contents)
    }

    /// Parse and validate settings from JSON text
    pub fn parse_config(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a level
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(ConfigError::EmptyMap {
                width: self.map_width,
                height: self.map_height,
            });
        }
        if self.grid_spacing == 0 {
            return Err(ConfigError::ZeroSpacing);
        }
        if self.grid_spacing >= self.map_width || self.grid_spacing >= self.map_height {
            return Err(ConfigError::SpacingTooLarge {
                spacing: self.grid_spacing,
                width: self.map_width,
                height: self.map_height,
            });
        }
        if self.worker_count == 0 {
            return Err(ConfigError::NoWorkers);
        }

        for (name, value) in [
            ("node-chance", self.node_chance),
            ("box-chance", self.box_chance),
            ("chest-chance", self.chest_chance),
            ("other-box-chance", self.other_box_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        if !(self.road_width.is_finite() && self.road_width > 0.0) {
            return Err(ConfigError::InvalidRoadWidth(self.road_width));
        }
        if !(self.room_radius >= 0.0 && self.room_radius_variance >= 0.0) {
            return Err(ConfigError::InvalidRoomSize {
                radius: self.room_radius,
                variance: self.room_radius_variance,
            });
        }
        if !self.room_probability_coefficient.is_finite() {
            return Err(ConfigError::InvalidCoefficient(
                self.room_probability_coefficient,
            ));
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroPlacementAttempts);
        }

        Ok(())
    }
}
