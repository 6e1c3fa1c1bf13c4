//! Error types for configuration and level generation

use thiserror::Error;

use crate::dungeon::Tile;

/// Rejected configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Map dimensions must be positive, got {width}x{height}")]
    EmptyMap { width: usize, height: usize },

    #[error("Grid spacing must be positive")]
    ZeroSpacing,

    #[error("Grid spacing {spacing} does not fit in a {width}x{height} map")]
    SpacingTooLarge {
        spacing: usize,
        width: usize,
        height: usize,
    },

    #[error("Worker pool needs at least one thread")]
    NoWorkers,

    #[error("Probability '{name}' must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Corridor width must be positive, got {0}")]
    InvalidRoadWidth(f64),

    #[error("Room radius and variance must be non-negative, got {radius} +/- {variance}")]
    InvalidRoomSize { radius: f64, variance: f64 },

    #[error("Room probability coefficient must be finite, got {0}")]
    InvalidCoefficient(f64),

    #[error("Placement needs at least one attempt")]
    ZeroPlacementAttempts,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Failures that abort a level build
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("MST stalled in round {round}: {remaining} node(s) have no axis-aligned edge into the tree")]
    MstStalled { round: usize, remaining: usize },

    #[error("Could not place a {tile:?} after {attempts} attempts")]
    PlacementExhausted { tile: Tile, attempts: u32 },

    #[error("Worker pool failure: {0}")]
    WorkerPool(String),
}
