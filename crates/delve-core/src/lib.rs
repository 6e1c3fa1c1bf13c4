//! delve-core: Parallel dungeon-level generation engine
//!
//! Samples room nodes on a grid, joins them with a minimum spanning tree
//! computed on a persistent worker pool, rasterizes corridors and rooms into a
//! bitmap and decodes that bitmap into a tile grid refined by local rules.
//!
//! Rendering and gameplay live elsewhere; they consume [`dungeon::Level`].

pub mod config;
pub mod dungeon;
pub mod error;

mod rng;

pub use config::{GenConfig, PartitionMode};
pub use dungeon::{BuildStats, Generator, Level, Tile};
pub use error::{ConfigError, GenError};
pub use rng::MapRng;
