//! Dungeon system
//!
//! Contains the tile grid and every stage of the level generation pipeline.

mod decode;
mod generation;
mod graph;
mod level;
mod mst;
mod pool;
mod postprocess;
mod raster;
mod sampler;
mod tile;

pub use decode::decode;
pub use generation::{BuildStats, Generator, LevelBuild};
pub use graph::{DistanceGraph, NO_EDGE};
pub use level::Level;
pub use mst::{find_mst, partition, Edge, SpanningTree};
pub use pool::{aggregate, ColumnRange, Job, JobResult, WorkerPool, INFINITE_WEIGHT};
pub use postprocess::{outline_walls, place_special, postprocess, sweep, SweepCounts};
pub use raster::{rasterize, room_probability, GROUND};
pub use sampler::{sample_points, Point};
pub use tile::Tile;
