//! Level generation pipeline
//!
//! sample points -> distance graph -> parallel MST -> raster -> tiles ->
//! post-processing. A [`Generator`] keeps its worker pool and RNG between
//! levels, so going down a trapdoor does not respawn threads.

use std::sync::Arc;

use image::RgbaImage;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::decode::decode;
use super::graph::DistanceGraph;
use super::mst::find_mst;
use super::pool::WorkerPool;
use super::postprocess::postprocess;
use super::raster::rasterize;
use super::sampler::sample_points;
use super::Level;
use crate::config::GenConfig;
use crate::error::GenError;
use crate::rng::MapRng;

/// Summary of one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub points: usize,
    pub mst_edges: usize,
    pub mst_weight: i64,
    pub rooms: usize,
    pub walls: usize,
    pub boxes: usize,
    pub chests: usize,
}

/// Everything one build produced, including the intermediate bitmap
#[derive(Debug, Clone)]
pub struct LevelBuild {
    pub level: Level,
    pub stats: BuildStats,
    pub raster: RgbaImage,
}

/// Generation session: one config, one worker pool, one RNG stream
#[derive(Debug)]
pub struct Generator {
    config: GenConfig,
    pool: WorkerPool,
    rng: MapRng,
}

impl Generator {
    /// Validate `config` and start the worker pool
    ///
    /// Seeds from `config.seed` when set, otherwise from entropy.
    pub fn new(config: GenConfig) -> Result<Self, GenError> {
        config.validate()?;
        let pool = WorkerPool::new(config.worker_count)?;
        let rng = config.seed.map_or_else(MapRng::from_entropy, MapRng::new);
        Ok(Self { config, pool, rng })
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Seed of the session's RNG stream
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// RNG for follow-up placement on a generated level (player spawn)
    pub fn rng_mut(&mut self) -> &mut MapRng {
        &mut self.rng
    }

    /// Build the level at `depth`
    pub fn generate(&mut self, depth: u32) -> Result<(Level, BuildStats), GenError> {
        let build = self.build(depth)?;
        Ok((build.level, build.stats))
    }

    /// Build the level at `depth`, keeping the raster
    pub fn build(&mut self, depth: u32) -> Result<LevelBuild, GenError> {
        let config = &self.config;
        info!(
            "generating {}x{} level at depth {depth} (seed {})",
            config.map_width,
            config.map_height,
            self.rng.seed()
        );

        let points = sample_points(config, &mut self.rng);
        debug!("sampled {} points", points.len());

        let graph = Arc::new(DistanceGraph::build(&points));
        let tree = find_mst(&self.pool, &graph, config.partition)?;
        let mst_weight = tree.total_weight(&graph);
        debug!(
            "spanning tree: {} edges, weight {mst_weight}",
            tree.edge_count()
        );

        let (raster, rooms) = rasterize(&points, &tree, config, &mut self.rng);
        debug!("drew {rooms} rooms");

        let mut level = decode(&raster, depth);
        let counts = postprocess(&mut level, config, &mut self.rng)?;
        debug!(
            "post-processing placed {} walls, {} boxes, {} chests",
            counts.walls, counts.boxes, counts.chests
        );

        let stats = BuildStats {
            points: points.len(),
            mst_edges: tree.edge_count(),
            mst_weight,
            rooms,
            walls: counts.walls,
            boxes: counts.boxes,
            chests: counts.chests,
        };
        info!("level {depth} ready: {} points, {rooms} rooms", stats.points);

        Ok(LevelBuild {
            level,
            stats,
            raster,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Tile;

    // A full grid is always connected
    fn small_config(seed: u64) -> GenConfig {
        GenConfig {
            seed: Some(seed),
            node_chance: 1.0,
            ..GenConfig::default()
        }
    }

    #[test]
    fn test_default_level() {
        let mut generator = Generator::new(small_config(11)).unwrap();
        let (level, stats) = generator.generate(1).unwrap();
        assert_eq!(level.width(), 48);
        assert_eq!(level.height(), 48);
        assert_eq!(level.depth, 1);
        assert_eq!(level.count(Tile::Trapdoor), 1);
        assert_eq!(level.count(Tile::Merchant), 1);
        assert_eq!(stats.mst_edges + 1, stats.points);
    }

    #[test]
    fn test_raster_matches_level_size() {
        let mut generator = Generator::new(small_config(3)).unwrap();
        let build = generator.build(0).unwrap();
        assert_eq!(build.raster.width() as usize, build.level.width());
        assert_eq!(build.raster.height() as usize, build.level.height());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GenConfig {
            worker_count: 0,
            ..GenConfig::default()
        };
        assert!(matches!(Generator::new(config), Err(GenError::Config(_))));
    }
}
