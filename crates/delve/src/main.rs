//! delve: generate a dungeon level and print it
//!
//! Main entry point for the command-line generator.

mod logging;
mod render;

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use delve_core::{GenConfig, Generator, PartitionMode};

/// Parallel dungeon-level generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate a dungeon level", long_about = None)]
struct Args {
    /// Config file (JSON, kebab-case keys)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// RNG seed for a reproducible level
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Level depth
    #[arg(short = 'd', long = "depth", default_value_t = 0)]
    depth: u32,

    /// Map width in cells
    #[arg(long = "width")]
    width: Option<usize>,

    /// Map height in cells
    #[arg(long = "height")]
    height: Option<usize>,

    /// MST worker threads
    #[arg(short = 'j', long = "threads")]
    threads: Option<usize>,

    /// Column partition (strict/faithful)
    #[arg(short = 'p', long = "partition")]
    partition: Option<PartitionMode>,

    /// Plain text output without colours
    #[arg(short = 'a', long = "ascii")]
    ascii: bool,

    /// Also write the corridor/room bitmap to this PNG file
    #[arg(long = "png")]
    png: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied
    fn resolve_config(&self) -> Result<GenConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => GenConfig::load_from_file(path)?,
            None => GenConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.map_width = width;
        }
        if let Some(height) = self.height {
            config.map_height = height;
        }
        if let Some(threads) = self.threads {
            config.worker_count = threads;
        }
        if let Some(partition) = self.partition {
            config.partition = partition;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.log_level.as_deref());

    let config = args.resolve_config()?;
    let mut generator = Generator::new(config)?;
    let build = generator.build(args.depth)?;

    if let Some(path) = &args.png {
        build.raster.save(path)?;
        info!("wrote raster to {}", path.display());
    }

    let mut out = io::stdout().lock();
    if args.ascii {
        render::print_ascii(&mut out, &build.level)?;
    } else {
        render::print_styled(&mut out, &build.level)?;
    }

    let stats = build.stats;
    info!(
        "seed {}: {} points, {} edges (weight {}), {} rooms, {} walls, {} boxes, {} chests",
        generator.seed(),
        stats.points,
        stats.mst_edges,
        stats.mst_weight,
        stats.rooms,
        stats.walls,
        stats.boxes,
        stats.chests
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from([
            "delve",
            "--seed",
            "9",
            "--width",
            "64",
            "-j",
            "2",
            "--partition",
            "faithful",
        ]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.map_width, 64);
        assert_eq!(config.map_height, 48);
        assert_eq!(config.worker_count, 2);
        assert_eq!(config.partition, PartitionMode::Faithful);
    }

    #[test]
    fn test_bad_override_rejected() {
        let args = Args::parse_from(["delve", "-j", "0"]);
        assert!(args.resolve_config().is_err());
    }
}
