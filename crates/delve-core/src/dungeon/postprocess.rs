//! Local refinement rules applied to a decoded level
//!
//! The sweep runs row-major and writes in place, so a cell sees the already
//! rewritten tiles above and to the left of it.

use super::{Level, Tile};
use crate::config::GenConfig;
use crate::error::GenError;
use crate::rng::MapRng;

/// What one sweep changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepCounts {
    pub walls: usize,
    pub boxes: usize,
    pub chests: usize,
}

fn is_ground(t: Tile) -> bool {
    matches!(t, Tile::Floor | Tile::Box)
}

fn is_edge(t: Tile) -> bool {
    matches!(t, Tile::Outside | Tile::Wall)
}

/// Turn outside cells touching floor or boxes into walls
///
/// Returns how many cells changed. Running it twice changes nothing the
/// second time.
pub fn outline_walls(level: &mut Level) -> usize {
    let mut walls = 0;
    for y in 0..level.height() {
        for x in 0..level.width() {
            if level.get(x, y) == Some(Tile::Outside) && level.neighbours(x, y, is_ground) > 0 {
                level.set(x, y, Tile::Wall);
                walls += 1;
            }
        }
    }
    walls
}

/// Walls, boxes and chests in a single pass
///
/// Every floor cell draws one number and compares it against the box, chest
/// and other-box chances in that order.
pub fn sweep(level: &mut Level, config: &GenConfig, rng: &mut MapRng) -> SweepCounts {
    let mut counts = SweepCounts::default();

    for y in 0..level.height() {
        for x in 0..level.width() {
            match level.get(x, y) {
                Some(Tile::Outside) => {
                    if level.neighbours(x, y, is_ground) > 0 {
                        level.set(x, y, Tile::Wall);
                        counts.walls += 1;
                    }
                }
                Some(Tile::Floor) => {
                    let r = rng.uniform();
                    let crowded =
                        level.neighbours(x, y, |t| is_edge(t) || t == Tile::Box) > 1;
                    if crowded && r < config.box_chance {
                        level.set(x, y, Tile::Box);
                        counts.boxes += 1;
                    } else if level.neighbours(x, y, is_edge) == 0 && r < config.chest_chance {
                        level.set(x, y, Tile::closed_chest());
                        counts.chests += 1;
                    } else if r < config.other_box_chance {
                        level.set(x, y, Tile::Box);
                        counts.boxes += 1;
                    }
                }
                _ => {}
            }
        }
    }

    counts
}

/// Put `tile` on a random floor cell surrounded by 8 floor cells
pub fn place_special(
    level: &mut Level,
    tile: Tile,
    rng: &mut MapRng,
    max_attempts: u32,
) -> Result<(usize, usize), GenError> {
    if level.width() > 0 {
        for _ in 0..max_attempts {
            let x = rng.rn2(level.width());
            let y = rng.rn2(level.height());
            if level.get(x, y) == Some(Tile::Floor)
                && level.neighbours(x, y, |t| t == Tile::Floor) == 8
            {
                level.set(x, y, tile);
                return Ok((x, y));
            }
        }
    }
    Err(GenError::PlacementExhausted {
        tile,
        attempts: max_attempts,
    })
}

/// Full post-processing: sweep, one trapdoor, then the merchants
pub fn postprocess(
    level: &mut Level,
    config: &GenConfig,
    rng: &mut MapRng,
) -> Result<SweepCounts, GenError> {
    let counts = sweep(level, config, rng);
    place_special(level, Tile::Trapdoor, rng, config.max_placement_attempts)?;
    for _ in 0..config.merchant_count {
        place_special(level, Tile::Merchant, rng, config.max_placement_attempts)?;
    }
    Ok(counts)
}
