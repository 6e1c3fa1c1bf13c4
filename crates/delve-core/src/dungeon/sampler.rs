//! Candidate room nodes on a regular grid

use serde::{Deserialize, Serialize};

use crate::config::GenConfig;
use crate::rng::MapRng;

/// Grid position of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Check if the two points share a row or a column
    pub const fn is_aligned_with(&self, other: &Point) -> bool {
        self.x == other.x || self.y == other.y
    }

    pub const fn distance_squared(&self, other: &Point) -> i64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// Sample grid points at multiples of the spacing, skipping the map edges
///
/// Columns are the outer loop, so indices run down each column first. The
/// returned order is the node index order for the rest of the build.
pub fn sample_points(config: &GenConfig, rng: &mut MapRng) -> Vec<Point> {
    let spacing = config.grid_spacing.max(1);
    let mut points = Vec::new();

    for x in (spacing..config.map_width).step_by(spacing) {
        for y in (spacing..config.map_height).step_by(spacing) {
            if rng.chance(config.node_chance) {
                points.push(Point::new(x as i64, y as i64));
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_chance_fills_grid_column_first() {
        let config = GenConfig {
            map_width: 24,
            map_height: 20,
            grid_spacing: 8,
            node_chance: 1.0,
            ..GenConfig::default()
        };
        let points = sample_points(&config, &mut MapRng::new(1));
        assert_eq!(
            points,
            vec![
                Point::new(8, 8),
                Point::new(8, 16),
                Point::new(16, 8),
                Point::new(16, 16),
            ]
        );
    }

    #[test]
    fn test_zero_chance_yields_nothing() {
        let config = GenConfig {
            node_chance: 0.0,
            ..GenConfig::default()
        };
        assert!(sample_points(&config, &mut MapRng::new(1)).is_empty());
    }

    #[test]
    fn test_points_stay_inside_map() {
        let config = GenConfig {
            map_width: 50,
            map_height: 33,
            grid_spacing: 7,
            node_chance: 0.5,
            ..GenConfig::default()
        };
        for p in sample_points(&config, &mut MapRng::new(9)) {
            assert!(p.x >= 7 && p.x < 50 && p.x % 7 == 0);
            assert!(p.y >= 7 && p.y < 33 && p.y % 7 == 0);
        }
    }

    #[test]
    fn test_point_geometry() {
        let a = Point::new(8, 8);
        assert!(a.is_aligned_with(&Point::new(8, 40)));
        assert!(!a.is_aligned_with(&Point::new(16, 16)));
        assert_eq!(a.distance_squared(&Point::new(8, 16)), 64);
    }
}
