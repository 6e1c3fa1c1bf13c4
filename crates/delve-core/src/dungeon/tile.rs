//! Map tile types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Tile kind for one map cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Tile {
    Floor,
    Wall,
    #[default]
    Outside,
    /// Breakable crate, spawned mostly against walls
    Box,
    Chest {
        open: bool,
    },
    /// Leads to the next level
    Trapdoor,
    Merchant,
}

impl Tile {
    /// A chest that has not been looted yet
    pub const fn closed_chest() -> Self {
        Tile::Chest { open: false }
    }

    /// Check if this is walkable ground
    pub const fn is_passable(&self) -> bool {
        matches!(self, Tile::Floor | Tile::Outside)
    }

    /// Check if this is a chest in any state
    pub const fn is_chest(&self) -> bool {
        matches!(self, Tile::Chest { .. })
    }

    /// Two-character glyph used by terminal frontends
    pub const fn symbol(&self) -> &'static str {
        match self {
            Tile::Floor => "  ",
            Tile::Wall => "##",
            Tile::Outside => "..",
            Tile::Box => "[]",
            Tile::Chest { .. } => "$ ",
            Tile::Trapdoor => "()",
            Tile::Merchant => "@ ",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Tile::Floor => "Bare stone floor.",
            Tile::Wall => "A solid wall marking the edge of the dungeon.",
            Tile::Outside => "Rock beyond the walls. Nothing lives out here.",
            Tile::Box => "A wooden box. Break it and something may drop out.",
            Tile::Chest { open: false } => "A closed chest. Open it for some money.",
            Tile::Chest { open: true } => "An empty chest, already looted.",
            Tile::Trapdoor => "A trapdoor down to the next level.",
            Tile::Merchant => "A merchant willing to buy and sell.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_only_ground_is_passable() {
        let passable: Vec<Tile> = Tile::iter().filter(Tile::is_passable).collect();
        assert_eq!(passable, vec![Tile::Floor, Tile::Outside]);
        assert!(!Tile::Chest { open: true }.is_passable());
    }

    #[test]
    fn test_symbols_are_two_columns() {
        for tile in Tile::iter() {
            assert_eq!(tile.symbol().chars().count(), 2, "{tile}");
        }
    }

    #[test]
    fn test_chest_description_tracks_state() {
        assert_ne!(
            Tile::closed_chest().description(),
            Tile::Chest { open: true }.description()
        );
        assert!(Tile::closed_chest().is_chest());
        assert!(!Tile::Box.is_chest());
    }
}
