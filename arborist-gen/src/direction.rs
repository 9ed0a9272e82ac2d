//! Branch directions.
//!
//! A log's branch direction is the offset from the log to its parent:
//! `parent = pos + direction.offset()`. Directions never point upwards, so a
//! parent is always level with or below its child.

use std::fmt;

use crate::pos::BlockPos;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum BranchDirection {
    None,
    Down,
    North,
    West,
    East,
    South,
    DownNorth,
    DownWest,
    DownEast,
    DownSouth,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    DownNorthWest,
    DownNorthEast,
    DownSouthWest,
    DownSouthEast,
}

impl BranchDirection {
    /// Every direction, ordered by strongest connection first.
    pub const ALL: [BranchDirection; 18] = [
        BranchDirection::None,
        BranchDirection::Down,
        BranchDirection::North,
        BranchDirection::West,
        BranchDirection::East,
        BranchDirection::South,
        BranchDirection::DownNorth,
        BranchDirection::DownWest,
        BranchDirection::DownEast,
        BranchDirection::DownSouth,
        BranchDirection::NorthWest,
        BranchDirection::NorthEast,
        BranchDirection::SouthWest,
        BranchDirection::SouthEast,
        BranchDirection::DownNorthWest,
        BranchDirection::DownNorthEast,
        BranchDirection::DownSouthWest,
        BranchDirection::DownSouthEast,
    ];

    pub fn offset(self) -> BlockPos {
        let (x, y, z) = match self {
            BranchDirection::None => (0, 0, 0),
            BranchDirection::Down => (0, -1, 0),
            BranchDirection::North => (0, 0, -1),
            BranchDirection::West => (-1, 0, 0),
            BranchDirection::East => (1, 0, 0),
            BranchDirection::South => (0, 0, 1),
            BranchDirection::DownNorth => (0, -1, -1),
            BranchDirection::DownWest => (-1, -1, 0),
            BranchDirection::DownEast => (1, -1, 0),
            BranchDirection::DownSouth => (0, -1, 1),
            BranchDirection::NorthWest => (-1, 0, -1),
            BranchDirection::NorthEast => (1, 0, -1),
            BranchDirection::SouthWest => (-1, 0, 1),
            BranchDirection::SouthEast => (1, 0, 1),
            BranchDirection::DownNorthWest => (-1, -1, -1),
            BranchDirection::DownNorthEast => (1, -1, -1),
            BranchDirection::DownSouthWest => (-1, -1, 1),
            BranchDirection::DownSouthEast => (1, -1, 1),
        };
        BlockPos::new(x, y, z)
    }

    /// Property value written to the `branch_direction` block state.
    pub fn name(self) -> &'static str {
        match self {
            BranchDirection::None => "none",
            BranchDirection::Down => "down",
            BranchDirection::North => "north",
            BranchDirection::West => "west",
            BranchDirection::East => "east",
            BranchDirection::South => "south",
            BranchDirection::DownNorth => "down_north",
            BranchDirection::DownWest => "down_west",
            BranchDirection::DownEast => "down_east",
            BranchDirection::DownSouth => "down_south",
            BranchDirection::NorthWest => "north_west",
            BranchDirection::NorthEast => "north_east",
            BranchDirection::SouthWest => "south_west",
            BranchDirection::SouthEast => "south_east",
            BranchDirection::DownNorthWest => "down_north_west",
            BranchDirection::DownNorthEast => "down_north_east",
            BranchDirection::DownSouthWest => "down_south_west",
            BranchDirection::DownSouthEast => "down_south_east",
        }
    }

    /// Position in [`BranchDirection::ALL`]. Lower is a stronger connection.
    pub fn strength(self) -> usize {
        self as usize
    }

    pub fn is_root(self) -> bool {
        self == BranchDirection::None
    }
}

impl fmt::Display for BranchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_follows_declaration_order() {
        for (i, direction) in BranchDirection::ALL.iter().enumerate() {
            assert_eq!(direction.strength(), i);
        }
        assert!(BranchDirection::North.strength() < BranchDirection::NorthWest.strength());
        assert!(BranchDirection::Down.strength() < BranchDirection::DownNorth.strength());
    }

    #[test]
    fn test_offsets_are_unique_and_never_up() {
        for (i, a) in BranchDirection::ALL.iter().enumerate() {
            let offset = a.offset();
            assert!(offset.y <= 0, "{} points up", a);
            assert!(offset.x.abs() <= 1 && offset.z.abs() <= 1);
            for b in &BranchDirection::ALL[i + 1..] {
                assert_ne!(offset, b.offset(), "{} and {} share an offset", a, b);
            }
        }
    }

    #[test]
    fn test_names_and_root() {
        assert_eq!(BranchDirection::DownNorthEast.offset(), BlockPos::new(1, -1, -1));
        assert_eq!(BranchDirection::SouthWest.name(), "south_west");
        assert_eq!(BranchDirection::DownSouthEast.to_string(), "down_south_east");
        assert!(BranchDirection::None.is_root());
        assert_eq!(BranchDirection::None.offset(), BlockPos::ZERO);
    }
}
