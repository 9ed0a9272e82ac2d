//! Structure-local block positions.

use std::fmt;
use std::ops::{Add, Sub};

/// Integer position inside a structure. Ordered by x, then y, then z.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ZERO: BlockPos = BlockPos::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn from_slice(pos: &[i32]) -> Option<Self> {
        match *pos {
            [x, y, z] => Some(Self::new(x, y, z)),
            _ => None,
        }
    }

    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Manhattan length.
    pub fn norm1(self) -> i32 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }
}

impl Add for BlockPos {
    type Output = BlockPos;

    fn add(self, other: BlockPos) -> BlockPos {
        BlockPos::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for BlockPos {
    type Output = BlockPos;

    fn sub(self, other: BlockPos) -> BlockPos {
        BlockPos::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.x, self.y, self.z)
    }
}

/// Formats positions as `[(x y z), ...]` in ascending order.
pub fn format_positions<'a>(positions: impl IntoIterator<Item = &'a BlockPos>) -> String {
    let mut sorted: Vec<&BlockPos> = positions.into_iter().collect();
    sorted.sort();
    let parts: Vec<String> = sorted.iter().map(|p| p.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
