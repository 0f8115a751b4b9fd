use glam::IVec3;
use serde::{Deserialize, Serialize};

/// One of the 6 face directions of a voxel. Y-up; North is -Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Down = 0,
    Up = 1,
    North = 2,
    South = 3,
    East = 4,
    West = 5,
}

/// All 6 faces in a fixed order.
pub const ALL_DIRECTIONS: [Direction; 6] = [
    Direction::Down,
    Direction::Up,
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

impl Direction {
    /// Offset vector for this direction. Down = (0,-1,0).
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::Down => IVec3::new(0, -1, 0),
            Direction::Up => IVec3::new(0, 1, 0),
            Direction::North => IVec3::new(0, 0, -1),
            Direction::South => IVec3::new(0, 0, 1),
            Direction::East => IVec3::new(1, 0, 0),
            Direction::West => IVec3::new(-1, 0, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Direction of a unit step along one axis (0 = X, 1 = Y, 2 = Z).
    /// Returns `None` for an invalid axis or a zero step.
    pub fn from_axis_step(axis: usize, step: i32) -> Option<Direction> {
        match (axis, step.signum()) {
            (0, 1) => Some(Direction::East),
            (0, -1) => Some(Direction::West),
            (1, 1) => Some(Direction::Up),
            (1, -1) => Some(Direction::Down),
            (2, 1) => Some(Direction::South),
            (2, -1) => Some(Direction::North),
            _ => None,
        }
    }
}
