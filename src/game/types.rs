//! Value types shared by the engine: grid coordinates, directions, player ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle of a player, supplied by the session layer.
pub type PlayerId = Uuid;

/// A cell on the square arena. Signed so that moves past the left or top wall
/// are representable (and then reported as occupied by the grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step away in `direction`. Saturates at the
    /// integer limits, which are far outside any arena.
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => Self::new(self.x, self.y.saturating_add(1)),
            Direction::Left => Self::new(self.x.saturating_sub(1), self.y),
            Direction::Right => Self::new(self.x.saturating_add(1), self.y),
        }
    }
}

/// Canonical key form, `x-y`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Starting cell and facing of one join slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInitialState {
    pub start_position: Coordinate,
    pub initial_direction: Direction,
}

impl PlayerInitialState {
    /// Resolve negative components, which are measured from the far edge:
    /// `-3` on a 10-wide arena is `7`. No clamping: a result outside the
    /// arena stays outside. `None` when a component cannot be resolved
    /// without overflowing.
    pub fn normalized(self, area_size: i32) -> Option<Self> {
        let resolve = |v: i32| {
            if v >= 0 {
                Some(v)
            } else {
                v.checked_abs().and_then(|distance| area_size.checked_sub(distance))
            }
        };
        Some(Self {
            start_position: Coordinate::new(resolve(self.start_position.x)?, resolve(self.start_position.y)?),
            initial_direction: self.initial_direction,
        })
    }
}
