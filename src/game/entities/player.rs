//! Player entity logic.
//!
//! A player moves one cell per tick in its facing direction. It may turn at
//! most once per tick and never straight back onto the cell it just left.

use serde::{Deserialize, Serialize};

use crate::game::types::{Coordinate, Direction, PlayerId, PlayerInitialState};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub position: Coordinate,
    pub direction: Direction,
    is_alive: bool,
    direction_locked: bool,
    changed: bool,
}

/// What the sync layer sees of a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub position: Coordinate,
    pub direction: Direction,
    pub is_alive: bool,
}

impl Player {
    pub fn new(id: PlayerId, initial: PlayerInitialState) -> Self {
        Self {
            id,
            position: initial.start_position,
            direction: initial.initial_direction,
            is_alive: true,
            direction_locked: false,
            changed: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    #[cfg(test)]
    pub fn is_direction_locked(&self) -> bool {
        self.direction_locked
    }

    /// Turn towards `direction`. Returns whether the turn was accepted.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.direction_locked || direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        self.direction_locked = true;
        self.changed = true;
        true
    }

    /// Advance one cell. The grid is not touched here.
    pub fn move_forward(&mut self) -> Coordinate {
        self.position = self.position.step(self.direction);
        self.changed = true;
        self.position
    }

    pub fn allow_change_direction(&mut self) {
        self.direction_locked = false;
    }

    pub fn kill(&mut self) {
        if self.is_alive {
            self.is_alive = false;
            self.changed = true;
        }
    }

    /// Flag the player for the next state sync even if nothing moved.
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Read and reset the change flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            position: self.position,
            direction: self.direction,
            is_alive: self.is_alive,
        }
    }
}
