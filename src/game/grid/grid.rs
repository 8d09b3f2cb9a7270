//! Occupancy grid.
//!
//! Records which player permanently owns each cell (the trails), plus a
//! per-tick candidate layer holding every player's intended next cell.
//! Collisions are evaluated against both layers before any move is
//! committed, so two players entering the same cell on the same tick both
//! die regardless of which one is checked first.

use std::collections::HashMap;

use crate::game::error::ArenaError;
use crate::game::types::{Coordinate, PlayerId};

#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    size: i32,
    /// Row-major, `y * size + x`.
    cells: Vec<Option<PlayerId>>,
    candidates: HashMap<PlayerId, Coordinate>,
}

impl OccupancyGrid {
    /// Create an empty square grid of `size * size` cells.
    pub fn new(size: i32) -> Result<Self, ArenaError> {
        if size <= 0 {
            return Err(ArenaError::InvalidAreaSize(size));
        }
        let side = size as usize;
        Ok(Self {
            size,
            cells: vec![None; side * side],
            candidates: HashMap::new(),
        })
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        (0..self.size).contains(&coord.x) && (0..self.size).contains(&coord.y)
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(coord.y as usize * self.size as usize + coord.x as usize)
    }

    /// Record (or replace) the cell `player_id` intends to enter this tick.
    /// Out-of-bounds intents are dropped: the wall already kills them.
    pub fn add_candidate(&mut self, player_id: PlayerId, coord: Coordinate) {
        if !self.in_bounds(coord) {
            return;
        }
        self.candidates.insert(player_id, coord);
    }

    /// Forget every intent from the previous tick.
    pub fn clear_candidates(&mut self) {
        self.candidates.clear();
    }

    /// Permanently assign `coord` to `player_id`.
    pub fn occupy(&mut self, coord: Coordinate, player_id: PlayerId) {
        if let Some(idx) = self.index(coord) {
            self.cells[idx] = Some(player_id);
        }
    }

    /// Whether `player_id` moving into `coord` collides with something.
    ///
    /// Walls and every committed trail count, the player's own trail
    /// included. Candidates count only when they belong to another player.
    pub fn is_occupied(&self, coord: Coordinate, player_id: PlayerId) -> bool {
        let Some(idx) = self.index(coord) else {
            return true;
        };
        let contested = self
            .candidates
            .iter()
            .any(|(id, candidate)| *id != player_id && *candidate == coord);
        contested || self.cells[idx].is_some()
    }

    /// Release every cell owned by `player_id` and drop its pending intent.
    pub fn free_all(&mut self, player_id: PlayerId) {
        for cell in self.cells.iter_mut() {
            if *cell == Some(player_id) {
                *cell = None;
            }
        }
        self.candidates.remove(&player_id);
    }

    #[cfg(test)]
    pub fn owner(&self, coord: Coordinate) -> Option<PlayerId> {
        self.index(coord).and_then(|idx| self.cells[idx])
    }

    /// Number of cells currently owned by `player_id`.
    #[cfg(test)]
    pub fn trail_length(&self, player_id: PlayerId) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Some(player_id))
            .count()
    }

    #[cfg(test)]
    pub fn candidate(&self, player_id: PlayerId) -> Option<Coordinate> {
        self.candidates.get(&player_id).copied()
    }
}
