//! Arena state and the per-tick protocol.
//!
//! A tick is split in two calls so the room can react to the outcome before
//! anything is committed: [`Arena::step`] moves, resolves collisions and
//! reports the status; [`Arena::flush`] commits the surviving moves to the
//! grid and removes the players that died.

use serde::{Deserialize, Serialize};

use crate::config::loader::GameConfig;
use crate::game::entities::{Player, PlayerSnapshot};
use crate::game::error::ArenaError;
use crate::game::grid::OccupancyGrid;
use crate::game::systems::{game_status, move_all_players, resolve_collisions};
use crate::game::types::{Direction, PlayerId, PlayerInitialState};

/// Outcome of [`Arena::step`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub finished: bool,
    pub is_draw: bool,
    /// Every player present during the tick, in join order, dead ones included.
    pub players: Vec<PlayerSnapshot>,
}

impl GameStatus {
    /// The last player standing, if the game ended with one.
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.finished || self.is_draw {
            return None;
        }
        self.players.iter().find(|p| p.is_alive).map(|p| p.id)
    }
}

/// Changes since the previous [`Arena::drain_changes`], for the sync layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaDelta {
    pub players: Vec<PlayerSnapshot>,
    pub removed: Vec<PlayerId>,
}

impl ArenaDelta {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Arena {
    pub(crate) grid: OccupancyGrid,
    /// Join order.
    pub(crate) players: Vec<Player>,
    initial_states: Vec<PlayerInitialState>,
    pending_removals: Vec<PlayerId>,
    removed_since_sync: Vec<PlayerId>,
}

impl Arena {
    pub fn new(config: &GameConfig) -> Result<Self, ArenaError> {
        let area_size = config.area_virtual_size;
        let grid = OccupancyGrid::new(area_size)?;
        let initial_states = config
            .initial_states
            .iter()
            .enumerate()
            .map(|(slot, state)| state.normalized(area_size).ok_or(ArenaError::UnresolvableStart(slot + 1)))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            grid,
            players: Vec::new(),
            initial_states,
            pending_removals: Vec::new(),
            removed_since_sync: Vec::new(),
        })
    }

    #[cfg(test)]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    #[cfg(test)]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    #[cfg(test)]
    pub fn initial_states(&self) -> &[PlayerInitialState] {
        &self.initial_states
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// Seat a player on the slot for `join_index` (1-based) and claim its
    /// starting cell right away.
    pub fn create_player(&mut self, player_id: PlayerId, join_index: usize) -> Result<(), ArenaError> {
        if self.player(player_id).is_some() {
            return Err(ArenaError::DuplicatePlayer(player_id));
        }
        let initial = join_index
            .checked_sub(1)
            .and_then(|idx| self.initial_states.get(idx))
            .copied()
            .ok_or(ArenaError::NoInitialState {
                index: join_index,
                available: self.initial_states.len(),
            })?;

        self.players.push(Player::new(player_id, initial));
        self.grid.occupy(initial.start_position, player_id);
        Ok(())
    }

    /// Drop a player and free its trail. Unknown ids are ignored.
    pub fn remove_player(&mut self, player_id: PlayerId) {
        let Some(idx) = self.players.iter().position(|p| p.id == player_id) else {
            return;
        };
        self.players.remove(idx);
        self.grid.free_all(player_id);
        self.pending_removals.retain(|id| *id != player_id);
        self.removed_since_sync.push(player_id);
    }

    /// Returns whether the turn was accepted. Unknown ids are ignored.
    pub fn change_player_direction(&mut self, player_id: PlayerId, direction: Direction) -> bool {
        self.player_mut(player_id)
            .map(|player| player.change_direction(direction))
            .unwrap_or(false)
    }

    /// Make every player part of the next delta, so viewers receive the
    /// starting positions when the game begins.
    pub fn refresh_all_players_positions(&mut self) {
        for player in self.players.iter_mut() {
            player.mark_changed();
        }
    }

    /// Move every living player, kill the ones that collided and report the
    /// resulting status. Nothing is committed to the grid yet.
    pub fn step(&mut self) -> GameStatus {
        move_all_players(self);
        let defeated = resolve_collisions(self);
        self.pending_removals.extend(defeated);
        game_status(&self.players)
    }

    /// Commit surviving moves and remove the players defeated this tick.
    pub fn flush(&mut self) {
        for player in self.players.iter_mut().filter(|p| p.is_alive()) {
            self.grid.occupy(player.position, player.id);
            player.allow_change_direction();
        }

        let mut defeated = std::mem::take(&mut self.pending_removals);
        let stragglers: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| !p.is_alive() && !defeated.contains(&p.id))
            .map(|p| p.id)
            .collect();
        defeated.extend(stragglers);
        for player_id in defeated {
            self.remove_player(player_id);
        }
    }

    /// Players changed since the last call, plus the ids removed meanwhile.
    pub fn drain_changes(&mut self) -> ArenaDelta {
        let players = self
            .players
            .iter_mut()
            .filter_map(|p| p.take_changed().then(|| p.snapshot()))
            .collect();
        ArenaDelta {
            players,
            removed: std::mem::take(&mut self.removed_since_sync),
        }
    }
}
