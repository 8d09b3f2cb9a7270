//! Collision system.
//!
//! Runs after every candidate of the tick is registered, so the verdict for
//! each player does not depend on the order players are visited in.

use log::debug;

use crate::game::state::Arena;
use crate::game::types::PlayerId;

/// Kill every living player whose new cell is blocked and return their ids.
pub fn resolve_collisions(arena: &mut Arena) -> Vec<PlayerId> {
    let mut defeated = Vec::new();
    for player in arena.players.iter_mut().filter(|p| p.is_alive()) {
        if arena.grid.is_occupied(player.position, player.id) {
            debug!("[Arena] Player {} crashed at {}", player.id, player.position);
            player.kill();
            defeated.push(player.id);
        }
    }
    defeated
}
