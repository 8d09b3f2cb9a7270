//! Player movement system.
//!
//! Moves every living player one cell and records the destination as a
//! candidate on the grid. Trails are not touched.

use crate::game::state::Arena;

/// Move phase. Candidates left over from the previous tick are discarded first.
pub fn move_all_players(arena: &mut Arena) {
    arena.grid.clear_candidates();
    for player in arena.players.iter_mut().filter(|p| p.is_alive()) {
        let destination = player.move_forward();
        arena.grid.add_candidate(player.id, destination);
    }
}
