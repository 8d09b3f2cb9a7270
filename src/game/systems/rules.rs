use crate::game::entities::Player;
use crate::game::state::GameStatus;

/// The game is over once at most one player is left alive; nobody left is a draw.
pub fn game_status(players: &[Player]) -> GameStatus {
    let alive = players.iter().filter(|p| p.is_alive()).count();
    GameStatus {
        finished: alive <= 1,
        is_draw: alive == 0,
        players: players.iter().map(Player::snapshot).collect(),
    }
}
