/// Handles game start and the fixed-rate tick loop for GameRoom.
/// Encapsulates timer management, outcome notifications, and state broadcasts.

use actix::prelude::*;
use log::{debug, info};

use crate::config::game::TICK_INTERVAL;
use crate::game::state::GameStatus;
use crate::game::types::PlayerId;
use crate::server::game_room::messages::{CloseSession, GameOutcome, ServerWsMessage};
use crate::server::game_room::server::GameRoom;

/// Who hears what after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notices {
    /// Everyone connected, defeated watchers included.
    Broadcast(GameOutcome),
    Individual(Vec<(PlayerId, GameOutcome)>),
}

/// Turn a status into notifications. While the game runs only the players
/// defeated this tick hear about it; at the end the survivor wins.
pub fn outcome_notices(status: &GameStatus) -> Notices {
    if status.finished && status.is_draw {
        return Notices::Broadcast(GameOutcome::Draw);
    }
    let notices = status
        .players
        .iter()
        .filter_map(|p| match (p.is_alive, status.finished) {
            (false, _) => Some((p.id, GameOutcome::Lose)),
            (true, true) => Some((p.id, GameOutcome::Win)),
            (true, false) => None,
        })
        .collect();
    Notices::Individual(notices)
}

/// Send whatever changed in the arena since the last broadcast.
pub fn broadcast_changes(this: &mut GameRoom) {
    let delta = this.arena.drain_changes();
    if delta.is_empty() {
        return;
    }
    this.broadcast(ServerWsMessage::StateUpdate(delta));
}

/// Start the game: push every starting position, then tick at a fixed rate.
pub fn start_game(this: &mut GameRoom, ctx: &mut Context<GameRoom>) {
    if this.started {
        return;
    }
    this.started = true;
    this.arena.refresh_all_players_positions();
    broadcast_changes(this);

    let handle = ctx.run_interval(TICK_INTERVAL, |act, ctx| {
        run_tick(act, ctx);
    });
    this.tick_timer = Some(handle);
    info!("[GameRoom] Game started in room {} with {} players", this.room_id, this.arena.alive_count());
}

/// One tick: step, notify, flush, sync. Stops the room once the game is over.
pub fn run_tick(this: &mut GameRoom, ctx: &mut Context<GameRoom>) {
    let status = this.arena.step();

    match outcome_notices(&status) {
        Notices::Broadcast(outcome) => this.broadcast(ServerWsMessage::outcome(outcome)),
        Notices::Individual(notices) => {
            for (player_id, outcome) in notices {
                debug!("[GameRoom] {:?} for {} in room {}", outcome, player_id, this.room_id);
                this.send_to(player_id, ServerWsMessage::outcome(outcome));
            }
        }
    }

    this.arena.flush();
    broadcast_changes(this);

    if status.finished {
        stop_game(this, ctx, &status);
    }
}

/// Cancel the tick loop, disconnect everyone and dispose of the room.
fn stop_game(this: &mut GameRoom, ctx: &mut Context<GameRoom>, status: &GameStatus) {
    if let Some(handle) = this.tick_timer.take() {
        ctx.cancel_future(handle);
    }
    match status.winner() {
        Some(winner) => info!("[GameRoom] Room {} won by {}", this.room_id, winner),
        None => info!("[GameRoom] Room {} ended in a draw", this.room_id),
    }
    for session in this.players.values() {
        session.close.do_send(CloseSession);
    }
    ctx.stop();
}
