use actix::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use log::{debug, info, warn};

use crate::config::loader::GameConfig;
use crate::game::state::Arena;
use crate::game::types::{Direction, PlayerId};
use crate::server::game_room::messages::{
    DirectionCommand, Join, Leave, RoomClosed, SeatReleased, ServerWsMessage, SessionHandle,
};
use crate::server::game_room::tick::{broadcast_changes, start_game};

/// One running game: owns the arena and the sockets of everyone seated in it.
pub struct GameRoom {
    pub room_id: Uuid,
    pub arena: Arena,
    /// Every connected client, defeated players included (they keep watching).
    pub players: HashMap<PlayerId, SessionHandle>,
    pub(crate) manager: Addr<RoomManager>,
    pub(crate) tick_timer: Option<SpawnHandle>,
    pub(crate) started: bool,
    /// Join slots, `seats[i]` holds the player using initial state `i + 1`.
    seats: Vec<Option<PlayerId>>,
}

impl Actor for GameRoom {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[GameRoom] Room {} created ({} seats)", self.room_id, self.seats.len());
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("[GameRoom] Dispose room {}", self.room_id);
        self.manager.do_send(RoomClosed { room_id: self.room_id });
    }
}

impl GameRoom {
    pub fn new(room_id: Uuid, config: &GameConfig, manager: Addr<RoomManager>) -> Result<Self, String> {
        let arena = Arena::new(config).map_err(|e| e.to_string())?;
        Ok(Self {
            room_id,
            arena,
            players: HashMap::new(),
            manager,
            tick_timer: None,
            started: false,
            seats: vec![None; config.clients_to_play],
        })
    }

    /// Send `msg` to every connected client.
    pub fn broadcast(&self, msg: ServerWsMessage) {
        for session in self.players.values() {
            session.updates.do_send(msg.clone());
        }
    }

    pub fn send_to(&self, player_id: PlayerId, msg: ServerWsMessage) {
        if let Some(session) = self.players.get(&player_id) {
            session.updates.do_send(msg);
        }
    }

    fn is_full(&self) -> bool {
        self.seats.iter().all(Option::is_some)
    }

    /// Put `player_id` on the lowest free seat. Returns the 0-based seat.
    fn take_seat(&mut self, player_id: PlayerId) -> Result<usize, String> {
        if self.started {
            return Err("Game already started".to_string());
        }
        let Some(slot) = self.seats.iter().position(Option::is_none) else {
            return Err("Room is full".to_string());
        };
        self.arena
            .create_player(player_id, slot + 1)
            .map_err(|e| e.to_string())?;
        self.seats[slot] = Some(player_id);
        Ok(slot)
    }
}

impl Handler<Join> for GameRoom {
    type Result = Result<(), String>;

    fn handle(&mut self, msg: Join, ctx: &mut Context<Self>) -> Self::Result {
        let slot = match self.take_seat(msg.player_id) {
            Ok(slot) => slot,
            Err(reason) => {
                // The manager counted this join; give the seat back while it can still be used.
                if !self.started {
                    self.manager.do_send(SeatReleased { room_id: self.room_id });
                }
                return Err(reason);
            }
        };
        self.players.insert(msg.player_id, msg.session);
        info!("[GameRoom] Player {} joined room {} as #{}", msg.player_id, self.room_id, slot + 1);

        if self.is_full() {
            start_game(self, ctx);
        } else {
            // Latecomers need everyone already seated, not only the newcomer.
            self.arena.refresh_all_players_positions();
            broadcast_changes(self);
        }
        Ok(())
    }
}

impl Handler<Leave> for GameRoom {
    type Result = ();

    fn handle(&mut self, msg: Leave, _: &mut Context<Self>) -> Self::Result {
        if self.players.remove(&msg.player_id).is_none() {
            return;
        }
        // Before the start a seat can be handed out again.
        if !self.started {
            for seat in self.seats.iter_mut().filter(|s| **s == Some(msg.player_id)) {
                *seat = None;
            }
            self.manager.do_send(SeatReleased { room_id: self.room_id });
        }
        self.arena.remove_player(msg.player_id);
        info!("[GameRoom] Player {} left room {}", msg.player_id, self.room_id);
        broadcast_changes(self);
    }
}

impl Handler<DirectionCommand> for GameRoom {
    type Result = ();

    fn handle(&mut self, msg: DirectionCommand, _: &mut Context<Self>) -> Self::Result {
        let Ok(direction) = msg.direction.parse::<Direction>() else {
            debug!("[GameRoom] Ignoring direction {:?} from {}", msg.direction, msg.player_id);
            return;
        };
        if !self.arena.change_player_direction(msg.player_id, direction) {
            debug!("[GameRoom] Turn {} refused for {}", direction, msg.player_id);
        }
    }
}

struct RoomSlot {
    addr: Addr<GameRoom>,
    /// Seats handed out by `FindRoom` and not released since.
    reserved: usize,
}

/// Hands out rooms: the oldest one with a free seat, a fresh one otherwise.
///
/// Seats are reserved when a room is handed out, so concurrent connections
/// never outnumber the seats of the room they are sent to.
pub struct RoomManager {
    config: Arc<GameConfig>,
    rooms: HashMap<Uuid, RoomSlot>,
    /// Rooms with unreserved seats, oldest first.
    waiting: Vec<Uuid>,
}

#[derive(Message)]
#[rtype(result = "Result<(Uuid, Addr<GameRoom>), String>")]
pub struct FindRoom;

impl RoomManager {
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self {
            config,
            rooms: HashMap::new(),
            waiting: Vec::new(),
        }
    }

    pub fn create_room(&mut self, manager: Addr<RoomManager>) -> Result<Uuid, String> {
        let room_id = Uuid::new_v4();
        let addr = GameRoom::new(room_id, &self.config, manager)?.start();
        self.rooms.insert(room_id, RoomSlot { addr, reserved: 0 });
        self.waiting.push(room_id);
        Ok(room_id)
    }
}

impl Actor for RoomManager {
    type Context = Context<Self>;
}

impl Handler<FindRoom> for RoomManager {
    type Result = Result<(Uuid, Addr<GameRoom>), String>;

    fn handle(&mut self, _: FindRoom, ctx: &mut Context<Self>) -> Self::Result {
        self.waiting
            .retain(|id| self.rooms.get(id).is_some_and(|room| room.addr.connected()));
        let room_id = match self.waiting.first() {
            Some(id) => *id,
            None => self.create_room(ctx.address())?,
        };

        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or_else(|| format!("Room {} is gone", room_id))?;
        room.reserved += 1;
        let addr = room.addr.clone();
        if room.reserved >= self.config.clients_to_play {
            self.waiting.retain(|id| *id != room_id);
            debug!("[RoomManager] Every seat of room {} is reserved", room_id);
        }
        Ok((room_id, addr))
    }
}

impl Handler<SeatReleased> for RoomManager {
    type Result = ();

    fn handle(&mut self, msg: SeatReleased, _: &mut Context<Self>) -> Self::Result {
        let Some(room) = self.rooms.get_mut(&msg.room_id) else {
            return;
        };
        room.reserved = room.reserved.saturating_sub(1);
        if !self.waiting.contains(&msg.room_id) {
            self.waiting.push(msg.room_id);
        }
    }
}

impl Handler<RoomClosed> for RoomManager {
    type Result = ();

    fn handle(&mut self, msg: RoomClosed, _: &mut Context<Self>) -> Self::Result {
        if self.rooms.remove(&msg.room_id).is_none() {
            warn!("[RoomManager] Unknown room {} closed", msg.room_id);
        }
        self.waiting.retain(|id| *id != msg.room_id);
        debug!("[RoomManager] {} rooms running", self.rooms.len());
    }
}
