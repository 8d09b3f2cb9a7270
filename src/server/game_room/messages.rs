use actix::prelude::*;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::game::state::ArenaDelta;
use crate::game::types::PlayerId;

/// Client -> server. `direction` is kept as raw text: unknown values are ignored, not rejected.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    ChangeDirection { direction: String },
    Ping,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Lose,
    Draw,
}

impl GameOutcome {
    pub fn message(self) -> &'static str {
        match self {
            GameOutcome::Win => "You win :D",
            GameOutcome::Lose => "You lose :/",
            GameOutcome::Draw => "Draw :o",
        }
    }
}

/// Server -> client.
#[derive(Message, Serialize, Deserialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    StateUpdate(ArenaDelta),
    Outcome {
        result: GameOutcome,
        message: String,
    },
}

impl ServerWsMessage {
    pub fn outcome(result: GameOutcome) -> Self {
        Self::Outcome { result, message: result.message().to_string() }
    }
}

/// Room -> session: the game is over, close the socket.
#[derive(Message)]
#[rtype(result = "()")]
pub struct CloseSession;

/// How a room reaches one connected client.
#[derive(Clone)]
pub struct SessionHandle {
    pub updates: Recipient<ServerWsMessage>,
    pub close: Recipient<CloseSession>,
}

/// Session -> room: take a seat.
#[derive(Message)]
#[rtype(result = "Result<(), String>")]
pub struct Join {
    pub player_id: PlayerId,
    pub session: SessionHandle,
}

/// Session -> room: the socket went away.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Leave {
    pub player_id: PlayerId,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct DirectionCommand {
    pub player_id: PlayerId,
    pub direction: String,
}

/// Room or endpoint -> manager: a seat reserved by `FindRoom` will not be
/// used (refused join, leave before the start, failed handshake).
#[derive(Message)]
#[rtype(result = "()")]
pub struct SeatReleased {
    pub room_id: Uuid,
}

/// Room -> manager: the room stopped.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RoomClosed {
    pub room_id: Uuid,
}
