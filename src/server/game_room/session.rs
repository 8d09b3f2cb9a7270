/// WebSocket session handler for a game room.
///
/// This actor manages a single client's connection: it takes a seat in the
/// room on start, relays direction commands, forwards server messages to the
/// socket, and frees the seat when the connection goes away.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse, error, http::StatusCode};
use actix_web_actors::ws;
use log::{info, warn};
use uuid::Uuid;

use super::messages::{
    ClientWsMessage, CloseSession, DirectionCommand, Join, Leave, SeatReleased, ServerWsMessage, SessionHandle,
};
use super::server::{FindRoom, GameRoom};
use crate::game::types::PlayerId;
use crate::server::ws_error::{http_error_response, ws_error_message};

/// Represents a client's WebSocket session in a game room.
pub struct RoomSession {
    pub player_id: PlayerId,
    pub room_id: Uuid,
    pub room_addr: Addr<GameRoom>,
}

impl Actor for RoomSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Takes a seat in the room, closing the socket if refused.
    fn started(&mut self, ctx: &mut Self::Context) {
        let addr = ctx.address();
        self.room_addr
            .send(Join {
                player_id: self.player_id,
                session: SessionHandle {
                    updates: addr.clone().recipient(),
                    close: addr.recipient(),
                },
            })
            .into_actor(self)
            .then(|res, act, ctx| {
                let refused = match res {
                    Ok(Ok(())) => None,
                    Ok(Err(reason)) => Some(reason),
                    Err(e) => Some(e.to_string()),
                };
                if let Some(reason) = refused {
                    warn!("[RoomSession] {} could not join room {}: {}", act.player_id, act.room_id, reason);
                    let context = act.room_id.to_string();
                    ctx.text(ws_error_message("JOIN_REFUSED", &reason, Some(&context)));
                    ctx.close(Some(ws::CloseReason {
                        code: ws::CloseCode::Again,
                        description: Some(reason),
                    }));
                    ctx.stop();
                }
                actix::fut::ready(())
            })
            .wait(ctx);
    }

    /// Called when the session stops. Removes the player from the room.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.room_addr.do_send(Leave {
            player_id: self.player_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for RoomSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(ClientWsMessage::ChangeDirection { direction }) => {
                        self.room_addr.do_send(DirectionCommand {
                            player_id: self.player_id,
                            direction,
                        });
                    }
                    Ok(ClientWsMessage::Ping) => {
                        // Keep-alive only.
                    }
                    Err(_e) => {
                        let context = self.player_id.to_string();
                        ctx.text(ws_error_message("INVALID_MESSAGE", "Invalid client message", Some(&context)));
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[RoomSession] Protocol error for {}: {}", self.player_id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for RoomSession {
    type Result = ();

    /// Handles messages sent from the room to this session.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                warn!("[RoomSession] Failed to serialize ServerWsMessage: {}", e);
                ctx.text(ws_error_message("INTERNAL_ERROR", "Internal server error", None));
            }
        }
    }
}

impl Handler<CloseSession> for RoomSession {
    type Result = ();

    fn handle(&mut self, _: CloseSession, ctx: &mut Self::Context) {
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Normal,
            description: Some("Game over".into()),
        }));
        ctx.stop();
    }
}

/// WebSocket endpoint for playing.
///
/// Every connection gets a fresh player id and a seat reserved in the next
/// open room.
pub async fn ws_game(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let found = data.room_manager
        .send(FindRoom)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let (room_id, room_addr) = match found {
        Ok(room) => room,
        Err(message) => {
            return Ok(http_error_response(
                "ROOM_UNAVAILABLE",
                &message,
                None,
                StatusCode::SERVICE_UNAVAILABLE,
            ));
        }
    };

    let player_id = Uuid::new_v4();
    info!("[RoomSession] Player {} connecting to room {}", player_id, room_id);

    ws::start(
        RoomSession {
            player_id,
            room_id,
            room_addr,
        },
        &req,
        stream,
    )
    .inspect_err(|e| {
        warn!("[RoomSession] Handshake failed for {}: {}", player_id, e);
        data.room_manager.do_send(SeatReleased { room_id });
    })
}
