//! One websocket session per connection.
//!
//! The actor owns the read side; its mailbox is the outbound queue. Game
//! actions are validated and applied inside the room's critical section via
//! `ws::game`; illegal actions are rejected silently, resource errors are
//! answered on this connection only.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{auction, exchange, hand, tricks};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::state::app_state::AppState;
use crate::ws::game::{self, Outcome};
use crate::ws::hub::{Push, Room, RoomRegistry};
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(Uuid::new_v4(), app_state.rooms());
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    rooms: Arc<RoomRegistry>,
    /// Set once the connection is seated at a room.
    joined: Option<(Arc<Room>, usize)>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, rooms: Arc<RoomRegistry>) -> Self {
        Self {
            conn_id,
            rooms,
            joined: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: impl Into<String>) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code,
                message: message.into(),
            },
        );
    }

    /// Resource errors are reported to the requesting connection only.
    fn send_resource_error(ctx: &mut ws::WebsocketContext<Self>, err: DomainError) {
        let code = match &err {
            DomainError::NotFound(NotFoundKind::Room, _) => ErrorCode::RoomNotFound,
            DomainError::Conflict(ConflictKind::RoomFull, _) => ErrorCode::RoomFull,
            DomainError::Conflict(ConflictKind::SeatTaken, _) => ErrorCode::SeatTaken,
            DomainError::Conflict(ConflictKind::RoomExists, _) => ErrorCode::RoomExists,
            _ => ErrorCode::BadRequest,
        };
        Self::send_error(ctx, code, err.to_string());
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn leave_current(&mut self) {
        if let Some((room, _seat)) = self.joined.take() {
            game::leave_room(&self.rooms, &room, self.conn_id);
        }
    }

    /// The seat this session occupies, or an error to the client.
    fn seated(&self, ctx: &mut ws::WebsocketContext<Self>) -> Option<(Arc<Room>, usize)> {
        match &self.joined {
            Some((room, seat)) => Some((room.clone(), *seat)),
            None => {
                Self::send_error(ctx, ErrorCode::NotJoined, "Join a room first");
                None
            }
        }
    }

    /// Rejections are silent on the wire; they only show up in debug logs.
    fn finish(&self, action: &'static str, outcome: Outcome) {
        if let Outcome::Rejected(err) = outcome {
            debug!(
                conn_id = %self.conn_id,
                action,
                error = %err,
                "[WS SESSION] action rejected"
            );
        }
    }

    fn handle_client_msg(&mut self, msg: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match msg {
            ClientMsg::CreateRoom { room, seats } => match self.rooms.create(&room, seats) {
                Ok(_) => Self::send_json(ctx, &ServerMsg::RoomCreated { room }),
                Err(err) => Self::send_resource_error(ctx, err),
            },
            ClientMsg::Join { room, name, seat } => {
                if self.joined.is_some() {
                    Self::send_error(ctx, ErrorCode::BadRequest, "Already seated; leave first");
                    return;
                }
                let recipient = ctx.address().recipient();
                match game::join_room(&self.rooms, &room, self.conn_id, &name, seat, recipient) {
                    Ok((room_arc, seat_idx)) => {
                        self.joined = Some((room_arc.clone(), seat_idx));
                        // Ordering guarantee: ack first, then the projection.
                        Self::send_json(
                            ctx,
                            &ServerMsg::Joined {
                                room,
                                seat: seat_idx,
                            },
                        );
                        game::broadcast_state(&room_arc);
                    }
                    Err(err) => Self::send_resource_error(ctx, err),
                }
            }
            ClientMsg::Leave => self.leave_current(),
            ClientMsg::Chat { text } => {
                if let Some((room, _seat)) = self.seated(ctx) {
                    game::chat(&room, self.conn_id, text);
                }
            }
            ClientMsg::StartChoice { choice } => {
                if let Some((room, seat)) = self.seated(ctx) {
                    let outcome = game::apply(&room, |t| hand::start_choice(t, seat, choice));
                    self.finish("start_choice", outcome);
                }
            }
            ClientMsg::CutProceed => {
                if let Some((room, seat)) = self.seated(ctx) {
                    let outcome = game::apply(&room, |t| hand::cut_proceed(t, seat));
                    self.finish("cut_proceed", outcome);
                }
            }
            ClientMsg::Bid { bid } => {
                if let Some((room, seat)) = self.seated(ctx) {
                    let outcome = game::apply(&room, |t| auction::bid(t, seat, bid));
                    self.finish("bid", outcome);
                }
            }
            ClientMsg::Pass => {
                if let Some((room, seat)) = self.seated(ctx) {
                    let outcome = game::apply(&room, |t| auction::pass(t, seat));
                    self.finish("pass", outcome);
                }
            }
            ClientMsg::PickTrump { trump } => {
                if let Some((room, seat)) = self.seated(ctx) {
                    let outcome = game::apply(&room, |t| auction::pick_trump(t, seat, trump));
                    self.finish("pick_trump", outcome);
                }
            }
            ClientMsg::StayHome => {
                if let Some((room, seat)) = self.seated(ctx) {
                    let outcome = game::apply(&room, |t| exchange::stay_home(t, seat));
                    self.finish("stay_home", outcome);
                }
            }
            ClientMsg::Exchange { cards } => {
                if let Some((room, seat)) = self.seated(ctx) {
                    let outcome =
                        game::apply(&room, |t| exchange::exchange_cards(t, seat, &cards));
                    self.finish("exchange", outcome);
                }
            }
            ClientMsg::ExchangeDone => {
                if let Some((room, seat)) = self.seated(ctx) {
                    let outcome = game::apply(&room, |t| exchange::exchange_done(t, seat));
                    self.finish("exchange_done", outcome);
                }
            }
            ClientMsg::PlayCard { card } => {
                if let Some((room, seat)) = self.seated(ctx) {
                    let outcome =
                        game::apply(&room, |t| tricks::play_card(t, seat, card).map(|_| ()));
                    self.finish("play_card", outcome);
                }
            }
            ClientMsg::NewHand => {
                if let Some((room, _seat)) = self.seated(ctx) {
                    let outcome = game::apply(&room, hand::new_hand);
                    self.finish("new_hand", outcome);
                }
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.leave_current();
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.handle_client_msg(cmd, ctx),
                    Err(err) => {
                        // Malformed input is dropped; the connection stays usable.
                        debug!(
                            conn_id = %self.conn_id,
                            error = %err,
                            "[WS SESSION] malformed message dropped"
                        );
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                debug!(conn_id = %self.conn_id, "[WS SESSION] binary frame dropped");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Push> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Push, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
