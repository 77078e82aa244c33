//! Wire protocol: `{"type": ..., "payload": {...}}` envelopes on both
//! directions of the socket.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::snapshot::TableSnapshot;
use crate::domain::state::StartChoice;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientMsg {
    CreateRoom {
        room: String,
        seats: usize,
    },
    Join {
        room: String,
        name: String,
        #[serde(default)]
        seat: Option<usize>,
    },
    Leave,
    StartChoice {
        choice: StartChoice,
    },
    CutProceed,
    Bid {
        bid: u8,
    },
    Pass,
    PickTrump {
        trump: Suit,
    },
    StayHome,
    Exchange {
        cards: Vec<Card>,
    },
    ExchangeDone,
    PlayCard {
        card: Card,
    },
    NewHand,
    Chat {
        text: String,
    },
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerMsg {
    RoomCreated {
        room: String,
    },
    Joined {
        room: String,
        seat: usize,
    },
    TableState {
        room: String,
        state: TableSnapshot,
    },
    Chat {
        seat: usize,
        name: String,
        text: String,
    },
    Error {
        code: ErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    RoomNotFound,
    RoomExists,
    RoomFull,
    SeatTaken,
    NotJoined,
    BadRequest,
}
