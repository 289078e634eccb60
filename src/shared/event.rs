//! Push-Channel Update Messages
//!
//! This module defines the messages the server broadcasts on the push
//! channel: card events on the per-board topic, and board-creation
//! announcements on the global topic.

use crate::shared::board::Card;
use serde::{Deserialize, Serialize};

/// Kind of card event on a board topic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardEventKind {
    Created,
    Updated,
    Moved,
    Deleted,
}

/// A card change broadcast to every subscriber of a board topic
///
/// `card` carries the full payload for `Created`/`Updated`/`Moved`; for
/// `Moved` its `list_id`/`position` are the new location. `Deleted`
/// carries only `card_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdateMessage {
    #[serde(rename = "type")]
    pub kind: CardEventKind,
    pub board_id: i64,
    #[serde(default)]
    pub card: Option<Card>,
    #[serde(default)]
    pub card_id: Option<i64>,
    /// Source list for move operations, when the server knows it
    #[serde(default)]
    pub previous_list_id: Option<i64>,
    #[serde(default)]
    pub last_modified_by: Option<i64>,
    #[serde(default)]
    pub last_modified_by_name: Option<String>,
}

impl CardUpdateMessage {
    fn new(kind: CardEventKind, board_id: i64) -> Self {
        Self {
            kind,
            board_id,
            card: None,
            card_id: None,
            previous_list_id: None,
            last_modified_by: None,
            last_modified_by_name: None,
        }
    }

    /// Create a CREATED event
    pub fn created(board_id: i64, card: Card) -> Self {
        Self {
            card: Some(card),
            ..Self::new(CardEventKind::Created, board_id)
        }
    }

    /// Create an UPDATED event
    pub fn updated(board_id: i64, card: Card) -> Self {
        Self {
            card: Some(card),
            ..Self::new(CardEventKind::Updated, board_id)
        }
    }

    /// Create a MOVED event; the card's own fields name the new location
    pub fn moved(board_id: i64, card: Card) -> Self {
        Self {
            card: Some(card),
            ..Self::new(CardEventKind::Moved, board_id)
        }
    }

    /// Create a DELETED event
    pub fn deleted(board_id: i64, card_id: i64) -> Self {
        Self {
            card_id: Some(card_id),
            ..Self::new(CardEventKind::Deleted, board_id)
        }
    }
}

/// Kind of event on the global boards topic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardEventKind {
    Created,
}

/// A board-level announcement on the global topic
///
/// Dashboard-level UI listens to these independently of any single
/// board subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardUpdateMessage {
    #[serde(rename = "type")]
    pub kind: BoardEventKind,
    pub board_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
