//! Persistence API
//!
//! The confirming half of every optimistic mutation: the page
//! controller applies the change locally first, then calls one of these
//! operations; rejection triggers rollback. The trait exists so tests
//! can drive the controller with a double.

mod http;

pub use http::HttpBoardApi;

use crate::shared::board::{Board, BoardList, Card, Priority};
use crate::shared::error::SyncError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to create a board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    pub name: String,
    pub description: Option<String>,
    pub workspace_id: i64,
}

/// Request to create a card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub title: String,
    pub description: Option<String>,
    pub list_id: i64,
    pub position: i32,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Request to update a card's fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub list_id: Option<i64>,
    pub position: Option<i32>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<i64>,
}

impl UpdateCardRequest {
    /// Build the full-replacement request for a card value
    pub fn from_card(card: &Card) -> Self {
        Self {
            title: Some(card.title.clone()),
            description: card.description.clone(),
            list_id: Some(card.list_id),
            position: Some(card.position),
            priority: Some(card.priority),
            due_date: card.due_date,
            assigned_to: None,
        }
    }
}

/// Request to move a card to a new list and position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardRequest {
    pub target_list_id: i64,
    pub new_position: i32,
}

/// Request to reorder a list within its board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveListRequest {
    pub new_position: i32,
}

/// Board and card persistence operations
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Fetch a full board for initial load or reload
    async fn fetch_board(&self, board_id: i64) -> Result<Board, SyncError>;

    async fn create_board(&self, request: CreateBoardRequest) -> Result<Board, SyncError>;

    async fn create_card(&self, request: CreateCardRequest) -> Result<Card, SyncError>;

    async fn update_card(
        &self,
        card_id: i64,
        request: UpdateCardRequest,
    ) -> Result<Card, SyncError>;

    async fn move_card(&self, card_id: i64, request: MoveCardRequest) -> Result<Card, SyncError>;

    async fn delete_card(&self, card_id: i64) -> Result<(), SyncError>;

    async fn move_list(
        &self,
        list_id: i64,
        request: MoveListRequest,
    ) -> Result<BoardList, SyncError>;
}
