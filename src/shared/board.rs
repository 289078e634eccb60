//! Board Data Structures
//!
//! Represents a board, its lists and their cards as the server sends
//! them. A `Board` is the unit of optimistic state: the client keeps
//! exactly one current board in memory at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Done,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// A card on a board
///
/// `position` is a numeric sort key, unique within a list by convention
/// only; lists are kept sorted ascending by re-sorting after inserts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Server-assigned card identity
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    /// Sort key within the owning list
    pub position: i32,
    /// Identity of the owning list
    pub list_id: i64,
    /// Display name of the owning list, when the server includes it
    #[serde(default)]
    pub list_name: Option<String>,
    #[serde(default)]
    pub assigned_user_ids: Vec<i64>,
    #[serde(default)]
    pub assigned_user_names: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Card {
    /// Create a card with the fields every card must carry
    pub fn new(id: i64, title: impl Into<String>, list_id: i64, position: i32) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            due_date: None,
            priority: Priority::default(),
            position,
            list_id,
            list_name: None,
            assigned_user_ids: Vec::new(),
            assigned_user_names: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// A list of cards on a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardList {
    pub id: i64,
    pub name: String,
    /// Owning board, referenced by identity
    pub board_id: i64,
    pub position: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Cards ordered ascending by position
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl BoardList {
    pub fn new(id: i64, name: impl Into<String>, board_id: i64, position: i32) -> Self {
        Self {
            id,
            name: name.into(),
            board_id,
            position,
            created_at: None,
            updated_at: None,
            cards: Vec::new(),
        }
    }
}

/// A board with its lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<i64>,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lists: Vec<BoardList>,
}

impl Board {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            workspace_id: None,
            created_by: None,
            created_at: None,
            updated_at: None,
            lists: Vec::new(),
        }
    }

    /// Find a list by identity
    pub fn find_list(&self, list_id: i64) -> Option<&BoardList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    /// Find a card by identity across all lists
    pub fn find_card(&self, card_id: i64) -> Option<&Card> {
        self.lists
            .iter()
            .flat_map(|l| l.cards.iter())
            .find(|c| c.id == card_id)
    }

    /// Total number of cards on the board
    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|l| l.cards.len()).sum()
    }
}
