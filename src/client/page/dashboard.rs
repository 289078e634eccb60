//! Dashboard controller
//!
//! Consumes the global announcements topic so board-level UI can react
//! to boards created by other clients. Architecturally the same
//! lifecycle as the board page, decoupled from any single board
//! identity.

use crate::client::config::Config;
use crate::client::realtime::GlobalSubscription;
use crate::shared::event::{BoardEventKind, BoardUpdateMessage};

/// A board as the dashboard knows it
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Controller for the dashboard view
pub struct DashboardController {
    subscription: Option<GlobalSubscription>,
    boards: Vec<BoardSummary>,
}

impl DashboardController {
    pub fn new() -> Self {
        Self {
            subscription: None,
            boards: Vec::new(),
        }
    }

    /// Attach the global-topic listener
    pub fn mount(&mut self, config: &Config) {
        if self.subscription.is_none() {
            self.subscription = Some(GlobalSubscription::spawn(config));
        }
    }

    /// Replace the known boards, e.g. from an initial fetch
    pub fn set_boards(&mut self, boards: Vec<BoardSummary>) {
        self.boards = boards;
    }

    pub fn boards(&self) -> &[BoardSummary] {
        &self.boards
    }

    /// Apply one announcement
    ///
    /// A reconnect can replay announcements, so creation is keyed by
    /// board identity rather than appended blindly.
    pub fn apply_announcement(&mut self, message: BoardUpdateMessage) {
        match message.kind {
            BoardEventKind::Created => {
                if self.boards.iter().any(|b| b.id == message.board_id) {
                    tracing::debug!("board {} already known, ignoring replay", message.board_id);
                    return;
                }
                tracing::info!("board {} announced: {}", message.board_id, message.name);
                self.boards.push(BoardSummary {
                    id: message.board_id,
                    name: message.name,
                    description: message.description,
                });
            }
        }
    }

    /// Drain and apply every queued announcement; returns the count
    pub fn pump(&mut self) -> usize {
        let Some(mut subscription) = self.subscription.take() else {
            return 0;
        };
        let mut applied = 0;
        while let Some(message) = subscription.try_next() {
            self.apply_announcement(message);
            applied += 1;
        }
        self.subscription = Some(subscription);
        applied
    }

    /// Detach the listener; known boards stay for the next mount
    pub async fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.shutdown().await;
        }
    }
}

impl Default for DashboardController {
    fn default() -> Self {
        Self::new()
    }
}
