//! # Page Controllers
//!
//! One controller per view. `BoardPage` owns the lifecycle for a single
//! board on screen: the snapshot store, the board-topic subscription,
//! and the reconciliation policy that merges local intents with
//! server-pushed events. `dashboard` holds the board-agnostic
//! controller for the global announcements topic.
//!
//! ## Reconciliation policy
//!
//! Every local intent applies to the store immediately, then the
//! confirming persistence call runs; rejection rolls the board back to
//! the pre-mutation snapshot and hands the error to the caller for
//! display. Remote events apply through the same store operations in
//! arrival order. There is no buffering and no coalescing: interleaved
//! local and remote writes resolve last-writer-wins, and a server echo
//! of this client's own change is safe to re-apply in either order.

pub mod dashboard;

use crate::client::api::{
    BoardApi, CreateCardRequest, MoveCardRequest, MoveListRequest, UpdateCardRequest,
};
use crate::client::config::Config;
use crate::client::realtime::BoardSubscription;
use crate::client::store::BoardStore;
use crate::shared::board::{Board, Card};
use crate::shared::error::SyncError;
use crate::shared::event::{CardEventKind, CardUpdateMessage};

/// Lifecycle of a board view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No board loaded
    Idle,
    /// Board in the store, listener attached
    Loaded,
    /// Listener detach in progress
    Unmounting,
}

/// Controller for the board view currently on screen
pub struct BoardPage<A: BoardApi> {
    api: A,
    config: Config,
    store: BoardStore,
    subscription: Option<BoardSubscription>,
    view_state: ViewState,
}

impl<A: BoardApi> BoardPage<A> {
    pub fn new(api: A, config: Config) -> Self {
        Self {
            api,
            config,
            store: BoardStore::new(),
            subscription: None,
            view_state: ViewState::Idle,
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// The board currently on screen
    pub fn board(&self) -> Option<&Board> {
        self.store.current_board()
    }

    /// Fetch a board, install it and attach the board-topic listener
    ///
    /// Re-loading with a different identity tears the previous
    /// subscription down first, so events can never reach a stale view.
    pub async fn load_board(&mut self, board_id: i64) -> Result<(), SyncError> {
        let board = self.api.fetch_board(board_id).await?;
        if let Some(subscription) = self.subscription.take() {
            subscription.shutdown().await;
        }
        self.store.set_current_board(board);
        self.subscription = Some(BoardSubscription::spawn(&self.config, board_id));
        self.view_state = ViewState::Loaded;
        tracing::info!("board {} loaded", board_id);
        Ok(())
    }

    /// Apply one server-pushed card event to the store
    ///
    /// Events for any board other than the one on screen are discarded.
    pub fn apply_remote(&mut self, message: CardUpdateMessage) {
        let Some(board) = self.store.current_board() else {
            return;
        };
        if message.board_id != board.id {
            tracing::debug!(
                "ignoring event for board {} while viewing {}",
                message.board_id,
                board.id
            );
            return;
        }

        match message.kind {
            CardEventKind::Created => {
                if let Some(card) = message.card {
                    self.store.add_card_optimistic(card);
                }
            }
            CardEventKind::Updated => {
                if let Some(card) = message.card {
                    self.store.update_card_optimistic(card);
                }
            }
            CardEventKind::Moved => {
                if let Some(card) = message.card {
                    let (card_id, list_id, position) = (card.id, card.list_id, card.position);
                    self.store.move_card_optimistic(card_id, list_id, position);
                }
            }
            CardEventKind::Deleted => {
                if let Some(card_id) = message.card_id {
                    self.store.delete_card_optimistic(card_id);
                }
            }
        }
    }

    /// Drain and apply every queued remote event, in arrival order
    ///
    /// Returns how many events were applied.
    pub fn pump_remote(&mut self) -> usize {
        let Some(mut subscription) = self.subscription.take() else {
            return 0;
        };
        let mut applied = 0;
        while let Some(message) = subscription.try_next() {
            self.apply_remote(message);
            applied += 1;
        }
        self.subscription = Some(subscription);
        applied
    }

    /// Create a card: show `placeholder` immediately, persist, then
    /// swap the placeholder for the server-assigned card
    pub async fn create_card(
        &mut self,
        placeholder: Card,
        request: CreateCardRequest,
    ) -> Result<Card, SyncError> {
        let placeholder_id = placeholder.id;
        self.store.add_card_optimistic(placeholder);
        let result = self.api.create_card(request).await;
        match result {
            Ok(card) => {
                self.store.delete_card_optimistic(placeholder_id);
                self.store.add_card_optimistic(card.clone());
                Ok(card)
            }
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }

    /// Update a card's fields everywhere it appears
    pub async fn update_card(&mut self, card: Card) -> Result<Card, SyncError> {
        let request = UpdateCardRequest::from_card(&card);
        let card_id = card.id;
        self.store.update_card_optimistic(card);
        let result = self.api.update_card(card_id, request).await;
        match result {
            Ok(card) => Ok(card),
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }

    /// Move a card to `(target_list_id, new_position)`, as supplied by
    /// the drag-and-drop surface
    pub async fn move_card(
        &mut self,
        card_id: i64,
        target_list_id: i64,
        new_position: i32,
    ) -> Result<(), SyncError> {
        self.store
            .move_card_optimistic(card_id, target_list_id, new_position);
        let request = MoveCardRequest {
            target_list_id,
            new_position,
        };
        let result = self.api.move_card(card_id, request).await;
        match result {
            Ok(_card) => Ok(()),
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }

    /// Delete a card
    pub async fn delete_card(&mut self, card_id: i64) -> Result<(), SyncError> {
        self.store.delete_card_optimistic(card_id);
        let result = self.api.delete_card(card_id).await;
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }

    /// Reorder a list, then reload the board to pick up the server's
    /// ordering
    ///
    /// List reordering has no optimistic store operation; the reload
    /// also resets the rollback baseline.
    pub async fn move_list(&mut self, list_id: i64, new_position: i32) -> Result<(), SyncError> {
        self.api
            .move_list(list_id, MoveListRequest { new_position })
            .await?;
        if let Some(board_id) = self.store.current_board().map(|b| b.id) {
            let board = self.api.fetch_board(board_id).await?;
            self.store.set_current_board(board);
        }
        Ok(())
    }

    /// Detach the listener and return to idle
    ///
    /// The store keeps its last board; it goes stale rather than blank
    /// until the next load.
    pub async fn unmount(&mut self) {
        self.view_state = ViewState::Unmounting;
        if let Some(subscription) = self.subscription.take() {
            subscription.shutdown().await;
        }
        self.view_state = ViewState::Idle;
    }

    fn rollback(&mut self) {
        if let Some(previous) = self.store.previous_board_state().cloned() {
            tracing::warn!("persistence call failed, rolling back optimistic change");
            self.store.rollback_board(previous);
        }
    }
}
