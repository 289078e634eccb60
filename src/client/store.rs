//! # Board Snapshot Store
//!
//! Holds the single in-memory copy of the board currently on screen and
//! one rollback snapshot. Every mutating operation first captures a
//! deep copy of the pre-mutation board, then works on its own owned
//! value, so the snapshot and the current board never share structure.
//!
//! All operations are total: with no board loaded, or with a target
//! list/card that does not exist, they are silent no-ops. A stale view
//! beats a crashed one.

use crate::shared::board::{Board, Card};

/// The board snapshot store
///
/// Owned by one view controller; there is no global instance. Callers
/// read through `current_board()` and mutate only through the
/// operations below.
#[derive(Debug, Default)]
pub struct BoardStore {
    current_board: Option<Board>,
    previous_board_state: Option<Board>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The board currently on screen, if one is loaded
    pub fn current_board(&self) -> Option<&Board> {
        self.current_board.as_ref()
    }

    /// The rollback target: the board as it was immediately before the
    /// most recent unconfirmed mutation
    pub fn previous_board_state(&self) -> Option<&Board> {
        self.previous_board_state.as_ref()
    }

    /// Install a freshly loaded board
    ///
    /// A full reload resets the rollback baseline; there is nothing
    /// older to roll back to.
    pub fn set_current_board(&mut self, board: Board) {
        self.previous_board_state = Some(board.clone());
        self.current_board = Some(board);
    }

    /// Append `card` to the list matching its `list_id` and re-sort
    /// that list ascending by position
    ///
    /// A second CREATED delivery for the same identity appends a
    /// duplicate entry; callers that can see replays de-duplicate
    /// before inserting.
    pub fn add_card_optimistic(&mut self, card: Card) {
        let Some(mut board) = self.current_board.take() else {
            return;
        };
        self.previous_board_state = Some(board.clone());

        if let Some(list) = board.lists.iter_mut().find(|l| l.id == card.list_id) {
            list.cards.push(card);
            list.cards.sort_by_key(|c| c.position);
        }

        self.current_board = Some(board);
    }

    /// Replace the card with matching identity, by value, wherever it
    /// occurs
    ///
    /// Never moves a card between lists and never re-sorts; a changed
    /// position only takes visual effect through a MOVED event or a
    /// reload.
    pub fn update_card_optimistic(&mut self, card: Card) {
        let Some(mut board) = self.current_board.take() else {
            return;
        };
        self.previous_board_state = Some(board.clone());

        for list in &mut board.lists {
            for existing in &mut list.cards {
                if existing.id == card.id {
                    *existing = card.clone();
                }
            }
        }

        self.current_board = Some(board);
    }

    /// Remove the card from its source list, point it at the target
    /// list and position, insert and re-sort the target list
    ///
    /// Identity is unique, so the first match is the only match. When
    /// the target list is not on the board the card is dropped from
    /// view; the confirming persistence call fails for such a target
    /// and rolls the board back.
    pub fn move_card_optimistic(&mut self, card_id: i64, target_list_id: i64, new_position: i32) {
        let Some(mut board) = self.current_board.take() else {
            return;
        };
        self.previous_board_state = Some(board.clone());

        let mut moved: Option<Card> = None;
        for list in &mut board.lists {
            if let Some(index) = list.cards.iter().position(|c| c.id == card_id) {
                moved = Some(list.cards.remove(index));
                break;
            }
        }

        if let Some(mut card) = moved {
            card.list_id = target_list_id;
            card.position = new_position;
            if let Some(target) = board.lists.iter_mut().find(|l| l.id == target_list_id) {
                target.cards.push(card);
                target.cards.sort_by_key(|c| c.position);
            } else {
                tracing::warn!(
                    "move target list {} not on board, card {} dropped from view",
                    target_list_id,
                    card_id
                );
            }
        }

        self.current_board = Some(board);
    }

    /// Remove the card with matching identity from whichever list
    /// contains it; no-op if absent
    pub fn delete_card_optimistic(&mut self, card_id: i64) {
        let Some(mut board) = self.current_board.take() else {
            return;
        };
        self.previous_board_state = Some(board.clone());

        for list in &mut board.lists {
            list.cards.retain(|c| c.id != card_id);
        }

        self.current_board = Some(board);
    }

    /// Force-set the current board and clear the rollback snapshot
    ///
    /// Used to recover after a failed confirming call.
    pub fn rollback_board(&mut self, board: Board) {
        self.current_board = Some(board);
        self.previous_board_state = None;
    }
}
