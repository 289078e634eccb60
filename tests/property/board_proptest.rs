//! Property-based tests for the board snapshot store

use kanban_client::client::BoardStore;
use kanban_client::shared::{Board, BoardList, Card};
use proptest::prelude::*;

/// One of the optimistic operations with pre-generated parameters
#[derive(Debug, Clone)]
enum StoreOp {
    Add { card_id: i64, list_slot: usize, position: i32 },
    Update { card_slot: usize, position: i32 },
    Move { card_slot: usize, list_slot: usize, position: i32 },
    Delete { card_slot: usize },
}

fn arb_board() -> impl Strategy<Value = Board> {
    (1usize..=4, prop::collection::vec((0usize..4, -20i32..20), 0..12)).prop_map(
        |(list_count, card_seeds)| {
            let mut board = Board::new(1, "Board");
            board.lists = (0..list_count)
                .map(|i| BoardList::new(i as i64 + 1, format!("List {}", i + 1), 1, i as i32))
                .collect();
            for (index, (slot, position)) in card_seeds.into_iter().enumerate() {
                let list = &mut board.lists[slot % list_count];
                let list_id = list.id;
                let card = Card::new(index as i64 + 100, format!("Card {}", index), list_id, position);
                list.cards.push(card);
            }
            for list in &mut board.lists {
                list.cards.sort_by_key(|c| c.position);
            }
            board
        },
    )
}

fn arb_op() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (500i64..600, 0usize..4, -20i32..20)
            .prop_map(|(card_id, list_slot, position)| StoreOp::Add { card_id, list_slot, position }),
        (0usize..16, -20i32..20).prop_map(|(card_slot, position)| StoreOp::Update { card_slot, position }),
        (0usize..16, 0usize..4, -20i32..20)
            .prop_map(|(card_slot, list_slot, position)| StoreOp::Move { card_slot, list_slot, position }),
        (0usize..16).prop_map(|card_slot| StoreOp::Delete { card_slot }),
    ]
}

/// Resolve a slot against what the board actually contains
fn pick_card(board: &Board, slot: usize) -> Option<i64> {
    let ids: Vec<i64> = board
        .lists
        .iter()
        .flat_map(|l| l.cards.iter().map(|c| c.id))
        .collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids[slot % ids.len()])
    }
}

fn pick_list(board: &Board, slot: usize) -> i64 {
    board.lists[slot % board.lists.len()].id
}

fn apply(store: &mut BoardStore, board: &Board, op: &StoreOp) {
    match op {
        StoreOp::Add { card_id, list_slot, position } => {
            let list_id = pick_list(board, *list_slot);
            store.add_card_optimistic(Card::new(*card_id, "generated", list_id, *position));
        }
        StoreOp::Update { card_slot, position } => {
            if let Some(card_id) = pick_card(board, *card_slot) {
                let mut card = board.find_card(card_id).unwrap().clone();
                card.title = "updated".to_string();
                card.position = *position;
                store.update_card_optimistic(card);
            }
        }
        StoreOp::Move { card_slot, list_slot, position } => {
            if let Some(card_id) = pick_card(board, *card_slot) {
                store.move_card_optimistic(card_id, pick_list(board, *list_slot), *position);
            }
        }
        StoreOp::Delete { card_slot } => {
            if let Some(card_id) = pick_card(board, *card_slot) {
                store.delete_card_optimistic(card_id);
            }
        }
    }
}

fn lists_sorted_by_position(board: &Board) -> bool {
    board
        .lists
        .iter()
        .all(|l| l.cards.windows(2).all(|w| w[0].position <= w[1].position))
}

proptest! {
    #[test]
    fn rollback_restores_the_pre_mutation_board(board in arb_board(), op in arb_op()) {
        let mut store = BoardStore::new();
        store.set_current_board(board.clone());

        apply(&mut store, &board, &op);

        let snapshot = store.previous_board_state().cloned().unwrap();
        store.rollback_board(snapshot);

        prop_assert_eq!(store.current_board().unwrap(), &board);
        prop_assert!(store.previous_board_state().is_none());
    }

    #[test]
    fn structural_ops_keep_every_list_sorted(board in arb_board(), op in arb_op()) {
        // updates intentionally do not re-sort, so only the structural
        // operations carry the invariant
        if !matches!(op, StoreOp::Update { .. }) {
            let mut store = BoardStore::new();
            store.set_current_board(board.clone());

            apply(&mut store, &board, &op);

            prop_assert!(lists_sorted_by_position(store.current_board().unwrap()));
        }
    }

    #[test]
    fn repeating_a_move_changes_nothing(board in arb_board(), card_slot in 0usize..16, list_slot in 0usize..4, position in -20i32..20) {
        if let Some(card_id) = pick_card(&board, card_slot) {
            let mut store = BoardStore::new();
            store.set_current_board(board.clone());
            let target = pick_list(&board, list_slot);

            store.move_card_optimistic(card_id, target, position);
            let once = store.current_board().cloned();
            store.move_card_optimistic(card_id, target, position);

            prop_assert_eq!(store.current_board(), once.as_ref());
        }
    }

    #[test]
    fn second_delete_is_a_no_op(board in arb_board(), card_slot in 0usize..16) {
        if let Some(card_id) = pick_card(&board, card_slot) {
            let mut store = BoardStore::new();
            store.set_current_board(board.clone());

            store.delete_card_optimistic(card_id);
            let once = store.current_board().cloned();
            store.delete_card_optimistic(card_id);

            prop_assert_eq!(store.current_board(), once.as_ref());
            prop_assert!(store.current_board().unwrap().find_card(card_id).is_none());
        }
    }
}
