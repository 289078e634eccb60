//! End-to-end store scenarios

use crate::common::{card, card_ids, two_list_board};
use kanban_client::client::BoardStore;
use pretty_assertions::assert_eq;

#[test]
fn move_card_to_empty_list() {
    let mut store = BoardStore::new();
    store.set_current_board(two_list_board());

    store.move_card_optimistic(100, 2, 0);

    let board = store.current_board().unwrap();
    assert_eq!(card_ids(board, 1), vec![101]);
    assert_eq!(card_ids(board, 2), vec![100]);

    let moved = board.find_card(100).unwrap();
    assert_eq!(moved.list_id, 2);
    assert_eq!(moved.position, 0);
    // the card left behind keeps its position untouched
    assert_eq!(board.find_card(101).unwrap().position, 1);
}

#[test]
fn added_card_lands_in_sorted_position() {
    let mut store = BoardStore::new();
    store.set_current_board(two_list_board());

    let mut middle = card(102, "C", 1, 0);
    middle.position = 1;
    store.add_card_optimistic(middle);

    let board = store.current_board().unwrap();
    let list = board.find_list(1).unwrap();
    assert_eq!(list.cards.iter().filter(|c| c.id == 102).count(), 1);
    let positions: Vec<i32> = list.cards.iter().map(|c| c.position).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn deleting_an_unknown_card_changes_nothing() {
    let mut store = BoardStore::new();
    store.set_current_board(two_list_board());
    let before = store.current_board().cloned().unwrap();

    store.delete_card_optimistic(4242);

    assert_eq!(store.current_board().unwrap(), &before);
}

#[test]
fn rollback_restores_the_board_after_every_operation() {
    let original = two_list_board();

    let operations: Vec<Box<dyn Fn(&mut BoardStore)>> = vec![
        Box::new(|s| s.add_card_optimistic(card(200, "New", 1, 5))),
        Box::new(|s| s.update_card_optimistic(card(100, "Renamed", 1, 0))),
        Box::new(|s| s.move_card_optimistic(100, 2, 0)),
        Box::new(|s| s.delete_card_optimistic(101)),
    ];

    for operation in operations {
        let mut store = BoardStore::new();
        store.set_current_board(original.clone());
        operation(&mut store);

        let snapshot = store.previous_board_state().cloned().unwrap();
        store.rollback_board(snapshot);

        assert_eq!(store.current_board().unwrap(), &original);
        assert!(store.previous_board_state().is_none());
    }
}
