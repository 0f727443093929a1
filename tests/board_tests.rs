//! Board tests - collision, locking and line clears through the public API

use typefall::core::Board;
use typefall::types::{Archetype, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i32 {
        for x in 0..BOARD_WIDTH as i32 {
            assert_eq!(board.get(x, y), Some(None), "cell ({x}, {y})");
        }
    }
    assert!(board.is_empty());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
}

#[test]
fn test_can_move_walls_floor_and_ceiling() {
    let board = Board::new();
    let bar = [(0, 0), (1, 0), (2, 0), (3, 0)];

    assert!(board.can_move(0, 0, &bar));
    assert!(board.can_move(6, 19, &bar));
    assert!(!board.can_move(7, 0, &bar));
    assert!(!board.can_move(-1, 0, &bar));
    assert!(!board.can_move(0, 20, &bar));
    // The anchor may sit above the board as long as the cells do not.
    assert!(board.can_move(0, -1, &[(0, 1)]));
    assert!(!board.can_move(0, -1, &[(0, 0)]));
}

#[test]
fn test_can_move_overlap() {
    let mut board = Board::new();
    board.set(5, 10, Some(Archetype::T));
    assert!(!board.can_move(4, 10, &[(0, 0), (1, 0)]));
    assert!(board.can_move(4, 11, &[(0, 0), (1, 0)]));
}

#[test]
fn test_lock_tags_cells_with_archetype() {
    let mut board = Board::new();
    assert!(board.lock(2, 17, &[(0, 0), (0, 1), (1, 1)], Archetype::V));
    assert_eq!(board.get(2, 17), Some(Some(Archetype::V)));
    assert_eq!(board.get(3, 18), Some(Some(Archetype::V)));
    assert_eq!(board.filled_count(), 3);

    // Overlapping lock is refused without touching the board.
    assert!(!board.lock(2, 17, &[(0, 0)], Archetype::O));
    assert_eq!(board.get(2, 17), Some(Some(Archetype::V)));
}

#[test]
fn test_clear_non_contiguous_rows_shifts_partial_rows() {
    let mut board = Board::new();
    board.fill_row(5, Archetype::One);
    board.fill_row(7, Archetype::Two);
    board.set(3, 6, Some(Archetype::L));
    board.set(8, 4, Some(Archetype::J));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[7, 5]);

    // Row 6 drops by one (one full row below it), row 4 by two.
    assert_eq!(board.get(3, 7), Some(Some(Archetype::L)));
    assert_eq!(board.get(8, 6), Some(Some(Archetype::J)));
    assert_eq!(board.filled_count(), 2);
    assert!(!board.is_row_full(5));
    assert!(!board.is_row_full(7));
}

#[test]
fn test_clear_four_rows_at_bottom() {
    let mut board = Board::new();
    for y in 16..20 {
        board.fill_row(y, Archetype::Four);
    }
    board.set(0, 15, Some(Archetype::O));

    assert_eq!(board.clear_full_rows().len(), 4);
    assert_eq!(board.get(0, 19), Some(Some(Archetype::O)));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_clear_without_full_rows_is_a_no_op() {
    let mut board = Board::new();
    board.set(0, 19, Some(Archetype::O));
    let before = board.clone();
    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_occupancy_round_trip() {
    let mut grid = [[false; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    grid[19][0] = true;
    grid[3][9] = true;
    let board = Board::from_occupancy(&grid);
    assert_eq!(board.occupancy(), grid);
    assert!(board.is_occupied(9, 3));
    assert!(board.is_free(1, 19));
}
