//! Piece tests - templates, spawn and rotation against a real board

use typefall::core::{template, try_rotate, Board, Piece, PreviewEntry, Shape, WordEntry};
use typefall::types::{Archetype, RotationDir, SPAWN_X, SPAWN_Y};

fn spawn(kind: Archetype) -> Piece {
    Piece::spawn(PreviewEntry {
        kind,
        word: WordEntry::new("word", ""),
    })
}

#[test]
fn test_spawn_uses_template_and_anchor() {
    for kind in Archetype::ALL {
        let piece = spawn(kind);
        let t = template(kind);
        assert_eq!((piece.x, piece.y), (SPAWN_X as i32, SPAWN_Y as i32));
        assert_eq!(piece.shape.cells(), t.cells);
        assert_eq!(piece.pivot, t.pivot);
        assert_eq!(piece.color, t.color);
        assert_eq!(piece.word.key(), "word");
    }
}

#[test]
fn test_every_spawn_fits_an_empty_board() {
    let board = Board::new();
    for kind in Archetype::ALL {
        assert!(spawn(kind).fits(&board, 0, 0), "{kind:?}");
    }
}

#[test]
fn test_cell_counts() {
    let counts: Vec<usize> = Archetype::ALL.iter().map(|&k| template(k).cells.len()).collect();
    assert_eq!(counts, vec![1, 2, 3, 4, 4, 4, 4, 4, 4, 5, 4, 3]);
}

#[test]
fn test_shapes_are_independent_copies() {
    let mut a = spawn(Archetype::T);
    let b = spawn(Archetype::T);
    a.shape = Shape::new(&[(0, 0)]).unwrap();
    assert_eq!(b.shape.cells(), template(Archetype::T).cells);
}

#[test]
fn test_rotation_blocked_everywhere_keeps_piece() {
    // A vertical bar in a one-column well cannot turn flat at any kick offset.
    let mut board = Board::new();
    for y in 0..20 {
        for x in 0..10 {
            if x != 5 {
                board.set(x, y, Some(Archetype::O));
            }
        }
    }
    let t = template(Archetype::Four);
    let vertical = Shape::new(&[(2, 0), (2, 1), (2, 2), (2, 3)]).unwrap();
    assert!(board.can_move(3, 10, vertical.cells()));

    let result = try_rotate(&vertical, t.pivot, t.kind, 3, 10, RotationDir::Positive, |x, y, s| {
        board.can_move(x, y, s.cells())
    });
    assert!(result.is_none());
}

#[test]
fn test_rotation_kicks_off_right_wall() {
    let board = Board::new();
    let t = template(Archetype::Four);
    let vertical = Shape::new(&[(2, 0), (2, 1), (2, 2), (2, 3)]).unwrap();
    // Column 9: anchor x = 7.
    assert!(board.can_move(7, 5, vertical.cells()));

    let (shape, dx) = try_rotate(&vertical, t.pivot, t.kind, 7, 5, RotationDir::Negative, |x, y, s| {
        board.can_move(x, y, s.cells())
    })
    .unwrap();
    assert!(dx < 0);
    assert!(board.can_move(7 + dx, 5, shape.cells()));
    let (_, _, min_y, max_y) = shape.bounds();
    assert_eq!(min_y, max_y, "bar must be flat");
}
