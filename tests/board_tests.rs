//! Board tests - grid access, collision, locking and row clearing

use tetris_duel::core::{Board, Piece, Position};
use tetris_duel::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({x}, {y}) should be empty");
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
}

#[test]
fn test_cells_above_board_never_collide() {
    let board = Board::new();
    let piece = Piece::new(PieceKind::I);

    // Whole piece above the top edge.
    assert!(!board.collides(&piece, Position::new(3, -4)));
    // Partly above, partly inside.
    assert!(!board.collides(&piece.rotate_cw(), Position::new(3, -2)));
}

#[test]
fn test_collides_with_walls_floor_and_stack() {
    let board = Board::from_rows(&["....T....."]);
    let o = Piece::new(PieceKind::O);

    assert!(board.collides(&o, Position::new(-1, 0)));
    assert!(board.collides(&o, Position::new(9, 0)));
    assert!(board.collides(&o, Position::new(0, 19)));
    assert!(board.collides(&o, Position::new(3, 18)));
    assert!(!board.collides(&o, Position::new(3, 17)));
    assert!(!board.collides(&o, Position::new(5, 18)));
}

#[test]
fn test_lock_truncates_overhang() {
    let mut board = Board::new();
    let vertical_i = Piece::new(PieceKind::I).rotate_cw();

    // Column 2 of the local frame, rows -2..=1 on the board.
    board.lock(&vertical_i, Position::new(0, -2));

    assert_eq!(board.get(2, 0), Some(Some(PieceKind::I)));
    assert_eq!(board.get(2, 1), Some(Some(PieceKind::I)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
}

#[test]
fn test_clear_single_row_shifts_content_down() {
    let mut board = Board::from_rows(&[
        "T.........",
        "##########",
    ]);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(0, 18), Some(None));
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::from_rows(&[
        "##########",
        "S.........",
        "##########",
        ".Z........",
        "##########",
    ]);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 3);
    assert_eq!(board.get(0, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::Z)));
    assert_eq!(board.full_row_count(), 0);
    assert_eq!(board.max_height(), 2);
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::from_rows(&[
        "J.........",
        "##########",
        "##########",
        "##########",
        "##########",
    ]);

    assert_eq!(board.clear_full_rows().len(), 4);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::J)));
    assert_eq!(board.max_height(), 1);
}

#[test]
fn test_clear_nothing() {
    let mut board = Board::from_rows(&["#########."]);
    let before = board.clone();
    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_stack_metrics() {
    let board = Board::from_rows(&[
        "#.........",
        "..........",
        "#.#.......",
    ]);

    assert_eq!(board.column_height(0), 3);
    assert_eq!(board.column_height(1), 0);
    assert_eq!(board.column_height(2), 1);
    assert_eq!(board.max_height(), 3);
    assert_eq!(board.hole_count(), 1);
}
