//! Pieces tests - catalog constants, rotation and spawn placement

use tetris_duel::core::pieces::{get_shape, Piece, Position};
use tetris_duel::types::PieceKind;

fn rows(kind: PieceKind) -> Vec<Vec<u8>> {
    get_shape(kind).to_rows()
}

#[test]
fn test_catalog_matrices() {
    assert_eq!(rows(PieceKind::I), vec![vec![0, 0, 0, 0], vec![1, 1, 1, 1], vec![0, 0, 0, 0], vec![0, 0, 0, 0]]);
    assert_eq!(rows(PieceKind::J), vec![vec![1, 0, 0], vec![1, 1, 1], vec![0, 0, 0]]);
    assert_eq!(rows(PieceKind::L), vec![vec![0, 0, 1], vec![1, 1, 1], vec![0, 0, 0]]);
    assert_eq!(rows(PieceKind::O), vec![vec![1, 1], vec![1, 1]]);
    assert_eq!(rows(PieceKind::S), vec![vec![0, 1, 1], vec![1, 1, 0], vec![0, 0, 0]]);
    assert_eq!(rows(PieceKind::T), vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 0, 0]]);
    assert_eq!(rows(PieceKind::Z), vec![vec![1, 1, 0], vec![0, 1, 1], vec![0, 0, 0]]);
}

#[test]
fn test_every_piece_has_four_cells() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        assert_eq!(piece.shape.filled_cells().count(), 4, "{kind:?}");
        assert_eq!(piece.rotate_cw().shape.filled_cells().count(), 4, "{kind:?}");
    }
}

#[test]
fn test_rotate_t_clockwise() {
    let rotated = Piece::new(PieceKind::T).rotate_cw();
    assert_eq!(
        rotated.shape.to_rows(),
        vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]
    );
    assert_eq!(rotated.color(), PieceKind::T);
}

#[test]
fn test_rotate_i_becomes_vertical() {
    let rotated = Piece::new(PieceKind::I).rotate_cw();
    let cells: Vec<_> = rotated.shape.filled_cells().collect();
    assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
}

#[test]
fn test_four_rotations_restore_shape() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        let back = piece.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
        assert_eq!(back, piece, "{kind:?}");
    }
}

#[test]
fn test_o_rotation_is_identity() {
    let o = Piece::new(PieceKind::O);
    assert_eq!(o.rotate_cw(), o);
}

#[test]
fn test_spawn_positions_are_centred() {
    assert_eq!(Piece::new(PieceKind::I).spawn_position(), Position::new(3, 0));
    assert_eq!(Piece::new(PieceKind::O).spawn_position(), Position::new(4, 0));
    assert_eq!(Piece::new(PieceKind::T).spawn_position(), Position::new(4, 0));
    assert_eq!(Piece::new(PieceKind::S).spawn_position(), Position::new(4, 0));
}
