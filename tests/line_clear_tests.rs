//! Line-clear integration tests

use fusion_grid::core::{clear_lines, find_complete_lines, validate, Board};
use fusion_grid::types::{Line, PieceKind};

fn fill_row(board: &mut Board, y: i8) {
    for x in 0..board.width() as i8 {
        if board.is_empty(x, y) {
            board.insert_template(PieceKind::Single, 0, x, y).unwrap();
        }
    }
}

#[test]
fn test_no_lines_on_sparse_board() {
    let mut board = Board::new();
    board.insert_template(PieceKind::O, 0, 0, 0).unwrap();
    board.insert_template(PieceKind::I, 0, 3, 4).unwrap();

    assert!(find_complete_lines(&board).is_empty());
}

#[test]
fn test_almost_full_row_is_not_complete() {
    let mut board = Board::new();
    for x in 0..(board.width() as i8 - 1) {
        board.insert_template(PieceKind::Single, 0, x, 5).unwrap();
    }

    assert!(find_complete_lines(&board).is_empty());
}

#[test]
fn test_clearing_a_row_empties_it() {
    let mut board = Board::new();
    fill_row(&mut board, 6);

    let lines = find_complete_lines(&board);
    assert_eq!(lines.as_slice(), &[Line::row(6)]);

    let outcome = clear_lines(&mut board, &lines);
    assert_eq!(outcome.cells_cleared, board.width() as u32);
    assert_eq!(board.occupied_cell_count(), 0);
    assert!(board.pieces().is_empty());
    assert!(validate(&board).is_consistent());
}

#[test]
fn test_partially_cleared_piece_becomes_fragment() {
    let mut board = Board::new();
    // O spans rows 5 and 6; clearing row 6 leaves its top half
    let id = board.insert_template(PieceKind::O, 0, 0, 5).unwrap();
    for x in 2..board.width() as i8 {
        board.insert_template(PieceKind::Single, 0, x, 6).unwrap();
    }

    let lines = find_complete_lines(&board);
    assert_eq!(lines.as_slice(), &[Line::row(6)]);
    let outcome = clear_lines(&mut board, &lines);

    assert!(board.find(id).is_none());
    assert_eq!(outcome.fragments.len(), 1);
    let fragment = board.find(outcome.fragments[0]).unwrap();
    assert!(fragment.is_fragment());
    assert_eq!(fragment.cell_count(), 2);
    // Row gravity moved the survivors from row 5 down into row 6
    assert_eq!(fragment.occupied_cells(), vec![(0, 6), (1, 6)]);
    assert!(validate(&board).is_consistent());
}

#[test]
fn test_column_clear_splits_a_horizontal_piece() {
    let mut board = Board::new();
    // I spans columns 1..=4 of row 0; clearing column 3 bisects it
    let id = board.insert_template(PieceKind::I, 0, 1, 0).unwrap();
    for y in 1..board.height() as i8 {
        board.insert_template(PieceKind::Single, 0, 3, y).unwrap();
    }

    let lines = find_complete_lines(&board);
    assert_eq!(lines.as_slice(), &[Line::col(3)]);
    let outcome = clear_lines(&mut board, &lines);

    assert!(board.find(id).is_none());
    assert_eq!(outcome.fragments.len(), 2);
    let sizes: Vec<usize> = outcome
        .fragments
        .iter()
        .map(|&fid| board.find(fid).unwrap().cell_count())
        .collect();
    assert_eq!(sizes.iter().sum::<usize>(), 3);
    assert!(sizes.contains(&1));
    assert!(sizes.contains(&2));
    assert!(validate(&board).is_consistent());
}

#[test]
fn test_gravity_only_affects_pieces_above_the_row() {
    let mut board = Board::new();
    let high = board.insert_template(PieceKind::Single, 0, 2, 0).unwrap();
    let low = board.insert_template(PieceKind::Single, 0, 2, 6).unwrap();
    fill_row(&mut board, 3);

    let lines = find_complete_lines(&board);
    clear_lines(&mut board, &lines);

    assert_eq!(board.find(high).unwrap().origin(), (2, 1));
    assert_eq!(board.find(low).unwrap().origin(), (2, 6));
    assert!(validate(&board).is_consistent());
}

#[test]
fn test_row_and_column_clear_together() {
    let mut board = Board::new();
    fill_row(&mut board, 0);
    for y in 1..board.height() as i8 {
        board.insert_template(PieceKind::Single, 0, 0, y).unwrap();
    }

    let lines = find_complete_lines(&board);
    assert_eq!(lines.len(), 2);
    let outcome = clear_lines(&mut board, &lines);

    // width + height minus the shared corner cell
    let expected = board.width() as u32 + board.height() as u32 - 1;
    assert_eq!(outcome.cells_cleared, expected);
    assert_eq!(board.occupied_cell_count(), 0);
}
