use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fusion_grid::core::{
    clear_lines, find_complete_lines, find_merge_groups, run_chain, Board, ScoreKeeper,
};
use fusion_grid::types::{PieceKind, DEFAULT_INITIAL_SCORE};

fn row_of_singles(board: &mut Board, y: i8) {
    for x in 0..board.width() as i8 {
        board.insert_template(PieceKind::Single, 0, x, y).unwrap();
    }
}

fn bench_find_merge_groups(c: &mut Criterion) {
    let mut board = Board::new();
    row_of_singles(&mut board, 2);
    row_of_singles(&mut board, 5);

    c.bench_function("find_merge_groups", |b| {
        b.iter(|| {
            black_box(find_merge_groups(black_box(&board)));
        })
    });
}

fn bench_clear_lines(c: &mut Criterion) {
    c.bench_function("clear_one_row", |b| {
        b.iter(|| {
            let mut board = Board::new();
            row_of_singles(&mut board, 6);
            let lines = find_complete_lines(&board);
            clear_lines(&mut board, &lines);
            black_box(board);
        })
    });
}

fn bench_full_chain(c: &mut Criterion) {
    c.bench_function("chain_fuse_and_clear", |b| {
        b.iter(|| {
            let mut board = Board::new();
            row_of_singles(&mut board, 6);
            let mut score = ScoreKeeper::new(DEFAULT_INITIAL_SCORE);
            let mut events = Vec::new();
            black_box(run_chain(&mut board, &mut score, &mut events));
        })
    });
}

fn bench_move_piece(c: &mut Criterion) {
    let mut board = Board::new();
    let id = board.insert_template(PieceKind::T, 0, 2, 2).unwrap();
    let mut dx = 1;

    c.bench_function("move_piece_by", |b| {
        b.iter(|| {
            board.move_piece_by(black_box(id), dx, 0);
            dx = -dx;
        })
    });
}

criterion_group!(
    benches,
    bench_find_merge_groups,
    bench_clear_lines,
    bench_full_chain,
    bench_move_piece
);
criterion_main!(benches);
