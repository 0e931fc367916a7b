//! Criterion benchmark for the win-detection scan.
//!
//! The scan runs once per accepted move, so its cost sits directly on the
//! move-handling path. Two cases bracket the range: an early-game board
//! where every axis stops after one probe, and a dense board that forces
//! the longest walks the rules allow.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gomoku_core::{rules::has_winner, Board, Color, BOARD_SIZE};

/// A board with a single stone in the center.
fn sparse_board() -> Board {
    let mut board = Board::new();
    board.place(7, 7, Color::Black).unwrap();
    board
}

/// A fully occupied board, striped so no run ever reaches five — every
/// axis scan has neighbors to probe in both directions.
fn dense_board() -> Board {
    let mut board = Board::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if (row, col) == (7, 7) {
                continue;
            }
            let color = if (col + 2 * row) % 4 < 2 {
                Color::Black
            } else {
                Color::White
            };
            board.place(row, col, color).unwrap();
        }
    }
    board.place(7, 7, Color::Black).unwrap();
    board
}

fn bench_win_scan(c: &mut Criterion) {
    let sparse = sparse_board();
    c.bench_function("has_winner/sparse", |b| {
        b.iter(|| has_winner(black_box(&sparse), 7, 7, Color::Black))
    });

    let dense = dense_board();
    c.bench_function("has_winner/dense", |b| {
        b.iter(|| has_winner(black_box(&dense), 7, 7, Color::Black))
    });
}

criterion_group!(benches, bench_win_scan);
criterion_main!(benches);
