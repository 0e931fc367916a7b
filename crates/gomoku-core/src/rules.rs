//! Win detection: does a just-placed stone complete a run of five?
//!
//! The scan is evaluated immediately after a stone lands at `(row, col)`.
//! For each of the four axes — horizontal, vertical, diagonal (↘/↖), and
//! anti-diagonal (↙/↗) — it counts consecutive same-colored stones outward
//! from the placed stone in both directions, stopping at the first mismatch
//! or the grid edge. The axis wins when the two directional counts sum to at
//! least 4: together with the placed stone itself that is a run of ≥ 5.
//!
//! Overlines (runs of 6 or more) count as wins; there is no exact-five rule
//! in this variant. Cost per call is O(N) — at most one bounded walk along
//! each axis.

use crate::board::{Board, Cell, Color};

/// The four scan axes as `(d_row, d_col)` unit steps.
///
/// Each axis is scanned in this direction and its negation, so four entries
/// cover all eight compass directions.
const AXES: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal ↘
    (1, -1), // anti-diagonal ↙
];

/// Returns `true` iff the stone of `color` at `(row, col)` completes a run
/// of five or more along any axis.
///
/// The cell at `(row, col)` itself is not inspected; callers invoke this
/// right after placing the stone there.
pub fn has_winner(board: &Board, row: usize, col: usize, color: Color) -> bool {
    let stone = Cell::from(color);
    AXES.iter().any(|&(dr, dc)| {
        let forward = count_run(board, row, col, dr, dc, stone);
        let backward = count_run(board, row, col, -dr, -dc, stone);
        forward + backward >= 4
    })
}

/// Counts consecutive cells equal to `stone` walking from `(row, col)`
/// (exclusive) in direction `(dr, dc)`, stopping at the first mismatch or
/// the edge of the grid.
fn count_run(board: &Board, row: usize, col: usize, dr: isize, dc: isize, stone: Cell) -> usize {
    let mut n = 0;
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    while r >= 0 && c >= 0 {
        match board.cell(r as usize, c as usize) {
            Some(cell) if cell == stone => n += 1,
            _ => break,
        }
        r += dr;
        c += dc;
    }
    n
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_SIZE;

    /// Places `color` stones at every listed coordinate.
    fn board_with(stones: &[(usize, usize)], color: Color) -> Board {
        let mut board = Board::new();
        for &(r, c) in stones {
            board.place(r, c, color).unwrap();
        }
        board
    }

    #[test]
    fn test_five_in_a_row_horizontal_wins() {
        let board = board_with(&[(7, 3), (7, 4), (7, 5), (7, 6), (7, 7)], Color::Black);
        // The scan may be triggered from any stone of the run.
        assert!(has_winner(&board, 7, 7, Color::Black));
        assert!(has_winner(&board, 7, 5, Color::Black));
        assert!(has_winner(&board, 7, 3, Color::Black));
    }

    #[test]
    fn test_five_in_a_row_vertical_wins() {
        let board = board_with(&[(2, 9), (3, 9), (4, 9), (5, 9), (6, 9)], Color::White);
        assert!(has_winner(&board, 4, 9, Color::White));
    }

    #[test]
    fn test_five_in_a_row_diagonal_wins() {
        let board = board_with(&[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)], Color::Black);
        assert!(has_winner(&board, 5, 5, Color::Black));
    }

    #[test]
    fn test_five_in_a_row_anti_diagonal_wins() {
        let board = board_with(&[(4, 10), (5, 9), (6, 8), (7, 7), (8, 6)], Color::White);
        assert!(has_winner(&board, 6, 8, Color::White));
    }

    #[test]
    fn test_four_in_a_row_is_not_a_win() {
        let board = board_with(&[(7, 4), (7, 5), (7, 6), (7, 7)], Color::Black);
        assert!(!has_winner(&board, 7, 7, Color::Black));
    }

    #[test]
    fn test_run_blocked_by_opponent_is_not_a_win() {
        let mut board = board_with(&[(7, 4), (7, 5), (7, 6), (7, 7)], Color::Black);
        // A white stone caps one end; the black run is still only four long.
        board.place(7, 3, Color::White).unwrap();
        board.place(7, 8, Color::White).unwrap();
        assert!(!has_winner(&board, 7, 7, Color::Black));
    }

    #[test]
    fn test_interrupted_run_is_not_a_win() {
        // Black at cols 3..=7 of row 7 except col 5, which is white.
        let mut board = board_with(&[(7, 3), (7, 4), (7, 6), (7, 7)], Color::Black);
        board.place(7, 5, Color::White).unwrap();
        board.place(7, 8, Color::Black).unwrap();
        assert!(!has_winner(&board, 7, 8, Color::Black));
    }

    #[test]
    fn test_overline_counts_as_a_win() {
        // Six in a row — no exact-five rule in this variant.
        let board = board_with(
            &[(7, 3), (7, 4), (7, 5), (7, 6), (7, 7), (7, 8)],
            Color::Black,
        );
        assert!(has_winner(&board, 7, 5, Color::Black));
    }

    #[test]
    fn test_win_touching_the_board_edge() {
        // Run hugging the last column; the scan must stop cleanly at the edge.
        let board = board_with(
            &[(0, 14), (1, 14), (2, 14), (3, 14), (4, 14)],
            Color::White,
        );
        assert!(has_winner(&board, 0, 14, Color::White));
        assert!(has_winner(&board, 4, 14, Color::White));
    }

    #[test]
    fn test_win_in_the_corner_anti_diagonal() {
        let board = board_with(
            &[(10, 4), (11, 3), (12, 2), (13, 1), (14, 0)],
            Color::Black,
        );
        assert!(has_winner(&board, 14, 0, Color::Black));
    }

    #[test]
    fn test_opponent_stones_do_not_win_for_the_mover() {
        let board = board_with(&[(7, 3), (7, 4), (7, 5), (7, 6), (7, 7)], Color::White);
        // Five white stones are not a win for black.
        assert!(!has_winner(&board, 7, 5, Color::Black));
    }

    #[test]
    fn test_single_stone_on_empty_board_is_not_a_win() {
        let board = board_with(&[(7, 7)], Color::Black);
        assert!(!has_winner(&board, 7, 7, Color::Black));
    }

    #[test]
    fn test_crossing_runs_of_four_do_not_win() {
        // A plus-shape: four horizontal and four vertical through (7, 7),
        // each arm short of five.
        let board = board_with(
            &[(7, 6), (7, 7), (7, 8), (7, 9), (5, 7), (6, 7), (8, 7)],
            Color::Black,
        );
        assert!(!has_winner(&board, 7, 7, Color::Black));
    }

    #[test]
    fn test_every_horizontal_offset_within_bounds_wins() {
        // A run of five starting at any legal column offset must be detected.
        for start in 0..=(BOARD_SIZE - 5) {
            let stones: Vec<(usize, usize)> = (0..5).map(|i| (3, start + i)).collect();
            let board = board_with(&stones, Color::Black);
            assert!(
                has_winner(&board, 3, start + 2, Color::Black),
                "run starting at col {start} not detected"
            );
        }
    }
}
