//! Does the field offer a T-spin right now?
//!
//! Runs the same reachability walk as `movegen` for a freshly spawned T and
//! tries every resting pose whose last moves form a spin.

use tandem_core::{Board, Piece};

use crate::active::ActivePiece;
use crate::apply::{stamp, unstamp};
use crate::movegen::{explore, history};
use crate::spin::is_t_spin;

/// `None` when no T-spin placement is reachable. Otherwise the most full
/// rows any spin placement would leave, `Some(0)` if none clears.
pub fn t_spin_potential(board: &Board) -> Option<u8> {
    let start = ActivePiece::spawn(Piece::T, board.width());
    let (nodes, resting) = explore(board, Piece::T, start.pose());

    let mut scratch = board.clone();
    let mut best: Option<u8> = None;
    for id in resting {
        let Some((last, previous, anchor)) = history(&nodes, id) else {
            continue;
        };
        let t = ActivePiece::at(Piece::T, nodes[id].pose);
        if !is_t_spin(&scratch, &t, last, previous, anchor) {
            continue;
        }
        if stamp(&mut scratch, &t).is_err() {
            continue;
        }
        let rows = scratch.count_full_rows();
        unstamp(&mut scratch, &t);
        best = Some(best.map_or(rows, |b| b.max(rows)));
    }
    best
}
