use std::cmp::Ordering;

use log::{debug, warn};
use tandem_core::{Move, TurnState};
use tandem_engine::{lift, search, ActivePiece, NodeId, Terminal};
use tandem_eval::{EvalWeights, Evaluator};

use crate::PlanError;

/// What to send back for this turn.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    /// Moves ending in `Drop`, and the two-piece cost of the placement.
    Place { moves: Vec<Move>, cost: f64 },
    /// Throw the current piece away.
    Skip,
}

impl Decision {
    /// The wire sequence; never empty.
    pub fn moves(&self) -> Vec<Move> {
        match self {
            Decision::Place { moves, .. } => moves.clone(),
            Decision::Skip => vec![Move::Skip],
        }
    }
}

/// One first-piece placement under consideration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub node: NodeId,
    /// Cost of the placement on its own.
    pub standalone: f64,
    /// Best cost reachable after also placing the next piece.
    /// Infinite when the next piece has nowhere to go.
    pub ranking: f64,
}

impl Candidate {
    fn cmp_cost(&self, other: &Self) -> Ordering {
        self.ranking
            .total_cmp(&other.ranking)
            .then(self.standalone.total_cmp(&other.standalone))
    }
}

/// Best first: by two-piece cost, then by one-piece cost.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(Candidate::cmp_cost);
}

/// Spend a skip when even the best line is worse than leaving the board as
/// it is and the stack is already in the top third.
pub fn should_skip(
    skips: u32,
    best_ranking: f64,
    baseline: f64,
    block_height: usize,
    board_height: usize,
) -> bool {
    skips > 0 && best_ranking > baseline && block_height > 2 * board_height / 3
}

/// Two-piece greedy planner.
#[derive(Clone, Debug, Default)]
pub struct TurnPlanner {
    pub evaluator: Evaluator,
}

impl TurnPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: EvalWeights) -> Self {
        Self {
            evaluator: Evaluator::new(weights),
        }
    }

    pub fn plan(&self, state: &TurnState) -> Result<Decision, PlanError> {
        let mut field = state.board.clone();
        let current = lift(&mut field, state.current_piece, state.piece_location)?;
        let baseline = self.evaluator.evaluate(&mut field, None, None, f64::INFINITY);

        let mut tree = search(&field, &current);
        let next = ActivePiece::spawn(state.next_piece, field.width());
        let mut candidates = self.score_candidates(tree.terminals_mut(), &next);
        rank(&mut candidates);

        let Some(best) = candidates.first().copied() else {
            warn!("{} has no legal placement", state.current_piece);
            return Ok(if state.skips > 0 {
                Decision::Skip
            } else {
                Decision::Place {
                    moves: vec![Move::Drop],
                    cost: f64::INFINITY,
                }
            });
        };

        let block_height = tree
            .placement(best.node)
            .map_or(0, |p| p.board.block_height());
        if should_skip(
            state.skips,
            best.ranking,
            baseline,
            block_height,
            field.height(),
        ) {
            debug!(
                "skipping: best {:.1} vs baseline {:.1} at height {}",
                best.ranking, baseline, block_height
            );
            return Ok(Decision::Skip);
        }

        let mut moves = tree.moves_to(best.node).into_vec();
        moves.push(Move::Drop);
        debug!(
            "{} of {} placements chosen, cost {:.1} (alone {:.1})",
            state.current_piece,
            candidates.len(),
            best.ranking,
            best.standalone
        );
        Ok(Decision::Place {
            moves,
            cost: best.ranking,
        })
    }

    #[cfg(not(feature = "rayon"))]
    fn score_candidates(&self, terminals: &mut [Terminal], next: &ActivePiece) -> Vec<Candidate> {
        let mut par = f64::INFINITY;
        terminals
            .iter_mut()
            .map(|terminal| {
                let candidate = self.score(terminal, next, par);
                par = par.min(candidate.ranking);
                candidate
            })
            .collect()
    }

    #[cfg(feature = "rayon")]
    fn score_candidates(&self, terminals: &mut [Terminal], next: &ActivePiece) -> Vec<Candidate> {
        use rayon::prelude::*;

        terminals
            .par_iter_mut()
            .map(|terminal| self.score(terminal, next, f64::INFINITY))
            .collect()
    }

    /// Cost the placement alone, then with every reply of the next piece.
    fn score(&self, terminal: &mut Terminal, next: &ActivePiece, par: f64) -> Candidate {
        let first = terminal.placement.outcome;
        let standalone =
            self.evaluator
                .evaluate(&mut terminal.placement.board, Some(first), None, f64::INFINITY);

        let mut replies = search(&terminal.placement.board, next);
        let ranking = replies
            .terminals_mut()
            .iter_mut()
            .map(|reply| {
                let second = reply.placement.outcome;
                self.evaluator
                    .evaluate(&mut reply.placement.board, Some(first), Some(second), par)
            })
            .fold(f64::INFINITY, f64::min);

        Candidate {
            node: terminal.node,
            standalone,
            ranking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::{Board, CellState, Piece};
    use tandem_engine::{is_terminal, LiftError, Pose};

    fn candidate(node: NodeId, ranking: f64, standalone: f64) -> Candidate {
        Candidate {
            node,
            standalone,
            ranking,
        }
    }

    /// Board with `piece` marked at its spawn anchor.
    fn spawned(mut board: Board, piece: Piece) -> (Board, (i8, i8)) {
        let active = ActivePiece::spawn(piece, board.width());
        for (x, y) in active.blocks() {
            if board.cell(x, y).is_some() {
                board.set(x as usize, y as usize, CellState::Piece);
            }
        }
        (board, active.location())
    }

    fn replay(start: Pose, moves: &[Move]) -> Pose {
        moves
            .iter()
            .take_while(|&&m| m != Move::Drop)
            .fold(start, |pose, &m| pose.step(m).expect("primitive move"))
    }

    #[test]
    fn test_rank_by_two_piece_cost() {
        let mut c = [candidate(0, 20.0, 1.0), candidate(1, 10.0, 50.0)];
        rank(&mut c);
        assert_eq!(c[0].node, 1);
    }

    #[test]
    fn test_rank_tie_uses_standalone() {
        let mut c = [candidate(0, 10.0, 7.0), candidate(1, 10.0, 3.0)];
        rank(&mut c);
        assert_eq!(c[0].node, 1);
    }

    #[test]
    fn test_dead_end_ranks_last() {
        let mut c = [
            candidate(0, f64::INFINITY, -500.0),
            candidate(1, 900.0, 900.0),
        ];
        rank(&mut c);
        assert_eq!(c[0].node, 1);
        assert_eq!(c[1].node, 0);
    }

    #[test]
    fn test_skip_conditions() {
        assert!(should_skip(1, 500.0, 400.0, 14, 20));
        assert!(!should_skip(0, 500.0, 400.0, 14, 20));
        assert!(!should_skip(1, 400.0, 400.0, 14, 20));
        assert!(!should_skip(1, 500.0, 400.0, 13, 20));
    }

    #[test]
    fn test_decision_moves() {
        assert_eq!(Decision::Skip.moves(), vec![Move::Skip]);
        let place = Decision::Place {
            moves: vec![Move::Left, Move::Drop],
            cost: 1.0,
        };
        assert_eq!(place.moves(), vec![Move::Left, Move::Drop]);
    }

    #[test]
    fn test_plan_empty_board() {
        let (board, location) = spawned(Board::new(10, 20).unwrap(), Piece::T);
        let state = TurnState::new(board.clone(), Piece::T, location, Piece::O).with_skips(1);
        let decision = TurnPlanner::new().plan(&state).unwrap();

        let Decision::Place { moves, cost } = decision else {
            panic!("expected a placement, got {decision:?}");
        };
        assert_eq!(moves.last(), Some(&Move::Drop));
        assert!(cost.is_finite());

        let mut field = board.clone();
        field.clear_piece_markings();
        let start = ActivePiece::spawn(Piece::T, 10).pose();
        let end = replay(start, &moves);
        assert!(is_terminal(&field, Piece::T, end));
        // the live board is never touched
        assert_eq!(state.board, board);
    }

    #[test]
    fn test_plan_takes_the_tetris() {
        let mut board = Board::new(10, 20).unwrap();
        for y in 16..20 {
            for x in 0..9 {
                board.set(x, y, CellState::Block);
            }
        }
        let (board, location) = spawned(board, Piece::I);
        let state = TurnState::new(board, Piece::I, location, Piece::O);
        let moves = TurnPlanner::new().plan(&state).unwrap().moves();

        let start = ActivePiece::spawn(Piece::I, 10).pose();
        let end = ActivePiece::at(Piece::I, replay(start, &moves));
        assert!(end.blocks().iter().all(|&(x, _)| x == 9));
    }

    /// Fifteen rows of solid garbage. Nothing can clear, and the bare field
    /// keeps the empty-field bonus that any placed block gives up.
    fn buried() -> Board {
        let mut board = Board::new(10, 20).unwrap();
        for y in 5..20 {
            for x in 0..10 {
                board.set(x, y, CellState::Solid);
            }
        }
        board
    }

    #[test]
    fn test_skips_when_every_line_is_worse() {
        let planner = TurnPlanner::new();
        let mut bare = buried();
        let baseline = planner.evaluator.evaluate(&mut bare, None, None, f64::INFINITY);
        assert!(bare.block_height() > 2 * 20 / 3);

        let (board, location) = spawned(buried(), Piece::T);
        let state = TurnState::new(board, Piece::T, location, Piece::S).with_skips(1);
        assert_eq!(planner.plan(&state).unwrap(), Decision::Skip);

        let state = state.with_skips(0);
        let Decision::Place { moves, cost } = planner.plan(&state).unwrap() else {
            panic!("no skips left, must place");
        };
        assert!(cost > baseline);
        assert_eq!(moves.last(), Some(&Move::Drop));
    }

    #[test]
    fn test_blocked_spawn() {
        let mut board = Board::new(10, 20).unwrap();
        for x in 0..10 {
            board.set(x, 0, CellState::Block);
        }
        // T entirely above the field; every resting pose leaves cells off it
        let state = TurnState::new(board, Piece::T, (3, -2), Piece::I);
        assert_eq!(
            TurnPlanner::new().plan(&state).unwrap().moves(),
            vec![Move::Drop]
        );
        let state = state.with_skips(2);
        assert_eq!(TurnPlanner::new().plan(&state).unwrap(), Decision::Skip);
    }

    #[test]
    fn test_anchor_off_field_is_fatal() {
        let board = Board::new(10, 20).unwrap();
        let state = TurnState::new(board, Piece::T, (126, 0), Piece::I);
        assert_eq!(
            TurnPlanner::new().plan(&state),
            Err(PlanError::Lift(LiftError::AnchorOffField {
                piece: Piece::T,
                x: 126,
                y: 0
            }))
        );
    }

    #[test]
    fn test_unmatched_markings_are_fatal() {
        let board = Board::new(10, 20).unwrap();
        let state = TurnState::new(board, Piece::T, (3, 5), Piece::I);
        assert!(matches!(
            TurnPlanner::new().plan(&state),
            Err(PlanError::Lift(_))
        ));
    }
}
