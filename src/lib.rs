//! Tandem - two-piece lookahead move planner for a falling-block game.
//!
//! Re-exports the workspace crates; see `tandem-search` for the entry point.

pub use tandem_core as core;
pub use tandem_engine as engine;
pub use tandem_eval as eval;
pub use tandem_search as search;

pub use tandem_core::{Board, Move, Piece, TurnState};
pub use tandem_search::{Decision, PlanError, TurnPlanner};
