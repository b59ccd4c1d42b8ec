//! Tandem search crate - two-piece lookahead and move selection.

mod error;
mod planner;

pub use error::PlanError;
pub use planner::{rank, should_skip, Candidate, Decision, TurnPlanner};
