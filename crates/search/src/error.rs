use tandem_engine::LiftError;
use thiserror::Error;

/// Fatal to the turn. A single bad placement is dropped during search and
/// never surfaces here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error(transparent)]
    Lift(#[from] LiftError),
}
