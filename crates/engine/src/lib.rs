//! tandem-engine - piece simulation and placement search.
//!
//! Moves the falling piece, detects T-spins, settles placements and finds
//! every placement a piece can reach.

pub mod active;
pub mod apply;
pub mod collision;
pub mod error;
pub mod lift;
pub mod movegen;
pub mod movement;
pub mod probe;
pub mod spin;

pub use active::ActivePiece;
pub use apply::{apply_placement, stamp, unstamp, Placement};
pub use collision::{can_place, collides, is_terminal, is_valid, out_of_bounds};
pub use error::{LiftError, PlacementError};
pub use lift::lift;
pub use movegen::{search, MovePath, Node, NodeId, SearchTree, Terminal};
pub use movement::{move_between, try_drop, try_rotate, try_shift, Pose};
pub use probe::t_spin_potential;
pub use spin::is_t_spin;
