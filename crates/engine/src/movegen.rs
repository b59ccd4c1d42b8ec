//! Reachable placements for a piece.
//!
//! Breadth-first search over poses from the start pose. Nodes live in an
//! arena and point at their discoverer by index; the first discoverer of a
//! pose is its permanent parent, so following parents back to the root
//! always gives a shortest move path.

use std::collections::VecDeque;

use log::{debug, trace, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tandem_core::{Board, Move, Piece};

use crate::active::ActivePiece;
use crate::apply::{apply_placement, Placement};
use crate::collision::{can_place, is_terminal};
use crate::movement::{move_between, try_drop, try_rotate, try_shift, Pose};
use crate::spin::is_t_spin;

pub type NodeId = usize;

/// Moves into one placement, inline up to 32.
pub type MovePath = SmallVec<[Move; 32]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub pose: Pose,
    pub parent: Option<NodeId>,
}

/// A resting pose together with the board it leaves behind.
#[derive(Clone, Debug)]
pub struct Terminal {
    pub node: NodeId,
    pub placement: Placement,
}

/// Every pose reached by the search plus the finalised resting placements.
#[derive(Clone, Debug)]
pub struct SearchTree {
    piece: Piece,
    nodes: Vec<Node>,
    terminals: Vec<Terminal>,
}

/// Search all placements `start` can reach on `board`.
///
/// An invalid start pose yields an empty tree: the piece cannot spawn.
/// A resting pose whose replay cannot be settled is dropped on its own.
pub fn search(board: &Board, start: &ActivePiece) -> SearchTree {
    let piece = start.piece();
    let (nodes, resting) = explore(board, piece, start.pose());

    let mut terminals = Vec::with_capacity(resting.len());
    for id in resting {
        let pose = nodes[id].pose;
        let active = ActivePiece::at(piece, pose);
        let spin = match history(&nodes, id) {
            Some((last, previous, anchor)) => is_t_spin(board, &active, last, previous, anchor),
            None => false,
        };
        match apply_placement(board, &active, spin) {
            Ok(placement) => {
                if placement.outcome.spin {
                    debug!(
                        "t-spin at ({}, {}) clears {}",
                        pose.x, pose.y, placement.outcome.cleared
                    );
                }
                terminals.push(Terminal {
                    node: id,
                    placement,
                });
            }
            Err(err) => warn!("discarding {piece} placement {pose:?}: {err}"),
        }
    }

    trace!(
        "{piece}: {} poses reached, {} placements",
        nodes.len(),
        terminals.len()
    );
    SearchTree {
        piece,
        nodes,
        terminals,
    }
}

/// Level-order walk over valid poses. Returns the node arena and the ids of
/// resting poses in the order they were dequeued.
///
/// Resting poses keep expanding sideways and rotationally: a later shift or
/// turn may open a further drop.
pub(crate) fn explore(board: &Board, piece: Piece, start: Pose) -> (Vec<Node>, Vec<NodeId>) {
    let mut nodes = Vec::new();
    let mut resting = Vec::new();
    if !can_place(board, piece, start) {
        return (nodes, resting);
    }

    let mut visited: FxHashMap<Pose, NodeId> = FxHashMap::default();
    let mut queue = VecDeque::new();
    visit(&mut nodes, &mut visited, &mut queue, start, None);

    while let Some(id) = queue.pop_front() {
        let pose = nodes[id].pose;
        if is_terminal(board, piece, pose) {
            resting.push(id);
        }

        let branches = [
            try_shift(board, piece, pose, -1),
            try_rotate(board, piece, pose, false),
            try_shift(board, piece, pose, 1),
            try_rotate(board, piece, pose, true),
            try_drop(board, piece, pose),
        ];
        for next in branches.into_iter().flatten() {
            visit(&mut nodes, &mut visited, &mut queue, next, Some(id));
        }
    }

    (nodes, resting)
}

fn visit(
    nodes: &mut Vec<Node>,
    visited: &mut FxHashMap<Pose, NodeId>,
    queue: &mut VecDeque<NodeId>,
    pose: Pose,
    parent: Option<NodeId>,
) {
    if visited.contains_key(&pose) {
        return;
    }
    let id = nodes.len();
    nodes.push(Node { pose, parent });
    visited.insert(pose, id);
    queue.push_back(id);
}

/// Last two moves into `id` and the anchor between them, if the node has a
/// grandparent.
pub(crate) fn history(nodes: &[Node], id: NodeId) -> Option<(Move, Move, (i8, i8))> {
    let parent = nodes[id].parent?;
    let grandparent = nodes[parent].parent?;
    let last = move_between(nodes[parent].pose, nodes[id].pose);
    let previous = move_between(nodes[grandparent].pose, nodes[parent].pose);
    Some((last, previous, nodes[parent].pose.location()))
}

impl SearchTree {
    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Number of poses reached.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    pub fn terminals_mut(&mut self) -> &mut [Terminal] {
        &mut self.terminals
    }

    pub fn placement(&self, id: NodeId) -> Option<&Placement> {
        self.terminals
            .iter()
            .find(|t| t.node == id)
            .map(|t| &t.placement)
    }

    pub fn pose(&self, id: NodeId) -> Pose {
        self.nodes[id].pose
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// The move that reached `id` from its parent. `None` at the root.
    pub fn move_into(&self, id: NodeId) -> Option<Move> {
        let parent = self.nodes[id].parent?;
        Some(move_between(self.nodes[parent].pose, self.nodes[id].pose))
    }

    /// Shortest move path from the start pose to `id`, root first.
    pub fn moves_to(&self, id: NodeId) -> MovePath {
        let mut path = MovePath::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            path.push(move_between(self.nodes[parent].pose, self.nodes[current].pose));
            current = parent;
        }
        path.reverse();
        path
    }
}
