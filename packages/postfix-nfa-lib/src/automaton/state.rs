use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Construction-order identifier of a state. Identifiers are handed out by a
/// [StateArena](super::builder::StateArena) and are unique within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(u32);

impl StateId {
    pub fn new(raw: u32) -> Self {
        StateId(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A node in the automaton graph.
/// Transitions are not stored here, they are the outgoing edges of the node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateNode {
    pub accepting: bool,
    pub id: StateId,
}

impl StateNode {
    pub fn new(accepting: bool, id: StateId) -> Self {
        StateNode { accepting, id }
    }

    pub fn accepting(id: StateId) -> Self {
        StateNode::new(true, id)
    }

    pub fn non_accepting(id: StateId) -> Self {
        StateNode::new(false, id)
    }
}
