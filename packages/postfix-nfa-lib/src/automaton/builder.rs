use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{
    error::BuildError,
    letter::Letter,
    nfa::NFA,
    state::{StateId, StateNode},
};

/// A partially built automaton living inside a [StateArena].
///
/// Fragments are neither [Clone] nor [Copy]. The combinators of the arena take
/// them by value and splice their states into the result, so a fragment can't
/// be used again after it has been combined. A fragment must only be passed to
/// the arena that created it.
#[derive(Debug, PartialEq, Eq)]
pub struct Fragment {
    start: NodeIndex,
    accepting: Vec<NodeIndex>,
}

impl Fragment {
    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn accepting(&self) -> &[NodeIndex] {
        &self.accepting
    }

    /// The accepting list without `state`. Used to drop a start state that
    /// a combinator has just replaced.
    fn accepting_without(self, state: NodeIndex) -> Vec<NodeIndex> {
        self.accepting.into_iter().filter(|&s| s != state).collect()
    }
}

/// Owns every state created while building an automaton and hands out
/// construction-order identifiers.
///
/// No combinator ever adds an edge into a start state, so start states have no
/// incoming edges. This is what allows union, concatenation and iteration to
/// copy start transitions instead of adding epsilon edges. States that a
/// combinator replaces stay in the arena but become unreachable.
#[derive(Debug, Clone, Default)]
pub struct StateArena {
    graph: DiGraph<StateNode, Letter>,
    next_id: u32,
}

impl StateArena {
    pub fn new() -> Self {
        StateArena::default()
    }

    /// Number of states created so far, including unreachable ones.
    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    fn add_state(&mut self, accepting: bool) -> NodeIndex {
        let id = StateId::new(self.next_id);
        self.next_id += 1;

        self.graph.add_node(StateNode::new(accepting, id))
    }

    fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph[state].accepting
    }

    fn transitions(&self, state: NodeIndex) -> Vec<(Letter, NodeIndex)> {
        self.graph
            .edges(state)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect()
    }

    fn add_transitions(&mut self, state: NodeIndex, transitions: &[(Letter, NodeIndex)]) {
        for &(letter, target) in transitions {
            self.graph.add_edge(state, target, letter);
        }
    }

    /// Builds the automaton for a single expression symbol: `1` for the empty
    /// word or one of the letters `a`, `b`, `c`.
    pub fn literal(&mut self, symbol: char) -> Result<Fragment, BuildError> {
        if symbol == '1' {
            return Ok(self.empty_word());
        }

        Letter::from_char(symbol)
            .map(|letter| self.letter(letter))
            .ok_or(BuildError::InvalidSymbol {
                symbol,
                position: None,
            })
    }

    /// A single state that is both start and accepting.
    pub fn empty_word(&mut self) -> Fragment {
        let start = self.add_state(true);

        Fragment {
            start,
            accepting: vec![start],
        }
    }

    /// A non-accepting start with one `letter` edge into an accepting state.
    pub fn letter(&mut self, letter: Letter) -> Fragment {
        let start = self.add_state(false);
        let end = self.add_state(true);
        self.graph.add_edge(start, end, letter);

        Fragment {
            start,
            accepting: vec![end],
        }
    }

    /// Builds `L(a) ∪ L(b)` by merging both start states into a fresh one.
    pub fn union(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let accepting = self.is_accepting(a.start) || self.is_accepting(b.start);

        let mut transitions = self.transitions(a.start);
        transitions.extend(self.transitions(b.start));

        let start = self.add_state(accepting);
        self.add_transitions(start, &transitions);

        let (a_start, b_start) = (a.start, b.start);
        let mut accepting_states = a.accepting_without(a_start);
        accepting_states.extend(b.accepting_without(b_start));
        if accepting {
            accepting_states.push(start);
        }

        tracing::debug!(
            start = ?self.graph[start].id,
            transitions = transitions.len(),
            accepting = accepting_states.len(),
            "union"
        );

        Fragment {
            start,
            accepting: accepting_states,
        }
    }

    /// Builds `L(a)·L(b)`. The start of `a` stays the start. Every accepting
    /// state of `a` continues like the start of `b` and stays accepting only if
    /// `b` accepts the empty word.
    pub fn concatenation(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let b_transitions = self.transitions(b.start);
        let b_start_accepting = self.is_accepting(b.start);

        for &state in &a.accepting {
            self.add_transitions(state, &b_transitions);
            self.graph[state].accepting = b_start_accepting;
        }

        let b_start = b.start;
        let mut accepting_states = b.accepting_without(b_start);
        if b_start_accepting {
            accepting_states.extend(a.accepting);
        }

        tracing::debug!(
            start = ?self.graph[a.start].id,
            spliced = b_transitions.len(),
            accepting = accepting_states.len(),
            "concatenation"
        );

        Fragment {
            start: a.start,
            accepting: accepting_states,
        }
    }

    /// Builds `L(a)*`. A fresh accepting start takes over the transitions of
    /// the old start, and every accepting state loops back through the same
    /// transitions.
    pub fn iteration(&mut self, a: Fragment) -> Fragment {
        let transitions = self.transitions(a.start);

        let start = self.add_state(true);
        self.add_transitions(start, &transitions);

        let a_start = a.start;
        let mut accepting_states = a.accepting_without(a_start);
        for &state in &accepting_states {
            self.add_transitions(state, &transitions);
        }
        accepting_states.push(start);

        tracing::debug!(
            start = ?self.graph[start].id,
            looped = accepting_states.len() - 1,
            "iteration"
        );

        Fragment {
            start,
            accepting: accepting_states,
        }
    }

    /// Turns the arena into a finished automaton rooted at `fragment`.
    pub fn finish(self, fragment: Fragment) -> NFA {
        NFA::new(self.graph, fragment.start, fragment.accepting)
    }
}
