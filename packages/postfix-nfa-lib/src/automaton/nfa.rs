use std::collections::VecDeque;

use hashbrown::HashSet;
use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{
    Alphabet, Language,
    error::BuildError,
    letter::Letter,
    postfix::PostfixCompiler,
    state::{StateId, StateNode},
};

/// A finished epsilon-free NFA over the letters `a`, `b`, `c`.
///
/// The graph may contain states that are no longer reachable from the start.
/// These are left over from construction and are ignored by every query.
#[derive(Debug, Clone)]
pub struct NFA {
    pub graph: DiGraph<StateNode, Letter>,
    start: NodeIndex,
    accepting: Vec<NodeIndex>,
}

impl NFA {
    pub fn new(graph: DiGraph<StateNode, Letter>, start: NodeIndex, accepting: Vec<NodeIndex>) -> Self {
        NFA {
            graph,
            start,
            accepting,
        }
    }

    /// Compiles a postfix expression without logging.
    pub fn from_postfix(expression: &str) -> Result<Self, BuildError> {
        PostfixCompiler::new().compile(expression)
    }

    pub fn start(&self) -> NodeIndex {
        self.start
    }

    /// The accepting states as recorded during construction.
    pub fn accepting_states(&self) -> &[NodeIndex] {
        &self.accepting
    }

    pub fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph[state].accepting
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &[NodeIndex]) -> bool {
        states.iter().any(|&x| self.is_accepting(x))
    }

    pub fn state_id(&self, state: NodeIndex) -> StateId {
        self.graph[state].id
    }

    /// All `(letter, target)` pairs leaving `state`, duplicates included.
    pub fn transitions(&self, state: NodeIndex) -> impl Iterator<Item = (Letter, NodeIndex)> + '_ {
        self.graph
            .edges(state)
            .map(|edge| (*edge.weight(), edge.target()))
    }

    /// Targets of the `letter` edges leaving `state`.
    pub fn successors(&self, state: NodeIndex, letter: Letter) -> impl Iterator<Item = NodeIndex> + '_ {
        self.transitions(state)
            .filter(move |(l, _)| *l == letter)
            .map(|(_, target)| target)
    }

    /// States reachable from the start in breadth-first order.
    pub fn reachable_states(&self) -> Vec<NodeIndex> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([self.start]);
        let mut order = vec![];
        visited.insert(self.start);

        while let Some(state) = queue.pop_front() {
            order.push(state);

            for edge in self.graph.edges(state) {
                if visited.insert(edge.target()) {
                    queue.push_back(edge.target());
                }
            }
        }

        order
    }

    /// Number of edges leaving reachable states.
    pub fn reachable_edge_count(&self) -> usize {
        self.reachable_states()
            .into_iter()
            .map(|state| self.graph.edges(state).count())
            .sum()
    }

    /// Renders the reachable part of the automaton in the DOT format.
    /// States are labeled with their identifiers.
    pub fn to_graphviz(&self, highlight_nodes: Option<&HashSet<NodeIndex>>) -> String {
        let states = self.reachable_states();

        let mut dot = String::new();
        dot.push_str("digraph finite_state_machine {\n");
        dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
        dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape=point,label=\"\"]START\n");

        dot.push_str(&format!(
            "node [shape = doublecircle]; {};\n",
            states
                .iter()
                .filter(|&&state| self.is_accepting(state))
                .map(|&state| self.state_id(state).as_u32())
                .join(" ")
        ));
        dot.push_str("node [shape = circle];\n");
        dot.push_str(&format!("START -> {};\n", self.state_id(self.start).as_u32()));

        for &state in &states {
            let mut attrs = vec![("label", format!("\"{}\"", self.state_id(state)))];

            if highlight_nodes.is_some_and(|nodes| nodes.contains(&state)) {
                attrs.push(("color", "red".to_string()));
            }

            dot.push_str(&format!(
                "{} [ {} ];\n",
                self.state_id(state).as_u32(),
                attrs.iter().map(|(k, v)| format!("{}={}", k, v)).join(" ")
            ));
        }

        for &state in &states {
            for (letter, target) in self.transitions(state) {
                dot.push_str(&format!(
                    "{} -> {} [ label=\"{}\" ];\n",
                    self.state_id(state).as_u32(),
                    self.state_id(target).as_u32(),
                    letter
                ));
            }
        }

        dot.push_str("}\n");

        dot
    }
}

impl Alphabet for NFA {
    type Letter = Letter;

    fn alphabet(&self) -> &[Letter] {
        &Letter::ALL
    }
}

impl Language for NFA {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Letter>) -> bool
    where
        Letter: 'a,
    {
        let mut current_states = vec![self.start];

        for &symbol in input {
            let mut seen = HashSet::new();
            let next_states = current_states
                .iter()
                .flat_map(|&state| self.successors(state, symbol))
                .filter(|&target| seen.insert(self.state_id(target)))
                .collect_vec();

            if next_states.is_empty() {
                return false;
            }

            current_states = next_states;
        }

        self.is_accepting_set(&current_states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(nfa: &NFA, word: &str) -> bool {
        nfa.accepts(&Letter::word(word).unwrap())
    }

    #[test]
    fn accepts_concatenation() {
        let nfa = NFA::from_postfix("ab.").unwrap();

        assert!(accepts(&nfa, "ab"));
        assert!(!accepts(&nfa, ""));
        assert!(!accepts(&nfa, "a"));
        assert!(!accepts(&nfa, "ba"));
        assert!(!accepts(&nfa, "abb"));
    }

    #[test]
    fn accepts_star_of_union() {
        let nfa = NFA::from_postfix("ab+*").unwrap();

        for word in ["", "a", "b", "abba", "bbbb"] {
            assert!(accepts(&nfa, word), "{word}");
        }
        assert!(!accepts(&nfa, "abc"));
    }

    #[test]
    fn accepting_list_matches_flags() {
        let nfa = NFA::from_postfix("1a+b.*c1+.").unwrap();
        let reachable = nfa.reachable_states();

        for state in &reachable {
            assert_eq!(
                nfa.is_accepting(*state),
                nfa.accepting_states().contains(state)
            );
        }
        for state in nfa.accepting_states() {
            assert!(reachable.contains(state));
        }
    }

    #[test]
    fn reachable_states_skip_replaced_starts() {
        let nfa = NFA::from_postfix("ab+").unwrap();

        assert_eq!(nfa.graph.node_count(), 5);
        assert_eq!(nfa.reachable_states().len(), 3);
        assert_eq!(nfa.reachable_edge_count(), 2);
    }

    #[test]
    fn graphviz_contains_reachable_states() {
        let nfa = NFA::from_postfix("a*").unwrap();
        let dot = nfa.to_graphviz(None);

        assert!(dot.starts_with("digraph finite_state_machine {"));
        assert!(dot.contains("START -> 2;"));
        assert!(dot.contains("2 -> 1 [ label=\"a\" ];"));
        assert!(dot.contains("1 -> 1 [ label=\"a\" ];"));
        assert!(!dot.contains("0 ["));
    }

    #[test]
    fn graphviz_highlights_nodes() {
        let nfa = NFA::from_postfix("a").unwrap();
        let highlight = HashSet::from([nfa.start()]);
        let dot = nfa.to_graphviz(Some(&highlight));

        assert!(dot.contains("0 [ label=\"q0\" color=red ];"));
        assert!(dot.contains("1 [ label=\"q1\" ];"));
    }
}
