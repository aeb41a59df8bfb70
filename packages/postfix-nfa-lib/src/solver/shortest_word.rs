use hashbrown::HashSet;
use petgraph::graph::NodeIndex;

use crate::{
    automaton::{error::BuildError, letter::Letter, nfa::NFA, state::StateId},
    logger::{LogLevel, Logger},
    solver::{PrefixQuery, QueryResult, QueryStatistics, QueryStatus},
};

/// Finds the length of the shortest word accepted by an [NFA] that starts with
/// `symbol^length`.
///
/// The search works on frontiers, the sets of states reachable after some
/// number of steps. A frontier never holds the same state twice, which keeps
/// nondeterminism from blowing it up.
///
/// 1. The prefix is forced: `length` times only `symbol` edges are followed. If
///    the frontier runs empty the prefix can't be read and there is no answer.
/// 2. If the frontier after the prefix contains an accepting state the answer
///    is `length`.
/// 3. Otherwise edges of every letter are followed, one level per step, until
///    an accepting state shows up. States seen in an earlier step of this phase
///    are skipped, so the phase ends once no new state is reachable.
///
/// The automaton is only read, running the same query twice gives the same
/// answer.
#[derive(Debug, Clone)]
pub struct ShortestWordSolver<'a> {
    nfa: &'a NFA,
    logger: Option<&'a Logger>,
    statistics: QueryStatistics,
}

impl<'a> ShortestWordSolver<'a> {
    pub fn new(nfa: &'a NFA, logger: Option<&'a Logger>) -> Self {
        ShortestWordSolver {
            nfa,
            logger,
            statistics: QueryStatistics::default(),
        }
    }

    pub fn solve(&mut self, query: PrefixQuery) -> QueryResult {
        let start_time = std::time::Instant::now();
        self.statistics = QueryStatistics::default();

        if let Some(l) = self.logger {
            l.object("Query")
                .add_field("prefix symbol", &format!("{:?}", query.symbol))
                .add_field("prefix length", &query.length.to_string())
                .log(LogLevel::Info);
        }

        let status = self.search(query);
        self.statistics.time = start_time.elapsed();

        if let Some(l) = self.logger {
            l.object("Query Result")
                .add_field("result", &status.to_string())
                .add_field("prefix steps", &self.statistics.prefix_steps.to_string())
                .add_field(
                    "extension steps",
                    &self.statistics.extension_steps.to_string(),
                )
                .add_field("visited states", &self.statistics.visited_states.to_string())
                .add_field("max frontier", &self.statistics.max_frontier.to_string())
                .add_field("time", &format!("{:?}", self.statistics.time))
                .log(LogLevel::Info);
        }

        QueryResult::new(status, self.statistics.clone())
    }

    /// The frontier after reading `symbol^length` from the start, empty if the
    /// prefix can't be read.
    pub fn prefix_frontier(&mut self, query: PrefixQuery) -> Vec<NodeIndex> {
        let mut seen_over_run = HashSet::new();
        self.read_prefix(query, &mut seen_over_run)
    }

    fn read_prefix(
        &mut self,
        query: PrefixQuery,
        seen_over_run: &mut HashSet<StateId>,
    ) -> Vec<NodeIndex> {
        // A symbol outside the alphabet labels no edge, so any non-empty prefix
        // of it is unreadable.
        let prefix_letter = Letter::from_char(query.symbol);

        let mut frontier = vec![self.nfa.start()];
        self.record_frontier(&frontier, seen_over_run);

        for step in 1..=query.length {
            let mut level_seen = HashSet::new();
            frontier = self.advance(&frontier, &mut level_seen, |letter| {
                Some(letter) == prefix_letter
            });
            self.statistics.prefix_steps = step;
            self.record_frontier(&frontier, seen_over_run);

            tracing::debug!(step, frontier = frontier.len(), "prefix step");
            if let Some(l) = self.logger {
                l.debug(&format!("prefix step {}: {} states", step, frontier.len()));
            }

            if frontier.is_empty() {
                break;
            }
        }

        frontier
    }

    fn search(&mut self, query: PrefixQuery) -> QueryStatus {
        let mut seen_over_run = HashSet::new();
        let mut frontier = self.read_prefix(query, &mut seen_over_run);

        if frontier.is_empty() {
            return QueryStatus::Unreachable;
        }

        if self.nfa.is_accepting_set(&frontier) {
            return QueryStatus::Found(query.length);
        }

        let mut visited = frontier
            .iter()
            .map(|&state| self.nfa.state_id(state))
            .collect::<HashSet<_>>();
        let mut length = query.length;

        loop {
            frontier = self.advance(&frontier, &mut visited, |_| true);
            length += 1;
            self.statistics.extension_steps += 1;
            self.record_frontier(&frontier, &mut seen_over_run);

            tracing::debug!(length, frontier = frontier.len(), "extension step");
            if let Some(l) = self.logger {
                l.debug(&format!(
                    "extension to length {}: {} new states",
                    length,
                    frontier.len()
                ));
            }

            if frontier.is_empty() {
                return QueryStatus::Unreachable;
            }

            if self.nfa.is_accepting_set(&frontier) {
                return QueryStatus::Found(length);
            }
        }
    }

    /// Follows every edge accepted by `follow` out of `frontier`. Targets whose
    /// identifier is already in `seen` are dropped, the others are added to it.
    fn advance(
        &self,
        frontier: &[NodeIndex],
        seen: &mut HashSet<StateId>,
        follow: impl Fn(Letter) -> bool,
    ) -> Vec<NodeIndex> {
        let mut next = vec![];

        for &state in frontier {
            for (letter, target) in self.nfa.transitions(state) {
                if follow(letter) && seen.insert(self.nfa.state_id(target)) {
                    next.push(target);
                }
            }
        }

        next
    }

    fn record_frontier(&mut self, frontier: &[NodeIndex], seen_over_run: &mut HashSet<StateId>) {
        self.statistics.max_frontier = self.statistics.max_frontier.max(frontier.len());
        for &state in frontier {
            seen_over_run.insert(self.nfa.state_id(state));
        }
        self.statistics.visited_states = seen_over_run.len();
    }
}

/// Answers `query` on the outcome of a compilation. A failed compilation
/// short-circuits to [QueryStatus::InvalidAutomaton] without searching.
pub fn solve_query(
    built: Result<&NFA, &BuildError>,
    query: PrefixQuery,
    logger: Option<&Logger>,
) -> QueryResult {
    match built {
        Ok(nfa) => ShortestWordSolver::new(nfa, logger).solve(query),
        Err(e) => {
            if let Some(l) = logger {
                l.info(&format!("Skipping query, no automaton: {}", e));
            }
            QueryResult::invalid()
        }
    }
}

/// Shorthand for the common case without logging.
pub fn shortest_word_with_prefix(nfa: &NFA, symbol: char, length: usize) -> QueryStatus {
    ShortestWordSolver::new(nfa, None)
        .solve(PrefixQuery::new(symbol, length))
        .status
}
