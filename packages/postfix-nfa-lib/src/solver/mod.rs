use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod shortest_word;

/// The three possible answers of a prefix query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryStatus {
    /// Length of the shortest accepted word with the demanded prefix.
    Found(usize),
    /// No accepted word has the demanded prefix.
    Unreachable,
    /// The expression did not describe an automaton.
    InvalidAutomaton,
}

impl QueryStatus {
    pub fn is_found(&self) -> bool {
        matches!(self, QueryStatus::Found(_))
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, QueryStatus::Unreachable)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, QueryStatus::InvalidAutomaton)
    }

    pub fn length(&self) -> Option<usize> {
        match self {
            QueryStatus::Found(length) => Some(*length),
            _ => None,
        }
    }

    pub fn unwrap_length(self) -> usize {
        match self {
            QueryStatus::Found(length) => length,
            _ => panic!("Called unwrap_length on a {:?} QueryStatus", self),
        }
    }
}

/// Renders the single output token: the length, `INF` or `ERROR`.
impl Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryStatus::Found(length) => write!(f, "{}", length),
            QueryStatus::Unreachable => write!(f, "INF"),
            QueryStatus::InvalidAutomaton => write!(f, "ERROR"),
        }
    }
}

/// A word `symbol^length` every answer has to start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrefixQuery {
    pub symbol: char,
    pub length: usize,
}

impl PrefixQuery {
    pub fn new(symbol: char, length: usize) -> Self {
        PrefixQuery { symbol, length }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStatistics {
    /// Prefix steps that were taken before the search stopped or moved on.
    pub prefix_steps: usize,
    /// Free extension steps after the prefix.
    pub extension_steps: usize,
    /// Distinct states seen over both phases.
    pub visited_states: usize,
    pub max_frontier: usize,
    pub time: std::time::Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub status: QueryStatus,
    pub statistics: QueryStatistics,
}

impl QueryResult {
    pub fn new(status: QueryStatus, statistics: QueryStatistics) -> Self {
        QueryResult { status, statistics }
    }

    pub fn invalid() -> Self {
        QueryResult::new(QueryStatus::InvalidAutomaton, QueryStatistics::default())
    }

    pub fn is_found(&self) -> bool {
        self.status.is_found()
    }

    pub fn is_unreachable(&self) -> bool {
        self.status.is_unreachable()
    }

    pub fn is_invalid(&self) -> bool {
        self.status.is_invalid()
    }
}

/// Everything about one run, in a form that can be written as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableQueryResult {
    pub expression: String,
    pub query: PrefixQuery,
    pub status: QueryStatus,
    /// The plain output token, see [QueryStatus]'s [Display] impl.
    pub output: String,
    pub error: Option<String>,
    pub statistics: QueryStatistics,
}

impl SerializableQueryResult {
    pub fn new(
        expression: &str,
        query: PrefixQuery,
        result: QueryResult,
        error: Option<String>,
    ) -> Self {
        SerializableQueryResult {
            expression: expression.to_string(),
            query,
            status: result.status,
            output: result.status.to_string(),
            error,
            statistics: result.statistics,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
