use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Reasons a postfix expression does not describe an automaton.
///
/// Every variant is an invalid expression. The variants only exist to make
/// log output useful.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildError {
    EmptyExpression,
    InvalidSymbol {
        symbol: char,
        position: Option<usize>,
    },
    MissingOperands {
        operator: char,
        position: usize,
        required: usize,
        available: usize,
    },
    LeftoverOperands {
        count: usize,
    },
}

impl Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::EmptyExpression => write!(f, "expression is empty"),
            BuildError::InvalidSymbol {
                symbol,
                position: Some(position),
            } => write!(f, "invalid symbol {symbol:?} at position {position}"),
            BuildError::InvalidSymbol {
                symbol,
                position: None,
            } => write!(f, "invalid symbol {symbol:?}"),
            BuildError::MissingOperands {
                operator,
                position,
                required,
                available,
            } => write!(
                f,
                "operator {operator:?} at position {position} needs {required} operand(s), found {available}"
            ),
            BuildError::LeftoverOperands { count } => write!(
                f,
                "expression leaves {count} automata on the stack, expected exactly 1"
            ),
        }
    }
}

impl std::error::Error for BuildError {}
