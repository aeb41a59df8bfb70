use std::fmt::Display;

use crate::automaton::{
    Alphabet, Language,
    error::BuildError,
    letter::Letter,
    postfix::{Operator, PostfixToken},
};

/// Syntax tree of a postfix expression.
///
/// Membership is decided directly on the tree by splitting words, without
/// building an automaton. This is slow but obviously correct, which makes it a
/// good oracle for the NFA construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Regex {
    EmptyWord,
    Letter(Letter),
    Union(Box<Regex>, Box<Regex>),
    Concatenation(Box<Regex>, Box<Regex>),
    Iteration(Box<Regex>),
}

impl Regex {
    /// Parses the same postfix notation the NFA compiler accepts and fails in
    /// the same situations.
    pub fn from_postfix(expression: &str) -> Result<Regex, BuildError> {
        if expression.is_empty() {
            return Err(BuildError::EmptyExpression);
        }

        let mut stack: Vec<Regex> = vec![];

        for (position, token) in PostfixToken::tokenize(expression)?.into_iter().enumerate() {
            let regex = match token {
                PostfixToken::Letter(letter) => Regex::Letter(letter),
                PostfixToken::EmptyWord => Regex::EmptyWord,
                PostfixToken::Operator(operator) => {
                    let missing = BuildError::MissingOperands {
                        operator: operator.symbol(),
                        position,
                        required: operator.arity(),
                        available: stack.len(),
                    };
                    if stack.len() < operator.arity() {
                        return Err(missing);
                    }

                    let right = Box::new(stack.pop().ok_or(missing.clone())?);
                    match operator {
                        Operator::Iteration => Regex::Iteration(right),
                        Operator::Union => {
                            Regex::Union(Box::new(stack.pop().ok_or(missing)?), right)
                        }
                        Operator::Concatenation => {
                            Regex::Concatenation(Box::new(stack.pop().ok_or(missing)?), right)
                        }
                    }
                }
            };

            stack.push(regex);
        }

        if stack.len() != 1 {
            return Err(BuildError::LeftoverOperands { count: stack.len() });
        }

        stack.pop().ok_or(BuildError::LeftoverOperands { count: 0 })
    }

    pub fn matches(&self, word: &[Letter]) -> bool {
        match self {
            Regex::EmptyWord => word.is_empty(),
            Regex::Letter(letter) => word == [*letter],
            Regex::Union(left, right) => left.matches(word) || right.matches(word),
            Regex::Concatenation(left, right) => {
                (0..=word.len()).any(|i| left.matches(&word[..i]) && right.matches(&word[i..]))
            }
            // The first iteration consumes at least one letter, so the
            // recursion always shrinks the word.
            Regex::Iteration(inner) => {
                word.is_empty()
                    || (1..=word.len())
                        .any(|i| inner.matches(&word[..i]) && self.matches(&word[i..]))
            }
        }
    }

    /// Renders the tree back to postfix notation.
    pub fn to_postfix(&self) -> String {
        match self {
            Regex::EmptyWord => "1".to_string(),
            Regex::Letter(letter) => letter.to_string(),
            Regex::Union(left, right) => format!("{}{}+", left.to_postfix(), right.to_postfix()),
            Regex::Concatenation(left, right) => {
                format!("{}{}.", left.to_postfix(), right.to_postfix())
            }
            Regex::Iteration(inner) => format!("{}*", inner.to_postfix()),
        }
    }
}

/// Infix rendering with full parentheses, for readable test failures.
impl Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regex::EmptyWord => write!(f, "ε"),
            Regex::Letter(letter) => write!(f, "{}", letter),
            Regex::Union(left, right) => write!(f, "({} | {})", left, right),
            Regex::Concatenation(left, right) => write!(f, "({}{})", left, right),
            Regex::Iteration(inner) => write!(f, "{}*", inner),
        }
    }
}

impl Alphabet for Regex {
    type Letter = Letter;

    fn alphabet(&self) -> &[Letter] {
        &Letter::ALL
    }
}

impl Language for Regex {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Letter>) -> bool
    where
        Letter: 'a,
    {
        let word = input.into_iter().copied().collect::<Vec<_>>();
        self.matches(&word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trip() {
        for expression in ["a", "1", "ab+", "ab.c*+", "1a.*"] {
            assert_eq!(
                Regex::from_postfix(expression).unwrap().to_postfix(),
                expression
            );
        }
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Regex::from_postfix(""), Err(BuildError::EmptyExpression));
        assert_eq!(
            Regex::from_postfix("a+"),
            Err(BuildError::MissingOperands {
                operator: '+',
                position: 1,
                required: 2,
                available: 1
            })
        );
        assert_eq!(
            Regex::from_postfix("ab"),
            Err(BuildError::LeftoverOperands { count: 2 })
        );
    }

    #[test]
    fn matches_star() {
        let regex = Regex::from_postfix("ab.*").unwrap();

        assert!(regex.matches(&[]));
        assert!(regex.matches(&Letter::word("abab").unwrap()));
        assert!(!regex.matches(&Letter::word("aba").unwrap()));
    }

    #[test]
    fn display_infix() {
        let regex = Regex::from_postfix("ab+c.*").unwrap();
        assert_eq!(regex.to_string(), "((a | b)c)*");
    }
}
