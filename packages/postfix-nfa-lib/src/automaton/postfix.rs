use crate::{
    automaton::{
        builder::{Fragment, StateArena},
        error::BuildError,
        letter::Letter,
        nfa::NFA,
    },
    logger::{LogLevel, Logger},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Union,
    Concatenation,
    Iteration,
}

impl Operator {
    pub fn arity(self) -> usize {
        match self {
            Operator::Union | Operator::Concatenation => 2,
            Operator::Iteration => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Union => '+',
            Operator::Concatenation => '.',
            Operator::Iteration => '*',
        }
    }
}

/// One character of a postfix expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixToken {
    Letter(Letter),
    EmptyWord,
    Operator(Operator),
}

impl PostfixToken {
    pub fn parse(symbol: char, position: usize) -> Result<Self, BuildError> {
        match symbol {
            '1' => Ok(PostfixToken::EmptyWord),
            '+' => Ok(PostfixToken::Operator(Operator::Union)),
            '.' => Ok(PostfixToken::Operator(Operator::Concatenation)),
            '*' => Ok(PostfixToken::Operator(Operator::Iteration)),
            _ => Letter::from_char(symbol)
                .map(PostfixToken::Letter)
                .ok_or(BuildError::InvalidSymbol {
                    symbol,
                    position: Some(position),
                }),
        }
    }

    /// Splits a whole expression into tokens, failing on the first character
    /// that is neither a letter, `1` nor an operator.
    pub fn tokenize(expression: &str) -> Result<Vec<Self>, BuildError> {
        expression
            .chars()
            .enumerate()
            .map(|(position, symbol)| PostfixToken::parse(symbol, position))
            .collect()
    }
}

/// Evaluates postfix expressions over `{a, b, c, 1, +, ., *}` into an [NFA].
#[derive(Debug, Clone, Default)]
pub struct PostfixCompiler<'a> {
    logger: Option<&'a Logger>,
}

impl<'a> PostfixCompiler<'a> {
    pub fn new() -> Self {
        PostfixCompiler { logger: None }
    }

    pub fn with_logger(mut self, logger: &'a Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_optional_logger(mut self, logger: Option<&'a Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn compile(&self, expression: &str) -> Result<NFA, BuildError> {
        let result = self.evaluate(expression);

        if let Some(l) = self.logger {
            match &result {
                Ok(nfa) => l
                    .object("Automaton")
                    .add_field("expression", expression)
                    .add_field("states", &nfa.graph.node_count().to_string())
                    .add_field("reachable states", &nfa.reachable_states().len().to_string())
                    .add_field("reachable edges", &nfa.reachable_edge_count().to_string())
                    .add_field("accepting", &nfa.accepting_states().len().to_string())
                    .log(LogLevel::Info),
                Err(e) => l.warn(&format!("Failed to build {:?}: {}", expression, e)),
            }
        }

        result
    }

    fn evaluate(&self, expression: &str) -> Result<NFA, BuildError> {
        if expression.is_empty() {
            return Err(BuildError::EmptyExpression);
        }

        let mut arena = StateArena::new();
        let mut stack: Vec<Fragment> = vec![];

        for (position, symbol) in expression.chars().enumerate() {
            let fragment = match PostfixToken::parse(symbol, position)? {
                PostfixToken::Letter(letter) => arena.letter(letter),
                PostfixToken::EmptyWord => arena.empty_word(),
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

                    let right = stack.pop().ok_or(missing.clone())?;
                    match operator {
                        Operator::Iteration => arena.iteration(right),
                        Operator::Union => {
                            let left = stack.pop().ok_or(missing)?;
                            arena.union(left, right)
                        }
                        Operator::Concatenation => {
                            let left = stack.pop().ok_or(missing)?;
                            arena.concatenation(left, right)
                        }
                    }
                }
            };

            if let Some(l) = self.logger {
                l.debug(&format!(
                    "{:?} at {}: stack depth {}, {} states",
                    symbol,
                    position,
                    stack.len() + 1,
                    arena.state_count()
                ));
            }

            stack.push(fragment);
        }

        if stack.len() != 1 {
            return Err(BuildError::LeftoverOperands { count: stack.len() });
        }

        match stack.pop() {
            Some(fragment) => Ok(arena.finish(fragment)),
            None => Err(BuildError::LeftoverOperands { count: 0 }),
        }
    }
}
