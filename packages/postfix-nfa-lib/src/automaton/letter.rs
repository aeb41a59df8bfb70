use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A letter of the fixed input alphabet `{a, b, c}`.
///
/// The empty word symbol `1` is not a letter. It can appear in expressions but
/// never labels a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
}

impl Letter {
    pub const ALL: [Letter; 3] = [Letter::A, Letter::B, Letter::C];

    pub fn to_char(self) -> char {
        match self {
            Letter::A => 'a',
            Letter::B => 'b',
            Letter::C => 'c',
        }
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c {
            'a' => Some(Letter::A),
            'b' => Some(Letter::B),
            'c' => Some(Letter::C),
            _ => None,
        }
    }

    /// Parses a word like `"abca"`, returning `None` if any character is not a
    /// letter.
    pub fn word(s: &str) -> Option<Vec<Letter>> {
        s.chars().map(Letter::from_char).collect()
    }
}

impl TryFrom<char> for Letter {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Letter::from_char(c).ok_or(c)
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.to_char()
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
