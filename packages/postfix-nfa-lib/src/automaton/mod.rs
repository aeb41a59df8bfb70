use std::{fmt::Debug, hash::Hash};

pub mod builder;
pub mod error;
pub mod letter;
pub mod nfa;
pub mod postfix;
pub mod state;

pub trait AutomatonLetter: Debug + Clone + PartialEq + Eq + Hash + Ord {}

impl<T: Debug + Clone + PartialEq + Eq + Hash + Ord> AutomatonLetter for T {}

pub trait Alphabet {
    type Letter: AutomatonLetter;

    fn alphabet(&self) -> &[Self::Letter];
}

/// The basic trait for anything that defines a language over a set alphabet.
pub trait Language: Alphabet {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Self::Letter>) -> bool
    where
        Self::Letter: 'a;
}
