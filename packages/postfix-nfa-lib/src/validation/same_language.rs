use itertools::{Either, Itertools, repeat_n};

use crate::automaton::{AutomatonLetter, Language};

/// All words over `alphabet` with a length of at most `max_word_length`,
/// shortest first.
pub fn words_up_to<L: Clone>(
    alphabet: &[L],
    max_word_length: usize,
) -> impl Iterator<Item = Vec<L>> + '_ {
    (0..=max_word_length).flat_map(move |length| {
        if length == 0 {
            return Either::Left(std::iter::once(vec![]));
        }

        Either::Right(
            repeat_n(alphabet, length)
                .multi_cartesian_product()
                .map(|word| word.into_iter().cloned().collect_vec()),
        )
    })
}

/// Finds a word of length at most `max_word_length` on which `a` and `b`
/// disagree.
pub fn find_difference<L, A, B>(a: &A, b: &B, max_word_length: usize) -> Option<Vec<L>>
where
    A: Language<Letter = L>,
    B: Language<Letter = L>,
    L: AutomatonLetter,
{
    words_up_to(a.alphabet(), max_word_length).find(|word| a.accepts(word) != b.accepts(word))
}

/// Checks if two languages agree on all words up to a certain length. The
/// alphabets have to be the same.
pub fn same_language<L, A, B>(a: &A, b: &B, max_word_length: usize) -> bool
where
    A: Language<Letter = L>,
    B: Language<Letter = L>,
    L: AutomatonLetter,
{
    a.alphabet() == b.alphabet() && find_difference(a, b, max_word_length).is_none()
}

pub fn assert_same_language<L, A, B>(a: &A, b: &B, max_word_length: usize)
where
    A: Language<Letter = L>,
    B: Language<Letter = L>,
    L: AutomatonLetter,
{
    if a.alphabet() != b.alphabet() {
        panic!("Alphabets are not the same");
    }

    for word in words_up_to(a.alphabet(), max_word_length) {
        match (a.accepts(&word), b.accepts(&word)) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by `a` but not by `b`. Thus their languages are not equal.",
                    word
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by `b` but not by `a`. Thus their languages are not equal.",
                    word
                );
            }
            _ => {}
        }
    }
}

/// Assert that, up to `max_word_length`, every word accepted by `a` is also
/// accepted by `b`.
pub fn assert_subset_language<L, A, B>(a: &A, b: &B, max_word_length: usize)
where
    A: Language<Letter = L>,
    B: Language<Letter = L>,
    L: AutomatonLetter,
{
    if a.alphabet() != b.alphabet() {
        panic!("Alphabets are not the same");
    }

    for word in words_up_to(a.alphabet(), max_word_length) {
        if a.accepts(&word) && !b.accepts(&word) {
            panic!(
                "{:?} is accepted by `a` but not by `b`. Thus the language of `a` is not a subset of `b`.",
                word
            );
        }
    }
}
