use postfix_nfa_lib::{
    automaton::{Language, letter::Letter, nfa::NFA},
    validation::{
        regex::Regex,
        same_language::{assert_same_language, assert_subset_language, find_difference, same_language},
    },
};

fn nfa(expression: &str) -> NFA {
    NFA::from_postfix(expression).unwrap()
}

fn regex(expression: &str) -> Regex {
    Regex::from_postfix(expression).unwrap()
}

#[test]
fn test_operators_match_regex() {
    for expression in [
        "a", "1", "ab+", "ab.", "a*", "1a+", "a1.", "1*", "ab+c.", "ab.c+*", "a*b*.", "ab.*a.",
        "1a+b1+.", "ab+*ab+*.c.", "a*b.c*.",
    ] {
        assert_same_language(&nfa(expression), &regex(expression), 5);
    }
}

#[test]
fn test_nested_iteration() {
    for expression in ["a**", "a*b*+*", "1a+*", "ab.*c.*", "1a.*b+*"] {
        assert_same_language(&nfa(expression), &regex(expression), 5);
    }
}

#[test]
fn test_equivalent_expressions() {
    assert!(same_language(&nfa("ab+"), &nfa("ba+"), 4));
    assert!(same_language(&nfa("a*"), &nfa("a**"), 5));
    assert!(same_language(&nfa("a1."), &nfa("a"), 4));
    assert!(same_language(&nfa("ab+*"), &nfa("a*b*.*"), 5));
    assert!(!same_language(&nfa("ab."), &nfa("ba."), 3));
}

#[test]
fn test_find_difference_is_shortest() {
    let difference = find_difference(&nfa("a*"), &nfa("aa.*"), 4);

    assert_eq!(difference, Some(vec![Letter::A]));
}

#[test]
fn test_operands_are_sublanguages() {
    assert_subset_language(&nfa("a"), &nfa("ab+"), 4);
    assert_subset_language(&nfa("b"), &nfa("ab+"), 4);
    assert_subset_language(&nfa("ab."), &nfa("ab.*"), 6);
    assert_subset_language(&nfa("1"), &nfa("c*"), 4);
}

#[test]
#[should_panic]
fn test_subset_failure_panics() {
    assert_subset_language(&nfa("ab+"), &nfa("a"), 2);
}

#[test]
fn test_membership() {
    let nfa = nfa("ab+*c.");
    let word = |s: &str| Letter::word(s).unwrap();

    assert!(nfa.accepts(&word("c")));
    assert!(nfa.accepts(&word("abbac")));
    assert!(!nfa.accepts(&word("abba")));
    assert!(!nfa.accepts(&word("cc")));
    assert!(!nfa.accepts(&[]));
}
