use petgraph::graph::DiGraph;
use postfix_nfa_lib::{
    automaton::{
        letter::Letter,
        nfa::NFA,
        postfix::PostfixCompiler,
        state::{StateId, StateNode},
    },
    logger::{LogLevel, Logger},
    solver::{
        PrefixQuery, QueryStatus,
        shortest_word::{ShortestWordSolver, shortest_word_with_prefix, solve_query},
    },
};

fn answer(expression: &str, symbol: char, length: usize) -> String {
    let built = NFA::from_postfix(expression);
    solve_query(built.as_ref(), PrefixQuery::new(symbol, length), None)
        .status
        .to_string()
}

#[test]
fn test_reference_queries() {
    assert_eq!(answer("ab.", 'a', 1), "2");
    assert_eq!(answer("a", 'b', 1), "INF");
    assert_eq!(answer("ab+", 'a', 0), "1");
    assert_eq!(answer("", 'a', 1), "ERROR");
    assert_eq!(answer("a*", 'a', 3), "3");
}

#[test]
fn test_invalid_expressions_give_error() {
    for expression in ["+", "a.", "ab", "abd+", "*"] {
        assert_eq!(answer(expression, 'a', 0), "ERROR", "{}", expression);
    }
}

#[test]
fn test_empty_prefix_is_shortest_word() {
    assert_eq!(answer("1", 'a', 0), "0");
    assert_eq!(answer("a*", 'b', 0), "0");
    assert_eq!(answer("ab.c.", 'c', 0), "3");
    assert_eq!(answer("ab.c+", 'a', 0), "1");
    assert_eq!(answer("aa.b+", 'a', 0), "1");
}

#[test]
fn test_prefix_forces_longer_word() {
    assert_eq!(answer("aa.b+", 'a', 1), "2");
    assert_eq!(answer("a*b.", 'a', 2), "3");
    assert_eq!(answer("ab.*c.", 'a', 1), "3");
    assert_eq!(answer("ab+*", 'b', 4), "4");
    assert_eq!(answer("ab.*", 'a', 1), "2");
}

#[test]
fn test_unreadable_prefix() {
    assert_eq!(answer("1", 'a', 1), "INF");
    assert_eq!(answer("a*", 'b', 1), "INF");
    assert_eq!(answer("ab+", 'c', 1), "INF");
    assert_eq!(answer("ab.*c.", 'a', 2), "INF");
    assert_eq!(answer("ab.", 'a', 2), "INF");
}

#[test]
fn test_union_with_empty_word_start() {
    assert_eq!(answer("1a+b.", 'b', 0), "1");
    assert_eq!(answer("1a+b.", 'b', 1), "1");
    assert_eq!(answer("1a+b.", 'a', 1), "2");
}

#[test]
fn test_symbol_outside_alphabet() {
    assert_eq!(answer("a", 'x', 0), "1");
    assert_eq!(answer("a", 'x', 1), "INF");
    assert_eq!(answer("1", '1', 1), "INF");
}

#[test]
fn test_extension_terminates_without_accepting_state() {
    // q0 -a-> q1, q1 -b-> q1 and nothing accepts.
    let mut graph = DiGraph::new();
    let q0 = graph.add_node(StateNode::non_accepting(StateId::new(0)));
    let q1 = graph.add_node(StateNode::non_accepting(StateId::new(1)));
    graph.add_edge(q0, q1, Letter::A);
    graph.add_edge(q1, q1, Letter::B);
    let nfa = NFA::new(graph, q0, vec![]);

    assert_eq!(shortest_word_with_prefix(&nfa, 'a', 1), QueryStatus::Unreachable);
    assert_eq!(shortest_word_with_prefix(&nfa, 'a', 0), QueryStatus::Unreachable);
    assert_eq!(shortest_word_with_prefix(&nfa, 'b', 1), QueryStatus::Unreachable);
}

#[test]
fn test_queries_do_not_change_the_automaton() {
    let nfa = NFA::from_postfix("ab+*c.").unwrap();
    let before = nfa.to_graphviz(None);

    let first = shortest_word_with_prefix(&nfa, 'a', 2);
    let second = shortest_word_with_prefix(&nfa, 'a', 2);

    assert_eq!(first, QueryStatus::Found(3));
    assert_eq!(first, second);
    assert_eq!(nfa.to_graphviz(None), before);

    let mut solver = ShortestWordSolver::new(&nfa, None);
    let a = solver.solve(PrefixQuery::new('b', 1));
    let b = solver.solve(PrefixQuery::new('b', 1));
    assert_eq!(a.status, b.status);
    assert_eq!(a.statistics.visited_states, b.statistics.visited_states);
}

#[test]
fn test_prefix_frontier() {
    let nfa = NFA::from_postfix("ab.a*.").unwrap();
    let mut solver = ShortestWordSolver::new(&nfa, None);

    assert_eq!(solver.prefix_frontier(PrefixQuery::new('a', 0)), vec![nfa.start()]);
    assert_eq!(solver.prefix_frontier(PrefixQuery::new('a', 1)).len(), 1);
    assert!(solver.prefix_frontier(PrefixQuery::new('a', 2)).is_empty());
}

#[test]
fn test_nondeterministic_frontier_stays_small() {
    // Every `a` can be read by both branches of the union.
    let nfa = NFA::from_postfix("a*a*+*").unwrap();
    let result = ShortestWordSolver::new(&nfa, None).solve(PrefixQuery::new('a', 20));

    assert_eq!(result.status, QueryStatus::Found(20));
    assert!(result.statistics.max_frontier <= nfa.reachable_states().len());
}

#[test]
fn test_solve_with_logger() {
    let logger = Logger::new(LogLevel::Error, "test".into());
    let compiled = PostfixCompiler::new()
        .with_logger(&logger)
        .compile("abc..*");

    let result = solve_query(
        compiled.as_ref(),
        PrefixQuery::new('a', 1),
        Some(&logger),
    );

    assert_eq!(result.status, QueryStatus::Found(3));
    assert_eq!(result.statistics.prefix_steps, 1);
    assert_eq!(result.statistics.extension_steps, 2);
}
