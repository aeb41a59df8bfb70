pub mod automaton;
pub mod config;
pub mod logger;
pub mod solver;
pub mod validation;
