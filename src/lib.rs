//! Deterministic & non-deterministic finite automata over a 128-symbol alphabet,
//! with subset construction for turning an [`NFA`] into an equivalent [`DFA`].

mod automaton;
pub mod catalog;
mod dfa;
mod nfa;
pub mod session;
mod state_set;
mod subset;

pub use automaton::{symbols, Automaton, AutomatonError, Run, StateId, Symbol, ALPHABET_SIZE};
pub use dfa::DFA;
pub use nfa::NFA;
pub use state_set::{StateSet, StateSetIter};
pub use subset::{subset_construction, subset_construction_with_mapping, SubsetConstruction};
