//! Ready-made demonstration automata.
//!
//! All of them are case-sensitive and reject any input symbol they have no transition for.

use super::{symbols, Automaton, AutomatonError, DFA, NFA};

/// DFA accepting exactly `ab`.
pub fn only_ab() -> Result<DFA, AutomatonError> {
	let mut dfa = DFA::new(3)?;
	dfa.set_transition(0, b'a', 1)?;
	dfa.set_transition(1, b'b', 2)?;
	dfa.set_accepting(2, true)?;
	Ok(dfa)
}

/// DFA accepting strings starting with `ab`.
pub fn starts_with_ab() -> Result<DFA, AutomatonError> {
	let mut dfa = DFA::new(3)?;
	dfa.set_transition(0, b'a', 1)?;
	dfa.set_transition(1, b'b', 2)?;
	dfa.set_transition_for_all(2, 2)?;
	dfa.set_accepting(2, true)?;
	Ok(dfa)
}

/// DFA accepting binary strings with an even number of `1`s.
pub fn even_ones() -> Result<DFA, AutomatonError> {
	let mut dfa = DFA::new(2)?;
	dfa.set_transition(0, b'0', 0)?;
	dfa.set_transition(0, b'1', 1)?;
	dfa.set_transition(1, b'1', 0)?;
	dfa.set_transition(1, b'0', 1)?;
	dfa.set_accepting(0, true)?;
	Ok(dfa)
}

/// DFA accepting binary strings with an even number of `0`s and an even number of `1`s.
pub fn even_ones_zeros() -> Result<DFA, AutomatonError> {
	// state = parity of 1s + 2 * parity of 0s
	let mut dfa = DFA::new(4)?;
	for state in 0..4 {
		dfa.set_transition(state, b'1', state ^ 1)?;
		dfa.set_transition(state, b'0', state ^ 2)?;
	}
	dfa.set_accepting(0, true)?;
	Ok(dfa)
}

/// DFA accepting strings with at least one `b` and no `a`.
pub fn b_no_a() -> Result<DFA, AutomatonError> {
	let mut dfa = DFA::new(3)?;
	dfa.set_transition_for_all(0, 0)?;
	dfa.set_transition(0, b'a', 1)?;
	dfa.set_transition(0, b'b', 2)?;
	dfa.set_transition_for_all(2, 2)?;
	dfa.set_transition(2, b'a', 1)?;
	dfa.set_accepting(2, true)?;
	Ok(dfa)
}

/// NFA accepting strings ending in `man`.
pub fn ends_in_man() -> Result<NFA, AutomatonError> {
	let mut nfa = NFA::new(4)?;
	nfa.add_transition_for_all(0, 0)?;
	nfa.add_transition(0, b'm', 1)?;
	nfa.add_transition(1, b'a', 2)?;
	nfa.add_transition(2, b'n', 3)?;
	nfa.set_accepting(3, true)?;
	Ok(nfa)
}

/// NFA accepting strings with more than one of any of `a`, `g`, `h`, `i`, `o`, `s`, `t`, `w`,
/// or more than two `n`s.
pub fn washington() -> Result<NFA, AutomatonError> {
	const DOUBLED: &[u8] = b"aghiostw";
	const ACCEPT: usize = 9;

	let mut nfa = NFA::new(12)?;
	for state in 0..12 {
		nfa.add_transition_for_all(state, state)?;
	}
	for (i, &symbol) in DOUBLED.iter().enumerate() {
		nfa.add_transition(0, symbol, i + 1)?;
		nfa.add_transition(i + 1, symbol, ACCEPT)?;
	}
	nfa.add_transition(0, b'n', 10)?;
	nfa.add_transition(10, b'n', 11)?;
	nfa.add_transition(11, b'n', ACCEPT)?;
	nfa.set_accepting(ACCEPT, true)?;
	Ok(nfa)
}

/// NFA accepting strings ending in `x`, `y` or `z` that do not start with one of them.
pub fn xyz() -> Result<NFA, AutomatonError> {
	const ENDINGS: &[u8] = b"xyz";

	let mut nfa = NFA::new(4)?;
	let others: Vec<_> = symbols().filter(|symbol| !ENDINGS.contains(symbol)).collect();
	nfa.add_transition_for_symbols(0, &others, 2)?;
	nfa.add_transition_for_symbols(0, ENDINGS, 1)?;
	nfa.add_transition_for_symbols(2, ENDINGS, 3)?;
	nfa.add_transition_for_all(2, 2)?;
	nfa.set_accepting(3, true)?;
	Ok(nfa)
}
