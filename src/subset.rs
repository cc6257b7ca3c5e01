//! Conversion of an [`NFA`] into an equivalent [`DFA`] via subset construction.
//!
//! Every DFA state stands for a set of NFA states reachable from `{0}`.
//! Sets are numbered in discovery order while processing sets in that same order
//! and the alphabet in ascending order, so the output numbering is fully deterministic.
//!
//! In the worst case an NFA with `n` states yields `2^n` DFA states, each inspected for
//! every symbol of the alphabet. This is inherent to the construction.

use super::{symbols, Automaton, StateId, StateSet, Symbol, DFA, NFA};
use indexmap::IndexMap;
use log::{debug, trace};

/// Result of a subset construction, keeping the NFA states behind every DFA state.
#[derive(Debug, Clone)]
pub struct SubsetConstruction {
	dfa: DFA,
	subsets: Vec<StateSet>,
}

impl SubsetConstruction {
	/// Returns the constructed DFA.
	pub fn dfa(&self) -> &DFA {
		&self.dfa
	}

	/// Returns the NFA states of every DFA state, indexed by DFA state id.
	pub fn subsets(&self) -> &[StateSet] {
		&self.subsets
	}

	/// Returns the NFA states of a DFA state.
	pub fn subset(&self, state: StateId) -> Option<&StateSet> {
		self.subsets.get(state)
	}

	/// Consumes the result, returning the DFA.
	pub fn into_dfa(self) -> DFA {
		self.dfa
	}
}

/// Converts an NFA into a DFA accepting the same language.
pub fn subset_construction(nfa: &NFA) -> DFA {
	subset_construction_with_mapping(nfa).into_dfa()
}

/// Converts an NFA into a DFA accepting the same language, keeping the state mapping.
pub fn subset_construction_with_mapping(nfa: &NFA) -> SubsetConstruction {
	debug!("subset construction on NFA with {} states", nfa.num_states());

	let accepting = nfa.accepting_states();
	let start = nfa.initial();

	// discovered sets in insertion order, index = DFA state id, value = accepting
	let mut discovered: IndexMap<StateSet, bool> = IndexMap::new();
	discovered.insert(start, start.intersects(&accepting));
	let mut records: Vec<(StateId, Symbol, StateId)> = Vec::new();

	let mut cursor = 0;
	while let Some((&current, _)) = discovered.get_index(cursor) {
		for symbol in symbols() {
			let next = nfa.move_on(&current, symbol);
			if next.is_empty() {
				continue;
			}
			let dst = match discovered.get_index_of(&next) {
				Some(id) => id,
				None => {
					let accept = next.intersects(&accepting);
					let (id, _) = discovered.insert_full(next, accept);
					trace!("discovered DFA state {} = {} (accepting: {})", id, next, accept);
					id
				}
			};
			records.push((cursor, symbol, dst));
		}
		cursor += 1;
	}

	let accepting: Vec<_> = discovered.values().copied().collect();
	let subsets: Vec<_> = discovered.into_keys().collect();
	let dfa = DFA::from_records(accepting, records);
	debug!(
		"subset construction produced DFA with {} states and {} transitions",
		dfa.num_states(),
		dfa.transitions().count()
	);

	SubsetConstruction { dfa, subsets }
}

impl NFA {
	/// Converts the NFA into an equivalent DFA.
	/// See [`subset_construction`].
	pub fn to_dfa(&self) -> DFA {
		subset_construction(self)
	}
}

impl From<&NFA> for DFA {
	fn from(nfa: &NFA) -> Self {
		subset_construction(nfa)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use maplit::btreeset;
	use quickcheck::{quickcheck, TestResult};
	use std::collections::{BTreeSet, HashSet, VecDeque};

	fn set(states: BTreeSet<StateId>) -> StateSet {
		StateSet::from_states(states).unwrap()
	}

	fn ends_in_man() -> NFA {
		let mut nfa = NFA::new(4).unwrap();
		nfa.add_transition_for_all(0, 0).unwrap();
		nfa.add_transition(0, b'm', 1).unwrap();
		nfa.add_transition(1, b'a', 2).unwrap();
		nfa.add_transition(2, b'n', 3).unwrap();
		nfa.set_accepting(3, true).unwrap();
		nfa
	}

	/// Builds a small NFA over `a`, `b` & `c` from arbitrary data.
	fn arbitrary_nfa(size: u8, accept_mask: u8, edges: &[(u8, u8, u8)]) -> NFA {
		let n = usize::from(size % 6) + 1;
		let mut nfa = NFA::new(n).unwrap();
		for state in 0..n {
			let accept = accept_mask & (1 << state) != 0;
			nfa.set_accepting(state, accept).unwrap();
		}
		for &(src, symbol, dst) in edges {
			nfa.add_transition(usize::from(src) % n, b'a' + symbol % 3, usize::from(dst) % n)
				.unwrap();
		}
		nfa
	}

	/// Maps arbitrary data to a word over `a` to `d`, where `d` never has a transition.
	fn arbitrary_word(raw: &[u8]) -> Vec<u8> {
		raw.iter().map(|byte| b'a' + byte % 4).collect()
	}

	/// Counts the distinct sets reachable from `{0}` by breadth-first search.
	fn reachable_subsets(nfa: &NFA) -> usize {
		let mut seen = HashSet::new();
		let mut queue = VecDeque::new();
		seen.insert(nfa.initial());
		queue.push_back(nfa.initial());
		while let Some(current) = queue.pop_front() {
			for symbol in symbols() {
				let next = nfa.move_on(&current, symbol);
				if !next.is_empty() && seen.insert(next) {
					queue.push_back(next);
				}
			}
		}
		seen.len()
	}

	#[test]
	fn ends_in_man_equivalent() {
		let mut nfa = ends_in_man();
		let mut dfa = nfa.to_dfa();

		for (input, expected) in &[("man", true), ("woman", true), ("mans", false), ("", false)] {
			assert_eq!(*expected, nfa.run(input), "NFA result on {:?}", input);
			assert_eq!(*expected, dfa.run(input), "DFA result on {:?}", input);
		}
		assert_eq!(4, dfa.num_states(), "Unexpected number of DFA states");
		assert_eq!(reachable_subsets(&nfa), dfa.num_states());
	}

	#[test]
	fn numbering() {
		let result = subset_construction_with_mapping(&ends_in_man());
		assert_eq!(
			&[
				set(btreeset![0]),
				set(btreeset![0, 1]),
				set(btreeset![0, 2]),
				set(btreeset![0, 3]),
			][..],
			result.subsets(),
			"States not numbered in discovery order"
		);

		let dfa = result.dfa();
		assert_eq!(Some(0), dfa.transition(0, b'x').unwrap());
		assert_eq!(Some(1), dfa.transition(0, b'm').unwrap());
		assert_eq!(Some(2), dfa.transition(1, b'a').unwrap());
		assert_eq!(Some(1), dfa.transition(1, b'm').unwrap());
		assert_eq!(Some(3), dfa.transition(2, b'n').unwrap());
		assert!(dfa.is_accepting(3).unwrap());
		assert!(!dfa.is_accepting(2).unwrap());
		assert_eq!(None, result.subset(4));
	}

	#[test]
	fn empty_union_leaves_no_transition() {
		let mut nfa = NFA::new(3).unwrap();
		nfa.add_transition(0, b'a', 1).unwrap();
		nfa.add_transition(0, b'a', 2).unwrap();
		nfa.set_accepting(2, true).unwrap();

		let dfa = DFA::from(&nfa);
		assert_eq!(2, dfa.num_states());
		assert_eq!(1, dfa.transitions().count(), "Transition on empty union recorded");
		assert_eq!(None, dfa.transition(1, b'a').unwrap());
		assert!(dfa.evaluate("a"));
		assert!(!dfa.evaluate("aa"));
	}

	#[test]
	fn accepting_start() {
		let mut nfa = NFA::new(1).unwrap();
		nfa.set_accepting(0, true).unwrap();
		let dfa = nfa.to_dfa();
		assert_eq!(1, dfa.num_states());
		assert_eq!(0, dfa.transitions().count());
		assert!(dfa.evaluate(""), "Empty input rejected with accepting start");
		assert!(!dfa.evaluate("a"));
	}

	#[test]
	fn unreachable_states_dropped() {
		let mut nfa = NFA::new(5).unwrap();
		nfa.add_transition(0, b'a', 1).unwrap();
		nfa.add_transition(3, b'a', 4).unwrap();
		nfa.add_transition(4, b'b', 3).unwrap();
		nfa.set_accepting(4, true).unwrap();

		let result = subset_construction_with_mapping(&nfa);
		assert_eq!(2, result.dfa().num_states());
		assert!(
			result.subsets().iter().all(|subset| !subset.contains(3) && !subset.contains(4)),
			"Unreachable NFA states found in DFA"
		);
		assert_eq!(0, result.dfa().accepting_states().count());
	}

	#[test]
	fn equivalence() {
		fn prop(size: u8, accept_mask: u8, edges: Vec<(u8, u8, u8)>, words: Vec<Vec<u8>>) -> bool {
			let nfa = arbitrary_nfa(size, accept_mask, &edges);
			let dfa = subset_construction(&nfa);
			words.iter().map(|raw| arbitrary_word(raw)).all(|word| {
				let nfa_run = nfa.simulate(nfa.initial(), &word);
				let dfa_run = dfa.simulate(dfa.initial(), &word);
				nfa_run.accepted == dfa_run.accepted && nfa_run.halted == dfa_run.halted
			})
		}
		quickcheck(prop as fn(u8, u8, Vec<(u8, u8, u8)>, Vec<Vec<u8>>) -> bool);
	}

	#[test]
	fn deterministic() {
		fn prop(size: u8, accept_mask: u8, edges: Vec<(u8, u8, u8)>) -> bool {
			let nfa = arbitrary_nfa(size, accept_mask, &edges);
			subset_construction(&nfa) == subset_construction(&nfa.clone())
		}
		quickcheck(prop as fn(u8, u8, Vec<(u8, u8, u8)>) -> bool);
	}

	#[test]
	fn reachable_size() {
		fn prop(size: u8, accept_mask: u8, edges: Vec<(u8, u8, u8)>) -> TestResult {
			if edges.len() > 40 {
				return TestResult::discard();
			}
			let nfa = arbitrary_nfa(size, accept_mask, &edges);
			let result = subset_construction_with_mapping(&nfa);
			let distinct: HashSet<_> = result.subsets().iter().collect();
			TestResult::from_bool(
				result.dfa().num_states() == reachable_subsets(&nfa)
					&& distinct.len() == result.subsets().len(),
			)
		}
		quickcheck(prop as fn(u8, u8, Vec<(u8, u8, u8)>) -> TestResult);
	}
}
