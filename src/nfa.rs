use super::{
	automaton::{check_state, check_symbol},
	Automaton, AutomatonError, StateId, StateSet, Symbol, ALPHABET_SIZE,
};
use serde::{Deserialize, Serialize};
use std::{
	collections::{BTreeMap, BTreeSet},
	convert::TryFrom,
	fmt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct State {
	transitions: [StateSet; ALPHABET_SIZE],
}

impl State {
	pub fn new() -> Self {
		Self {
			transitions: [StateSet::new(); ALPHABET_SIZE],
		}
	}
}

/// A non-deterministic finite state automaton.
///
/// Each state & symbol pair maps to a possibly empty set of destinations.
/// The number of states is bounded by [`StateSet::CAPACITY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Definition", into = "Definition")]
pub struct NFA {
	current: StateSet,
	accepting: StateSet,
	states: Vec<State>,
}

impl NFA {
	/// Creates a new NFA with a given number of states.
	/// Alias for [`Automaton::with_states`].
	pub fn new(num_states: usize) -> Result<Self, AutomatonError> {
		Self::with_states(num_states)
	}

	/// Returns a reference to the requested state or an `AutomatonError::InexistentState` error otherwise.
	fn get_state(&self, id: StateId) -> Result<&State, AutomatonError> {
		check_state(id, self.states.len())?;
		Ok(&self.states[id])
	}

	/// Returns a mutable reference to the requested state or an `AutomatonError::InexistentState` error otherwise.
	fn get_state_mut(&mut self, id: StateId) -> Result<&mut State, AutomatonError> {
		check_state(id, self.states.len())?;
		Ok(&mut self.states[id])
	}

	/// Adds `dst` to the destinations of `src` on `symbol`.
	pub fn add_transition(
		&mut self,
		src: StateId,
		symbol: Symbol,
		dst: StateId,
	) -> Result<(), AutomatonError> {
		let column = check_symbol(symbol)?;
		check_state(dst, self.num_states())?;
		self.get_state_mut(src)?.transitions[column].insert(dst)
	}

	/// Adds `dst` to the destinations of `src` for every symbol in `symbols`.
	/// Nothing is written if any symbol is outside of the alphabet.
	pub fn add_transition_for_symbols<T>(
		&mut self,
		src: StateId,
		symbols: T,
		dst: StateId,
	) -> Result<(), AutomatonError>
	where
		T: AsRef<[u8]>,
	{
		let columns = symbols
			.as_ref()
			.iter()
			.map(|&symbol| check_symbol(symbol))
			.collect::<Result<Vec<_>, _>>()?;
		check_state(dst, self.num_states())?;
		let State { transitions, .. } = self.get_state_mut(src)?;
		for column in columns {
			transitions[column].insert(dst)?;
		}
		Ok(())
	}

	/// Adds `dst` to the destinations of `src` for the whole alphabet.
	pub fn add_transition_for_all(
		&mut self,
		src: StateId,
		dst: StateId,
	) -> Result<(), AutomatonError> {
		check_state(dst, self.num_states())?;
		let State { transitions, .. } = self.get_state_mut(src)?;
		for set in transitions.iter_mut() {
			set.insert(dst)?;
		}
		Ok(())
	}

	/// Returns the destinations of `src` on `symbol`.
	pub fn transitions(&self, src: StateId, symbol: Symbol) -> Result<StateSet, AutomatonError> {
		let column = check_symbol(symbol)?;
		Ok(self.get_state(src)?.transitions[column])
	}

	/// Returns the set of accepting states.
	pub fn accepting_states(&self) -> StateSet {
		self.accepting
	}

	/// Returns the union of the destinations of every state in `states` on `symbol`.
	/// States or symbols the automaton does not have contribute nothing.
	pub fn move_on(&self, states: &StateSet, symbol: Symbol) -> StateSet {
		let column = usize::from(symbol);
		if column >= ALPHABET_SIZE {
			return StateSet::new();
		}
		states
			.iter()
			.filter_map(|id| self.states.get(id))
			.fold(StateSet::new(), |next, state| {
				next.union(&state.transitions[column])
			})
	}
}

impl Automaton for NFA {
	type Configuration = StateSet;

	/// Creates a new NFA with `num_states` states.
	/// Returns an `AutomatonError::Capacity` error if the states do not fit into a [`StateSet`].
	fn with_states(num_states: usize) -> Result<Self, AutomatonError> {
		if num_states == 0 {
			return Err(AutomatonError::NoStates);
		}
		if num_states > StateSet::CAPACITY {
			return Err(AutomatonError::Capacity {
				value: num_states - 1,
				capacity: StateSet::CAPACITY,
			});
		}
		Ok(Self {
			current: StateSet::START,
			accepting: StateSet::new(),
			states: vec![State::new(); num_states],
		})
	}

	fn num_states(&self) -> usize {
		self.states.len()
	}

	fn is_accepting(&self, state: StateId) -> Result<bool, AutomatonError> {
		check_state(state, self.num_states())?;
		Ok(self.accepting.contains(state))
	}

	fn set_accepting(&mut self, state: StateId, accept: bool) -> Result<(), AutomatonError> {
		check_state(state, self.num_states())?;
		if accept {
			self.accepting.insert(state)
		} else {
			self.accepting.remove(state);
			Ok(())
		}
	}

	fn initial(&self) -> StateSet {
		StateSet::START
	}

	fn step(&self, states: &StateSet, symbol: Symbol) -> Option<StateSet> {
		let next = self.move_on(states, symbol);
		if next.is_empty() {
			None
		} else {
			Some(next)
		}
	}

	fn accepts(&self, states: &StateSet) -> bool {
		states.intersects(&self.accepting)
	}

	fn current(&self) -> &StateSet {
		&self.current
	}

	fn set_current(&mut self, states: StateSet) -> Result<(), AutomatonError> {
		if let Some(max) = states.max() {
			check_state(max, self.num_states())?;
		}
		self.current = states;
		Ok(())
	}

	fn reset(&mut self) {
		self.current = self.initial();
	}
}

impl fmt::Display for NFA {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f, "States: 0..{}", self.num_states())?;
		writeln!(f, "Start state: 0")?;
		for (id, state) in self.states.iter().enumerate() {
			write!(f, "State {} |", id)?;
			for (symbol, dst) in state.transitions.iter().enumerate() {
				if !dst.is_empty() {
					write!(f, " on {:?} to {} |", symbol as u8 as char, dst)?;
				}
			}
			writeln!(f, " halt on remaining inputs")?;
		}
		write!(f, "Accepting states: {}", self.accepting)
	}
}

/// Serialized form of an [`NFA`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Definition {
	states: usize,
	#[serde(default)]
	accepting: BTreeSet<StateId>,
	#[serde(default)]
	transitions: BTreeMap<StateId, BTreeMap<char, BTreeSet<StateId>>>,
}

impl TryFrom<Definition> for NFA {
	type Error = AutomatonError;

	fn try_from(definition: Definition) -> Result<Self, AutomatonError> {
		let mut nfa = Self::with_states(definition.states)?;
		for state in definition.accepting {
			nfa.set_accepting(state, true)?;
		}
		for (src, transitions) in definition.transitions {
			for (input, destinations) in transitions {
				let symbol = u8::try_from(input)
					.map_err(|_| AutomatonError::InvalidSymbol(u32::from(input)))?;
				for dst in destinations {
					nfa.add_transition(src, symbol, dst)?;
				}
			}
		}
		Ok(nfa)
	}
}

impl From<NFA> for Definition {
	fn from(nfa: NFA) -> Self {
		let transitions = nfa
			.states
			.iter()
			.enumerate()
			.filter_map(|(src, state)| {
				let moves: BTreeMap<_, BTreeSet<_>> = state
					.transitions
					.iter()
					.enumerate()
					.filter(|(_, dst)| !dst.is_empty())
					.map(|(symbol, dst)| (symbol as u8 as char, dst.iter().collect()))
					.collect();
				if moves.is_empty() {
					None
				} else {
					Some((src, moves))
				}
			})
			.collect();
		Self {
			states: nfa.num_states(),
			accepting: nfa.accepting.iter().collect(),
			transitions,
		}
	}
}
