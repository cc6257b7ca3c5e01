use super::{
	automaton::{check_state, check_symbol},
	Automaton, AutomatonError, StateId, Symbol, ALPHABET_SIZE,
};
use serde::{Deserialize, Serialize};
use std::{
	collections::{BTreeMap, BTreeSet},
	convert::TryFrom,
	fmt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct State {
	accepts: bool,
	transitions: [Option<StateId>; ALPHABET_SIZE],
}

impl State {
	pub fn new(accepts: bool) -> Self {
		Self {
			accepts,
			transitions: [None; ALPHABET_SIZE],
		}
	}
}

/// A deterministic finite state automaton with a dense transition table.
///
/// State `0` is the start state.
/// A missing entry in the table rejects the input on that symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Definition", into = "Definition")]
pub struct DFA {
	current: StateId,
	states: Vec<State>,
}

impl DFA {
	/// Creates a new DFA with a given number of states.
	/// Alias for [`Automaton::with_states`].
	pub fn new(num_states: usize) -> Result<Self, AutomatonError> {
		Self::with_states(num_states)
	}

	/// Builds a DFA from acceptance flags and a list of transitions without validation.
	/// Later transitions on the same state & symbol overwrite earlier ones.
	pub(crate) fn from_records<T>(accepting: Vec<bool>, records: T) -> Self
	where
		T: IntoIterator<Item = (StateId, Symbol, StateId)>,
	{
		let mut states: Vec<_> = accepting.into_iter().map(State::new).collect();
		for (src, symbol, dst) in records {
			states[src].transitions[usize::from(symbol)] = Some(dst);
		}
		Self { current: 0, states }
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

	/// Sets the transition from `src` on `symbol` to `dst`, overwriting any previous one.
	pub fn set_transition(
		&mut self,
		src: StateId,
		symbol: Symbol,
		dst: StateId,
	) -> Result<(), AutomatonError> {
		let column = check_symbol(symbol)?;
		check_state(dst, self.num_states())?;
		self.get_state_mut(src)?.transitions[column] = Some(dst);
		Ok(())
	}

	/// Sets the transition from `src` to `dst` for every symbol in `symbols`.
	/// Nothing is written if any symbol is outside of the alphabet.
	pub fn set_transition_for_symbols<T>(
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
			transitions[column] = Some(dst);
		}
		Ok(())
	}

	/// Sets the transition from `src` to `dst` for the whole alphabet.
	pub fn set_transition_for_all(
		&mut self,
		src: StateId,
		dst: StateId,
	) -> Result<(), AutomatonError> {
		check_state(dst, self.num_states())?;
		self.get_state_mut(src)?.transitions = [Some(dst); ALPHABET_SIZE];
		Ok(())
	}

	/// Returns the destination of the transition from `src` on `symbol`, if any.
	pub fn transition(
		&self,
		src: StateId,
		symbol: Symbol,
	) -> Result<Option<StateId>, AutomatonError> {
		let column = check_symbol(symbol)?;
		Ok(self.get_state(src)?.transitions[column])
	}

	/// Iterates over all defined transitions, ordered by source state and symbol.
	pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
		self.states.iter().enumerate().flat_map(|(src, state)| {
			state
				.transitions
				.iter()
				.enumerate()
				.filter_map(move |(symbol, dst)| dst.map(|dst| (src, symbol as Symbol, dst)))
		})
	}

	/// Iterates over the accepting states in ascending order.
	pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
		self.states
			.iter()
			.enumerate()
			.filter(|(_, state)| state.accepts)
			.map(|(id, _)| id)
	}
}

impl Automaton for DFA {
	type Configuration = StateId;

	fn with_states(num_states: usize) -> Result<Self, AutomatonError> {
		if num_states == 0 {
			return Err(AutomatonError::NoStates);
		}
		Ok(Self {
			current: 0,
			states: vec![State::new(false); num_states],
		})
	}

	fn num_states(&self) -> usize {
		self.states.len()
	}

	fn is_accepting(&self, state: StateId) -> Result<bool, AutomatonError> {
		Ok(self.get_state(state)?.accepts)
	}

	fn set_accepting(&mut self, state: StateId, accept: bool) -> Result<(), AutomatonError> {
		self.get_state_mut(state)?.accepts = accept;
		Ok(())
	}

	fn initial(&self) -> StateId {
		0
	}

	fn step(&self, state: &StateId, symbol: Symbol) -> Option<StateId> {
		let column = check_symbol(symbol).ok()?;
		self.states.get(*state)?.transitions[column]
	}

	fn accepts(&self, state: &StateId) -> bool {
		self.states.get(*state).map_or(false, |state| state.accepts)
	}

	fn current(&self) -> &StateId {
		&self.current
	}

	fn set_current(&mut self, state: StateId) -> Result<(), AutomatonError> {
		check_state(state, self.num_states())?;
		self.current = state;
		Ok(())
	}

	fn reset(&mut self) {
		self.current = 0;
	}
}

impl fmt::Display for DFA {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f, "States: 0..{}", self.num_states())?;
		writeln!(f, "Start state: 0")?;
		for (id, state) in self.states.iter().enumerate() {
			write!(f, "State {} |", id)?;
			for (symbol, dst) in state.transitions.iter().enumerate() {
				if let Some(dst) = dst {
					write!(f, " on {:?} goto {} |", symbol as u8 as char, dst)?;
				}
			}
			writeln!(f, " halt on remaining inputs")?;
		}
		let accepting: Vec<_> = self.accepting_states().map(|id| id.to_string()).collect();
		write!(f, "Accepting states: {{{}}}", accepting.join(", "))
	}
}

/// Serialized form of a [`DFA`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Definition {
	states: usize,
	#[serde(default)]
	accepting: BTreeSet<StateId>,
	#[serde(default)]
	transitions: BTreeMap<StateId, BTreeMap<char, StateId>>,
}

impl TryFrom<Definition> for DFA {
	type Error = AutomatonError;

	fn try_from(definition: Definition) -> Result<Self, AutomatonError> {
		let mut dfa = Self::with_states(definition.states)?;
		for state in definition.accepting {
			dfa.set_accepting(state, true)?;
		}
		for (src, transitions) in definition.transitions {
			for (input, dst) in transitions {
				let symbol = u8::try_from(input)
					.map_err(|_| AutomatonError::InvalidSymbol(u32::from(input)))?;
				dfa.set_transition(src, symbol, dst)?;
			}
		}
		Ok(dfa)
	}
}

impl From<DFA> for Definition {
	fn from(dfa: DFA) -> Self {
		let mut transitions: BTreeMap<_, BTreeMap<_, _>> = BTreeMap::new();
		for (src, symbol, dst) in dfa.transitions() {
			transitions
				.entry(src)
				.or_default()
				.insert(char::from(symbol), dst);
		}
		Self {
			states: dfa.num_states(),
			accepting: dfa.accepting_states().collect(),
			transitions,
		}
	}
}
