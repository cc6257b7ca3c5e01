use log::trace;
use std::{error, fmt};

/// Number of symbols in the input alphabet.
/// Symbols are addressed by their ordinal code, so only 7-bit ASCII is valid input.
pub const ALPHABET_SIZE: usize = 128;

/// An input symbol, identified by its ordinal code.
pub type Symbol = u8;

/// A positional state identifier.
pub type StateId = usize;

/// Iterates over the whole alphabet in ascending order.
pub fn symbols() -> impl Iterator<Item = Symbol> {
	(0..ALPHABET_SIZE).map(|symbol| symbol as Symbol)
}

/// Returns the table column for a symbol
/// or an `AutomatonError::InvalidSymbol` error if it is outside of the alphabet.
pub(crate) fn check_symbol(symbol: Symbol) -> Result<usize, AutomatonError> {
	let column = usize::from(symbol);
	if column < ALPHABET_SIZE {
		Ok(column)
	} else {
		Err(AutomatonError::InvalidSymbol(u32::from(symbol)))
	}
}

/// Returns an `AutomatonError::InexistentState` error if the state is not below `num_states`.
pub(crate) fn check_state(state: StateId, num_states: usize) -> Result<(), AutomatonError> {
	if state < num_states {
		Ok(())
	} else {
		Err(AutomatonError::InexistentState { state, num_states })
	}
}

/// Outcome of running an automaton over an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<C> {
	/// Configuration the run ended in.
	/// On a halted run this is the last configuration before the missing move.
	pub configuration: C,

	/// Whether the run stopped before consuming the whole input.
	pub halted: bool,

	/// Final verdict.
	pub accepted: bool,
}

/// Trait representing a finite automaton over the fixed 128-symbol alphabet.
///
/// Every automaton keeps a run cursor ("current configuration").
/// [`execute`](Automaton::execute) reads and advances the cursor without resetting it,
/// so independent runs either go through [`run`](Automaton::run)
/// or call [`reset`](Automaton::reset) first.
/// [`simulate`](Automaton::simulate) and [`evaluate`](Automaton::evaluate) never touch the cursor.
pub trait Automaton: Sized {
	/// Run configuration: a single state or a set of live states.
	type Configuration: Clone + PartialEq + fmt::Debug;

	/// Creates a new automaton with `num_states` states, no transitions and no accepting states.
	/// Returns an `AutomatonError::NoStates` error if `num_states` is zero.
	fn with_states(num_states: usize) -> Result<Self, AutomatonError>;

	/// Returns the number of states.
	fn num_states(&self) -> usize;

	/// Checks whether the automaton has a state with the given id.
	fn has_state(&self, state: StateId) -> bool {
		state < self.num_states()
	}

	/// Checks whether a state is accepting.
	fn is_accepting(&self, state: StateId) -> Result<bool, AutomatonError>;

	/// Marks a state as accepting or non-accepting.
	fn set_accepting(&mut self, state: StateId, accept: bool) -> Result<(), AutomatonError>;

	/// Returns the start configuration.
	fn initial(&self) -> Self::Configuration;

	/// Performs a single move.
	/// Returns `None` if there is no move on the symbol, which rejects the input.
	fn step(
		&self,
		configuration: &Self::Configuration,
		symbol: Symbol,
	) -> Option<Self::Configuration>;

	/// Checks whether a configuration is accepting.
	fn accepts(&self, configuration: &Self::Configuration) -> bool;

	/// Gets the current configuration.
	fn current(&self) -> &Self::Configuration;

	/// Updates the current configuration.
	/// Returns an `AutomatonError::InexistentState` error if it refers to an inexistent state.
	fn set_current(&mut self, configuration: Self::Configuration) -> Result<(), AutomatonError>;

	/// Moves the cursor back to the start configuration.
	fn reset(&mut self);

	/// Runs the automaton on an input starting from `from` without touching the cursor.
	/// Stops at the first symbol without a move.
	fn simulate<T>(&self, from: Self::Configuration, input: T) -> Run<Self::Configuration>
	where
		T: AsRef<[u8]>,
	{
		let mut configuration = from;
		for (position, &symbol) in input.as_ref().iter().enumerate() {
			match self.step(&configuration, symbol) {
				Some(next) => configuration = next,
				None => {
					trace!("halted on symbol {} at position {}", symbol, position);
					return Run {
						configuration,
						halted: true,
						accepted: false,
					};
				}
			}
		}
		let accepted = self.accepts(&configuration);
		Run {
			configuration,
			halted: false,
			accepted,
		}
	}

	/// Runs the automaton on an input starting from the current configuration.
	/// The cursor is left where the run stopped and is not reset afterwards.
	fn execute<T>(&mut self, input: T) -> bool
	where
		T: AsRef<[u8]>,
	{
		let run = self.simulate(self.current().clone(), input);
		self.set_current(run.configuration).is_ok() && run.accepted
	}

	/// Resets the automaton and runs it on an input.
	fn run<T>(&mut self, input: T) -> bool
	where
		T: AsRef<[u8]>,
	{
		self.reset();
		self.execute(input)
	}

	/// Checks whether the automaton accepts an input, starting from the start configuration.
	fn evaluate<T>(&self, input: T) -> bool
	where
		T: AsRef<[u8]>,
	{
		self.simulate(self.initial(), input).accepted
	}
}

/// Enum representing an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
	/// An automaton needs at least its start state.
	NoStates,

	/// A state id outside of `0..num_states`.
	InexistentState { state: StateId, num_states: usize },

	/// A symbol outside of the alphabet, given by its code point.
	InvalidSymbol(u32),

	/// A value the bounded state set cannot hold.
	Capacity { value: usize, capacity: usize },
}

impl fmt::Display for AutomatonError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::NoStates => write!(f, "Automaton without states"),
			Self::InexistentState { state, num_states } => write!(
				f,
				"Inexistent State ID \"{}\" (automaton has {} states)",
				state, num_states
			),
			Self::InvalidSymbol(code) => write!(
				f,
				"Symbol {} outside of the {}-symbol alphabet",
				code, ALPHABET_SIZE
			),
			Self::Capacity { value, capacity } => write!(
				f,
				"Value {} exceeds state set capacity of {}",
				value, capacity
			),
		}
	}
}

impl error::Error for AutomatonError {}
