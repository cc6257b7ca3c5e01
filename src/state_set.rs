//! Bounded set of state ids stored in a single machine word.

use super::{AutomatonError, StateId};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// A set of state ids below [`StateSet::CAPACITY`].
///
/// Equality and hashing follow the underlying bit pattern, so a set can key a map.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<StateId>", into = "Vec<StateId>")]
pub struct StateSet {
	bits: u64,
}

impl StateSet {
	/// Maximum number of distinct values, ids `0..CAPACITY` are representable.
	///
	/// The whole word is usable. Older bit-vector sets of this layout rejected values
	/// above 31, so NFAs built against that bound keep working unchanged.
	pub const CAPACITY: usize = 64;

	/// The start configuration of an NFA, `{0}`.
	pub const START: Self = Self { bits: 1 };

	/// Creates a new empty set.
	pub const fn new() -> Self {
		Self { bits: 0 }
	}

	/// Creates a set containing a single state.
	pub fn singleton(state: StateId) -> Result<Self, AutomatonError> {
		let mut set = Self::new();
		set.insert(state)?;
		Ok(set)
	}

	/// Creates a set from a sequence of states.
	pub fn from_states<V>(states: V) -> Result<Self, AutomatonError>
	where
		V: IntoIterator<Item = StateId>,
	{
		let mut set = Self::new();
		for state in states {
			set.insert(state)?;
		}
		Ok(set)
	}

	/// Adds a state to the set.
	/// Returns an `AutomatonError::Capacity` error if the state is not representable.
	pub fn insert(&mut self, state: StateId) -> Result<(), AutomatonError> {
		if state >= Self::CAPACITY {
			return Err(AutomatonError::Capacity {
				value: state,
				capacity: Self::CAPACITY,
			});
		}
		self.bits |= 1u64 << state;
		Ok(())
	}

	/// Removes a state from the set.
	pub fn remove(&mut self, state: StateId) {
		if state < Self::CAPACITY {
			self.bits &= !(1u64 << state);
		}
	}

	/// Checks whether the set contains a state.
	pub fn contains(&self, state: StateId) -> bool {
		state < Self::CAPACITY && self.bits & (1u64 << state) != 0
	}

	/// Checks whether the set is empty.
	pub fn is_empty(&self) -> bool {
		self.bits == 0
	}

	/// Returns the number of states in the set.
	pub fn len(&self) -> usize {
		self.bits.count_ones() as usize
	}

	/// Returns the largest state in the set.
	pub fn max(&self) -> Option<StateId> {
		if self.is_empty() {
			None
		} else {
			Some(Self::CAPACITY - 1 - self.bits.leading_zeros() as usize)
		}
	}

	/// Returns the union of this set and another.
	pub fn union(&self, other: &Self) -> Self {
		Self {
			bits: self.bits | other.bits,
		}
	}

	/// Adds all states of another set to this one.
	pub fn union_with(&mut self, other: &Self) {
		self.bits |= other.bits;
	}

	/// Checks whether this set shares a state with another.
	pub fn intersects(&self, other: &Self) -> bool {
		self.bits & other.bits != 0
	}

	/// Iterates over the states in ascending order.
	pub fn iter(&self) -> StateSetIter {
		StateSetIter { bits: self.bits }
	}
}

/// Ascending iterator over a [`StateSet`].
#[derive(Debug, Clone)]
pub struct StateSetIter {
	bits: u64,
}

impl Iterator for StateSetIter {
	type Item = StateId;

	fn next(&mut self) -> Option<StateId> {
		if self.bits == 0 {
			None
		} else {
			let state = self.bits.trailing_zeros() as StateId;
			self.bits &= self.bits - 1;
			Some(state)
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.bits.count_ones() as usize;
		(len, Some(len))
	}
}

impl ExactSizeIterator for StateSetIter {}

impl IntoIterator for StateSet {
	type Item = StateId;
	type IntoIter = StateSetIter;

	fn into_iter(self) -> StateSetIter {
		self.iter()
	}
}

impl<'a> IntoIterator for &'a StateSet {
	type Item = StateId;
	type IntoIter = StateSetIter;

	fn into_iter(self) -> StateSetIter {
		self.iter()
	}
}

impl TryFrom<Vec<StateId>> for StateSet {
	type Error = AutomatonError;

	fn try_from(states: Vec<StateId>) -> Result<Self, AutomatonError> {
		Self::from_states(states)
	}
}

impl From<StateSet> for Vec<StateId> {
	fn from(set: StateSet) -> Self {
		set.iter().collect()
	}
}

impl fmt::Debug for StateSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl fmt::Display for StateSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{{")?;
		for (i, state) in self.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{}", state)?;
		}
		write!(f, "}}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insert() {
		let mut set = StateSet::new();
		assert!(set.is_empty(), "New set not empty");

		set.insert(3).unwrap();
		set.insert(0).unwrap();
		set.insert(63).unwrap();
		set.insert(3).unwrap();

		assert!(!set.is_empty(), "Set empty after insertion");
		assert_eq!(3, set.len(), "Duplicate insertion counted twice");
		assert!(set.contains(0) && set.contains(3) && set.contains(63));
		assert!(!set.contains(1), "Set contains value never inserted");
		assert!(!set.contains(64), "Set contains value beyond capacity");
		assert_eq!(Some(63), set.max());
		assert_eq!(Some(0), StateSet::START.max(), "Largest state of {{0}} misreported");
		assert_eq!(None, StateSet::new().max());

		set.remove(3);
		set.remove(64);
		assert!(!set.contains(3), "Removed value still present");
		assert_eq!(2, set.len());
		assert_eq!(StateSet::singleton(0).unwrap(), StateSet::START);
	}

	#[test]
	fn capacity() {
		let mut set = StateSet::singleton(5).unwrap();
		assert_eq!(
			Err(AutomatonError::Capacity {
				value: 64,
				capacity: 64
			}),
			set.insert(64),
			"Value beyond capacity accepted"
		);
		assert_eq!(
			StateSet::singleton(5).unwrap(),
			set,
			"Failed insertion modified the set"
		);
		assert!(StateSet::from_states(vec![1, 2, 100]).is_err());
		assert!(StateSet::singleton(32).is_ok(), "Values above 31 not representable");
	}

	#[test]
	fn union() {
		let a = StateSet::from_states(vec![0, 2]).unwrap();
		let b = StateSet::from_states(vec![2, 5]).unwrap();
		let c = StateSet::singleton(7).unwrap();

		let union = a.union(&b);
		assert_eq!(StateSet::from_states(vec![0, 2, 5]).unwrap(), union);
		assert!(a.intersects(&b), "Overlapping sets do not intersect");
		assert!(!a.intersects(&c), "Disjoint sets intersect");

		let mut d = c;
		d.union_with(&a);
		assert_eq!(vec![0, 2, 7], Vec::from(d));
		assert_eq!(StateSet::singleton(7).unwrap(), c, "Copy aliased the original");
	}

	#[test]
	fn iterate() {
		let set = StateSet::from_states(vec![9, 1, 40, 4]).unwrap();
		let first: Vec<_> = set.iter().collect();
		let second: Vec<_> = set.into_iter().collect();
		assert_eq!(vec![1, 4, 9, 40], first, "Iteration not ascending");
		assert_eq!(first, second, "Iteration not restartable");
		assert_eq!(4, set.iter().len());
		assert_eq!(None, StateSet::new().iter().next());
	}

	#[test]
	fn format() {
		let set = StateSet::from_states(vec![2, 0]).unwrap();
		assert_eq!("{0, 2}", set.to_string());
		assert_eq!("{}", StateSet::new().to_string());
		assert_eq!("{0, 2}", format!("{:?}", set));
	}

	#[test]
	fn deserialize() {
		let set: StateSet = serde_yaml::from_str("[3, 1, 3]").unwrap();
		assert_eq!(StateSet::from_states(vec![1, 3]).unwrap(), set);
		assert!(
			serde_yaml::from_str::<StateSet>("[1, 64]").is_err(),
			"Deserialized value beyond capacity"
		);
	}
}
