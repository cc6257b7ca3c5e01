//! Interactive accept/reject loop over an automaton.

use super::Automaton;
use log::debug;
use std::io::{self, BufRead, Write};

/// Input word ending a session.
pub const SENTINEL: &str = "STOP";

/// Counts of the words judged during a session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
	pub accepted: usize,
	pub rejected: usize,
}

/// Feeds every whitespace-separated word from `reader` into the automaton until [`SENTINEL`]
/// or the end of input, writing `Accepted.` or `Rejected.` for each word.
/// Words are raw bytes, so input outside of the alphabet is judged like any other word.
/// The automaton is reset before every word.
pub fn run_session<A, R, W>(automaton: &mut A, reader: R, mut writer: W) -> io::Result<Summary>
where
	A: Automaton,
	R: BufRead,
	W: Write,
{
	let mut summary = Summary::default();
	for line in reader.split(b'\n') {
		let line = line?;
		for word in line
			.split(|byte| byte.is_ascii_whitespace())
			.filter(|word| !word.is_empty())
		{
			if word == SENTINEL.as_bytes() {
				debug!("session stopped by sentinel");
				return Ok(summary);
			}
			if automaton.run(word) {
				summary.accepted += 1;
				writeln!(writer, "Accepted.")?;
			} else {
				summary.rejected += 1;
				writeln!(writer, "Rejected.")?;
			}
		}
	}
	Ok(summary)
}
