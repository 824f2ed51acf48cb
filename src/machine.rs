//! This module defines the `Machine` struct, which wires the alphabet, the command table
//! and the tape together and exposes the operations used to build and run a machine.

use crate::engine::{Execution, Snapshot};
use crate::table::{Command, CommandTable};
use crate::tape::{CellId, Tape};
use crate::types::{MachineError, State, Symbol, PRIME_MARKER};
use std::collections::HashSet;

/// A single-tape Turing machine.
///
/// The effective alphabet is every base symbol, its primed variant and the blank. The
/// machine owns its halting state (`q0`) and start state (`q1`); further states come
/// from [`Machine::new_state`].
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Vec<Symbol>,
    table: CommandTable,
    tape: Tape,
    start: State,
    halt: State,
    next_state: u32,
    step_limit: Option<usize>,
    state: Option<State>,
    head: Option<CellId>,
}

impl Machine {
    /// Creates a machine over the given base symbols.
    ///
    /// # Errors
    ///
    /// Returns `MachineError::InvalidAlphabet` if a base symbol is empty, contains
    /// whitespace, ends with the prime marker or is repeated.
    pub fn new<I, S>(letters: I) -> Result<Self, MachineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let letters: Vec<String> = letters.into_iter().map(Into::into).collect();
        validate_letters(&letters)?;

        let base: Vec<Symbol> = letters.into_iter().map(Symbol::Letter).collect();
        let primed: Vec<Symbol> = base.iter().map(Symbol::primed).collect();
        let alphabet: Vec<Symbol> = base
            .into_iter()
            .chain(primed)
            .chain(std::iter::once(Symbol::Blank))
            .collect();

        Ok(Self {
            table: CommandTable::new(alphabet.clone()),
            alphabet,
            tape: Tape::new(),
            halt: State::from_index(0),
            start: State::from_index(1),
            next_state: 2,
            step_limit: None,
            state: None,
            head: None,
        })
    }

    /// Sets a ceiling on the number of steps a single run may take.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn step_limit(&self) -> Option<usize> {
        self.step_limit
    }

    /// Returns the start and halting states of the machine.
    pub fn start_end_states(&self) -> (State, State) {
        (self.start, self.halt)
    }

    /// Creates a fresh state, distinct from every state created before on this machine.
    pub fn new_state(&mut self) -> State {
        let state = State::from_index(self.next_state);
        self.next_state += 1;
        state
    }

    /// Returns the effective alphabet: base symbols, their primed variants, then the blank.
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// The tape left behind by the last run, complete or not.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// State the machine ended in on the last run, halted or not.
    pub fn state(&self) -> Option<State> {
        self.state
    }

    /// Head cell at the end of the last run, halted or not.
    pub fn head(&self) -> Option<CellId> {
        self.head
    }

    /// Offset of the final head from the start of the tape.
    pub fn head_offset(&self) -> Option<usize> {
        self.head.and_then(|head| self.tape.position(head))
    }

    /// Adds a command to the table, returning the command it replaced, if any.
    ///
    /// # Errors
    ///
    /// Returns `MachineError::InvalidCommand` if the input or output symbol is not in the
    /// alphabet. The table is left unchanged in that case.
    pub fn add_command(&mut self, command: Command) -> Result<Option<Command>, MachineError> {
        for symbol in [command.input(), command.output()] {
            if !self.alphabet.contains(symbol) {
                return Err(MachineError::InvalidCommand {
                    command: command.to_string(),
                    symbol: symbol.clone(),
                });
            }
        }
        Ok(self.table.add(command))
    }

    /// Removes the command registered for the start state and input symbol of `command`.
    pub fn remove_command(&mut self, command: &Command) -> Option<Command> {
        self.table.remove(command)
    }

    /// Clears the tape, writes `word` onto it and runs until the halting state.
    ///
    /// On failure the partially processed tape is still available from
    /// [`Machine::tape`].
    pub fn run<I, S>(&mut self, word: I) -> Result<&Tape, MachineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.run_traced(word, |_| {})
    }

    /// Like [`Machine::run`], calling `observe` before every step and once after halting.
    pub fn run_traced<I, S, F>(&mut self, word: I, observe: F) -> Result<&Tape, MachineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
        F: FnMut(&Snapshot<'_>),
    {
        self.tape.clear();
        self.tape.write(word);

        let mut execution = Execution::new(&self.table, &mut self.tape, self.start, self.halt);
        let result = execution.run(self.step_limit, observe);
        self.state = Some(execution.state());
        self.head = Some(execution.head());

        result?;
        Ok(&self.tape)
    }
}

fn validate_letters(letters: &[String]) -> Result<(), MachineError> {
    let mut seen = HashSet::new();
    for letter in letters {
        if letter.is_empty() {
            return Err(MachineError::InvalidAlphabet(
                "symbols must not be empty".to_string(),
            ));
        }
        if letter.chars().any(char::is_whitespace) {
            return Err(MachineError::InvalidAlphabet(format!(
                "symbol {:?} contains whitespace",
                letter
            )));
        }
        if letter.ends_with(PRIME_MARKER) {
            return Err(MachineError::InvalidAlphabet(format!(
                "symbol {:?} ends with the prime marker {:?}",
                letter, PRIME_MARKER
            )));
        }
        if !seen.insert(letter.as_str()) {
            return Err(MachineError::InvalidAlphabet(format!(
                "symbol {:?} is repeated",
                letter
            )));
        }
    }
    Ok(())
}
