//! This module defines `Command`, a single transition rule, and `CommandTable`, the
//! transition function of a machine keyed by state and input symbol.

use crate::types::{Direction, MachineError, State, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// A transition rule: `start_state input -> output direction end_state`.
///
/// For example `q1 A -> B R q2` reads `A` in `q1`, writes `B`, moves right and
/// continues in `q2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    start_state: State,
    input: Symbol,
    output: Symbol,
    direction: Direction,
    end_state: State,
}

impl Command {
    pub fn new(
        start_state: State,
        input: impl Into<Symbol>,
        output: impl Into<Symbol>,
        direction: Direction,
        end_state: State,
    ) -> Self {
        Self {
            start_state,
            input: input.into(),
            output: output.into(),
            direction,
            end_state,
        }
    }

    pub fn start_state(&self) -> State {
        self.start_state
    }

    pub fn input(&self) -> &Symbol {
        &self.input
    }

    pub fn output(&self) -> &Symbol {
        &self.output
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn end_state(&self) -> State {
        self.end_state
    }

    /// Left-hand side of the rule, e.g. `q1 A`.
    pub fn input_string(&self) -> String {
        format!("{} {}", self.start_state, self.input)
    }

    /// Right-hand side of the rule, e.g. `B R q2`.
    pub fn output_string(&self) -> String {
        format!("{} {} {}", self.output, self.direction, self.end_state)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input_string(), self.output_string())
    }
}

/// The transition function of a machine.
///
/// At most one command is active for a given state and input symbol. The declared
/// alphabet only fixes the column order used when the table is rendered; it does not
/// restrict which symbols may carry commands.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    alphabet: Vec<Symbol>,
    rules: HashMap<State, HashMap<Symbol, Command>>,
}

impl CommandTable {
    pub fn new(alphabet: Vec<Symbol>) -> Self {
        Self {
            alphabet,
            rules: HashMap::new(),
        }
    }

    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// Registers `command` under its start state and input symbol.
    ///
    /// An existing command for the same pair is replaced and returned, and a warning is
    /// logged.
    pub fn add(&mut self, command: Command) -> Option<Command> {
        let replaced = self
            .rules
            .entry(command.start_state)
            .or_default()
            .insert(command.input.clone(), command);

        if let Some(old) = &replaced {
            warn!(command = %old, "overwrote an existing command");
        }
        replaced
    }

    /// Removes the command registered under the start state and input symbol of
    /// `command`. Does nothing if there is none.
    pub fn remove(&mut self, command: &Command) -> Option<Command> {
        let commands = self.rules.get_mut(&command.start_state)?;
        let removed = commands.remove(&command.input);
        if commands.is_empty() {
            self.rules.remove(&command.start_state);
        }
        removed
    }

    /// Returns the command for `state` and `symbol`.
    pub fn lookup(&self, state: State, symbol: &Symbol) -> Result<&Command, MachineError> {
        self.get(state, symbol)
            .ok_or_else(|| MachineError::MissingTransition {
                state,
                symbol: symbol.clone(),
            })
    }

    pub fn get(&self, state: State, symbol: &Symbol) -> Option<&Command> {
        self.rules.get(&state)?.get(symbol)
    }

    /// Returns the states that have at least one command, in creation order.
    pub fn states(&self) -> Vec<State> {
        let mut states: Vec<State> = self.rules.keys().copied().collect();
        states.sort();
        states
    }

    /// Iterates over the commands registered for `state`, keyed by input symbol.
    pub fn commands(&self, state: State) -> impl Iterator<Item = (&Symbol, &Command)> + '_ {
        self.rules.get(&state).into_iter().flatten()
    }

    /// Number of states that have at least one command.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Total number of registered commands.
    pub fn command_count(&self) -> usize {
        self.rules.values().map(HashMap::len).sum()
    }
}
