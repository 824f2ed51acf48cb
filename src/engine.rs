//! This module implements the run loop of a machine: a deterministic single-tape
//! interpreter that repeatedly looks up and applies commands until the halting state is
//! reached.

use crate::table::CommandTable;
use crate::tape::{CellId, Tape};
use crate::types::{Direction, MachineError, State, Symbol};
use tracing::{debug, trace};

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A command was applied and the machine has not reached the halting state yet.
    Continue,
    /// The machine is in its halting state.
    Halt,
}

/// Read-only view of a running machine, handed to trace hooks.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: State,
    pub head: CellId,
    pub tape: &'a Tape,
    pub steps: usize,
}

impl Snapshot<'_> {
    /// The symbol under the head.
    pub fn symbol(&self) -> Option<&Symbol> {
        self.tape.symbol(self.head)
    }

    /// Offset of the head from the start of the tape.
    pub fn head_offset(&self) -> Option<usize> {
        self.tape.position(self.head)
    }
}

/// A single run of a machine over a prepared tape.
///
/// The execution borrows the command table and exclusively borrows the tape, so the
/// tape keeps whatever was written to it even if the run fails midway.
pub struct Execution<'a> {
    table: &'a CommandTable,
    tape: &'a mut Tape,
    state: State,
    halt: State,
    head: CellId,
    steps: usize,
}

impl<'a> Execution<'a> {
    /// Starts a run in `start` with the head on the first cell of `tape`.
    ///
    /// An empty tape gets a fresh blank cell under the head.
    pub fn new(table: &'a CommandTable, tape: &'a mut Tape, start: State, halt: State) -> Self {
        let head = tape.first();
        Self {
            table,
            tape,
            state: start,
            halt,
            head,
            steps: 0,
        }
    }

    /// Applies one command.
    ///
    /// The halting state is checked before the lookup, so commands registered for it are
    /// never consulted.
    pub fn step(&mut self) -> Result<Step, MachineError> {
        if self.is_halted() {
            return Ok(Step::Halt);
        }

        let table = self.table;
        let symbol = self
            .tape
            .symbol(self.head)
            .cloned()
            .unwrap_or(Symbol::Blank);
        let command = table.lookup(self.state, &symbol)?;
        trace!(step = self.steps, %command, "applying command");

        self.tape.set_symbol(self.head, command.output().clone());
        self.state = command.end_state();
        self.head = match command.direction() {
            Direction::Right => self.tape.right(self.head),
            Direction::Left => self.tape.left(self.head),
            Direction::Stay => self.head,
        };
        self.steps += 1;

        Ok(Step::Continue)
    }

    /// Steps until the halting state is reached.
    ///
    /// `observe` is called before every step and once more after halting. With a
    /// `limit`, the run fails once that many steps were applied without halting.
    pub fn run<F>(&mut self, limit: Option<usize>, mut observe: F) -> Result<(), MachineError>
    where
        F: FnMut(&Snapshot<'_>),
    {
        debug!(state = %self.state, limit = ?limit, "run started");
        loop {
            observe(&self.snapshot());
            if self.is_halted() {
                break;
            }
            if let Some(limit) = limit {
                if self.steps >= limit {
                    return Err(MachineError::StepLimitExceeded(limit));
                }
            }
            self.step()?;
        }
        debug!(state = %self.state, steps = self.steps, "run halted");
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            head: self.head,
            tape: self.tape,
            steps: self.steps,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.state == self.halt
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn head(&self) -> CellId {
        self.head
    }

    /// Total number of commands applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Command;

    fn states() -> (State, State, State) {
        (
            State::from_index(1),
            State::from_index(0),
            State::from_index(2),
        )
    }

    #[test]
    fn test_single_step_moves_right() {
        let (start, halt, _) = states();
        let mut table = CommandTable::default();
        table.add(Command::new(start, "a", "b", Direction::Right, halt));
        let mut tape = Tape::new();
        tape.write(["a"]);

        let mut execution = Execution::new(&table, &mut tape, start, halt);
        assert_eq!(execution.step(), Ok(Step::Continue));
        assert_eq!(execution.state(), halt);
        assert_eq!(execution.steps(), 1);
        assert_eq!(execution.snapshot().head_offset(), Some(1));
        assert_eq!(execution.step(), Ok(Step::Halt));
        assert_eq!(tape.to_string(), "b _");
    }

    #[test]
    fn test_stay_keeps_the_head() {
        let (start, halt, _) = states();
        let mut table = CommandTable::default();
        table.add(Command::new(start, "a", "b", Direction::Stay, halt));
        let mut tape = Tape::new();
        tape.write(["a"]);

        let mut execution = Execution::new(&table, &mut tape, start, halt);
        let head = execution.head();
        execution.step().unwrap();
        assert_eq!(execution.head(), head);
        assert_eq!(execution.snapshot().symbol(), Some(&Symbol::from("b")));
    }

    #[test]
    fn test_empty_tape_starts_on_blank() {
        let (start, halt, _) = states();
        let mut table = CommandTable::default();
        table.add(Command::new(start, Symbol::Blank, "x", Direction::Left, halt));
        let mut tape = Tape::new();

        let mut execution = Execution::new(&table, &mut tape, start, halt);
        execution.run(None, |_| {}).unwrap();
        assert_eq!(tape.to_string(), "_ x");
    }

    #[test]
    fn test_halting_state_commands_are_ignored() {
        let (start, halt, _) = states();
        let mut table = CommandTable::default();
        table.add(Command::new(start, "a", "b", Direction::Stay, halt));
        table.add(Command::new(halt, "b", "c", Direction::Stay, start));
        let mut tape = Tape::new();
        tape.write(["a"]);

        let mut execution = Execution::new(&table, &mut tape, start, halt);
        execution.run(None, |_| {}).unwrap();
        assert_eq!(execution.steps(), 1);
        assert_eq!(tape.to_string(), "b");
    }

    #[test]
    fn test_missing_transition_stops_the_run() {
        let (start, halt, other) = states();
        let mut table = CommandTable::default();
        table.add(Command::new(start, "a", "b", Direction::Right, other));
        let mut tape = Tape::new();
        tape.write(["a", "c"]);

        let mut execution = Execution::new(&table, &mut tape, start, halt);
        let result = execution.run(None, |_| {});
        assert_eq!(
            result,
            Err(MachineError::MissingTransition {
                state: other,
                symbol: Symbol::from("c"),
            })
        );
        assert_eq!(execution.steps(), 1);
        assert_eq!(tape.to_string(), "b c");
    }

    #[test]
    fn test_step_limit() {
        let (start, halt, _) = states();
        let mut table = CommandTable::default();
        table.add(Command::new(start, Symbol::Blank, Symbol::Blank, Direction::Right, start));
        let mut tape = Tape::new();

        let mut execution = Execution::new(&table, &mut tape, start, halt);
        assert_eq!(
            execution.run(Some(5), |_| {}),
            Err(MachineError::StepLimitExceeded(5))
        );
        assert_eq!(execution.steps(), 5);
        assert_eq!(tape.len(), 6);
    }

    #[test]
    fn test_observer_sees_every_configuration() {
        let (start, halt, other) = states();
        let mut table = CommandTable::default();
        table.add(Command::new(start, "a", "a", Direction::Right, other));
        table.add(Command::new(other, "b", "b", Direction::Left, halt));
        let mut tape = Tape::new();
        tape.write(["a", "b"]);

        let mut trace = Vec::new();
        let mut execution = Execution::new(&table, &mut tape, start, halt);
        execution
            .run(None, |snapshot| {
                trace.push((snapshot.state, snapshot.head_offset(), snapshot.steps))
            })
            .unwrap();

        assert_eq!(
            trace,
            vec![
                (start, Some(0), 0),
                (other, Some(1), 1),
                (halt, Some(0), 2),
            ]
        );
    }
}
