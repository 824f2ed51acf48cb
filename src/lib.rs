//! This crate provides the execution core of a single-tape Turing machine simulator.
//! It includes the unbounded tape, the command table, the step/halt interpreter, and a
//! `Machine` facade that validates the alphabet and wires them together.

pub mod engine;
pub mod machine;
pub mod programs;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the step-wise interpreter and the snapshot handed to trace hooks.
pub use engine::{Execution, Snapshot, Step};
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the command and its table.
pub use table::{Command, CommandTable};
/// Re-exports the tape and its cell handle.
pub use tape::{CellId, Tape};
/// Re-exports the value types and the error type.
pub use types::{Direction, MachineError, State, Symbol, BLANK_DISPLAY, PRIME_MARKER};
