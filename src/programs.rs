//! Predefined machines, built programmatically, used by the command-line front end and
//! as end-to-end fixtures.

use crate::machine::Machine;
use crate::table::Command;
use crate::types::{Direction::*, MachineError, Symbol};

/// A predefined machine together with a sample input word.
#[derive(Debug, Clone, Copy)]
pub struct ProgramInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub input: &'static str,
    pub build: fn() -> Result<Machine, MachineError>,
}

pub const PROGRAMS: &[ProgramInfo] = &[
    ProgramInfo {
        name: "marker-scan",
        description: "Scan right past 2, append markers, scan back, prepend a marker, erase one symbol",
        input: "0120",
        build: marker_scan,
    },
    ProgramInfo {
        name: "binary-increment",
        description: "Add one to a binary number written most significant bit first",
        input: "1011",
        build: binary_increment,
    },
    ProgramInfo {
        name: "unary-doubling",
        description: "Double a unary number, using primed symbols as temporary markers",
        input: "111",
        build: unary_doubling,
    },
];

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Option<&'static ProgramInfo> {
        PROGRAMS.iter().find(|program| program.name == name)
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name).collect()
    }
}

/// Three-symbol demo machine over `{0, 1, 2}`.
///
/// On `0120` it halts with the tape `_ _ 0 1 1 0 2 2`.
pub fn marker_scan() -> Result<Machine, MachineError> {
    let mut m = Machine::new(["0", "1", "2"])?;
    let (q1, q0) = m.start_end_states();
    let (q2, q3, q4, q5) = (m.new_state(), m.new_state(), m.new_state(), m.new_state());
    let blank = Symbol::Blank;

    m.add_command(Command::new(q1, "0", "0", Right, q1))?;
    m.add_command(Command::new(q1, "1", "1", Right, q1))?;
    m.add_command(Command::new(q1, "2", "1", Right, q2))?;
    m.add_command(Command::new(q2, "0", "0", Right, q2))?;
    m.add_command(Command::new(q2, blank.clone(), "2", Right, q3))?;
    m.add_command(Command::new(q3, blank.clone(), "2", Left, q4))?;
    m.add_command(Command::new(q4, "2", "2", Left, q4))?;
    m.add_command(Command::new(q4, "1", "1", Left, q4))?;
    m.add_command(Command::new(q4, "0", "0", Left, q4))?;
    m.add_command(Command::new(q4, blank.clone(), "0", Stay, q5))?;
    m.add_command(Command::new(q5, "0", blank, Left, q0))?;

    Ok(m)
}

/// Binary increment. Leaves one trailing blank cell behind the number.
pub fn binary_increment() -> Result<Machine, MachineError> {
    let mut m = Machine::new(["0", "1"])?;
    let (scan, halt) = m.start_end_states();
    let carry = m.new_state();
    let blank = Symbol::Blank;

    m.add_command(Command::new(scan, "0", "0", Right, scan))?;
    m.add_command(Command::new(scan, "1", "1", Right, scan))?;
    m.add_command(Command::new(scan, blank.clone(), blank.clone(), Left, carry))?;
    m.add_command(Command::new(carry, "1", "0", Left, carry))?;
    m.add_command(Command::new(carry, "0", "1", Stay, halt))?;
    m.add_command(Command::new(carry, blank, "1", Stay, halt))?;

    Ok(m)
}

/// Unary doubling: `1^n` becomes `1^2n`, padded by blanks on both sides.
///
/// Every input `1` is first marked as `1'`. Each marker is then turned back into `1`
/// and paid for by appending a `1` at the right end.
pub fn unary_doubling() -> Result<Machine, MachineError> {
    let mut m = Machine::new(["1"])?;
    let (mark, halt) = m.start_end_states();
    let (rewind, next, append, back) = (m.new_state(), m.new_state(), m.new_state(), m.new_state());
    let one = Symbol::from("1");
    let marker = one.primed();
    let blank = Symbol::Blank;

    m.add_command(Command::new(mark, one.clone(), marker.clone(), Right, mark))?;
    m.add_command(Command::new(mark, blank.clone(), blank.clone(), Left, rewind))?;
    m.add_command(Command::new(rewind, marker.clone(), marker.clone(), Left, rewind))?;
    m.add_command(Command::new(rewind, blank.clone(), blank.clone(), Right, next))?;
    m.add_command(Command::new(next, one.clone(), one.clone(), Right, next))?;
    m.add_command(Command::new(next, marker.clone(), one.clone(), Right, append))?;
    m.add_command(Command::new(next, blank.clone(), blank.clone(), Stay, halt))?;
    m.add_command(Command::new(append, marker.clone(), marker.clone(), Right, append))?;
    m.add_command(Command::new(append, one.clone(), one.clone(), Right, append))?;
    m.add_command(Command::new(append, blank.clone(), one.clone(), Left, back))?;
    m.add_command(Command::new(back, one.clone(), one, Left, back))?;
    m.add_command(Command::new(back, marker.clone(), marker, Left, back))?;
    m.add_command(Command::new(back, blank.clone(), blank, Right, next))?;

    Ok(m)
}
