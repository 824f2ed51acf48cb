//! This module defines the `Tape`, an unbounded doubly-linked chain of cells stored in an
//! arena. Two sentinel cells bound the chain; moving onto a sentinel materializes a fresh
//! blank cell in its place, so the tape grows on demand at either end.

use crate::types::Symbol;
use std::fmt;

const START: usize = 0;
const END: usize = 1;

/// Handle to a cell on a [`Tape`].
///
/// Cells are identified by creation order, not by content: two cells holding the same
/// symbol are still distinct. Handles stay valid until the tape is cleared; each clear
/// starts a new generation and every older handle is rejected from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Cell {
    symbol: Symbol,
    left: usize,
    right: usize,
}

/// The memory of the machine.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<Cell>,
    generation: u32,
}

impl Tape {
    /// Creates an empty tape: the two sentinels linked to each other.
    pub fn new() -> Self {
        let mut tape = Self {
            cells: Vec::new(),
            generation: 0,
        };
        tape.clear();
        tape
    }

    /// Discards every cell and relinks a fresh sentinel pair.
    ///
    /// Handles obtained before the call become stale.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.cells.clear();
        self.cells.push(Cell {
            symbol: Symbol::Blank,
            left: START,
            right: END,
        });
        self.cells.push(Cell {
            symbol: Symbol::Blank,
            left: START,
            right: END,
        });
    }

    /// Appends every symbol of `word` to the end of the tape, in order.
    pub fn write<I, S>(&mut self, word: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        for symbol in word {
            self.append_end(symbol.into());
        }
    }

    /// Inserts a new cell right after the start sentinel and returns it.
    pub fn append_start(&mut self, symbol: Symbol) -> CellId {
        let first = self.cells[START].right;
        self.insert_between(START, first, symbol)
    }

    /// Inserts a new cell right before the end sentinel and returns it.
    pub fn append_end(&mut self, symbol: Symbol) -> CellId {
        let last = self.cells[END].left;
        self.insert_between(last, END, symbol)
    }

    /// Returns the cell to the right of `cell`, creating a blank one at the end of the
    /// tape if there is none.
    ///
    /// # Panics
    ///
    /// Panics if `cell` was issued before the last [`clear`](Self::clear).
    pub fn right(&mut self, cell: CellId) -> CellId {
        self.assert_live(cell);
        self.right_of(cell.index)
    }

    /// Returns the cell to the left of `cell`, creating a blank one at the start of the
    /// tape if there is none.
    ///
    /// # Panics
    ///
    /// Panics if `cell` was issued before the last [`clear`](Self::clear).
    pub fn left(&mut self, cell: CellId) -> CellId {
        self.assert_live(cell);
        match self.cells[cell.index].left {
            START => self.append_start(Symbol::Blank),
            prev => self.id(prev),
        }
    }

    /// Returns the first real cell, materializing a blank one if the tape is empty.
    pub fn first(&mut self) -> CellId {
        self.right_of(START)
    }

    /// Returns the symbol stored in `cell`, or `None` for a stale handle.
    pub fn symbol(&self, cell: CellId) -> Option<&Symbol> {
        self.is_live(cell).then(|| &self.cells[cell.index].symbol)
    }

    /// Overwrites the symbol stored in `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` was issued before the last [`clear`](Self::clear).
    pub fn set_symbol(&mut self, cell: CellId, symbol: Symbol) {
        self.assert_live(cell);
        self.cells[cell.index].symbol = symbol;
    }

    /// Returns the offset of `cell` from the start of the tape.
    ///
    /// This walks the chain, so it costs O(n). Trace printers use it to place the head.
    pub fn position(&self, cell: CellId) -> Option<usize> {
        self.cells().position(|c| c == cell)
    }

    /// Number of real cells on the tape.
    pub fn len(&self) -> usize {
        self.cells.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the real cells from start to end.
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            tape: self,
            next: self.cells[START].right,
        }
    }

    /// Iterates over the symbols from start to end.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.cells().map(move |cell| &self.cells[cell.index].symbol)
    }

    /// Renders every symbol centered in a column of `width` characters, separated by `|`.
    pub fn render(&self, width: usize) -> String {
        self.symbols()
            .map(|symbol| format!("{:^width$}", symbol, width = width))
            .collect::<Vec<_>>()
            .join("|")
    }

    fn id(&self, index: usize) -> CellId {
        CellId {
            index,
            generation: self.generation,
        }
    }

    fn is_live(&self, cell: CellId) -> bool {
        cell.generation == self.generation && cell.index > END && cell.index < self.cells.len()
    }

    fn assert_live(&self, cell: CellId) {
        assert!(self.is_live(cell), "stale cell handle {:?}", cell);
    }

    fn right_of(&mut self, index: usize) -> CellId {
        match self.cells[index].right {
            END => self.append_end(Symbol::Blank),
            next => self.id(next),
        }
    }

    fn insert_between(&mut self, left: usize, right: usize, symbol: Symbol) -> CellId {
        let index = self.cells.len();
        self.cells.push(Cell {
            symbol,
            left,
            right,
        });
        self.cells[left].right = index;
        self.cells[right].left = index;
        self.id(index)
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<String> = self.symbols().map(|s| s.to_string()).collect();
        write!(f, "{}", symbols.join(" "))
    }
}

/// Iterator over the real cells of a [`Tape`], produced by [`Tape::cells`].
pub struct Cells<'a> {
    tape: &'a Tape,
    next: usize,
}

impl Iterator for Cells<'_> {
    type Item = CellId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == END {
            return None;
        }
        let cell = self.tape.id(self.next);
        self.next = self.tape.cells[self.next].right;
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(tape: &Tape) -> Vec<Symbol> {
        tape.symbols().cloned().collect()
    }

    #[test]
    fn test_new_tape_is_empty() {
        let tape = Tape::new();

        assert!(tape.is_empty());
        assert_eq!(tape.cells().count(), 0);
        assert_eq!(tape.to_string(), "");
    }

    #[test]
    fn test_write_preserves_order() {
        let mut tape = Tape::new();
        tape.write("abc".chars());

        assert_eq!(tape.len(), 3);
        assert_eq!(
            contents(&tape),
            vec![Symbol::from('a'), Symbol::from('b'), Symbol::from('c')]
        );
    }

    #[test]
    fn test_append_start_and_end() {
        let mut tape = Tape::new();
        tape.write(["b"]);
        let first = tape.append_start(Symbol::from("a"));
        let last = tape.append_end(Symbol::Blank);

        assert_eq!(tape.to_string(), "a b _");
        assert_eq!(tape.position(first), Some(0));
        assert_eq!(tape.position(last), Some(2));
    }

    #[test]
    fn test_right_grows_at_the_boundary() {
        let mut tape = Tape::new();
        tape.write(["x"]);
        let head = tape.first();

        let grown = tape.right(head);
        assert_eq!(tape.len(), 2);
        assert_eq!(tape.symbol(grown), Some(&Symbol::Blank));

        // Asking again from the same cell returns the cell created above.
        assert_eq!(tape.right(head), grown);
        assert_eq!(tape.len(), 2);
    }

    #[test]
    fn test_left_grows_at_the_boundary() {
        let mut tape = Tape::new();
        tape.write(["x"]);
        let head = tape.first();

        let grown = tape.left(head);
        assert_eq!(tape.left(head), grown);
        assert_eq!(tape.len(), 2);
        assert_eq!(tape.to_string(), "_ x");
        assert_eq!(tape.first(), grown);
    }

    #[test]
    fn test_first_on_empty_tape_materializes_blank() {
        let mut tape = Tape::new();
        let head = tape.first();

        assert_eq!(tape.len(), 1);
        assert_eq!(tape.symbol(head), Some(&Symbol::Blank));
        assert_eq!(tape.first(), head);
    }

    #[test]
    fn test_cells_are_distinct_by_identity() {
        let mut tape = Tape::new();
        tape.write(["a", "a"]);
        let cells: Vec<CellId> = tape.cells().collect();

        assert_ne!(cells[0], cells[1]);
        assert_eq!(tape.symbol(cells[0]), tape.symbol(cells[1]));
    }

    #[test]
    fn test_set_symbol() {
        let mut tape = Tape::new();
        tape.write(["a", "b"]);
        let head = tape.first();
        tape.set_symbol(head, Symbol::from("c"));

        assert_eq!(tape.to_string(), "c b");
    }

    #[test]
    fn test_clear_resets_the_tape() {
        let mut tape = Tape::new();
        tape.write(["a", "b", "c"]);
        let stale = tape.first();
        tape.clear();

        assert!(tape.is_empty());
        assert_eq!(tape.symbol(stale), None);

        tape.clear();
        tape.write(["z"]);
        assert_eq!(tape.to_string(), "z");
    }

    #[test]
    fn test_stale_handle_does_not_alias_new_cells() {
        let mut tape = Tape::new();
        tape.write(["a", "b"]);
        let stale = tape.first();
        tape.clear();
        tape.write(["z"]);

        // The new cell reuses the arena slot of `stale`.
        assert_eq!(tape.symbol(stale), None);
        assert_eq!(tape.position(stale), None);
        assert_ne!(tape.first(), stale);
        assert_eq!(tape.to_string(), "z");
    }

    #[test]
    #[should_panic(expected = "stale cell handle")]
    fn test_set_symbol_rejects_stale_handle() {
        let mut tape = Tape::new();
        tape.write(["a"]);
        let stale = tape.first();
        tape.clear();
        tape.write(["z"]);

        tape.set_symbol(stale, Symbol::from("x"));
    }

    #[test]
    #[should_panic(expected = "stale cell handle")]
    fn test_right_rejects_stale_handle() {
        let mut tape = Tape::new();
        tape.write(["a"]);
        let stale = tape.first();
        tape.clear();
        tape.write(["z"]);

        tape.right(stale);
    }

    #[test]
    #[should_panic(expected = "stale cell handle")]
    fn test_left_rejects_stale_handle() {
        let mut tape = Tape::new();
        tape.write(["a"]);
        let stale = tape.first();
        tape.clear();

        tape.left(stale);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut tape = Tape::new();
        tape.write(["a", "b"]);

        let first_pass: Vec<CellId> = tape.cells().collect();
        let second_pass: Vec<CellId> = tape.cells().collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_render_centers_symbols() {
        let mut tape = Tape::new();
        tape.write(["a", "bb"]);
        tape.append_end(Symbol::Blank);

        assert_eq!(tape.render(4), " a  | bb | _  ");
    }
}
