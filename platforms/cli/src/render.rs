//! Text rendering of command tables and machine configurations.

use tape_machine::{CommandTable, Snapshot, Symbol};

const TABLE_COLUMN_WIDTH: usize = 14;

/// Renders the table as a grid: one row per state, one column per alphabet symbol.
/// Missing commands are shown as `-`.
pub fn table(table: &CommandTable) -> String {
    let width = TABLE_COLUMN_WIDTH;
    let mut header = format!("{:width$}|", "", width = width - 1);
    for symbol in table.alphabet() {
        header.push_str(&format!("{:^width$}|", symbol.to_string(), width = width));
    }
    let separator = "-".repeat(header.chars().count());

    let mut lines = vec![header, separator.clone()];
    for state in table.states() {
        let mut row = format!("{:^width$}|", state.to_string(), width = width - 1);
        for symbol in table.alphabet() {
            let cell = table
                .get(state, symbol)
                .map(|command| command.output_string())
                .unwrap_or_else(|| "-".to_string());
            row.push_str(&format!("{:^width$}|", cell, width = width));
        }
        lines.push(row);
    }
    lines.push(separator);
    lines.join("\n")
}

/// Column width wide enough for every symbol of `alphabet`, plus padding.
pub fn cell_width(alphabet: &[Symbol]) -> usize {
    alphabet
        .iter()
        .map(|symbol| symbol.to_string().chars().count() + 2)
        .max()
        .unwrap_or(3)
}

/// Renders the tape with the current state printed under the head cell.
pub fn snapshot(snapshot: &Snapshot<'_>, width: usize) -> String {
    let offset = snapshot.head_offset().unwrap_or(0);
    let indent = offset * (width + 1);
    format!(
        "{}\n{:indent$}{:^width$}",
        snapshot.tape.render(width),
        "",
        snapshot.state.to_string(),
        indent = indent,
        width = width
    )
}
