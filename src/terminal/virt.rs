use super::printer::{TerminalCommand, TerminalError, TerminalIo};
use crate::{render::properties::WindowSize, style::TextStyle};

/// The contents of a [VirtualTerminal].
pub(crate) struct TerminalGrid {
    pub(crate) rows: Vec<Vec<StyledChar>>,
}

impl TerminalGrid {
    /// Get every row as a string.
    pub(crate) fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().map(|c| c.character).collect()).collect()
    }
}

/// An in-memory terminal.
///
/// Anything printed outside of its dimensions is discarded.
pub(crate) struct VirtualTerminal {
    row: u16,
    column: u16,
    rows: Vec<Vec<StyledChar>>,
}

impl VirtualTerminal {
    pub(crate) fn new(dimensions: WindowSize) -> Self {
        let rows = vec![vec![StyledChar::default(); dimensions.columns as usize]; dimensions.rows as usize];
        Self { row: 0, column: 0, rows }
    }

    pub(crate) fn into_contents(self) -> TerminalGrid {
        TerminalGrid { rows: self.rows }
    }

    fn current_cell_mut(&mut self) -> Option<&mut StyledChar> {
        self.rows.get_mut(self.row as usize).and_then(|row| row.get_mut(self.column as usize))
    }

    fn write_text(&mut self, content: &str, style: &TextStyle) {
        for c in content.chars() {
            if let Some(cell) = self.current_cell_mut() {
                cell.character = c;
                cell.style = *style;
            }
            self.column = self.column.saturating_add(1);
        }
    }

    fn clear_cells(&mut self) {
        for row in &mut self.rows {
            for cell in row {
                *cell = StyledChar::default();
            }
        }
    }
}

impl TerminalIo for VirtualTerminal {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError> {
        use TerminalCommand::*;
        match command {
            BeginUpdate | EndUpdate | Flush => (),
            MoveTo { column, row } => {
                self.column = *column;
                self.row = *row;
            }
            PrintText { content, style } => self.write_text(content, style),
            ClearScreen => self.clear_cells(),
        };
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StyledChar {
    pub(crate) character: char,
    pub(crate) style: TextStyle,
}

impl Default for StyledChar {
    fn default() -> Self {
        Self { character: ' ', style: Default::default() }
    }
}
