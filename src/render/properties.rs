use crossterm::terminal;
use std::io;

/// The size of the terminal window, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub columns: u16,
}

impl WindowSize {
    pub fn current() -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self { rows, columns })
    }
}
