use crate::style::TextStyle;
use crossterm::{
    QueueableCommand, cursor, style,
    terminal::{self},
};
use std::io::{self, Write};

#[derive(Debug, PartialEq)]
pub(crate) enum TerminalCommand<'a> {
    BeginUpdate,
    EndUpdate,
    MoveTo { column: u16, row: u16 },
    PrintText { content: &'a str, style: TextStyle },
    ClearScreen,
    Flush,
}

pub(crate) trait TerminalIo {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError>;

    fn begin_update(&mut self) -> Result<(), TerminalError> {
        self.execute(&TerminalCommand::BeginUpdate)
    }

    fn end_update(&mut self) -> Result<(), TerminalError> {
        self.execute(&TerminalCommand::EndUpdate)
    }

    fn move_to(&mut self, column: u16, row: u16) -> Result<(), TerminalError> {
        self.execute(&TerminalCommand::MoveTo { column, row })
    }

    fn print_text(&mut self, content: &str, style: TextStyle) -> Result<(), TerminalError> {
        self.execute(&TerminalCommand::PrintText { content, style })
    }

    fn clear_screen(&mut self) -> Result<(), TerminalError> {
        self.execute(&TerminalCommand::ClearScreen)
    }

    fn flush(&mut self) -> Result<(), TerminalError> {
        self.execute(&TerminalCommand::Flush)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// A wrapper over the terminal write handle.
pub(crate) struct Terminal<I: TerminalWrite> {
    writer: I,
}

impl<I: TerminalWrite> Terminal<I> {
    pub(crate) fn new(mut writer: I) -> io::Result<Self> {
        writer.init()?;
        Ok(Self { writer })
    }
}

impl<I: TerminalWrite> TerminalIo for Terminal<I> {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError> {
        use TerminalCommand::*;
        match command {
            BeginUpdate => {
                self.writer.queue(terminal::BeginSynchronizedUpdate)?;
            }
            EndUpdate => {
                self.writer.queue(terminal::EndSynchronizedUpdate)?;
            }
            MoveTo { column, row } => {
                self.writer.queue(cursor::MoveTo(*column, *row))?;
            }
            PrintText { content, style: text_style } => {
                self.writer.queue(style::PrintStyledContent(text_style.apply(*content)))?;
            }
            ClearScreen => {
                self.writer.queue(style::ResetColor)?;
                self.writer.queue(terminal::Clear(terminal::ClearType::All))?;
            }
            Flush => self.writer.flush()?,
        };
        Ok(())
    }
}

impl<I: TerminalWrite> Drop for Terminal<I> {
    fn drop(&mut self) {
        self.writer.deinit();
    }
}

pub(crate) trait TerminalWrite: io::Write {
    fn init(&mut self) -> io::Result<()>;
    fn deinit(&mut self);
}

impl TerminalWrite for io::Stdout {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.queue(cursor::Hide)?;
        self.queue(terminal::EnterAlternateScreen)?;
        Ok(())
    }

    fn deinit(&mut self) {
        let _ = self.queue(terminal::LeaveAlternateScreen);
        let _ = self.queue(cursor::Show);
        let _ = self.flush();
        let _ = terminal::disable_raw_mode();
    }
}
