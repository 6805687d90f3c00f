pub(crate) mod draw;
pub(crate) mod layout;
pub(crate) mod links;
pub(crate) mod properties;
pub(crate) mod slide;

use crate::{
    config::ColorsConfig,
    render::{
        draw::SlideDrawer,
        links::LinkNavigator,
        properties::WindowSize,
        slide::{Region, RegionStyle, SlideView},
    },
    terminal::printer::{Terminal, TerminalError, TerminalIo, TerminalWrite},
};
use std::{io, thread, time::Duration};

/// The result of a render operation.
pub(crate) type RenderResult = Result<(), RenderError>;

#[derive(Clone, Debug, Default)]
pub struct TerminalDrawerOptions {
    /// How long to wait after clearing the screen so the terminal is done repainting.
    pub clear_delay: Duration,

    pub colors: ColorsConfig,
}

/// Allows drawing on the terminal.
pub(crate) struct TerminalDrawer<W: TerminalWrite> {
    pub(crate) terminal: Terminal<W>,
    options: TerminalDrawerOptions,
}

impl<W> TerminalDrawer<W>
where
    W: TerminalWrite,
{
    pub(crate) fn new(handle: W, options: TerminalDrawerOptions) -> io::Result<Self> {
        let terminal = Terminal::new(handle)?;
        Ok(Self { terminal, options })
    }

    /// Draw a slide, optionally wiping whatever was on the screen first.
    pub(crate) fn render_view(&mut self, view: &SlideView, clear: bool) -> RenderResult {
        if clear {
            self.clear()?;
        }
        SlideDrawer::new(&mut self.terminal, &self.options.colors).draw(view)?;
        Ok(())
    }

    pub(crate) fn render_error(&mut self, message: &str) -> RenderResult {
        let dimensions = WindowSize::current()?;
        let view = error_view(message, dimensions);
        self.clear()?;
        SlideDrawer::new(&mut self.terminal, &self.options.colors).draw(&view)?;
        Ok(())
    }

    fn clear(&mut self) -> RenderResult {
        self.terminal.clear_screen()?;
        self.terminal.flush()?;
        if !self.options.clear_delay.is_zero() {
            thread::sleep(self.options.clear_delay);
        }
        Ok(())
    }
}

/// Build the view used to display an error, roughly centered on the screen.
pub(crate) fn error_view(message: &str, dimensions: WindowSize) -> SlideView {
    let total_lines = message.lines().count() as u16;
    let row = (dimensions.rows / 2).saturating_sub(total_lines / 2 + 2);
    let column = dimensions.columns / 4;
    let heading = Region {
        column,
        row,
        lines: vec!["Error loading presentation:".into()],
        style: RegionStyle::Bold,
        link: None,
    };
    let body = Region {
        column,
        row: row.saturating_add(2),
        lines: message.lines().map(String::from).collect(),
        style: RegionStyle::Plain,
        link: None,
    };
    SlideView { regions: vec![heading, body], links: LinkNavigator::default() }
}

/// A rendering error.
#[derive(thiserror::Error, Debug)]
pub(crate) enum RenderError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Terminal(#[from] TerminalError),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::terminal::virt::VirtualTerminal;

    #[test]
    fn error_screen() {
        let dimensions = WindowSize { rows: 8, columns: 40 };
        let view = error_view("bad thing\nhappened", dimensions);
        let mut terminal = VirtualTerminal::new(dimensions);
        let colors = ColorsConfig::default();
        SlideDrawer::new(&mut terminal, &colors).draw(&view).expect("draw failed");

        let grid = terminal.into_contents();
        let lines = grid.lines();
        assert_eq!(lines[1].trim(), "Error loading presentation:");
        assert_eq!(lines[3].trim(), "bad thing");
        assert_eq!(lines[4].trim(), "happened");
        assert!(lines[1].starts_with("          Error"));
        assert!(grid.rows[1][10].style.is_bold());
    }
}
