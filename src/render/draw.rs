use super::slide::{Region, RegionStyle, SlideView};
use crate::{
    config::ColorsConfig,
    style::{Color, TextStyle},
    terminal::printer::{TerminalError, TerminalIo},
};

/// Draws a laid out slide on a terminal.
pub(crate) struct SlideDrawer<'a, T> {
    terminal: &'a mut T,
    colors: &'a ColorsConfig,
}

impl<'a, T> SlideDrawer<'a, T>
where
    T: TerminalIo,
{
    pub(crate) fn new(terminal: &'a mut T, colors: &'a ColorsConfig) -> Self {
        Self { terminal, colors }
    }

    /// Draw every region in the view.
    ///
    /// This doesn't clear the screen so that moving the link selection only repaints the text
    /// that's already there.
    pub(crate) fn draw(self, view: &SlideView) -> Result<(), TerminalError> {
        let selected = view.links.selected_index();
        self.terminal.begin_update()?;
        for region in &view.regions {
            let style = self.region_style(region, selected);
            for (offset, line) in region.lines.iter().enumerate() {
                self.terminal.move_to(region.column, region.row.saturating_add(offset as u16))?;
                self.terminal.print_text(line, style)?;
            }
        }
        self.terminal.end_update()?;
        self.terminal.flush()
    }

    fn region_style(&self, region: &Region, selected: Option<usize>) -> TextStyle {
        let style = TextStyle::default();
        let style = match region.style {
            RegionStyle::Plain | RegionStyle::Image => style,
            RegionStyle::Bold => style.bold(),
            RegionStyle::Title => with_color(style, self.colors.title),
            RegionStyle::Heading(1 | 2) => with_color(style.bold(), self.colors.heading),
            RegionStyle::Heading(_) => with_color(style, self.colors.heading),
            RegionStyle::Link => with_color(style.underlined(), self.colors.link),
        };
        match region.link {
            Some(index) if Some(index) == selected => style.bg_color(self.colors.selection),
            _ => style,
        }
    }
}

fn with_color(style: TextStyle, color: Option<Color>) -> TextStyle {
    match color {
        Some(color) => style.fg_color(color),
        None => style,
    }
}
