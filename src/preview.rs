//! Tools to inspect a presentation without presenting it.

use crate::{
    config::ColorsConfig,
    font::FontRegistry,
    markdown::elements::Slide,
    render::{
        draw::SlideDrawer,
        properties::WindowSize,
        slide::{RenderOptions, SlideRenderer},
    },
    resource::Resources,
    terminal::{printer::TerminalError, virt::VirtualTerminal},
};
use std::fmt;

/// Renders slides on an in-memory terminal.
pub struct SlidePreviewer {
    renderer: SlideRenderer,
    fonts: FontRegistry,
    resources: Resources,
    dimensions: WindowSize,
}

impl SlidePreviewer {
    pub fn new(options: RenderOptions, fonts: FontRegistry, resources: Resources, dimensions: WindowSize) -> Self {
        Self { renderer: SlideRenderer::new(options), fonts, resources, dimensions }
    }

    /// Render a slide and return the resulting screen, one string per row.
    ///
    /// Trailing whitespace is removed from every row.
    pub fn preview(&mut self, slide: &Slide) -> Result<Vec<String>, TerminalError> {
        let view = self.renderer.render(slide, &mut self.fonts, &mut self.resources, self.dimensions);
        let mut terminal = VirtualTerminal::new(self.dimensions);
        let colors = ColorsConfig::default();
        SlideDrawer::new(&mut terminal, &colors).draw(&view)?;
        let lines = terminal.into_contents().lines().into_iter().map(|line| line.trim_end().to_string()).collect();
        Ok(lines)
    }

    /// Check how much vertical space every slide takes.
    pub fn analyze(&mut self, slides: &[Slide]) -> Vec<SlideReport> {
        slides
            .iter()
            .enumerate()
            .map(|(index, slide)| {
                let view = self.renderer.render(slide, &mut self.fonts, &mut self.resources, self.dimensions);
                let height = view.height();
                SlideReport {
                    number: index + 1,
                    title: slide.title.clone(),
                    height,
                    links: slide.iter_links().count(),
                    overflows: height > self.dimensions.rows,
                }
            })
            .collect()
    }
}

/// The space used by a slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideReport {
    pub number: usize,
    pub title: String,
    pub height: u16,
    pub links: usize,
    pub overflows: bool,
}

impl fmt::Display for SlideReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.title.is_empty() { "<untitled>" } else { &self.title };
        write!(f, "slide {}: '{title}' uses {} rows, {} links", self.number, self.height, self.links)?;
        if self.overflows {
            write!(f, " (overflows)")?;
        }
        Ok(())
    }
}
