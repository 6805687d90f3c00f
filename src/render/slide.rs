use super::{layout::Layout, links::LinkNavigator, properties::WindowSize};
use crate::{
    font::{Font, FontRegistry},
    markdown::elements::{Alignment, BulletItem, ImagePosition, InlineSpan, Link, Slide, SlideElement, SlideFrontmatter},
    resource::{AsciiImage, Resources},
};
use std::rc::Rc;
use tracing::warn;
use unicode_width::UnicodeWidthStr;

/// The marker used to break a title into multiple lines.
const TITLE_LINE_BREAK: &str = "\\n";

/// The row where the first element in a slide is placed.
const TOP_MARGIN: u16 = 1;

const BULLET_PREFIX: &str = "• ";

#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// The font used for titles in slides that don't pick one.
    pub default_font: String,

    /// The number of columns left empty on the sides of the screen.
    pub margin: u16,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { default_font: "standard".into(), margin: 2 }
    }
}

/// How a region should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RegionStyle {
    Plain,
    Bold,
    Title,
    Heading(u8),
    Link,
    Image,
}

/// A block of text at an absolute position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Region {
    pub(crate) column: u16,
    pub(crate) row: u16,
    pub(crate) lines: Vec<String>,
    pub(crate) style: RegionStyle,

    /// The index of the link this region draws, if any.
    pub(crate) link: Option<usize>,
}

impl Region {
    /// The row right below this region.
    pub(crate) fn bottom(&self) -> u16 {
        self.row.saturating_add(self.lines.len() as u16)
    }
}

/// A slide that's been laid out and is ready to be drawn.
#[derive(Clone, Debug, Default)]
pub(crate) struct SlideView {
    pub(crate) regions: Vec<Region>,
    pub(crate) links: LinkNavigator,
}

impl SlideView {
    /// The number of rows needed to draw every region in this view.
    pub(crate) fn height(&self) -> u16 {
        self.regions.iter().map(Region::bottom).max().unwrap_or(0)
    }
}

/// Lays out slides into regions.
pub(crate) struct SlideRenderer {
    options: RenderOptions,
}

impl SlideRenderer {
    pub(crate) fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub(crate) fn render(
        &self,
        slide: &Slide,
        fonts: &mut FontRegistry,
        resources: &mut Resources,
        dimensions: WindowSize,
    ) -> SlideView {
        let frontmatter = slide.frontmatter.clone().unwrap_or_default();
        let font_name = frontmatter.font.as_deref().unwrap_or(&self.options.default_font);
        let builder = ViewBuilder {
            options: &self.options,
            font: fonts.get(font_name),
            resources,
            dimensions,
            regions: Vec::new(),
            links: Vec::new(),
            row: TOP_MARGIN,
        };
        builder.build(slide, &frontmatter)
    }
}

struct ViewBuilder<'a> {
    options: &'a RenderOptions,
    font: Option<Rc<Font>>,
    resources: &'a mut Resources,
    dimensions: WindowSize,
    regions: Vec<Region>,
    links: Vec<Link>,
    row: u16,
}

impl ViewBuilder<'_> {
    fn build(mut self, slide: &Slide, frontmatter: &SlideFrontmatter) -> SlideView {
        if let Some(position) = &frontmatter.image_position {
            self.push_background_images(&slide.elements, position);
        }
        if !slide.title.is_empty() {
            self.push_title(&slide.title, frontmatter.align);
        }
        for element in &slide.elements {
            match element {
                SlideElement::Heading { level, content } => self.push_heading(*level, content),
                SlideElement::Text { content, bold } => {
                    let style = if *bold { RegionStyle::Bold } else { RegionStyle::Plain };
                    self.push_line(self.options.margin, content.clone(), style, None);
                    self.advance(2);
                }
                SlideElement::Link(link) => {
                    self.push_link(self.options.margin, link);
                    self.advance(2);
                }
                SlideElement::Bullets(items) => self.push_bullets(items),
                SlideElement::Image { filename, .. } => {
                    if frontmatter.image_position.is_none() {
                        self.push_inline_image(filename);
                    }
                }
            };
        }
        SlideView { regions: self.regions, links: LinkNavigator::new(self.links) }
    }

    fn push_background_images(&mut self, elements: &[SlideElement], position: &ImagePosition) {
        for element in elements {
            if let SlideElement::Image { filename, .. } = element {
                if let Some(image) = self.load_image(filename) {
                    self.regions.push(Region {
                        column: position.column,
                        row: position.row,
                        lines: image.lines().to_vec(),
                        style: RegionStyle::Image,
                        link: None,
                    });
                }
            }
        }
    }

    fn push_title(&mut self, title: &str, alignment: Alignment) {
        let layout = Layout::new(alignment, self.options.margin);
        for line in title.split(TITLE_LINE_BREAK) {
            let (lines, width, style) = match &self.font {
                Some(font) => (font.render(line), font.text_width(line), RegionStyle::Title),
                None => (vec![line.to_string()], line.width(), RegionStyle::Bold),
            };
            let column = layout.start_column(&self.dimensions, clamp(width));
            let height = lines.len() as u16;
            self.regions.push(Region { column, row: self.row, lines, style, link: None });
            self.advance(height);
        }
        self.advance(1);
    }

    fn push_heading(&mut self, level: u8, content: &str) {
        // Top level headings use the slide's font, the rest are just styled text.
        match (level, &self.font) {
            (1, Some(font)) => {
                let lines = font.render(content);
                let height = lines.len() as u16;
                self.regions.push(Region {
                    column: self.options.margin,
                    row: self.row,
                    lines,
                    style: RegionStyle::Title,
                    link: None,
                });
                self.advance(height + 1);
            }
            _ => {
                self.push_line(self.options.margin, content.to_string(), RegionStyle::Heading(level), None);
                self.advance(2);
            }
        }
    }

    fn push_bullets(&mut self, items: &[BulletItem]) {
        for item in items {
            let mut column = self.options.margin;
            self.push_line(column, BULLET_PREFIX.to_string(), RegionStyle::Plain, None);
            column = column.saturating_add(clamp(BULLET_PREFIX.width()));
            for span in &item.0 {
                let width = match span {
                    InlineSpan::Text { content, bold } => {
                        let style = if *bold { RegionStyle::Bold } else { RegionStyle::Plain };
                        self.push_line(column, content.clone(), style, None);
                        content.width()
                    }
                    InlineSpan::Link(link) => {
                        self.push_link(column, link);
                        link.text.width()
                    }
                };
                column = column.saturating_add(clamp(width));
            }
            self.advance(1);
        }
        self.advance(1);
    }

    fn push_inline_image(&mut self, filename: &str) {
        let Some(image) = self.load_image(filename) else {
            return;
        };
        let lines = image.lines().to_vec();
        let column = self.options.margin;
        self.regions.push(Region { column, row: self.row, lines, style: RegionStyle::Image, link: None });
        self.advance(clamp(image.height()).saturating_add(1));
    }

    fn push_link(&mut self, column: u16, link: &Link) {
        let index = self.links.len();
        self.links.push(link.clone());
        self.push_line(column, link.text.clone(), RegionStyle::Link, Some(index));
    }

    fn push_line(&mut self, column: u16, line: String, style: RegionStyle, link: Option<usize>) {
        self.regions.push(Region { column, row: self.row, lines: vec![line], style, link });
    }

    fn load_image(&mut self, filename: &str) -> Option<Rc<AsciiImage>> {
        match self.resources.image(filename) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("skipping image: {e}");
                None
            }
        }
    }

    fn advance(&mut self, rows: u16) {
        self.row = self.row.saturating_add(rows);
    }
}

fn clamp(width: usize) -> u16 {
    u16::try_from(width).unwrap_or(u16::MAX)
}
