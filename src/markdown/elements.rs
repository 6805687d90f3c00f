use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

/// A single slide in a presentation.
///
/// Slides are built once by the parser and never modified afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slide {
    /// The slide's title, taken from the first top level heading in it.
    ///
    /// This is empty if the slide has no top level heading. It may contain literal `\n`
    /// sequences which are used to split the title into multiple lines when rendering it.
    pub title: String,

    /// The elements in this slide, in the order they show up in the source.
    pub elements: Vec<SlideElement>,

    /// The slide's frontmatter, if any.
    pub frontmatter: Option<SlideFrontmatter>,
}

impl Slide {
    /// Whether this slide has nothing to show.
    pub(crate) fn is_empty(&self) -> bool {
        self.title.is_empty() && self.elements.is_empty()
    }

    /// Iterate over every link in this slide, including the ones inside bullet lists.
    pub(crate) fn iter_links(&self) -> impl Iterator<Item = &Link> {
        self.elements.iter().flat_map(|element| -> Box<dyn Iterator<Item = &Link> + '_> {
            match element {
                SlideElement::Link(link) => Box::new(std::iter::once(link)),
                SlideElement::Bullets(items) => Box::new(items.iter().flat_map(|item| item.links())),
                _ => Box::new(std::iter::empty()),
            }
        })
    }
}

/// The configuration for a slide.
///
/// This is specified as a `---` delimited block of `key: value` pairs at the beginning of a
/// slide.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlideFrontmatter {
    /// The name of the font used to render this slide's title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// The horizontal alignment of the title.
    #[serde(default)]
    pub align: Alignment,

    /// The position where all images in this slide are drawn, behind every other element.
    #[serde(default, rename = "image-position", alias = "image_position", skip_serializing_if = "Option::is_none")]
    pub image_position: Option<ImagePosition>,
}

/// A horizontal alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// An absolute position on the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImagePosition {
    pub column: u16,
    pub row: u16,
}

impl FromStr for ImagePosition {
    type Err = ParseImagePositionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (column, row) = input.split_once(',').ok_or(ParseImagePositionError::MissingSeparator)?;
        let column = column.trim().parse()?;
        let row = row.trim().parse()?;
        Ok(Self { column, row })
    }
}

impl TryFrom<String> for ImagePosition {
    type Error = ParseImagePositionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ImagePosition> for String {
    fn from(position: ImagePosition) -> Self {
        position.to_string()
    }
}

impl fmt::Display for ImagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.column, self.row)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseImagePositionError {
    #[error("expected 'x, y'")]
    MissingSeparator,

    #[error("invalid coordinate: {0}")]
    InvalidNumber(#[from] ParseIntError),
}

/// An element in a slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlideElement {
    /// A heading.
    ///
    /// Level 1 headings only show up here when the slide already had a title.
    Heading { level: u8, content: String },

    /// A piece of text.
    Text { content: String, bold: bool },

    /// A list of bullet points.
    Bullets(Vec<BulletItem>),

    /// An ASCII art image, loaded from the assets directory.
    Image { alt: String, filename: String },

    /// A link.
    Link(Link),
}

#[cfg(test)]
impl SlideElement {
    pub(crate) fn plain_text<S: Into<String>>(content: S) -> Self {
        Self::Text { content: content.into(), bold: false }
    }

    pub(crate) fn bold_text<S: Into<String>>(content: S) -> Self {
        Self::Text { content: content.into(), bold: true }
    }
}

impl From<InlineSpan> for SlideElement {
    fn from(span: InlineSpan) -> Self {
        match span {
            InlineSpan::Text { content, bold } => Self::Text { content, bold },
            InlineSpan::Link(link) => Self::Link(link),
        }
    }
}

/// A single bullet point, made up of text and links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulletItem(pub Vec<InlineSpan>);

impl BulletItem {
    pub(crate) fn links(&self) -> impl Iterator<Item = &Link> {
        self.0.iter().filter_map(|span| match span {
            InlineSpan::Link(link) => Some(link),
            InlineSpan::Text { .. } => None,
        })
    }
}

/// A piece of a line of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineSpan {
    Text { content: String, bold: bool },
    Link(Link),
}

impl InlineSpan {
    pub(crate) fn plain<S: Into<String>>(content: S) -> Self {
        Self::Text { content: content.into(), bold: false }
    }

    pub(crate) fn bold<S: Into<String>>(content: S) -> Self {
        Self::Text { content: content.into(), bold: true }
    }

    pub(crate) fn link<S1: Into<String>, S2: Into<String>>(text: S1, url: S2) -> Self {
        Self::Link(Link::new(text, url))
    }
}

/// A link.
///
/// The URL can either be a normal URL or a `tmux://<pane>/<command>` one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub url: String,
}

impl Link {
    pub(crate) fn new<S1: Into<String>, S2: Into<String>>(text: S1, url: S2) -> Self {
        Self { text: text.into(), url: url.into() }
    }
}
