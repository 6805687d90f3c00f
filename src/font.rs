//! ASCII art fonts.
//!
//! A font is made of a glyph sheet, a plain text file containing every character drawn in ASCII
//! art, and a table that describes where each character lives within the sheet. The table is a
//! list of rows: each row covers lines `top..=bottom` of the sheet and contains the characters in
//! `chars`, where the character at index `i` spans columns `[offsets[i], offsets[i + 1])`.

use serde::Deserialize;
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};
use tracing::{debug, warn};

/// The number of empty columns placed between two characters.
const CHARACTER_SPACING: usize = 1;

/// The table that describes a font's glyph sheet.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontTable {
    pub rows: Vec<FontRow>,

    /// The width used for characters that aren't part of the font.
    #[serde(default = "default_blank_width")]
    pub blank_width: usize,
}

fn default_blank_width() -> usize {
    3
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontRow {
    pub chars: String,
    pub top: usize,
    pub bottom: usize,
    pub offsets: Vec<usize>,
}

#[derive(Clone, Debug)]
struct Glyph {
    lines: Vec<String>,
    width: usize,
}

/// A loaded ASCII art font.
#[derive(Clone, Debug)]
pub struct Font {
    glyphs: HashMap<char, Glyph>,
    height: usize,
    blank_width: usize,
}

impl Font {
    /// Construct a font out of a glyph sheet and the table that describes it.
    pub fn new(sheet: &str, table: &FontTable) -> Result<Self, InvalidFont> {
        let sheet_lines: Vec<&str> = sheet.lines().collect();
        let height = table.rows.iter().map(|row| row.bottom.saturating_sub(row.top) + 1).max().unwrap_or(0);
        if height == 0 {
            return Err(InvalidFont::NoRows);
        }
        let mut glyphs = HashMap::new();
        for (row_index, row) in table.rows.iter().enumerate() {
            Self::validate_row(row_index, row, sheet_lines.len())?;
            let row_lines = &sheet_lines[row.top..=row.bottom];
            for (index, character) in row.chars.chars().enumerate() {
                let start = row.offsets[index];
                let width = row.offsets[index + 1] - start;
                let mut lines: Vec<String> = row_lines.iter().map(|line| slice_columns(line, start, width)).collect();
                // Rows shorter than the font are padded at the bottom.
                lines.resize(height, " ".repeat(width));
                glyphs.insert(character, Glyph { lines, width });
            }
        }
        Ok(Self { glyphs, height, blank_width: table.blank_width })
    }

    fn validate_row(index: usize, row: &FontRow, sheet_height: usize) -> Result<(), InvalidFont> {
        if row.top > row.bottom || row.bottom >= sheet_height {
            return Err(InvalidFont::LinesOutOfBounds { row: index });
        }
        if row.offsets.len() != row.chars.chars().count() + 1 {
            return Err(InvalidFont::OffsetCount { row: index });
        }
        if row.offsets.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(InvalidFont::UnsortedOffsets { row: index });
        }
        Ok(())
    }

    /// The number of lines every rendered piece of text takes.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Render a piece of text using this font.
    ///
    /// The output contains [Font::height] lines, all of them with the same width.
    pub fn render(&self, text: &str) -> Vec<String> {
        let mut output = vec![String::new(); self.height];
        for (index, character) in text.chars().enumerate() {
            if index > 0 {
                for line in &mut output {
                    line.push_str(&" ".repeat(CHARACTER_SPACING));
                }
            }
            match self.glyphs.get(&character) {
                Some(glyph) => {
                    for (line, glyph_line) in output.iter_mut().zip(&glyph.lines) {
                        line.push_str(glyph_line);
                    }
                }
                None => {
                    for line in &mut output {
                        line.push_str(&" ".repeat(self.blank_width));
                    }
                }
            }
        }
        output
    }

    /// The width of the given text once rendered.
    pub fn text_width(&self, text: &str) -> usize {
        let glyphs: usize = text
            .chars()
            .map(|character| self.glyphs.get(&character).map(|glyph| glyph.width).unwrap_or(self.blank_width))
            .sum();
        let spacing = text.chars().count().saturating_sub(1) * CHARACTER_SPACING;
        glyphs + spacing
    }
}

/// Takes `width` characters starting at column `start`, padding with spaces if the line is short.
fn slice_columns(line: &str, start: usize, width: usize) -> String {
    let mut output: String = line.chars().skip(start).take(width).collect();
    let missing = width - output.chars().count();
    output.push_str(&" ".repeat(missing));
    output
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidFont {
    #[error("font has no rows")]
    NoRows,

    #[error("row {row} points to lines outside of the glyph sheet")]
    LinesOutOfBounds { row: usize },

    #[error("row {row} must have one more offset than characters")]
    OffsetCount { row: usize },

    #[error("row {row} has offsets that aren't sorted")]
    UnsortedOffsets { row: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadFontError {
    #[error("io error reading {0}: {1}")]
    Io(PathBuf, io::Error),

    #[error("invalid font table: {0}")]
    Table(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] InvalidFont),
}

/// Resolves font names into fonts.
///
/// Fonts are looked up in a directory, where the font named `foo` is made up of the glyph sheet
/// `foo.txt` and the table `foo.json`. Fonts are loaded once and cached, including failures, so a
/// missing font is only reported the first time it's requested.
pub struct FontRegistry {
    fonts_path: PathBuf,
    fonts: HashMap<String, Option<Rc<Font>>>,
}

impl FontRegistry {
    pub fn new<P: Into<PathBuf>>(fonts_path: P) -> Self {
        Self { fonts_path: fonts_path.into(), fonts: Default::default() }
    }

    /// Register a font under the given name, overriding any font in the fonts directory.
    #[cfg(test)]
    pub(crate) fn register<S: Into<String>>(&mut self, name: S, font: Font) {
        self.fonts.insert(name.into(), Some(Rc::new(font)));
    }

    /// Get a font by name.
    ///
    /// Failing to load a font is not fatal: it's logged and `None` is returned.
    pub fn get(&mut self, name: &str) -> Option<Rc<Font>> {
        if let Some(font) = self.fonts.get(name) {
            return font.clone();
        }
        let font = match Self::load(&self.fonts_path, name) {
            Ok(font) => {
                debug!("loaded font '{name}' with height {}", font.height());
                Some(Rc::new(font))
            }
            Err(e) => {
                warn!("failed to load font '{name}': {e}");
                None
            }
        };
        self.fonts.insert(name.to_string(), font.clone());
        font
    }

    /// Drop all cached fonts.
    pub fn clear(&mut self) {
        self.fonts.clear();
    }

    fn load(fonts_path: &Path, name: &str) -> Result<Font, LoadFontError> {
        let sheet_path = fonts_path.join(format!("{name}.txt"));
        let table_path = fonts_path.join(format!("{name}.json"));
        let sheet = fs::read_to_string(&sheet_path).map_err(|e| LoadFontError::Io(sheet_path, e))?;
        let table = fs::read_to_string(&table_path).map_err(|e| LoadFontError::Io(table_path, e))?;
        let table: FontTable = serde_json::from_str(&table)?;
        let font = Font::new(&sheet, &table)?;
        Ok(font)
    }
}
