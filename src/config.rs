use crate::style::Color;
use serde::Deserialize;
use std::{fs, io, path::Path};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The default configuration for every presentation.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub colors: ColorsConfig,

    #[serde(default)]
    pub tmux: TmuxConfig,
}

impl Config {
    /// Load the config from a path.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ConfigLoadError::NotFound),
            Err(e) => return Err(e.into()),
        };
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("config file not found")]
    NotFound,

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// The font used for titles in slides that don't specify one.
    #[serde(default = "default_font")]
    pub font: String,

    /// The directory where fonts and images are looked up, relative to the presentation.
    #[serde(default = "default_assets_path")]
    pub assets_path: String,

    /// The number of columns left empty on the left and right of the screen.
    #[serde(default = "default_margin")]
    pub margin: u16,

    /// The number of milliseconds to wait after clearing the screen before drawing.
    #[serde(default = "default_clear_delay")]
    pub clear_delay_ms: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            font: default_font(),
            assets_path: default_assets_path(),
            margin: default_margin(),
            clear_delay_ms: default_clear_delay(),
        }
    }
}

fn default_font() -> String {
    "standard".into()
}

fn default_assets_path() -> String {
    "assets".into()
}

fn default_margin() -> u16 {
    2
}

fn default_clear_delay() -> u64 {
    20
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    /// Whether slides are automatically terminated when a second slide title is found.
    #[serde(default)]
    pub implicit_slide_ends: bool,
}

/// The colors used when drawing slides.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorsConfig {
    /// The color of slide titles.
    #[serde(default)]
    pub title: Option<Color>,

    /// The color of headings.
    #[serde(default = "default_heading_color")]
    pub heading: Option<Color>,

    /// The color of links.
    #[serde(default = "default_link_color")]
    pub link: Option<Color>,

    /// The background color of the selected link.
    #[serde(default = "default_selection_color")]
    pub selection: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            title: None,
            heading: default_heading_color(),
            link: default_link_color(),
            selection: default_selection_color(),
        }
    }
}

fn default_heading_color() -> Option<Color> {
    Some(Color::Yellow)
}

fn default_link_color() -> Option<Color> {
    Some(Color::Cyan)
}

fn default_selection_color() -> Color {
    Color::DarkBlue
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TmuxConfig {
    /// The tmux session where commands are sent to. The current one is used if unset.
    pub session: Option<String>,
}
