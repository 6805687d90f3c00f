//! tmuxdeck: terminal slideshows whose links drive tmux windows.
//!
//! This is not meant to be used as a crate!

pub(crate) mod config;
pub(crate) mod dispatch;
pub(crate) mod font;
pub(crate) mod input;
pub(crate) mod markdown;
pub(crate) mod presentation;
pub(crate) mod presenter;
pub(crate) mod preview;
pub(crate) mod render;
pub(crate) mod resource;
pub(crate) mod style;
pub(crate) mod terminal;
pub(crate) mod tools;

pub use crate::{
    config::{Config, ConfigLoadError},
    dispatch::{CommandDispatcher, DispatchError, TmuxDispatcher},
    font::FontRegistry,
    input::source::CommandSource,
    markdown::parse::{ParserOptions, SlideParser},
    presenter::{PresentationError, Presenter, PresenterOptions, load_slides},
    preview::{SlidePreviewer, SlideReport},
    render::{TerminalDrawerOptions, properties::WindowSize, slide::RenderOptions},
    resource::Resources,
};
