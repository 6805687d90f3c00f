use crate::{
    dispatch::{CommandDispatcher, LinkDispatcher},
    font::FontRegistry,
    input::source::{Command, CommandSource},
    markdown::{
        elements::Slide,
        parse::{ParserOptions, SlideParser},
    },
    presentation::Presentation,
    render::{
        RenderError, RenderResult, TerminalDrawer, TerminalDrawerOptions,
        links::Direction,
        properties::WindowSize,
        slide::{RenderOptions, SlideRenderer, SlideView},
    },
    resource::Resources,
};
use std::{
    fmt::Display,
    fs,
    io::{self, Stdout},
    mem,
    path::Path,
};
use tracing::{debug, error, info, warn};

#[derive(Clone, Debug, Default)]
pub struct PresenterOptions {
    pub parser: ParserOptions,
    pub render: RenderOptions,
    pub drawer: TerminalDrawerOptions,
}

/// A slideshow presenter.
///
/// This type puts everything else together.
pub struct Presenter<D> {
    commands: CommandSource,
    parser: SlideParser,
    renderer: SlideRenderer,
    fonts: FontRegistry,
    resources: Resources,
    links: LinkDispatcher<D>,
    state: PresenterState,
    view: Option<SlideView>,
    needs_layout: bool,
    drawer_options: TerminalDrawerOptions,
}

impl<D: CommandDispatcher> Presenter<D> {
    /// Construct a new presenter.
    pub fn new(
        commands: CommandSource,
        dispatcher: D,
        fonts: FontRegistry,
        resources: Resources,
        options: PresenterOptions,
    ) -> Self {
        Self {
            commands,
            parser: SlideParser::new(options.parser),
            renderer: SlideRenderer::new(options.render),
            fonts,
            resources,
            links: LinkDispatcher::new(dispatcher),
            state: PresenterState::Empty,
            view: None,
            needs_layout: false,
            drawer_options: options.drawer,
        }
    }

    /// Run a presentation.
    ///
    /// Failing to load the presentation up front is an error. Failures when reloading it later on
    /// are displayed on the screen instead.
    pub fn present(mut self, path: &Path) -> Result<(), PresentationError> {
        self.load(path)?;

        let mut drawer = TerminalDrawer::new(io::stdout(), self.drawer_options.clone())?;
        let mut clear = true;
        loop {
            self.render(&mut drawer, clear)?;
            loop {
                let Some(command) = self.commands.try_next_command()? else {
                    continue;
                };
                match self.apply_command(command) {
                    CommandSideEffect::Exit => return Ok(()),
                    CommandSideEffect::Reload => {
                        self.try_reload(path);
                        clear = true;
                        break;
                    }
                    CommandSideEffect::Redraw => {
                        clear = true;
                        break;
                    }
                    CommandSideEffect::Repaint => {
                        clear = false;
                        break;
                    }
                    CommandSideEffect::None => (),
                };
            }
        }
    }

    /// Load the presentation at the given path.
    fn load(&mut self, path: &Path) -> Result<(), PresentationError> {
        let slides = load_slides(path, &self.parser)?;
        info!("loaded presentation with {} slides", slides.len());
        self.state = PresenterState::Presenting(Presentation::new(slides)?);
        self.view = None;
        Ok(())
    }

    fn render(&mut self, drawer: &mut TerminalDrawer<Stdout>, clear: bool) -> RenderResult {
        let presenting = matches!(self.state, PresenterState::Presenting(_));
        if presenting && (self.view.is_none() || self.needs_layout) {
            self.layout(WindowSize::current()?);
        }
        match (&self.state, &self.view) {
            (PresenterState::Presenting(_), Some(view)) => drawer.render_view(view, clear),
            (PresenterState::Failure { error, .. }, _) => drawer.render_error(error),
            _ => Ok(()),
        }
    }

    /// Lay out the current slide, keeping the link selection if it was already laid out.
    fn layout(&mut self, dimensions: WindowSize) {
        self.needs_layout = false;
        let PresenterState::Presenting(presentation) = &self.state else {
            return;
        };
        let mut view =
            self.renderer.render(presentation.current_slide(), &mut self.fonts, &mut self.resources, dimensions);
        debug!("laid out slide {} with {} links", presentation.current_slide_index() + 1, view.links.links().len());
        if let Some(selected) = self.view.as_ref().and_then(|view| view.links.selected_index()) {
            view.links.select(selected);
        }
        self.view = Some(view);
    }

    fn apply_command(&mut self, command: Command) -> CommandSideEffect {
        // These ones always happens no matter our state.
        match command {
            Command::Reload => {
                return CommandSideEffect::Reload;
            }
            Command::HardReload => {
                self.fonts.clear();
                self.resources.clear();
                return CommandSideEffect::Reload;
            }
            Command::Exit => return CommandSideEffect::Exit,
            Command::Redraw => {
                self.needs_layout = true;
                return CommandSideEffect::Redraw;
            }
            Command::NextLink => return self.navigate_links(Direction::Down),
            Command::PreviousLink => return self.navigate_links(Direction::Up),
            Command::ActivateLink => {
                self.activate_link();
                return CommandSideEffect::None;
            }
            _ => (),
        };

        // Now apply the commands that require a presentation.
        let PresenterState::Presenting(presentation) = &mut self.state else {
            return CommandSideEffect::None;
        };
        let slide_changed = match command {
            Command::JumpNextSlide => presentation.jump_next_slide(),
            Command::JumpPreviousSlide => presentation.jump_previous_slide(),
            Command::JumpFirstSlide => presentation.jump_first_slide(),
            Command::JumpLastSlide => presentation.jump_last_slide(),
            Command::JumpSlide(number) => presentation.jump_slide(number.saturating_sub(1) as usize),
            // These are handled above as they don't require the presentation
            Command::Reload
            | Command::HardReload
            | Command::Exit
            | Command::Redraw
            | Command::NextLink
            | Command::PreviousLink
            | Command::ActivateLink => false,
        };
        if slide_changed {
            // Link selection doesn't carry over to a different slide.
            self.view = None;
            CommandSideEffect::Redraw
        } else {
            CommandSideEffect::None
        }
    }

    fn navigate_links(&mut self, direction: Direction) -> CommandSideEffect {
        match &mut self.view {
            Some(view) if !view.links.is_empty() => {
                view.links.navigate(direction);
                CommandSideEffect::Repaint
            }
            _ => CommandSideEffect::None,
        }
    }

    fn activate_link(&mut self) {
        let Some(link) = self.view.as_ref().and_then(|view| view.links.selected_link()) else {
            return;
        };
        info!("activating link '{}' to '{}'", link.text, link.url);
        if let Err(e) = self.links.dispatch(link) {
            error!("failed to activate link '{}': {e}", link.url);
        }
    }

    fn try_reload(&mut self, path: &Path) {
        self.view = None;
        let presentation = mem::take(&mut self.state).into_presentation();
        self.state = match (load_slides(path, &self.parser), presentation) {
            (Ok(slides), Some(mut presentation)) => match presentation.replace_slides(slides) {
                Ok(()) => PresenterState::Presenting(presentation),
                Err(e) => PresenterState::failure(e, Some(presentation)),
            },
            (Ok(slides), None) => match Presentation::new(slides) {
                Ok(presentation) => PresenterState::Presenting(presentation),
                Err(e) => PresenterState::failure(e, None),
            },
            (Err(e), presentation) => PresenterState::failure(e, presentation),
        };
        match &self.state {
            PresenterState::Presenting(presentation) => {
                info!("reloaded presentation with {} slides", presentation.slides().len())
            }
            PresenterState::Failure { error, .. } => warn!("failed to reload presentation: {error}"),
            PresenterState::Empty => (),
        };
    }
}

/// Read and parse a presentation file.
pub fn load_slides(path: &Path, parser: &SlideParser) -> Result<Vec<Slide>, PresentationError> {
    let contents = fs::read_to_string(path).map_err(PresentationError::Reading)?;
    let slides = parser.parse(&contents);
    if slides.is_empty() {
        return Err(PresentationError::EmptyPresentation);
    }
    Ok(slides)
}

enum CommandSideEffect {
    Exit,
    /// Clear the screen and draw the current slide.
    Redraw,
    /// Draw the current slide on top of what's already on the screen.
    Repaint,
    Reload,
    None,
}

#[derive(Default)]
enum PresenterState {
    #[default]
    Empty,
    Presenting(Presentation),
    Failure {
        error: String,
        presentation: Option<Presentation>,
    },
}

impl PresenterState {
    fn failure<E: Display>(error: E, presentation: Option<Presentation>) -> Self {
        PresenterState::Failure { error: error.to_string(), presentation }
    }

    fn into_presentation(self) -> Option<Presentation> {
        match self {
            Self::Presenting(presentation) => Some(presentation),
            Self::Failure { presentation, .. } => presentation,
            Self::Empty => None,
        }
    }
}

/// An error during the presentation.
#[derive(thiserror::Error, Debug)]
pub enum PresentationError {
    #[error("presentation has no slides")]
    EmptyPresentation,

    #[error("reading presentation: {0}")]
    Reading(io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("io: {0}")]
    Io(#[from] io::Error),
}
