use super::{fs::PresentationFileWatcher, user::UserInput};
use std::{io, path::PathBuf, time::Duration};

/// How long to wait for user input before checking whether the presentation file changed.
const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// The source of commands.
///
/// This expects user commands as well as watches over the presentation file to reload if it that
/// happens.
pub struct CommandSource {
    watcher: PresentationFileWatcher,
    user_input: UserInput,
}

impl CommandSource {
    /// Create a new command source over the given presentation path.
    pub fn new<P: Into<PathBuf>>(presentation_path: P) -> Self {
        let watcher = PresentationFileWatcher::new(presentation_path);
        Self { watcher, user_input: UserInput::default() }
    }

    /// Try to get the next command.
    ///
    /// This attempts to get a command and returns `Ok(None)` on timeout.
    pub(crate) fn try_next_command(&mut self) -> io::Result<Option<Command>> {
        if let Some(command) = self.user_input.poll_next_command(POLL_TIMEOUT)? {
            return Ok(Some(command));
        };
        if self.watcher.has_modifications()? { Ok(Some(Command::Reload)) } else { Ok(None) }
    }
}

/// A command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Redraw the presentation.
    ///
    /// This can happen on terminal resize.
    Redraw,

    /// Jump to the next slide.
    JumpNextSlide,

    /// Jump to the previous slide.
    JumpPreviousSlide,

    /// Jump to the first slide.
    JumpFirstSlide,

    /// Jump to the last slide.
    JumpLastSlide,

    /// Jump to one particular slide.
    JumpSlide(u32),

    /// Select the next link in the current slide.
    NextLink,

    /// Select the previous link in the current slide.
    PreviousLink,

    /// Activate the selected link.
    ActivateLink,

    /// Exit the presentation.
    Exit,

    /// The presentation has changed and needs to be reloaded.
    Reload,

    /// Hard reload the presentation.
    ///
    /// Like [Command::Reload] but also reloads any external resources like images and fonts.
    HardReload,
}
