//! Link activation.
//!
//! Links that point to `tmux://<window>/<command>` send the command to a tmux window, creating
//! the window if needed. Any other link is opened with the platform's URL opener.

use crate::{
    markdown::elements::Link,
    tools::{ExecutionError, ThirdPartyTools},
};
use tracing::{debug, info};

const TMUX_SCHEME: &str = "tmux://";

/// Where a link points to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LinkTarget {
    /// Run a command in a tmux window.
    Tmux { pane: String, command: String },

    /// Anything else.
    External(String),
}

impl LinkTarget {
    pub(crate) fn parse(url: &str) -> Result<Self, DispatchError> {
        let Some(target) = url.strip_prefix(TMUX_SCHEME) else {
            return Ok(Self::External(url.to_string()));
        };
        let (pane, command) = target.split_once('/').unwrap_or((target, ""));
        if pane.is_empty() {
            return Err(DispatchError::MissingPane(url.to_string()));
        }
        Ok(Self::Tmux { pane: pane.to_string(), command: command.to_string() })
    }
}

/// Runs commands in named panes.
pub trait CommandDispatcher {
    /// Make sure a pane with the given name exists, creating it if it doesn't.
    fn ensure_pane(&mut self, name: &str) -> Result<(), DispatchError>;

    /// Type a command into a pane and press enter.
    fn send_command(&mut self, name: &str, command: &str) -> Result<(), DispatchError>;
}

/// A [CommandDispatcher] that uses tmux windows as panes.
#[derive(Clone, Debug, Default)]
pub struct TmuxDispatcher {
    session: Option<String>,
}

impl TmuxDispatcher {
    pub fn new(session: Option<String>) -> Self {
        Self { session }
    }

    fn target(&self, name: &str) -> String {
        match &self.session {
            Some(session) => format!("{session}:{name}"),
            None => name.to_string(),
        }
    }

    fn window_names(&self) -> Result<Vec<String>, DispatchError> {
        let mut args = vec!["list-windows", "-F", "#{window_name}"];
        if let Some(session) = &self.session {
            args.extend(["-t", session.as_str()]);
        }
        let output = ThirdPartyTools::tmux(args.as_slice()).run_and_capture_stdout()?;
        Ok(String::from_utf8_lossy(&output).lines().map(String::from).collect())
    }
}

impl CommandDispatcher for TmuxDispatcher {
    fn ensure_pane(&mut self, name: &str) -> Result<(), DispatchError> {
        if self.window_names()?.iter().any(|window| window == name) {
            return Ok(());
        }
        info!("creating tmux window '{name}'");
        let mut args = vec!["new-window".to_string(), "-d".into(), "-n".into(), name.into()];
        if let Some(session) = &self.session {
            args.extend(["-t".into(), format!("{session}:")]);
        }
        ThirdPartyTools::tmux(args.as_slice()).run()?;
        Ok(())
    }

    fn send_command(&mut self, name: &str, command: &str) -> Result<(), DispatchError> {
        let target = self.target(name);
        ThirdPartyTools::tmux(&["send-keys", "-t", target.as_str(), "-l", command]).run()?;
        ThirdPartyTools::tmux(&["send-keys", "-t", target.as_str(), "Enter"]).run()?;
        Ok(())
    }
}

/// Activates links.
pub(crate) struct LinkDispatcher<D> {
    commands: D,
}

impl<D: CommandDispatcher> LinkDispatcher<D> {
    pub(crate) fn new(commands: D) -> Self {
        Self { commands }
    }

    /// Activate a link.
    ///
    /// Failures are not retried.
    pub(crate) fn dispatch(&mut self, link: &Link) -> Result<(), DispatchError> {
        match LinkTarget::parse(&link.url)? {
            LinkTarget::Tmux { pane, command } => {
                debug!("sending '{command}' to pane '{pane}'");
                self.commands.ensure_pane(&pane)?;
                // A link with no command only makes sure the pane is there.
                if !command.is_empty() {
                    self.commands.send_command(&pane, &command)?;
                }
            }
            LinkTarget::External(url) => {
                debug!("opening '{url}'");
                ThirdPartyTools::opener(&url).run()?;
            }
        };
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("link '{0}' does not name a tmux window")]
    MissingPane(String),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::simple("tmux://main/ls", "main", "ls")]
    #[case::command_with_slashes("tmux://demo/cat /etc/hosts", "demo", "cat /etc/hosts")]
    #[case::no_command("tmux://main", "main", "")]
    #[case::empty_command("tmux://main/", "main", "")]
    fn parse_tmux(#[case] url: &str, #[case] pane: &str, #[case] command: &str) {
        let target = LinkTarget::parse(url).expect("parse failed");
        assert_eq!(target, LinkTarget::Tmux { pane: pane.into(), command: command.into() });
    }

    #[rstest]
    #[case::https("https://example.com")]
    #[case::relative("docs/index.html")]
    #[case::other_scheme("tmuxx://main/ls")]
    fn parse_external(#[case] url: &str) {
        let target = LinkTarget::parse(url).expect("parse failed");
        assert_eq!(target, LinkTarget::External(url.into()));
    }

    #[rstest]
    #[case::nothing("tmux://")]
    #[case::no_pane("tmux:///ls")]
    fn parse_missing_pane(#[case] url: &str) {
        assert!(matches!(LinkTarget::parse(url), Err(DispatchError::MissingPane(_))));
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        existing: Vec<String>,
    }

    impl CommandDispatcher for Recorder {
        fn ensure_pane(&mut self, name: &str) -> Result<(), DispatchError> {
            if !self.existing.iter().any(|pane| pane == name) {
                self.calls.push(format!("create {name}"));
                self.existing.push(name.into());
            }
            Ok(())
        }

        fn send_command(&mut self, name: &str, command: &str) -> Result<(), DispatchError> {
            self.calls.push(format!("send {name}: {command}"));
            Ok(())
        }
    }

    #[test]
    fn dispatch_tmux_links() {
        let mut dispatcher = LinkDispatcher::new(Recorder::default());
        dispatcher.dispatch(&Link::new("Go", "tmux://main/ls -l")).expect("dispatch failed");
        dispatcher.dispatch(&Link::new("Again", "tmux://main/pwd")).expect("dispatch failed");
        dispatcher.dispatch(&Link::new("Open", "tmux://other")).expect("dispatch failed");
        assert_eq!(dispatcher.commands.calls, &["create main", "send main: ls -l", "send main: pwd", "create other"]);
    }

    #[test]
    fn dispatch_invalid_link() {
        let mut dispatcher = LinkDispatcher::new(Recorder::default());
        assert!(dispatcher.dispatch(&Link::new("Broken", "tmux:///ls")).is_err());
        assert!(dispatcher.commands.calls.is_empty());
    }

    #[rstest]
    #[case::no_session(None, "main")]
    #[case::session(Some("talk"), "talk:main")]
    fn tmux_targets(#[case] session: Option<&str>, #[case] expected: &str) {
        let dispatcher = TmuxDispatcher::new(session.map(String::from));
        assert_eq!(dispatcher.target("main"), expected);
    }
}
