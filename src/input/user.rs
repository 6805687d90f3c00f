use super::source::Command;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};
use std::{io, time::Duration};

/// User input handler.
#[derive(Default)]
pub struct UserInput {
    state: InputState,
}

impl UserInput {
    /// Polls for the next input command coming from the keyboard.
    pub(crate) fn poll_next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if poll(timeout)? { self.next_command() } else { Ok(None) }
    }

    /// Blocks waiting for the next command.
    pub(crate) fn next_command(&mut self) -> io::Result<Option<Command>> {
        let event = read()?;
        Ok(self.handle_event(&event))
    }

    fn handle_event(&mut self, event: &Event) -> Option<Command> {
        let command = match event {
            // Ignore release events so each key press is only handled once.
            Event::Key(event) if event.kind != KeyEventKind::Release => self.handle_key_event(event),
            Event::Resize(..) => Some(Command::Redraw),
            _ => None,
        };
        if command.is_some() {
            self.state.reset();
        }
        command
    }

    fn handle_key_event(&mut self, event: &KeyEvent) -> Option<Command> {
        let control = event.modifiers == KeyModifiers::CONTROL;
        match event.code {
            KeyCode::Char('c') if control => Some(Command::Exit),
            KeyCode::Char('r') if control => Some(Command::HardReload),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Some(Command::JumpPreviousSlide),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown | KeyCode::Char(' ') => {
                Some(Command::JumpNextSlide)
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Some(Command::PreviousLink),
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Some(Command::NextLink),
            KeyCode::Enter => Some(Command::ActivateLink),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Exit),
            KeyCode::Char('G') => self.handle_uppercase_g(),
            KeyCode::Char('g') => self.handle_lowercase_g(),
            KeyCode::Char(character) => match character.to_digit(10) {
                Some(number) => {
                    self.handle_number(number);
                    None
                }
                None => {
                    self.state.reset();
                    None
                }
            },
            _ => {
                self.state.reset();
                None
            }
        }
    }

    fn handle_lowercase_g(&mut self) -> Option<Command> {
        match self.state {
            InputState::PendingG => Some(Command::JumpFirstSlide),
            InputState::Empty => {
                self.state = InputState::PendingG;
                None
            }
            _ => {
                self.state.reset();
                None
            }
        }
    }

    fn handle_uppercase_g(&mut self) -> Option<Command> {
        match self.state {
            InputState::Empty => Some(Command::JumpLastSlide),
            InputState::PendingNumber(number) => Some(Command::JumpSlide(number)),
            _ => {
                self.state.reset();
                None
            }
        }
    }

    fn handle_number(&mut self, number: u32) {
        let maybe_next = match self.state {
            InputState::PendingNumber(current) => current.checked_mul(10).and_then(|n| n.checked_add(number)),
            InputState::Empty => Some(number),
            InputState::OverflowedNumber => {
                return;
            }
            _ => {
                self.state.reset();
                return;
            }
        };
        // If we overflowed, jump to a terminal state that indicates so. This way 123123123G is not
        // an alias for G
        match maybe_next {
            Some(number) => self.state = InputState::PendingNumber(number),
            None => self.state = InputState::OverflowedNumber,
        };
    }
}

#[derive(Default)]
enum InputState {
    #[default]
    Empty,
    PendingG,
    PendingNumber(u32),
    OverflowedNumber,
}

impl InputState {
    fn reset(&mut self) {
        *self = InputState::Empty;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn control(character: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(character), KeyModifiers::CONTROL))
    }

    fn feed(events: &[Event]) -> Vec<Command> {
        let mut input = UserInput::default();
        events.iter().filter_map(|event| input.handle_event(event)).collect()
    }

    #[rstest]
    #[case::right(KeyCode::Right, Command::JumpNextSlide)]
    #[case::space(KeyCode::Char(' '), Command::JumpNextSlide)]
    #[case::left(KeyCode::Left, Command::JumpPreviousSlide)]
    #[case::down(KeyCode::Down, Command::NextLink)]
    #[case::tab(KeyCode::Tab, Command::NextLink)]
    #[case::up(KeyCode::Up, Command::PreviousLink)]
    #[case::enter(KeyCode::Enter, Command::ActivateLink)]
    #[case::quit(KeyCode::Char('q'), Command::Exit)]
    #[case::last(KeyCode::Char('G'), Command::JumpLastSlide)]
    fn single_key(#[case] code: KeyCode, #[case] expected: Command) {
        assert_eq!(feed(&[key(code)]), &[expected]);
    }

    #[test]
    fn control_keys() {
        assert_eq!(feed(&[control('c'), control('r')]), &[Command::Exit, Command::HardReload]);
    }

    #[test]
    fn first_slide() {
        let g = key(KeyCode::Char('g'));
        assert!(feed(&[g.clone()]).is_empty());
        assert_eq!(feed(&[g.clone(), g]), &[Command::JumpFirstSlide]);
    }

    #[rstest]
    #[case::single_digit("3G", Some(Command::JumpSlide(3)))]
    #[case::multi_digit("42G", Some(Command::JumpSlide(42)))]
    #[case::interrupted("4xG", Some(Command::JumpLastSlide))]
    #[case::overflow("99999999999G", None)]
    fn jump_to_slide(#[case] input: &str, #[case] expected: Option<Command>) {
        let events: Vec<_> = input.chars().map(|c| key(KeyCode::Char(c))).collect();
        let commands = feed(&events);
        assert_eq!(commands.last().cloned(), expected);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut event = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert!(feed(&[Event::Key(event)]).is_empty());
    }

    #[test]
    fn resize_redraws() {
        assert_eq!(feed(&[Event::Resize(80, 24)]), &[Command::Redraw]);
    }
}
