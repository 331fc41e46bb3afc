use crossterm::event::{KeyCode, KeyModifiers};

use crate::controller::{Controller, GenerationOutcome, PendingGeneration, View};
use crate::models::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Topic,
    Tone,
}

/// Side effects a key press asks the event loop to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Generate(PendingGeneration),
    Copy(String),
}

#[derive(Debug)]
pub struct App {
    pub controller: Controller,
    pub focus: Focus,
    pub should_quit: bool,
    pub scroll_offset: usize,
    pub show_help: bool,
    pub exit_pending: bool,
    pub status: Option<String>,
    pub backend_name: String,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            controller: Controller::new(
                config.default_topic.clone(),
                config.default_tone,
                config.blank_topic,
            ),
            focus: Focus::Topic,
            should_quit: false,
            scroll_offset: 0,
            show_help: false,
            exit_pending: false,
            status: None,
            backend_name: match config.generator.backend {
                crate::models::GeneratorBackend::Mock => "mock".to_string(),
                crate::models::GeneratorBackend::Ollama => config.generator.model.clone(),
            },
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Topic => Focus::Tone,
            Focus::Tone => Focus::Topic,
        };
    }

    pub const fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub const fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub const fn scroll_to_bottom(&mut self) {
        // The rendering code clamps this to the maximum possible scroll
        self.scroll_offset = usize::MAX;
    }

    /// Copy is only offered while finished notes are on screen.
    pub fn can_copy(&self) -> bool {
        matches!(self.controller.state().view(), View::Notes(_))
    }

    fn started(&mut self, pending: Option<PendingGeneration>) -> Action {
        match pending {
            Some(pending) => {
                self.status = None;
                self.scroll_to_top();
                Action::Generate(pending)
            }
            None => Action::None,
        }
    }

    /// Kick off the initial generation with the configured defaults.
    pub fn activate(&mut self) -> Action {
        let pending = self.controller.activate();
        self.started(pending)
    }

    pub fn finish_generation(&mut self, outcome: GenerationOutcome) {
        if self.controller.complete(outcome) {
            self.scroll_to_top();
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Action {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        self.status = None;

        if self.show_help {
            match key {
                KeyCode::Char('h') if ctrl => self.toggle_help(),
                KeyCode::Esc => self.show_help = false,
                _ => {}
            }
            return Action::None;
        }

        match key {
            KeyCode::Char('c') if ctrl => {
                if self.exit_pending {
                    self.quit();
                } else {
                    self.exit_pending = true;
                }
                return Action::None;
            }
            KeyCode::Esc => {
                self.exit_pending = false;
                return Action::None;
            }
            // Any other key cancels a pending exit and is then handled normally
            _ => self.exit_pending = false,
        }

        match key {
            KeyCode::Char('q') if ctrl => self.quit(),
            KeyCode::Char('h') if ctrl => self.toggle_help(),
            KeyCode::Char('r') if ctrl => {
                if matches!(self.controller.state().view(), View::Error(_)) {
                    let pending = self.controller.retry();
                    return self.started(pending);
                }
            }
            KeyCode::Char('y') if ctrl => {
                if let View::Notes(note) = self.controller.state().view() {
                    return Action::Copy(note.content.clone());
                }
            }
            KeyCode::Char('u') if ctrl => {
                if self.focus == Focus::Topic {
                    self.controller.clear_topic();
                }
            }
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Enter => {
                if self.controller.can_submit() {
                    let pending = self.controller.submit_current();
                    return self.started(pending);
                }
            }

            KeyCode::Up if self.focus == Focus::Tone => self.controller.previous_tone(),
            KeyCode::Down if self.focus == Focus::Tone => self.controller.next_tone(),
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(10),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),

            KeyCode::Char(c @ '1'..='3') if self.focus == Focus::Tone => {
                let index = c as usize - '1' as usize;
                self.controller.set_tone(crate::models::Tone::ALL[index]);
            }
            KeyCode::Backspace if self.focus == Focus::Topic => self.controller.pop_topic_char(),
            KeyCode::Char(c) if !ctrl && self.focus == Focus::Topic => {
                self.controller.push_topic_char(c);
            }
            _ => {}
        }
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenerationError, MOCK_NOTES};
    use crate::models::{GenerationRequest, Tone};

    fn press(app: &mut App, key: KeyCode) -> Action {
        app.handle_key(key, KeyModifiers::NONE)
    }

    fn ctrl(app: &mut App, c: char) -> Action {
        app.handle_key(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn finish(app: &mut App, action: Action, result: Result<String, GenerationError>) {
        let Action::Generate(pending) = action else {
            panic!("expected a generation, got {action:?}");
        };
        app.finish_generation(GenerationOutcome {
            seq: pending.seq,
            request: pending.request,
            result,
        });
    }

    #[test]
    fn test_app_new() {
        let app = App::new(&AppConfig::default());
        assert!(!app.should_quit);
        assert_eq!(app.focus, Focus::Topic);
        assert_eq!(app.controller.topic(), "Operating System");
        assert_eq!(app.backend_name, "mock");
    }

    #[test]
    fn test_activate_submits_defaults() {
        let mut app = App::new(&AppConfig::default());
        let action = app.activate();
        assert_eq!(
            action,
            Action::Generate(PendingGeneration {
                seq: 1,
                request: GenerationRequest::new("Operating System", Tone::Simple),
            })
        );
        finish(&mut app, action, Ok(MOCK_NOTES.to_string()));
        assert!(app.can_copy());
    }

    #[test]
    fn test_typing_edits_topic() {
        let mut app = App::new(&AppConfig::default());
        ctrl(&mut app, 'u');
        for c in "Cells".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.topic(), "Cell");
    }

    #[test]
    fn test_tone_selection_requires_focus() {
        let mut app = App::new(&AppConfig::default());
        press(&mut app, KeyCode::Down);
        assert_eq!(app.controller.tone(), Tone::Simple);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Tone);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.controller.tone(), Tone::Detailed);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.controller.topic(), "Operating System");
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.controller.tone(), Tone::Analogy);
    }

    #[test]
    fn test_enter_disabled_while_loading() {
        let mut app = App::new(&AppConfig::default());
        let first = press(&mut app, KeyCode::Enter);
        assert!(matches!(first, Action::Generate(_)));
        assert_eq!(press(&mut app, KeyCode::Enter), Action::None);
    }

    #[test]
    fn test_enter_with_empty_topic_does_nothing() {
        let mut app = App::new(&AppConfig::default());
        ctrl(&mut app, 'u');
        assert_eq!(press(&mut app, KeyCode::Enter), Action::None);
        assert!(!app.controller.is_loading());
    }

    #[test]
    fn test_retry_after_error() {
        let mut app = App::new(&AppConfig::default());
        ctrl(&mut app, 'u');
        for c in "DNA".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        let action = press(&mut app, KeyCode::Enter);
        finish(&mut app, action, Err(GenerationError::Backend("down".to_string())));

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        let retry = ctrl(&mut app, 'r');
        let Action::Generate(pending) = retry else {
            panic!("expected retry to generate");
        };
        assert_eq!(
            pending.request,
            GenerationRequest::new("DNA", Tone::Detailed)
        );
    }

    #[test]
    fn test_status_cleared_on_next_key() {
        let mut app = App::new(&AppConfig::default());
        app.status = Some("Notes copied to clipboard!".to_string());
        press(&mut app, KeyCode::PageDown);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_retry_ignored_without_error() {
        let mut app = App::new(&AppConfig::default());
        let action = app.activate();
        finish(&mut app, action, Ok("notes".to_string()));
        assert_eq!(ctrl(&mut app, 'r'), Action::None);
    }

    #[test]
    fn test_copy_only_with_notes() {
        let mut app = App::new(&AppConfig::default());
        assert_eq!(ctrl(&mut app, 'y'), Action::None);

        let action = app.activate();
        assert_eq!(ctrl(&mut app, 'y'), Action::None);

        finish(&mut app, action, Ok("# Notes".to_string()));
        assert_eq!(ctrl(&mut app, 'y'), Action::Copy("# Notes".to_string()));
    }

    #[test]
    fn test_exit_requires_double_ctrl_c() {
        let mut app = App::new(&AppConfig::default());
        ctrl(&mut app, 'c');
        assert!(app.exit_pending);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('a'));
        assert!(!app.exit_pending);

        ctrl(&mut app, 'c');
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = App::new(&AppConfig::default());
        ctrl(&mut app, 'h');
        assert!(app.show_help);
        assert_eq!(press(&mut app, KeyCode::Enter), Action::None);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn test_scrolling() {
        let mut app = App::new(&AppConfig::default());
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.scroll_offset, 10);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.scroll_offset, 9);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.scroll_offset, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.scroll_offset, usize::MAX);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.scroll_offset, 0);
    }
}
