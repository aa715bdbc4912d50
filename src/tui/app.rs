//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::info;

use crate::config::Config;
use crate::form::{ErrorKey, FieldId, FormState, SubmitOutcome};
use crate::submit;
use crate::tui::ui::Styles;

/// Focusable elements of the form screen, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Email,
    Password,
    Submit,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Email => Focus::Password,
            Focus::Password => Focus::Submit,
            Focus::Submit => Focus::Email,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Email => Focus::Submit,
            Focus::Password => Focus::Email,
            Focus::Submit => Focus::Password,
        }
    }

    fn field(self) -> Option<FieldId> {
        match self {
            Focus::Email => Some(FieldId::Email),
            Focus::Password => Some(FieldId::Password),
            Focus::Submit => None,
        }
    }
}

/// Actions returned from key handling for the main loop to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    Submit,
    Quit,
}

/// Main TUI application state
pub struct App {
    config: Config,
    pub form: FormState,
    focus: Focus,
    status_message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut app = Self {
            form: FormState::new(&config.default_email),
            config,
            focus: Focus::Email,
            status_message: None,
            should_quit: false,
        };
        app.update_field_focus();
        app
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match self.handle_key_event(key) {
                    AppAction::Quit => self.should_quit = true,
                    AppAction::Submit => self.run_submission(terminal).await?,
                    AppAction::None => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) -> AppAction {
        // The loop is parked on the awaited handler while a submission is in
        // flight, so this is a structural guard rather than a live code path.
        if self.form.is_submitting() {
            return AppAction::None;
        }

        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return AppAction::Quit;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                self.update_field_focus();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.previous();
                self.update_field_focus();
            }
            KeyCode::Enter => return AppAction::Submit,
            KeyCode::Char(c) => {
                if let Some(field) = self.focus.field() {
                    self.form.handle_char(field, c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focus.field() {
                    self.form.handle_backspace(field);
                }
            }
            KeyCode::Delete => {
                if let Some(field) = self.focus.field() {
                    self.form.handle_delete(field);
                }
            }
            KeyCode::Left => {
                if let Some(field) = self.focus.field() {
                    self.form.move_cursor_left(field);
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.focus.field() {
                    self.form.move_cursor_right(field);
                }
            }
            KeyCode::Home => {
                if let Some(field) = self.focus.field() {
                    self.form.move_cursor_home(field);
                }
            }
            KeyCode::End => {
                if let Some(field) = self.focus.field() {
                    self.form.move_cursor_end(field);
                }
            }
            _ => {}
        }
        AppAction::None
    }

    /// Execute one submit attempt. Validation failures stop here; valid data
    /// is handed to the submission handler while the disabled submitting
    /// state is on screen. The handler future is owned and awaited by this
    /// loop, so its completion can never write into a torn-down form.
    async fn run_submission<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let Some(data) = self.form.begin_submit() else {
            self.status_message = Some("Fix the highlighted fields and resubmit".to_string());
            return Ok(());
        };

        // Repaint so the submit control shows as disabled during the delay.
        terminal.draw(|f| self.draw(f))?;

        info!("submitting sign-up for {}", data.email);
        let result = submit::process_signup(
            data,
            self.config.submit_delay(),
            self.config.accept_signups,
        )
        .await;

        let outcome = self.form.finish_submit(result);
        self.status_message = Some(if outcome == SubmitOutcome::Accepted {
            "Sign-up submitted".to_string()
        } else {
            "Sign-up rejected, see field errors".to_string()
        });
        Ok(())
    }

    fn update_field_focus(&mut self) {
        self.form
            .set_field_focus(FieldId::Email, self.focus == Focus::Email);
        self.form
            .set_field_focus(FieldId::Password, self.focus == Focus::Password);
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, form content above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_form(f, chunks[0]);
        self.draw_status_bar(f, chunks[1]);
    }

    fn draw_form(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Email
                Constraint::Length(1), // Email error
                Constraint::Length(3), // Password
                Constraint::Length(1), // Password error
                Constraint::Length(3), // Submit button
                Constraint::Length(1), // Root error
                Constraint::Min(0),    // Instructions
            ])
            .split(area);

        let title = Paragraph::new("Welcome to the regform sign-up demo")
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        self.form.field(FieldId::Email).render(
            f,
            chunks[1],
            self.form.has_error(FieldId::Email),
        );
        self.draw_error_line(f, chunks[2], ErrorKey::Field(FieldId::Email));

        self.form.field(FieldId::Password).render(
            f,
            chunks[3],
            self.form.has_error(FieldId::Password),
        );
        self.draw_error_line(f, chunks[4], ErrorKey::Field(FieldId::Password));

        self.draw_submit_button(f, chunks[5]);
        self.draw_error_line(f, chunks[6], ErrorKey::Root);
        self.draw_instructions(f, chunks[7]);
    }

    fn draw_error_line(&self, f: &mut Frame, area: Rect, key: ErrorKey) {
        if let Some(message) = self.form.error_for(key) {
            let line = Paragraph::new(message).style(Styles::error());
            f.render_widget(line, area);
        }
    }

    fn draw_submit_button(&self, f: &mut Frame, area: Rect) {
        let (label, style) = if self.form.is_submitting() {
            ("Submitting...", Styles::inactive())
        } else {
            ("Submit", Styles::button())
        };

        let border_style = if self.form.is_submitting() {
            Styles::inactive_border()
        } else if self.focus == Focus::Submit {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
        f.render_widget(button, area);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let instructions = Paragraph::new(
            "Tab/Shift+Tab: Navigate fields | Enter: Submit | Esc: Quit",
        )
        .style(Styles::info());
        f.render_widget(instructions, area);
    }

    /// Draw status bar with the latest submit outcome or default shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = match &self.status_message {
            Some(msg) => format!("Status: {}", msg),
            None => "regform - Sign Up | Enter: Submit | Esc: Quit".to_string(),
        };

        let style = if self.form.error_count() > 0 {
            Styles::error()
        } else if self.status_message.is_some() {
            Styles::success()
        } else {
            Styles::inactive()
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status_bar, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_focus_cycles_through_fields_and_button() {
        let mut app = App::new(Config::default());
        assert_eq!(app.focus, Focus::Email);
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Password);
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Submit);
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Email);
        app.handle_key_event(key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::Submit);
    }

    #[test]
    fn test_typing_routes_to_focused_field() {
        let mut app = App::new(Config::default());
        // Email starts pre-populated with the configured default "@".
        app.handle_key_event(key(KeyCode::Char('x')));
        assert_eq!(app.form.values().email, "@x");

        app.handle_key_event(key(KeyCode::Tab));
        app.handle_key_event(key(KeyCode::Char('s')));
        assert_eq!(app.form.values().password, "s");
        assert_eq!(app.form.values().email, "@x");
    }

    #[test]
    fn test_typing_on_submit_button_is_ignored() {
        let mut app = App::new(Config::default());
        app.handle_key_event(key(KeyCode::Tab));
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Submit);
        let before = app.form.values();
        app.handle_key_event(key(KeyCode::Char('x')));
        app.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(app.form.values(), before);
    }

    #[test]
    fn test_enter_requests_submission() {
        let mut app = App::new(Config::default());
        assert_eq!(app.handle_key_event(key(KeyCode::Enter)), AppAction::Submit);
    }

    #[test]
    fn test_escape_quits() {
        let mut app = App::new(Config::default());
        assert_eq!(app.handle_key_event(key(KeyCode::Esc)), AppAction::Quit);
    }

    #[test]
    fn test_keys_ignored_while_submitting() {
        let mut app = App::new(Config {
            default_email: "a@b.com".to_string(),
            ..Config::default()
        });
        for c in "12345678".chars() {
            app.form.handle_char(FieldId::Password, c);
        }
        app.form.begin_submit().expect("valid data");
        assert!(app.form.is_submitting());

        let before = app.form.values();
        assert_eq!(app.handle_key_event(key(KeyCode::Char('x'))), AppAction::None);
        assert_eq!(app.handle_key_event(key(KeyCode::Enter)), AppAction::None);
        assert_eq!(app.form.values(), before);
    }
}
