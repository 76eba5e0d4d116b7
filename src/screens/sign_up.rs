use super::{button, centered, cycle_focus};
use crate::components::{Footer, Header};
use crate::forms::{AccessModeSelector, Form, SignUpField, SignUpForm, SubmitBlocked};
use crate::keymap::Action;
use crate::models::{AccessMode, Gender, SubmissionResult};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{into_submission_result, SubmissionService, TaskHandle};
use crate::styles::{theme, FOCUS_SYMBOL};
use crate::ui::Screen as ScreenId;
use crate::utils::TextInput;
use crate::widgets::{AccessFeatures, AccessToggle, StatusLine, TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpFocus {
    AccessMode,
    FirstName,
    LastName,
    Gender,
    Country,
    StateOfResidence,
    Email,
    Password,
    Submit,
    BackToLogin,
}

const FOCUS_ORDER: [SignUpFocus; 10] = [
    SignUpFocus::AccessMode,
    SignUpFocus::FirstName,
    SignUpFocus::LastName,
    SignUpFocus::Gender,
    SignUpFocus::Country,
    SignUpFocus::StateOfResidence,
    SignUpFocus::Email,
    SignUpFocus::Password,
    SignUpFocus::Submit,
    SignUpFocus::BackToLogin,
];

pub struct SignUpScreen {
    form: SignUpForm,
    focus: SignUpFocus,
    pending: Option<TaskHandle<SubmissionResult>>,
}

impl Default for SignUpScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SignUpScreen {
    pub fn new() -> Self {
        Self {
            form: SignUpForm::new(),
            focus: SignUpFocus::FirstName,
            pending: None,
        }
    }

    pub fn form(&self) -> &SignUpForm {
        &self.form
    }

    pub fn focus(&self) -> SignUpFocus {
        self.focus
    }

    /// Text field behind the focused row; the email row follows the access mode.
    fn focused_field(&self) -> Option<SignUpField> {
        match self.focus {
            SignUpFocus::FirstName => Some(SignUpField::FirstName),
            SignUpFocus::LastName => Some(SignUpField::LastName),
            SignUpFocus::Country => Some(SignUpField::Country),
            SignUpFocus::StateOfResidence => Some(SignUpField::StateOfResidence),
            SignUpFocus::Email => Some(self.form.active_email_field()),
            SignUpFocus::Password => Some(SignUpField::Password),
            SignUpFocus::AccessMode
            | SignUpFocus::Gender
            | SignUpFocus::Submit
            | SignUpFocus::BackToLogin => None,
        }
    }

    fn submit(&mut self, ctx: &ScreenContext) {
        match self.form.begin_submit() {
            Ok(payload) => {
                self.pending = Some(SubmissionService::submit(
                    ctx.runtime,
                    Arc::clone(ctx.gateway),
                    self.form.endpoint(),
                    payload,
                    self.form.confirmation(),
                ));
            }
            Err(SubmitBlocked::InFlight) => {}
            Err(SubmitBlocked::Invalid) => debug!("Sign-up form incomplete"),
        }
    }

    fn activate(&mut self, ctx: &ScreenContext) -> ScreenAction {
        match self.focus {
            SignUpFocus::AccessMode => self.form.toggle_mode(),
            SignUpFocus::Gender => self.form.cycle_gender(true),
            SignUpFocus::BackToLogin => return ScreenAction::Navigate(ScreenId::Login),
            _ => self.submit(ctx),
        }
        ScreenAction::None
    }

    fn handle_action(&mut self, action: Action, ctx: &ScreenContext) -> ScreenAction {
        match action {
            Action::Quit => return ScreenAction::Quit,
            Action::Cancel => return ScreenAction::Navigate(ScreenId::Login),
            Action::NextTab | Action::MoveDown => {
                self.focus = cycle_focus(&FOCUS_ORDER, self.focus, true);
            }
            Action::PrevTab | Action::MoveUp => {
                self.focus = cycle_focus(&FOCUS_ORDER, self.focus, false);
            }
            Action::Confirm | Action::ToggleSelect => return self.activate(ctx),
            Action::Save => self.submit(ctx),
            Action::SwitchAccessMode => self.form.toggle_mode(),
            Action::TogglePasswordVisibility => {
                self.form.show_password = !self.form.show_password;
            }
            Action::MoveLeft | Action::MoveRight if self.focus == SignUpFocus::AccessMode => {
                self.form.toggle_mode();
            }
            Action::MoveLeft | Action::MoveRight if self.focus == SignUpFocus::Gender => {
                self.form.cycle_gender(action == Action::MoveRight);
            }
            Action::MoveLeft
            | Action::MoveRight
            | Action::Home
            | Action::End
            | Action::Backspace
            | Action::DeleteChar => {
                if let Some(field) = self.focused_field() {
                    self.form.edit(field, |input| input.handle_action(action));
                }
            }
            Action::CreateAccount | Action::OpenSafetyRouting | Action::Refresh => {}
        }
        ScreenAction::None
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> ScreenAction {
        let action = ctx.config.keymap.get_action(key.code, key.modifiers);

        if let Some(field) = self.focused_field() {
            if let Some(action) = action.filter(TextInput::is_action_allowed_when_focused) {
                return self.handle_action(action, ctx);
            }
            if let KeyCode::Char(c) = key.code {
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                    self.form.edit(field, |input| {
                        input.insert_char(c);
                        true
                    });
                    return ScreenAction::None;
                }
            }
        }

        match action {
            Some(action) => self.handle_action(action, ctx),
            None => ScreenAction::None,
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, focus: SignUpFocus, title: &str) {
        let (input, placeholder) = match focus {
            SignUpFocus::FirstName => (&self.form.first_name, "John"),
            SignUpFocus::LastName => (&self.form.last_name, "Doe"),
            SignUpFocus::Country => (&self.form.country, "Nigeria"),
            SignUpFocus::StateOfResidence => (&self.form.state_of_residence, "Borno"),
            SignUpFocus::Email => (self.form.active_email(), "you@example.com"),
            SignUpFocus::Password => (&self.form.password, "At least 8 characters"),
            _ => return,
        };
        frame.render_text_input_widget(
            TextInputWidget::new(input)
                .title(title)
                .placeholder(placeholder)
                .masked(focus == SignUpFocus::Password && !self.form.show_password)
                .focused(self.focus == focus)
                .disabled(self.form.is_submitting()),
            area,
        );
    }

    fn render_gender(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let focused = self.focus == SignUpFocus::Gender;
        let mut spans = Vec::new();
        for gender in Gender::ALL {
            let selected = self.form.gender() == Some(gender);
            let style = if selected {
                t.highlight_style()
            } else {
                t.muted_style()
            };
            let mark = if selected { "(•)" } else { "( )" };
            spans.push(Span::styled(format!("{} {}  ", mark, gender.label()), style));
        }
        let border = if focused {
            t.border_focused_style()
        } else {
            t.border_style()
        };
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border)
                    .title(if focused {
                        format!(" {}Gender (←/→) ", FOCUS_SYMBOL)
                    } else {
                        " Gender ".to_string()
                    }),
            ),
            area,
        );
    }
}

impl Screen for SignUpScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let outer = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

        Header::render(
            frame,
            outer[0],
            self.form.mode().title(),
            "Create your account to get flood alerts and safe routes.",
        )?;

        let panel = centered(outer[1], 72, 27);
        let rows = Layout::vertical([
            Constraint::Length(6), // access toggle and plan card
            Constraint::Length(3), // names
            Constraint::Length(3), // gender
            Constraint::Length(3), // country / state
            Constraint::Length(3), // email
            Constraint::Length(3), // password
            Constraint::Length(1), // password hint
            Constraint::Length(1), // submit
            Constraint::Length(1), // back
            Constraint::Min(1),    // status
        ])
        .split(panel);

        let halves = |area: Rect| {
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area)
        };
        let access = halves(rows[0]);
        let toggle = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(access[0]);
        frame.render_widget(
            AccessToggle::new(self.form.mode()).focused(self.focus == SignUpFocus::AccessMode),
            toggle[0],
        );
        frame.render_widget(AccessFeatures::plan(self.form.mode()), access[1]);
        let names = halves(rows[1]);
        self.render_input(frame, names[0], SignUpFocus::FirstName, "First name");
        self.render_input(frame, names[1], SignUpFocus::LastName, "Last name");

        self.render_gender(frame, rows[2]);

        let place = halves(rows[3]);
        self.render_input(frame, place[0], SignUpFocus::Country, "Country");
        self.render_input(frame, place[1], SignUpFocus::StateOfResidence, "State of residence");

        let email_title = match self.form.mode() {
            AccessMode::Company => "Company email",
            AccessMode::General => "Email",
        };
        self.render_input(frame, rows[4], SignUpFocus::Email, email_title);
        self.render_input(frame, rows[5], SignUpFocus::Password, "Password");

        if !self.form.password.text().is_empty() && !self.form.password_long_enough() {
            frame.render_widget(
                Paragraph::new("Password must be at least 8 characters").style(t.warning_style()),
                rows[6],
            );
        }

        let valid = self.form.validate();
        let label = if self.form.is_submitting() {
            "Creating account..."
        } else {
            "Create account"
        };
        frame.render_widget(
            Paragraph::new(button(
                label,
                self.focus == SignUpFocus::Submit,
                valid && !self.form.is_submitting(),
            )),
            rows[7],
        );
        frame.render_widget(
            Paragraph::new(button(
                "Back to sign in",
                self.focus == SignUpFocus::BackToLogin,
                true,
            )),
            rows[8],
        );

        frame.render_widget(
            StatusLine::new(self.form.last_result())
                .busy(self.form.is_submitting(), "Creating account..."),
            rows[9],
        );

        let footer = ctx.config.keymap.footer(&[
            Action::Confirm,
            Action::NextTab,
            Action::SwitchAccessMode,
            Action::TogglePasswordVisibility,
            Action::Cancel,
        ]);
        Footer::render(frame, outer[2], &footer)?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return Ok(ScreenAction::None);
            }
            return Ok(self.handle_key(key, ctx));
        }
        Ok(ScreenAction::None)
    }

    fn tick(&mut self) -> bool {
        let Some(result) = self.pending.as_mut().and_then(TaskHandle::try_recv) else {
            return false;
        };
        self.pending = None;
        self.form.finish_submit(into_submission_result(result));
        true
    }

    fn on_exit(&mut self, _ctx: &ScreenContext) -> Result<()> {
        if let Some(mut pending) = self.pending.take() {
            pending.cancel();
        }
        *self = Self::new();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gateway::RequestGateway;

    fn press(screen: &mut SignUpScreen, code: KeyCode, modifiers: KeyModifiers) -> ScreenAction {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let config = Config::default();
        let gateway = Arc::new(RequestGateway::new(&config.api).unwrap());
        let handle = runtime.handle().clone();
        let ctx = ScreenContext::new(&config, &handle, &gateway);
        screen
            .handle_event(Event::Key(KeyEvent::new(code, modifiers)), &ctx)
            .unwrap()
    }

    fn type_text(screen: &mut SignUpScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn tab(screen: &mut SignUpScreen) {
        press(screen, KeyCode::Tab, KeyModifiers::NONE);
    }

    #[test]
    fn test_fill_whole_form_from_keyboard() {
        let mut screen = SignUpScreen::new();
        type_text(&mut screen, "John");
        tab(&mut screen);
        type_text(&mut screen, "Doe");
        tab(&mut screen);
        assert_eq!(screen.focus(), SignUpFocus::Gender);
        press(&mut screen, KeyCode::Right, KeyModifiers::NONE);
        tab(&mut screen);
        type_text(&mut screen, "Nigeria");
        tab(&mut screen);
        type_text(&mut screen, "Borno");
        tab(&mut screen);
        type_text(&mut screen, "john@gmail.com");
        tab(&mut screen);
        type_text(&mut screen, "password1");

        let form = screen.form();
        assert_eq!(form.gender(), Some(Gender::Male));
        assert_eq!(form.general_email.text(), "john@gmail.com");
        assert_eq!(form.company_email.text(), "");
        assert!(form.validate());
    }

    #[test]
    fn test_email_row_follows_access_mode() {
        let mut screen = SignUpScreen::new();
        press(&mut screen, KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(screen.form().mode(), AccessMode::Company);
        for _ in 0..5 {
            tab(&mut screen);
        }
        assert_eq!(screen.focus(), SignUpFocus::Email);
        type_text(&mut screen, "john@rivulex.io");
        assert_eq!(screen.form().company_email.text(), "john@rivulex.io");
        assert_eq!(screen.form().general_email.text(), "");
    }

    #[test]
    fn test_escape_goes_back_to_login() {
        let mut screen = SignUpScreen::new();
        assert_eq!(
            press(&mut screen, KeyCode::Esc, KeyModifiers::NONE),
            ScreenAction::Navigate(ScreenId::Login)
        );
    }

    #[test]
    fn test_short_password_keeps_submit_disabled() {
        let mut screen = SignUpScreen::new();
        screen.form.set_field(SignUpField::FirstName, "John");
        screen.form.set_field(SignUpField::LastName, "Doe");
        screen.form.set_field(SignUpField::Gender, "male");
        screen.form.set_field(SignUpField::Country, "Nigeria");
        screen.form.set_field(SignUpField::StateOfResidence, "Borno");
        screen.form.set_field(SignUpField::GeneralEmail, "john@gmail.com");
        screen.form.set_field(SignUpField::Password, "short");
        press(&mut screen, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!screen.form().is_submitting());
        assert!(screen.pending.is_none());
    }
}
