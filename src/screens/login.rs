//! Login screen: access-mode switch, credentials, remember-me, and links to
//! sign-up and safety routing.

use super::{button, centered, checkbox, cycle_focus};
use crate::components::{Footer, Header};
use crate::forms::{AccessModeSelector, Form, LoginField, LoginForm, SubmitBlocked};
use crate::keymap::Action;
use crate::models::{AccessMode, SubmissionResult};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{into_submission_result, SubmissionService, TaskHandle};
use crate::styles::theme;
use crate::ui::Screen as ScreenId;
use crate::utils::TextInput;
use crate::widgets::{AccessFeatures, AccessToggle, StatusLine, TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    AccessMode,
    Email,
    Password,
    RememberMe,
    SignIn,
    CreateAccount,
    SafetyRouting,
}

const FOCUS_ORDER: [LoginFocus; 7] = [
    LoginFocus::AccessMode,
    LoginFocus::Email,
    LoginFocus::Password,
    LoginFocus::RememberMe,
    LoginFocus::SignIn,
    LoginFocus::CreateAccount,
    LoginFocus::SafetyRouting,
];

impl LoginFocus {
    fn field(self) -> Option<LoginField> {
        match self {
            LoginFocus::Email => Some(LoginField::Email),
            LoginFocus::Password => Some(LoginField::Password),
            _ => None,
        }
    }
}

pub struct LoginScreen {
    form: LoginForm,
    focus: LoginFocus,
    pending: Option<TaskHandle<SubmissionResult>>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            form: LoginForm::new(),
            focus: LoginFocus::Email,
            pending: None,
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn focus(&self) -> LoginFocus {
        self.focus
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
            Err(SubmitBlocked::Invalid) => debug!("Login form incomplete"),
        }
    }

    fn activate(&mut self, ctx: &ScreenContext) -> ScreenAction {
        match self.focus {
            LoginFocus::AccessMode => self.form.toggle_mode(),
            LoginFocus::RememberMe => self.form.toggle_remember_me(),
            LoginFocus::CreateAccount => return ScreenAction::Navigate(ScreenId::SignUp),
            LoginFocus::SafetyRouting => return ScreenAction::Navigate(ScreenId::SafetyRouting),
            LoginFocus::Email | LoginFocus::Password | LoginFocus::SignIn => self.submit(ctx),
        }
        ScreenAction::None
    }

    fn handle_action(&mut self, action: Action, ctx: &ScreenContext) -> ScreenAction {
        match action {
            Action::Quit | Action::Cancel => return ScreenAction::Quit,
            Action::NextTab | Action::MoveDown => {
                self.focus = cycle_focus(&FOCUS_ORDER, self.focus, true);
            }
            Action::PrevTab | Action::MoveUp => {
                self.focus = cycle_focus(&FOCUS_ORDER, self.focus, false);
            }
            Action::Confirm | Action::ToggleSelect => return self.activate(ctx),
            Action::Save => self.submit(ctx),
            Action::SwitchAccessMode => self.form.toggle_mode(),
            Action::TogglePasswordVisibility => self.form.toggle_password_visibility(),
            Action::CreateAccount => return ScreenAction::Navigate(ScreenId::SignUp),
            Action::OpenSafetyRouting => return ScreenAction::Navigate(ScreenId::SafetyRouting),
            Action::MoveLeft | Action::MoveRight if self.focus == LoginFocus::AccessMode => {
                self.form.toggle_mode();
            }
            Action::MoveLeft
            | Action::MoveRight
            | Action::Home
            | Action::End
            | Action::Backspace
            | Action::DeleteChar => {
                if let Some(field) = self.focus.field() {
                    self.form.edit(field, |input| input.handle_action(action));
                }
            }
            Action::Refresh => {}
        }
        ScreenAction::None
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> ScreenAction {
        let action = ctx.config.keymap.get_action(key.code, key.modifiers);

        if let Some(field) = self.focus.field() {
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

    fn footer_text(&self, ctx: &RenderContext) -> String {
        ctx.config.keymap.footer(&[
            Action::Confirm,
            Action::NextTab,
            Action::SwitchAccessMode,
            Action::CreateAccount,
            Action::OpenSafetyRouting,
            Action::Quit,
        ])
    }
}

impl Screen for LoginScreen {
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
            ScreenId::Login.title(),
            self.form.mode().welcome(),
        )?;

        let panel = centered(outer[1], 60, 28);
        let rows = Layout::vertical([
            Constraint::Length(3), // access toggle
            Constraint::Length(1), // mode note
            Constraint::Length(3), // email
            Constraint::Length(3), // password
            Constraint::Length(1), // remember me
            Constraint::Length(1),
            Constraint::Length(1), // sign in
            Constraint::Length(1), // hint
            Constraint::Length(1), // links
            Constraint::Length(1),
            Constraint::Length(6), // features
            Constraint::Min(1),    // status
        ])
        .split(panel);

        frame.render_widget(
            AccessToggle::new(self.form.mode()).focused(self.focus == LoginFocus::AccessMode),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(self.form.mode().welcome_note())
                .style(t.muted_style())
                .alignment(Alignment::Center),
            rows[1],
        );

        let email_title = match self.form.mode() {
            AccessMode::Company => "Company email",
            AccessMode::General => "Email",
        };
        frame.render_text_input_widget(
            TextInputWidget::new(&self.form.email)
                .title(email_title)
                .placeholder("you@example.com")
                .focused(self.focus == LoginFocus::Email)
                .disabled(self.form.is_submitting()),
            rows[2],
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.form.password)
                .title("Password")
                .placeholder("Your password")
                .masked(!self.form.show_password)
                .focused(self.focus == LoginFocus::Password)
                .disabled(self.form.is_submitting()),
            rows[3],
        );

        frame.render_widget(
            Paragraph::new(checkbox(
                "Remember me",
                self.form.remember_me,
                self.focus == LoginFocus::RememberMe,
            )),
            rows[4],
        );

        let valid = self.form.validate();
        let label = if self.form.is_submitting() {
            "Signing in..."
        } else {
            "Sign in"
        };
        frame.render_widget(
            Paragraph::new(button(
                label,
                self.focus == LoginFocus::SignIn,
                valid && !self.form.is_submitting(),
            )),
            rows[6],
        );
        if !valid && !self.form.is_submitting() {
            frame.render_widget(
                Paragraph::new("Enter a valid email and your password")
                    .style(t.muted_style())
                    .alignment(Alignment::Center),
                rows[7],
            );
        }

        let links = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[8]);
        frame.render_widget(
            Paragraph::new(button(
                "Create new account",
                self.focus == LoginFocus::CreateAccount,
                true,
            )),
            links[0],
        );
        frame.render_widget(
            Paragraph::new(button(
                "Safety routing",
                self.focus == LoginFocus::SafetyRouting,
                true,
            )),
            links[1],
        );

        frame.render_widget(AccessFeatures::login(self.form.mode()), rows[10]);
        frame.render_widget(
            StatusLine::new(self.form.last_result()).busy(self.form.is_submitting(), "Signing in..."),
            rows[11],
        );

        Footer::render(frame, outer[2], &self.footer_text(ctx))?;
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
