//! Safety routing: editable location, alert list, mock map, save-address
//! and an on-demand refresh of alerts and route.

use super::{button, cycle_focus};
use crate::components::{Footer, Header};
use crate::forms::{AddressField, Form, SavedAddressForm, SubmitBlocked};
use crate::keymap::Action;
use crate::models::{AlertCategory, RouteDescription, SafetyAlert, SubmissionResult};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{into_submission_result, SafetyRefresh, SubmissionService, TaskHandle};
use crate::styles::theme;
use crate::ui::Screen as ScreenId;
use crate::utils::TextInput;
use crate::widgets::{RouteMap, StatusLine, TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Destination used for route lookups until one is entered
pub const DEFAULT_DESTINATION: &str = "Lower Town Heights";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyFocus {
    Location,
    Destination,
    SaveAddress,
    Refresh,
}

const FOCUS_ORDER: [SafetyFocus; 4] = [
    SafetyFocus::Location,
    SafetyFocus::Destination,
    SafetyFocus::SaveAddress,
    SafetyFocus::Refresh,
];

pub struct SafetyRoutingScreen {
    address: SavedAddressForm,
    destination: TextInput,
    alerts: Vec<SafetyAlert>,
    route: Option<RouteDescription>,
    /// Muted note about the last refresh
    refresh_note: Option<String>,
    focus: SafetyFocus,
    pending_save: Option<TaskHandle<SubmissionResult>>,
    pending_refresh: Option<TaskHandle<SafetyRefresh>>,
    default_location: String,
}

impl SafetyRoutingScreen {
    pub fn new(default_location: &str) -> Self {
        Self {
            address: SavedAddressForm::new(default_location),
            destination: TextInput::with_text(DEFAULT_DESTINATION),
            alerts: SafetyAlert::initial(),
            route: None,
            refresh_note: None,
            focus: SafetyFocus::Location,
            pending_save: None,
            pending_refresh: None,
            default_location: default_location.to_string(),
        }
    }

    pub fn address(&self) -> &SavedAddressForm {
        &self.address
    }

    pub fn alerts(&self) -> &[SafetyAlert] {
        &self.alerts
    }

    pub fn route(&self) -> Option<&RouteDescription> {
        self.route.as_ref()
    }

    pub fn refresh_note(&self) -> Option<&str> {
        self.refresh_note.as_deref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.pending_refresh.is_some()
    }

    fn save(&mut self, ctx: &ScreenContext) {
        match self.address.begin_submit() {
            Ok(payload) => {
                self.pending_save = Some(SubmissionService::submit(
                    ctx.runtime,
                    Arc::clone(ctx.gateway),
                    self.address.endpoint(),
                    payload,
                    self.address.confirmation(),
                ));
            }
            Err(SubmitBlocked::InFlight) => {}
            Err(SubmitBlocked::Invalid) => debug!("Location is empty, not saving"),
        }
    }

    fn refresh(&mut self, ctx: &ScreenContext) {
        if self.pending_refresh.is_some() {
            return;
        }
        let location = self.address.location.text_trimmed().to_string();
        if location.is_empty() {
            self.refresh_note = Some("Enter a location to refresh alerts".to_string());
            return;
        }
        self.refresh_note = None;
        self.pending_refresh = Some(SubmissionService::refresh(
            ctx.runtime,
            Arc::clone(ctx.gateway),
            location,
            self.destination.text_trimmed().to_string(),
        ));
    }

    /// Fold a settled refresh into the screen. Prior alerts survive failures
    /// and responses without `alerts`.
    pub fn apply_refresh(&mut self, refresh: SafetyRefresh) {
        let mut failures = Vec::new();
        match refresh.safety {
            Ok(data) => {
                if let Some(alerts) = data.alerts {
                    info!("Received {} safety alerts", alerts.len());
                    self.alerts = alerts;
                }
            }
            Err(e) => {
                warn!("Failed to fetch safety data: {:?}", e);
                failures.push(format!("alerts: {}", e));
            }
        }
        match refresh.route {
            Ok(route) => self.route = Some(route),
            Err(e) => {
                warn!("Failed to fetch route: {:?}", e);
                failures.push(format!("route: {}", e));
            }
        }
        self.refresh_note = if failures.is_empty() {
            None
        } else {
            Some(failures.join(" · "))
        };
    }

    fn activate(&mut self, ctx: &ScreenContext) {
        match self.focus {
            SafetyFocus::Refresh => self.refresh(ctx),
            SafetyFocus::Location | SafetyFocus::Destination | SafetyFocus::SaveAddress => {
                self.save(ctx);
            }
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            SafetyFocus::Location => self.address.input_mut(AddressField::Location),
            SafetyFocus::Destination => Some(&mut self.destination),
            SafetyFocus::SaveAddress | SafetyFocus::Refresh => None,
        }
    }

    /// Apply a text edit to the focused field.
    fn edit<F: FnOnce(&mut TextInput) -> bool>(&mut self, f: F) {
        match self.focus {
            SafetyFocus::Location => {
                self.address.edit(AddressField::Location, f);
            }
            SafetyFocus::Destination => {
                f(&mut self.destination);
            }
            SafetyFocus::SaveAddress | SafetyFocus::Refresh => {}
        }
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
            Action::Confirm | Action::ToggleSelect => self.activate(ctx),
            Action::Save => self.save(ctx),
            Action::Refresh => self.refresh(ctx),
            Action::MoveLeft
            | Action::MoveRight
            | Action::Home
            | Action::End
            | Action::Backspace
            | Action::DeleteChar => self.edit(|input| input.handle_action(action)),
            Action::SwitchAccessMode
            | Action::TogglePasswordVisibility
            | Action::CreateAccount
            | Action::OpenSafetyRouting => {}
        }
        ScreenAction::None
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> ScreenAction {
        let action = ctx.config.keymap.get_action(key.code, key.modifiers);

        if self.focused_input().is_some() {
            if let Some(action) = action.filter(TextInput::is_action_allowed_when_focused) {
                return self.handle_action(action, ctx);
            }
            if let KeyCode::Char(c) = key.code {
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                    self.edit(|input| {
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

    fn render_alerts(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let items: Vec<ListItem> = self
            .alerts
            .iter()
            .map(|alert| {
                let icon = match alert.category {
                    AlertCategory::Weather => "☔",
                    AlertCategory::General => "⚠",
                    AlertCategory::Other => "•",
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!(" {} ", icon)),
                    Span::styled(alert.message.clone(), t.severity_style(alert.severity)),
                ]))
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(t.border_style())
                .title(Span::styled(" Safety Alerts ", t.title_style())),
        );
        frame.render_widget(list, area);
    }
}

impl Screen for SafetyRoutingScreen {
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
            ScreenId::SafetyRouting.title(),
            "Your location, current alerts and a safe route.",
        )?;

        let columns = if outer[1].width >= 100 {
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(outer[1])
        } else {
            Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(outer[1])
        };

        let caption = self.route.as_ref().map(RouteDescription::summary);
        let mut map = RouteMap::new().loading(self.is_refreshing());
        if let Some(caption) = caption.as_deref() {
            map = map.caption(caption);
        }
        frame.render_widget(map, columns[0]);

        let rows = Layout::vertical([
            Constraint::Length(3), // location
            Constraint::Length(3), // destination
            Constraint::Min(4),    // alerts
            Constraint::Length(1), // refresh note
            Constraint::Length(1), // save
            Constraint::Length(1), // refresh
            Constraint::Length(2), // status
        ])
        .split(columns[1]);

        frame.render_text_input_widget(
            TextInputWidget::new(&self.address.location)
                .title("Your Location")
                .placeholder("Street, city")
                .focused(self.focus == SafetyFocus::Location),
            rows[0],
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.destination)
                .title("Destination")
                .placeholder(DEFAULT_DESTINATION)
                .focused(self.focus == SafetyFocus::Destination),
            rows[1],
        );

        self.render_alerts(frame, rows[2]);

        if let Some(note) = &self.refresh_note {
            frame.render_widget(
                Paragraph::new(note.as_str())
                    .style(t.muted_style())
                    .wrap(Wrap { trim: true }),
                rows[3],
            );
        }

        let saving = self.address.is_submitting();
        frame.render_widget(
            Paragraph::new(button(
                if saving { "Saving..." } else { "Save Address" },
                self.focus == SafetyFocus::SaveAddress,
                self.address.validate() && !saving,
            )),
            rows[4],
        );
        frame.render_widget(
            Paragraph::new(button(
                if self.is_refreshing() {
                    "Refreshing..."
                } else {
                    "Refresh alerts"
                },
                self.focus == SafetyFocus::Refresh,
                !self.is_refreshing(),
            )),
            rows[5],
        );

        frame.render_widget(
            StatusLine::new(self.address.last_result()).busy(saving, "Saving address..."),
            rows[6],
        );

        let footer = ctx.config.keymap.footer(&[
            Action::Save,
            Action::Refresh,
            Action::NextTab,
            Action::Cancel,
            Action::Quit,
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
        let mut changed = false;
        if let Some(result) = self.pending_save.as_mut().and_then(TaskHandle::try_recv) {
            self.pending_save = None;
            self.address.finish_submit(into_submission_result(result));
            changed = true;
        }
        if let Some(result) = self.pending_refresh.as_mut().and_then(TaskHandle::try_recv) {
            self.pending_refresh = None;
            match result {
                Ok(refresh) => self.apply_refresh(refresh),
                Err(e) => {
                    warn!("Refresh did not complete: {:?}", e);
                    self.refresh_note = Some(e.to_string());
                }
            }
            changed = true;
        }
        changed
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<()> {
        if self.default_location != ctx.config.default_location {
            *self = Self::new(&ctx.config.default_location);
        }
        Ok(())
    }

    fn on_exit(&mut self, _ctx: &ScreenContext) -> Result<()> {
        if let Some(mut pending) = self.pending_save.take() {
            pending.cancel();
        }
        if let Some(mut pending) = self.pending_refresh.take() {
            pending.cancel();
        }
        let location = std::mem::take(&mut self.default_location);
        *self = Self::new(&location);
        Ok(())
    }
}
