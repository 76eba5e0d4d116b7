//! Screen trait and associated types.
//!
//! Screens own their state, turn events into a [`ScreenAction`] instead of
//! mutating anything outside themselves, and poll their background work on
//! every tick.

use crate::config::Config;
use crate::gateway::RequestGateway;
use crate::ui::Screen as ScreenId;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Read-only resources for rendering.
pub struct RenderContext<'a> {
    pub config: &'a Config,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

/// Resources for event handling: config plus what is needed to start
/// background requests.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
    pub runtime: &'a Handle,
    pub gateway: &'a Arc<RequestGateway>,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config, runtime: &'a Handle, gateway: &'a Arc<RequestGateway>) -> Self {
        Self {
            config,
            runtime,
            gateway,
        }
    }
}

/// What the app should do after a screen handled an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScreenAction {
    /// Stay on the current screen
    #[default]
    None,
    /// Leave for another screen
    Navigate(ScreenId),
    Quit,
}

/// Trait for screen controllers.
///
/// # Example
///
/// ```rust,ignore
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
///         Ok(ScreenAction::Navigate(ScreenId::Login))
///     }
/// }
/// ```
pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Poll background work. Returns true when something settled.
    fn tick(&mut self) -> bool {
        false
    }

    /// Called when the screen is navigated to.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }

    /// Called when the screen is navigated away from.
    fn on_exit(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }
}
