use crate::config::Config;
use crate::gateway::RequestGateway;
use crate::screens::{
    LoginScreen, RenderContext, SafetyRoutingScreen, Screen, ScreenAction, ScreenContext,
    SignUpScreen,
};
use crate::tui::Tui;
use crate::ui::Screen as ScreenId;
use anyhow::{Context, Result};
use crossterm::event::Event;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{error, info};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Main application state
pub struct App {
    config: Config,
    tui: Tui,
    runtime: Runtime,
    gateway: Arc<RequestGateway>,
    current: ScreenId,
    should_quit: bool,
    login: LoginScreen,
    sign_up: SignUpScreen,
    safety_routing: SafetyRoutingScreen,
}

impl App {
    pub fn new(config: Config, start: ScreenId) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let gateway = Arc::new(RequestGateway::new(&config.api)?);
        let tui = Tui::new()?;
        let safety_routing = SafetyRoutingScreen::new(&config.default_location);

        Ok(Self {
            config,
            tui,
            runtime,
            gateway,
            current: start,
            should_quit: false,
            login: LoginScreen::new(),
            sign_up: SignUpScreen::new(),
            safety_routing,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        info!("Starting on {}", self.current.path());
        self.with_current(|screen, ctx| screen.on_enter(ctx))?;

        let result = self.event_loop();
        if let Err(e) = &result {
            error!("Application error: {:?}", e);
        }

        self.with_current(|screen, ctx| screen.on_exit(ctx))?;
        self.tui.exit()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        loop {
            self.draw()?;

            if self.should_quit {
                return Ok(());
            }

            let current = self.current;
            self.screen_mut(current).tick();

            if let Some(event) = self.tui.poll_event(TICK_RATE)? {
                self.handle_event(event)?;
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let Self {
            config,
            tui,
            current,
            login,
            sign_up,
            safety_routing,
            ..
        } = self;
        let screen: &mut dyn Screen = match current {
            ScreenId::Login => login,
            ScreenId::SignUp => sign_up,
            ScreenId::SafetyRouting => safety_routing,
        };
        let ctx = RenderContext::new(config);
        let mut rendered = Ok(());
        tui.draw(|frame| {
            let area = frame.area();
            rendered = screen.render(frame, area, &ctx);
        })?;
        rendered
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match self.with_current(|screen, ctx| screen.handle_event(event, ctx))? {
            ScreenAction::None => {}
            ScreenAction::Navigate(target) => self.navigate(target)?,
            ScreenAction::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
        }
        Ok(())
    }

    /// Leave the current screen and enter `target`.
    fn navigate(&mut self, target: ScreenId) -> Result<()> {
        if target == self.current {
            return Ok(());
        }
        info!("Navigating {} -> {}", self.current.path(), target.path());
        self.with_current(|screen, ctx| screen.on_exit(ctx))?;
        self.current = target;
        self.with_current(|screen, ctx| screen.on_enter(ctx))
    }

    fn screen_mut(&mut self, id: ScreenId) -> &mut dyn Screen {
        match id {
            ScreenId::Login => &mut self.login,
            ScreenId::SignUp => &mut self.sign_up,
            ScreenId::SafetyRouting => &mut self.safety_routing,
        }
    }

    /// Run `f` against the current screen with a fresh event context.
    fn with_current<T>(
        &mut self,
        f: impl FnOnce(&mut dyn Screen, &ScreenContext) -> Result<T>,
    ) -> Result<T> {
        let Self {
            config,
            runtime,
            gateway,
            current,
            login,
            sign_up,
            safety_routing,
            ..
        } = self;
        let handle = runtime.handle().clone();
        let ctx = ScreenContext::new(config, &handle, gateway);
        let screen: &mut dyn Screen = match current {
            ScreenId::Login => login,
            ScreenId::SignUp => sign_up,
            ScreenId::SafetyRouting => safety_routing,
        };
        f(screen, &ctx)
    }
}
