/// Application screens, one per route path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    SignUp,
    SafetyRouting,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Login, Screen::SignUp, Screen::SafetyRouting];

    /// Resolve a route path (`/`, `/signup`, `/safety`). Anything else is `None`.
    pub fn from_path(path: &str) -> Option<Screen> {
        Self::ALL.into_iter().find(|screen| screen.path() == path)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Screen::Login => "/",
            Screen::SignUp => "/signup",
            Screen::SafetyRouting => "/safety",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign in",
            Screen::SignUp => "Create account",
            Screen::SafetyRouting => "Safety Routing",
        }
    }
}
