// Reusable UI widgets

pub mod access_toggle;
pub mod map;
pub mod status;
pub mod text_input;

pub use access_toggle::{AccessFeatures, AccessToggle};
pub use map::RouteMap;
pub use status::StatusLine;
pub use text_input::{TextInputWidget, TextInputWidgetExt};
