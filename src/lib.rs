//! Rivulex - terminal client for flood monitoring and safety routing
//!
//! This library provides the screens, forms and request gateway behind the
//! `rivulex` binary: login, sign-up and a safety routing view backed by a
//! JSON API.

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod forms;
pub mod gateway;
pub mod keymap;
pub mod models;
pub mod screens;
pub mod services;
pub mod styles;
pub mod tui;
pub mod ui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use config::Config;
pub use gateway::{GatewayError, RequestGateway};

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
