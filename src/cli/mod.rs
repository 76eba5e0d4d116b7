//! Command-line interface.
//!
//! Without a subcommand the TUI is launched; the flags tune that one run.

mod common;
mod completions;

pub use common::*;

use crate::config::Config;
use crate::ui::Screen;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indoc::indoc;
use std::path::PathBuf;

/// Terminal client for flood monitoring and safety routing
#[derive(Parser, Debug)]
#[command(
    name = "rivulex",
    version,
    about,
    long_about = None,
    disable_help_subcommand = true,
    after_help = indoc! {"
        Examples:
          rivulex                                   open the login screen
          rivulex --route /safety                   start on safety routing
          rivulex --base-url http://localhost:8080/api --timeout-ms 3000
          rivulex completions zsh > _rivulex
    "}
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Screen to open first: "/", "/signup" or "/safety"
    #[arg(long, default_value = "/")]
    pub route: String,

    /// Override the API base URL for this run
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the request timeout (milliseconds) for this run
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colors in the TUI (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the config file location and the effective configuration
    Config,
    /// Shows logs location and how to view them
    Logs,
    /// Generate shell completions
    Completions {
        /// Target shell (detected from $SHELL when omitted)
        shell: Option<Shell>,
    },
}

impl Cli {
    /// Config file to use for this run.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::utils::get_config_path)
    }

    /// Load the config file and apply the one-off flag overrides.
    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_path();
        let mut config = Config::load_or_create(&path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?;
        config.apply_overrides(self.base_url.clone(), self.timeout_ms);
        Ok(config)
    }

    /// Screen named by `--route`.
    pub fn start_screen(&self) -> Result<Screen> {
        match Screen::from_path(&self.route) {
            Some(screen) => Ok(screen),
            None => bail!(
                "Unknown route {:?}. Known routes: {}",
                self.route,
                Screen::ALL.map(|s| s.path()).join(", ")
            ),
        }
    }

    /// Run a subcommand. Returns false when the TUI should launch instead.
    pub fn execute(&self) -> Result<bool> {
        match &self.command {
            Some(Commands::Config) => self.cmd_config().map(|()| true),
            Some(Commands::Logs) => Self::cmd_logs().map(|()| true),
            Some(Commands::Completions { shell }) => completions::generate(*shell).map(|()| true),
            None => Ok(false),
        }
    }

    fn cmd_config(&self) -> Result<()> {
        let path = self.config_path();
        let config = self.load_config()?;
        let rendered =
            toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
        print_info(&path.display().to_string());
        println!();
        print!("{}", rendered);
        Ok(())
    }

    fn cmd_logs() -> Result<()> {
        let log_file = crate::utils::get_log_dir().join(LOG_FILE_NAME);
        println!("{}", log_file.display());
        println!("View logs in real-time: tail -f {:?}", log_file);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_login() {
        let cli = Cli::parse_from(["rivulex"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.start_screen().unwrap(), Screen::Login);
    }

    #[test]
    fn test_route_flag() {
        let cli = Cli::parse_from(["rivulex", "--route", "/safety"]);
        assert_eq!(cli.start_screen().unwrap(), Screen::SafetyRouting);

        let cli = Cli::parse_from(["rivulex", "--route", "/signnup"]);
        let err = cli.start_screen().unwrap_err().to_string();
        assert!(err.contains("/signnup"));
        assert!(err.contains("/signup"));
    }

    #[test]
    fn test_overrides_apply_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let path_arg = path.to_string_lossy().to_string();
        let cli = Cli::parse_from([
            "rivulex",
            "--config",
            path_arg.as_str(),
            "--base-url",
            "http://127.0.0.1:4000/api",
            "--timeout-ms",
            "1500",
        ]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:4000/api");
        assert_eq!(config.api.timeout_ms, 1500);

        // Overrides are not persisted
        let on_disk = Config::load_or_create(&path).unwrap();
        assert_eq!(on_disk.api.timeout_ms, 10_000);
    }

    #[test]
    fn test_zero_timeout_flag_is_rejected() {
        let err = Cli::try_parse_from(["rivulex", "--timeout-ms", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(Cli::try_parse_from(["rivulex", "--timeout-ms", "1"]).is_ok());
    }

    #[test]
    fn test_completions_subcommand_parses() {
        let cli = Cli::parse_from(["rivulex", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions {
                shell: Some(Shell::Zsh)
            })
        ));
    }
}
