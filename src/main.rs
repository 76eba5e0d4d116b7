use anyhow::Result;
use clap::Parser;
use rivulex::app::App;
use rivulex::cli::{print_error, Cli, LOG_FILE_NAME};
use rivulex::styles::{init_theme, ThemeType};
use tracing::info;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Subcommands run without the TUI
    if cli.execute()? {
        return Ok(());
    }

    // Validate the start route before touching the terminal
    let start = match cli.start_screen() {
        Ok(screen) => screen,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(2);
        }
    };

    setup_panic_hook();

    let log_dir = rivulex::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join(LOG_FILE_NAME);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    eprintln!("Logs are being written to: {:?}", log_file);

    let config = cli.load_config()?;
    let no_color = cli.no_colors || std::env::var_os("NO_COLOR").is_some();
    init_theme(ThemeType::resolve(&config.theme, no_color));
    info!(
        "Starting rivulex against {} (timeout {} ms)",
        config.api.base_url, config.api.timeout_ms
    );

    let mut app = App::new(config, start)?;
    let result = app.run();

    drop(guard);

    result
}
