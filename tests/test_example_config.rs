#[test]
fn test_example_config_loads() {
    use crossterm::event::{KeyCode, KeyModifiers};
    use rivulex::config::Config;
    use rivulex::keymap::{Action, KeymapPreset};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let example_content = r#"
theme = "light"
default_location = "12 Marina Road, Lagos"

[api]
base_url = "https://api.rivulex.example/v1"
timeout_ms = 2500

[api.endpoints]
safety = "/safety-data"

[keymap]
preset = "emacs"

[[keymap.overrides]]
key = "ctrl+q"
action = "quit"
"#;

    fs::write(&config_path, example_content).unwrap();
    let config = Config::load_or_create(&config_path).unwrap();

    assert_eq!(config.theme, "light");
    assert_eq!(config.default_location, "12 Marina Road, Lagos");
    assert_eq!(config.api.base_url, "https://api.rivulex.example/v1");
    assert_eq!(config.api.timeout(), Duration::from_millis(2500));
    assert_eq!(config.api.endpoints.safety, "/safety-data");
    // Unlisted endpoints keep their defaults
    assert_eq!(config.api.endpoints.login, "/login");
    assert_eq!(config.api.endpoints.routes, "/routes");

    assert_eq!(config.keymap.preset, KeymapPreset::Emacs);
    assert_eq!(
        config
            .keymap
            .get_action(KeyCode::Char('q'), KeyModifiers::CONTROL),
        Some(Action::Quit)
    );
    assert_eq!(
        config
            .keymap
            .get_action(KeyCode::Char('c'), KeyModifiers::CONTROL),
        None
    );
}
