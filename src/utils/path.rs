use std::path::PathBuf;

/// Environment variable that relocates the config directory
pub const CONFIG_DIR_ENV: &str = "RIVULEX_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// `$RIVULEX_CONFIG_DIR`, or ~/.config/rivulex regardless of OS
pub fn get_config_dir() -> PathBuf {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => get_home_dir().join(".config").join("rivulex"),
    }
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Log directory (<cache dir>/rivulex, falling back to the config dir)
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("rivulex"))
        .unwrap_or_else(get_config_dir)
}
