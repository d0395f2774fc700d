use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "PF_CONFIG";

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// `~/.particle-field/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_home().join(".particle-field").join("config.toml")
}

/// Pick the settings file: an explicit path wins, then `PF_CONFIG`, then the
/// default location if a file exists there. `None` means built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    let from_env = env::var(CONFIG_ENV).ok();
    choose_path(explicit, from_env.as_deref(), &default_config_path())
}

// Pure selection logic, kept apart from the process environment.
fn choose_path(explicit: Option<&Path>, from_env: Option<&str>, default: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = from_env.map(str::trim)
        && !value.is_empty()
    {
        return Some(PathBuf::from(value));
    }
    default.is_file().then(|| default.to_path_buf())
}
