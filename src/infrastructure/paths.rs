//! Filesystem locations.
//!
//! Everything FoodiePal writes (the session store and the log file) lives in
//! one data directory.

use crate::Config;
use std::path::PathBuf;

/// Session store file name inside the data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Returns the data directory.
///
/// Resolution order:
/// 1. `config.data_dir`, with a leading `~` expanded
/// 2. `$XDG_DATA_HOME/foodiepal`
/// 3. `$HOME/.local/share/foodiepal`
/// 4. `.foodiepal` in the working directory
#[must_use]
pub fn get_data_dir(config: &Config) -> PathBuf {
    if let Some(dir) = &config.data_dir {
        return dir
            .to_str()
            .map_or_else(|| dir.clone(), |s| PathBuf::from(expand_tilde(s)));
    }

    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("foodiepal");
    }

    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map_or_else(
            || PathBuf::from(".foodiepal"),
            |home| PathBuf::from(home).join(".local").join("share").join("foodiepal"),
        )
}

/// Path of the session store.
#[must_use]
pub fn session_file(config: &Config) -> PathBuf {
    get_data_dir(config).join(SESSION_FILE_NAME)
}

/// Expands a leading `~` to `$HOME`. Other paths pass through unchanged.
///
/// # Examples
///
/// ```
/// use foodiepal::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = std::env::var_os("HOME").and_then(|h| h.into_string().ok()) else {
        return path.to_string();
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}
