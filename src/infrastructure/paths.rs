//! Platform paths for trace output and user-supplied files.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Returns the per-user data directory, e.g. `~/.local/share/mapcomplete` on Linux.
///
/// `None` when no home directory can be determined.
#[must_use]
pub fn get_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("org", "mapcomplete", "mapcomplete").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expands a leading `~` to the user's home directory.
///
/// ```
/// use mapcomplete::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/places.json"), "/absolute/places.json");
/// assert!(!expand_tilde("~/places.json").starts_with('~'));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()) else {
        return path.to_string();
    };

    if path == "~" {
        home.to_string_lossy().into_owned()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest).to_string_lossy().into_owned()
    } else {
        path.to_string()
    }
}
