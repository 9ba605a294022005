//! Path resolution for the local data directory.
//!
//! Everything manhwadex writes (cached listing views, community documents,
//! trace exports) lives in one data directory. It follows the XDG base
//! directory convention: `$XDG_DATA_HOME/manhwadex`, falling back to
//! `~/.local/share/manhwadex`.

use std::path::PathBuf;

const APP_DIR: &str = "manhwadex";

/// File holding the per-page view cache.
pub const VIEWS_FILE: &str = "views.json";

/// File holding forum threads and reading lists.
pub const COMMUNITY_FILE: &str = "community.json";

/// Config file name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// OTLP-JSON trace export.
pub const TRACE_FILE: &str = "manhwadex-otlp.json";

/// Returns the data directory from the process environment.
///
/// Falls back to a `.manhwadex` directory under the working directory when
/// neither `XDG_DATA_HOME` nor `HOME` is set.
///
/// # Examples
///
/// ```
/// use manhwadex::infrastructure::get_data_dir;
///
/// let dir = get_data_dir();
/// assert!(dir.ends_with("manhwadex") || dir.ends_with(".manhwadex"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    let xdg = std::env::var("XDG_DATA_HOME").ok();
    let home = std::env::var("HOME").ok();
    resolve_data_dir(xdg.as_deref(), home.as_deref())
}

/// Pure form of [`get_data_dir`] with the environment passed in.
#[must_use]
pub fn resolve_data_dir(xdg_data_home: Option<&str>, home: Option<&str>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|p| !p.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    if let Some(home) = home.filter(|p| !p.is_empty()) {
        return PathBuf::from(home).join(".local").join("share").join(APP_DIR);
    }
    tracing::warn!("neither XDG_DATA_HOME nor HOME is set, using working directory");
    PathBuf::from(format!(".{APP_DIR}"))
}

/// Default config file location, if one can be named.
///
/// `$XDG_CONFIG_HOME/manhwadex/config.toml`, else
/// `~/.config/manhwadex/config.toml`. The file need not exist.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    let xdg = std::env::var("XDG_CONFIG_HOME").ok();
    let home = std::env::var("HOME").ok();
    resolve_config_file(xdg.as_deref(), home.as_deref())
}

/// Pure form of [`default_config_file`].
#[must_use]
pub fn resolve_config_file(xdg_config_home: Option<&str>, home: Option<&str>) -> Option<PathBuf> {
    let base = match (xdg_config_home.filter(|p| !p.is_empty()), home.filter(|p| !p.is_empty())) {
        (Some(xdg), _) => PathBuf::from(xdg),
        (None, Some(home)) => PathBuf::from(home).join(".config"),
        (None, None) => return None,
    };
    Some(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Expands a leading `~` to `home`.
///
/// # Examples
///
/// ```
/// use manhwadex::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/data", Some("/home/reader")), "/home/reader/data");
/// assert_eq!(expand_tilde("~", Some("/home/reader")), "/home/reader");
/// assert_eq!(expand_tilde("/absolute/path", Some("/home/reader")), "/absolute/path");
/// assert_eq!(expand_tilde("~/data", None), "~/data");
/// ```
#[must_use]
pub fn expand_tilde(path: &str, home: Option<&str>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else if path == "~" {
        home.to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let dir = resolve_data_dir(Some("/xdg"), Some("/home/reader"));
        assert_eq!(dir, PathBuf::from("/xdg/manhwadex"));
    }

    #[test]
    fn home_fallback() {
        let dir = resolve_data_dir(Some(""), Some("/home/reader"));
        assert_eq!(dir, PathBuf::from("/home/reader/.local/share/manhwadex"));
    }

    #[test]
    fn config_file_locations() {
        assert_eq!(
            resolve_config_file(None, Some("/home/reader")),
            Some(PathBuf::from("/home/reader/.config/manhwadex/config.toml"))
        );
        assert_eq!(
            resolve_config_file(Some("/cfg"), Some("/home/reader")),
            Some(PathBuf::from("/cfg/manhwadex/config.toml"))
        );
        assert_eq!(resolve_config_file(None, None), None);
    }

    #[test]
    fn working_directory_as_last_resort() {
        assert_eq!(resolve_data_dir(None, None), PathBuf::from(".manhwadex"));
    }
}
