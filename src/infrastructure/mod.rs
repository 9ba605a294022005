//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where manhwadex keeps its local files and looks for
//! its config file.

pub mod paths;

pub use paths::{
    default_config_file, expand_tilde, get_data_dir, resolve_config_file, resolve_data_dir, COMMUNITY_FILE, CONFIG_FILE,
    TRACE_FILE, VIEWS_FILE,
};
