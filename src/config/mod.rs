//! Board configuration: types, built-in defaults, and file loading.

mod loader;
mod types;

pub use loader::{BoardSetLoader, CONFIG_PATH_ENV, default_config_path};
pub use types::{BoardConfig, BoardPatch, BoardSet, GENERAL_BOARD_ID, Stage};
