//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Default location of the config file (tilde-expanded at load time)
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/shortcut-helper/config.json";

/// Default popup hide delay in milliseconds
pub const DEFAULT_POPUP_TIMEOUT_MS: u64 = 3000;

/// Default popup opacity (0.0 - 1.0)
pub const DEFAULT_POPUP_OPACITY: f32 = 0.95;

/// Default popup font size in pixels
pub const DEFAULT_POPUP_FONT_SIZE: u32 = 12;

/// Default import source flags
pub const DEFAULT_IMPORT_WINDOW_MANAGER: bool = true;
pub const DEFAULT_IMPORT_MEDIA_KEYS: bool = true;
pub const DEFAULT_IMPORT_SHELL: bool = true;
