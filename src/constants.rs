//! Application-wide constants
//!
//! Window profiles, store keys and seeded defaults live here so every
//! default has exactly one source.

/// Application identity
pub mod app {
    /// Display name used for the window title and notifications
    pub const NAME: &str = "Kronos";

    /// Directory under the platform config dir
    pub const CONFIG_DIR: &str = "kronos";

    /// Store filename inside `CONFIG_DIR`
    pub const CONFIG_FILENAME: &str = "config.json";
}

/// Keys of the persisted key-value store
pub mod keys {
    pub const SETUP_WINDOW_SIZE: &str = "setupWindowSize";
    pub const TIMER_WINDOW_SIZE: &str = "timerWindowSize";
    pub const SETUP_WINDOW_POSITION: &str = "setupWindowPosition";
    pub const APP_SETTINGS: &str = "appSettings";
}

/// Setup view window profile
pub mod setup {
    /// Default size when nothing has been persisted yet
    pub const DEFAULT_WIDTH: u32 = 460;
    pub const DEFAULT_HEIGHT: u32 = 740;

    pub const MIN_WIDTH: u32 = 400;
    pub const MIN_HEIGHT: u32 = 740;
    pub const MAX_WIDTH: u32 = 480;
    pub const MAX_HEIGHT: u32 = 780;
}

/// Timer view window profile
pub mod timer {
    pub const DEFAULT_WIDTH: u32 = 320;
    pub const DEFAULT_HEIGHT: u32 = 150;

    /// Small floor so the countdown stays legible; no maximum in this mode
    pub const MIN_WIDTH: u32 = 100;
    pub const MIN_HEIGHT: u32 = 50;
}

/// Validation bounds applied to loaded values
pub mod validation {
    /// Largest accepted persisted window dimension
    pub const MAX_DIMENSION: u32 = 8192;

    /// Opacity is a percentage
    pub const MAX_OPACITY_PERCENT: u8 = 100;
}

/// Notification appearance
pub mod notification {
    /// Freedesktop icon name shown with every alarm
    pub const ICON: &str = "alarm-clock";
}
