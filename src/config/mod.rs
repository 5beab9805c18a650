//! Configuration management for Kronos
//!
//! - **settings**: the user's alarm settings record and its partial-update form
//! - **store**: the durable key-value store holding settings and window geometry

pub mod settings;
pub mod store;

// Re-export commonly used types
pub use settings::{AmPm, AppSettings, AppSettingsPatch, ProgressBarType};
pub use store::{JsonFileStore, MemoryStore, SettingsStore, SettingsStoreExt, StoreError};
