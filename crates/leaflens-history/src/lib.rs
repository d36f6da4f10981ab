//! leaflens-history — Recent diagnoses and user settings.
//!
//! Both stores are plain in-memory state that serialise to the JSON blobs a
//! persistence layer keeps under the storage keys below.

pub mod history;
pub mod settings;

pub use history::{DiagnosisHistory, HistoryEntry, DEFAULT_CAPACITY};
pub use settings::{AppSettings, Language, SettingsPatch, SettingsStore, SubscriptionId, Theme};

/// Storage key of the history blob.
pub const HISTORY_KEY: &str = "leaflens.history.v1";
/// Storage key of the current settings blob.
pub const SETTINGS_KEY: &str = "leaflens.settings.v2";
/// Storage key of settings written by the first release.
pub const LEGACY_SETTINGS_KEY: &str = "leaflens.settings.v1";
