//! User settings with partial updates and change listeners.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use leaflens_common::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Marathi,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Marathi];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::System, Theme::Light, Theme::Dark];
}

/// Stored fields missing from a blob take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub language: Language,
    pub notifications: bool,
    pub data_saver: bool,
    pub theme: Theme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: Language::English,
            notifications: true,
            data_saver: false,
            theme: Theme::System,
        }
    }
}

impl AppSettings {
    /// Decode stored settings.
    ///
    /// `current` wins when present. Otherwise `legacy` (first-release
    /// settings, which had no theme choice) is migrated with the theme reset
    /// to `system`. Anything unreadable yields defaults.
    pub fn restore(current: Option<&str>, legacy: Option<&str>) -> Self {
        if let Some(raw) = current {
            return serde_json::from_str(raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable settings: {}", e);
                Self::default()
            });
        }
        if let Some(raw) = legacy {
            match serde_json::from_str::<AppSettings>(raw) {
                Ok(parsed) => {
                    debug!("Migrating legacy settings");
                    return Self { theme: Theme::System, ..parsed };
                }
                Err(e) => warn!("Discarding unreadable legacy settings: {}", e),
            }
        }
        Self::default()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Copy of `self` with every field set in `patch` replaced.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            language: patch.language.unwrap_or(self.language),
            notifications: patch.notifications.unwrap_or(self.notifications),
            data_saver: patch.data_saver.unwrap_or(self.data_saver),
            theme: patch.theme.unwrap_or(self.theme),
        }
    }
}

/// A partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub language: Option<Language>,
    pub notifications: Option<bool>,
    pub data_saver: Option<bool>,
    pub theme: Option<Theme>,
}

/// Handle returned by [`SettingsStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&AppSettings) + Send>;

/// Current settings plus the listeners told about every change.
pub struct SettingsStore {
    current: AppSettings,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl SettingsStore {
    pub fn new(current: AppSettings) -> Self {
        Self { current, listeners: Vec::new(), next_id: 0 }
    }

    pub fn current(&self) -> &AppSettings {
        &self.current
    }

    /// Apply `patch`, notify listeners in subscription order and return the
    /// new settings.
    pub fn update(&mut self, patch: SettingsPatch) -> AppSettings {
        self.current = self.current.merged(&patch);
        self.notify();
        self.current.clone()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&AppSettings) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn n_listeners(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self) {
        for (id, listener) in &self.listeners {
            let outcome = catch_unwind(AssertUnwindSafe(|| listener(&self.current)));
            if outcome.is_err() {
                warn!("Settings listener {:?} panicked; skipping", id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_defaults() {
        let s = AppSettings::default();
        assert_eq!(s.language, Language::English);
        assert!(s.notifications);
        assert!(!s.data_saver);
        assert_eq!(s.theme, Theme::System);
    }

    #[test]
    fn test_stored_json_layout() {
        let json = AppSettings::default().to_json().unwrap();
        assert_eq!(json, r#"{"language":"English","notifications":true,"dataSaver":false,"theme":"system"}"#);
    }

    #[test]
    fn test_restore_merges_over_defaults() {
        let s = AppSettings::restore(Some(r#"{"language":"Hindi","theme":"dark"}"#), None);
        assert_eq!(s, AppSettings { language: Language::Hindi, theme: Theme::Dark, ..Default::default() });
    }

    #[test]
    fn test_restore_current_ignores_legacy() {
        let s = AppSettings::restore(Some(r#"{"dataSaver":true}"#), Some(r#"{"language":"Marathi"}"#));
        assert_eq!(s.language, Language::English);
        assert!(s.data_saver);
    }

    #[test]
    fn test_legacy_migration_forces_system_theme() {
        let s = AppSettings::restore(None, Some(r#"{"language":"Marathi","theme":"dark","notifications":false}"#));
        assert_eq!(s.language, Language::Marathi);
        assert!(!s.notifications);
        assert_eq!(s.theme, Theme::System);
    }

    #[test]
    fn test_malformed_restores_defaults() {
        assert_eq!(AppSettings::restore(Some("{oops"), None), AppSettings::default());
        assert_eq!(AppSettings::restore(None, Some("42")), AppSettings::default());
        assert_eq!(AppSettings::restore(None, None), AppSettings::default());
    }

    #[test]
    fn test_update_merges_patch() {
        let mut store = SettingsStore::default();
        let next = store.update(SettingsPatch { data_saver: Some(true), ..Default::default() });
        assert!(next.data_saver);
        assert_eq!(next.language, Language::English);
        assert_eq!(store.current(), &next);
    }

    #[test]
    fn test_listeners_fire_in_order_once_per_update() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = SettingsStore::default();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            store.subscribe(move |s| seen.lock().unwrap().push((tag, s.theme)));
        }
        store.update(SettingsPatch { theme: Some(Theme::Dark), ..Default::default() });
        assert_eq!(*seen.lock().unwrap(), vec![("first", Theme::Dark), ("second", Theme::Dark)]);
    }

    #[test]
    fn test_unsubscribed_listener_is_silent() {
        let count = Arc::new(Mutex::new(0));
        let mut store = SettingsStore::default();
        let c = Arc::clone(&count);
        let id = store.subscribe(move |_| *c.lock().unwrap() += 1);
        store.update(SettingsPatch::default());
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.update(SettingsPatch::default());
        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(store.n_listeners(), 0);
    }

    #[test]
    fn test_panicking_listener_does_not_block_others() {
        let reached = Arc::new(Mutex::new(false));
        let mut store = SettingsStore::default();
        store.subscribe(|_| panic!("listener failure"));
        let r = Arc::clone(&reached);
        store.subscribe(move |_| *r.lock().unwrap() = true);
        store.update(SettingsPatch { notifications: Some(false), ..Default::default() });
        assert!(*reached.lock().unwrap());
        assert!(!store.current().notifications);
    }

    #[test]
    fn test_patch_from_json() {
        let patch: SettingsPatch = serde_json::from_str(r#"{"language":"Hindi"}"#).unwrap();
        assert_eq!(patch.language, Some(Language::Hindi));
        assert_eq!(patch.theme, None);
    }
}
