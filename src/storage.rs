//! Persisted key-value state: form drafts and the dark-mode flag.
//!
//! Every field owns its own key, so writes never need merging; the most recent
//! input event simply wins.

use crate::config::{DARK_MODE_CLASS, DARK_MODE_KEY, DRAFT_KEY_PREFIX};
use crate::FieldValue;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Storage error types
#[derive(Debug)]
pub enum StorageError {
    /// The browser exposes no local storage (privacy mode, sandboxed frame).
    Unavailable,
    /// The backend rejected the operation.
    Backend(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "Local storage is not available"),
            StorageError::Backend(msg) => write!(f, "Storage operation failed: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Raw string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Store kept in memory for the lifetime of the page.
///
/// Used in tests and as the fallback when the browser has no local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The window's local storage, holding raw (not JSON-encoded) strings.
pub struct BrowserStore {
    storage: web_sys::Storage,
}

impl BrowserStore {
    pub fn open() -> Result<Self, StorageError> {
        let storage = gloo_utils::window()
            .local_storage()
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

/// Open the browser store, falling back to memory when it cannot be used.
pub fn open_default_store() -> Rc<dyn KeyValueStore> {
    match BrowserStore::open() {
        Ok(store) => Rc::new(store),
        Err(e) => {
            warn!("{}; drafts and preferences will not persist", e);
            Rc::new(MemoryStore::default())
        }
    }
}

/// Key for the saved draft of `field_id` in `form_id`.
pub fn draft_key(form_id: &str, field_id: &str) -> String {
    format!("{}{}_{}", DRAFT_KEY_PREFIX, form_id, field_id)
}

/// Auto-saved draft values for one form.
#[derive(Clone)]
pub struct DraftStore {
    form_id: String,
    store: Rc<dyn KeyValueStore>,
}

impl DraftStore {
    pub fn new(form_id: impl Into<String>, store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            form_id: form_id.into(),
            store,
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn save(&self, field_id: &str, value: &FieldValue) -> Result<(), StorageError> {
        self.store
            .set(&draft_key(&self.form_id, field_id), &value.to_stored())
    }

    /// Saved value for `field_id`, shaped like `template` (text or checkbox).
    pub fn load(&self, field_id: &str, template: &FieldValue) -> Result<Option<FieldValue>, StorageError> {
        let raw = self.store.get(&draft_key(&self.form_id, field_id))?;
        Ok(raw
            .filter(|s| !s.is_empty())
            .map(|s| template.with_stored(&s)))
    }

    /// Remove the drafts for every listed field.
    ///
    /// Every key is attempted even if one removal fails; the first failure is
    /// returned afterwards.
    pub fn purge<'a>(&self, field_ids: impl IntoIterator<Item = &'a str>) -> Result<(), StorageError> {
        let mut first_err = None;
        for field_id in field_ids {
            if let Err(e) = self.store.remove(&draft_key(&self.form_id, field_id)) {
                first_err.get_or_insert(e);
            }
        }
        debug!("purged drafts for form '{}'", self.form_id);
        first_err.map_or(Ok(()), Err)
    }
}

/// Site colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Body class for this theme, if any.
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some(DARK_MODE_CLASS),
        }
    }

    /// Icon on the toggle button: the theme you would switch to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "fas fa-moon",
            Theme::Dark => "fas fa-sun",
        }
    }
}

/// Persisted dark-mode flag (`"enabled"` / `"disabled"`).
pub struct ThemePreference;

impl ThemePreference {
    /// Stored theme; anything other than `"enabled"` means light.
    pub fn load(store: &dyn KeyValueStore) -> Theme {
        match store.get(DARK_MODE_KEY) {
            Ok(Some(v)) if v == "enabled" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(e) => {
                warn!("Could not read theme preference: {}", e);
                Theme::Light
            }
        }
    }

    pub fn save(store: &dyn KeyValueStore, theme: Theme) -> Result<(), StorageError> {
        let flag = match theme {
            Theme::Light => "disabled",
            Theme::Dark => "enabled",
        };
        store.set(DARK_MODE_KEY, flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drafts() -> (Rc<MemoryStore>, DraftStore) {
        let mem = Rc::new(MemoryStore::default());
        let drafts = DraftStore::new("contactForm", mem.clone());
        (mem, drafts)
    }

    #[test]
    fn draft_keys_are_namespaced_per_form_and_field() {
        assert_eq!(draft_key("contactForm", "email"), "form_contactForm_email");
    }

    #[test]
    fn drafts_store_raw_values() {
        let (mem, drafts) = drafts();
        drafts.save("name", &FieldValue::Text("Ada".into())).unwrap();
        drafts.save("terms", &FieldValue::Checked(true)).unwrap();

        assert_eq!(mem.get("form_contactForm_name").unwrap().as_deref(), Some("Ada"));
        assert_eq!(mem.get("form_contactForm_terms").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn drafts_load_in_template_shape() {
        let (_mem, drafts) = drafts();
        drafts.save("terms", &FieldValue::Checked(true)).unwrap();
        drafts.save("name", &FieldValue::Text("Ada".into())).unwrap();

        let terms = drafts.load("terms", &FieldValue::Checked(false)).unwrap();
        assert_eq!(terms, Some(FieldValue::Checked(true)));
        let name = drafts.load("name", &FieldValue::Text(String::new())).unwrap();
        assert_eq!(name, Some(FieldValue::Text("Ada".into())));
        assert_eq!(drafts.load("email", &FieldValue::Text(String::new())).unwrap(), None);
    }

    #[test]
    fn purge_removes_every_listed_key_only() {
        let (mem, drafts) = drafts();
        drafts.save("name", &FieldValue::Text("Ada".into())).unwrap();
        drafts.save("email", &FieldValue::Text("a@b.c".into())).unwrap();
        mem.set("darkMode", "enabled").unwrap();

        drafts.purge(["name", "email", "phone"]).unwrap();
        assert_eq!(mem.len(), 1);
        assert_eq!(mem.get("darkMode").unwrap().as_deref(), Some("enabled"));
    }

    #[test]
    fn theme_preference_round_trip() {
        let mem = MemoryStore::default();
        assert_eq!(ThemePreference::load(&mem), Theme::Light);

        ThemePreference::save(&mem, Theme::Dark).unwrap();
        assert_eq!(mem.get(DARK_MODE_KEY).unwrap().as_deref(), Some("enabled"));
        assert_eq!(ThemePreference::load(&mem), Theme::Dark);

        ThemePreference::save(&mem, Theme::Light).unwrap();
        assert_eq!(mem.get(DARK_MODE_KEY).unwrap().as_deref(), Some("disabled"));
        assert_eq!(ThemePreference::load(&mem), Theme::Light);
    }

    #[test]
    fn theme_toggle_and_icons() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.body_class(), Some("dark-mode"));
        assert_eq!(Theme::Light.body_class(), None);
        assert_eq!(Theme::Light.toggle_icon(), "fas fa-moon");
        assert_eq!(Theme::Dark.toggle_icon(), "fas fa-sun");
    }
}
