//! Per-mode high scores and the key-value backend they persist to.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::HIGH_SCORES_KEY;
use crate::error::StoreError;
use crate::mode::Mode;

/// String key-value backend (browser `localStorage` shaped).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Best score per mode, persisted as `{easy, medium, hard, extreme}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub extreme: u64,
}

impl HighScores {
    pub fn get(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Easy => self.easy,
            Mode::Medium => self.medium,
            Mode::Hard => self.hard,
            Mode::Extreme => self.extreme,
        }
    }

    fn slot_mut(&mut self, mode: Mode) -> &mut u64 {
        match mode {
            Mode::Easy => &mut self.easy,
            Mode::Medium => &mut self.medium,
            Mode::Hard => &mut self.hard,
            Mode::Extreme => &mut self.extreme,
        }
    }

    /// Raise `mode`'s best to `score`; true when it improved.
    pub fn record(&mut self, mode: Mode, score: u64) -> bool {
        let slot = self.slot_mut(mode);
        if score > *slot {
            *slot = score;
            true
        } else {
            false
        }
    }

    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read from `store`; missing or unreadable data yields all zeros.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get_item(HIGH_SCORES_KEY).and_then(|raw| raw.map(|r| Self::parse(&r)).transpose()) {
            Ok(found) => found.unwrap_or_default(),
            Err(err) => {
                log::warn!("ignoring stored high scores: {err}");
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let raw = serde_json::to_string(self)?;
        store.set_item(HIGH_SCORES_KEY, &raw)
    }
}

/// In-memory backend; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.items.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`. Resolved lazily so private-mode browsers that
/// refuse storage only lose persistence.
#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or(StoreError::Unavailable)?
            .local_storage()
            .map_err(|e| StoreError::Backend(format!("{e:?}")))?
            .ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}
