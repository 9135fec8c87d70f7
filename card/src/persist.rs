//! Persistence port: loading and saving editor state through a string
//! key-value store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The editor never talks to a storage backend directly. Hosts inject a
//! [`KvStore`]: the browser client wraps `window.localStorage`, the CLI a JSON
//! file, tests a [`MemoryStore`]. Three keys are used:
//!
//! | Key | Value |
//! |-----|-------|
//! | `fields` | JSON array of [`FieldRecord`]s, in display order |
//! | `columns` | decimal column count |
//! | `rememberSettings` | `"true"` or `"false"` |
//!
//! Fields and columns are only read back when the remember flag is `"true"`.
//! Restored records go through [`migrate`] before first use.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::{BTreeMap, HashSet};

use crate::consts::{COLUMNS_KEY, DEFAULT_SHADOW_COLOR, FIELDS_KEY, REMEMBER_KEY};
use crate::doc::{CardDoc, FieldRecord, new_field_id};

/// Errors raised while reading or writing stored state.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("stored `fields` is not a valid field list: {0}")]
    MalformedFields(#[source] serde_json::Error),
    #[error("stored `columns` is not a column count: {0:?}")]
    MalformedColumns(String),
    #[error("failed to encode fields: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// String key-value storage backend.
pub trait KvStore {
    /// Value stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Backend`] when the backend rejects the write.
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory [`KvStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, handy for simulating a previous session.
    #[must_use]
    pub fn with_entries<K: Into<String>, V: Into<String>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self { entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl KvStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// State recovered from storage. `None` means "not stored, use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restored {
    pub remember: bool,
    pub fields: Option<Vec<FieldRecord>>,
    pub columns: Option<u32>,
}

/// Read the remember flag. Anything other than `"true"` counts as off.
pub fn load_remember(store: &impl KvStore) -> bool {
    store.load(REMEMBER_KEY).as_deref() == Some("true")
}

/// Read and migrate the stored field list.
///
/// # Errors
///
/// Returns [`PersistError::MalformedFields`] if the stored text is not a JSON
/// array of field records.
pub fn load_fields(store: &impl KvStore) -> Result<Option<Vec<FieldRecord>>, PersistError> {
    let Some(raw) = store.load(FIELDS_KEY) else {
        return Ok(None);
    };
    let fields: Vec<FieldRecord> = serde_json::from_str(&raw).map_err(PersistError::MalformedFields)?;
    Ok(Some(migrate(fields)))
}

/// Read the stored column count.
///
/// # Errors
///
/// Returns [`PersistError::MalformedColumns`] if the stored text is not a
/// non-negative integer.
pub fn load_columns(store: &impl KvStore) -> Result<Option<u32>, PersistError> {
    let Some(raw) = store.load(COLUMNS_KEY) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|_| PersistError::MalformedColumns(raw))
}

/// Read everything a new session needs.
///
/// Fields and columns are only consulted when the remember flag is on.
///
/// # Errors
///
/// Propagates [`load_fields`] and [`load_columns`] errors.
pub fn restore(store: &impl KvStore) -> Result<Restored, PersistError> {
    let remember = load_remember(store);
    if !remember {
        return Ok(Restored::default());
    }
    Ok(Restored { remember, fields: load_fields(store)?, columns: load_columns(store)? })
}

/// Write the field list and column count if the document asks to be
/// remembered. Does nothing otherwise.
///
/// # Errors
///
/// Returns [`PersistError::Encode`] or a backend error.
pub fn save_doc(store: &mut impl KvStore, doc: &CardDoc) -> Result<(), PersistError> {
    if !doc.settings.remember {
        return Ok(());
    }
    let fields = serde_json::to_string(doc.fields.fields()).map_err(PersistError::Encode)?;
    store.save(FIELDS_KEY, &fields)?;
    store.save(COLUMNS_KEY, &doc.settings.columns.to_string())
}

/// Write the remember flag itself, regardless of its value.
///
/// # Errors
///
/// Returns a backend error.
pub fn save_remember(store: &mut impl KvStore, remember: bool) -> Result<(), PersistError> {
    store.save(REMEMBER_KEY, if remember { "true" } else { "false" })
}

/// One-time upgrade pass for records written by older sessions.
///
/// Missing shadow colors get the global default, and any identity seen
/// earlier in the list is replaced with a fresh one so every record stays
/// uniquely addressable.
#[must_use]
pub fn migrate(fields: Vec<FieldRecord>) -> Vec<FieldRecord> {
    let mut seen = HashSet::with_capacity(fields.len());
    fields
        .into_iter()
        .map(|mut field| {
            if field.shadow_color.is_none() {
                field.shadow_color = Some(DEFAULT_SHADOW_COLOR.to_owned());
            }
            if !seen.insert(field.id) {
                let fresh = new_field_id();
                log::warn!("duplicate stored field id {}; re-keyed as {fresh}", field.id);
                field.id = fresh;
                seen.insert(fresh);
            }
            field
        })
        .collect()
}
