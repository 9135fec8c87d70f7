//! Document model: field records, card settings, and the ordered field store.
//!
//! This module defines what a spec card is made of (`FieldRecord`,
//! `CardSettings`), the attribute selector used by edit intents (`FieldAttr`),
//! and the runtime store that owns the ordered field sequence (`FieldStore`).
//! `CardDoc` bundles both halves and is the snapshot handed to observers and
//! renderers.
//!
//! Data flows into this layer from storage (JSON deserialization, see
//! [`crate::persist`]) and from user intents routed through
//! [`crate::engine::EditorCore`]. Sequence order is the display order; there
//! is no separate rank field.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    DEFAULT_COLUMNS, DEFAULT_GLOW_COLOR, DEFAULT_SHADOW_COLOR, DEFAULT_TITLE, DEFAULT_TITLE_COLOR, NEW_FIELD_COLOR,
    NEW_FIELD_LABEL, NEW_FIELD_VALUE,
};

/// Unique identifier for a field record.
pub type FieldId = Uuid;

/// Mint a fresh field identity.
#[must_use]
pub fn new_field_id() -> FieldId {
    Uuid::new_v4()
}

/// One labeled entry on the card, as held in memory and in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Identity assigned at creation. Records stored without one get a fresh id.
    #[serde(default = "new_field_id")]
    pub id: FieldId,
    /// Label text shown above the value.
    pub label: String,
    /// Value text.
    pub value: String,
    /// Primary color: cell border and label glow.
    pub color: String,
    /// Value-text glow color. Absent in records written before it existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
}

impl FieldRecord {
    /// Build a record with a fresh identity and the default shadow color.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: new_field_id(),
            label: label.into(),
            value: value.into(),
            color: color.into(),
            shadow_color: Some(DEFAULT_SHADOW_COLOR.to_owned()),
        }
    }

    /// Shadow color, or the global default when the record has none.
    #[must_use]
    pub fn shadow_color_or_default(&self) -> &str {
        self.shadow_color.as_deref().unwrap_or(DEFAULT_SHADOW_COLOR)
    }

    /// Current text of one attribute. A missing shadow reads as the default.
    #[must_use]
    pub fn attr(&self, attr: FieldAttr) -> &str {
        match attr {
            FieldAttr::Label => &self.label,
            FieldAttr::Value => &self.value,
            FieldAttr::Color => &self.color,
            FieldAttr::ShadowColor => self.shadow_color_or_default(),
        }
    }

    fn set(&mut self, attr: FieldAttr, text: String) {
        match attr {
            FieldAttr::Label => self.label = text,
            FieldAttr::Value => self.value = text,
            FieldAttr::Color => self.color = text,
            FieldAttr::ShadowColor => self.shadow_color = Some(text),
        }
    }
}

/// The editable attributes of a field record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldAttr {
    Label,
    Value,
    Color,
    ShadowColor,
}

impl FieldAttr {
    /// All attributes in editor-row order.
    pub const ALL: [FieldAttr; 4] = [Self::Label, Self::Value, Self::Color, Self::ShadowColor];

    /// Wire name, matching the stored record's key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Value => "value",
            Self::Color => "color",
            Self::ShadowColor => "shadowColor",
        }
    }

    /// Whether the attribute holds a color rather than free text.
    #[must_use]
    pub fn is_color(self) -> bool {
        matches!(self, Self::Color | Self::ShadowColor)
    }
}

impl fmt::Display for FieldAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an attribute name that doesn't exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field attribute `{0}` (expected label, value, color, or shadowColor)")]
pub struct UnknownAttr(pub String);

impl FromStr for FieldAttr {
    type Err = UnknownAttr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| UnknownAttr(s.to_owned()))
    }
}

/// Ordered sequence of field records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStore {
    fields: Vec<FieldRecord>,
}

impl FieldStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Wrap an existing sequence as-is.
    #[must_use]
    pub fn from_fields(fields: Vec<FieldRecord>) -> Self {
        Self { fields }
    }

    /// The example spec sheet every fresh session starts from.
    #[must_use]
    pub fn seeded() -> Self {
        const RED: &str = "#ff4b4b";
        const YELLOW: &str = "#ffe600";
        const GREEN: &str = "#4fff4b";
        let seed = [
            ("CPU", "Snapdragon G1 Gen 2", RED),
            ("RAM", "Opciones de 4 GB y 6 GB", RED),
            ("Almacenamiento", "Opciones de 64 GB y 128 GB", RED),
            ("Pantalla", "3.92\" OLED 1240x1080", YELLOW),
            ("Bateria", "5000 mAh (Carga de 27 W)", YELLOW),
            ("Peso", "225g (casi 8 onzas)", YELLOW),
            ("Conectividad", "WiFi 5 GHz, BT 5.1", GREEN),
            ("Sistema Operativo", "Android 14", GREEN),
            ("Otros", "Ventilador, 6 botones", GREEN),
        ];
        Self {
            fields: seed
                .into_iter()
                .map(|(label, value, color)| FieldRecord::new(label, value, color))
                .collect(),
        }
    }

    /// Records in display order.
    #[must_use]
    pub fn fields(&self) -> &[FieldRecord] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldRecord> {
        self.fields.iter()
    }

    /// Identities in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<FieldId> {
        self.fields.iter().map(|f| f.id).collect()
    }

    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&FieldRecord> {
        self.fields.iter().find(|f| f.id == *id)
    }

    /// Current position of a record, looked up by identity.
    #[must_use]
    pub fn index_of(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append a placeholder record and return its identity.
    pub fn add_field(&mut self) -> FieldId {
        let field = FieldRecord::new(NEW_FIELD_LABEL, NEW_FIELD_VALUE, NEW_FIELD_COLOR);
        let id = field.id;
        self.fields.push(field);
        id
    }

    /// Replace one attribute of the record with `id`.
    ///
    /// Returns `false` without touching anything if no record has that id.
    /// Empty text is accepted.
    pub fn update_field(&mut self, id: &FieldId, attr: FieldAttr, text: impl Into<String>) -> bool {
        let Some(field) = self.fields.iter_mut().find(|f| f.id == *id) else {
            return false;
        };
        field.set(attr, text.into());
        true
    }

    /// Remove the record with `id`, returning it if it was present.
    pub fn remove_field(&mut self, id: &FieldId) -> Option<FieldRecord> {
        let index = self.index_of(id)?;
        Some(self.fields.remove(index))
    }

    /// Move the record at `from` to `to`, shifting the records in between by
    /// one. Returns `true` if the sequence changed.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.fields.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        true
    }

    /// Consume the store, returning the records in order.
    #[must_use]
    pub fn into_fields(self) -> Vec<FieldRecord> {
        self.fields
    }
}

impl<'a> IntoIterator for &'a FieldStore {
    type Item = &'a FieldRecord;
    type IntoIter = std::slice::Iter<'a, FieldRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Card-level settings edited through the top bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSettings {
    /// Title drawn above the grid.
    pub title: String,
    /// Title text color.
    pub title_color: String,
    /// Halo drawn around the title.
    pub glow_color: String,
    /// Requested grid columns. The selector offers 1–4; anything else is
    /// drawn as four columns.
    pub columns: u32,
    /// Whether fields and columns survive a reload.
    pub remember: bool,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            title_color: DEFAULT_TITLE_COLOR.to_owned(),
            glow_color: DEFAULT_GLOW_COLOR.to_owned(),
            columns: DEFAULT_COLUMNS,
            remember: false,
        }
    }
}

/// Full editor document: the field sequence plus card settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDoc {
    pub fields: FieldStore,
    pub settings: CardSettings,
}

impl CardDoc {
    /// Seeded fields with default settings.
    #[must_use]
    pub fn seeded() -> Self {
        Self { fields: FieldStore::seeded(), settings: CardSettings::default() }
    }
}

impl Default for CardDoc {
    fn default() -> Self {
        Self::seeded()
    }
}
