//! Editor core: the document, its persistence port, the drag controller, and
//! the observers that re-project the card after every change.
//!
//! ARCHITECTURE
//! ============
//! Hosts hold one [`EditorCore`] and route every user intent through it. Each
//! mutating call updates the [`CardDoc`], mirrors it to storage when the
//! remember flag is on, and then invokes every subscribed listener with the
//! new document. Listeners are plain callbacks; the browser client uses one
//! to push snapshots into a reactive signal, the CLI none at all.
//!
//! Failures that the user should see (unreadable stored data, rejected
//! writes, failed exports) are queued as [`Notice`]s for the host to display.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::fmt;

use crate::doc::{CardDoc, CardSettings, FieldAttr, FieldId, FieldRecord, FieldStore};
use crate::export::ExportError;
use crate::layout::{self, CardLayout, Point};
use crate::persist::{self, KvStore, PersistError};
use crate::reorder::{self, DragState, DropZone, ReorderController};

/// Callback invoked with the document after each change.
pub type Listener = Box<dyn Fn(&CardDoc)>;

/// Handle returned by [`EditorCore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// User-visible problems raised while editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Stored state could not be read; the editor started from defaults.
    RestoreFailed(String),
    /// A write to storage was rejected.
    SaveFailed(String),
    /// An image export did not produce a download.
    ExportFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RestoreFailed(why) => write!(f, "Saved settings could not be loaded; using defaults ({why})"),
            Self::SaveFailed(why) => write!(f, "Settings could not be saved ({why})"),
            Self::ExportFailed(why) => write!(f, "Image export failed ({why})"),
        }
    }
}

/// Owns the editor document and applies every intent to it.
pub struct EditorCore<S> {
    doc: CardDoc,
    store: S,
    drag: ReorderController,
    listeners: Vec<(Subscription, Listener)>,
    next_subscription: u64,
    notices: Vec<Notice>,
}

impl<S: KvStore> EditorCore<S> {
    /// Start a session from `store`.
    ///
    /// Each stored entry is read on its own. An unreadable field list or
    /// column count is replaced by its default and reported as
    /// [`Notice::RestoreFailed`], while the entries that did parse are kept.
    /// Nothing is written back until the first change, so a bad entry only
    /// gets overwritten by a real edit.
    pub fn open(store: S) -> Self {
        let (doc, notices) = recover_doc(&store);
        let persist_doc = notices.is_empty();
        Self::start(doc, store, notices, persist_doc)
    }

    /// Start a session from `store`, failing on unreadable stored state.
    ///
    /// # Errors
    ///
    /// Returns the [`PersistError`] raised while reading `store`.
    pub fn open_strict(store: S) -> Result<Self, PersistError> {
        let doc = restore_doc(&store)?;
        Ok(Self::start(doc, store, Vec::new(), true))
    }

    fn start(doc: CardDoc, store: S, notices: Vec<Notice>, persist_doc: bool) -> Self {
        let mut core = Self {
            doc,
            store,
            drag: ReorderController::new(),
            listeners: Vec::new(),
            next_subscription: 0,
            notices,
        };
        let remember = core.doc.settings.remember;
        core.write(|store, _| persist::save_remember(store, remember));
        if persist_doc {
            core.write(persist::save_doc);
        }
        core
    }

    // --- Queries ---

    #[must_use]
    pub fn doc(&self) -> &CardDoc {
        &self.doc
    }

    #[must_use]
    pub fn fields(&self) -> &FieldStore {
        &self.doc.fields
    }

    #[must_use]
    pub fn settings(&self) -> &CardSettings {
        &self.doc.settings
    }

    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&FieldRecord> {
        self.doc.fields.get(id)
    }

    /// Current card geometry.
    #[must_use]
    pub fn layout(&self) -> CardLayout {
        layout::project(&self.doc)
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    // --- Observers ---

    /// Register a listener called with the document after every change.
    pub fn subscribe(&mut self, listener: impl Fn(&CardDoc) + 'static) -> Subscription {
        let sub = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((sub, Box::new(listener)));
        sub
    }

    /// Drop a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(s, _)| *s != sub);
        self.listeners.len() != before
    }

    // --- Field intents ---

    /// Append a placeholder field.
    pub fn add_field(&mut self) -> FieldId {
        let id = self.doc.fields.add_field();
        log::debug!("field added: {id}");
        self.commit(true);
        id
    }

    /// Replace one attribute of a field. Unknown ids are ignored.
    pub fn update_field(&mut self, id: &FieldId, attr: FieldAttr, text: impl Into<String>) -> bool {
        if !self.doc.fields.update_field(id, attr, text) {
            return false;
        }
        self.commit(true);
        true
    }

    /// Delete a field. Unknown ids are ignored.
    pub fn remove_field(&mut self, id: &FieldId) -> bool {
        if self.doc.fields.remove_field(id).is_none() {
            return false;
        }
        log::debug!("field removed: {id}");
        self.commit(true);
        true
    }

    /// Move the field at `from` to `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if !self.doc.fields.reorder(from, to) {
            return false;
        }
        self.commit(true);
        true
    }

    /// Move `active` to the current position of `over`.
    pub fn move_field(&mut self, active: &FieldId, over: &FieldId) -> bool {
        let Some((from, to)) = reorder::apply_move(&mut self.doc.fields, active, over) else {
            return false;
        };
        log::debug!("field moved: {active} {from} -> {to}");
        self.commit(true);
        true
    }

    // --- Drag gestures ---

    pub fn drag_start(&mut self, id: FieldId) {
        self.drag.start(id);
    }

    /// Record a drop target already resolved by the host.
    pub fn drag_over(&mut self, target: Option<FieldId>) {
        self.drag.set_over(target);
    }

    /// Resolve the drop target from the pointer and the rows' rects.
    pub fn drag_hover(&mut self, pointer: Point, zones: &[DropZone]) -> Option<FieldId> {
        self.drag.hover(pointer, zones)
    }

    /// Release the drag. Returns `true` if the order changed.
    pub fn drag_end(&mut self) -> bool {
        match self.drag.end() {
            Some(m) => self.move_field(&m.active, &m.over),
            None => false,
        }
    }

    pub fn drag_cancel(&mut self) {
        self.drag.cancel();
    }

    // --- Card settings ---

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.doc.settings.title = title.into();
        self.commit(false);
    }

    pub fn set_title_color(&mut self, color: impl Into<String>) {
        self.doc.settings.title_color = color.into();
        self.commit(false);
    }

    pub fn set_glow_color(&mut self, color: impl Into<String>) {
        self.doc.settings.glow_color = color.into();
        self.commit(false);
    }

    /// Change the requested column count. Stored as given; the layout maps
    /// unsupported counts to four columns.
    pub fn set_columns(&mut self, columns: u32) {
        self.doc.settings.columns = columns;
        self.commit(true);
    }

    /// Turn the remember flag on or off. The flag itself is always stored;
    /// switching it on also stores the current fields and columns.
    pub fn set_remember(&mut self, remember: bool) {
        self.doc.settings.remember = remember;
        self.write(|store, _| persist::save_remember(store, remember));
        self.commit(true);
    }

    // --- Notices ---

    /// Queue an export failure for display.
    pub fn report_export_failure(&mut self, err: &ExportError) {
        log::error!("export failed: {err}");
        self.notices.push(Notice::ExportFailed(err.to_string()));
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Remove and return all queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // --- Internals ---

    fn commit(&mut self, persist_doc: bool) {
        if persist_doc {
            self.write(persist::save_doc);
        }
        for (_, listener) in &self.listeners {
            listener(&self.doc);
        }
    }

    fn write(&mut self, op: impl FnOnce(&mut S, &CardDoc) -> Result<(), PersistError>) {
        if let Err(err) = op(&mut self.store, &self.doc) {
            log::warn!("storage write failed: {err}");
            self.notices.push(Notice::SaveFailed(err.to_string()));
        }
    }
}

/// Build the starting document from stored state.
fn restore_doc(store: &impl KvStore) -> Result<CardDoc, PersistError> {
    let restored = persist::restore(store)?;
    let mut doc = CardDoc::seeded();
    doc.settings.remember = restored.remember;
    if let Some(fields) = restored.fields {
        doc.fields = FieldStore::from_fields(fields);
    }
    if let Some(columns) = restored.columns {
        doc.settings.columns = columns;
    }
    Ok(doc)
}

/// Build the starting document key by key, keeping the default for any
/// entry that can't be read.
fn recover_doc(store: &impl KvStore) -> (CardDoc, Vec<Notice>) {
    let mut doc = CardDoc::seeded();
    doc.settings.remember = persist::load_remember(store);
    if !doc.settings.remember {
        return (doc, Vec::new());
    }

    let mut notices = Vec::new();
    match persist::load_fields(store) {
        Ok(Some(fields)) => doc.fields = FieldStore::from_fields(fields),
        Ok(None) => {}
        Err(err) => notices.push(discarded(&err)),
    }
    match persist::load_columns(store) {
        Ok(Some(columns)) => doc.settings.columns = columns,
        Ok(None) => {}
        Err(err) => notices.push(discarded(&err)),
    }
    (doc, notices)
}

fn discarded(err: &PersistError) -> Notice {
    log::warn!("discarding stored card entry: {err}");
    Notice::RestoreFailed(err.to_string())
}
