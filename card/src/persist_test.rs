use super::*;
use crate::doc::{CardSettings, FieldStore};

fn remembered_doc() -> CardDoc {
    CardDoc {
        fields: FieldStore::seeded(),
        settings: CardSettings { remember: true, columns: 2, ..CardSettings::default() },
    }
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_load_missing_is_none() {
    let store = MemoryStore::new();
    assert_eq!(store.load("fields"), None);
}

#[test]
fn memory_store_save_overwrites() {
    let mut store = MemoryStore::new();
    store.save("k", "a").unwrap();
    store.save("k", "b").unwrap();
    assert_eq!(store.load("k").as_deref(), Some("b"));
    assert_eq!(store.entries().len(), 1);
}

// =============================================================
// Remember flag
// =============================================================

#[test]
fn remember_flag_only_true_literal_counts() {
    assert!(load_remember(&MemoryStore::with_entries([("rememberSettings", "true")])));
    assert!(!load_remember(&MemoryStore::with_entries([("rememberSettings", "false")])));
    assert!(!load_remember(&MemoryStore::with_entries([("rememberSettings", "TRUE")])));
    assert!(!load_remember(&MemoryStore::new()));
}

#[test]
fn save_remember_writes_literal_strings() {
    let mut store = MemoryStore::new();
    save_remember(&mut store, true).unwrap();
    assert_eq!(store.load("rememberSettings").as_deref(), Some("true"));
    save_remember(&mut store, false).unwrap();
    assert_eq!(store.load("rememberSettings").as_deref(), Some("false"));
}

// =============================================================
// save_doc / restore
// =============================================================

#[test]
fn save_doc_skipped_when_not_remembering() {
    let mut store = MemoryStore::new();
    save_doc(&mut store, &CardDoc::seeded()).unwrap();
    assert!(store.entries().is_empty());
}

#[test]
fn save_then_restore_round_trips_fields_and_columns() {
    let doc = remembered_doc();
    let mut store = MemoryStore::new();
    save_remember(&mut store, true).unwrap();
    save_doc(&mut store, &doc).unwrap();

    let restored = restore(&store).unwrap();

    assert!(restored.remember);
    assert_eq!(restored.columns, Some(2));
    assert_eq!(restored.fields.as_deref(), Some(doc.fields.fields()));
}

#[test]
fn columns_stored_as_decimal_string() {
    let mut store = MemoryStore::new();
    save_doc(&mut store, &remembered_doc()).unwrap();
    assert_eq!(store.load("columns").as_deref(), Some("2"));
}

#[test]
fn restore_ignores_stored_data_when_flag_off() {
    let mut store = MemoryStore::new();
    save_doc(&mut store, &remembered_doc()).unwrap();
    save_remember(&mut store, false).unwrap();

    let restored = restore(&store).unwrap();
    assert_eq!(restored, Restored::default());
}

#[test]
fn restore_with_flag_but_no_data_uses_defaults() {
    let store = MemoryStore::with_entries([("rememberSettings", "true")]);
    let restored = restore(&store).unwrap();
    assert!(restored.remember);
    assert_eq!(restored.fields, None);
    assert_eq!(restored.columns, None);
}

// =============================================================
// Malformed data
// =============================================================

#[test]
fn malformed_fields_is_an_error() {
    let store = MemoryStore::with_entries([("rememberSettings", "true"), ("fields", "{not json")]);
    let err = restore(&store).unwrap_err();
    assert!(matches!(err, PersistError::MalformedFields(_)), "{err}");
}

#[test]
fn fields_of_wrong_shape_is_an_error() {
    let store = MemoryStore::with_entries([("fields", r#"[{"label": 3}]"#)]);
    assert!(matches!(load_fields(&store), Err(PersistError::MalformedFields(_))));
}

#[test]
fn malformed_columns_is_an_error() {
    let store = MemoryStore::with_entries([("rememberSettings", "true"), ("columns", "three")]);
    let err = restore(&store).unwrap_err();
    assert!(matches!(err, PersistError::MalformedColumns(ref raw) if raw == "three"));
}

#[test]
fn out_of_range_columns_load_unchanged() {
    let store = MemoryStore::with_entries([("columns", "5")]);
    assert_eq!(load_columns(&store).unwrap(), Some(5));
}

// =============================================================
// Migration
// =============================================================

#[test]
fn load_backfills_missing_shadow_color() {
    let raw = r##"[{"id":"6f1c3a59-2a8e-4a44-9a43-3d2a1a6c9d10","label":"CPU","value":"X","color":"#ff4b4b"}]"##;
    let store = MemoryStore::with_entries([("fields", raw)]);
    let fields = load_fields(&store).unwrap().unwrap();
    assert_eq!(fields[0].shadow_color.as_deref(), Some("#0080ff"));
    assert_eq!(fields[0].id.to_string(), "6f1c3a59-2a8e-4a44-9a43-3d2a1a6c9d10");
}

#[test]
fn load_keeps_existing_shadow_color() {
    let raw = r##"[{"id":"6f1c3a59-2a8e-4a44-9a43-3d2a1a6c9d10","label":"CPU","value":"X","color":"#ff4b4b","shadowColor":"#00ff00"}]"##;
    let store = MemoryStore::with_entries([("fields", raw)]);
    let fields = load_fields(&store).unwrap().unwrap();
    assert_eq!(fields[0].shadow_color.as_deref(), Some("#00ff00"));
}

#[test]
fn migrate_rekeys_duplicate_ids_keeping_first() {
    let a = FieldRecord::new("A", "1", "#fff");
    let mut b = FieldRecord::new("B", "2", "#fff");
    b.id = a.id;

    let fields = migrate(vec![a.clone(), b]);

    assert_eq!(fields[0].id, a.id);
    assert_ne!(fields[1].id, a.id);
    assert_eq!(fields[1].label, "B");
}

#[test]
fn migrate_preserves_order() {
    let fields = FieldStore::seeded().into_fields();
    let ids: Vec<_> = fields.iter().map(|f| f.id).collect();
    let migrated = migrate(fields);
    assert_eq!(migrated.iter().map(|f| f.id).collect::<Vec<_>>(), ids);
}
