use std::collections::HashSet;

use super::*;

fn labels(store: &FieldStore) -> Vec<&str> {
    store.iter().map(|f| f.label.as_str()).collect()
}

fn abc() -> (FieldStore, FieldId, FieldId, FieldId) {
    let a = FieldRecord::new("A", "1", "#ff0000");
    let b = FieldRecord::new("B", "2", "#00ff00");
    let c = FieldRecord::new("C", "3", "#0000ff");
    let ids = (a.id, b.id, c.id);
    (FieldStore::from_fields(vec![a, b, c]), ids.0, ids.1, ids.2)
}

// =============================================================
// Seeded set
// =============================================================

#[test]
fn seeded_has_nine_fields_in_sheet_order() {
    let store = FieldStore::seeded();
    assert_eq!(store.len(), 9);
    assert_eq!(
        labels(&store),
        [
            "CPU",
            "RAM",
            "Almacenamiento",
            "Pantalla",
            "Bateria",
            "Peso",
            "Conectividad",
            "Sistema Operativo",
            "Otros"
        ]
    );
}

#[test]
fn seeded_fields_carry_default_shadow() {
    let store = FieldStore::seeded();
    assert!(store.iter().all(|f| f.shadow_color.as_deref() == Some(DEFAULT_SHADOW_COLOR)));
}

#[test]
fn seeded_ids_are_unique_and_fresh_per_call() {
    let a = FieldStore::seeded();
    let b = FieldStore::seeded();
    let ids_a: HashSet<_> = a.ids().into_iter().collect();
    assert_eq!(ids_a.len(), 9);
    assert!(b.ids().iter().all(|id| !ids_a.contains(id)));
}

// =============================================================
// add_field
// =============================================================

#[test]
fn add_field_appends_placeholder_after_seeded_set() {
    let mut store = FieldStore::seeded();
    let before = store.clone();

    let id = store.add_field();

    assert_eq!(store.len(), 10);
    let last = &store.fields()[9];
    assert_eq!(last.id, id);
    assert_eq!(last.label, "Nuevo");
    assert_eq!(last.value, "Valor");
    assert_eq!(last.color, NEW_FIELD_COLOR);
    assert_eq!(last.shadow_color.as_deref(), Some(DEFAULT_SHADOW_COLOR));
    assert_eq!(&store.fields()[..9], before.fields());
}

#[test]
fn add_and_remove_never_reuse_identities() {
    let mut store = FieldStore::new();
    let mut seen = HashSet::new();
    for round in 0..20 {
        let id = store.add_field();
        assert!(seen.insert(id), "identity reused on round {round}");
        if round % 3 == 0 {
            let first = store.fields()[0].id;
            store.remove_field(&first);
        }
    }
    let remaining: HashSet<_> = store.ids().into_iter().collect();
    assert_eq!(remaining.len(), store.len());
    assert!(remaining.is_subset(&seen));
}

// =============================================================
// update_field
// =============================================================

#[test]
fn update_field_changes_exactly_one_attribute() {
    let (mut store, a, b, _) = abc();
    let before = store.clone();

    assert!(store.update_field(&b, FieldAttr::Value, "22"));

    assert_eq!(store.ids(), before.ids());
    let updated = store.get(&b).cloned();
    let mut expected = before.get(&b).cloned();
    if let Some(e) = expected.as_mut() {
        e.value = "22".to_owned();
    }
    assert_eq!(updated, expected);
    assert_eq!(store.get(&a), before.get(&a));
}

#[test]
fn update_field_each_attribute() {
    let (mut store, a, _, _) = abc();
    store.update_field(&a, FieldAttr::Label, "Label");
    store.update_field(&a, FieldAttr::Color, "#123456");
    store.update_field(&a, FieldAttr::ShadowColor, "#654321");
    let field = store.get(&a).cloned().unwrap_or_else(|| FieldRecord::new("", "", ""));
    assert_eq!(field.label, "Label");
    assert_eq!(field.value, "1");
    assert_eq!(field.color, "#123456");
    assert_eq!(field.shadow_color.as_deref(), Some("#654321"));
}

#[test]
fn update_field_accepts_empty_text() {
    let (mut store, a, _, _) = abc();
    assert!(store.update_field(&a, FieldAttr::Label, ""));
    assert_eq!(store.get(&a).map(|f| f.label.as_str()), Some(""));
}

#[test]
fn update_field_missing_id_is_noop() {
    let (mut store, _, _, _) = abc();
    let before = store.clone();
    assert!(!store.update_field(&new_field_id(), FieldAttr::Label, "X"));
    assert_eq!(store, before);
}

// =============================================================
// remove_field
// =============================================================

#[test]
fn remove_field_keeps_other_ids() {
    let (mut store, a, b, c) = abc();
    let removed = store.remove_field(&b);
    assert_eq!(removed.map(|f| f.label), Some("B".to_owned()));
    assert_eq!(store.ids(), vec![a, c]);
}

#[test]
fn remove_field_missing_id_is_noop() {
    let (mut store, _, _, _) = abc();
    let before = store.clone();
    assert!(store.remove_field(&new_field_id()).is_none());
    assert_eq!(store, before);
}

// =============================================================
// reorder
// =============================================================

#[test]
fn reorder_first_to_last() {
    let (mut store, a, b, c) = abc();
    assert!(store.reorder(0, 2));
    assert_eq!(store.ids(), vec![b, c, a]);
}

#[test]
fn reorder_last_to_first() {
    let (mut store, a, b, c) = abc();
    assert!(store.reorder(2, 0));
    assert_eq!(store.ids(), vec![c, a, b]);
}

#[test]
fn reorder_then_inverse_restores_order() {
    let mut store = FieldStore::seeded();
    let original = store.ids();
    for (i, j) in [(0, 8), (3, 5), (7, 1), (4, 4)] {
        store.reorder(i, j);
        store.reorder(j, i);
        assert_eq!(store.ids(), original, "reorder({i}, {j}) round trip");
    }
}

#[test]
fn reorder_preserves_length_and_identity_multiset() {
    let mut store = FieldStore::seeded();
    let mut expected: Vec<_> = store.ids();
    expected.sort();
    for (i, j) in [(0, 8), (8, 0), (2, 6), (5, 1), (1, 2)] {
        store.reorder(i, j);
        let mut ids = store.ids();
        ids.sort();
        assert_eq!(ids, expected);
        assert_eq!(store.len(), 9);
    }
}

#[test]
fn reorder_out_of_range_is_noop() {
    let (mut store, a, b, c) = abc();
    assert!(!store.reorder(0, 3));
    assert!(!store.reorder(5, 0));
    assert!(!store.reorder(1, 1));
    assert_eq!(store.ids(), vec![a, b, c]);
}

// =============================================================
// FieldAttr
// =============================================================

#[test]
fn field_attr_parses_wire_names() {
    for attr in FieldAttr::ALL {
        assert_eq!(attr.as_str().parse::<FieldAttr>(), Ok(attr));
    }
    assert_eq!("shadowColor".parse::<FieldAttr>(), Ok(FieldAttr::ShadowColor));
}

#[test]
fn field_attr_rejects_unknown_name() {
    let err = "shadow".parse::<FieldAttr>();
    assert_eq!(err, Err(UnknownAttr("shadow".to_owned())));
}

#[test]
fn field_attr_color_classification() {
    assert!(FieldAttr::Color.is_color());
    assert!(FieldAttr::ShadowColor.is_color());
    assert!(!FieldAttr::Label.is_color());
    assert!(!FieldAttr::Value.is_color());
}

// =============================================================
// FieldRecord serde
// =============================================================

#[test]
fn field_record_serializes_camel_case() -> Result<(), serde_json::Error> {
    let field = FieldRecord::new("CPU", "X", "#ff4b4b");
    let json = serde_json::to_value(&field)?;
    assert_eq!(json["shadowColor"], "#0080ff");
    assert_eq!(json["id"], field.id.to_string());
    Ok(())
}

#[test]
fn field_record_without_shadow_omits_key() -> Result<(), serde_json::Error> {
    let mut field = FieldRecord::new("CPU", "X", "#ff4b4b");
    field.shadow_color = None;
    let json = serde_json::to_value(&field)?;
    assert!(json.get("shadowColor").is_none());
    assert_eq!(field.shadow_color_or_default(), DEFAULT_SHADOW_COLOR);
    assert_eq!(field.attr(FieldAttr::ShadowColor), DEFAULT_SHADOW_COLOR);
    Ok(())
}

#[test]
fn field_record_missing_id_gets_fresh_identity() -> Result<(), serde_json::Error> {
    let raw = r##"[{"label":"A","value":"1","color":"#fff"},{"label":"B","value":"2","color":"#000"}]"##;
    let fields: Vec<FieldRecord> = serde_json::from_str(raw)?;
    assert_ne!(fields[0].id, fields[1].id);
    Ok(())
}

// =============================================================
// Settings
// =============================================================

#[test]
fn card_settings_defaults() {
    let s = CardSettings::default();
    assert_eq!(s.title, "Retroid Pocket Classic");
    assert_eq!(s.title_color, "#ff00ff");
    assert_eq!(s.glow_color, "#0080ff");
    assert_eq!(s.columns, 3);
    assert!(!s.remember);
}

#[test]
fn card_doc_default_is_seeded() {
    let doc = CardDoc::default();
    assert_eq!(doc.fields.len(), 9);
    assert_eq!(doc.settings, CardSettings::default());
}
