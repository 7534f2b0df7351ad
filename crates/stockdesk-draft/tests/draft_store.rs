//! Draft store behavior against a real temporary directory.

use std::fs;

use chrono::{Duration, TimeZone, Utc};
use stockdesk_core::{DiscountType, Money, OrderForm};
use stockdesk_draft::{DeskConfig, DraftError, DraftStore};
use tempfile::TempDir;

fn sample_form(customer: &str) -> OrderForm {
    let mut form = OrderForm::new();
    form.set_customer(customer);
    form.add_item("p-1", "Widget", 100.0, 2).unwrap();
    form.add_item("p-2", "Gadget", 50.0, 1).unwrap();
    form.set_discount(DiscountType::Percentage, "10");
    form
}

fn open_store(max: usize) -> (TempDir, DraftStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = DraftStore::open(dir.path().join("drafts"), max).unwrap();
    (dir, store)
}

#[test]
fn save_then_load_returns_identical_form() {
    let (_dir, store) = open_store(10);
    let mut form = sample_form("cus_1");
    form.set_quantity("p-2", "3.").unwrap();

    let draft = store.save(Some("restock"), &form).unwrap();
    assert_eq!(draft.id, "restock");

    let loaded = store.load("restock").unwrap().unwrap();
    assert_eq!(loaded.form, form);
    assert_eq!(loaded.form.pricing(), form.pricing());
}

#[test]
fn save_without_id_generates_one() {
    let (_dir, store) = open_store(10);
    let draft = store.save(None, &sample_form("cus_1")).unwrap();
    assert!(!draft.id.is_empty());
    assert!(store.load(&draft.id).unwrap().is_some());
}

#[test]
fn load_missing_is_none() {
    let (_dir, store) = open_store(10);
    assert!(store.load("nothing-here").unwrap().is_none());
}

#[test]
fn rejects_unsafe_ids() {
    let (_dir, store) = open_store(10);
    let form = sample_form("cus_1");
    assert!(matches!(
        store.save(Some("../escape"), &form),
        Err(DraftError::InvalidDraftId(_))
    ));
    assert!(store.load("a/b").is_err());
    assert!(store.discard("..").is_err());
}

#[test]
fn list_is_newest_first_with_totals() {
    let (_dir, store) = open_store(10);
    let earlier = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    store
        .save_at(Some("older"), &sample_form("cus_1"), earlier)
        .unwrap();
    store
        .save_at(Some("newer"), &OrderForm::new(), earlier + Duration::minutes(1))
        .unwrap();

    let list = store.list().unwrap();
    let ids: Vec<&str> = list.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["newer", "older"]);

    assert_eq!(list[1].customer_id, "cus_1");
    assert_eq!(list[1].item_count, 2);
    assert_eq!(list[1].total_amount, Money::from_major(225));
    assert_eq!(list[1].saved_at, earlier);

    let json = serde_json::to_value(&list[1]).unwrap();
    assert_eq!(json["totalAmount"], 225.0);
}

#[test]
fn list_skips_corrupt_files() {
    let (_dir, store) = open_store(10);
    store.save(Some("good"), &sample_form("cus_1")).unwrap();
    fs::write(store.dir().join("broken.json"), b"{ not json").unwrap();
    fs::write(store.dir().join("notes.txt"), b"ignored").unwrap();

    let list = store.list().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "good");

    assert!(matches!(
        store.load("broken"),
        Err(DraftError::Serialization(_))
    ));
}

#[test]
fn discard_removes_draft() {
    let (_dir, store) = open_store(10);
    store.save(Some("temp"), &sample_form("cus_1")).unwrap();

    assert!(store.discard("temp").unwrap());
    assert!(!store.discard("temp").unwrap());
    assert!(store.load("temp").unwrap().is_none());
}

#[test]
fn limit_applies_to_new_drafts_only() {
    let (_dir, store) = open_store(2);
    store.save(Some("a"), &sample_form("cus_1")).unwrap();
    store.save(Some("b"), &sample_form("cus_2")).unwrap();

    assert!(matches!(
        store.save(Some("c"), &sample_form("cus_3")),
        Err(DraftError::LimitReached { max: 2 })
    ));

    // overwriting is still fine
    store.save(Some("a"), &OrderForm::new()).unwrap();
    assert_eq!(store.load("a").unwrap().unwrap().form, OrderForm::new());
}

#[test]
fn store_from_config_uses_draft_dir() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DeskConfig::default();
    config.drafts.dir = Some(dir.path().join("from-config"));
    config.drafts.max_drafts = 3;

    let store = DraftStore::from_config(&config).unwrap();
    assert_eq!(store.dir(), dir.path().join("from-config"));
    assert!(store.dir().is_dir());
}
