mod support;

use support::{draft, student, teacher};
use word_weaver::snapshot::{naming, SNAPSHOTS};
use word_weaver::{
    Catalog, CatalogSnapshot, DocumentStore, InMemoryDocumentStore, SnapshotError,
    SnapshotManager, WordCard,
};

fn sorted(mut words: Vec<WordCard>) -> Vec<WordCard> {
    words.sort_by(|a, b| a.id.cmp(&b.id));
    words
}

fn snapshot_doc(name: &str, key: &str, words: Vec<WordCard>) -> CatalogSnapshot {
    CatalogSnapshot {
        collection_name: name.to_string(),
        timestamp_key: key.to_string(),
        words,
    }
}

#[test]
fn startup_seeds_empty_catalog() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());

    let report = manager.run_startup();
    assert_eq!(report.seeded, 33);
    assert_eq!(report.preserved, 0);
    // Nothing existed to back up.
    assert!(report.snapshot.is_none());

    assert_eq!(Catalog::new(store).word_count().unwrap(), 33);
}

#[test]
fn startup_preserves_existing_catalog() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());
    let catalog = Catalog::new(store);

    manager.run_startup();
    let victim = catalog.words().unwrap()[0].id.clone();
    catalog.delete_word(&teacher("t-1"), &victim).unwrap();

    let report = manager.run_startup();
    assert_eq!(report.seeded, 0);
    assert_eq!(report.preserved, 32);
    assert_eq!(catalog.word_count().unwrap(), 32);

    // The existing catalog was backed up before anything else.
    let snapshot = report.snapshot.unwrap();
    assert!(snapshot.collection_name.starts_with(naming::SNAPSHOT_PREFIX));
    assert_eq!(snapshot.word_count, 32);
}

#[test]
fn manual_snapshot_of_empty_catalog_fails_cleanly() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());

    let err = manager.create_snapshot(&teacher("t-1")).unwrap_err();
    assert_eq!(err, SnapshotError::EmptyCatalog);

    // No snapshot document was written.
    assert_eq!(
        store
            .count_documents::<CatalogSnapshot>(SNAPSHOTS, &|_| true)
            .unwrap(),
        0
    );
}

#[test]
fn snapshot_operations_require_teacher() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store);
    manager.run_startup();

    assert!(matches!(
        manager.create_snapshot(&student("s-1")).unwrap_err(),
        SnapshotError::Unauthorized(_)
    ));
    assert!(matches!(
        manager.list_snapshots(&student("s-1")).unwrap_err(),
        SnapshotError::Unauthorized(_)
    ));
    assert!(matches!(
        manager
            .restore_snapshot(&student("s-1"), "words_backup_20240101_000000")
            .unwrap_err(),
        SnapshotError::Unauthorized(_)
    ));
}

#[test]
fn round_trip_restores_identical_word_set() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());
    let catalog = Catalog::new(store);
    let t = teacher("t-1");

    manager.run_startup();
    let before = sorted(catalog.words().unwrap());

    let descriptor = manager.create_snapshot(&t).unwrap();
    assert_eq!(descriptor.word_count, 33);

    // Mutate the catalog past recognition.
    let victim = before[0].id.clone();
    catalog.delete_word(&t, &victim).unwrap();
    catalog.create_word(&t, draft("novus")).unwrap();
    assert_ne!(sorted(catalog.words().unwrap()), before);

    let report = manager
        .restore_snapshot(&t, &descriptor.collection_name)
        .unwrap();
    assert_eq!(report.word_count, 33);
    assert_eq!(report.restored_from, descriptor.collection_name);
    assert_eq!(sorted(catalog.words().unwrap()), before);
}

#[test]
fn restore_takes_a_pre_restore_safety_snapshot() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());
    let catalog = Catalog::new(store);
    let t = teacher("t-1");

    manager.run_startup();
    let descriptor = manager.create_snapshot(&t).unwrap();
    catalog.create_word(&t, draft("novus")).unwrap();

    let report = manager
        .restore_snapshot(&t, &descriptor.collection_name)
        .unwrap();

    let safety = report.pre_restore_snapshot.unwrap();
    assert!(safety.starts_with(naming::PRE_RESTORE_PREFIX));

    // The safety snapshot holds the 34-word pre-restore catalog and is
    // itself restorable.
    let listed = manager.list_snapshots(&t).unwrap();
    let entry = listed
        .iter()
        .find(|d| d.collection_name == safety)
        .unwrap();
    assert_eq!(entry.word_count, 34);

    manager.restore_snapshot(&t, &safety).unwrap();
    assert_eq!(catalog.word_count().unwrap(), 34);
}

#[test]
fn restore_of_empty_catalog_skips_the_safety_snapshot() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());

    store
        .insert_one(
            SNAPSHOTS,
            &snapshot_doc(
                "words_backup_20240101_000000",
                "20240101_000000",
                word_weaver::catalog::default_cards(),
            ),
        )
        .unwrap();

    let report = manager
        .restore_snapshot(&teacher("t-1"), "words_backup_20240101_000000")
        .unwrap();
    assert_eq!(report.word_count, 33);
    assert!(report.pre_restore_snapshot.is_none());
}

#[test]
fn restore_rejects_names_outside_the_convention() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());
    let catalog = Catalog::new(store);
    let t = teacher("t-1");

    manager.run_startup();

    let err = manager.restore_snapshot(&t, "bogus_name").unwrap_err();
    assert_eq!(err, SnapshotError::SnapshotNotFound("bogus_name".into()));
    assert_eq!(catalog.word_count().unwrap(), 33);
}

#[test]
fn restore_rejects_missing_snapshot() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());
    let catalog = Catalog::new(store);
    let t = teacher("t-1");

    manager.run_startup();

    let err = manager
        .restore_snapshot(&t, "words_backup_19990101_000000")
        .unwrap_err();
    assert!(matches!(err, SnapshotError::SnapshotNotFound(_)));
    assert_eq!(catalog.word_count().unwrap(), 33);
}

#[test]
fn restore_of_empty_snapshot_is_non_destructive() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());
    let catalog = Catalog::new(store.clone());
    let t = teacher("t-1");

    manager.run_startup();
    store
        .insert_one(
            SNAPSHOTS,
            &snapshot_doc("words_backup_20240101_000000", "20240101_000000", vec![]),
        )
        .unwrap();

    let err = manager
        .restore_snapshot(&t, "words_backup_20240101_000000")
        .unwrap_err();
    assert!(matches!(err, SnapshotError::EmptySnapshot(_)));
    assert_eq!(catalog.word_count().unwrap(), 33);

    // The safety snapshot was still taken before the target was inspected.
    assert!(manager
        .list_snapshots(&t)
        .unwrap()
        .iter()
        .any(|d| d.collection_name.starts_with(naming::PRE_RESTORE_PREFIX)));
}

#[test]
fn listing_is_sorted_by_recency_and_idempotent() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());
    let t = teacher("t-1");

    manager.run_startup();
    let cards = word_weaver::catalog::default_cards();
    for key in ["20240101_000000", "20231225_120000", "20240309_070501"] {
        store
            .insert_one(
                SNAPSHOTS,
                &snapshot_doc(&format!("words_backup_{}", key), key, cards.clone()),
            )
            .unwrap();
    }
    // A current manual snapshot sorts above the historical keys.
    let newest = manager.create_snapshot(&t).unwrap();

    let listed = manager.list_snapshots(&t).unwrap();
    assert_eq!(listed.len(), 4);
    assert_eq!(listed[0].collection_name, newest.collection_name);
    assert_eq!(listed[1].timestamp_key, "20240309_070501");
    assert_eq!(listed[2].timestamp_key, "20240101_000000");
    assert_eq!(listed[3].timestamp_key, "20231225_120000");
    assert_eq!(listed[1].readable_time, "2024-03-09 07:05:01");

    assert_eq!(manager.list_snapshots(&t).unwrap(), listed);
}

#[test]
fn listing_tolerates_malformed_timestamp_keys() {
    let store = InMemoryDocumentStore::new();
    let manager = SnapshotManager::new(store.clone());
    let t = teacher("t-1");

    manager.run_startup();
    store
        .insert_one(
            SNAPSHOTS,
            &snapshot_doc(
                "words_backup_not_a_timestamp",
                "not_a_timestamp",
                word_weaver::catalog::default_cards(),
            ),
        )
        .unwrap();

    let listed = manager.list_snapshots(&t).unwrap();
    let entry = listed
        .iter()
        .find(|d| d.collection_name == "words_backup_not_a_timestamp")
        .unwrap();
    assert_eq!(entry.readable_time, "not_a_timestamp");
}
