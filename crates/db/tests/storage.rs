//! Backing-file behaviour: round trips, failure modes, id strategies and
//! write coordination.

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use anidex_core::error::CoreError;
use anidex_db::collection::JsonCollection;
use anidex_db::models::director::{CreateDirector, Director};
use anidex_db::models::studio::Studio;
use anidex_db::{
    Catalog, CollectionStore, DbError, IdStrategy, StoreOptions, WriteStrategy, DIRECTORS_FILE,
    STUDIOS_FILE,
};
use assert_matches::assert_matches;
use common::{read, seeded_catalog};
use serde_json::Map;

fn director(name: &str) -> CreateDirector {
    CreateDirector {
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_of_load_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(STUDIOS_FILE);
    let seed = "[\n  {\n    \"id\": 1,\n    \"name\": \"S\",\n    \"location\": \"Tokyo\",\n    \"founded\": 1998,\n    \"zeta\": 1,\n    \"alpha\": 2\n  }\n]";
    std::fs::write(&path, seed).unwrap();
    let collection = JsonCollection::<Studio>::new(&path);

    let records = collection.load().await.unwrap();
    collection.save(&records).await.unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), seed);
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_backing_file_is_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::open(dir.path(), StoreOptions::default());

    assert_matches!(
        catalog.studios.list_all().await,
        Err(DbError::StorageUnavailable { .. })
    );
    assert!(catalog.health_check().await.is_err());

    catalog.bootstrap().await.unwrap();
    catalog.health_check().await.unwrap();
}

#[tokio::test]
async fn corrupt_backing_file_rejects_writes() {
    let (dir, catalog) =
        seeded_catalog(StoreOptions::default(), &[(DIRECTORS_FILE, "{\"oops\"")]).await;

    assert_matches!(
        catalog.directors.create(&director("Anno")).await,
        Err(DbError::CorruptData { .. })
    );
    assert_eq!(read(dir.path(), DIRECTORS_FILE), "{\"oops\"");
}

// ---------------------------------------------------------------------------
// Id strategies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn count_plus_one_reuses_ids_after_delete() {
    let (_dir, catalog) = seeded_catalog(StoreOptions::default(), &[]).await;
    catalog.directors.create(&director("A")).await.unwrap();
    catalog.directors.create(&director("B")).await.unwrap();
    catalog.directors.delete_by_id(1).await.unwrap();

    let c = catalog.directors.create(&director("C")).await.unwrap();

    assert_eq!(c.id, 2);
    let ids: Vec<_> = catalog
        .directors
        .list_all()
        .await
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, [2, 2]);
}

#[tokio::test]
async fn sequence_ids_stay_unique_after_deletes() {
    let options = StoreOptions {
        id_strategy: IdStrategy::Sequence,
        ..StoreOptions::default()
    };
    let (dir, catalog) = seeded_catalog(options, &[]).await;
    catalog.directors.create(&director("A")).await.unwrap();
    let b = catalog.directors.create(&director("B")).await.unwrap();
    catalog.directors.delete_by_id(b.id).await.unwrap();

    let c = catalog.directors.create(&director("C")).await.unwrap();

    assert_eq!(c.id, 3);
    assert_eq!(read(dir.path(), "directors.seq"), "3");
}

// ---------------------------------------------------------------------------
// Write strategies
// ---------------------------------------------------------------------------

async fn concurrent_inserts(strategy: WriteStrategy) -> Vec<Director> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DIRECTORS_FILE);
    std::fs::write(&path, "[]").unwrap();
    let store = Arc::new(
        CollectionStore::<Director>::new(&path)
            .with_write_strategy(strategy)
            .with_id_strategy(IdStrategy::Sequence),
    );

    let mut handles = Vec::new();
    for n in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .insert(|id| Director {
                    id,
                    name: format!("Director {n}"),
                    extra: Map::new(),
                })
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    store.list().await.unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn serialized_writes_keep_every_insert() {
    let directors = concurrent_inserts(WriteStrategy::Serialized).await;

    assert_eq!(directors.len(), 8);
    let mut ids: Vec<_> = directors.iter().map(|d| d.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn optimistic_writes_keep_every_insert() {
    let directors = concurrent_inserts(WriteStrategy::Optimistic { max_retries: 64 }).await;

    assert_eq!(directors.len(), 8);
}

#[tokio::test]
async fn optimistic_insert_gives_up_after_max_retries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DIRECTORS_FILE);
    std::fs::write(&path, "[]").unwrap();
    let store = CollectionStore::<Director>::new(&path)
        .with_write_strategy(WriteStrategy::Optimistic { max_retries: 2 });
    let builds = AtomicU32::new(0);

    // Another writer changes the file during every attempt.
    let result = store
        .insert(|id| {
            let n = builds.fetch_add(1, Ordering::SeqCst);
            let rival = format!(r#"[{{"id": {}, "name": "Rival"}}]"#, 100 + n);
            std::fs::write(&path, rival).unwrap();
            Director {
                id,
                name: "Mine".into(),
                extra: Map::new(),
            }
        })
        .await;

    assert_matches!(result, Err(DbError::WriteConflict { attempts: 3, .. }));
    assert_eq!(builds.load(Ordering::SeqCst), 3);
    let directors = store.list().await.unwrap();
    assert_eq!(directors.len(), 1);
    assert_eq!(directors[0].name, "Rival");
}

#[tokio::test]
async fn sequence_counter_moved_mid_cycle_forces_a_retry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DIRECTORS_FILE);
    std::fs::write(&path, r#"[{"id": 1, "name": "Anno"}]"#).unwrap();
    let store = CollectionStore::<Director>::new(&path)
        .with_write_strategy(WriteStrategy::Optimistic { max_retries: 4 })
        .with_id_strategy(IdStrategy::Sequence);
    let seq = store.sequence_path();
    std::fs::write(&seq, "1").unwrap();
    let builds = AtomicU32::new(0);

    // A faster writer issues ids 2..=5 and deletes them again while the
    // first attempt is in flight: the collection is byte-identical, only
    // the counter has moved.
    let director = store
        .insert(|id| {
            if builds.fetch_add(1, Ordering::SeqCst) == 0 {
                std::fs::write(&seq, "5").unwrap();
            }
            Director {
                id,
                name: "Miyazaki".into(),
                extra: Map::new(),
            }
        })
        .await
        .unwrap();

    assert_eq!(builds.load(Ordering::SeqCst), 2);
    assert_eq!(director.id, 6);
    assert_eq!(std::fs::read_to_string(&seq).unwrap(), "6");
}

#[tokio::test]
async fn sequence_counter_never_moves_backwards() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DIRECTORS_FILE);
    std::fs::write(&path, "[]").unwrap();
    let store = CollectionStore::<Director>::new(&path).with_id_strategy(IdStrategy::Sequence);
    let seq = store.sequence_path();

    // The counter is bumped by someone else after this insert picked its id.
    let director = store
        .insert(|id| {
            std::fs::write(&seq, "9").unwrap();
            Director {
                id,
                name: "Kon".into(),
                extra: Map::new(),
            }
        })
        .await
        .unwrap();

    assert_eq!(director.id, 1);
    assert_eq!(std::fs::read_to_string(&seq).unwrap(), "9");
}

#[tokio::test]
async fn failed_mutation_does_not_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DIRECTORS_FILE);
    std::fs::write(&path, r#"[{"id": 1, "name": "Anno"}]"#).unwrap();
    let store = CollectionStore::<Director>::new(&path)
        .with_write_strategy(WriteStrategy::Optimistic { max_retries: 0 });

    let result = store
        .replace(5, |existing| Director {
            name: "Nope".into(),
            ..existing.clone()
        })
        .await;

    assert_matches!(
        result,
        Err(DbError::Core(CoreError::NotFound { id: 5, .. }))
    );
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        r#"[{"id": 1, "name": "Anno"}]"#
    );
}
