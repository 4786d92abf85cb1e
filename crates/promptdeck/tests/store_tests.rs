//! Integration tests for the template store

use std::sync::Arc;

use promptdeck::storage::{FileStorage, MemoryStorage};
use promptdeck::{SearchFilter, TemplateDraft, TemplateId, TemplateStore};
use tempfile::tempdir;

async fn store_with_memory() -> (TemplateStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let store = TemplateStore::open(storage.clone()).await;
    (store, storage)
}

#[tokio::test]
async fn test_save_get_and_reload() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("templates.json");

    let store = TemplateStore::open(Arc::new(FileStorage::new(&path))).await;
    assert!(store.is_empty().await);

    let saved = store
        .save(
            TemplateDraft::new("Golden Hour", "warm cinematic portrait", "Wardrobe")
                .emotion("Joy")
                .motion("slow pan")
                .model("kling")
                .tags(["warm", "cinematic"])
                .notes("works best at dusk"),
        )
        .await;
    assert!(saved);

    let template = store.get(TemplateId(1)).await.unwrap();
    assert_eq!(template.name, "Golden Hour");
    assert_eq!(template.emotion, "Joy");
    assert_eq!(template.usage_count, 0);

    // A fresh store over the same file sees the saved template
    let reopened = TemplateStore::open(Arc::new(FileStorage::new(&path))).await;
    assert_eq!(reopened.len().await, 1);
    let template = reopened.get(TemplateId(1)).await.unwrap();
    assert_eq!(template.prompt, "warm cinematic portrait");
    assert_eq!(template.tags, vec!["warm".to_string(), "cinematic".to_string()]);
}

#[tokio::test]
async fn test_missing_id_is_benign() {
    let (store, _) = store_with_memory().await;
    assert!(store.get(TemplateId(42)).await.is_none());
    store.increment_usage(TemplateId(42)).await;
    assert!(store.delete(TemplateId(42)).await);
}

#[tokio::test]
async fn test_ids_stay_unique_after_delete() {
    let (store, _) = store_with_memory().await;
    for name in ["a", "b", "c"] {
        assert!(store.save(TemplateDraft::new(name, "p", "cat")).await);
    }

    // Deleting from the middle must not let the next save collide with an
    // existing id.
    assert!(store.delete(TemplateId(2)).await);
    assert!(store.save(TemplateDraft::new("d", "p", "cat")).await);

    let all = store.search(&SearchFilter::new()).await;
    assert_eq!(all.len(), 3);
    let mut ids: Vec<u64> = all.iter().map(|t| t.id.0).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 3, 4]);
}

#[tokio::test]
async fn test_search_filters_are_conjunctive() {
    let (store, _) = store_with_memory().await;
    store
        .save(
            TemplateDraft::new("Happy Dance", "dancing in the rain", "DrMotion")
                .emotion("Happy")
                .tags(["rain"]),
        )
        .await;
    store
        .save(
            TemplateDraft::new("Sad Walk", "walking alone", "DrMotion").emotion("Sad"),
        )
        .await;
    store
        .save(
            TemplateDraft::new("Happy Outfit", "bright summer dress", "Wardrobe")
                .emotion("Happy"),
        )
        .await;

    let by_category = store
        .search(&SearchFilter::new().category("DrMotion"))
        .await;
    assert_eq!(by_category.len(), 2);
    assert!(by_category.iter().all(|t| t.category == "DrMotion"));

    let by_emotion = store.search(&SearchFilter::new().emotion("Happy")).await;
    assert_eq!(by_emotion.len(), 2);

    // Combined filters return the intersection of the single-filter results
    let combined = store
        .search(&SearchFilter::new().category("DrMotion").emotion("Happy"))
        .await;
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].name, "Happy Dance");

    let by_tag = store.search(&SearchFilter::new().tag("rain")).await;
    assert_eq!(by_tag.len(), 1);

    let by_query = store.search(&SearchFilter::new().query("WALKING")).await;
    assert_eq!(by_query.len(), 1);
    assert_eq!(by_query[0].name, "Sad Walk");
}

#[tokio::test]
async fn test_search_ranks_by_usage() {
    let (store, _) = store_with_memory().await;
    for name in ["first", "second", "third"] {
        store.save(TemplateDraft::new(name, "p", "cat")).await;
    }

    for _ in 0..3 {
        store.increment_usage(TemplateId(2)).await;
    }
    store.increment_usage(TemplateId(3)).await;

    let results = store.search(&SearchFilter::new()).await;
    let counts: Vec<u64> = results.iter().map(|t| t.usage_count).collect();
    assert_eq!(counts, vec![3, 1, 0]);
    assert_eq!(results[0].id, TemplateId(2));

    // Increments touch only the targeted template
    assert_eq!(store.get(TemplateId(1)).await.unwrap().usage_count, 0);
}

#[tokio::test]
async fn test_export_import_round_trip() {
    let temp_dir = tempdir().unwrap();
    let export_path = temp_dir.path().join("export.json");

    let (source, _) = store_with_memory().await;
    source
        .save(
            TemplateDraft::new("Golden Hour", "warm portrait", "Wardrobe")
                .emotion("Joy")
                .tags(["warm"])
                .notes("dusk"),
        )
        .await;
    source.save(TemplateDraft::new("Storm", "dark clouds", "DrMotion")).await;
    source.increment_usage(TemplateId(1)).await;

    assert!(source.export(&export_path).await);

    let (target, _) = store_with_memory().await;
    target.save(TemplateDraft::new("Existing", "p", "cat")).await;
    assert!(target.import(&export_path).await);

    assert_eq!(target.len().await, 3);
    let imported = target.get(TemplateId(2)).await.unwrap();
    assert_eq!(imported.name, "Golden Hour");
    assert_eq!(imported.emotion, "Joy");
    assert_eq!(imported.tags, vec!["warm".to_string()]);
    assert_eq!(imported.notes, "dusk");
    assert_eq!(imported.usage_count, 1);
    assert_eq!(target.get(TemplateId(3)).await.unwrap().name, "Storm");
}

#[tokio::test]
async fn test_import_failure_leaves_collection_unchanged() {
    let temp_dir = tempdir().unwrap();
    let bad_path = temp_dir.path().join("bad.json");
    std::fs::write(&bad_path, "{ definitely not an array").unwrap();

    let (store, _) = store_with_memory().await;
    store.save(TemplateDraft::new("Existing", "p", "cat")).await;

    assert!(!store.import(&bad_path).await);
    assert!(!store.import(temp_dir.path().join("missing.json")).await);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_corrupt_storage_presents_as_empty_store() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("templates.json");
    std::fs::write(&path, "garbage").unwrap();

    let store = TemplateStore::open(Arc::new(FileStorage::new(&path))).await;
    assert!(store.is_empty().await);
    assert!(store.search(&SearchFilter::new()).await.is_empty());

    // The store stays usable; the next save overwrites the corrupt file
    assert!(store.save(TemplateDraft::new("fresh", "p", "cat")).await);
    let reopened = TemplateStore::open(Arc::new(FileStorage::new(&path))).await;
    assert_eq!(reopened.len().await, 1);
}

#[tokio::test]
async fn test_persist_failure_keeps_in_memory_state() {
    let (store, storage) = store_with_memory().await;
    storage.set_fail_persist(true);

    // The write fails, but the in-memory append is not rolled back
    assert!(!store.save(TemplateDraft::new("orphan", "p", "cat")).await);
    assert!(store.get(TemplateId(1)).await.is_some());
    assert!(storage.persisted().is_empty());

    // The next successful write converges durable state again
    storage.set_fail_persist(false);
    assert!(store.save(TemplateDraft::new("second", "p", "cat")).await);
    assert_eq!(storage.persisted().len(), 2);
}

#[tokio::test]
async fn test_categories_tags_and_stats() {
    let (store, _) = store_with_memory().await;

    let stats = store.stats().await;
    assert_eq!(stats.total_templates, 0);
    assert_eq!(stats.total_usage, 0);
    assert!(stats.most_used.is_none());
    assert!(stats.categories.is_empty());

    store
        .save(TemplateDraft::new("a", "p", "Wardrobe").tags(["warm", "soft"]))
        .await;
    store
        .save(TemplateDraft::new("b", "p", "DrMotion").tags(["warm"]))
        .await;
    store.save(TemplateDraft::new("c", "p", "DrMotion")).await;
    store.increment_usage(TemplateId(2)).await;
    store.increment_usage(TemplateId(2)).await;

    assert_eq!(
        store.categories().await,
        vec!["DrMotion".to_string(), "Wardrobe".to_string()]
    );
    assert_eq!(
        store.tag_names().await,
        vec!["soft".to_string(), "warm".to_string()]
    );

    let stats = store.stats().await;
    assert_eq!(stats.total_templates, 3);
    assert_eq!(stats.total_usage, 2);
    assert_eq!(stats.most_used.unwrap().id, TemplateId(2));
    assert_eq!(stats.categories.get("DrMotion"), Some(&2));
    assert_eq!(stats.categories.get("Wardrobe"), Some(&1));
}
