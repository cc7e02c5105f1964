use super::*;
use crate::entry::{EntryFields, EntryPatch, OptionalField};
use crate::store::{BulkOutcome, MemoryStore, ReorderOutcome, StoreError, UnavailableStore};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::num::NonZeroU32;
use tempfile::TempDir;

const PASSWORD: &str = "thanks2024";

fn form(name: &str, role_class: &str) -> EntryForm {
    EntryForm {
        english_name: name.to_string(),
        chinese_name: format!("{name}的中文名"),
        role_class: role_class.to_string(),
        thankful_for: "Patience".to_string(),
    }
}

fn wall() -> (Wall, Arc<dyn EntryStore>) {
    let store: Arc<dyn EntryStore> = Arc::new(MemoryStore::new());
    let wall = Wall::new(
        Arc::clone(&store),
        AdminGate::new(Some(PASSWORD.to_string())),
    );
    (wall, store)
}

/// Memory store that fails chosen operations with `Unavailable`.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    /// `clear_field` and `update` fail for these ids
    broken_ids: HashSet<EntryId>,
    /// `create` fails for entries with these english names
    rejected_names: HashSet<String>,
}

impl FlakyStore {
    fn down<T>() -> Result<T, StoreError> {
        Err(StoreError::Unavailable("down".to_string()))
    }
}

#[async_trait]
impl EntryStore for FlakyStore {
    fn backend(&self) -> &'static str {
        "flaky"
    }

    async fn create(&self, fields: EntryFields) -> Result<EntryId, StoreError> {
        if self.rejected_names.contains(&fields.english_name) {
            return Self::down();
        }
        self.inner.create(fields).await
    }

    async fn read_all(&self) -> Result<HashMap<EntryId, Entry>, StoreError> {
        self.inner.read_all().await
    }

    async fn get(&self, id: &EntryId) -> Result<Entry, StoreError> {
        self.inner.get(id).await
    }

    async fn update(&self, id: &EntryId, patch: EntryPatch) -> Result<(), StoreError> {
        if self.broken_ids.contains(id) {
            return Self::down();
        }
        self.inner.update(id, patch).await
    }

    async fn clear_field(&self, id: &EntryId, field: OptionalField) -> Result<(), StoreError> {
        if self.broken_ids.contains(id) {
            return Self::down();
        }
        self.inner.clear_field(id, field).await
    }

    async fn delete(&self, id: &EntryId) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }

    async fn delete_all(&self) -> Result<BulkOutcome, StoreError> {
        self.inner.delete_all().await
    }

    async fn reorder(&self, selection: &[EntryId]) -> Result<ReorderOutcome, StoreError> {
        self.inner.reorder(selection).await
    }
}

fn flaky_wall(store: FlakyStore) -> (Wall, Arc<dyn EntryStore>) {
    let store: Arc<dyn EntryStore> = Arc::new(store);
    let wall = Wall::new(
        Arc::clone(&store),
        AdminGate::new(Some(PASSWORD.to_string())),
    );
    (wall, store)
}

fn write_import_file(temp: &TempDir, names: &[(&str, Option<u32>)]) -> std::path::PathBuf {
    let entries: serde_json::Map<String, serde_json::Value> = names
        .iter()
        .zip(1u32..)
        .map(|((name, position), n)| {
            let mut entry = serde_json::json!({
                "english_name": name,
                "chinese_name": "名",
                "role_class": "Grade 1",
                "thankful_for": "Sunshine",
            });
            if let Some(position) = position {
                entry["manual_order"] = serde_json::json!(position);
            }
            (n.to_string(), entry)
        })
        .collect();
    let file = temp.path().join("import.json");
    std::fs::write(&file, serde_json::json!({ "entries": entries }).to_string()).unwrap();
    file
}

fn ids(view: &WallView) -> Vec<EntryId> {
    view.entries.iter().map(|(id, _)| id.clone()).collect()
}

fn order(n: u32) -> Option<NonZeroU32> {
    NonZeroU32::new(n)
}

#[tokio::test]
async fn test_submit_then_view_shows_newest_first() {
    let (wall, _) = wall();
    let a = wall.submit(&form("Ann", "Grade 2")).await.unwrap();
    let b = wall.submit(&form("Ben", "")).await.unwrap();

    let view = wall.view().await;
    assert_eq!(ids(&view), vec![b.clone(), a]);
    assert_eq!(view.entries[0].1.role_class, "Not specified");
    assert!(view.notice.is_none());
}

#[tokio::test]
async fn test_submit_rejects_blank_required_field() {
    let (wall, store) = wall();
    let mut input = form("Ann", "Grade 2");
    input.thankful_for = "   ".to_string();

    let err = wall.submit(&input).await.unwrap_err();
    assert!(matches!(err, WallError::Validation(ref v) if v.field == "thankful_for"));
    assert!(store.read_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_view_stats() {
    let (wall, _) = wall();
    wall.submit(&form("Ann", "English Teacher")).await.unwrap();
    wall.submit(&form("Ben", "Grade 5")).await.unwrap();
    wall.submit(&form("Cat", "")).await.unwrap();

    let stats = wall.view().await.stats;
    assert_eq!(stats.total, 3);
    assert_eq!(stats.teachers, 1);
    assert_eq!(stats.students, 2);
}

#[tokio::test]
async fn test_view_of_unavailable_store_is_empty_with_notice() {
    let wall = Wall::new(
        Arc::new(UnavailableStore::new("disk gone".to_string())),
        AdminGate::default(),
    );

    let view = wall.view().await;
    assert!(view.entries.is_empty());
    assert_eq!(view.stats, WallStats::default());
    assert!(view.notice.unwrap().contains("disk gone"));
}

#[tokio::test]
async fn test_submit_to_unavailable_store_reports_unavailable() {
    let wall = Wall::new(
        Arc::new(UnavailableStore::new("disk gone".to_string())),
        AdminGate::default(),
    );
    let err = wall.submit(&form("Ann", "")).await.unwrap_err();
    assert!(err.is_storage_unavailable());
}

#[tokio::test]
async fn test_unlock_checks_password() {
    let (wall, _) = wall();
    assert!(wall.unlock(PASSWORD).is_ok());
    assert!(matches!(
        wall.unlock("guess").err(),
        Some(WallError::Unauthorized)
    ));

    let disabled = Wall::new(Arc::new(MemoryStore::new()), AdminGate::default());
    assert!(matches!(
        disabled.unlock(PASSWORD).err(),
        Some(WallError::AdminDisabled)
    ));
}

#[tokio::test]
async fn test_feature_puts_selection_first_in_given_order() {
    let (wall, _) = wall();
    let mut all = Vec::new();
    for name in ["A", "B", "C", "D", "E"] {
        all.push(wall.submit(&form(name, "")).await.unwrap());
    }
    let selection = vec![all[3].clone(), all[0].clone(), all[2].clone()];

    let moderator = wall.unlock(PASSWORD).unwrap();
    let outcome = moderator.feature(&selection).await.unwrap();
    assert_eq!(outcome.featured, 3);

    let view = wall.view().await;
    let shown = ids(&view);
    assert_eq!(&shown[..3], selection.as_slice());
    // the rest newest first
    assert_eq!(&shown[3..], &[all[4].clone(), all[1].clone()]);
    assert_eq!(view.entries[0].1.manual_order, order(1));
    assert_eq!(view.entries[2].1.manual_order, order(3));
}

#[tokio::test]
async fn test_feature_replaces_previous_selection() {
    let (wall, store) = wall();
    let a = wall.submit(&form("A", "")).await.unwrap();
    let b = wall.submit(&form("B", "")).await.unwrap();
    let moderator = wall.unlock(PASSWORD).unwrap();

    moderator.feature(&[a.clone()]).await.unwrap();
    let outcome = moderator.feature(&[b.clone()]).await.unwrap();
    assert_eq!(outcome.cleared, 1);

    let entries = store.read_all().await.unwrap();
    assert_eq!(entries[&a].manual_order, None);
    assert_eq!(entries[&b].manual_order, order(1));
}

#[tokio::test]
async fn test_feature_empty_selection_unfeatures_everything() {
    let (wall, store) = wall();
    let a = wall.submit(&form("A", "")).await.unwrap();
    let moderator = wall.unlock(PASSWORD).unwrap();
    moderator.feature(&[a.clone()]).await.unwrap();

    moderator.feature(&[]).await.unwrap();
    assert_eq!(store.read_all().await.unwrap()[&a].manual_order, None);
}

#[tokio::test]
async fn test_feature_rejects_duplicates_without_changes() {
    let (wall, store) = wall();
    let a = wall.submit(&form("A", "")).await.unwrap();
    let b = wall.submit(&form("B", "")).await.unwrap();
    let moderator = wall.unlock(PASSWORD).unwrap();
    moderator.feature(&[b.clone()]).await.unwrap();
    let before = store.read_all().await.unwrap();

    let err = moderator
        .feature(&[a.clone(), b, a.clone()])
        .await
        .unwrap_err();
    assert!(matches!(err, WallError::DuplicateSelection(ref id) if *id == a));
    assert_eq!(store.read_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_feature_unknown_id_is_not_found_without_changes() {
    let (wall, store) = wall();
    let a = wall.submit(&form("A", "")).await.unwrap();
    let moderator = wall.unlock(PASSWORD).unwrap();
    moderator.feature(&[a.clone()]).await.unwrap();
    let before = store.read_all().await.unwrap();

    let err = moderator
        .feature(&[EntryId::from("404")])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.read_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_reset_order_counts_cleared_entries() {
    let (wall, store) = wall();
    let mut all = Vec::new();
    for name in ["A", "B", "C", "D"] {
        all.push(wall.submit(&form(name, "")).await.unwrap());
    }
    let moderator = wall.unlock(PASSWORD).unwrap();
    moderator.feature(&all[..3]).await.unwrap();

    let outcome = moderator.reset_order().await.unwrap();
    assert_eq!(outcome.succeeded, 3);
    assert!(outcome.is_complete());

    let entries = store.read_all().await.unwrap();
    assert!(entries.values().all(|e| e.manual_order.is_none()));

    // nothing left to clear
    let again = moderator.reset_order().await.unwrap();
    assert_eq!(again, BulkOutcome::default());
}

#[tokio::test]
async fn test_reset_order_reports_partial_failure() {
    let (wall, store) = flaky_wall(FlakyStore {
        broken_ids: HashSet::from([EntryId::from("2")]),
        ..FlakyStore::default()
    });
    let mut all = Vec::new();
    for name in ["A", "B", "C"] {
        all.push(wall.submit(&form(name, "")).await.unwrap());
    }
    let moderator = wall.unlock(PASSWORD).unwrap();
    moderator.feature(&all).await.unwrap();

    let outcome = moderator.reset_order().await.unwrap();
    assert_eq!(outcome.succeeded, 2);
    assert!(!outcome.is_complete());
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].id, EntryId::from("2"));
    assert!(outcome.failed[0].reason.contains("down"));

    // the entry that could not be cleared keeps its position
    let entries = store.read_all().await.unwrap();
    assert_eq!(entries[&EntryId::from("2")].manual_order, order(2));
    assert_eq!(entries[&EntryId::from("1")].manual_order, None);
    assert_eq!(entries[&EntryId::from("3")].manual_order, None);
}

#[tokio::test]
async fn test_edit_replaces_text_and_keeps_position() {
    let (wall, store) = wall();
    let a = wall.submit(&form("A", "")).await.unwrap();
    let b = wall.submit(&form("B", "")).await.unwrap();
    let moderator = wall.unlock(PASSWORD).unwrap();
    moderator.feature(&[a.clone()]).await.unwrap();
    let order_before = ids(&wall.view().await);

    moderator
        .edit(&a, &form("Alice", "Music Teacher"))
        .await
        .unwrap();

    let entry = store.get(&a).await.unwrap();
    assert_eq!(entry.english_name, "Alice");
    assert_eq!(entry.role_class, "Music Teacher");
    assert_eq!(entry.manual_order, order(1));
    assert_eq!(ids(&wall.view().await), order_before);
    assert_eq!(order_before, vec![a, b]);
}

#[tokio::test]
async fn test_edit_with_unchanged_fields_keeps_order() {
    let (wall, store) = wall();
    let a = wall.submit(&form("A", "")).await.unwrap();
    wall.submit(&form("B", "")).await.unwrap();
    let order_before = ids(&wall.view().await);

    let unchanged = EntryForm::from(store.get(&a).await.unwrap().fields());
    wall.unlock(PASSWORD)
        .unwrap()
        .edit(&a, &unchanged)
        .await
        .unwrap();

    assert_eq!(ids(&wall.view().await), order_before);
}

#[tokio::test]
async fn test_edit_missing_entry_is_not_found() {
    let (wall, _) = wall();
    let err = wall
        .unlock(PASSWORD)
        .unwrap()
        .edit(&EntryId::from("9"), &form("A", ""))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete() {
    let (wall, _) = wall();
    let a = wall.submit(&form("A", "")).await.unwrap();
    let b = wall.submit(&form("B", "")).await.unwrap();
    let moderator = wall.unlock(PASSWORD).unwrap();

    moderator.delete(&a).await.unwrap();
    assert_eq!(ids(&wall.view().await), vec![b]);
    assert!(moderator.delete(&a).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_all_requires_confirmation() {
    let (wall, store) = wall();
    wall.submit(&form("A", "")).await.unwrap();
    wall.submit(&form("B", "")).await.unwrap();
    let moderator = wall.unlock(PASSWORD).unwrap();

    let err = moderator.delete_all("delete all").await.unwrap_err();
    assert!(matches!(err, WallError::ConfirmationMismatch { .. }));
    assert_eq!(store.read_all().await.unwrap().len(), 2);

    let outcome = moderator.delete_all(DELETE_ALL_CONFIRMATION).await.unwrap();
    assert_eq!(outcome.succeeded, 2);
    assert!(wall.view().await.entries.is_empty());
}

#[tokio::test]
async fn test_delete_all_on_empty_wall() {
    let (wall, _) = wall();
    let outcome = wall
        .unlock(PASSWORD)
        .unwrap()
        .delete_all(DELETE_ALL_CONFIRMATION)
        .await
        .unwrap();
    assert_eq!(outcome, BulkOutcome::default());
}

#[tokio::test]
async fn test_export_then_import_into_another_wall() {
    let temp = TempDir::new().unwrap();
    let (source, _) = wall();
    let a = source.submit(&form("A", "")).await.unwrap();
    source.submit(&form("B", "")).await.unwrap();
    let moderator = source.unlock(PASSWORD).unwrap();
    moderator.feature(&[a]).await.unwrap();

    let export = moderator.export().await.unwrap();
    assert_eq!(export.entries.len(), 2);
    let file = temp.path().join("export.json");
    std::fs::write(&file, serde_json::to_string(&export).unwrap()).unwrap();

    let (target, _) = wall();
    let outcome = target
        .unlock(PASSWORD)
        .unwrap()
        .import(&file)
        .await
        .unwrap();
    assert_eq!(outcome.succeeded, 2);

    let names: Vec<String> = target
        .view()
        .await
        .entries
        .into_iter()
        .map(|(_, e)| e.english_name)
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[tokio::test]
async fn test_import_legacy_file_skips_invalid_entries() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("legacy.json");
    std::fs::write(
        &file,
        r#"{"entries": {
            "1": {"english_name": "Old", "chinese_name": "老", "role_class": "", "thankful_for": "Snow", "manual_order": 0},
            "2": {"english_name": "", "chinese_name": "空", "role_class": "x", "thankful_for": "Rain"},
            "3": {"english_name": "New", "chinese_name": "新", "role_class": "Teacher", "thankful_for": "Sun", "manual_order": 2, "colour": "red"}
        }}"#,
    )
    .unwrap();

    let (wall, _) = wall();
    let outcome = wall
        .unlock(PASSWORD)
        .unwrap()
        .import(&file)
        .await
        .unwrap();

    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].id, EntryId::from("2"));

    let view = wall.view().await;
    assert_eq!(view.entries[0].1.english_name, "New");
    assert_eq!(view.entries[0].1.manual_order, order(2));
    assert_eq!(view.entries[1].1.english_name, "Old");
    assert_eq!(view.entries[1].1.role_class, "Not specified");
}

#[tokio::test]
async fn test_import_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let (wall, _) = wall();
    let err = wall
        .unlock(PASSWORD)
        .unwrap()
        .import(&temp.path().join("nope.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, WallError::IoError(_)));
}

#[tokio::test]
async fn test_import_reports_failed_create_and_continues() {
    let temp = TempDir::new().unwrap();
    let file = write_import_file(&temp, &[("Ann", None), ("Bad", None), ("Cat", None)]);
    let (wall, store) = flaky_wall(FlakyStore {
        rejected_names: HashSet::from(["Bad".to_string()]),
        ..FlakyStore::default()
    });

    let outcome = wall
        .unlock(PASSWORD)
        .unwrap()
        .import(&file)
        .await
        .unwrap();

    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].id, EntryId::from("2"));
    assert!(outcome.failed[0].reason.contains("down"));

    let names: HashSet<String> = store
        .read_all()
        .await
        .unwrap()
        .into_values()
        .map(|e| e.english_name)
        .collect();
    assert_eq!(names, HashSet::from(["Ann".to_string(), "Cat".to_string()]));
}

#[tokio::test]
async fn test_import_removes_entry_whose_position_cannot_be_restored() {
    let temp = TempDir::new().unwrap();
    let file = write_import_file(&temp, &[("Ann", Some(1)), ("Ben", Some(2))]);
    // Ben is created second in an empty store, so it gets id 2
    let (wall, store) = flaky_wall(FlakyStore {
        broken_ids: HashSet::from([EntryId::from("2")]),
        ..FlakyStore::default()
    });

    let outcome = wall
        .unlock(PASSWORD)
        .unwrap()
        .import(&file)
        .await
        .unwrap();

    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].id, EntryId::from("2"));

    let entries = store.read_all().await.unwrap();
    assert_eq!(entries.len(), 1);
    let ann = &entries[&EntryId::from("1")];
    assert_eq!(ann.english_name, "Ann");
    assert_eq!(ann.manual_order, order(1));
}
