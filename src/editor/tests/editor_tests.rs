//! Service tests for the task editor: loading gates, draft lifecycle, and
//! the mixed autosave/explicit-save protocol.

use crate::board::{
    adapters::memory::{InMemoryBoardStore, RecordingNavigator},
    domain::{
        PersistedStageData, PersistedTaskData, Stage, StageId, Task, TaskId, UserId, UserRef,
    },
    ports::{BoardStore, BoardStoreError, Credentials, StageQuery},
};
use crate::editor::domain::{SectionDraft, SectionKey};
use crate::editor::services::{EditorError, TaskEditor};
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

type TestStore = InMemoryBoardStore<DefaultClock>;
type TestEditor = TaskEditor<TestStore, RecordingNavigator>;

fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).expect("valid timestamp")
}

fn seeded_task() -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: "Write release notes".to_owned(),
        description: Some("Draft for the 2.0 release".to_owned()),
        due_date: Some(timestamp(600)),
        completed: false,
        stage_id: None,
        users: Vec::new(),
        created_at: timestamp(0),
        updated_at: timestamp(0),
    })
}

struct Harness {
    store: TestStore,
    navigator: Arc<RecordingNavigator>,
    editor: TestEditor,
    task_id: TaskId,
}

fn harness() -> Harness {
    let store = InMemoryBoardStore::new(Credentials::new("session-token"), Arc::new(DefaultClock));
    let navigator = Arc::new(RecordingNavigator::new());
    let task = seeded_task();
    let task_id = task.id();
    store.seed_task(task).expect("seed");
    let editor = TaskEditor::new(
        Arc::new(store.clone()),
        Arc::clone(&navigator),
        task_id,
    );
    Harness {
        store,
        navigator,
        editor,
        task_id,
    }
}

async fn loaded() -> Harness {
    let mut fixture = harness();
    fixture.editor.load().await.expect("load succeeds");
    fixture
}

#[tokio::test(flavor = "multi_thread")]
async fn panel_is_inert_until_loaded() {
    let mut fixture = harness();

    assert!(fixture.editor.is_loading());
    assert!(matches!(
        fixture.editor.toggle(SectionKey::Description),
        Err(EditorError::Loading)
    ));
    assert!(matches!(
        fixture.editor.set_completed(true).await,
        Err(EditorError::Loading)
    ));
    assert!(matches!(
        fixture.editor.delete().await,
        Err(EditorError::Loading)
    ));
    assert_eq!(fixture.store.update_calls().expect("counter"), 0);
    assert!(fixture.navigator.paths().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn loading_a_missing_task_is_not_found() {
    let store =
        InMemoryBoardStore::new(Credentials::new("session-token"), Arc::new(DefaultClock));
    let ghost = TaskId::new();
    let mut editor: TestEditor =
        TaskEditor::new(Arc::new(store), Arc::new(RecordingNavigator::new()), ghost);

    let result = editor.load().await;

    assert!(matches!(result, Err(EditorError::NotFound(id)) if id == ghost));
    assert!(editor.is_loading());
}

#[tokio::test(flavor = "multi_thread")]
async fn opening_a_section_seeds_its_draft_from_the_task() {
    let mut fixture = loaded().await;

    let open = fixture
        .editor
        .toggle(SectionKey::Description)
        .expect("toggle succeeds");

    assert_eq!(open, Some(SectionKey::Description));
    assert_eq!(
        fixture.editor.draft(),
        Some(&SectionDraft::Description(Some(
            "Draft for the 2.0 release".to_owned()
        )))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn reopening_the_section_discards_its_draft() {
    let mut fixture = loaded().await;
    fixture
        .editor
        .toggle(SectionKey::Description)
        .expect("toggle succeeds");
    fixture
        .editor
        .draft_description(Some("edited but abandoned".to_owned()))
        .expect("draft succeeds");

    fixture
        .editor
        .toggle(SectionKey::Description)
        .expect("toggle succeeds");
    let reopened = fixture
        .editor
        .toggle(SectionKey::Description)
        .expect("toggle succeeds");

    assert_eq!(reopened, Some(SectionKey::Description));
    // Back to the stored value, not the abandoned edit.
    assert_eq!(
        fixture.editor.draft(),
        Some(&SectionDraft::Description(Some(
            "Draft for the 2.0 release".to_owned()
        )))
    );
    assert_eq!(fixture.store.update_calls().expect("counter"), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn switching_sections_swaps_the_draft() {
    let mut fixture = loaded().await;
    fixture
        .editor
        .toggle(SectionKey::Description)
        .expect("toggle succeeds");

    let open = fixture
        .editor
        .toggle(SectionKey::DueDate)
        .expect("toggle succeeds");

    assert_eq!(open, Some(SectionKey::DueDate));
    assert_eq!(
        fixture.editor.draft(),
        Some(&SectionDraft::DueDate(Some(timestamp(600))))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn draft_setters_require_their_section_open() {
    let mut fixture = loaded().await;
    fixture
        .editor
        .toggle(SectionKey::DueDate)
        .expect("toggle succeeds");

    let result = fixture
        .editor
        .draft_description(Some("wrong form".to_owned()));

    assert!(matches!(
        result,
        Err(EditorError::SectionNotOpen(SectionKey::Description))
    ));
    assert!(matches!(
        fixture.editor.draft_users(Vec::new()),
        Err(EditorError::SectionNotOpen(SectionKey::Users))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn explicit_save_persists_and_closes_the_section() {
    let mut fixture = loaded().await;
    fixture
        .editor
        .toggle(SectionKey::Description)
        .expect("toggle succeeds");
    fixture
        .editor
        .draft_description(Some("Reviewed and final".to_owned()))
        .expect("draft succeeds");

    fixture
        .editor
        .save_open_section()
        .await
        .expect("save succeeds");

    let task = fixture.editor.task().expect("task loaded");
    assert_eq!(task.description(), Some("Reviewed and final"));
    assert_eq!(fixture.editor.open_section(), None);
    assert_eq!(fixture.editor.draft(), None);
    let persisted = fixture
        .store
        .find_task(fixture.task_id)
        .await
        .expect("lookup succeeds")
        .expect("task exists");
    assert_eq!(persisted.description(), Some("Reviewed and final"));
}

#[tokio::test(flavor = "multi_thread")]
async fn saving_a_cleared_due_date_clears_the_field() {
    let mut fixture = loaded().await;
    fixture
        .editor
        .toggle(SectionKey::DueDate)
        .expect("toggle succeeds");
    fixture.editor.draft_due_date(None).expect("draft succeeds");

    fixture
        .editor
        .save_open_section()
        .await
        .expect("save succeeds");

    assert_eq!(
        fixture.editor.task().expect("task loaded").due_date(),
        None
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_save_keeps_the_section_open_for_retry() {
    let mut fixture = loaded().await;
    fixture
        .editor
        .toggle(SectionKey::Description)
        .expect("toggle succeeds");
    fixture
        .editor
        .draft_description(Some("flaky".to_owned()))
        .expect("draft succeeds");
    fixture
        .store
        .fail_next_update(BoardStoreError::Validation("rejected".to_owned()))
        .expect("inject");

    let result = fixture.editor.save_open_section().await;

    assert!(matches!(result, Err(EditorError::Store(_))));
    assert_eq!(fixture.editor.open_section(), Some(SectionKey::Description));
    assert_eq!(
        fixture.editor.draft(),
        Some(&SectionDraft::Description(Some("flaky".to_owned())))
    );
    assert!(matches!(
        fixture.editor.save_error(),
        Some(BoardStoreError::Validation(_))
    ));

    // The retry goes through and clears the stashed error.
    fixture
        .editor
        .save_open_section()
        .await
        .expect("retry succeeds");
    assert!(fixture.editor.save_error().is_none());
    assert_eq!(fixture.editor.open_section(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_discards_edits_without_a_request() {
    let mut fixture = loaded().await;
    fixture
        .editor
        .toggle(SectionKey::Users)
        .expect("toggle succeeds");
    let reviewer = UserRef::new(UserId::new(), "Reviewer").expect("valid user");
    fixture
        .editor
        .draft_users(vec![reviewer])
        .expect("draft succeeds");

    fixture.editor.cancel();

    assert_eq!(fixture.editor.open_section(), None);
    assert_eq!(fixture.editor.draft(), None);
    assert_eq!(fixture.store.update_calls().expect("counter"), 0);
    assert!(fixture
        .editor
        .task()
        .expect("task loaded")
        .users()
        .is_empty());
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
#[tokio::test(flavor = "multi_thread")]
async fn blank_rename_is_rejected_before_any_request(#[case] title: &str) {
    let mut fixture = loaded().await;

    let result = fixture.editor.rename(title).await;

    assert!(matches!(result, Err(EditorError::Domain(_))));
    assert_eq!(fixture.store.update_calls().expect("counter"), 0);
    assert_eq!(
        fixture.editor.task().expect("task loaded").title(),
        "Write release notes"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn rename_autosaves_immediately() {
    let mut fixture = loaded().await;

    fixture
        .editor
        .rename("Publish release notes")
        .await
        .expect("rename succeeds");

    assert_eq!(
        fixture.editor.task().expect("task loaded").title(),
        "Publish release notes"
    );
    assert_eq!(fixture.store.update_calls().expect("counter"), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn stage_row_fields_autosave_without_a_section() {
    let mut fixture = loaded().await;
    let stage = Stage::from_persisted(PersistedStageData {
        id: StageId::new(),
        title: "DONE".to_owned(),
        created_at: timestamp(1),
    });
    let stage_id = stage.id();
    fixture.store.seed_stage(stage).expect("seed");

    fixture
        .editor
        .set_stage(Some(stage_id))
        .await
        .expect("stage autosave succeeds");
    fixture
        .editor
        .set_completed(true)
        .await
        .expect("completed autosave succeeds");

    let task = fixture.editor.task().expect("task loaded");
    assert_eq!(task.stage_id(), Some(stage_id));
    assert!(task.completed());
    assert_eq!(fixture.editor.open_section(), None);
    assert_eq!(fixture.store.update_calls().expect("counter"), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_autosave_leaves_the_snapshot_untouched() {
    let mut fixture = loaded().await;
    fixture
        .store
        .fail_next_update(BoardStoreError::transport(std::io::Error::other(
            "socket closed",
        )))
        .expect("inject");

    let result = fixture.editor.set_completed(true).await;

    assert!(matches!(result, Err(EditorError::Store(_))));
    assert!(!fixture.editor.task().expect("task loaded").completed());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_navigates_back_to_the_board() {
    let mut fixture = loaded().await;

    fixture.editor.delete().await.expect("delete succeeds");

    assert_eq!(fixture.navigator.paths(), vec!["/tasks".to_owned()]);
    assert!(fixture
        .store
        .find_task(fixture.task_id)
        .await
        .expect("lookup succeeds")
        .is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_delete_does_not_navigate() {
    let mut fixture = loaded().await;
    fixture.editor.delete().await.expect("first delete succeeds");

    let result = fixture.editor.delete().await;

    assert!(matches!(
        result,
        Err(EditorError::Store(BoardStoreError::NotFound(_)))
    ));
    assert_eq!(fixture.navigator.paths().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn reload_resets_the_panel_to_all_closed() {
    let mut fixture = loaded().await;
    fixture
        .editor
        .toggle(SectionKey::Users)
        .expect("toggle succeeds");
    fixture
        .store
        .fail_next_update(BoardStoreError::Validation("rejected".to_owned()))
        .expect("inject");
    let _ = fixture.editor.save_open_section().await;

    fixture.editor.load().await.expect("reload succeeds");

    assert_eq!(fixture.editor.open_section(), None);
    assert_eq!(fixture.editor.draft(), None);
    assert!(fixture.editor.save_error().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn option_listings_pass_through_the_store() {
    let fixture = loaded().await;
    fixture
        .store
        .seed_stage(Stage::from_persisted(PersistedStageData {
            id: StageId::new(),
            title: "TODO".to_owned(),
            created_at: timestamp(1),
        }))
        .expect("seed");
    let assignee = UserRef::new(UserId::new(), "Assignee").expect("valid user");
    fixture.store.seed_user(assignee.clone()).expect("seed");

    let stages = fixture
        .editor
        .stage_options(&StageQuery::new())
        .await
        .expect("stage listing succeeds");
    let users = fixture
        .editor
        .user_options()
        .await
        .expect("user listing succeeds");

    assert_eq!(stages.len(), 1);
    assert_eq!(users, vec![assignee]);
}
