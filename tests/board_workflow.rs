use chrono::NaiveDate;
use tempfile::tempdir;

use taskboard::activity::ActivityAction;
use taskboard::auth::{AuthFailure, Credentials, LoginResult, SessionGate};
use taskboard::drag::{DragInteraction, DragState};
use taskboard::model::{Column, NewTask, Priority, TaskUpdate};
use taskboard::store::kv::{FileKv, KeyValueStore, MemoryKv};
use taskboard::store::repository::{KvRepository, TASKS_KEY, TaskRepository};
use taskboard::store::task_store::TaskStore;
use taskboard::store::workspace::Workspace;

#[test]
fn full_board_lifecycle_on_disk() {
    let dir = tempdir().unwrap();
    let ws = Workspace::init(dir.path()).unwrap();

    let mut store = ws.task_store();
    let spec = store.add_task(
        NewTask::new("Write proposal")
            .column(Column::Todo)
            .priority(Priority::High),
    );
    let review = store.add_task(
        NewTask::new("Review proposal").due(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()),
    );

    let mut drag = DragInteraction::new();
    drag.start_drag(spec.clone());
    drag.drag_over_column(Column::Doing);
    drag.drop(Column::Doing, &mut store);
    assert_eq!(drag.state(), &DragState::Idle);

    store.update_task(
        &review.id,
        TaskUpdate {
            priority: Some(Priority::Low),
            ..TaskUpdate::default()
        },
    );
    drop(store);

    // A fresh process sees the same board.
    let store = Workspace::open(dir.path()).unwrap().task_store();
    assert_eq!(store.get(&spec.id).unwrap().column, Column::Doing);
    assert_eq!(store.get(&review.id).unwrap().priority, Priority::Low);

    let actions: Vec<ActivityAction> = store.activity().iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            ActivityAction::Edited,
            ActivityAction::Moved,
            ActivityAction::Created,
            ActivityAction::Created,
        ]
    );
}

#[test]
fn serialized_task_list_round_trips() {
    let mut store = TaskStore::open(KvRepository::new(MemoryKv::new()));
    store.add_task(NewTask {
        title: "With everything".into(),
        description: Some("desc".into()),
        priority: Some(Priority::Low),
        due_date: NaiveDate::from_ymd_opt(2025, 12, 24),
        tags: vec!["x".into(), "y".into()],
        column: Some(Column::Done),
    });
    store.add_task(NewTask::new("Bare"));

    let reloaded = store.repository().load_tasks();
    assert_eq!(reloaded.as_slice(), store.tasks());
}

#[test]
fn corrupt_file_store_is_tolerated() {
    let dir = tempdir().unwrap();
    let mut kv = FileKv::open(dir.path());
    kv.set(TASKS_KEY, "42").unwrap();

    let mut store = TaskStore::open(KvRepository::new(kv));
    assert!(store.tasks().is_empty());

    // The next write replaces the corrupt value.
    store.add_task(NewTask::new("Fresh start"));
    let reopened = TaskStore::open(KvRepository::new(FileKv::open(dir.path())));
    assert_eq!(reopened.tasks().len(), 1);
}

#[test]
fn session_survives_reopen_only_when_remembered() {
    let dir = tempdir().unwrap();
    let durable = dir.path().join("durable");
    let transient = dir.path().join("transient");
    let creds = Credentials {
        email: "intern@demo.com".into(),
        password: "intern123".into(),
    };
    let open = || {
        SessionGate::open(
            FileKv::open(&durable),
            FileKv::open(&transient),
            Some(creds.clone()),
        )
    };

    let mut gate = open();
    assert_eq!(
        gate.login("intern@demo.com", "bad", true),
        LoginResult::Failure(AuthFailure::InvalidPassword)
    );
    assert!(gate.login("intern@demo.com", "intern123", true).is_success());

    let gate = open();
    assert!(gate.is_authenticated());
    assert!(gate.is_remembered());

    // Simulate the transient medium being wiped (end of the machine session).
    let mut gate = open();
    gate.login("intern@demo.com", "intern123", false);
    std::fs::remove_dir_all(&transient).unwrap();
    assert!(!open().is_authenticated());
}
