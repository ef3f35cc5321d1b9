//! CRUD tests for the `PostgreSQL` task repository.

use super::cluster::{PostgresCluster, postgres_cluster};
use super::helpers::{
    BoxError, StoreContext, cluster_store_context, execute_sql, store_context, test_runtime,
};
use rstest::rstest;
use taskboard::task::domain::{TaskId, TaskStatus};
use taskboard::task::ports::TaskRepository;

#[rstest]
fn create_then_read_round_trips(store_context: Result<StoreContext, BoxError>) {
    let ctx = store_context.expect("store context");
    let store = &ctx.repository;

    let id = ctx
        .runtime
        .block_on(store.create("Postgres round trip", "Stored through diesel"))
        .expect("create task");
    let task = ctx
        .runtime
        .block_on(store.get_by_id(id))
        .expect("read task")
        .expect("created task exists");

    assert_eq!(task.id(), id);
    assert_eq!(task.title(), "Postgres round trip");
    assert_eq!(task.description(), "Stored through diesel");
    assert_eq!(task.status(), TaskStatus::Pending);

    let listed = ctx.runtime.block_on(store.get_all()).expect("list tasks");
    assert!(listed.iter().any(|candidate| candidate.id() == id));
}

#[rstest]
fn get_all_lists_newest_first(store_context: Result<StoreContext, BoxError>) {
    let ctx = store_context.expect("store context");
    let store = &ctx.repository;

    let first = ctx
        .runtime
        .block_on(store.create("First task", ""))
        .expect("create first");
    let second = ctx
        .runtime
        .block_on(store.create("Second task", ""))
        .expect("create second");

    let listed: Vec<TaskId> = ctx
        .runtime
        .block_on(store.get_all())
        .expect("list tasks")
        .iter()
        .map(|task| task.id())
        .filter(|id| *id == first || *id == second)
        .collect();
    assert_eq!(listed, vec![second, first]);
}

#[rstest]
fn update_and_delete_report_affected_rows(store_context: Result<StoreContext, BoxError>) {
    let ctx = store_context.expect("store context");
    let store = &ctx.repository;

    let id = ctx
        .runtime
        .block_on(store.create("Postgres update", "Before the update"))
        .expect("create task");
    let created_at = ctx
        .runtime
        .block_on(store.get_by_id(id))
        .expect("read task")
        .expect("created task exists")
        .created_at();

    assert!(
        ctx.runtime
            .block_on(store.update(id, "Postgres updated", "", TaskStatus::Done))
            .expect("update task")
    );
    let updated = ctx
        .runtime
        .block_on(store.get_by_id(id))
        .expect("read task")
        .expect("updated task exists");
    assert_eq!(updated.title(), "Postgres updated");
    assert_eq!(updated.description(), "");
    assert_eq!(updated.status(), TaskStatus::Done);
    assert_eq!(updated.created_at(), created_at);

    assert!(ctx.runtime.block_on(store.delete(id)).expect("delete task"));
    assert!(!ctx.runtime.block_on(store.delete(id)).expect("delete again"));
    assert!(
        ctx.runtime
            .block_on(store.get_by_id(id))
            .expect("read task")
            .is_none()
    );
}

#[rstest]
#[case(TaskId::new(u64::MAX))]
#[case(TaskId::new(0))]
fn unknown_ids_match_nothing(store_context: Result<StoreContext, BoxError>, #[case] id: TaskId) {
    let ctx = store_context.expect("store context");
    let store = &ctx.repository;

    assert!(
        ctx.runtime
            .block_on(store.get_by_id(id))
            .expect("read task")
            .is_none()
    );
    assert!(
        !ctx.runtime
            .block_on(store.update(id, "Nothing", "", TaskStatus::Done))
            .expect("update task")
    );
    assert!(!ctx.runtime.block_on(store.delete(id)).expect("delete task"));
}

#[rstest]
fn unknown_stored_status_is_a_storage_error(postgres_cluster: PostgresCluster) {
    let runtime = test_runtime().expect("runtime");
    let ctx = cluster_store_context(postgres_cluster, runtime).expect("store context");
    let store = &ctx.repository;

    let id = ctx
        .runtime
        .block_on(store.create("Corrupted row", ""))
        .expect("create task");
    execute_sql(
        &ctx.url,
        &format!("UPDATE tasks SET status = 'archived' WHERE id = {}", id.value()),
    )
    .expect("corrupt status");

    let result = ctx.runtime.block_on(store.get_by_id(id));
    assert!(result.is_err(), "expected a storage error, got {result:?}");
}

#[rstest]
fn temporary_database_is_dropped_with_its_guard(postgres_cluster: PostgresCluster) {
    let database = postgres_cluster
        .temporary_database("taskboard_guard_check")
        .expect("create database");
    let name = database.name().to_owned();
    assert!(postgres_cluster.database_exists(&name).expect("query catalog"));

    drop(database);

    assert!(!postgres_cluster.database_exists(&name).expect("query catalog"));
}
