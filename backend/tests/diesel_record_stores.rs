//! Integration tests for the Diesel record stores against embedded
//! PostgreSQL.
//!
//! Each context starts its own cluster, recreates a database, and applies
//! every table's migrations through `run_migrations`. Async calls run on a
//! runtime owned by the context.

use chrono::{DateTime, TimeZone, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use taskboard::domain::ports::{AssignmentRepository, ProjectRepository, UserRepository};
use taskboard::domain::{
    AssignmentId, AssignmentStatus, NewAssignment, NewProject, NewUser, ProjectId, UserId,
};
use taskboard::outbound::persistence::{
    DbPool, DieselAssignmentRepository, DieselProjectRepository, DieselUserRepository,
    PoolConfig, RecordTable, run_migrations,
};

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, reset_database, table_exists};

const TEST_DB: &str = "taskboard_record_stores_test";

const ALL_TABLES: [RecordTable; 3] = [
    RecordTable::Users,
    RecordTable::Projects,
    RecordTable::Assignments,
];

struct TestContext {
    runtime: Runtime,
    database_url: String,
    users: DieselUserRepository,
    projects: DieselProjectRepository,
    assignments: DieselAssignmentRepository,
    _cluster: TestCluster,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = reset_database(&cluster, TEST_DB)?;
    for table in ALL_TABLES {
        run_migrations(&database_url, table).map_err(|err| err.to_string())?;
    }

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        database_url,
        users: DieselUserRepository::new(pool.clone()),
        projects: DieselProjectRepository::new(pool.clone()),
        assignments: DieselAssignmentRepository::new(pool),
        _cluster: cluster,
    })
}

#[fixture]
fn store_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 13, 17, 57, 5)
        .single()
        .expect("valid timestamp")
}

#[rstest]
fn user_ids_increase_and_rows_round_trip(
    store_context: Option<TestContext>,
    created_at: DateTime<Utc>,
) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: user_ids_increase_and_rows_round_trip skipped");
        return;
    };
    let ada = NewUser::try_new("ada", "ada@example.com").expect("valid user");
    let grace = NewUser::try_new("grace", "grace@example.com").expect("valid user");

    let (first, second, fetched) = ctx.runtime.block_on(async {
        let first = ctx.users.create(&ada, created_at).await.expect("insert ada");
        let second = ctx
            .users
            .create(&grace, created_at)
            .await
            .expect("insert grace");
        let fetched = ctx.users.find_by_id(first.id).await.expect("fetch ada");
        (first, second, fetched)
    });

    assert!(second.id > first.id);
    assert_eq!(first.username, "ada");
    assert_eq!(first.created_at, created_at);
    assert_eq!(fetched, Some(first));
}

#[rstest]
fn missing_rows_are_none(store_context: Option<TestContext>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_rows_are_none skipped");
        return;
    };

    ctx.runtime.block_on(async {
        assert_eq!(ctx.users.find_by_id(UserId::new(999)).await.expect("query"), None);
        assert_eq!(
            ctx.projects
                .find_by_id(ProjectId::new(999))
                .await
                .expect("query"),
            None
        );
        assert_eq!(
            ctx.assignments
                .find_by_id(AssignmentId::new(999))
                .await
                .expect("query"),
            None
        );
    });
}

#[rstest]
fn project_rows_keep_their_owner(store_context: Option<TestContext>, created_at: DateTime<Utc>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: project_rows_keep_their_owner skipped");
        return;
    };
    let first = NewProject::try_new("Board", Some("Planning".to_owned()), UserId::new(7))
        .expect("valid project");
    let second = NewProject::try_new("Backlog", None, UserId::new(7)).expect("valid project");

    let (stored, later, fetched) = ctx.runtime.block_on(async {
        let stored = ctx
            .projects
            .create(&first, created_at)
            .await
            .expect("insert");
        let later = ctx
            .projects
            .create(&second, created_at)
            .await
            .expect("insert");
        let fetched = ctx.projects.find_by_id(stored.id).await.expect("fetch");
        (stored, later, fetched)
    });

    assert!(later.id > stored.id);
    assert_eq!(stored.owner_user_id, UserId::new(7));
    assert_eq!(stored.description.as_deref(), Some("Planning"));
    assert_eq!(fetched, Some(stored));
}

#[rstest]
fn assignments_start_as_todo_and_status_updates_stamp_the_row(
    store_context: Option<TestContext>,
    created_at: DateTime<Utc>,
) {
    let Some(ctx) = store_context else {
        eprintln!(
            "SKIP-TEST-CLUSTER: assignments_start_as_todo_and_status_updates_stamp_the_row skipped"
        );
        return;
    };
    let new = NewAssignment::try_new("Write docs", None, ProjectId::new(3)).expect("valid input");
    let updated_at = created_at + chrono::Duration::minutes(5);

    let (created, updated, fetched) = ctx.runtime.block_on(async {
        let created = ctx
            .assignments
            .create(&new, created_at)
            .await
            .expect("insert");
        let updated = ctx
            .assignments
            .update_status(created.id, AssignmentStatus::Done, updated_at)
            .await
            .expect("update")
            .expect("row exists");
        let fetched = ctx
            .assignments
            .find_by_id(created.id)
            .await
            .expect("fetch");
        (created, updated, fetched)
    });

    assert_eq!(created.status, AssignmentStatus::ToDo);
    assert_eq!(created.updated_at, None);
    assert_eq!(created.project_id, ProjectId::new(3));
    assert_eq!(updated.status, AssignmentStatus::Done);
    assert_eq!(updated.updated_at, Some(updated_at));
    assert_eq!(updated.created_at, created_at);
    assert_eq!(fetched, Some(updated));
}

#[rstest]
fn status_update_of_a_missing_assignment_is_none(
    store_context: Option<TestContext>,
    created_at: DateTime<Utc>,
) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: status_update_of_a_missing_assignment_is_none skipped");
        return;
    };

    let outcome = ctx.runtime.block_on(async {
        ctx.assignments
            .update_status(AssignmentId::new(42), AssignmentStatus::InProgress, created_at)
            .await
    });

    assert_eq!(outcome.expect("query"), None);
}

#[rstest]
fn migrations_are_idempotent_and_create_every_table(store_context: Option<TestContext>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: migrations_are_idempotent_and_create_every_table skipped");
        return;
    };

    for table in ALL_TABLES {
        run_migrations(&ctx.database_url, table).expect("re-running migrations is a no-op");
    }
    for table in ["users", "projects", "assignments"] {
        assert!(
            table_exists(&ctx.database_url, table).expect("catalogue query"),
            "{table} should exist"
        );
    }
}

#[rstest]
fn each_role_migrates_only_its_own_table() {
    let cluster = match test_cluster() {
        Ok(cluster) => cluster,
        Err(reason) => {
            handle_cluster_setup_failure::<()>(reason);
            return;
        }
    };
    let url = reset_database(&cluster, "taskboard_users_only").expect("database resets");

    run_migrations(&url, RecordTable::Users).expect("user migrations apply");

    assert!(table_exists(&url, "users").expect("catalogue query"));
    assert!(!table_exists(&url, "projects").expect("catalogue query"));
    assert!(!table_exists(&url, "assignments").expect("catalogue query"));
}
