//! Integration tests for the Diesel repositories against embedded PostgreSQL.
//!
//! The cluster download and start-up are slow, so the suite is opt-in:
//! run `cargo test -- --ignored` with `RUN_PG_EMBEDDED=1`.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockable::{Clock, DefaultClock};
use notebook::domain::ports::{
    AccountRepository, AccountRepositoryError, NoteRepository, NoteRepositoryError,
};
use notebook::domain::{AccountId, NewAccount, NewNote, PasswordHash, Username};
use notebook::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselNoteRepository, PoolConfig, run_pending_migrations,
};
use notebook::server::Storage;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;

const DATABASE: &str = "notebook_test";

struct Harness {
    runtime: Runtime,
    pool: DbPool,
    _cluster: TestCluster,
}

fn harness() -> Option<Harness> {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() != Ok("1") {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return None;
    }

    let cluster = TestCluster::new().expect("embedded Postgres should start");
    let admin_url = cluster.connection().database_url("postgres");
    let mut admin = Client::connect(&admin_url, NoTls).expect("connect as admin");
    admin
        .batch_execute(&format!("CREATE DATABASE {DATABASE}"))
        .expect("create test database");

    let url = cluster.connection().database_url(DATABASE);
    let applied = run_pending_migrations(&url).expect("migrations apply");
    assert!(applied > 0, "fresh database should receive migrations");
    assert_eq!(
        run_pending_migrations(&url).expect("second run"),
        0,
        "migrations are idempotent"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("create runtime");
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(url).with_max_size(2)))
        .expect("pool connects");

    Some(Harness {
        runtime,
        pool,
        _cluster: cluster,
    })
}

fn account(name: &str) -> NewAccount {
    NewAccount {
        username: Username::new(name).expect("valid username"),
        password: PasswordHash::derive("Milk for Khorne flakes!").expect("hash"),
    }
}

fn note(owner: AccountId, title: &str, minute: u32) -> NewNote {
    NewNote {
        owner,
        title: title.to_owned(),
        content: format!("{title} content"),
        created_at: Utc
            .with_ymd_and_hms(2026, 1, 5, 12, minute, 0)
            .single()
            .expect("valid timestamp"),
    }
}

#[test]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn diesel_repositories_honour_port_contracts() {
    let Some(harness) = harness() else {
        return;
    };
    let accounts = DieselAccountRepository::new(harness.pool.clone());
    let notes = DieselNoteRepository::new(harness.pool.clone());

    harness.runtime.block_on(async {
        let khorne = accounts.insert(&account("Khorne")).await.expect("insert");
        let leomund = accounts.insert(&account("Leomund")).await.expect("insert");

        let duplicate = accounts
            .insert(&account("Khorne"))
            .await
            .expect_err("usernames are unique");
        assert_eq!(duplicate, AccountRepositoryError::duplicate_username("Khorne"));

        let found = accounts
            .find_by_username(khorne.username())
            .await
            .expect("lookup")
            .expect("stored account");
        assert_eq!(found.id(), khorne.id());
        let missing = Username::new("khorne").expect("valid username");
        assert!(accounts.find_by_username(&missing).await.expect("lookup").is_none());

        notes.insert(&note(khorne.id(), "later", 30)).await.expect("insert");
        let earlier = notes.insert(&note(khorne.id(), "earlier", 5)).await.expect("insert");
        notes.insert(&note(leomund.id(), "other", 10)).await.expect("insert");

        let titles: Vec<String> = notes
            .list_by_owner(khorne.id())
            .await
            .expect("list")
            .into_iter()
            .map(|stored| stored.title)
            .collect();
        assert_eq!(titles, ["earlier", "later"]);

        assert!(!notes.delete_owned(earlier.id, leomund.id()).await.expect("delete"));
        assert!(notes.find_by_id(earlier.id).await.expect("find").is_some());
        assert!(notes.delete_owned(earlier.id, khorne.id()).await.expect("delete"));
        assert!(notes.find_by_id(earlier.id).await.expect("find").is_none());

        let orphan = notes
            .insert(&note(AccountId::new(9_999), "orphan", 0))
            .await
            .expect_err("foreign key rejects unknown owners");
        assert!(matches!(orphan, NoteRepositoryError::Query { .. }));
    });
}

#[test]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn demo_data_is_seeded_once_in_postgres() {
    let Some(harness) = harness() else {
        return;
    };
    let storage = Storage::postgres(&harness.pool);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    harness.runtime.block_on(async {
        let first = storage
            .ensure_demo_data(clock.clone())
            .await
            .expect("first seeding");
        assert!(!first.created.is_empty());

        let second = storage
            .ensure_demo_data(clock.clone())
            .await
            .expect("second seeding");
        assert!(second.created.is_empty());
        assert_eq!(second.existing.len(), first.created.len());

        let khorne = Username::new("Khorne").expect("valid username");
        let listed = storage
            .http_state(clock)
            .notebook
            .list_notes(&khorne)
            .await
            .expect("list");
        let titles: Vec<&str> = listed.iter().map(|stored| stored.title.as_str()).collect();
        assert_eq!(titles, ["Shopping list"]);
    });
}
