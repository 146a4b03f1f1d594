use rusqlite::Connection;
use selfcare_core::db::open_db;
use selfcare_core::{Goal, GoalsDataSource, LocalGoalsDataSource, Lookup};

#[tokio::test]
async fn empty_table_reads_as_not_available() {
    let local = LocalGoalsDataSource::open_in_memory().unwrap();

    assert_eq!(local.get_goals().await, Lookup::NotAvailable);
    assert_eq!(local.get_goal("missing").await, Lookup::NotAvailable);
}

#[tokio::test]
async fn queued_writes_are_visible_to_later_reads() {
    let local = LocalGoalsDataSource::open_in_memory().unwrap();
    let walk = Goal::with_id("a", "walk", 1, Goal::CHASE);

    local.save_goal(&walk);
    local.archive_goal(&walk);

    let loaded = local.get_goal("a").await.into_option().unwrap();
    assert!(loaded.archived);

    local.activate_goal(&walk);
    local.save_goal(&Goal::with_id("b", "read", 1, Goal::CHASE).with_archived(true));
    local.clear_archived_goals();

    assert_eq!(local.get_goals().await, Lookup::Loaded(vec![walk]));
}

#[tokio::test]
async fn archive_of_missing_goal_is_ignored() {
    let local = LocalGoalsDataSource::open_in_memory().unwrap();

    local.archive_goal(&Goal::with_id("ghost", "walk", 1, Goal::CHASE));

    assert_eq!(local.get_goals().await, Lookup::NotAvailable);
}

#[tokio::test]
async fn goals_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goals.db");
    let walk = Goal::with_id("a", "walk", 2, Goal::CHASE).touched_at(42);

    {
        let local = LocalGoalsDataSource::open(&path).unwrap();
        local.save_goal(&walk);
    }

    let reopened = LocalGoalsDataSource::open(&path).unwrap();
    assert_eq!(reopened.get_goals().await, Lookup::Loaded(vec![walk]));
}

#[tokio::test]
async fn corrupt_rows_read_as_not_available() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goals.db");
    let conn = open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO goals (id, title, polarity, interval, touched, archived)
         VALUES ('bad', 'walk', 3, 1, 0, 0);",
        [],
    )
    .unwrap();
    drop(conn);

    let local = LocalGoalsDataSource::new(Connection::open(&path).unwrap()).unwrap();

    assert_eq!(local.get_goals().await, Lookup::NotAvailable);
    assert_eq!(local.get_goal("bad").await, Lookup::NotAvailable);
}
