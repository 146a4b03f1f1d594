use selfcare_core::db::open_db_in_memory;
use selfcare_core::{Goal, GoalDao, RepoError};

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let dao = GoalDao::new(&conn);

    let goal = Goal::new("floss", 1, Goal::CHASE).touched_at(1_700_000_000_000);
    dao.insert_goal(&goal).unwrap();

    let loaded = dao.get_goal_by_id(&goal.id).unwrap().unwrap();
    assert_eq!(loaded, goal);
}

#[test]
fn insert_replaces_existing_row_entirely() {
    let conn = open_db_in_memory().unwrap();
    let dao = GoalDao::new(&conn);

    let original = Goal::with_id("g-1", "walk", 2, Goal::CHASE)
        .touched_at(10)
        .with_archived(true);
    dao.insert_goal(&original).unwrap();

    let replacement = Goal::with_id("g-1", "swim", 4, Goal::AVOID);
    dao.insert_goal(&replacement).unwrap();

    let goals = dao.get_goals().unwrap();
    assert_eq!(goals, vec![replacement]);
}

#[test]
fn null_title_survives_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let dao = GoalDao::new(&conn);

    let goal = Goal {
        title: None,
        ..Goal::with_id("g-1", "", 1, Goal::CHASE)
    };
    dao.insert_goal(&goal).unwrap();

    let loaded = dao.get_goal_by_id("g-1").unwrap().unwrap();
    assert_eq!(loaded.title, None);
}

#[test]
fn get_missing_goal_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let dao = GoalDao::new(&conn);
    assert!(dao.get_goal_by_id("missing").unwrap().is_none());
}

#[test]
fn update_archived_flips_flag_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let dao = GoalDao::new(&conn);

    let goal = Goal::with_id("g-1", "walk", 2, Goal::CHASE);
    dao.insert_goal(&goal).unwrap();

    dao.update_archived("g-1", true).unwrap();
    assert!(dao.get_goal_by_id("g-1").unwrap().unwrap().archived);
    dao.update_archived("g-1", false).unwrap();
    assert!(!dao.get_goal_by_id("g-1").unwrap().unwrap().archived);

    let err = dao.update_archived("missing", true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == "missing"));
}

#[test]
fn delete_archived_removes_only_archived_rows() {
    let conn = open_db_in_memory().unwrap();
    let dao = GoalDao::new(&conn);

    dao.insert_goal(&Goal::with_id("a", "walk", 1, Goal::CHASE)).unwrap();
    dao.insert_goal(&Goal::with_id("b", "smoke", 1, Goal::AVOID).with_archived(true))
        .unwrap();
    dao.insert_goal(&Goal::with_id("c", "soda", 1, Goal::AVOID).with_archived(true))
        .unwrap();

    assert_eq!(dao.delete_archived_goals().unwrap(), 2);

    let ids: Vec<_> = dao.get_goals().unwrap().into_iter().map(|g| g.id).collect();
    assert_eq!(ids, vec!["a"]);
}

#[test]
fn delete_by_id_and_delete_all() {
    let conn = open_db_in_memory().unwrap();
    let dao = GoalDao::new(&conn);

    dao.insert_goal(&Goal::with_id("a", "walk", 1, Goal::CHASE)).unwrap();
    dao.insert_goal(&Goal::with_id("b", "read", 1, Goal::CHASE)).unwrap();

    assert_eq!(dao.delete_goal_by_id("a").unwrap(), 1);
    assert_eq!(dao.delete_goal_by_id("a").unwrap(), 0);
    dao.delete_goals().unwrap();
    assert!(dao.get_goals().unwrap().is_empty());
}

#[test]
fn goals_are_listed_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let dao = GoalDao::new(&conn);

    for id in ["c", "a", "b"] {
        dao.insert_goal(&Goal::with_id(id, "habit", 1, Goal::CHASE)).unwrap();
    }

    let ids: Vec<_> = dao.get_goals().unwrap().into_iter().map(|g| g.id).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn corrupt_flag_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO goals (id, title, polarity, interval, touched, archived)
         VALUES ('bad', 'walk', 1, 1, 0, 7);",
        [],
    )
    .unwrap();

    let err = GoalDao::new(&conn).get_goals().unwrap_err();
    match err {
        RepoError::InvalidData(message) => assert!(message.contains("archived")),
        other => panic!("unexpected error: {other}"),
    }
}
