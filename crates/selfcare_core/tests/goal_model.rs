use selfcare_core::{Goal, GoalValidationError};
use uuid::Uuid;

#[test]
fn new_goal_sets_defaults() {
    let goal = Goal::new("stretch", 2, Goal::CHASE);

    assert!(Uuid::parse_str(&goal.id).is_ok());
    assert_eq!(goal.title.as_deref(), Some("stretch"));
    assert_eq!(goal.interval, 2);
    assert!(goal.polarity);
    assert_eq!(goal.touched, 0);
    assert!(goal.is_active());
    assert!(!goal.is_empty());
}

#[test]
fn new_goals_get_distinct_ids() {
    let first = Goal::new("a", 1, Goal::CHASE);
    let second = Goal::new("a", 1, Goal::CHASE);
    assert_ne!(first.id, second.id);
}

#[test]
fn updates_return_new_values_and_leave_original_untouched() {
    let goal = Goal::with_id("g-1", "walk", 3, Goal::CHASE);

    let archived = goal.with_archived(true);
    let touched = goal.touched_at(1_700_000_000_000);
    let edited = goal.with_title("run").with_interval(5).with_polarity(Goal::AVOID);

    assert!(!goal.archived);
    assert!(archived.is_archived());
    assert_eq!(touched.touched, 1_700_000_000_000);
    assert_eq!(edited.title_for_list(), "run");
    assert_eq!(edited.interval, 5);
    assert!(!edited.polarity);
    assert_eq!(edited.id, goal.id);
}

#[test]
fn empty_title_is_empty_goal() {
    let goal = Goal::with_id("g-1", "", 1, Goal::CHASE);
    assert!(goal.is_empty());
    assert_eq!(goal.validate(), Err(GoalValidationError::EmptyTitle));

    let untitled = Goal {
        title: None,
        ..goal
    };
    assert!(untitled.is_empty());
    assert_eq!(untitled.title_for_list(), "");
}

#[test]
fn validate_rejects_blank_id_and_non_positive_interval() {
    assert_eq!(
        Goal::with_id("  ", "walk", 1, Goal::CHASE).validate(),
        Err(GoalValidationError::EmptyId)
    );
    assert_eq!(
        Goal::with_id("g-1", "walk", 0, Goal::CHASE).validate(),
        Err(GoalValidationError::NonPositiveInterval(0))
    );
    assert!(Goal::with_id("g-1", "walk", 1, Goal::CHASE).validate().is_ok());
}

#[test]
fn serialization_uses_snake_case_fields() {
    let goal = Goal::with_id("g-1", "walk", 3, Goal::AVOID)
        .touched_at(1_700_000_000_000)
        .with_archived(true);

    let json = serde_json::to_value(&goal).unwrap();
    assert_eq!(json["id"], "g-1");
    assert_eq!(json["title"], "walk");
    assert_eq!(json["interval"], 3);
    assert_eq!(json["polarity"], false);
    assert_eq!(json["touched"], 1_700_000_000_000_i64);
    assert_eq!(json["archived"], true);

    let decoded: Goal = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, goal);
}
