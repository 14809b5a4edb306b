use anyhow::Result;
use chrono::Utc;
use tempfile::tempdir;

use reps::storage::{Database, SessionSummary, StoredSet};

#[test]
fn database_supports_core_history_workflow() -> Result<()> {
    let tmp = tempdir()?;
    let db_path = tmp.path().join("reps.db");
    let db = Database::open_path(&db_path)?;

    let session = SessionSummary::new(
        "rec-1".to_string(),
        "Push Day".to_string(),
        1800,
        6,
    );
    db.insert_session(&session)?;

    let sets = vec![
        StoredSet::new(
            "rec-1".to_string(),
            "Bench Press".to_string(),
            Some(8),
            Some(60.0),
            None,
            Utc::now(),
        ),
        StoredSet::new(
            "rec-1".to_string(),
            "Plank".to_string(),
            None,
            None,
            Some(60),
            Utc::now(),
        ),
    ];
    db.insert_sets(&sets)?;

    let fetched = db.get_session("rec-1")?.expect("session should exist");
    assert_eq!(fetched.workout_name, "Push Day");
    assert_eq!(fetched.duration_secs, 1800);
    assert_eq!(fetched.total_sets, 6);

    let stored = db.get_session_sets("rec-1")?;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].exercise, "Bench Press");
    assert_eq!(stored[0].reps, Some(8));
    assert_eq!(stored[1].duration_secs, Some(60));

    let listed = db.list_sessions(10)?;
    assert_eq!(listed.len(), 1);

    Ok(())
}

#[test]
fn search_matches_workout_name_case_insensitively() -> Result<()> {
    let tmp = tempdir()?;
    let db = Database::open_path(&tmp.path().join("reps.db"))?;

    db.insert_session(&SessionSummary::new(
        "rec-1".to_string(),
        "Leg Day".to_string(),
        900,
        3,
    ))?;
    db.insert_session(&SessionSummary::new(
        "rec-2".to_string(),
        "Upper Body".to_string(),
        1200,
        4,
    ))?;

    let results = db.search_sessions("leg", 10)?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "rec-1");

    let results = db.search_sessions("nothing", 10)?;
    assert!(results.is_empty());

    Ok(())
}

#[test]
fn delete_session_cascades_to_sets() -> Result<()> {
    let tmp = tempdir()?;
    let db = Database::open_path(&tmp.path().join("reps.db"))?;

    db.insert_session(&SessionSummary::new(
        "rec-1".to_string(),
        "Push Day".to_string(),
        600,
        2,
    ))?;
    db.insert_sets(&[StoredSet::new(
        "rec-1".to_string(),
        "Bench Press".to_string(),
        Some(8),
        Some(60.0),
        None,
        Utc::now(),
    )])?;

    db.delete_session("rec-1")?;

    assert!(db.get_session("rec-1")?.is_none());
    assert!(db.get_session_sets("rec-1")?.is_empty());

    Ok(())
}

#[test]
fn reopening_preserves_data_and_schema_version() -> Result<()> {
    let tmp = tempdir()?;
    let db_path = tmp.path().join("reps.db");

    {
        let db = Database::open_path(&db_path)?;
        db.insert_session(&SessionSummary::new(
            "rec-1".to_string(),
            "Push Day".to_string(),
            600,
            2,
        ))?;
    }

    let db = Database::open_path(&db_path)?;
    assert_eq!(db.schema_version()?, 1);
    assert_eq!(db.list_sessions(10)?.len(), 1);

    Ok(())
}
