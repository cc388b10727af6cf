//! Integration tests for the timer-to-history workflow.
//!
//! Tests the full path from ticking a timer through scoring a draft to
//! recording the finished session locally, including the kv persistence
//! the CLI relies on between invocations.

use focaplus_core::storage::LoggedSession;
use focaplus_core::{
    ActivityType, Database, PomodoroIntervals, SessionDraft, SessionMode, StudyTimer, TimerState,
};

#[test]
fn test_full_stopwatch_workflow() {
    let db = Database::open_memory().unwrap();

    // 3 minutes and 5 seconds of lesson watching.
    let mut timer = StudyTimer::stopwatch();
    timer.start();
    timer.advance(185);
    timer.pause();
    let summary = timer.finish().unwrap();
    assert_eq!(summary.duration_seconds, 185);

    // 3 whole minutes at the 1.0 multiplier.
    let draft = SessionDraft::new(&summary, ActivityType::WatchLesson);
    assert_eq!(draft.points_earned, 3);

    db.record_session(&LoggedSession::from_draft(&draft, "disc-1", None))
        .unwrap();

    let stats = db.stats_all().unwrap();
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.stopwatch_sessions, 1);
    assert_eq!(stats.total_study_seconds, 185);
    assert_eq!(stats.total_points, 3);
    assert_eq!(stats.today_sessions, 1);
}

#[test]
fn test_full_pomodoro_workflow() {
    let db = Database::open_memory().unwrap();

    let mut timer = StudyTimer::pomodoro(PomodoroIntervals::default());
    timer.start();
    // Two full cycles, then stop partway into the third study block.
    timer.advance(1500 + 300 + 1500 + 300 + 700);
    let summary = timer.finish().unwrap();
    assert_eq!(summary.duration_seconds, 3000);
    assert_eq!(summary.pomodoro_cycles, 2);

    // 50 studied minutes at the 2.0 assessment multiplier; rest intervals
    // and the partial block earn nothing.
    let draft = SessionDraft::new(&summary, ActivityType::StudyForAssessment);
    assert_eq!(draft.points_earned, 100);

    db.record_session(&LoggedSession::from_draft(
        &draft,
        "disc-1",
        Some("sess-1".into()),
    ))
    .unwrap();

    let stats = db.stats_today().unwrap();
    assert_eq!(stats.pomodoro_sessions, 1);
    assert_eq!(stats.pomodoro_cycles, 2);
    assert_eq!(stats.total_points, 100);

    let sessions = db.list_sessions().unwrap();
    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].submitted);
    assert_eq!(sessions[0].mode, SessionMode::Pomodoro);
}

#[test]
fn test_timer_survives_kv_persistence() {
    let db = Database::open_memory().unwrap();

    // First invocation: start a pomodoro and persist it mid-study.
    let mut timer = StudyTimer::pomodoro(PomodoroIntervals::default());
    timer.start();
    timer.advance(900);
    db.kv_set("active_timer", &serde_json::to_string(&timer).unwrap())
        .unwrap();

    // Second invocation: reload and keep ticking.
    let stored = db.kv_get("active_timer").unwrap().unwrap();
    let mut restored: StudyTimer = serde_json::from_str(&stored).unwrap();
    assert_eq!(restored.state(), TimerState::Running);
    assert_eq!(restored.elapsed_seconds(), 900);

    restored.advance(600);
    assert_eq!(restored.cycles_completed(), 1);

    let summary = restored.finish().unwrap();
    assert_eq!(summary.duration_seconds, 1500);
    assert_eq!(summary.started_at, timer.started_at().unwrap());

    db.kv_delete("active_timer").unwrap();
    assert!(db.kv_get("active_timer").unwrap().is_none());
}
