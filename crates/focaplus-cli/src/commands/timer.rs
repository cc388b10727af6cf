use chrono::Utc;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

use focaplus_core::storage::{Config, Database, LoggedSession};
use focaplus_core::timer::{StudyTimer, TimerState};
use focaplus_core::{ActivityType, ApiClient, SessionDraft, SessionRecorder};

const TIMER_KEY: &str = "active_timer";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a study timer
    Start {
        /// Timer mode: "pomodoro" or "stopwatch"
        #[arg(long, default_value = "pomodoro")]
        mode: String,
        /// Activity label, e.g. "Assistir Aula" (defaults to config)
        #[arg(long)]
        activity: Option<String>,
        /// Discipline instance the session will be submitted against
        #[arg(long)]
        discipline: Option<String>,
    },
    /// Print current timer state as JSON
    Status,
    /// Pause the running timer
    Pause,
    /// Resume a paused timer
    Resume,
    /// Reset a pomodoro timer to the start of its first study block
    Reset,
    /// Finish the timer and submit the session
    Finish,
    /// Discard the timer without submitting anything
    Abandon,
}

/// What the kv store holds between invocations: the timer itself plus the
/// submission context chosen at start time.
#[derive(Serialize, Deserialize)]
struct ActiveTimer {
    engine: StudyTimer,
    activity: ActivityType,
    discipline_instance_id: Option<String>,
}

fn load_active(db: &Database) -> Option<ActiveTimer> {
    let json = db.kv_get(TIMER_KEY).ok().flatten()?;
    let active: ActiveTimer = serde_json::from_str(&json).ok()?;
    // A finished timer should have been cleared; treat leftovers as absent.
    (active.engine.state() != TimerState::Finished).then_some(active)
}

fn save_active(db: &Database, active: &ActiveTimer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(active)?;
    db.kv_set(TIMER_KEY, &json)?;
    Ok(())
}

pub async fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TimerAction::Start {
            mode,
            activity,
            discipline,
        } => {
            let config = Config::load_or_default();
            if let Some(mut active) = load_active(&db) {
                // A reset pomodoro waits in Idle; start picks it back up.
                if active.engine.state() != TimerState::Idle {
                    return Err("a timer is already active; finish or abandon it first".into());
                }
                if let Some(label) = activity {
                    active.activity =
                        ActivityType::from_label(&label).unwrap_or(ActivityType::StudyContent);
                }
                if discipline.is_some() {
                    active.discipline_instance_id = discipline;
                }
                if let Some(event) = active.engine.start() {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
                save_active(&db, &active)?;
                return Ok(());
            }
            let engine = match mode.as_str() {
                "pomodoro" => StudyTimer::pomodoro(config.pomodoro_intervals()),
                "stopwatch" => StudyTimer::stopwatch(),
                other => {
                    return Err(
                        format!("unknown mode '{other}' (expected pomodoro or stopwatch)").into(),
                    )
                }
            };

            let label = activity.unwrap_or_else(|| config.defaults.activity.clone());
            // Unknown labels study plain content, like the default multiplier.
            let activity = ActivityType::from_label(&label).unwrap_or(ActivityType::StudyContent);
            let discipline_instance_id =
                discipline.or_else(|| config.defaults.discipline_instance_id.clone());

            let mut active = ActiveTimer {
                engine,
                activity,
                discipline_instance_id,
            };
            if let Some(event) = active.engine.start() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            save_active(&db, &active)?;
        }
        TimerAction::Status => {
            let Some(mut active) = load_active(&db) else {
                println!("no active timer");
                return Ok(());
            };
            for event in active.engine.catch_up(Utc::now()) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            println!("{}", serde_json::to_string_pretty(&active.engine.snapshot())?);
            save_active(&db, &active)?;
        }
        TimerAction::Pause => {
            let Some(mut active) = load_active(&db) else {
                return Err("no active timer".into());
            };
            active.engine.catch_up(Utc::now());
            match active.engine.pause() {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("{}", serde_json::to_string_pretty(&active.engine.snapshot())?),
            }
            save_active(&db, &active)?;
        }
        TimerAction::Resume => {
            let Some(mut active) = load_active(&db) else {
                return Err("no active timer".into());
            };
            match active.engine.resume() {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("{}", serde_json::to_string_pretty(&active.engine.snapshot())?),
            }
            save_active(&db, &active)?;
        }
        TimerAction::Reset => {
            let Some(mut active) = load_active(&db) else {
                return Err("no active timer".into());
            };
            active.engine.catch_up(Utc::now());
            let Some(event) = active.engine.reset() else {
                return Err("reset applies to pomodoro timers only".into());
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
            save_active(&db, &active)?;
        }
        TimerAction::Finish => {
            let Some(mut active) = load_active(&db) else {
                return Err("no active timer".into());
            };
            active.engine.catch_up(Utc::now());

            let config = Config::load_or_default();
            let discipline_id = active
                .discipline_instance_id
                .clone()
                .or_else(|| config.defaults.discipline_instance_id.clone())
                .unwrap_or_default();

            // Finish a copy: if submission is rejected up front the stored
            // timer keeps running and finish can be retried.
            let mut engine = active.engine.clone();
            let Some(summary) = engine.finish() else {
                return Err("timer is idle; start it again or abandon it".into());
            };
            let draft = SessionDraft::new(&summary, active.activity);

            let api = ApiClient::from_config(&config)?;
            let outcome = SessionRecorder::new(&api).submit(draft, &discipline_id).await?;

            let record = LoggedSession::from_draft(
                &outcome.draft,
                &discipline_id,
                outcome.session.as_ref().map(|s| s.id.clone()),
            );
            db.record_session(&record)?;
            db.kv_delete(TIMER_KEY)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        TimerAction::Abandon => match load_active(&db) {
            Some(active) => {
                active.engine.abandon();
                db.kv_delete(TIMER_KEY)?;
                println!("timer abandoned; nothing submitted");
            }
            None => println!("no active timer"),
        },
    }

    Ok(())
}
