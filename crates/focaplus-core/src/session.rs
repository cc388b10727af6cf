//! Study-session types.
//!
//! A session is assembled client-side when a timer finishes and submitted
//! to the backend exactly once. The activity type decides the XP multiplier;
//! the mode decides how studied time was counted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring;
use crate::timer::TimerSummary;

/// Category of studying being timed. Wire names match the backend enum;
/// display labels are the Portuguese strings the XP table is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    #[serde(rename = "ASSESSMENT")]
    StudyForAssessment,
    #[serde(rename = "HOMEWORK")]
    DoHomework,
    #[serde(rename = "LESSON")]
    WatchLesson,
    #[serde(rename = "CONTENT")]
    StudyContent,
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::StudyForAssessment,
        ActivityType::DoHomework,
        ActivityType::WatchLesson,
        ActivityType::StudyContent,
    ];

    /// Display label, also the key used by the XP lookup table.
    pub fn label(self) -> &'static str {
        match self {
            ActivityType::StudyForAssessment => "Estudar para Avaliação",
            ActivityType::DoHomework => "Fazer Tarefa de casa",
            ActivityType::WatchLesson => "Assistir Aula",
            ActivityType::StudyContent => "Estudar Conteúdo",
        }
    }

    /// Resolve a display label back to its activity type.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.label() == label)
    }

    /// Wire name for storage and the backend enum.
    pub fn wire_name(self) -> &'static str {
        match self {
            ActivityType::StudyForAssessment => "ASSESSMENT",
            ActivityType::DoHomework => "HOMEWORK",
            ActivityType::WatchLesson => "LESSON",
            ActivityType::StudyContent => "CONTENT",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.wire_name() == name)
    }

    /// XP multiplier applied per studied minute.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityType::StudyForAssessment => 2.0,
            ActivityType::DoHomework => 1.5,
            ActivityType::WatchLesson => 1.0,
            ActivityType::StudyContent => 1.0,
        }
    }
}

/// How studied time is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionMode {
    /// Fixed study/rest intervals; only completed study blocks count.
    Pomodoro,
    /// Free-running elapsed time.
    Stopwatch,
}

impl SessionMode {
    pub fn wire_name(self) -> &'static str {
        match self {
            SessionMode::Pomodoro => "POMODORO",
            SessionMode::Stopwatch => "STOPWATCH",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "POMODORO" => Some(SessionMode::Pomodoro),
            "STOPWATCH" => Some(SessionMode::Stopwatch),
            _ => None,
        }
    }
}

/// A finished session ready for submission.
///
/// Built from a [`TimerSummary`] plus the activity being studied.
/// `points_earned` is computed exactly once here and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDraft {
    pub activity: ActivityType,
    pub mode: SessionMode,
    /// Time counted as studying, in seconds. Excludes rest intervals.
    pub duration_seconds: u64,
    /// Completed study cycles. Always 0 for stopwatch sessions.
    pub pomodoro_cycles: u32,
    /// At least 1, however short the session was.
    pub points_earned: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl SessionDraft {
    pub fn new(summary: &TimerSummary, activity: ActivityType) -> Self {
        Self {
            activity,
            mode: summary.mode,
            duration_seconds: summary.duration_seconds,
            pomodoro_cycles: summary.pomodoro_cycles,
            points_earned: scoring::xp_for(summary.duration_seconds, activity),
            started_at: summary.started_at,
            ended_at: summary.ended_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_to_activity_types() {
        assert_eq!(
            ActivityType::from_label("Estudar para Avaliação"),
            Some(ActivityType::StudyForAssessment)
        );
        assert_eq!(
            ActivityType::from_label("Fazer Tarefa de casa"),
            Some(ActivityType::DoHomework)
        );
        assert_eq!(
            ActivityType::from_label("Assistir Aula"),
            Some(ActivityType::WatchLesson)
        );
        assert_eq!(
            ActivityType::from_label("Estudar Conteúdo"),
            Some(ActivityType::StudyContent)
        );
        assert_eq!(ActivityType::from_label("Cozinhar"), None);
    }

    #[test]
    fn wire_names_round_trip() {
        for activity in ActivityType::ALL {
            assert_eq!(ActivityType::from_wire(activity.wire_name()), Some(activity));
        }
        assert_eq!(SessionMode::from_wire("POMODORO"), Some(SessionMode::Pomodoro));
        assert_eq!(SessionMode::from_wire("STOPWATCH"), Some(SessionMode::Stopwatch));
        assert_eq!(SessionMode::from_wire("pomodoro"), None);
    }

    #[test]
    fn serde_uses_backend_enum_names() {
        assert_eq!(
            serde_json::to_value(ActivityType::StudyForAssessment).unwrap(),
            serde_json::json!("ASSESSMENT")
        );
        assert_eq!(
            serde_json::to_value(SessionMode::Stopwatch).unwrap(),
            serde_json::json!("STOPWATCH")
        );
        let parsed: ActivityType = serde_json::from_str("\"LESSON\"").unwrap();
        assert_eq!(parsed, ActivityType::WatchLesson);
    }

    #[test]
    fn draft_computes_points_once_from_summary() {
        let now = Utc::now();
        let summary = TimerSummary {
            mode: SessionMode::Stopwatch,
            duration_seconds: 185,
            pomodoro_cycles: 0,
            started_at: now,
            ended_at: now + chrono::Duration::seconds(185),
        };
        let draft = SessionDraft::new(&summary, ActivityType::WatchLesson);
        assert_eq!(draft.duration_seconds, 185);
        assert_eq!(draft.pomodoro_cycles, 0);
        assert_eq!(draft.points_earned, 3);
        assert!(draft.ended_at >= draft.started_at);
    }

    #[test]
    fn pomodoro_draft_scores_study_blocks() {
        let now = Utc::now();
        let summary = TimerSummary {
            mode: SessionMode::Pomodoro,
            duration_seconds: 3000,
            pomodoro_cycles: 2,
            started_at: now,
            ended_at: now + chrono::Duration::seconds(3600),
        };
        let draft = SessionDraft::new(&summary, ActivityType::StudyForAssessment);
        // 50 studied minutes at the 2.0 multiplier.
        assert_eq!(draft.points_earned, 100);
        assert_eq!(draft.pomodoro_cycles, 2);
    }
}
