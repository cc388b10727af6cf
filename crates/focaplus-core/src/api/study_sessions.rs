//! Study-session endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::session::{ActivityType, SessionDraft, SessionMode};

/// Request body for `POST /study-sessions`.
///
/// Stopwatch sessions omit `pomodoroCycles` from the wire entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudySession {
    pub user_course_id: String,
    pub discipline_instance_id: String,
    pub session_type: ActivityType,
    pub mode: SessionMode,
    pub duration_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pomodoro_cycles: Option<u32>,
    pub points_earned: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl CreateStudySession {
    pub fn from_draft(
        draft: &SessionDraft,
        user_course_id: &str,
        discipline_instance_id: &str,
    ) -> Self {
        Self {
            user_course_id: user_course_id.to_string(),
            discipline_instance_id: discipline_instance_id.to_string(),
            session_type: draft.activity,
            mode: draft.mode,
            duration_seconds: draft.duration_seconds,
            pomodoro_cycles: match draft.mode {
                SessionMode::Pomodoro => Some(draft.pomodoro_cycles),
                SessionMode::Stopwatch => None,
            },
            points_earned: draft.points_earned,
            started_at: draft.started_at,
            ended_at: draft.ended_at,
        }
    }
}

/// A study session as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySessionRecord {
    pub id: String,
    pub user_id: String,
    pub user_course_id: String,
    #[serde(default)]
    pub discipline_instance_id: Option<String>,
    pub session_type: ActivityType,
    pub mode: SessionMode,
    pub duration_seconds: u64,
    #[serde(default)]
    pub pomodoro_cycles: u32,
    pub points_earned: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl ApiClient {
    /// `POST /study-sessions`
    pub async fn create_study_session(
        &self,
        body: &CreateStudySession,
    ) -> Result<StudySessionRecord, ApiError> {
        self.post_json("/study-sessions", body).await
    }

    /// `GET /study-sessions`
    pub async fn list_study_sessions(&self) -> Result<Vec<StudySessionRecord>, ApiError> {
        self.get_json("/study-sessions").await
    }

    /// `GET /study-sessions/by-discipline/{id}`
    pub async fn study_sessions_by_discipline(
        &self,
        discipline_instance_id: &str,
    ) -> Result<Vec<StudySessionRecord>, ApiError> {
        self.get_json(&format!("/study-sessions/by-discipline/{discipline_instance_id}"))
            .await
    }

    /// `GET /study-sessions/{id}`
    pub async fn get_study_session(&self, id: &str) -> Result<StudySessionRecord, ApiError> {
        self.get_json(&format!("/study-sessions/{id}")).await
    }

    /// `DELETE /study-sessions/{id}`
    pub async fn delete_study_session(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/study-sessions/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stopwatch_draft() -> SessionDraft {
        let now = Utc::now();
        SessionDraft {
            activity: ActivityType::WatchLesson,
            mode: SessionMode::Stopwatch,
            duration_seconds: 185,
            pomodoro_cycles: 0,
            points_earned: 3,
            started_at: now,
            ended_at: now,
        }
    }

    #[test]
    fn create_body_uses_camel_case_wire_names() {
        let body = CreateStudySession::from_draft(&stopwatch_draft(), "course-1", "disc-1");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["userCourseId"], "course-1");
        assert_eq!(value["disciplineInstanceId"], "disc-1");
        assert_eq!(value["sessionType"], "LESSON");
        assert_eq!(value["mode"], "STOPWATCH");
        assert_eq!(value["durationSeconds"], 185);
        assert_eq!(value["pointsEarned"], 3);
        assert!(value.get("startedAt").is_some());
    }

    #[test]
    fn stopwatch_bodies_omit_pomodoro_cycles() {
        let body = CreateStudySession::from_draft(&stopwatch_draft(), "course-1", "disc-1");
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("pomodoroCycles").is_none());
    }

    #[test]
    fn pomodoro_bodies_carry_the_cycle_count() {
        let mut draft = stopwatch_draft();
        draft.mode = SessionMode::Pomodoro;
        draft.pomodoro_cycles = 2;
        let body = CreateStudySession::from_draft(&draft, "course-1", "disc-1");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["pomodoroCycles"], 2);
        assert_eq!(value["mode"], "POMODORO");
    }

    #[test]
    fn response_parses_backend_json() {
        let json = r#"{
            "id": "sess-1",
            "userId": "user-1",
            "userCourseId": "course-1",
            "disciplineInstanceId": "disc-1",
            "sessionType": "ASSESSMENT",
            "mode": "POMODORO",
            "durationSeconds": 3000,
            "pomodoroCycles": 2,
            "pointsEarned": 100,
            "startedAt": "2024-05-01T12:00:00Z",
            "endedAt": "2024-05-01T13:00:00Z"
        }"#;
        let record: StudySessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "sess-1");
        assert_eq!(record.session_type, ActivityType::StudyForAssessment);
        assert_eq!(record.pomodoro_cycles, 2);
        assert_eq!(record.points_earned, 100);
    }
}
