//! Score-record endpoints.
//!
//! The backend writes one score record per scored source (study session,
//! assessment, task). Totals are never served directly; clients sum the
//! records they fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: String,
    pub user_id: String,
    pub user_course_id: String,
    pub discipline_instance_id: String,
    /// What produced this score, e.g. `STUDY_SESSION`.
    pub source_type: String,
    pub source_id: String,
    pub points: i64,
    pub created_at: DateTime<Utc>,
}

/// Client-side total across a set of score records.
pub fn sum_points(records: &[ScoreRecord]) -> i64 {
    records.iter().map(|r| r.points).sum()
}

impl ApiClient {
    /// `GET /score-records/me`
    pub async fn my_scores(&self) -> Result<Vec<ScoreRecord>, ApiError> {
        self.get_json("/score-records/me").await
    }

    /// `GET /score-records/by-discipline/{id}`
    pub async fn scores_by_discipline(
        &self,
        discipline_instance_id: &str,
    ) -> Result<Vec<ScoreRecord>, ApiError> {
        self.get_json(&format!("/score-records/by-discipline/{discipline_instance_id}"))
            .await
    }

    /// `GET /score-records/by-course/{id}`
    pub async fn scores_by_course(&self, user_course_id: &str) -> Result<Vec<ScoreRecord>, ApiError> {
        self.get_json(&format!("/score-records/by-course/{user_course_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(points: i64) -> ScoreRecord {
        ScoreRecord {
            id: format!("score-{points}"),
            user_id: "user-1".into(),
            user_course_id: "course-1".into(),
            discipline_instance_id: "disc-1".into(),
            source_type: "STUDY_SESSION".into(),
            source_id: "sess-1".into(),
            points,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn totals_are_summed_client_side() {
        assert_eq!(sum_points(&[]), 0);
        assert_eq!(sum_points(&[record(10), record(25), record(0)]), 35);
    }

    #[test]
    fn record_parses_backend_json() {
        let json = r#"{
            "id": "score-1",
            "userId": "user-1",
            "userCourseId": "course-1",
            "disciplineInstanceId": "disc-1",
            "sourceType": "STUDY_SESSION",
            "sourceId": "sess-1",
            "points": 42,
            "createdAt": "2024-05-01T13:00:05Z"
        }"#;
        let record: ScoreRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.points, 42);
        assert_eq!(record.source_type, "STUDY_SESSION");
        assert_eq!(record.source_id, "sess-1");
    }
}
