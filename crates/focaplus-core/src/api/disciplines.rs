//! Discipline-instance endpoints.

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ApiError;

/// A discipline instance, reduced to the fields session submission needs.
/// The backend sends more; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineInstance {
    pub id: String,
    /// The enrolment a submitted session is credited to.
    pub user_course_id: String,
    pub name: String,
}

impl ApiClient {
    /// `GET /discipline-instances/{id}`
    pub async fn discipline_instance(&self, id: &str) -> Result<DisciplineInstance, ApiError> {
        self.get_json(&format!("/discipline-instances/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_backend_payload() {
        let json = r#"{
            "id": "disc-1",
            "userCourseId": "course-1",
            "disciplineTemplateId": "tmpl-1",
            "periodInstanceId": null,
            "plannedStart": null,
            "plannedEnd": null,
            "status": "IN_PROGRESS",
            "grade": null,
            "gradeSystem": "NUMERIC",
            "assessmentsCount": 3,
            "createdAt": "2024-02-10T08:00:00Z",
            "name": "Cálculo I",
            "notes": null
        }"#;
        let instance: DisciplineInstance = serde_json::from_str(json).unwrap();
        assert_eq!(instance.id, "disc-1");
        assert_eq!(instance.user_course_id, "course-1");
        assert_eq!(instance.name, "Cálculo I");
    }
}
