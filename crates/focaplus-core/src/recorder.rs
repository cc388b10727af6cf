//! Session submission with point read-back.
//!
//! Submitting a finished session is best-effort: the user keeps their
//! locally computed points whatever the backend does. Only a missing
//! discipline instance blocks, because without one the backend cannot
//! credit the session to an enrolment.

use serde::{Deserialize, Serialize};

use crate::api::{scores, ApiClient, CreateStudySession, ScoreRecord, StudySessionRecord};
use crate::error::{ApiError, Result, ValidationError};
use crate::session::SessionDraft;

/// Discipline total reported after a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "points", rename_all = "lowercase")]
pub enum TotalPoints {
    /// The backend scored the session; this is the sum of its records.
    Confirmed(i64),
    /// Computed locally because the backend total could not be trusted
    /// (submission failed, or the session has no score record yet).
    Estimated(i64),
}

impl TotalPoints {
    pub fn value(self) -> i64 {
        match self {
            TotalPoints::Confirmed(points) | TotalPoints::Estimated(points) => points,
        }
    }

    pub fn is_confirmed(self) -> bool {
        matches!(self, TotalPoints::Confirmed(_))
    }
}

/// What a submission attempt produced.
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    /// The backend's copy, when the submission went through.
    pub session: Option<StudySessionRecord>,
    pub draft: SessionDraft,
    pub total_points: TotalPoints,
}

/// Best-effort total when the backend's own sum is unavailable: every
/// positive score already on record, plus the points just earned.
pub fn estimated_total(scores: &[ScoreRecord], points_earned: u32) -> i64 {
    let known: i64 = scores.iter().filter(|s| s.points > 0).map(|s| s.points).sum();
    known + i64::from(points_earned)
}

pub struct SessionRecorder<'a> {
    api: &'a ApiClient,
}

impl<'a> SessionRecorder<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Submit a finished session against a discipline instance.
    ///
    /// The happy path resolves the discipline's course, posts the session
    /// and reads the discipline's score records back to confirm the total.
    /// Any network or backend failure after validation degrades to an
    /// estimated total instead of returning an error.
    pub async fn submit(
        &self,
        draft: SessionDraft,
        discipline_instance_id: &str,
    ) -> Result<RecordOutcome> {
        if discipline_instance_id.trim().is_empty() {
            return Err(ValidationError::MissingDisciplineInstance.into());
        }
        if draft.ended_at < draft.started_at {
            return Err(ValidationError::InvalidTimeRange {
                start: draft.started_at,
                end: draft.ended_at,
            }
            .into());
        }

        match self.submit_inner(&draft, discipline_instance_id).await {
            Ok((session, total_points)) => Ok(RecordOutcome {
                session: Some(session),
                draft,
                total_points,
            }),
            Err(err) => {
                eprintln!("warning: study session submission failed: {err}");
                let total_points = match self.api.scores_by_discipline(discipline_instance_id).await
                {
                    Ok(scores) => TotalPoints::Estimated(estimated_total(&scores, draft.points_earned)),
                    Err(_) => TotalPoints::Estimated(i64::from(draft.points_earned)),
                };
                Ok(RecordOutcome {
                    session: None,
                    draft,
                    total_points,
                })
            }
        }
    }

    async fn submit_inner(
        &self,
        draft: &SessionDraft,
        discipline_instance_id: &str,
    ) -> Result<(StudySessionRecord, TotalPoints), ApiError> {
        let discipline = self.api.discipline_instance(discipline_instance_id).await?;
        let body =
            CreateStudySession::from_draft(draft, &discipline.user_course_id, discipline_instance_id);
        let created = self.api.create_study_session(&body).await?;

        let records = self.api.scores_by_discipline(discipline_instance_id).await?;
        let scored = records
            .iter()
            .any(|s| s.source_id == created.id && s.source_type == "STUDY_SESSION" && s.points != 0);
        let total = if scored {
            TotalPoints::Confirmed(scores::sum_points(&records))
        } else {
            // The backend scores sessions asynchronously; until its record
            // shows up the just-earned points are counted locally.
            TotalPoints::Estimated(estimated_total(&records, draft.points_earned))
        };
        Ok((created, total))
    }
}
