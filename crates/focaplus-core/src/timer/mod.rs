mod engine;

pub use engine::{StudyTimer, TimerPhase, TimerState, TimerSummary};

use serde::{Deserialize, Serialize};

/// Fixed phase lengths for a pomodoro timer, in seconds.
///
/// Defaults to the classic 25-minute study block and 5-minute rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroIntervals {
    pub study_seconds: u64,
    pub rest_seconds: u64,
}

impl PomodoroIntervals {
    pub fn from_minutes(study_min: u64, rest_min: u64) -> Self {
        Self {
            study_seconds: study_min.saturating_mul(60),
            rest_seconds: rest_min.saturating_mul(60),
        }
    }
}

impl Default for PomodoroIntervals {
    fn default() -> Self {
        Self {
            study_seconds: 25 * 60,
            rest_seconds: 5 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_intervals_are_25_and_5_minutes() {
        let intervals = PomodoroIntervals::default();
        assert_eq!(intervals.study_seconds, 1500);
        assert_eq!(intervals.rest_seconds, 300);
    }

    #[test]
    fn intervals_convert_from_minutes() {
        let intervals = PomodoroIntervals::from_minutes(50, 10);
        assert_eq!(intervals.study_seconds, 3000);
        assert_eq!(intervals.rest_seconds, 600);
    }
}
