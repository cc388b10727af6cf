use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionMode;
use crate::timer::{TimerPhase, TimerState};

/// Every observable change in a [`crate::timer::StudyTimer`] produces an
/// event. Hosts print or forward them; the timer itself never does I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimerEvent {
    Started {
        mode: SessionMode,
        at: DateTime<Utc>,
    },
    Paused {
        elapsed_seconds: u64,
        at: DateTime<Utc>,
    },
    Resumed {
        elapsed_seconds: u64,
        at: DateTime<Utc>,
    },
    /// A pomodoro countdown reached zero and the timer flipped phase. When
    /// the new phase is `Resting` the cycle counter has just incremented.
    PhaseChanged {
        phase: TimerPhase,
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
    Reset {
        at: DateTime<Utc>,
    },
    /// Point-in-time view of the whole timer, for status displays.
    StateSnapshot {
        state: TimerState,
        mode: SessionMode,
        phase: TimerPhase,
        elapsed_seconds: u64,
        countdown_seconds: u64,
        cycles_completed: u32,
        duration_seconds: u64,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = TimerEvent::Reset { at: Utc::now() };
        let value = serde_json::to_value(&event).expect("event serializes");
        assert_eq!(value["type"], "Reset");
    }

    #[test]
    fn phase_change_carries_the_cycle_count() {
        let event = TimerEvent::PhaseChanged {
            phase: TimerPhase::Resting,
            cycles_completed: 3,
            at: Utc::now(),
        };
        let value = serde_json::to_value(&event).expect("event serializes");
        assert_eq!(value["type"], "PhaseChanged");
        assert_eq!(value["phase"], "resting");
        assert_eq!(value["cycles_completed"], 3);
    }
}
