//! Tick-driven study timer.
//!
//! The timer never spawns threads or sleeps. The owner drives it by calling
//! [`StudyTimer::tick`] once per logical second (or [`StudyTimer::catch_up`]
//! with a wall-clock instant after a gap) and persists the serialized state
//! between invocations.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::events::TimerEvent;
use crate::session::SessionMode;
use crate::timer::PomodoroIntervals;

/// Lifecycle state of a [`StudyTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Which half of the pomodoro cycle is active. A stopwatch timer stays in
/// `Studying` for its whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Studying,
    Resting,
}

/// Immutable result of a finished timer, ready to be priced into a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSummary {
    pub mode: SessionMode,
    pub duration_seconds: u64,
    pub pomodoro_cycles: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// Study timer state machine.
///
/// Stopwatch mode counts up one second per tick. Pomodoro mode counts a
/// per-phase countdown down and flips between study and rest automatically;
/// a completed study block increments `cycles_completed` at the moment its
/// countdown reaches zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyTimer {
    mode: SessionMode,
    intervals: PomodoroIntervals,
    state: TimerState,
    phase: TimerPhase,
    elapsed_seconds: u64,
    /// Seconds left in the current phase. Unused (zero) in stopwatch mode.
    countdown_seconds: u64,
    cycles_completed: u32,
    started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    last_tick_at: Option<DateTime<Utc>>,
}

impl StudyTimer {
    pub fn stopwatch() -> Self {
        Self::with_mode(SessionMode::Stopwatch, PomodoroIntervals::default())
    }

    pub fn pomodoro(intervals: PomodoroIntervals) -> Self {
        Self::with_mode(SessionMode::Pomodoro, intervals)
    }

    fn with_mode(mode: SessionMode, intervals: PomodoroIntervals) -> Self {
        let countdown_seconds = match mode {
            SessionMode::Pomodoro => intervals.study_seconds,
            SessionMode::Stopwatch => 0,
        };
        Self {
            mode,
            intervals,
            state: TimerState::Idle,
            phase: TimerPhase::Studying,
            elapsed_seconds: 0,
            countdown_seconds,
            cycles_completed: 0,
            started_at: None,
            last_tick_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Seconds spent running, across all phases. Pauses do not count.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn countdown_seconds(&self) -> u64 {
        self.countdown_seconds
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Creditable study time so far: the raw elapsed count for a stopwatch,
    /// completed study blocks only for a pomodoro. A study block in progress
    /// contributes nothing until its countdown reaches zero.
    pub fn duration_so_far(&self) -> u64 {
        match self.mode {
            SessionMode::Stopwatch => self.elapsed_seconds,
            SessionMode::Pomodoro => {
                u64::from(self.cycles_completed) * self.intervals.study_seconds
            }
        }
    }

    pub fn snapshot(&self) -> TimerEvent {
        TimerEvent::StateSnapshot {
            state: self.state,
            mode: self.mode,
            phase: self.phase,
            elapsed_seconds: self.elapsed_seconds,
            countdown_seconds: self.countdown_seconds,
            cycles_completed: self.cycles_completed,
            duration_seconds: self.duration_so_far(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────────

    /// Idle → Running. The start timestamp is recorded on the first start
    /// only and survives both pauses and resets.
    pub fn start(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Idle {
            return None;
        }
        let now = Utc::now();
        self.state = TimerState::Running;
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.last_tick_at = Some(now);
        Some(TimerEvent::Started {
            mode: self.mode,
            at: now,
        })
    }

    /// Running → Paused. All counters freeze.
    pub fn pause(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        self.last_tick_at = None;
        Some(TimerEvent::Paused {
            elapsed_seconds: self.elapsed_seconds,
            at: Utc::now(),
        })
    }

    /// Paused → Running. Counting continues where it stopped.
    pub fn resume(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Paused {
            return None;
        }
        let now = Utc::now();
        self.state = TimerState::Running;
        self.last_tick_at = Some(now);
        Some(TimerEvent::Resumed {
            elapsed_seconds: self.elapsed_seconds,
            at: now,
        })
    }

    /// Advance one logical second. Ignored unless running.
    ///
    /// Pomodoro phase flips happen here: when a study countdown reaches zero
    /// the cycle counter increments and the rest countdown begins; when a
    /// rest countdown reaches zero the next study block begins. Both flips
    /// are automatic and reported through the returned event.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.elapsed_seconds += 1;
        if self.mode != SessionMode::Pomodoro {
            return None;
        }
        self.countdown_seconds = self.countdown_seconds.saturating_sub(1);
        if self.countdown_seconds > 0 {
            return None;
        }
        match self.phase {
            TimerPhase::Studying => {
                self.cycles_completed += 1;
                self.phase = TimerPhase::Resting;
                self.countdown_seconds = self.intervals.rest_seconds;
            }
            TimerPhase::Resting => {
                self.phase = TimerPhase::Studying;
                self.countdown_seconds = self.intervals.study_seconds;
            }
        }
        Some(TimerEvent::PhaseChanged {
            phase: self.phase,
            cycles_completed: self.cycles_completed,
            at: Utc::now(),
        })
    }

    /// Apply `n` ticks in one call, collecting any phase flips.
    pub fn advance(&mut self, n: u64) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            if self.state != TimerState::Running {
                break;
            }
            if let Some(event) = self.tick() {
                events.push(event);
            }
        }
        events
    }

    /// Apply every whole second elapsed on the wall clock since the last
    /// tick. Hosts that persist the timer between invocations call this
    /// before issuing any command. Sub-second remainders carry over.
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> Vec<TimerEvent> {
        if self.state != TimerState::Running {
            return Vec::new();
        }
        let Some(last) = self.last_tick_at else {
            self.last_tick_at = Some(now);
            return Vec::new();
        };
        let whole = (now - last).num_seconds();
        if whole <= 0 {
            return Vec::new();
        }
        let events = self.advance(whole as u64);
        self.last_tick_at = Some(last + Duration::seconds(whole));
        events
    }

    /// Pomodoro only: back to the start of the first study block, cycle
    /// count cleared, not running. The original start timestamp is kept.
    pub fn reset(&mut self) -> Option<TimerEvent> {
        if self.mode != SessionMode::Pomodoro || self.state == TimerState::Finished {
            return None;
        }
        self.state = TimerState::Idle;
        self.phase = TimerPhase::Studying;
        self.elapsed_seconds = 0;
        self.countdown_seconds = self.intervals.study_seconds;
        self.cycles_completed = 0;
        self.last_tick_at = None;
        Some(TimerEvent::Reset { at: Utc::now() })
    }

    /// Finish a running or paused timer and lock in its creditable time.
    /// Stopwatch sessions credit every elapsed second; pomodoro sessions
    /// credit completed study blocks only, so a partial block is dropped.
    ///
    /// Returns `None` when the timer was never started or already finished.
    pub fn finish(&mut self) -> Option<TimerSummary> {
        match self.state {
            TimerState::Running | TimerState::Paused => {}
            TimerState::Idle | TimerState::Finished => return None,
        }
        self.state = TimerState::Finished;
        self.last_tick_at = None;
        let ended_at = Utc::now();
        Some(TimerSummary {
            mode: self.mode,
            duration_seconds: self.duration_so_far(),
            pomodoro_cycles: self.cycles_completed,
            started_at: self.started_at.unwrap_or(ended_at),
            ended_at,
        })
    }

    /// Discard the timer without crediting anything. Explicit counterpart to
    /// [`StudyTimer::finish`] for hosts that let the user walk away.
    pub fn abandon(self) {}
}
