//! # Focaplus Core Library
//!
//! Core business logic for the Focaplus study tracker. All operations are
//! available through a standalone CLI binary; any richer frontend is a thin
//! layer over this same library.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven state machine. The caller invokes `tick()`
//!   once per second (or `catch_up()` after a gap) and persists the
//!   serialized state between invocations
//! - **Scoring**: the XP table mapping studied minutes to points
//! - **Recorder**: best-effort submission of finished sessions to the
//!   study-platform backend, with a locally computed fallback total
//! - **Storage**: SQLite session history and TOML configuration
//!
//! ## Key Components
//!
//! - [`StudyTimer`]: pomodoro/stopwatch state machine
//! - [`SessionRecorder`]: submission and point read-back
//! - [`ApiClient`]: typed backend REST client
//! - [`Database`]: session history and statistics persistence
//! - [`Config`]: application configuration management

pub mod timer;
pub mod scoring;
pub mod session;
pub mod recorder;
pub mod api;
pub mod auth;
pub mod storage;
pub mod events;
pub mod error;

pub use timer::{PomodoroIntervals, StudyTimer, TimerPhase, TimerState, TimerSummary};
pub use scoring::calculate_xp;
pub use session::{ActivityType, SessionDraft, SessionMode};
pub use recorder::{RecordOutcome, SessionRecorder, TotalPoints};
pub use api::ApiClient;
pub use storage::{Config, Database};
pub use events::TimerEvent;
pub use error::{ApiError, ConfigError, CoreError, DatabaseError, ValidationError};
