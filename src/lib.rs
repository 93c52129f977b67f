//! # shotstat - Shot Statistics for Custom Training
//!
//! Tracks a player's shooting performance during a custom training session
//! and restores the statistics of earlier sessions from disk:
//! - **Event-driven** attempt tracking (raw game signals in, one outcome per attempt out)
//! - **Replay-safe** goal counting (duplicate goal signals are counted once)
//! - **All-or-nothing** stat file reading (corrupt files yield no data)
//!
//! ## Core Concepts
//!
//! ### Event Pipeline
//!
//! ```text
//! [host event] → [TrainingSession] → [TrainingStateMachine] → [StatUpdater] → [StatSnapshot]
//! ```
//!
//! 1. **TrainingSession** drops events while disabled or outside custom training
//! 2. **TrainingStateMachine** latches goals and commits goal-or-miss when the round changes
//! 3. **StatUpdater** applies the outcome to the overall and per-shot snapshots
//! 4. **StatSnapshot** is read by the renderer
//!
//! ### Stat Files
//!
//! `StatFileReader` lists the stat files of a training pack, most recent
//! first, reads them into `ShotStats` and replays stored impact locations
//! into an `ImpactTracker`.
//!
//! ## Example
//!
//! ```rust
//! use shotstat::*;
//!
//! let mut machine = TrainingStateMachine::new();
//! let mut context = TrainingContext::new();
//! let mut updater = SessionStatUpdater::new();
//!
//! for event in [
//!     TrainingEvent::PackLoaded { total_rounds: 3 },
//!     TrainingEvent::ShotAttempt,
//!     TrainingEvent::BallTouched,
//!     TrainingEvent::GoalScored { ball_speed: Some(81.0) },
//!     TrainingEvent::RoundChanged { round_index: 1 },
//!     TrainingEvent::ShotAttempt,
//!     TrainingEvent::RoundChanged { round_index: 2 },
//!     TrainingEvent::ShotAttempt,
//!     TrainingEvent::BallTouched,
//!     TrainingEvent::GoalScored { ball_speed: Some(93.0) },
//!     TrainingEvent::RoundChanged { round_index: 0 },
//! ] {
//!     machine.handle(event, &mut context, &mut updater);
//! }
//!
//! let snapshot = updater.snapshot();
//! assert_eq!(snapshot.attempts, 3);
//! assert_eq!(snapshot.goals, 2);
//! assert_eq!(snapshot.success_percentage, 66.67);
//! ```
//!
//! ## Modules
//!
//! - [`session`] - Host-facing session object and game state queries
//! - [`hooks`] - Host event names and subscription wiring
//! - [`state_machine`] - Attempt reconstruction from raw events
//! - [`updater`] - Semantic event application
//! - [`snapshot`] - Statistics data model
//! - [`history`] - Rolling window of recent shot outcomes
//! - [`goal_speed`] - Goal ball speed distribution
//! - [`context`] - Round and attempt context
//! - [`reader`] - Stat file reader
//! - [`stat_file`] - Stat file format definitions
//! - [`impact`] - Impact location tracking
//! - [`config`] - Session configuration
//! - [`error`] - Error types

pub mod config;
pub mod context;
pub mod error;
pub mod goal_speed;
pub mod history;
pub mod hooks;
pub mod impact;
pub mod reader;
pub mod session;
pub mod snapshot;
pub mod stat_file;
pub mod state_machine;
pub mod updater;

// Re-export main types for convenience
pub use config::SessionConfig;
pub use context::TrainingContext;
pub use error::{ConfigError, StatFileError};
pub use hooks::{hook_to_events, EventSubscriber, HookEvent};
pub use session::{GameState, TrainingSession};
pub use state_machine::{TrainingEvent, TrainingState, TrainingStateMachine};
pub use updater::{SessionStatUpdater, StatUpdater};

// Re-export the data model
pub use goal_speed::{GoalSpeed, GoalSpeedDiff};
pub use history::ShotHistory;
pub use snapshot::{ShotStats, StatDifferences, StatSnapshot};

// Re-export stat file reading
pub use impact::{ImpactTracker, ShotDistributionTracker, Vector3};
pub use reader::StatFileReader;
pub use stat_file::StatFileVersion;
