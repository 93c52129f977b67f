//! Training session module.
//!
//! `TrainingSession` is the object the host talks to. It owns the
//! configuration, the shared `TrainingContext`, the state machine and the
//! stat updater, and filters out events that must not reach the state
//! machine.

use crate::config::SessionConfig;
use crate::context::TrainingContext;
use crate::reader::StatFileReader;
use crate::snapshot::{ShotStats, StatSnapshot};
use crate::state_machine::{TrainingEvent, TrainingState, TrainingStateMachine};
use crate::updater::{SessionStatUpdater, StatUpdater};
use tracing::debug;

/// Queries the host answers about the running game.
pub trait GameState {
    /// Whether the game is currently in custom training.
    fn is_in_custom_training(&self) -> bool;

    /// Current ball speed, if a ball exists.
    fn ball_speed(&self) -> Option<f64>;

    /// Number of rounds of the loaded training pack.
    fn total_rounds(&self) -> u32;

    /// Index of the active round of the loaded training pack.
    fn active_round_index(&self) -> u32;
}

/// Statistics tracking for one player's custom training.
///
/// # Examples
///
/// ```rust
/// use shotstat::{GameState, SessionConfig, TrainingEvent, TrainingSession};
///
/// struct Training;
///
/// impl GameState for Training {
///     fn is_in_custom_training(&self) -> bool { true }
///     fn ball_speed(&self) -> Option<f64> { Some(64.0) }
///     fn total_rounds(&self) -> u32 { 3 }
///     fn active_round_index(&self) -> u32 { 0 }
/// }
///
/// let mut session = TrainingSession::new(SessionConfig::default());
/// session.training_pack_loaded(3);
/// session.handle_event(TrainingEvent::RoundChanged { round_index: 0 }, &Training);
/// session.handle_event(TrainingEvent::ShotAttempt, &Training);
/// session.handle_event(TrainingEvent::RoundChanged { round_index: 1 }, &Training);
///
/// assert_eq!(session.snapshot().attempts, 1);
/// assert_eq!(session.snapshot().miss_streak, 1);
/// ```
#[derive(Debug, Clone)]
pub struct TrainingSession {
    config: SessionConfig,
    context: TrainingContext,
    machine: TrainingStateMachine,
    updater: SessionStatUpdater,
}

impl TrainingSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            context: TrainingContext::new(),
            machine: TrainingStateMachine::new(),
            updater: SessionStatUpdater::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Toggle processing of training events. Statistics are kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// Current state machine phase.
    pub fn state(&self) -> TrainingState {
        self.machine.state()
    }

    pub fn context(&self) -> &TrainingContext {
        &self.context
    }

    /// Statistics over all shots, for rendering.
    pub fn snapshot(&self) -> &StatSnapshot {
        self.updater.snapshot()
    }

    /// Overall and per-shot statistics.
    pub fn shot_stats(&self) -> &ShotStats {
        self.updater.shot_stats()
    }

    /// A reader for the stat files in the configured data directory.
    pub fn stat_file_reader(&self) -> StatFileReader {
        StatFileReader::new(self.config.data_directory.clone())
    }

    /// Forward a raw game event to the state machine.
    ///
    /// Events are dropped while the session is disabled. Apart from the
    /// editor being destroyed, they are also dropped while the game is not
    /// in custom training.
    pub fn handle_event(&mut self, event: TrainingEvent, game: &dyn GameState) {
        if !self.config.enabled {
            return;
        }
        let editor_destroyed = matches!(event, TrainingEvent::EditorDestroyed { .. });
        if !editor_destroyed && !game.is_in_custom_training() {
            debug!(?event, "Ignoring event outside of custom training");
            return;
        }
        self.machine
            .handle(event, &mut self.context, &mut self.updater);
    }

    /// Entry point for the host when a training pack finished loading.
    pub fn training_pack_loaded(&mut self, total_rounds: u32) {
        if !self.config.enabled {
            return;
        }
        self.machine
            .on_training_pack_loaded(total_rounds, &mut self.context, &mut self.updater);
    }

    /// Clear all statistics. Allowed even while disabled.
    pub fn reset_statistics(&mut self) {
        self.updater.process_manual_stat_reset(&mut self.context);
    }
}

impl Default for TrainingSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
