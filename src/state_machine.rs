//! Custom training state machine.
//!
//! The game reports low-level signals (goal, touch, attempt started, round
//! changed) which may arrive duplicated, for example repeated goal signals
//! during a goal replay. The `TrainingStateMachine` turns them into exactly
//! one semantic outcome per attempt.
//!
//! A goal is not counted when it is signalled. The machine only latches it
//! in a per-attempt flag and commits goal-or-miss when the round changes:
//!
//! ```text
//! NotInCustomTraining ──pack loaded──▶ Resetting ──round changed──▶ PreparingNewShot
//!                                          │                          ▲      │
//!                                          └────────shot attempt──────┼──────┤
//!                                                                     │      ▼
//!                       ProcessingGoal / ProcessingMiss ◀──round changed── AttemptInProgress
//! ```

use crate::context::TrainingContext;
use crate::updater::StatUpdater;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Phase of a custom training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingState {
    /// No training pack has been loaded yet.
    NotInCustomTraining,
    /// A pack was loaded; waiting for the first shot to spawn.
    Resetting,
    /// A shot is set up; waiting for the player to start the attempt.
    PreparingNewShot,
    /// The player is taking the shot.
    AttemptInProgress,
    /// Pass-through while a goal is committed.
    ProcessingGoal,
    /// Pass-through while a miss is committed.
    ProcessingMiss,
}

impl fmt::Display for TrainingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrainingState::NotInCustomTraining => "Not in custom training",
            TrainingState::Resetting => "Resetting",
            TrainingState::PreparingNewShot => "Preparing new shot",
            TrainingState::AttemptInProgress => "Attempt in progress",
            TrainingState::ProcessingGoal => "Processing goal",
            TrainingState::ProcessingMiss => "Processing miss",
        };
        f.write_str(name)
    }
}

/// Raw game events consumed by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrainingEvent {
    /// A training pack was loaded (or reloaded).
    PackLoaded { total_rounds: u32 },
    /// The active shot changed or was reset.
    RoundChanged { round_index: u32 },
    /// The player started an attempt on the current shot.
    ShotAttempt,
    /// A car touched the ball.
    BallTouched,
    /// The ball entered a goal.
    GoalScored { ball_speed: Option<f64> },
    /// The training editor is being torn down.
    EditorDestroyed { round_index: u32 },
}

/// Reconstructs attempts and their outcomes from raw training events.
///
/// # Examples
///
/// ```rust
/// use shotstat::{
///     SessionStatUpdater, TrainingContext, TrainingEvent, TrainingState, TrainingStateMachine,
/// };
///
/// let mut machine = TrainingStateMachine::new();
/// let mut context = TrainingContext::new();
/// let mut updater = SessionStatUpdater::new();
///
/// let events = [
///     TrainingEvent::PackLoaded { total_rounds: 5 },
///     TrainingEvent::RoundChanged { round_index: 0 },
///     TrainingEvent::ShotAttempt,
///     TrainingEvent::GoalScored { ball_speed: Some(88.0) },
///     TrainingEvent::GoalScored { ball_speed: Some(88.0) }, // replay
///     TrainingEvent::RoundChanged { round_index: 0 },
/// ];
/// for event in events {
///     machine.handle(event, &mut context, &mut updater);
/// }
///
/// assert_eq!(machine.state(), TrainingState::PreparingNewShot);
/// assert_eq!(updater.snapshot().attempts, 1);
/// assert_eq!(updater.snapshot().goals, 1);
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStateMachine {
    state: TrainingState,
    goal_scored_in_attempt: bool,
    ball_hit_in_attempt: bool,
}

impl TrainingStateMachine {
    pub fn new() -> Self {
        Self {
            state: TrainingState::NotInCustomTraining,
            goal_scored_in_attempt: false,
            ball_hit_in_attempt: false,
        }
    }

    /// Current phase.
    pub fn state(&self) -> TrainingState {
        self.state
    }

    /// Whether a goal has been latched for the attempt in progress.
    pub fn goal_pending(&self) -> bool {
        self.goal_scored_in_attempt
    }

    /// Dispatch a raw event to the matching handler.
    pub fn handle(
        &mut self,
        event: TrainingEvent,
        context: &mut TrainingContext,
        updater: &mut dyn StatUpdater,
    ) {
        match event {
            TrainingEvent::PackLoaded { total_rounds } => {
                self.on_training_pack_loaded(total_rounds, context, updater)
            }
            TrainingEvent::RoundChanged { round_index } => {
                self.on_round_changed(round_index, context, updater)
            }
            TrainingEvent::ShotAttempt => self.on_shot_attempt(context, updater),
            TrainingEvent::BallTouched => self.on_ball_touched(context, updater),
            TrainingEvent::GoalScored { ball_speed } => self.on_goal_scored(ball_speed, context),
            TrainingEvent::EditorDestroyed { round_index } => {
                self.on_editor_destroyed(round_index, context, updater)
            }
        }
    }

    /// A pack was loaded. Whatever happened before is discarded.
    pub fn on_training_pack_loaded(
        &mut self,
        total_rounds: u32,
        context: &mut TrainingContext,
        updater: &mut dyn StatUpdater,
    ) {
        self.set_state(TrainingState::Resetting);
        self.goal_scored_in_attempt = false;
        self.ball_hit_in_attempt = false;
        context.reset_for_pack(total_rounds);
        updater.handle_training_pack_load(context);
    }

    /// The active shot changed. Closes the attempt in progress, if any.
    pub fn on_round_changed(
        &mut self,
        new_round_index: u32,
        context: &mut TrainingContext,
        updater: &mut dyn StatUpdater,
    ) {
        match self.state {
            TrainingState::Resetting => {
                // Initial spawn after loading the pack; there is no attempt to close
                updater.process_shot_reset(context);
                self.set_state(TrainingState::PreparingNewShot);
            }
            TrainingState::PreparingNewShot => {
                if context.current_round_index == Some(new_round_index) {
                    warn!(
                        round_index = new_round_index,
                        "Detected an unexpected shot reset before starting an attempt"
                    );
                }
            }
            TrainingState::AttemptInProgress => {
                if self.goal_scored_in_attempt {
                    self.set_state(TrainingState::ProcessingGoal);
                    updater.process_goal(context);
                } else {
                    self.set_state(TrainingState::ProcessingMiss);
                }
                // Counts the attempt; after a goal the updater's latch keeps it from being a miss
                updater.process_shot_reset(context);
                self.set_state(TrainingState::PreparingNewShot);
            }
            TrainingState::NotInCustomTraining
            | TrainingState::ProcessingGoal
            | TrainingState::ProcessingMiss => {
                debug!(state = %self.state, "Ignoring round change");
            }
        }

        context.current_round_index = Some(new_round_index);
    }

    /// The player started an attempt.
    pub fn on_shot_attempt(&mut self, context: &mut TrainingContext, updater: &mut dyn StatUpdater) {
        match self.state {
            TrainingState::Resetting | TrainingState::PreparingNewShot => {
                self.set_state(TrainingState::AttemptInProgress);
                self.goal_scored_in_attempt = false;
                self.ball_hit_in_attempt = false;
                updater.process_new_attempt(context);
            }
            state => debug!(%state, "Ignoring shot attempt"),
        }
    }

    /// A car touched the ball. Only the first touch of an attempt counts.
    pub fn on_ball_touched(&mut self, context: &mut TrainingContext, updater: &mut dyn StatUpdater) {
        if self.state == TrainingState::AttemptInProgress && !self.ball_hit_in_attempt {
            self.ball_hit_in_attempt = true;
            updater.process_initial_ball_hit(context);
        }
    }

    /// The ball entered the goal. The goal is latched and counted on the
    /// next round change; repeated signals (goal replay) are ignored.
    pub fn on_goal_scored(&mut self, ball_speed: Option<f64>, context: &mut TrainingContext) {
        if self.state == TrainingState::AttemptInProgress && !self.goal_scored_in_attempt {
            self.goal_scored_in_attempt = true;
            context.ball_speed = ball_speed;
        }
    }

    /// The training editor is going away. An attempt in flight is finished
    /// as if the round had changed; otherwise the event is ignored.
    pub fn on_editor_destroyed(
        &mut self,
        round_index: u32,
        context: &mut TrainingContext,
        updater: &mut dyn StatUpdater,
    ) {
        if self.state == TrainingState::AttemptInProgress {
            self.on_round_changed(round_index, context, updater);
        }
    }

    fn set_state(&mut self, new_state: TrainingState) {
        debug!(from = %self.state, to = %new_state, "Training state transition");
        self.state = new_state;
    }
}

impl Default for TrainingStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
