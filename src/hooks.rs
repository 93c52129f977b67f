//! Host event hooks.
//!
//! The host announces game events by name and calls every handler
//! subscribed to that name. This module knows which names matter, and
//! [`hook_to_events`] subscribes a `TrainingSession` to all of them,
//! querying the `GameState` for the data each event carries.
//!
//! The host dispatches events one at a time on a single thread, so the
//! session is shared between handlers as `Rc<RefCell<_>>`.

use crate::session::{GameState, TrainingSession};
use crate::state_machine::TrainingEvent;
use std::cell::RefCell;
use std::rc::Rc;

/// Fired whenever a goal was scored.
pub const HOOK_GOAL_SCORED: &str = "Function TAGame.Ball_TA.OnHitGoal";
/// Fired whenever a car touches the ball.
pub const HOOK_BALL_TOUCHED: &str = "Function TAGame.Ball_TA.OnCarTouch";
/// Fired when the player starts an attempt on a freshly loaded shot.
pub const HOOK_SHOT_ATTEMPT: &str = "Function TAGame.TrainingEditorMetrics_TA.TrainingShotAttempt";
/// Fired whenever a shot is changed or reset.
pub const HOOK_ROUND_CHANGED: &str = "Function TAGame.GameEvent_TrainingEditor_TA.EventRoundChanged";
/// Fired when the training map is unloaded.
pub const HOOK_EDITOR_DESTROYED: &str = "Function TAGame.GameEvent_TrainingEditor_TA.Destroyed";
/// Fired when a training pack is loaded or reloaded.
pub const HOOK_PACK_LOADED: &str = "Function TAGame.GameEvent_TrainingEditor_TA.OnInit";

/// Host events the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    GoalScored,
    BallTouched,
    ShotAttempt,
    RoundChanged,
    EditorDestroyed,
    PackLoaded,
}

impl HookEvent {
    pub const ALL: [HookEvent; 6] = [
        HookEvent::GoalScored,
        HookEvent::BallTouched,
        HookEvent::ShotAttempt,
        HookEvent::RoundChanged,
        HookEvent::EditorDestroyed,
        HookEvent::PackLoaded,
    ];

    /// The host's name for this event.
    pub fn name(self) -> &'static str {
        match self {
            HookEvent::GoalScored => HOOK_GOAL_SCORED,
            HookEvent::BallTouched => HOOK_BALL_TOUCHED,
            HookEvent::ShotAttempt => HOOK_SHOT_ATTEMPT,
            HookEvent::RoundChanged => HOOK_ROUND_CHANGED,
            HookEvent::EditorDestroyed => HOOK_EDITOR_DESTROYED,
            HookEvent::PackLoaded => HOOK_PACK_LOADED,
        }
    }

    /// Look up an event by its host name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shotstat::hooks::HookEvent;
    ///
    /// assert_eq!(
    ///     HookEvent::from_name("Function TAGame.Ball_TA.OnCarTouch"),
    ///     Some(HookEvent::BallTouched)
    /// );
    /// assert_eq!(HookEvent::from_name("Function TAGame.Car_TA.OnJumpPressed"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }

    /// Build the state machine event, reading payloads from the game.
    pub fn to_training_event(self, game: &dyn GameState) -> TrainingEvent {
        match self {
            HookEvent::GoalScored => TrainingEvent::GoalScored {
                ball_speed: game.ball_speed(),
            },
            HookEvent::BallTouched => TrainingEvent::BallTouched,
            HookEvent::ShotAttempt => TrainingEvent::ShotAttempt,
            HookEvent::RoundChanged => TrainingEvent::RoundChanged {
                round_index: game.active_round_index(),
            },
            HookEvent::EditorDestroyed => TrainingEvent::EditorDestroyed {
                round_index: game.active_round_index(),
            },
            HookEvent::PackLoaded => TrainingEvent::PackLoaded {
                total_rounds: game.total_rounds(),
            },
        }
    }
}

/// Handler invoked with the name of the fired event.
pub type EventHandler = Box<dyn FnMut(&str)>;

/// The host's event subscription mechanism.
pub trait EventSubscriber {
    fn subscribe(&mut self, event_name: &str, handler: EventHandler);
}

/// Subscribe `session` to every event it reacts to.
///
/// Pack loads go through [`TrainingSession::training_pack_loaded`]; all
/// other events go through [`TrainingSession::handle_event`] and are
/// therefore subject to its enabled and custom training checks.
pub fn hook_to_events(
    session: &Rc<RefCell<TrainingSession>>,
    subscriber: &mut dyn EventSubscriber,
    game: &Rc<dyn GameState>,
) {
    for hook in HookEvent::ALL {
        let session = Rc::clone(session);
        let game = Rc::clone(game);
        subscriber.subscribe(
            hook.name(),
            Box::new(move |_name: &str| {
                let event = hook.to_training_event(game.as_ref());
                let mut session = session.borrow_mut();
                match event {
                    TrainingEvent::PackLoaded { total_rounds } => {
                        session.training_pack_loaded(total_rounds)
                    }
                    event => session.handle_event(event, game.as_ref()),
                }
            }),
        );
    }
}
