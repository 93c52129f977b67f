//! Round and attempt context.
//!
//! The `TrainingContext` carries the state that the state machine and the
//! stat updater both need: which round of the pack is active, how many
//! rounds the pack has, whether the next shot reset is the initial spawn,
//! and the ball speed observed at the last goal. It is created once per
//! session and passed by reference; nothing in it is global.

use serde::{Deserialize, Serialize};

/// Context shared between the state machine and the stat updater.
///
/// # Examples
///
/// ```rust
/// use shotstat::TrainingContext;
///
/// let mut context = TrainingContext::new();
/// context.reset_for_pack(10);
///
/// assert_eq!(context.total_rounds, 10);
/// assert_eq!(context.current_round_index, None);
/// assert!(context.consume_first_spawn());
/// assert!(!context.consume_first_spawn());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingContext {
    /// Number of rounds (shots) in the loaded training pack.
    pub total_rounds: u32,

    /// Index of the active round, or `None` right after a pack load.
    pub current_round_index: Option<u32>,

    /// Set on pack load; the first shot reset afterwards is the initial
    /// spawn and must not count as an attempt.
    pub is_first_spawn: bool,

    /// Ball speed recorded when the last goal was scored.
    pub ball_speed: Option<f64>,
}

impl TrainingContext {
    /// Create a context for a session outside of any training pack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the context for a freshly loaded training pack.
    pub fn reset_for_pack(&mut self, total_rounds: u32) {
        self.total_rounds = total_rounds;
        self.current_round_index = None;
        self.is_first_spawn = true;
        self.ball_speed = None;
    }

    /// Clear the first-spawn flag, returning whether it was set.
    pub fn consume_first_spawn(&mut self) -> bool {
        std::mem::take(&mut self.is_first_spawn)
    }

    /// The active round as an index into per-shot statistics, if it lies
    /// within the pack.
    pub fn shot_slot(&self) -> Option<usize> {
        self.current_round_index
            .filter(|&index| index < self.total_rounds)
            .map(|index| index as usize)
    }
}
