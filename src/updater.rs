//! Stat updater module.
//!
//! The `StatUpdater` trait is the capability the state machine drives: one
//! method per semantic event. `SessionStatUpdater` is the implementation
//! used by a live session; it applies every event to the snapshot over all
//! shots and to the snapshot of the round being played.

use crate::context::TrainingContext;
use crate::snapshot::{ShotStats, StatSnapshot};

/// Applies semantic training events to statistics.
///
/// Every method is synchronous and total. Implementations recalculate
/// derived values before returning from any method that changes counters.
pub trait StatUpdater {
    /// A goal was scored in the attempt being closed.
    fn process_goal(&mut self, context: &mut TrainingContext);

    /// A new attempt started. No counter changes.
    fn process_new_attempt(&mut self, context: &mut TrainingContext);

    /// The ball was touched for the first time in the current attempt.
    fn process_initial_ball_hit(&mut self, context: &mut TrainingContext);

    /// The current shot was reset, closing the attempt.
    fn process_shot_reset(&mut self, context: &mut TrainingContext);

    /// The user (or the host) asked for statistics to be cleared.
    fn process_manual_stat_reset(&mut self, context: &mut TrainingContext);

    /// A training pack was loaded or reloaded.
    fn handle_training_pack_load(&mut self, context: &mut TrainingContext);
}

/// Statistics for the session in progress.
///
/// # Examples
///
/// ```rust
/// use shotstat::{SessionStatUpdater, StatUpdater, TrainingContext};
///
/// let mut context = TrainingContext::new();
/// context.reset_for_pack(2);
///
/// let mut updater = SessionStatUpdater::new();
/// updater.handle_training_pack_load(&mut context);
///
/// // The spawn right after loading is not an attempt
/// updater.process_shot_reset(&mut context);
/// assert_eq!(updater.snapshot().attempts, 0);
///
/// updater.process_new_attempt(&mut context);
/// updater.process_shot_reset(&mut context);
/// assert_eq!(updater.snapshot().attempts, 1);
/// assert_eq!(updater.snapshot().miss_streak, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionStatUpdater {
    stats: ShotStats,
}

impl SessionStatUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot over all shots of the session.
    pub fn snapshot(&self) -> &StatSnapshot {
        &self.stats.all_shots
    }

    /// Overall and per-shot statistics of the session.
    pub fn shot_stats(&self) -> &ShotStats {
        &self.stats
    }

    /// Apply `update` to the overall snapshot and to the snapshot of the
    /// current round, then recalculate both.
    fn apply(&mut self, context: &TrainingContext, update: impl Fn(&mut StatSnapshot)) {
        update(&mut self.stats.all_shots);
        self.stats.all_shots.recalculate();

        if let Some(shot) = context
            .shot_slot()
            .and_then(|slot| self.stats.per_shot.get_mut(slot))
        {
            update(shot);
            shot.recalculate();
        }
    }
}

impl StatUpdater for SessionStatUpdater {
    fn process_goal(&mut self, context: &mut TrainingContext) {
        let speed = context.ball_speed;
        self.apply(context, |snapshot| snapshot.register_goal(speed));
    }

    fn process_new_attempt(&mut self, context: &mut TrainingContext) {
        // An attempt now exists, so the next reset closes it
        context.is_first_spawn = false;
    }

    fn process_initial_ball_hit(&mut self, context: &mut TrainingContext) {
        self.apply(context, StatSnapshot::register_initial_hit);
    }

    fn process_shot_reset(&mut self, context: &mut TrainingContext) {
        if context.consume_first_spawn() {
            return;
        }
        self.apply(context, StatSnapshot::register_shot_reset);
    }

    fn process_manual_stat_reset(&mut self, _context: &mut TrainingContext) {
        self.stats.all_shots.reset();
        for shot in &mut self.stats.per_shot {
            shot.reset();
        }
    }

    fn handle_training_pack_load(&mut self, context: &mut TrainingContext) {
        self.stats = ShotStats::with_shots(context.total_rounds as usize);
    }
}
