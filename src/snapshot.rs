//! Statistics snapshot module.
//!
//! Contains `StatSnapshot`, the aggregate of counters, streaks and derived
//! percentages for a set of attempts, and `ShotStats`, which groups the
//! snapshot over all shots of a training pack with one snapshot per shot.

use crate::goal_speed::{GoalSpeed, GoalSpeedDiff};
use crate::history::ShotHistory;
use serde::{Deserialize, Serialize};

/// Compute `part / total` in percent, rounded to two decimal places.
///
/// Returns `0.0` if `total` is zero.
///
/// # Examples
///
/// ```rust
/// use shotstat::snapshot::percentage;
///
/// assert_eq!(percentage(2, 3), 66.67);
/// assert_eq!(percentage(1, 8), 12.5);
/// assert_eq!(percentage(5, 0), 0.0);
/// ```
pub fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(part) / f64::from(total) * 10000.0).round() / 100.0
}

/// Aggregate shooting statistics at a point in time.
///
/// Counters only ever grow during a session; they are zeroed by
/// [`StatSnapshot::reset`]. Derived fields are refreshed by
/// [`StatSnapshot::recalculate`].
///
/// # Examples
///
/// ```rust
/// use shotstat::StatSnapshot;
///
/// let mut snapshot = StatSnapshot::new();
///
/// // A goal followed by the reset that closes the attempt
/// snapshot.register_goal(None);
/// snapshot.register_shot_reset();
///
/// // A miss
/// snapshot.register_shot_reset();
/// snapshot.recalculate();
///
/// assert_eq!(snapshot.attempts, 2);
/// assert_eq!(snapshot.goals, 1);
/// assert_eq!(snapshot.success_percentage, 50.0);
/// assert_eq!(snapshot.peak_success_percentage, 100.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatSnapshot {
    /// Number of finished attempts.
    pub attempts: u32,
    /// Number of goals; never exceeds `attempts` once an attempt is closed.
    pub goals: u32,
    /// Number of attempts in which the ball was touched at least once.
    pub initial_hits: u32,
    /// Goals since the last miss.
    pub goal_streak: u32,
    /// Misses since the last goal.
    pub miss_streak: u32,
    pub longest_goal_streak: u32,
    pub longest_miss_streak: u32,
    /// Outcomes of the most recent attempts, oldest first.
    pub last_shots: ShotHistory,
    /// Ball speeds of the goals scored.
    pub goal_speed: GoalSpeed,

    pub max_air_dribble_touches: u32,
    pub max_air_dribble_time: f64,
    pub max_ground_dribble_time: f64,
    pub double_tap_goals: u32,
    pub max_flip_resets: u32,
    pub total_flip_resets: u32,
    /// Attempts with at least one flip reset that ended in a goal.
    pub flip_reset_attempts_scored: u32,
    /// Attempts which almost resulted in a goal.
    pub close_misses: u32,

    /// Set by a goal so that the reset closing the same attempt is not
    /// counted as a miss.
    #[serde(skip)]
    pub ignore_next_shot_reset: bool,

    pub success_percentage: f64,
    pub peak_success_percentage: f64,
    /// Value of `attempts` when `peak_success_percentage` was last raised.
    pub peak_shot_number: u32,
    pub initial_hit_percentage: f64,
    /// Share of goals that were double taps.
    pub double_tap_goal_percentage: f64,
    pub average_flip_resets_per_attempt: f64,
    /// Share of goals that involved a flip reset.
    pub flip_reset_goal_percentage: f64,
    pub close_miss_percentage: f64,
}

impl StatSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter, streak, latch and derived value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Count a goal.
    ///
    /// The attempt itself is counted by the shot reset which follows; the
    /// latch set here keeps that reset from being treated as a miss.
    pub fn register_goal(&mut self, ball_speed: Option<f64>) {
        self.goals += 1;
        self.goal_streak += 1;
        self.miss_streak = 0;
        self.longest_goal_streak = self.longest_goal_streak.max(self.goal_streak);
        self.ignore_next_shot_reset = true;
        self.last_shots.push(true);
        if let Some(speed) = ball_speed {
            self.goal_speed.insert(speed);
        }
    }

    /// Count the end of an attempt.
    ///
    /// Always increments `attempts`. If a goal was scored in this attempt
    /// the latch is consumed; otherwise the attempt is a miss.
    pub fn register_shot_reset(&mut self) {
        self.attempts += 1;

        if self.ignore_next_shot_reset {
            self.ignore_next_shot_reset = false;
            return;
        }

        self.miss_streak += 1;
        self.goal_streak = 0;
        self.longest_miss_streak = self.longest_miss_streak.max(self.miss_streak);
        self.last_shots.push(false);
    }

    /// Count an attempt in which the ball was touched.
    pub fn register_initial_hit(&mut self) {
        self.initial_hits += 1;
    }

    /// Refresh all derived percentages from the counters.
    pub fn recalculate(&mut self) {
        self.success_percentage = percentage(self.goals, self.attempts);
        // A latched goal is not yet matched by its attempt
        if !self.ignore_next_shot_reset && self.success_percentage > self.peak_success_percentage {
            self.peak_success_percentage = self.success_percentage;
            self.peak_shot_number = self.attempts;
        }
        self.initial_hit_percentage = percentage(self.initial_hits, self.attempts);
        self.double_tap_goal_percentage = percentage(self.double_tap_goals, self.goals);
        self.flip_reset_goal_percentage = percentage(self.flip_reset_attempts_scored, self.goals);
        self.close_miss_percentage = percentage(self.close_misses, self.attempts);
        self.average_flip_resets_per_attempt = if self.attempts == 0 {
            0.0
        } else {
            (f64::from(self.total_flip_resets) / f64::from(self.attempts) * 100.0).round() / 100.0
        };
    }

    /// Compare this snapshot against `other`.
    ///
    /// Positive values mean `self` is better. Only statistics which cover
    /// all attempts are compared; close misses are left out because a lower
    /// number can be better (more goals) or worse (wider misses).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shotstat::StatSnapshot;
    ///
    /// let mut today = StatSnapshot::new();
    /// today.goals = 12;
    /// today.longest_miss_streak = 2;
    ///
    /// let mut last_week = StatSnapshot::new();
    /// last_week.goals = 9;
    /// last_week.longest_miss_streak = 5;
    ///
    /// let diff = today.differences(&last_week);
    /// assert_eq!(diff.goals, 3);
    /// assert_eq!(diff.longest_miss_streak, 3);
    /// ```
    pub fn differences(&self, other: &StatSnapshot) -> StatDifferences {
        let delta = |a: u32, b: u32| i64::from(a) - i64::from(b);
        StatDifferences {
            goals: delta(self.goals, other.goals),
            longest_goal_streak: delta(self.longest_goal_streak, other.longest_goal_streak),
            // Inverted so that a shorter miss streak shows as an improvement
            longest_miss_streak: delta(other.longest_miss_streak, self.longest_miss_streak),
            initial_hits: delta(self.initial_hits, other.initial_hits),
            max_air_dribble_touches: delta(
                self.max_air_dribble_touches,
                other.max_air_dribble_touches,
            ),
            max_air_dribble_time: self.max_air_dribble_time - other.max_air_dribble_time,
            max_ground_dribble_time: self.max_ground_dribble_time - other.max_ground_dribble_time,
            double_tap_goals: delta(self.double_tap_goals, other.double_tap_goals),
            total_flip_resets: delta(self.total_flip_resets, other.total_flip_resets),
            max_flip_resets: delta(self.max_flip_resets, other.max_flip_resets),
            flip_reset_attempts_scored: delta(
                self.flip_reset_attempts_scored,
                other.flip_reset_attempts_scored,
            ),
            goal_speed: GoalSpeedDiff::between(&self.goal_speed, &other.goal_speed),
        }
    }
}

/// Signed result of [`StatSnapshot::differences`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatDifferences {
    pub goals: i64,
    pub longest_goal_streak: i64,
    pub longest_miss_streak: i64,
    pub initial_hits: i64,
    pub max_air_dribble_touches: i64,
    pub max_air_dribble_time: f64,
    pub max_ground_dribble_time: f64,
    pub double_tap_goals: i64,
    pub total_flip_resets: i64,
    pub max_flip_resets: i64,
    pub flip_reset_attempts_scored: i64,
    pub goal_speed: GoalSpeedDiff,
}

/// Statistics for a whole training pack: one snapshot over all shots and
/// one snapshot per shot of the pack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotStats {
    pub all_shots: StatSnapshot,
    pub per_shot: Vec<StatSnapshot>,
}

impl ShotStats {
    /// Create empty statistics for a pack with `number_of_shots` shots.
    pub fn with_shots(number_of_shots: usize) -> Self {
        Self {
            all_shots: StatSnapshot::default(),
            per_shot: vec![StatSnapshot::default(); number_of_shots],
        }
    }

    /// Number of snapshots held, including the overall one.
    pub fn snapshot_count(&self) -> usize {
        self.per_shot.len() + 1
    }
}
