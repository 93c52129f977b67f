//! Rolling shot history.
//!
//! Provides `ShotHistory`, a fixed-capacity ring of shot outcomes
//! (`true` = goal). When full, the oldest outcome is dropped from the
//! front.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::VecDeque;

/// Number of outcomes kept by a `ShotHistory`.
pub const SHOT_HISTORY_CAPACITY: usize = 50;

/// The most recent shot outcomes, oldest first.
///
/// # Examples
///
/// ```rust
/// use shotstat::ShotHistory;
///
/// let mut history = ShotHistory::new();
/// history.push(true);
/// history.push(false);
/// history.push(true);
///
/// assert_eq!(history.len(), 3);
/// assert_eq!(history.goals(), 2);
/// assert_eq!(history.to_bit_string(), "101");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotHistory {
    outcomes: VecDeque<bool>,
}

impl ShotHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            outcomes: VecDeque::with_capacity(SHOT_HISTORY_CAPACITY),
        }
    }

    /// Append an outcome, evicting the oldest one if the ring is full.
    pub fn push(&mut self, is_goal: bool) {
        if self.outcomes.len() == SHOT_HISTORY_CAPACITY {
            self.outcomes.pop_front();
        }
        self.outcomes.push_back(is_goal);
    }

    /// Number of outcomes currently stored.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of goals within the stored window.
    pub fn goals(&self) -> usize {
        self.outcomes.iter().filter(|&&goal| goal).count()
    }

    /// Iterate over the outcomes, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.outcomes.iter().copied()
    }

    pub fn clear(&mut self) {
        self.outcomes.clear();
    }

    /// Render the history as a string of `'1'` (goal) and `'0'` (miss),
    /// oldest first. This is the encoding used by stat files.
    pub fn to_bit_string(&self) -> String {
        self.iter().map(|goal| if goal { '1' } else { '0' }).collect()
    }
}

impl FromIterator<bool> for ShotHistory {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut history = Self::new();
        for outcome in iter {
            history.push(outcome);
        }
        history
    }
}

impl Serialize for ShotHistory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.outcomes.iter())
    }
}

impl<'de> Deserialize<'de> for ShotHistory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let outcomes = Vec::<bool>::deserialize(deserializer)?;
        Ok(outcomes.into_iter().collect())
    }
}
