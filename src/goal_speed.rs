//! Goal speed distribution.
//!
//! `GoalSpeed` collects the ball speed of every goal in a session and
//! exposes summary statistics over them. Speed history is not stored in
//! stat files, so a `GoalSpeed` read back from disk is always empty.

use serde::{Deserialize, Serialize};

/// Ball speeds of the goals scored in a session, in scoring order.
///
/// All statistics return `0.0` when no goal has been recorded.
///
/// # Examples
///
/// ```rust
/// use shotstat::GoalSpeed;
///
/// let mut speeds = GoalSpeed::new();
/// speeds.insert(80.0);
/// speeds.insert(100.0);
/// speeds.insert(120.0);
///
/// assert_eq!(speeds.min(), 80.0);
/// assert_eq!(speeds.max(), 120.0);
/// assert_eq!(speeds.median(), 100.0);
/// assert_eq!(speeds.mean(), 100.0);
/// assert_eq!(speeds.latest(), 120.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSpeed {
    values: Vec<f64>,
}

impl GoalSpeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the speed of a goal.
    pub fn insert(&mut self, speed: f64) {
        self.values.push(speed);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Speed of the most recent goal.
    pub fn latest(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    pub fn min(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Median speed. For an even number of goals this is the mean of the
    /// two middle values.
    pub fn median(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .values
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / self.values.len() as f64;
        variance.sqrt()
    }
}

/// Signed differences between two goal speed distributions
/// (`self - other` for each statistic).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSpeedDiff {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl GoalSpeedDiff {
    /// Compare two distributions.
    pub fn between(current: &GoalSpeed, other: &GoalSpeed) -> Self {
        Self {
            min: current.min() - other.min(),
            max: current.max() - other.max(),
            median: current.median() - other.median(),
            mean: current.mean() - other.mean(),
            std_dev: current.std_dev() - other.std_dev(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        let speeds = GoalSpeed::new();
        assert_eq!(speeds.min(), 0.0);
        assert_eq!(speeds.max(), 0.0);
        assert_eq!(speeds.median(), 0.0);
        assert_eq!(speeds.mean(), 0.0);
        assert_eq!(speeds.std_dev(), 0.0);
        assert_eq!(speeds.latest(), 0.0);
    }

    #[test]
    fn test_even_median() {
        let mut speeds = GoalSpeed::new();
        for v in [40.0, 10.0, 30.0, 20.0] {
            speeds.insert(v);
        }
        assert_eq!(speeds.median(), 25.0);
        assert_eq!(speeds.latest(), 20.0);
    }

    #[test]
    fn test_std_dev() {
        let mut speeds = GoalSpeed::new();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            speeds.insert(v);
        }
        assert!((speeds.std_dev() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_diff() {
        let mut current = GoalSpeed::new();
        current.insert(100.0);
        let mut other = GoalSpeed::new();
        other.insert(90.0);

        let diff = GoalSpeedDiff::between(&current, &other);
        assert_eq!(diff.min, 10.0);
        assert_eq!(diff.max, 10.0);
        assert_eq!(diff.mean, 10.0);
        assert_eq!(diff.std_dev, 0.0);
    }
}
