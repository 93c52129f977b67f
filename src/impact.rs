//! Impact location tracking.
//!
//! Where the ball hit the goal wall is fed to an `ImpactTracker`. Stat
//! files store these locations so that reading a file can rebuild the
//! heatmap by replaying every impact in its original order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A point in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Receives impact locations, one per registered impact.
pub trait ImpactTracker {
    fn register_impact_location(&mut self, location: Vector3);
}

/// Plain recording of impacts in arrival order.
impl ImpactTracker for Vec<Vector3> {
    fn register_impact_location(&mut self, location: Vector3) {
        self.push(location);
    }
}

/// Accumulates impact locations into a heatmap over the goal wall.
///
/// The wall is the x/z plane; each impact increments the counter of the
/// grid cell it falls into. Cells are keyed by `(column, row)` where
/// `column = floor(x / cell_size)` and `row = floor(z / cell_size)`.
///
/// # Examples
///
/// ```rust
/// use shotstat::{ImpactTracker, ShotDistributionTracker, Vector3};
///
/// let mut tracker = ShotDistributionTracker::new(100.0);
/// tracker.register_impact_location(Vector3::new(150.0, 5120.0, 40.0));
/// tracker.register_impact_location(Vector3::new(190.0, 5120.0, 90.0));
/// tracker.register_impact_location(Vector3::new(-20.0, 5120.0, 300.0));
///
/// assert_eq!(tracker.impact_count(), 3);
/// assert_eq!(tracker.cell_count(1, 0), 2);
/// assert_eq!(tracker.cell_count(-1, 3), 1);
/// assert_eq!(tracker.max_cell_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShotDistributionTracker {
    cell_size: f32,
    impacts: Vec<Vector3>,
    heatmap: BTreeMap<(i32, i32), u32>,
}

impl ShotDistributionTracker {
    /// Create a tracker with square cells of `cell_size` world units.
    ///
    /// Non-positive sizes fall back to a single unit.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: if cell_size > 0.0 { cell_size } else { 1.0 },
            impacts: Vec::new(),
            heatmap: BTreeMap::new(),
        }
    }

    /// All impacts in registration order.
    pub fn impacts(&self) -> &[Vector3] {
        &self.impacts
    }

    pub fn impact_count(&self) -> usize {
        self.impacts.len()
    }

    /// Number of impacts that fell into the given cell.
    pub fn cell_count(&self, column: i32, row: i32) -> u32 {
        self.heatmap.get(&(column, row)).copied().unwrap_or(0)
    }

    /// Highest count of any cell, used to normalize heatmap colors.
    pub fn max_cell_count(&self) -> u32 {
        self.heatmap.values().copied().max().unwrap_or(0)
    }

    /// Iterate over non-empty cells as `((column, row), count)`.
    pub fn cells(&self) -> impl Iterator<Item = ((i32, i32), u32)> + '_ {
        self.heatmap.iter().map(|(&cell, &count)| (cell, count))
    }

    pub fn clear(&mut self) {
        self.impacts.clear();
        self.heatmap.clear();
    }

    fn cell_of(&self, location: Vector3) -> (i32, i32) {
        (
            (location.x / self.cell_size).floor() as i32,
            (location.z / self.cell_size).floor() as i32,
        )
    }
}

impl Default for ShotDistributionTracker {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl ImpactTracker for ShotDistributionTracker {
    fn register_impact_location(&mut self, location: Vector3) {
        let cell = self.cell_of(location);
        *self.heatmap.entry(cell).or_insert(0) += 1;
        self.impacts.push(location);
    }
}
