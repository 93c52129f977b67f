//! Stat file reader module.
//!
//! Reads statistics of earlier sessions back from disk. A file is either
//! read completely or rejected; callers never see partially filled
//! statistics, and the impact tracker is only fed once the whole file has
//! been accepted.
//!
//! Layout of a stat file (`→` is a tab):
//!
//! ```text
//! Version→1.2
//! Number of Shots→N
//! ----------              ┐
//! Attempts→12             │ block for all shots, then one block per shot
//! ...                     ┘
//! ```

use crate::error::StatFileError;
use crate::history::ShotHistory;
use crate::impact::{ImpactTracker, Vector3};
use crate::snapshot::{ShotStats, StatSnapshot};
use crate::stat_file::{
    split_line, StatFileVersion, ATTEMPTS_TAG, COMPONENT_SEPARATOR, IMPACT_LOCATIONS_TAG,
    IMPACT_SEPARATOR, LEGACY_SPEED_LINES, NUMBER_OF_SHOTS_TAG, VERSION_TAG,
};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::Lines;
use tracing::{debug, warn};

/// Sequential access to the lines of a stat file, tracking line numbers
/// for error reporting.
struct LineCursor<'a> {
    lines: Lines<'a>,
    line_number: usize,
}

impl<'a> LineCursor<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines(),
            line_number: 0,
        }
    }

    fn next_line(&mut self) -> Result<&'a str, StatFileError> {
        self.line_number += 1;
        self.lines
            .next()
            .ok_or(StatFileError::UnexpectedEof(self.line_number))
    }

    fn skip_line(&mut self) -> Result<(), StatFileError> {
        self.next_line().map(|_| ())
    }

    fn next_entry(&mut self) -> Result<(&'a str, &'a str), StatFileError> {
        let line = self.next_line()?;
        split_line(line).ok_or(StatFileError::MissingDelimiter(self.line_number))
    }

    /// Read an entry whose key must be `tag`, returning its value.
    fn expect_entry(&mut self, tag: &'static str) -> Result<&'a str, StatFileError> {
        let (key, value) = self.next_entry()?;
        if key != tag {
            return Err(StatFileError::UnexpectedTag {
                line: self.line_number,
                expected: tag,
                found: key.to_string(),
            });
        }
        Ok(value)
    }

    /// Read an entry with any non-empty key, returning its value.
    fn value_entry(&mut self) -> Result<&'a str, StatFileError> {
        let (key, value) = self.next_entry()?;
        if key.is_empty() {
            return Err(self.malformed("missing key"));
        }
        Ok(value)
    }

    fn read_count(&mut self) -> Result<u32, StatFileError> {
        let value = self.value_entry()?;
        parse_count(self.line_number, value)
    }

    fn read_decimal(&mut self) -> Result<f64, StatFileError> {
        let value = self.value_entry()?;
        parse_decimal(self.line_number, value)
    }

    fn malformed(&self, reason: impl Into<String>) -> StatFileError {
        StatFileError::Malformed {
            line: self.line_number,
            reason: reason.into(),
        }
    }
}

fn parse_count(line: usize, value: &str) -> Result<u32, StatFileError> {
    let trimmed = value.trim();
    let number: i64 = trimmed.parse().map_err(|_| StatFileError::InvalidNumber {
        line,
        value: trimmed.to_string(),
    })?;
    if number < 0 {
        return Err(StatFileError::NegativeValue {
            line,
            value: trimmed.to_string(),
        });
    }
    u32::try_from(number).map_err(|_| StatFileError::InvalidNumber {
        line,
        value: trimmed.to_string(),
    })
}

fn parse_decimal(line: usize, value: &str) -> Result<f64, StatFileError> {
    let trimmed = value.trim();
    let number: f64 = trimmed
        .parse()
        .ok()
        .filter(|n: &f64| n.is_finite())
        .ok_or_else(|| StatFileError::InvalidNumber {
            line,
            value: trimmed.to_string(),
        })?;
    if number < 0.0 {
        return Err(StatFileError::NegativeValue {
            line,
            value: trimmed.to_string(),
        });
    }
    Ok(number)
}

fn parse_component(line: usize, value: &str) -> Result<f32, StatFileError> {
    let trimmed = value.trim();
    trimmed
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| StatFileError::InvalidNumber {
            line,
            value: trimmed.to_string(),
        })
}

/// Parse `x,y,z`. Components may be negative.
fn parse_vector(line: usize, value: &str) -> Result<Vector3, StatFileError> {
    let mut components = value.split(COMPONENT_SEPARATOR);
    let mut next = || {
        components.next().ok_or_else(|| StatFileError::Malformed {
            line,
            reason: format!("vector '{}' needs three components", value),
        })
    };
    let (x, y, z) = (next()?, next()?, next()?);
    if components.next().is_some() {
        return Err(StatFileError::Malformed {
            line,
            reason: format!("vector '{}' has more than three components", value),
        });
    }
    Ok(Vector3::new(
        parse_component(line, x)?,
        parse_component(line, y)?,
        parse_component(line, z)?,
    ))
}

/// Parse `count|x,y,z|x,y,z|...|` into exactly `count` vectors.
fn parse_impact_locations(line: usize, value: &str) -> Result<Vec<Vector3>, StatFileError> {
    let malformed = |reason: String| StatFileError::Malformed { line, reason };

    let (count, mut rest) = value
        .split_once(IMPACT_SEPARATOR)
        .ok_or_else(|| malformed(format!("missing '{}' after count", IMPACT_SEPARATOR)))?;
    let count = parse_count(line, count)?;

    let mut locations = Vec::new();
    for index in 0..count {
        let (vector, remainder) = rest.split_once(IMPACT_SEPARATOR).ok_or_else(|| {
            malformed(format!(
                "expected {} impact locations, found {}",
                count, index
            ))
        })?;
        locations.push(parse_vector(line, vector)?);
        rest = remainder;
    }

    if !rest.trim().is_empty() {
        return Err(malformed(format!(
            "unexpected data after {} impact locations",
            count
        )));
    }
    Ok(locations)
}

/// Decode a string of `'0'`/`'1'` characters, oldest shot first.
fn parse_last_shots(line: usize, value: &str) -> Result<ShotHistory, StatFileError> {
    value
        .chars()
        .map(|c| match c {
            '1' => Ok(true),
            '0' => Ok(false),
            other => Err(StatFileError::Malformed {
                line,
                reason: format!("invalid shot outcome '{}'", other),
            }),
        })
        .collect()
}

fn read_header(cursor: &mut LineCursor<'_>) -> Result<StatFileVersion, StatFileError> {
    let value = cursor.expect_entry(VERSION_TAG)?;
    StatFileVersion::parse(value.trim())
        .ok_or_else(|| StatFileError::UnsupportedVersion(value.to_string()))
}

fn read_version_1_0(
    cursor: &mut LineCursor<'_>,
    snapshot: &mut StatSnapshot,
) -> Result<(), StatFileError> {
    let attempts = cursor.expect_entry(ATTEMPTS_TAG)?;
    snapshot.attempts = parse_count(cursor.line_number, attempts)?;
    snapshot.goals = cursor.read_count()?;
    snapshot.initial_hits = cursor.read_count()?;
    snapshot.goal_streak = cursor.read_count()?;
    snapshot.miss_streak = cursor.read_count()?;
    snapshot.longest_goal_streak = cursor.read_count()?;
    snapshot.longest_miss_streak = cursor.read_count()?;

    // May be empty if the session did not include this shot
    let (_, last_shots) = cursor.next_entry()?;
    snapshot.last_shots = parse_last_shots(cursor.line_number, last_shots)?;

    // Goal speeds cannot be restored from the summary values
    for _ in 0..LEGACY_SPEED_LINES {
        cursor.skip_line()?;
    }

    snapshot.initial_hit_percentage = cursor.read_decimal()?;
    snapshot.success_percentage = cursor.read_decimal()?;
    snapshot.peak_success_percentage = cursor.read_decimal()?;
    snapshot.peak_shot_number = cursor.read_count()?;
    Ok(())
}

fn read_version_1_1_additions(
    cursor: &mut LineCursor<'_>,
    snapshot: &mut StatSnapshot,
) -> Result<(), StatFileError> {
    snapshot.max_air_dribble_touches = cursor.read_count()?;
    snapshot.max_air_dribble_time = cursor.read_decimal()?;
    snapshot.max_ground_dribble_time = cursor.read_decimal()?;
    snapshot.double_tap_goals = cursor.read_count()?;
    snapshot.double_tap_goal_percentage = cursor.read_decimal()?;
    snapshot.max_flip_resets = cursor.read_count()?;
    snapshot.total_flip_resets = cursor.read_count()?;
    snapshot.average_flip_resets_per_attempt = cursor.read_decimal()?;
    snapshot.flip_reset_goal_percentage = cursor.read_decimal()?;
    snapshot.close_misses = cursor.read_count()?;
    snapshot.close_miss_percentage = cursor.read_decimal()?;
    Ok(())
}

fn read_version_1_2_additions(
    cursor: &mut LineCursor<'_>,
    impacts: &mut Vec<Vector3>,
) -> Result<(), StatFileError> {
    let value = cursor.expect_entry(IMPACT_LOCATIONS_TAG)?;
    impacts.extend(parse_impact_locations(cursor.line_number, value)?);
    Ok(())
}

/// Parse the content of a stat file.
///
/// On success, the impact locations of every block are replayed into
/// `tracker` in file order. On failure, `tracker` is left untouched.
///
/// # Examples
///
/// ```rust
/// use shotstat::reader::parse_stats;
/// use shotstat::Vector3;
///
/// let mut block = String::from("----------\n");
/// for (key, value) in [
///     ("Attempts", "4"), ("Goals", "3"), ("Initial Hits", "4"),
///     ("Goal Streak", "2"), ("Miss Streak", "0"),
///     ("Longest Goal Streak", "2"), ("Longest Miss Streak", "1"),
///     ("Last Shots", "1011"),
///     ("Latest Speed", "0"), ("Max Speed", "0"), ("Min Speed", "0"),
///     ("Median Speed", "0"), ("Mean Speed", "0"),
///     ("Initial Hit %", "100"), ("Success %", "75"),
///     ("Peak Success %", "100"), ("Peak Shot Number", "1"),
/// ] {
///     block.push_str(&format!("{}\t{}\n", key, value));
/// }
/// let content = format!("Version\t1.0\nNumber of Shots\t1\n{}{}", block, block);
///
/// let mut impacts: Vec<Vector3> = Vec::new();
/// let stats = parse_stats(&content, &mut impacts).unwrap();
/// assert_eq!(stats.all_shots.goals, 3);
/// assert_eq!(stats.per_shot.len(), 1);
/// assert!(impacts.is_empty());
/// ```
pub fn parse_stats(
    content: &str,
    tracker: &mut dyn ImpactTracker,
) -> Result<ShotStats, StatFileError> {
    let mut cursor = LineCursor::new(content);
    let version = read_header(&mut cursor)?;

    let number_of_shots = cursor.expect_entry(NUMBER_OF_SHOTS_TAG)?;
    let number_of_shots = parse_count(cursor.line_number, number_of_shots)?;
    if number_of_shots == 0 {
        return Err(StatFileError::InvalidShotCount(number_of_shots));
    }

    let mut impacts = Vec::new();
    let mut stats = ShotStats {
        all_shots: read_block(&mut cursor, version, &mut impacts)?,
        per_shot: Vec::new(),
    };
    // Grows with the blocks actually present, not with the header count
    for _ in 0..number_of_shots {
        let snapshot = read_block(&mut cursor, version, &mut impacts)?;
        stats.per_shot.push(snapshot);
    }

    for location in impacts {
        tracker.register_impact_location(location);
    }
    Ok(stats)
}

fn read_block(
    cursor: &mut LineCursor<'_>,
    version: StatFileVersion,
    impacts: &mut Vec<Vector3>,
) -> Result<StatSnapshot, StatFileError> {
    // Separator line
    cursor.skip_line()?;

    let mut snapshot = StatSnapshot::default();
    read_version_1_0(cursor, &mut snapshot)?;
    if version.has_dribble_and_flip_stats() {
        read_version_1_1_additions(cursor, &mut snapshot)?;
    }
    if version.has_impact_locations() {
        read_version_1_2_additions(cursor, impacts)?;
    }
    Ok(snapshot)
}

/// Read only the attempts of the block over all shots.
///
/// Expects the version line, the number of shots line, a separator line
/// and the attempts line, in this order.
pub fn peek_attempts(content: &str) -> Result<u32, StatFileError> {
    let mut cursor = LineCursor::new(content);
    read_header(&mut cursor)?;
    cursor.skip_line()?;
    cursor.skip_line()?;
    let attempts = cursor.expect_entry(ATTEMPTS_TAG)?;
    parse_count(cursor.line_number, attempts)
}

/// Lists and reads the stat files of training packs.
///
/// Files live in `<data_directory>/<training pack code>/`, one file per
/// saved session. File names start with a timestamp, so sorting them in
/// descending order puts the most recent session first.
#[derive(Debug, Clone)]
pub struct StatFileReader {
    data_directory: PathBuf,
}

impl StatFileReader {
    /// Create a reader for stat files below `data_directory`.
    pub fn new(data_directory: impl Into<PathBuf>) -> Self {
        Self {
            data_directory: data_directory.into(),
        }
    }

    pub fn data_directory(&self) -> &Path {
        &self.data_directory
    }

    /// Paths of all stat files stored for a training pack, most recent
    /// first.
    ///
    /// A missing or unreadable directory yields an empty list.
    pub fn resource_paths(&self, training_pack_code: &str) -> Vec<PathBuf> {
        let folder = self.data_directory.join(training_pack_code);
        let entries = match fs::read_dir(&folder) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(folder = %folder.display(), error = %err, "No stat files available");
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort_by(|a, b| b.cmp(a));
        paths
    }

    /// Read the complete statistics stored in a file, replaying its impact
    /// locations into `tracker`.
    pub fn read_stats(
        &self,
        path: &Path,
        tracker: &mut dyn ImpactTracker,
    ) -> Result<ShotStats, StatFileError> {
        let content = fs::read_to_string(path).map_err(|source| StatFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_stats(&content, tracker)
    }

    /// Read the number of attempts stored in a file without parsing the
    /// rest of it.
    pub fn peek_attempt_amount(&self, path: &Path) -> Result<u32, StatFileError> {
        let io_error = |source| StatFileError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        let head = BufReader::new(file)
            .lines()
            .take(4)
            .collect::<Result<Vec<String>, _>>()
            .map_err(io_error)?;
        peek_attempts(&head.join("\n"))
    }

    /// Statistics of the most recent readable session of a training pack.
    ///
    /// Files which fail to parse are skipped with a warning. Returns `None`
    /// if no file could be read.
    pub fn read_most_recent(
        &self,
        training_pack_code: &str,
        tracker: &mut dyn ImpactTracker,
    ) -> Option<ShotStats> {
        for path in self.resource_paths(training_pack_code) {
            match self.read_stats(&path, tracker) {
                Ok(stats) => return Some(stats),
                Err(err) => warn!(path = %path.display(), error = %err, "Skipping unreadable stat file"),
            }
        }
        None
    }
}
