use shotstat::reader::parse_stats;
use shotstat::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Values of one block, written in file order.
struct Block {
    attempts: &'static str,
    goals: &'static str,
    last_shots: &'static str,
    success: &'static str,
    impacts: &'static str,
}

impl Block {
    fn new(attempts: &'static str, goals: &'static str) -> Self {
        Self {
            attempts,
            goals,
            last_shots: "",
            success: "0",
            impacts: "0|",
        }
    }

    fn write(&self, version: StatFileVersion, out: &mut String) {
        let mut entries = vec![
            ("Attempts", self.attempts),
            ("Goals", self.goals),
            ("Initial Hits", "3"),
            ("Goal Streak", "1"),
            ("Miss Streak", "0"),
            ("Longest Goal Streak", "2"),
            ("Longest Miss Streak", "1"),
            ("Last Shots", self.last_shots),
            ("Latest Speed", "91.2"),
            ("Max Speed", "91.2"),
            ("Min Speed", "60.5"),
            ("Median Speed", "75"),
            ("Mean Speed", "75.85"),
            ("Initial Hit %", "75"),
            ("Success %", self.success),
            ("Peak Success %", "100"),
            ("Peak Shot Number", "1"),
        ];
        if version.has_dribble_and_flip_stats() {
            entries.extend([
                ("Max Air Dribble Touches", "6"),
                ("Max Air Dribble Time", "3.25"),
                ("Max Ground Dribble Time", "4.5"),
                ("Double Tap Goals", "1"),
                ("Double Tap Goal %", "50"),
                ("Max Flip Resets", "2"),
                ("Total Flip Resets", "3"),
                ("Average Flip Resets per Attempt", "0.75"),
                ("Flip Reset Goal %", "50"),
                ("Close Misses", "1"),
                ("Close Miss %", "25"),
            ]);
        }
        if version.has_impact_locations() {
            entries.push(("Impact Locations", self.impacts));
        }

        out.push_str("----------\n");
        for (key, value) in entries {
            out.push_str(&format!("{}\t{}\n", key, value));
        }
    }
}

fn stat_file(version: StatFileVersion, all_shots: &Block, per_shot: &[Block]) -> String {
    let mut content = format!(
        "Version\t{}\nNumber of Shots\t{}\n",
        version,
        per_shot.len()
    );
    all_shots.write(version, &mut content);
    for block in per_shot {
        block.write(version, &mut content);
    }
    content
}

fn two_shot_file(version: StatFileVersion) -> String {
    let mut all = Block::new("4", "2");
    all.last_shots = "1010";
    all.success = "50";
    all.impacts = "2|10,20,30|-5.5,0,12|";

    let mut first = Block::new("2", "2");
    first.last_shots = "11";
    first.success = "100";
    first.impacts = "0|";

    let mut second = Block::new("2", "0");
    second.last_shots = "00";
    second.impacts = "1|1,2,3|";

    stat_file(version, &all, &[first, second])
}

struct PackFolder {
    _root: TempDir,
    reader: StatFileReader,
    folder: PathBuf,
}

fn pack_folder(code: &str) -> PackFolder {
    let root = TempDir::new().unwrap();
    let folder = root.path().join(code);
    fs::create_dir_all(&folder).unwrap();
    PackFolder {
        reader: StatFileReader::new(root.path()),
        folder,
        _root: root,
    }
}

#[test]
fn test_read_version_1_0() {
    let mut impacts: Vec<Vector3> = Vec::new();
    let stats = parse_stats(&two_shot_file(StatFileVersion::V1_0), &mut impacts).unwrap();

    assert_eq!(stats.snapshot_count(), 3);
    assert_eq!(stats.all_shots.attempts, 4);
    assert_eq!(stats.all_shots.goals, 2);
    assert_eq!(stats.all_shots.initial_hits, 3);
    assert_eq!(stats.all_shots.longest_goal_streak, 2);
    assert_eq!(stats.all_shots.last_shots.to_bit_string(), "1010");
    assert_eq!(stats.all_shots.success_percentage, 50.0);
    assert_eq!(stats.all_shots.initial_hit_percentage, 75.0);
    assert_eq!(stats.all_shots.peak_shot_number, 1);

    // Goal speeds are not restored
    assert!(stats.all_shots.goal_speed.is_empty());

    // Later additions keep their defaults
    assert_eq!(stats.all_shots.max_air_dribble_touches, 0);
    assert_eq!(stats.all_shots.close_miss_percentage, 0.0);
    assert!(impacts.is_empty());

    assert_eq!(stats.per_shot[0].goals, 2);
    assert_eq!(stats.per_shot[1].last_shots.to_bit_string(), "00");
}

#[test]
fn test_read_version_1_1() {
    let mut impacts: Vec<Vector3> = Vec::new();
    let stats = parse_stats(&two_shot_file(StatFileVersion::V1_1), &mut impacts).unwrap();

    let all = &stats.all_shots;
    assert_eq!(all.max_air_dribble_touches, 6);
    assert_eq!(all.max_air_dribble_time, 3.25);
    assert_eq!(all.max_ground_dribble_time, 4.5);
    assert_eq!(all.double_tap_goals, 1);
    assert_eq!(all.double_tap_goal_percentage, 50.0);
    assert_eq!(all.max_flip_resets, 2);
    assert_eq!(all.total_flip_resets, 3);
    assert_eq!(all.average_flip_resets_per_attempt, 0.75);
    assert_eq!(all.flip_reset_goal_percentage, 50.0);
    assert_eq!(all.close_misses, 1);
    assert_eq!(all.close_miss_percentage, 25.0);
    assert!(impacts.is_empty());
}

#[test]
fn test_read_version_1_2_replays_impacts_in_order() {
    let mut tracker = ShotDistributionTracker::new(10.0);
    let stats = parse_stats(&two_shot_file(StatFileVersion::V1_2), &mut tracker).unwrap();

    assert_eq!(stats.per_shot.len(), 2);
    assert_eq!(
        tracker.impacts(),
        &[
            Vector3::new(10.0, 20.0, 30.0),
            Vector3::new(-5.5, 0.0, 12.0),
            Vector3::new(1.0, 2.0, 3.0),
        ]
    );
    assert_eq!(tracker.cell_count(1, 3), 1);
    assert_eq!(tracker.cell_count(-1, 1), 1);
}

#[test]
fn test_rejected_file_leaves_tracker_untouched() {
    let content = two_shot_file(StatFileVersion::V1_2);
    // Cut the last block's impact line
    let truncated = &content[..content.rfind("Impact Locations").unwrap()];

    let mut impacts: Vec<Vector3> = Vec::new();
    let result = parse_stats(truncated, &mut impacts);

    assert!(matches!(result, Err(StatFileError::UnexpectedEof(_))));
    assert!(impacts.is_empty());
}

#[test]
fn test_unknown_version_rejected() {
    let content = two_shot_file(StatFileVersion::V1_2).replacen("1.2", "1.9", 1);
    let mut impacts: Vec<Vector3> = Vec::new();

    let err = parse_stats(&content, &mut impacts).unwrap_err();
    assert!(matches!(err, StatFileError::UnsupportedVersion(ref v) if v == "1.9"));
    assert_eq!(err.to_string(), "Unsupported stat file version: 1.9");
}

#[test]
fn test_negative_value_rejected() {
    let mut all = Block::new("4", "-2");
    all.success = "50";
    let content = stat_file(StatFileVersion::V1_0, &all, &[Block::new("4", "2")]);
    let mut impacts: Vec<Vector3> = Vec::new();

    assert!(matches!(
        parse_stats(&content, &mut impacts),
        Err(StatFileError::NegativeValue { line: 5, .. })
    ));
}

#[test]
fn test_missing_tab_rejected() {
    let content = two_shot_file(StatFileVersion::V1_0).replacen("Goals\t2", "Goals 2", 1);
    let mut impacts: Vec<Vector3> = Vec::new();

    assert!(matches!(
        parse_stats(&content, &mut impacts),
        Err(StatFileError::MissingDelimiter(5))
    ));
}

#[test]
fn test_shot_count_beyond_file_content_rejected() {
    let overall_only = stat_file(StatFileVersion::V1_2, &Block::new("4", "2"), &[])
        .replacen("Number of Shots\t0", "Number of Shots\t4000000000", 1);
    let mut impacts: Vec<Vector3> = Vec::new();

    assert!(matches!(
        parse_stats(&overall_only, &mut impacts),
        Err(StatFileError::UnexpectedEof(_))
    ));
    assert!(impacts.is_empty());

    let one_block_short = two_shot_file(StatFileVersion::V1_0)
        .replacen("Number of Shots\t2", "Number of Shots\t3", 1);
    assert!(matches!(
        parse_stats(&one_block_short, &mut impacts),
        Err(StatFileError::UnexpectedEof(_))
    ));
}

#[test]
fn test_every_truncation_rejected() {
    let content = two_shot_file(StatFileVersion::V1_2);
    let lines: Vec<&str> = content.lines().collect();

    for keep in 0..lines.len() {
        let truncated = lines[..keep].join("\n");
        let mut impacts: Vec<Vector3> = Vec::new();
        assert!(
            parse_stats(&truncated, &mut impacts).is_err(),
            "accepted file cut after {} lines",
            keep
        );
        assert!(impacts.is_empty());
    }
}

#[test]
fn test_resource_paths_most_recent_first() {
    let pack = pack_folder("A1B2-C3D4-E5F6-0789");
    for name in [
        "2026-03-01_18-30-00.txt",
        "2026-05-12_09-15-42.txt",
        "2025-12-24_20-00-00.txt",
    ] {
        fs::write(pack.folder.join(name), "").unwrap();
    }
    fs::create_dir(pack.folder.join("archive")).unwrap();

    let names: Vec<String> = pack
        .reader
        .resource_paths("A1B2-C3D4-E5F6-0789")
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(
        names,
        [
            "2026-05-12_09-15-42.txt",
            "2026-03-01_18-30-00.txt",
            "2025-12-24_20-00-00.txt",
        ]
    );
}

#[test]
fn test_resource_paths_missing_folder() {
    let pack = pack_folder("EXISTING");
    assert!(pack.reader.resource_paths("MISSING").is_empty());
}

#[test]
fn test_peek_matches_full_read() {
    let pack = pack_folder("PACK");
    for version in StatFileVersion::ALL {
        let path = pack.folder.join(format!("{}.txt", version));
        fs::write(&path, two_shot_file(version)).unwrap();

        let mut impacts: Vec<Vector3> = Vec::new();
        let stats = pack.reader.read_stats(&path, &mut impacts).unwrap();
        assert_eq!(
            pack.reader.peek_attempt_amount(&path).unwrap(),
            stats.all_shots.attempts
        );
    }
}

#[test]
fn test_read_missing_file() {
    let pack = pack_folder("PACK");
    let path = pack.folder.join("gone.txt");
    let mut impacts: Vec<Vector3> = Vec::new();

    assert!(matches!(
        pack.reader.read_stats(&path, &mut impacts),
        Err(StatFileError::Io { .. })
    ));
    assert!(matches!(
        pack.reader.peek_attempt_amount(&path),
        Err(StatFileError::Io { .. })
    ));
}

#[test]
fn test_read_most_recent_skips_corrupt_file() {
    let pack = pack_folder("PACK");
    fs::write(
        pack.folder.join("2026-01-01.txt"),
        two_shot_file(StatFileVersion::V1_2),
    )
    .unwrap();
    fs::write(pack.folder.join("2026-02-01.txt"), "Version\t1.2\n").unwrap();

    let mut tracker = ShotDistributionTracker::new(100.0);
    let stats = pack.reader.read_most_recent("PACK", &mut tracker).unwrap();

    assert_eq!(stats.all_shots.attempts, 4);
    assert_eq!(tracker.impact_count(), 3);
    assert!(pack.reader.read_most_recent("OTHER", &mut tracker).is_none());
}

#[test]
fn test_compare_with_previous_session() {
    let mut impacts: Vec<Vector3> = Vec::new();
    let previous = parse_stats(&two_shot_file(StatFileVersion::V1_1), &mut impacts).unwrap();

    let mut current = StatSnapshot::new();
    for _ in 0..3 {
        current.register_goal(Some(80.0));
        current.register_shot_reset();
    }
    current.register_shot_reset();
    current.recalculate();

    let diff = current.differences(&previous.all_shots);
    assert_eq!(diff.goals, 1);
    assert_eq!(diff.longest_goal_streak, 1);
    assert_eq!(diff.longest_miss_streak, 0);
    assert_eq!(diff.initial_hits, -3);
    assert_eq!(diff.goal_speed.max, 80.0);
}
