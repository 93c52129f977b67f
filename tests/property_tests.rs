use proptest::prelude::*;
use shotstat::history::SHOT_HISTORY_CAPACITY;
use shotstat::snapshot::percentage;
use shotstat::*;

/// One attempt as the player would play it.
#[derive(Debug, Clone)]
struct Attempt {
    touched: bool,
    scored: bool,
    replays: u8,
}

fn attempt_strategy() -> impl Strategy<Value = Attempt> {
    (any::<bool>(), any::<bool>(), 0u8..3).prop_map(|(touched, scored, replays)| Attempt {
        touched,
        scored,
        replays,
    })
}

fn event_strategy() -> impl Strategy<Value = TrainingEvent> {
    prop_oneof![
        (1u32..5).prop_map(|total_rounds| TrainingEvent::PackLoaded { total_rounds }),
        (0u32..6).prop_map(|round_index| TrainingEvent::RoundChanged { round_index }),
        Just(TrainingEvent::ShotAttempt),
        Just(TrainingEvent::BallTouched),
        proptest::option::of(0.0f64..200.0)
            .prop_map(|ball_speed| TrainingEvent::GoalScored { ball_speed }),
        (0u32..6).prop_map(|round_index| TrainingEvent::EditorDestroyed { round_index }),
    ]
}

/// Play `attempts` on a pack of `rounds` shots, advancing one shot per attempt.
fn play(rounds: u32, attempts: &[Attempt]) -> SessionStatUpdater {
    let mut machine = TrainingStateMachine::new();
    let mut context = TrainingContext::new();
    let mut updater = SessionStatUpdater::new();

    let mut events = vec![
        TrainingEvent::PackLoaded {
            total_rounds: rounds,
        },
        TrainingEvent::RoundChanged { round_index: 0 },
    ];
    for (index, attempt) in attempts.iter().enumerate() {
        events.push(TrainingEvent::ShotAttempt);
        if attempt.touched {
            events.push(TrainingEvent::BallTouched);
            events.push(TrainingEvent::BallTouched);
        }
        if attempt.scored {
            for _ in 0..=attempt.replays {
                events.push(TrainingEvent::GoalScored {
                    ball_speed: Some(70.0),
                });
            }
        }
        events.push(TrainingEvent::RoundChanged {
            round_index: (index as u32 + 1) % rounds,
        });
    }

    for event in events {
        machine.handle(event, &mut context, &mut updater);
    }
    updater
}

fn longest_run(outcomes: &[bool], value: bool) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    for &outcome in outcomes {
        current = if outcome == value { current + 1 } else { 0 };
        longest = longest.max(current);
    }
    longest
}

proptest! {
    /// Property: every attempt is counted once and every goal once, however
    /// often the goal signal repeats
    #[test]
    fn prop_counts_match_played_attempts(
        rounds in 1u32..6,
        attempts in prop::collection::vec(attempt_strategy(), 0..80)
    ) {
        let updater = play(rounds, &attempts);
        let snapshot = updater.snapshot();

        let goals = attempts.iter().filter(|a| a.scored).count() as u32;
        let touches = attempts.iter().filter(|a| a.touched).count() as u32;

        prop_assert_eq!(snapshot.attempts, attempts.len() as u32);
        prop_assert_eq!(snapshot.goals, goals);
        prop_assert_eq!(snapshot.initial_hits, touches);
        prop_assert_eq!(snapshot.success_percentage, percentage(goals, attempts.len() as u32));
        prop_assert_eq!(snapshot.goal_speed.len(), goals as usize);
    }

    /// Property: streaks and the outcome history follow the sequence of outcomes
    #[test]
    fn prop_streaks_follow_outcomes(
        attempts in prop::collection::vec(attempt_strategy(), 1..120)
    ) {
        let updater = play(3, &attempts);
        let snapshot = updater.snapshot();
        let outcomes: Vec<bool> = attempts.iter().map(|a| a.scored).collect();

        prop_assert_eq!(snapshot.longest_goal_streak, longest_run(&outcomes, true));
        prop_assert_eq!(snapshot.longest_miss_streak, longest_run(&outcomes, false));
        prop_assert!(snapshot.goal_streak == 0 || snapshot.miss_streak == 0);

        let tail = &outcomes[outcomes.len().saturating_sub(SHOT_HISTORY_CAPACITY)..];
        let recorded: Vec<bool> = snapshot.last_shots.iter().collect();
        prop_assert_eq!(recorded.as_slice(), tail);
    }

    /// Property: the peak is the best success rate after any attempt, reached
    /// first at the recorded shot number
    #[test]
    fn prop_peak_is_best_prefix(
        attempts in prop::collection::vec(attempt_strategy(), 0..60)
    ) {
        let updater = play(2, &attempts);
        let snapshot = updater.snapshot();

        let mut peak = 0.0;
        let mut peak_shot = 0;
        let mut goals = 0;
        for (index, attempt) in attempts.iter().enumerate() {
            if attempt.scored {
                goals += 1;
            }
            let rate = percentage(goals, index as u32 + 1);
            if rate > peak {
                peak = rate;
                peak_shot = index as u32 + 1;
            }
        }

        prop_assert_eq!(snapshot.peak_success_percentage, peak);
        prop_assert_eq!(snapshot.peak_shot_number, peak_shot);
        prop_assert!(snapshot.peak_success_percentage >= snapshot.success_percentage);
    }

    /// Property: per-shot snapshots split the overall counts between them
    #[test]
    fn prop_per_shot_sums_to_total(
        rounds in 1u32..6,
        attempts in prop::collection::vec(attempt_strategy(), 0..60)
    ) {
        let updater = play(rounds, &attempts);
        let stats = updater.shot_stats();

        prop_assert_eq!(stats.per_shot.len(), rounds as usize);
        let attempts_sum: u32 = stats.per_shot.iter().map(|s| s.attempts).sum();
        let goals_sum: u32 = stats.per_shot.iter().map(|s| s.goals).sum();
        prop_assert_eq!(attempts_sum, stats.all_shots.attempts);
        prop_assert_eq!(goals_sum, stats.all_shots.goals);
    }

    /// Property: arbitrary event streams never leave counters inconsistent
    #[test]
    fn prop_arbitrary_events_keep_counters_consistent(
        events in prop::collection::vec(event_strategy(), 0..200)
    ) {
        let mut machine = TrainingStateMachine::new();
        let mut context = TrainingContext::new();
        let mut updater = SessionStatUpdater::new();

        for event in events {
            machine.handle(event, &mut context, &mut updater);

            let snapshot = updater.snapshot();
            let in_flight = u32::from(machine.state() == TrainingState::AttemptInProgress);
            prop_assert!(snapshot.goals <= snapshot.attempts);
            prop_assert!(snapshot.initial_hits <= snapshot.attempts + in_flight);
            prop_assert!(!snapshot.ignore_next_shot_reset);
            prop_assert!(snapshot.success_percentage <= 100.0);
            prop_assert!(snapshot.peak_success_percentage >= snapshot.success_percentage);
            prop_assert!(matches!(
                machine.state(),
                TrainingState::NotInCustomTraining
                    | TrainingState::Resetting
                    | TrainingState::PreparingNewShot
                    | TrainingState::AttemptInProgress
            ));
        }
    }

    /// Property: the history keeps the most recent outcomes, oldest first
    #[test]
    fn prop_history_keeps_latest(outcomes in prop::collection::vec(any::<bool>(), 0..150)) {
        let mut history = ShotHistory::new();
        for &outcome in &outcomes {
            history.push(outcome);
        }

        let start = outcomes.len().saturating_sub(SHOT_HISTORY_CAPACITY);
        prop_assert_eq!(history.len(), outcomes.len() - start);
        prop_assert_eq!(history.iter().collect::<Vec<_>>(), outcomes[start..].to_vec());
        prop_assert_eq!(history.goals(), outcomes[start..].iter().filter(|&&o| o).count());
    }
}
