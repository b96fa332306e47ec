use gopace::conversion::{
    format_race_time, parse_time_to_seconds, seconds_to_time, time_to_seconds,
};
use gopace::distances::race_distances;
use gopace::riegel;
use gopace::splits::generate_splits;
use gopace::vdot::{self, VdotDistance, VdotTable};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

proptest! {
    #[test]
    fn test_time_components_round_trip(h in 0i64..48, m in 0i64..60, s in 0i64..60) {
        let total = time_to_seconds(h, m, s);
        let components = seconds_to_time(total);

        prop_assert_eq!(components.hours, h);
        prop_assert_eq!(components.minutes, m);
        prop_assert_eq!(components.seconds, s);
    }

    #[test]
    fn test_clock_string_round_trip(total in 0i64..200_000) {
        let clock = seconds_to_time(total).to_string();
        prop_assert_eq!(parse_time_to_seconds(&clock), total);

        let short = format_race_time(total);
        prop_assert_eq!(parse_time_to_seconds(&short), total);
    }

    #[test]
    fn test_riegel_same_distance_is_identity(
        base_time in 1i64..100_000,
        index in 0usize..5
    ) {
        let distance = &race_distances()[index];
        prop_assert_eq!(riegel::predict(base_time, distance.km, distance.km), Some(base_time));
    }

    #[test]
    fn test_riegel_longer_targets_take_longer(
        base_time in 600i64..20_000,
        index in 0usize..5
    ) {
        let base = &race_distances()[index];
        let times: Vec<i64> = race_distances()
            .iter()
            .filter_map(|target| riegel::predict(base_time, base.km, target.km))
            .collect();

        prop_assert_eq!(times.len(), race_distances().len());
        prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_vdot_higher_score_is_never_slower(
        a in 150i64..1000,
        b in 150i64..1000,
        index in 0usize..5
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let distance = VdotDistance::ALL[index];
        let table = VdotTable::daniels();

        let slow = table.predict_seconds(Decimal::new(low, 1), distance).unwrap();
        let fast = table.predict_seconds(Decimal::new(high, 1), distance).unwrap();
        prop_assert!(fast <= slow);
    }

    #[test]
    fn test_vdot_score_stays_in_range(time in 1i64..40_000, index in 0usize..5) {
        let distance = &race_distances()[index];
        let score = vdot::calculate_vdot(time, distance.km).unwrap();

        prop_assert!(score >= dec!(20));
        prop_assert!(score <= dec!(70));
    }

    #[test]
    fn test_even_splits_are_constant(
        goal in 1i64..50_000,
        count in 2u32..50,
        tenths in 1i64..500
    ) {
        let distance = Decimal::new(tenths, 1);
        let schedule = generate_splits(goal, distance, count, Decimal::ZERO);

        prop_assert_eq!(schedule.len(), count as usize);
        for segment in &schedule.segments {
            prop_assert_eq!(segment.pace_seconds, schedule.average_pace_seconds);
            prop_assert_eq!(segment.relative_width, Decimal::ONE);
        }
    }

    #[test]
    fn test_split_times_sum_to_goal(
        goal in 1i64..50_000,
        count in 2u32..50,
        tenths in 1i64..500,
        bias_tenths in -10i64..=10
    ) {
        let schedule = generate_splits(goal, Decimal::new(tenths, 1), count, Decimal::new(bias_tenths, 1));
        let drift = (schedule.total_time_seconds() - Decimal::from(goal)).abs();

        prop_assert!(drift < dec!(0.0001));
    }

    #[test]
    fn test_positive_bias_runs_negative_splits(
        goal in 600i64..50_000,
        count in 2u32..50,
        bias_tenths in 1i64..=10
    ) {
        let schedule = generate_splits(goal, dec!(10), count, Decimal::new(bias_tenths, 1));
        let paces: Vec<Decimal> = schedule.segments.iter().map(|s| s.pace_seconds).collect();

        prop_assert!(paces.windows(2).all(|w| w[0] > w[1]));
        prop_assert!(paces[0] > schedule.average_pace_seconds);
        prop_assert!(paces[paces.len() - 1] < schedule.average_pace_seconds);
    }
}
