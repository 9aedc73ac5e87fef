use chrono::NaiveDate;
use linkdash_rs::core::{EntitySeries, SeriesPoint, nearest_point};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("base date")
}

fn series_from_offsets(offsets: &[i64]) -> EntitySeries {
    let mut offsets: Vec<i64> = offsets.to_vec();
    offsets.sort_unstable();
    offsets.dedup();
    EntitySeries {
        entity: "Property".to_owned(),
        points: offsets
            .iter()
            .map(|offset| SeriesPoint {
                date: base_date() + chrono::Duration::days(*offset),
                value: *offset as f64,
            })
            .collect(),
    }
}

proptest! {
    #[test]
    fn nearest_minimizes_absolute_day_distance(
        offsets in prop::collection::vec(0_i64..3650, 1..64),
        query_offset in -100_i64..3750
    ) {
        let series = series_from_offsets(&offsets);
        let query = base_date() + chrono::Duration::days(query_offset);

        let nearest = nearest_point(&series, query).expect("non-empty series");
        let nearest_distance = (nearest.date - query).num_days().abs();
        for point in &series.points {
            let distance = (point.date - query).num_days().abs();
            prop_assert!(nearest_distance <= distance);
        }
    }

    #[test]
    fn nearest_matches_last_of_the_minimum_distance_candidates(
        offsets in prop::collection::vec(0_i64..3650, 1..64),
        query_offset in -100_i64..3750
    ) {
        let series = series_from_offsets(&offsets);
        let query = base_date() + chrono::Duration::days(query_offset);

        let nearest = nearest_point(&series, query).expect("non-empty series");
        let min_distance = series
            .points
            .iter()
            .map(|point| (point.date - query).num_days().abs())
            .min()
            .expect("non-empty series");
        let expected = series
            .points
            .iter()
            .filter(|point| (point.date - query).num_days().abs() == min_distance)
            .next_back()
            .expect("candidate");

        prop_assert_eq!(nearest.date, expected.date);
    }

    #[test]
    fn equidistant_pair_always_resolves_to_the_later_date(
        center in 0_i64..3650,
        gap in 1_i64..180
    ) {
        let series = series_from_offsets(&[center - gap, center + gap]);
        let query = base_date() + chrono::Duration::days(center);

        let nearest = nearest_point(&series, query).expect("non-empty series");
        prop_assert_eq!(
            nearest.date,
            base_date() + chrono::Duration::days(center + gap)
        );
    }
}
