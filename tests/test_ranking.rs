//! Tests for the top-N station ranking

use bikedash::pipeline::{
    apply_filter, most_popular_start, station_counts, top_stations, FilterSelection, StationCount,
    StationEnd, TripRecord, TOP_N,
};
use rand::prelude::*;
use rand::SeedableRng;

#[path = "common/mod.rs"]
mod common;

use common::*;

/// Trips spread over `stations` stations with random popularity
fn random_trips(n: usize, stations: usize, seed: u64) -> Vec<TripRecord> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut trip = simple_trip("member", "summer", "Monday");
            trip.start_station_name = format!("Station {:02}", rng.gen_range(0..stations));
            trip.end_station_name = format!("Station {:02}", rng.gen_range(0..stations));
            trip
        })
        .collect()
}

#[test]
fn test_start_ranking_on_sample() {
    let trips = sample_trips();

    assert_eq!(
        top_stations(&trips, StationEnd::Start, TOP_N),
        vec![
            StationCount::new(STREETER, 3),
            StationCount::new(CLARK, 2),
            StationCount::new(WELLS, 2),
            StationCount::new(LAKE_SHORE, 1),
        ]
    );
}

#[test]
fn test_end_ranking_on_sample() {
    let trips = sample_trips();

    assert_eq!(
        top_stations(&trips, StationEnd::End, TOP_N),
        vec![
            StationCount::new(CLARK, 3),
            StationCount::new(STREETER, 3),
            StationCount::new(LAKE_SHORE, 1),
            StationCount::new(WELLS, 1),
        ]
    );
}

#[test]
fn test_top_n_never_exceeds_limit_and_is_descending() {
    for seed in 0..5 {
        let trips = random_trips(2_000, 45, seed);

        for end in [StationEnd::Start, StationEnd::End] {
            let top = top_stations(&trips, end, TOP_N);

            assert_eq!(top.len(), TOP_N, "45 stations should fill the top 20");
            for pair in top.windows(2) {
                assert!(
                    pair[0].trips >= pair[1].trips,
                    "Counts must not increase: {:?} then {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}

#[test]
fn test_top_n_matches_full_ranking_prefix() {
    let trips = random_trips(500, 30, 42);

    let full = station_counts(&trips, StationEnd::Start);
    let top = top_stations(&trips, StationEnd::Start, TOP_N);

    assert_eq!(&full[..TOP_N], &top[..]);
    assert_eq!(full.iter().map(|s| s.trips).sum::<u64>(), 500);
}

#[test]
fn test_boundary_tie_is_deterministic() {
    // 21 stations with one trip each: the cut falls inside the tie
    let trips: Vec<TripRecord> = (0..21)
        .rev()
        .map(|i| {
            let mut trip = simple_trip("member", "summer", "Monday");
            trip.start_station_name = format!("Station {:02}", i);
            trip
        })
        .collect();

    let top = top_stations(&trips, StationEnd::Start, TOP_N);

    assert_eq!(top.len(), 20);
    assert_eq!(top[0].station, "Station 00");
    assert_eq!(top[19].station, "Station 19");
    assert!(top.iter().all(|s| s.station != "Station 20"));
}

#[test]
fn test_fewer_stations_than_limit() {
    let trips = random_trips(50, 5, 7);

    assert!(top_stations(&trips, StationEnd::End, TOP_N).len() <= 5);
}

#[test]
fn test_ranking_after_filter() {
    let dataset = sample_dataset();
    let filtered = apply_filter(&dataset.trips, &FilterSelection::new(["member"], ["summer"]));

    assert_eq!(
        top_stations(&filtered, StationEnd::Start, TOP_N),
        vec![StationCount::new(CLARK, 1), StationCount::new(STREETER, 1)]
    );
}

#[test]
fn test_most_popular_start() {
    assert_eq!(most_popular_start(&sample_trips()).as_deref(), Some(STREETER));
}
