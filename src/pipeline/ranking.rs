//! Top-N station ranking

use std::borrow::Borrow;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::records::{StationCount, TripRecord};

/// Number of stations kept by the top-station charts
pub const TOP_N: usize = 20;

/// Which end of a trip a station ranking counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StationEnd {
    Start,
    End,
}

impl StationEnd {
    pub fn station_of(self, trip: &TripRecord) -> &str {
        match self {
            StationEnd::Start => &trip.start_station_name,
            StationEnd::End => &trip.end_station_name,
        }
    }
}

impl fmt::Display for StationEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationEnd::Start => write!(f, "Start"),
            StationEnd::End => write!(f, "End"),
        }
    }
}

/// Trips per station, ordered by count descending then station name ascending
pub fn station_counts<T: Borrow<TripRecord>>(trips: &[T], end: StationEnd) -> Vec<StationCount> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for trip in trips.iter().map(<T as Borrow<TripRecord>>::borrow) {
        // Every trip carries a weight of one
        *totals.entry(end.station_of(trip)).or_insert(0) += 1;
    }

    let mut ranked: Vec<StationCount> = totals
        .into_iter()
        .map(|(station, trips)| StationCount::new(station, trips))
        .collect();
    ranked.sort_by_key(|s| (Reverse(s.trips), s.station.clone()));
    ranked
}

/// The `n` busiest stations for the given trip end.
///
/// Stations tied on count are ranked by name, so the cut at position `n`
/// is deterministic.
pub fn top_stations<T: Borrow<TripRecord>>(
    trips: &[T],
    end: StationEnd,
    n: usize,
) -> Vec<StationCount> {
    let mut ranked = station_counts(trips, end);
    ranked.truncate(n);
    ranked
}

/// Station where the most trips start; ties go to the smallest name
pub fn most_popular_start<T: Borrow<TripRecord>>(trips: &[T]) -> Option<String> {
    station_counts(trips, StationEnd::Start)
        .into_iter()
        .next()
        .map(|s| s.station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(start: &str, end: &str) -> TripRecord {
        TripRecord {
            usertype: "member".to_string(),
            bike_type: "classic_bike".to_string(),
            trip_duration_minutes: 12.0,
            start_station_name: start.to_string(),
            end_station_name: end.to_string(),
            weekday_or_weekend: "Weekday".to_string(),
            day_of_week: "Tuesday".to_string(),
            hour: 17,
            date: NaiveDate::from_ymd_opt(2022, 7, 5).unwrap(),
            avg_temp: 26.0,
            season: "summer".to_string(),
            bike_rides_daily: 900.0,
        }
    }

    #[test]
    fn test_ties_broken_by_name() {
        let trips = vec![trip("Zeta", "X"), trip("Alpha", "X"), trip("Mid", "Y"), trip("Mid", "Y")];
        let ranked = station_counts(&trips, StationEnd::Start);

        assert_eq!(
            ranked,
            vec![
                StationCount::new("Mid", 2),
                StationCount::new("Alpha", 1),
                StationCount::new("Zeta", 1),
            ]
        );
    }

    #[test]
    fn test_end_stations_counted_independently() {
        let trips = vec![trip("A", "B"), trip("A", "C"), trip("D", "B")];

        assert_eq!(top_stations(&trips, StationEnd::End, 1), vec![StationCount::new("B", 2)]);
        assert_eq!(most_popular_start(&trips), Some("A".to_string()));
    }

    #[test]
    fn test_empty_input() {
        let trips: Vec<TripRecord> = Vec::new();
        assert!(top_stations(&trips, StationEnd::Start, TOP_N).is_empty());
        assert_eq!(most_popular_start(&trips), None);
    }
}
