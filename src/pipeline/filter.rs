//! Rider category and season filtering

use std::collections::BTreeSet;

use serde::Serialize;

use super::records::{Dataset, TripRecord};

/// Rider categories and seasons chosen for one render.
///
/// Sets are ordered so the selection hashes and compares by content and can
/// key the page cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterSelection {
    pub riders: BTreeSet<String>,
    pub seasons: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new<R, S>(riders: R, seasons: S) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            riders: riders.into_iter().map(Into::into).collect(),
            seasons: seasons.into_iter().map(Into::into).collect(),
        }
    }

    /// Every observed rider category and season, i.e. no filtering
    pub fn all(dataset: &Dataset) -> Self {
        Self::new(dataset.observed_riders(), dataset.observed_seasons())
    }

    /// Build a selection from optional user input, defaulting each
    /// dimension to all observed values when not given
    pub fn from_options(
        dataset: &Dataset,
        riders: Option<&[String]>,
        seasons: Option<&[String]>,
    ) -> Self {
        let riders = riders
            .map(|r| r.to_vec())
            .unwrap_or_else(|| dataset.observed_riders());
        let seasons = seasons
            .map(|s| s.to_vec())
            .unwrap_or_else(|| dataset.observed_seasons());
        Self::new(riders, seasons)
    }

    pub fn matches_rider(&self, trip: &TripRecord) -> bool {
        self.riders.contains(&trip.usertype)
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.matches_rider(trip) && self.seasons.contains(&trip.season)
    }

    /// Labels selected in either dimension that never occur in the data
    pub fn unknown_labels(&self, dataset: &Dataset) -> Vec<String> {
        let riders = dataset.observed_riders();
        let seasons = dataset.observed_seasons();
        self.riders
            .iter()
            .filter(|r| !riders.contains(r))
            .chain(self.seasons.iter().filter(|s| !seasons.contains(s)))
            .cloned()
            .collect()
    }
}

/// Rows whose rider category and season are both selected, in table order
pub fn apply_filter<'a>(trips: &'a [TripRecord], selection: &FilterSelection) -> Vec<&'a TripRecord> {
    trips.iter().filter(|t| selection.matches(t)).collect()
}

/// Rows whose rider category is selected; the season dimension is ignored
pub fn apply_rider_filter<'a>(
    trips: &'a [TripRecord],
    selection: &FilterSelection,
) -> Vec<&'a TripRecord> {
    trips.iter().filter(|t| selection.matches_rider(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(usertype: &str, season: &str) -> TripRecord {
        TripRecord {
            usertype: usertype.to_string(),
            bike_type: "classic_bike".to_string(),
            trip_duration_minutes: 10.0,
            start_station_name: "A".to_string(),
            end_station_name: "B".to_string(),
            weekday_or_weekend: "Weekday".to_string(),
            day_of_week: "Monday".to_string(),
            hour: 8,
            date: NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
            avg_temp: 5.0,
            season: season.to_string(),
            bike_rides_daily: 100.0,
        }
    }

    #[test]
    fn test_rider_filter_ignores_season() {
        let trips = vec![trip("member", "winter"), trip("casual", "summer")];
        let selection = FilterSelection::new(["member"], Vec::<String>::new());

        assert_eq!(apply_rider_filter(&trips, &selection).len(), 1);
        assert!(apply_filter(&trips, &selection).is_empty());
    }

    #[test]
    fn test_from_options_defaults_to_observed() {
        let dataset = Dataset::new(
            vec![trip("member", "winter"), trip("casual", "summer")],
            Vec::new(),
        );
        let riders = vec!["casual".to_string()];
        let selection = FilterSelection::from_options(&dataset, Some(&riders), None);

        assert_eq!(selection.riders.len(), 1);
        assert_eq!(selection.seasons.len(), 2);
    }

    #[test]
    fn test_unknown_labels() {
        let dataset = Dataset::new(vec![trip("member", "winter")], Vec::new());
        let selection = FilterSelection::new(["member", "tourist"], ["winter", "monsoon"]);

        assert_eq!(selection.unknown_labels(&dataset), vec!["tourist", "monsoon"]);
    }
}
