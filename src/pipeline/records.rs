//! Typed records for the trip extract and station rankings

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label used in the `weekday_or_weekend` column for Monday to Friday trips
pub const WEEKDAY: &str = "Weekday";

/// Label used in the `weekday_or_weekend` column for Saturday and Sunday trips
pub const WEEKEND: &str = "Weekend";

/// One bike trip from the trip extract.
///
/// Categorical fields keep their raw labels so that filter options can be
/// built from the values actually observed in the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    /// Rider category (`casual` or `member`)
    pub usertype: String,
    /// Bike category (`classic_bike`, `electric_bike`, ...)
    pub bike_type: String,
    pub trip_duration_minutes: f64,
    pub start_station_name: String,
    pub end_station_name: String,
    /// `Weekday` or `Weekend`
    pub weekday_or_weekend: String,
    /// Day name as written in the file; ranked through [`DayOfWeek`]
    pub day_of_week: String,
    pub hour: u8,
    pub date: NaiveDate,
    /// Average daily temperature in °C
    pub avg_temp: f64,
    pub season: String,
    /// Precomputed ride count for the trip's date
    pub bike_rides_daily: f64,
}

/// Station name with its trip count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationCount {
    pub station: String,
    pub trips: u64,
}

impl StationCount {
    pub fn new(station: impl Into<String>, trips: u64) -> Self {
        Self {
            station: station.into(),
            trips,
        }
    }
}

/// Both extracts, loaded once and shared read-only for the life of the process
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub trips: Vec<TripRecord>,
    /// Precomputed top-20 station extract, in file order
    pub top_stations: Vec<StationCount>,
}

impl Dataset {
    pub fn new(trips: Vec<TripRecord>, top_stations: Vec<StationCount>) -> Self {
        Self {
            trips,
            top_stations,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Distinct rider categories in first-seen order
    pub fn observed_riders(&self) -> Vec<String> {
        distinct_in_order(self.trips.iter().map(|t| t.usertype.as_str()))
    }

    /// Distinct seasons in first-seen order
    pub fn observed_seasons(&self) -> Vec<String> {
        distinct_in_order(self.trips.iter().map(|t| t.season.as_str()))
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Day of week with the Monday-first rank used to order daily activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Zero-based position in the Monday to Sunday sequence
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    /// Only the seven capitalised English names are days; anything else,
    /// including abbreviations and other casings, is a malformed label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.name() == s)
            .ok_or_else(|| format!("'{}' is not a day of the week", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_rank_is_monday_first() {
        assert_eq!(DayOfWeek::Monday.rank(), 0);
        assert_eq!(DayOfWeek::Sunday.rank(), 6);
        assert!(DayOfWeek::Friday < DayOfWeek::Saturday);
    }

    #[test]
    fn test_day_parse_exact_names_only() {
        assert_eq!("Saturday".parse::<DayOfWeek>(), Ok(DayOfWeek::Saturday));
        assert!("  monday ".parse::<DayOfWeek>().is_err());
        assert!("MONDAY".parse::<DayOfWeek>().is_err());
        assert!("Wed".parse::<DayOfWeek>().is_err());
        assert!("Funday".parse::<DayOfWeek>().is_err());
        assert!("".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn test_day_display_round_trips_name() {
        for day in DayOfWeek::ALL {
            assert_eq!(day.to_string().parse::<DayOfWeek>(), Ok(day));
        }
    }
}
