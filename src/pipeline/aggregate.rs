//! Summary metrics and grouped counts over trip records
//!
//! Every function takes a slice of records (owned or borrowed, so the same
//! code serves the full table and a filtered view) and returns a new value.
//! Empty input is reported as `None` or an empty vector, never a panic.
//!
//! Grouped outputs are not zero-filled: a label, day or hour with no rows is
//! absent from the result.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::records::{DayOfWeek, TripRecord, WEEKDAY, WEEKEND};

/// Temperature (°C) above which a day counts towards the peak season
pub const PEAK_SEASON_TEMPERATURE: f64 = 20.0;

/// Row count for one label of a categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
}

impl GroupCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Headline metrics for the user analysis page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub total_users: usize,
    /// `None` when no rows are selected
    pub median_trip_minutes: Option<f64>,
    /// Most frequent day-of-week label; ties go to the label seen first
    pub peak_day: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day: DayOfWeek,
    pub count: usize,
}

/// Trip counts per day of week, Monday first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub days: Vec<DayCount>,
    /// Labels that are not a day of the week, with their row counts
    pub malformed: Vec<GroupCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourCount {
    pub hour: u8,
    pub count: usize,
}

/// Trip counts per hour of day for weekdays and weekends separately
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HourlyActivity {
    pub weekday: Vec<HourCount>,
    pub weekend: Vec<HourCount>,
    /// Day-type flags other than `Weekday`/`Weekend`, with their row counts
    pub malformed: Vec<GroupCount>,
}

/// Daily ride count and temperature for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub bike_rides_daily: f64,
    pub avg_temp: f64,
}

fn records<T: Borrow<TripRecord>>(trips: &[T]) -> impl Iterator<Item = &TripRecord> + Clone {
    trips.iter().map(<T as Borrow<TripRecord>>::borrow)
}

/// Count rows per label of a categorical column, in first-seen order
pub fn count_by<T, F>(trips: &[T], key: F) -> Vec<GroupCount>
where
    T: Borrow<TripRecord>,
    F: for<'r> Fn(&'r TripRecord) -> &'r str,
{
    let mut groups: Vec<GroupCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for trip in records(trips) {
        let label = key(trip);
        match index.get(label) {
            Some(&i) => groups[i].count += 1,
            None => {
                index.insert(label, groups.len());
                groups.push(GroupCount::new(label, 1));
            }
        }
    }

    groups
}

pub fn bike_distribution<T: Borrow<TripRecord>>(trips: &[T]) -> Vec<GroupCount> {
    count_by(trips, |t| t.bike_type.as_str())
}

pub fn rider_distribution<T: Borrow<TripRecord>>(trips: &[T]) -> Vec<GroupCount> {
    count_by(trips, |t| t.usertype.as_str())
}

/// Rows per weekday/weekend flag
pub fn day_type_split<T: Borrow<TripRecord>>(trips: &[T]) -> Vec<GroupCount> {
    count_by(trips, |t| t.weekday_or_weekend.as_str())
}

/// Median of the trip durations, averaging the middle pair for even counts
pub fn median_duration<T: Borrow<TripRecord>>(trips: &[T]) -> Option<f64> {
    let mut durations: Vec<f64> = records(trips).map(|t| t.trip_duration_minutes).collect();
    median(&mut durations)
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// Most frequent day-of-week label.
///
/// Among labels sharing the highest count, the one whose first row comes
/// earliest in the table wins.
pub fn peak_day<T: Borrow<TripRecord>>(trips: &[T]) -> Option<String> {
    let mut best: Option<GroupCount> = None;
    for group in count_by(trips, |t| t.day_of_week.as_str()) {
        if best.as_ref().map_or(true, |b| group.count > b.count) {
            best = Some(group);
        }
    }
    best.map(|g| g.label)
}

pub fn summarize_users<T: Borrow<TripRecord>>(trips: &[T]) -> UserSummary {
    UserSummary {
        total_users: trips.len(),
        median_trip_minutes: median_duration(trips),
        peak_day: peak_day(trips),
    }
}

/// Rows per day of week, ordered Monday to Sunday.
///
/// Labels that do not name a day are collected in `malformed` instead of
/// being dropped or breaking the ordering.
pub fn daily_activity<T: Borrow<TripRecord>>(trips: &[T]) -> DailyActivity {
    let mut days: BTreeMap<DayOfWeek, usize> = BTreeMap::new();
    let mut malformed = Vec::new();

    for group in count_by(trips, |t| t.day_of_week.as_str()) {
        match group.label.parse::<DayOfWeek>() {
            Ok(day) => *days.entry(day).or_insert(0) += group.count,
            Err(_) => malformed.push(group),
        }
    }

    DailyActivity {
        days: days
            .into_iter()
            .map(|(day, count)| DayCount { day, count })
            .collect(),
        malformed,
    }
}

fn hour_counts<'a>(trips: impl Iterator<Item = &'a TripRecord>) -> Vec<HourCount> {
    let mut hours: BTreeMap<u8, usize> = BTreeMap::new();
    for trip in trips {
        *hours.entry(trip.hour).or_insert(0) += 1;
    }
    hours
        .into_iter()
        .map(|(hour, count)| HourCount { hour, count })
        .collect()
}

/// Hour-of-day counts for the weekday rows and the weekend rows.
///
/// Rows flagged as neither are left out of both series and reported in
/// `malformed`.
pub fn hourly_activity<T: Borrow<TripRecord>>(trips: &[T]) -> HourlyActivity {
    let by_day_type =
        |label: &str| hour_counts(records(trips).filter(|t| t.weekday_or_weekend == label));

    HourlyActivity {
        weekday: by_day_type(WEEKDAY),
        weekend: by_day_type(WEEKEND),
        malformed: day_type_split(trips)
            .into_iter()
            .filter(|g| g.label != WEEKDAY && g.label != WEEKEND)
            .collect(),
    }
}

/// Rows whose average daily temperature is strictly above `threshold`
pub fn count_above_temperature<T: Borrow<TripRecord>>(trips: &[T], threshold: f64) -> usize {
    records(trips).filter(|t| t.avg_temp > threshold).count()
}

pub fn mean_temperature<T: Borrow<TripRecord>>(trips: &[T]) -> Option<f64> {
    mean(records(trips).map(|t| t.avg_temp))
}

pub fn mean_daily_rides<T: Borrow<TripRecord>>(trips: &[T]) -> Option<f64> {
    mean(records(trips).map(|t| t.bike_rides_daily))
}

/// One point per calendar day, ordered by date.
///
/// The ride count and temperature are per-day values repeated on every row,
/// so the first row seen for a date supplies them.
pub fn daily_series<T: Borrow<TripRecord>>(trips: &[T]) -> Vec<DailyPoint> {
    let mut points: BTreeMap<NaiveDate, DailyPoint> = BTreeMap::new();
    for trip in records(trips) {
        points.entry(trip.date).or_insert(DailyPoint {
            date: trip.date,
            bike_rides_daily: trip.bike_rides_daily,
            avg_temp: trip.avg_temp,
        });
    }
    points.into_values().collect()
}

/// First and last calendar day present
pub fn date_range<T: Borrow<TripRecord>>(trips: &[T]) -> Option<(NaiveDate, NaiveDate)> {
    let dates = records(trips).map(|t| t.date);
    let first = dates.clone().min()?;
    let last = dates.max()?;
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn test_mean_empty_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([1.0, 2.0, 6.0].into_iter()), Some(3.0));
    }
}
