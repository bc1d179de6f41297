//! Shared test utilities and fixture generators
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use bikedash::pipeline::{DataPaths, Dataset, StationCount, TripRecord};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Header written by the extract tool; the leading blank column is the row index
pub const TRIP_HEADER: &str = ",usertype,bike_type,trip_duration_minutes,start_station_name,end_station_name,weekday_or_weekend,day_of_week,hour,date,avgTemp,season,bike_rides_daily";

pub const STREETER: &str = "Streeter Dr & Grand Ave";
pub const CLARK: &str = "Clark St & Elm St";
pub const LAKE_SHORE: &str = "Lake Shore Dr & Monroe St";
pub const WELLS: &str = "Wells St & Concord Ln";

/// Build a trip record from the fields tests usually vary
#[allow(clippy::too_many_arguments)]
pub fn trip(
    usertype: &str,
    bike_type: &str,
    duration: f64,
    start: &str,
    end: &str,
    day_of_week: &str,
    hour: u8,
    date: (i32, u32, u32),
    avg_temp: f64,
    season: &str,
    rides_daily: f64,
) -> TripRecord {
    let weekday_or_weekend = match day_of_week {
        "Saturday" | "Sunday" => "Weekend",
        _ => "Weekday",
    };
    TripRecord {
        usertype: usertype.to_string(),
        bike_type: bike_type.to_string(),
        trip_duration_minutes: duration,
        start_station_name: start.to_string(),
        end_station_name: end.to_string(),
        weekday_or_weekend: weekday_or_weekend.to_string(),
        day_of_week: day_of_week.to_string(),
        hour,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        avg_temp,
        season: season.to_string(),
        bike_rides_daily: rides_daily,
    }
}

/// Minimal record for tests that only care about one field
pub fn simple_trip(usertype: &str, season: &str, day_of_week: &str) -> TripRecord {
    trip(
        usertype,
        "classic_bike",
        10.0,
        STREETER,
        CLARK,
        day_of_week,
        9,
        (2022, 5, 2),
        18.0,
        season,
        500.0,
    )
}

/// Eight trips with known aggregates:
///
/// - members: 5 rows, median 8.0, peak day Monday (tied with Friday, seen first)
/// - casual: 3 rows, median 25.0, peak day Saturday
/// - start counts: Streeter 3, Clark 2, Wells 2, Lake Shore 1
/// - end counts: Clark 3, Streeter 3, Lake Shore 1, Wells 1
/// - 4 rows above 20 °C
pub fn sample_trips() -> Vec<TripRecord> {
    vec![
        trip("member", "classic_bike", 10.0, STREETER, CLARK, "Monday", 8, (2022, 6, 6), 22.5, "summer", 900.0),
        trip("member", "electric_bike", 6.0, CLARK, STREETER, "Monday", 17, (2022, 6, 6), 22.5, "summer", 900.0),
        trip("casual", "classic_bike", 25.0, STREETER, LAKE_SHORE, "Saturday", 14, (2022, 6, 11), 25.0, "summer", 1200.0),
        trip("casual", "electric_bike", 30.0, LAKE_SHORE, STREETER, "Saturday", 15, (2022, 6, 11), 25.0, "summer", 1200.0),
        trip("member", "classic_bike", 8.0, CLARK, WELLS, "Wednesday", 8, (2022, 1, 12), -3.0, "winter", 150.0),
        trip("casual", "classic_bike", 12.0, WELLS, CLARK, "Sunday", 11, (2022, 1, 16), 1.0, "winter", 120.0),
        trip("member", "classic_bike", 9.0, STREETER, CLARK, "Friday", 18, (2022, 10, 7), 15.0, "fall", 600.0),
        trip("member", "electric_bike", 7.0, WELLS, STREETER, "Friday", 8, (2022, 10, 7), 15.0, "fall", 600.0),
    ]
}

pub fn sample_top_stations() -> Vec<StationCount> {
    vec![
        StationCount::new(STREETER, 3),
        StationCount::new(CLARK, 2),
        StationCount::new(WELLS, 2),
    ]
}

pub fn sample_dataset() -> Dataset {
    Dataset::new(sample_trips(), sample_top_stations())
}

/// Render trips as CSV text in the extract's layout
pub fn trips_csv(trips: &[TripRecord]) -> String {
    let mut out = String::from(TRIP_HEADER);
    out.push('\n');
    for (i, t) in trips.iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            i,
            t.usertype,
            t.bike_type,
            t.trip_duration_minutes,
            t.start_station_name,
            t.end_station_name,
            t.weekday_or_weekend,
            t.day_of_week,
            t.hour,
            t.date.format("%Y-%m-%d"),
            t.avg_temp,
            t.season,
            t.bike_rides_daily,
        ));
    }
    out
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

pub fn write_trips_csv(dir: &Path, trips: &[TripRecord]) -> PathBuf {
    write_file(dir, "trips.csv", &trips_csv(trips))
}

pub fn write_top_stations_csv(dir: &Path, stations: &[StationCount]) -> PathBuf {
    let mut out = String::from(",start_station_name,value\n");
    for (i, s) in stations.iter().enumerate() {
        out.push_str(&format!("{},{},{}\n", i, s.station, s.trips));
    }
    write_file(dir, "top20.csv", &out)
}

pub const MAP_HTML: &str = "<!DOCTYPE html>\n<html><body><div id=\"map\">trip flows</div></body></html>\n";

pub fn write_map_html(dir: &Path) -> PathBuf {
    write_file(dir, "map.html", MAP_HTML)
}

/// Temporary directory holding the sample trips, top stations and map
pub fn create_sample_files() -> (TempDir, DataPaths) {
    let temp_dir = TempDir::new().unwrap();
    let paths = DataPaths {
        trips: write_trips_csv(temp_dir.path(), &sample_trips()),
        top_stations: write_top_stations_csv(temp_dir.path(), &sample_top_stations()),
        map_html: write_map_html(temp_dir.path()),
    };
    (temp_dir, paths)
}
