//! Dataset loader for the trip and top-station extracts (CSV or Parquet)

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;

use super::error::LoadError;
use super::records::{Dataset, StationCount, TripRecord};
use crate::utils::run_with_spinner;

/// Columns the dashboard reads from the trip extract
pub const TRIP_COLUMNS: [&str; 12] = [
    "usertype",
    "bike_type",
    "trip_duration_minutes",
    "start_station_name",
    "end_station_name",
    "weekday_or_weekend",
    "day_of_week",
    "hour",
    "date",
    "avgTemp",
    "season",
    "bike_rides_daily",
];

/// Accepted names for the station column of the top-station extract, in priority order
pub const STATION_NAME_COLUMNS: [&str; 3] =
    ["start_station_name", "end_station_name", "station_name"];

/// Accepted names for the count column of the top-station extract, in priority order
pub const STATION_COUNT_COLUMNS: [&str; 3] = ["value", "trips", "count"];

/// Locations of the three input files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub trips: PathBuf,
    pub top_stations: PathBuf,
    pub map_html: PathBuf,
}

/// Read a CSV or Parquet file into a DataFrame
pub fn read_table(path: &Path, infer_schema_length: usize) -> Result<DataFrame, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let read_err = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .map_err(read_err)?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default()).map_err(read_err)?,
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
        }
    };

    lf.collect().map_err(read_err)
}

/// Load the trip extract into typed records.
///
/// Every column in [`TRIP_COLUMNS`] must be present and non-null. The
/// leading index column (and any other extra column) is ignored.
pub fn load_trips(path: &Path, infer_schema_length: usize) -> Result<Vec<TripRecord>, LoadError> {
    let df = read_table(path, infer_schema_length)?;

    if let Some(missing) = TRIP_COLUMNS
        .iter()
        .find(|name| df.column(name).is_err())
    {
        return Err(missing_column(&df, path, missing));
    }

    let usertype = string_column(&df, path, "usertype")?;
    let bike_type = string_column(&df, path, "bike_type")?;
    let duration = float_column(&df, path, "trip_duration_minutes")?;
    let start_station = string_column(&df, path, "start_station_name")?;
    let end_station = string_column(&df, path, "end_station_name")?;
    let day_type = string_column(&df, path, "weekday_or_weekend")?;
    let day_of_week = string_column(&df, path, "day_of_week")?;
    let hour = float_column(&df, path, "hour")?;
    let date = string_column(&df, path, "date")?;
    let avg_temp = float_column(&df, path, "avgTemp")?;
    let season = string_column(&df, path, "season")?;
    let rides_daily = float_column(&df, path, "bike_rides_daily")?;

    let mut trips = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        if duration[row] < 0.0 {
            return Err(LoadError::invalid(
                path,
                "trip_duration_minutes",
                row,
                format!("negative duration {}", duration[row]),
            ));
        }

        trips.push(TripRecord {
            usertype: usertype[row].clone(),
            bike_type: bike_type[row].clone(),
            trip_duration_minutes: duration[row],
            start_station_name: start_station[row].clone(),
            end_station_name: end_station[row].clone(),
            weekday_or_weekend: day_type[row].clone(),
            day_of_week: day_of_week[row].clone(),
            hour: parse_hour(hour[row]).map_err(|msg| LoadError::invalid(path, "hour", row, msg))?,
            date: parse_date(&date[row]).map_err(|msg| LoadError::invalid(path, "date", row, msg))?,
            avg_temp: avg_temp[row],
            season: season[row].clone(),
            bike_rides_daily: rides_daily[row],
        });
    }

    Ok(trips)
}

/// Load the precomputed top-station extract
pub fn load_top_stations(
    path: &Path,
    infer_schema_length: usize,
) -> Result<Vec<StationCount>, LoadError> {
    let df = read_table(path, infer_schema_length)?;

    let station_col = first_present(&df, &STATION_NAME_COLUMNS)
        .ok_or_else(|| missing_column(&df, path, STATION_NAME_COLUMNS[0]))?;
    let count_col = first_present(&df, &STATION_COUNT_COLUMNS)
        .ok_or_else(|| missing_column(&df, path, STATION_COUNT_COLUMNS[0]))?;

    let stations = string_column(&df, path, station_col)?;
    let counts = float_column(&df, path, count_col)?;

    stations
        .into_iter()
        .zip(counts)
        .enumerate()
        .map(|(row, (station, count))| {
            if count < 0.0 || count.fract() != 0.0 {
                return Err(LoadError::invalid(
                    path,
                    count_col,
                    row,
                    format!("{} is not a trip count", count),
                ));
            }
            Ok(StationCount::new(station, count as u64))
        })
        .collect()
}

/// Load both extracts. Either both succeed or the whole load fails.
pub fn load_dataset(paths: &DataPaths, infer_schema_length: usize) -> Result<Dataset, LoadError> {
    let trips = load_trips(&paths.trips, infer_schema_length)?;
    let top_stations = load_top_stations(&paths.top_stations, infer_schema_length)?;
    Ok(Dataset::new(trips, top_stations))
}

/// Load both extracts with spinners reporting each step
pub fn load_dataset_with_progress(
    paths: &DataPaths,
    infer_schema_length: usize,
) -> Result<Dataset, LoadError> {
    let trips = run_with_spinner(
        &format!("Reading {}...", paths.trips.display()),
        || load_trips(&paths.trips, infer_schema_length),
        |rows| format!("Loaded {} trips", rows.len()),
    )?;
    let top_stations = run_with_spinner(
        &format!("Reading {}...", paths.top_stations.display()),
        || load_top_stations(&paths.top_stations, infer_schema_length),
        |rows| format!("Loaded {} top stations", rows.len()),
    )?;

    Ok(Dataset::new(trips, top_stations))
}

/// Read the pre-rendered map document as raw bytes; no encoding is assumed
pub fn read_map_html(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn first_present<'a>(df: &DataFrame, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|name| df.column(name).is_ok())
}

fn missing_column(df: &DataFrame, path: &Path, column: &str) -> LoadError {
    LoadError::MissingColumn {
        path: path.to_path_buf(),
        column: column.to_string(),
        available: df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

fn column<'a>(df: &'a DataFrame, path: &Path, name: &str) -> Result<&'a Column, LoadError> {
    df.column(name).map_err(|_| missing_column(df, path, name))
}

fn string_column(df: &DataFrame, path: &Path, name: &str) -> Result<Vec<String>, LoadError> {
    let read_err = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };
    let cast = column(df, path, name)?
        .cast(&DataType::String)
        .map_err(read_err)?;
    let ca = cast.str().map_err(read_err)?;

    ca.into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .map(|s| s.to_string())
                .ok_or_else(|| LoadError::invalid(path, name, row, "missing value"))
        })
        .collect()
}

fn float_column(df: &DataFrame, path: &Path, name: &str) -> Result<Vec<f64>, LoadError> {
    let read_err = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };
    let source = column(df, path, name)?;
    let cast = source.cast(&DataType::Float64).map_err(read_err)?;
    let ca = cast.f64().map_err(read_err)?;

    ca.into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            Some(v) if v.is_finite() => Ok(v),
            Some(v) => Err(LoadError::invalid(path, name, row, format!("{} is not finite", v))),
            // Non-strict cast turns unparseable text into null as well
            None => Err(LoadError::invalid(path, name, row, "missing or non-numeric value")),
        })
        .collect()
}

fn parse_hour(value: f64) -> Result<u8, String> {
    if value.fract() != 0.0 || !(0.0..=23.0).contains(&value) {
        return Err(format!("{} is not an hour of the day (0-23)", value));
    }
    Ok(value as u8)
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    // Timestamps such as "2022-01-01 00:00:00" keep only the calendar day
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| format!("'{}' is not a YYYY-MM-DD date: {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hour_bounds() {
        assert_eq!(parse_hour(0.0), Ok(0));
        assert_eq!(parse_hour(23.0), Ok(23));
        assert!(parse_hour(24.0).is_err());
        assert!(parse_hour(-1.0).is_err());
        assert!(parse_hour(7.5).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2022, 6, 15).unwrap();
        assert_eq!(parse_date("2022-06-15"), Ok(expected));
        assert_eq!(parse_date("2022-06-15 00:00:00"), Ok(expected));
        assert!(parse_date("15/06/2022").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_read_table_rejects_unknown_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trips.xlsx");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        let err = read_table(&path, 100).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_read_table_missing_file() {
        let err = read_table(Path::new("/nonexistent/trips.csv"), 100).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }
}
