//! JSON export of the computed dashboard pages

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{DataPaths, Dataset, FilterSelection};

use super::pages::{stations_page, user_analysis_page, weather_page, StationsPage, UserAnalysisPage, WeatherPage};

/// Metadata about the export run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    pub bikedash_version: String,
    pub trips_file: String,
    pub top_stations_file: String,
    pub trips_loaded: usize,
    pub selection: FilterSelection,
}

/// Every data-driven page under one selection
#[derive(Serialize)]
pub struct DashboardExport {
    pub metadata: ExportMetadata,
    pub users: UserAnalysisPage,
    pub weather: WeatherPage,
    pub stations: StationsPage,
}

/// Build the export document without writing it
pub fn build_export(
    dataset: &Dataset,
    selection: &FilterSelection,
    paths: &DataPaths,
) -> DashboardExport {
    DashboardExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            bikedash_version: env!("CARGO_PKG_VERSION").to_string(),
            trips_file: paths.trips.display().to_string(),
            top_stations_file: paths.top_stations.display().to_string(),
            trips_loaded: dataset.len(),
            selection: selection.clone(),
        },
        users: user_analysis_page(dataset, selection),
        weather: weather_page(dataset),
        stations: stations_page(dataset, selection),
    }
}

/// Export the data pages to a pretty-printed JSON file
///
/// # Arguments
/// * `dataset` - The loaded extracts
/// * `selection` - Rider and season filters applied to the filtered pages
/// * `paths` - Input locations, recorded in the metadata
/// * `output_path` - Path to write the JSON file
pub fn export_dashboard(
    dataset: &Dataset,
    selection: &FilterSelection,
    paths: &DataPaths,
    output_path: &Path,
) -> Result<()> {
    let export = build_export(dataset, selection, paths);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize dashboard export to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write dashboard export to {}", output_path.display()))?;

    Ok(())
}
