//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::pipeline::DataPaths;
use crate::report::Page;

/// bikedash - Explore bike-share trip extracts through a strategy dashboard
#[derive(Parser, Debug)]
#[command(name = "bikedash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Trip extract (CSV or Parquet), one row per trip
    #[arg(long, default_value = "reduced_data_nyc_to_plot_7.csv")]
    pub trips: PathBuf,

    /// Precomputed top-20 station extract (CSV or Parquet)
    #[arg(long, default_value = "top20_nyc.csv")]
    pub top20: PathBuf,

    /// Pre-rendered HTML map shown on the map page
    #[arg(long, default_value = "trip_map.html")]
    pub map: PathBuf,

    /// Page to render. Without it, pages are chosen from an interactive menu
    /// (or all are rendered in order with --no-confirm).
    #[arg(short, long, value_enum)]
    pub page: Option<Page>,

    /// Rider categories to include (comma-separated).
    /// Defaults to every category in the data. Pass "" to select none.
    #[arg(short, long, value_delimiter = ',')]
    pub usertype: Option<Vec<String>>,

    /// Seasons to include on the stations page (comma-separated).
    /// Defaults to every season in the data. Pass "" to select none.
    #[arg(short, long, value_delimiter = ',')]
    pub season: Option<Vec<String>>,

    /// Write the map page's HTML document, unmodified, to this path
    #[arg(long)]
    pub map_output: Option<PathBuf>,

    /// Skip interactive prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the user, weather and station pages to JSON
    Export {
        /// Output file path (optional, defaults to the trip file's name with a '_dashboard.json' suffix)
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn data_paths(&self) -> DataPaths {
        DataPaths {
            trips: self.trips.clone(),
            top_stations: self.top20.clone(),
            map_html: self.map.clone(),
        }
    }

    /// Rider categories given on the command line, blanks removed
    pub fn riders(&self) -> Option<Vec<String>> {
        self.usertype.as_deref().map(non_blank)
    }

    /// Seasons given on the command line, blanks removed
    pub fn seasons(&self) -> Option<Vec<String>> {
        self.season.as_deref().map(non_blank)
    }

    /// Get the export path, deriving it from the trip file if not explicitly provided.
    /// The derived path sits next to the trip file with a '_dashboard.json' suffix.
    pub fn export_path(&self, output: Option<&Path>) -> PathBuf {
        output.map(Path::to_path_buf).unwrap_or_else(|| {
            let parent = self.trips.parent().unwrap_or_else(|| Path::new("."));
            let stem = self
                .trips
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("trips");
            parent.join(format!("{}_dashboard.json", stem))
        })
    }
}

fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
