//! Dashboard pages and the data each one shows
//!
//! Building a page only computes values; drawing them is left to
//! [`crate::report::render`] or the JSON export.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use crate::pipeline::{
    apply_filter, apply_rider_filter, bike_distribution, count_above_temperature, daily_activity,
    daily_series, date_range, day_type_split, hourly_activity, mean_daily_rides, mean_temperature,
    most_popular_start, read_map_html, rider_distribution, summarize_users, top_stations,
    DailyActivity, DailyPoint, Dataset, FilterSelection, GroupCount, HourlyActivity, LoadError,
    StationCount, StationEnd, UserSummary, PEAK_SEASON_TEMPERATURE, TOP_N,
};

/// The six pages of the dashboard, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Overview,
    Users,
    Weather,
    Stations,
    Map,
    Recommendations,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Overview,
        Page::Users,
        Page::Weather,
        Page::Stations,
        Page::Map,
        Page::Recommendations,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Dashboard Overview",
            Page::Users => "User Analysis",
            Page::Weather => "Weather and Bike Usage",
            Page::Stations => "Top Stations Analysis",
            Page::Map => "Interactive Trip Map",
            Page::Recommendations => "Strategic Recommendations",
        }
    }

    /// Whether the page's numbers change with the rider filter
    pub fn uses_rider_filter(self) -> bool {
        matches!(self, Page::Users | Page::Stations)
    }

    /// Whether the page's numbers change with the season filter
    pub fn uses_season_filter(self) -> bool {
        matches!(self, Page::Stations)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A labelled headline value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub label: &'static str,
    pub value: String,
}

impl Tile {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewPage {
    pub intro: &'static str,
    pub tiles: Vec<Tile>,
    pub focus_areas: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAnalysisPage {
    pub selection: FilterSelection,
    pub summary: UserSummary,
    pub bike_types: Vec<GroupCount>,
    pub rider_types: Vec<GroupCount>,
    pub day_types: Vec<GroupCount>,
    pub daily: DailyActivity,
    pub hourly: HourlyActivity,
    pub insights: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherPage {
    pub total_rides: usize,
    pub mean_temperature: Option<f64>,
    pub peak_season_threshold: f64,
    pub peak_season_rides: usize,
    pub series: Vec<DailyPoint>,
    pub date_range: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
    pub insights: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationsPage {
    pub selection: FilterSelection,
    /// Unfiltered trip count
    pub total_trips: usize,
    /// Unfiltered busiest start station
    pub most_popular_start: Option<String>,
    /// Unfiltered mean of the daily ride counts
    pub mean_daily_rides: Option<f64>,
    /// Rows left after the rider and season filters
    pub filtered_trips: usize,
    pub top_start: Vec<StationCount>,
    pub top_end: Vec<StationCount>,
    /// Precomputed top-station extract, as loaded
    pub precomputed: Vec<StationCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPage {
    pub source: PathBuf,
    /// The map document, byte for byte
    #[serde(skip_serializing)]
    pub html: Vec<u8>,
    pub bytes: usize,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub points: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationsPage {
    pub intro: &'static str,
    pub tiles: Vec<Tile>,
    pub recommendations: Vec<Recommendation>,
}

/// Computed content of one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Overview(OverviewPage),
    Users(UserAnalysisPage),
    Weather(WeatherPage),
    Stations(StationsPage),
    Map(MapPage),
    Recommendations(RecommendationsPage),
}

impl PageView {
    pub fn page(&self) -> Page {
        match self {
            PageView::Overview(_) => Page::Overview,
            PageView::Users(_) => Page::Users,
            PageView::Weather(_) => Page::Weather,
            PageView::Stations(_) => Page::Stations,
            PageView::Map(_) => Page::Map,
            PageView::Recommendations(_) => Page::Recommendations,
        }
    }
}

/// Compute the content of `page` for the current selection.
///
/// Only the map page touches the filesystem; the others are pure functions
/// of the dataset and selection.
pub fn build_page(
    dataset: &Dataset,
    page: Page,
    selection: &FilterSelection,
    map_path: &Path,
) -> Result<PageView, LoadError> {
    Ok(match page {
        Page::Overview => PageView::Overview(overview_page()),
        Page::Users => PageView::Users(user_analysis_page(dataset, selection)),
        Page::Weather => PageView::Weather(weather_page(dataset)),
        Page::Stations => PageView::Stations(stations_page(dataset, selection)),
        Page::Map => PageView::Map(map_page(map_path)?),
        Page::Recommendations => PageView::Recommendations(recommendations_page()),
    })
}

pub fn overview_page() -> OverviewPage {
    OverviewPage {
        intro: "An analysis of the challenges and opportunities facing the bike-share \
                service as it expands: customer behaviour, station usage and seasonal \
                patterns, to support data-driven decisions on operations.",
        tiles: vec![
            Tile::new("Total Users", "242,200"),
            Tile::new("Average Trip Duration", "9.80 minutes"),
            Tile::new("Peak Usage Season", "Summer"),
            Tile::new("Top Station", "Streeter Dr & Grand Ave"),
        ],
        focus_areas: vec![
            "Most Popular Stations: high-traffic stations and their trip patterns",
            "User Analysis: the profile of the customer base",
            "Weather and Bike Usage: seasonal and temperature effects on activity",
            "Interactive Map: trip flows and station connectivity across the city",
            "Recommendations: strategies for resource allocation and user experience",
        ],
    }
}

/// User analysis honours the rider filter only
pub fn user_analysis_page(dataset: &Dataset, selection: &FilterSelection) -> UserAnalysisPage {
    let trips = apply_rider_filter(&dataset.trips, selection);

    UserAnalysisPage {
        selection: selection.clone(),
        summary: summarize_users(&trips),
        bike_types: bike_distribution(&trips),
        rider_types: rider_distribution(&trips),
        day_types: day_type_split(&trips),
        daily: daily_activity(&trips),
        hourly: hourly_activity(&trips),
        insights: vec![
            "User types: casual riders ride more at weekends, members ride steadily through the week",
            "Trip duration: casual riders take longer trips than members",
            "Peak days and hours: activity peaks on Saturdays and at weekday commuting hours",
            "Bike types: electric bikes favour longer trips, classic bikes dominate short commutes",
        ],
    }
}

/// Weather metrics always cover the full table
pub fn weather_page(dataset: &Dataset) -> WeatherPage {
    let trips = &dataset.trips;

    WeatherPage {
        total_rides: trips.len(),
        mean_temperature: mean_temperature(trips),
        peak_season_threshold: PEAK_SEASON_TEMPERATURE,
        peak_season_rides: count_above_temperature(trips, PEAK_SEASON_TEMPERATURE),
        series: daily_series(trips),
        date_range: date_range(trips),
        insights: vec![
            "Warmer months (May to October) see much higher usage",
            "Usage drops sharply when temperatures fall below freezing",
            "Usage peaks in summer and declines gradually from September",
            "Spring and autumn vary with fluctuating weather",
        ],
    }
}

/// Headline metrics use the full table; the rankings use the rider and season filters
pub fn stations_page(dataset: &Dataset, selection: &FilterSelection) -> StationsPage {
    let filtered = apply_filter(&dataset.trips, selection);

    StationsPage {
        selection: selection.clone(),
        total_trips: dataset.trips.len(),
        most_popular_start: most_popular_start(&dataset.trips),
        mean_daily_rides: mean_daily_rides(&dataset.trips),
        filtered_trips: filtered.len(),
        top_start: top_stations(&filtered, StationEnd::Start, TOP_N),
        top_end: top_stations(&filtered, StationEnd::End, TOP_N),
        precomputed: dataset.top_stations.clone(),
    }
}

pub fn map_page(path: &Path) -> Result<MapPage, LoadError> {
    let html = read_map_html(path)?;
    Ok(MapPage {
        source: path.to_path_buf(),
        bytes: html.len(),
        html,
        caption: "Aggregated bike trips across the city, highlighting popular routes \
                  and the connections between key stations.",
    })
}

pub fn recommendations_page() -> RecommendationsPage {
    RecommendationsPage {
        intro: "Actionable steps to scale the fleet with the seasons, place stations \
                where demand is, and keep popular stations stocked.",
        tiles: vec![
            Tile::new("Stations Impacted", "50+"),
            Tile::new("Seasonal Scaling", "30-40% Reduction"),
            Tile::new("Peak Coverage", "90% Demand Fulfilled"),
        ],
        recommendations: vec![
            Recommendation {
                title: "Scale bikes back between November and April",
                points: vec![
                    "Reduce the fleet by 30-40% in the colder months",
                    "Use the quiet season for maintenance and upgrades",
                    "Run winter promotions to keep regular riders active",
                ],
            },
            Recommendation {
                title: "Add stations along the water",
                points: vec![
                    "Start with 10-15 waterfront stations near high-traffic areas",
                    "Track usage and expand where demand holds",
                    "Partner with local businesses for sponsorship",
                ],
            },
            Recommendation {
                title: "Keep popular stations stocked",
                points: vec![
                    "Rebalance bikes towards the top stations ahead of peak hours",
                    "Add docks at stations that regularly run empty",
                    "Offer incentives for returning bikes to under-supplied stations",
                ],
            },
        ],
    }
}
