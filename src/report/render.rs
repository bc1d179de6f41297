//! Terminal rendering of computed pages

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{DailyActivity, GroupCount, HourCount, HourlyActivity, StationCount};
use crate::utils::{
    format_count, print_bullets, print_filter, print_info, print_page_header, print_paragraph,
    print_section, print_warning, text_bar, MAP,
};

use super::pages::{
    MapPage, OverviewPage, Page, PageView, RecommendationsPage, StationsPage, Tile, UserAnalysisPage,
    WeatherPage,
};

/// Shown in place of any metric computed over zero rows
pub const NO_DATA: &str = "No data";

const BAR_WIDTH: usize = 30;

/// Print one page to stdout
pub fn render_page(view: &PageView) {
    let page = view.page();
    let number = Page::ALL
        .iter()
        .position(|p| *p == page)
        .map_or(0, |i| i + 1);
    print_page_header(number, page.title());

    match view {
        PageView::Overview(p) => render_overview(p),
        PageView::Users(p) => render_users(p),
        PageView::Weather(p) => render_weather(p),
        PageView::Stations(p) => render_stations(p),
        PageView::Map(p) => render_map(p),
        PageView::Recommendations(p) => render_recommendations(p),
    }
    println!();
}

fn render_overview(page: &OverviewPage) {
    print_paragraph(page.intro);
    print_tiles(&page.tiles);
    print_section("Explore key insights");
    print_bullets(&page.focus_areas);
}

fn render_users(page: &UserAnalysisPage) {
    let riders: Vec<String> = page.selection.riders.iter().cloned().collect();
    print_filter("Usertype", &riders);

    let summary = &page.summary;
    print_tiles(&[
        Tile::new("Total Users", format_count(summary.total_users)),
        Tile::new(
            "Avg. Trip Minutes",
            summary
                .median_trip_minutes
                .map_or_else(|| NO_DATA.to_string(), |m| format!("{:.2}", m)),
        ),
        Tile::new(
            "Peak Usage Day",
            summary.peak_day.clone().unwrap_or_else(|| NO_DATA.to_string()),
        ),
    ]);

    print_counts("Bike Usage", "Bike type", &page.bike_types);
    print_counts("User Type Distribution", "User type", &page.rider_types);
    print_counts("Activity: Weekday vs Weekend", "Day type", &page.day_types);
    print_daily(&page.daily);
    print_hourly(&page.hourly);

    print_section("Key Insights");
    print_bullets(&page.insights);
}

fn render_weather(page: &WeatherPage) {
    print_tiles(&[
        Tile::new("Total Rides", format_count(page.total_rides)),
        Tile::new(
            "Avg. Temperature (°C)",
            page.mean_temperature
                .map_or_else(|| NO_DATA.to_string(), |t| format!("{:.1}", t)),
        ),
        Tile::new("Peak Season Rides", format_count(page.peak_season_rides)),
    ]);

    print_section("Daily Bike Trips and Temperatures");
    if page.series.is_empty() {
        print_info(NO_DATA);
    } else {
        let max_rides = page
            .series
            .iter()
            .map(|p| p.bike_rides_daily)
            .fold(0.0, f64::max);

        let mut table = new_table(&["Date", "Rides", "Temp (°C)", ""]);
        for point in &page.series {
            let temp = Cell::new(format!("{:.1}", point.avg_temp))
                .set_alignment(CellAlignment::Right)
                .fg(if point.avg_temp < 0.0 { Color::Blue } else { Color::Red });
            table.add_row(vec![
                Cell::new(point.date),
                Cell::new(format!("{:.0}", point.bike_rides_daily)).set_alignment(CellAlignment::Right),
                temp,
                Cell::new(text_bar(point.bike_rides_daily, max_rides, BAR_WIDTH)).fg(Color::Blue),
            ]);
        }
        print_table(&table);

        if let Some((first, last)) = page.date_range {
            print_info(&format!("{} to {}, days below 0 °C shown in blue", first, last));
        }
    }

    print_section("Insights");
    print_bullets(&page.insights);
}

fn render_stations(page: &StationsPage) {
    let riders: Vec<String> = page.selection.riders.iter().cloned().collect();
    let seasons: Vec<String> = page.selection.seasons.iter().cloned().collect();
    print_filter("Usertype", &riders);
    print_filter("Season", &seasons);

    print_section("Key Metrics");
    print_tiles(&[
        Tile::new("Total Trips", format_count(page.total_trips)),
        Tile::new(
            "Most Popular Start",
            page.most_popular_start
                .clone()
                .unwrap_or_else(|| NO_DATA.to_string()),
        ),
        Tile::new(
            "Avg. Trips per Station",
            page.mean_daily_rides
                .map_or_else(|| NO_DATA.to_string(), |m| format!("{:.1}", m)),
        ),
    ]);

    print_info(&format!(
        "{} trips match the current filters",
        format_count(page.filtered_trips)
    ));
    print_stations("Top 20 Start Stations", &page.top_start);
    print_stations("Top 20 End Stations", &page.top_end);
    print_stations("Precomputed Top Stations", &page.precomputed);
}

fn render_map(page: &MapPage) {
    println!(
        "    {}{}",
        MAP,
        style("Aggregated Bike Trips").white().bold()
    );
    print_paragraph(page.caption);
    print_info(&format!(
        "Map document: {} ({} bytes)",
        page.source.display(),
        format_count(page.bytes)
    ));
}

fn render_recommendations(page: &RecommendationsPage) {
    print_paragraph(page.intro);
    print_section("Key Metrics");
    print_tiles(&page.tiles);

    print_section("Detailed Recommendations");
    for (i, rec) in page.recommendations.iter().enumerate() {
        println!();
        println!("      {}", style(format!("{}. {}", i + 1, rec.title)).bold());
        print_bullets(&rec.points);
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn print_table(table: &Table) {
    // Indent the table
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn print_tiles(tiles: &[Tile]) {
    println!();
    let mut table = new_table(&["Metric", "Value"]);
    for tile in tiles {
        let value = Cell::new(&tile.value).add_attribute(Attribute::Bold);
        let value = if tile.value == NO_DATA {
            value.fg(Color::DarkGrey)
        } else {
            value.fg(Color::Cyan)
        };
        table.add_row(vec![Cell::new(tile.label), value]);
    }
    print_table(&table);
}

fn print_counts(title: &str, label: &str, groups: &[GroupCount]) {
    print_section(title);
    if groups.is_empty() {
        print_info(NO_DATA);
        return;
    }
    let max = groups.iter().map(|g| g.count).max().unwrap_or(0) as f64;
    let mut table = new_table(&[label, "Rides", ""]);
    for group in groups {
        table.add_row(vec![
            Cell::new(&group.label),
            Cell::new(format_count(group.count)).set_alignment(CellAlignment::Right),
            Cell::new(text_bar(group.count as f64, max, BAR_WIDTH)).fg(Color::Cyan),
        ]);
    }
    print_table(&table);
}

fn print_daily(daily: &DailyActivity) {
    let groups: Vec<GroupCount> = daily
        .days
        .iter()
        .map(|d| GroupCount::new(d.day.name(), d.count))
        .collect();
    print_counts("Daily Activity (Monday to Sunday)", "Day", &groups);

    for bad in &daily.malformed {
        print_warning(&format!(
            "{} row(s) have day_of_week '{}', which is not a day of the week",
            bad.count, bad.label
        ));
    }
}

fn print_hourly(hourly: &HourlyActivity) {
    print_section("Hourly Activity: Weekday vs Weekend");
    warn_hourly_malformed(hourly);
    if hourly.weekday.is_empty() && hourly.weekend.is_empty() {
        print_info(NO_DATA);
        return;
    }

    let max = hourly
        .weekday
        .iter()
        .chain(&hourly.weekend)
        .map(|h| h.count)
        .max()
        .unwrap_or(0) as f64;
    let lookup = |counts: &[HourCount], hour: u8| {
        counts.iter().find(|h| h.hour == hour).map(|h| h.count)
    };

    let mut table = new_table(&["Hour", "Weekday", "", "Weekend", ""]);
    for hour in 0..24u8 {
        let weekday = lookup(&hourly.weekday, hour);
        let weekend = lookup(&hourly.weekend, hour);
        if weekday.is_none() && weekend.is_none() {
            continue;
        }
        let cell = |count: Option<usize>| {
            Cell::new(count.map_or_else(|| "-".to_string(), format_count))
                .set_alignment(CellAlignment::Right)
        };
        table.add_row(vec![
            Cell::new(format!("{:02}:00", hour)),
            cell(weekday),
            Cell::new(text_bar(weekday.unwrap_or(0) as f64, max, BAR_WIDTH / 2)).fg(Color::Blue),
            cell(weekend),
            Cell::new(text_bar(weekend.unwrap_or(0) as f64, max, BAR_WIDTH / 2)).fg(Color::Yellow),
        ]);
    }
    print_table(&table);
}

fn warn_hourly_malformed(hourly: &HourlyActivity) {
    for bad in &hourly.malformed {
        print_warning(&format!(
            "{} row(s) have weekday_or_weekend '{}' and are left out of the hourly split",
            bad.count, bad.label
        ));
    }
}

fn print_stations(title: &str, stations: &[StationCount]) {
    print_section(title);
    if stations.is_empty() {
        print_info(NO_DATA);
        return;
    }
    let max = stations.iter().map(|s| s.trips).max().unwrap_or(0) as f64;
    let mut table = new_table(&["#", "Station", "Trips", ""]);
    for (rank, station) in stations.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&station.station),
            Cell::new(format_count(station.trips as usize)).set_alignment(CellAlignment::Right),
            Cell::new(text_bar(station.trips as f64, max, BAR_WIDTH)).fg(Color::Blue),
        ]);
    }
    print_table(&table);
}
