//! bikedash: Bike-share Strategy Dashboard CLI
//!
//! Loads the trip and top-station extracts once, then renders dashboard
//! pages in the terminal or exports their data to JSON.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use bikedash::cli::{confirm_step, select_labels, select_page, Cli, Commands};
use bikedash::pipeline::{load_dataset_with_progress, Dataset, FilterSelection};
use bikedash::report::{export_dashboard, render_page, Page, PageCache, PageView};
use bikedash::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_info,
    print_sources, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = cli.data_paths();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_sources(&paths.trips, &paths.top_stations, &paths.map_html);

    // Nothing can be shown without both extracts, so a load failure ends the run here
    let dataset = load_dataset_with_progress(&paths, cli.infer_schema_length)
        .context("Failed to load dashboard data")?;
    let dataset = Arc::new(dataset);

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Trips: {}", dataset.len());
    println!("      Rider categories: {}", dataset.observed_riders().join(", "));
    println!("      Seasons: {}", dataset.observed_seasons().join(", "));
    println!("      Precomputed top stations: {}", dataset.top_stations.len());

    let riders = cli.riders();
    let seasons = cli.seasons();
    let mut selection =
        FilterSelection::from_options(&dataset, riders.as_deref(), seasons.as_deref());
    for label in selection.unknown_labels(&dataset) {
        print_warning(&format!("'{}' does not occur in the trip data", label));
    }

    if let Some(Commands::Export { output }) = &cli.command {
        let output_path = cli.export_path(output.as_deref());
        let spinner = create_spinner("Writing dashboard export...");
        export_dashboard(&dataset, &selection, &paths, &output_path)?;
        finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));
        return Ok(());
    }

    let mut cache = PageCache::new();

    // Non-interactive: the requested page, or every page in menu order
    if cli.page.is_some() || cli.no_confirm {
        let pages = match cli.page {
            Some(page) => vec![page],
            None => Page::ALL.to_vec(),
        };
        for page in pages {
            let view = cache.get_or_build(&dataset, page, &selection, &paths.map_html)?;
            show(&view, &cli)?;
        }
        return Ok(());
    }

    let mut current = Page::Overview;
    while let Some(page) = select_page(current)? {
        current = page;
        adjust_filters(&dataset, page, &mut selection)?;

        match cache.get_or_build(&dataset, page, &selection, &paths.map_html) {
            Ok(view) => show(&view, &cli)?,
            // A missing map only affects the map page; keep the session going
            Err(e) if page == Page::Map => print_warning(&e.to_string()),
            Err(e) => return Err(e.into()),
        }
    }

    print_info(&format!(
        "Rendered {} distinct view(s), {} served from cache",
        cache.len(),
        cache.hits()
    ));
    Ok(())
}

/// Re-ask the filters a page depends on, defaulting to the current choice
fn adjust_filters(dataset: &Dataset, page: Page, selection: &mut FilterSelection) -> Result<()> {
    if page.uses_rider_filter() {
        selection.riders = select_labels(
            "Select Usertype",
            &dataset.observed_riders(),
            &selection.riders,
        )?;
    }
    if page.uses_season_filter() {
        selection.seasons = select_labels(
            "Select Season",
            &dataset.observed_seasons(),
            &selection.seasons,
        )?;
    }
    Ok(())
}

fn show(view: &PageView, cli: &Cli) -> Result<()> {
    render_page(view);

    if let (PageView::Map(map), Some(output)) = (view, &cli.map_output) {
        write_map_output(&map.html, output, cli.no_confirm)?;
    }
    Ok(())
}

/// Copy the map document verbatim to `path`, asking before overwriting unless prompts are off
fn write_map_output(html: &[u8], path: &Path, no_confirm: bool) -> Result<()> {
    if path.exists()
        && !no_confirm
        && !confirm_step(&format!("Overwrite {}?", path.display()))?
    {
        print_info("Map document not written");
        return Ok(());
    }

    let spinner = create_spinner("Writing map document...");
    match std::fs::write(path, html) {
        Ok(()) => {
            finish_with_success(&spinner, &format!("Map saved to {}", path.display()));
            print_success("Open it in a browser to explore the trip flows");
            Ok(())
        }
        Err(e) => {
            finish_with_warning(&spinner, "Map document could not be written");
            Err(e).with_context(|| format!("Failed to write map document to {}", path.display()))
        }
    }
}
