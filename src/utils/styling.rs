//! Terminal styling for the dashboard: banner, headers, status lines and text bars

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static BIKE: Emoji<'_, '_> = Emoji("🚲 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static FILTER: Emoji<'_, '_> = Emoji("🔎 ", "");
pub static MAP: Emoji<'_, '_> = Emoji("🗺️  ", "");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");

/// Full block used for text bar charts
const BAR_GLYPH: &str = "█";

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ██████╗ ██╗██╗  ██╗███████╗██████╗  █████╗ ███████╗██╗  ██╗
    ██╔══██╗██║██║ ██╔╝██╔════╝██╔══██╗██╔══██╗██╔════╝██║  ██║
    ██████╔╝██║█████╔╝ █████╗  ██║  ██║███████║███████╗███████║
    ██╔══██╗██║██╔═██╗ ██╔══╝  ██║  ██║██╔══██║╚════██║██╔══██║
    ██████╔╝██║██║  ██╗███████╗██████╔╝██║  ██║███████║██║  ██║
    ╚═════╝ ╚═╝╚═╝  ╚═╝╚══════╝╚═════╝ ╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}{}",
        BIKE,
        style("Bike-share strategy dashboard").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the input files card
pub fn print_sources(trips: &Path, top_stations: &Path, map: &Path) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Data Sources").cyan().bold(),
        " ".repeat(box_width - 19)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Trips:    {:<37}│", FOLDER, truncate_path(trips, 36));
    println!("    │  {} Stations: {:<37}│", CHART, truncate_path(top_stations, 36));
    println!("    │  {} Map:      {:<37}│", MAP, truncate_path(map, 36));
    println!("    └{}┘", line);
    println!();
}

/// Print a page header with styling
pub fn print_page_header(number: usize, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("PAGE {}", number)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a section heading inside a page
pub fn print_section(title: &str) {
    println!();
    println!("    {}", style(title).yellow().bold());
}

/// Print the active filter values
pub fn print_filter(dimension: &str, values: &[String]) {
    let shown = if values.is_empty() {
        style("(none selected)".to_string()).red().to_string()
    } else {
        style(values.join(", ")).green().to_string()
    };
    println!("    {} {}: {}", FILTER, style(dimension).dim(), shown);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a data-quality warning on stderr
pub fn print_warning(message: &str) {
    eprintln!("    {}{} {}", WARN, style("Warning:").yellow().bold(), message);
}

/// Print a wrapped paragraph of commentary
pub fn print_paragraph(text: &str) {
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + word.len() + 1 > 70 {
            println!("    {}", line);
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        println!("    {}", line);
    }
}

/// Print a bulleted list
pub fn print_bullets(items: &[&str]) {
    for item in items {
        println!("      {} {}", style("•").dim(), item);
    }
}

/// Horizontal bar proportional to `value / max`, at most `width` glyphs wide
pub fn text_bar(value: f64, max: f64, width: usize) -> String {
    if width == 0 || max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    // Any non-zero value gets at least one glyph
    BAR_GLYPH.repeat(filled.clamp(1, width))
}

/// Format an integer with thousands separators
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let tail: String = s
            .chars()
            .rev()
            .take(max_len - 3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}
