//! Spinners shown while the extracts load

use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Spinner for a step of unknown length
pub fn create_spinner(message: &str) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("    {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(TICK_CHARS);

    let pb = ProgressBar::new_spinner().with_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Run `step` behind a spinner.
///
/// On success the spinner ends with the text from `done`; on failure it is
/// cleared so the caller's error is the last thing printed.
pub fn run_with_spinner<T, E>(
    message: &str,
    step: impl FnOnce() -> Result<T, E>,
    done: impl FnOnce(&T) -> String,
) -> Result<T, E> {
    let pb = create_spinner(message);
    let result = step();
    match &result {
        Ok(value) => finish_with_success(&pb, &done(value)),
        Err(_) => pb.finish_and_clear(),
    }
    result
}

pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✅ {}", message));
}

pub fn finish_with_warning(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("⚠️  {}", message));
}
