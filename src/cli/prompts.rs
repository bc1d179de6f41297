//! Interactive prompts using dialoguer

use std::collections::BTreeSet;

use anyhow::Result;
use dialoguer::{Confirm, MultiSelect, Select};

use crate::report::Page;

/// Ask which page to show next. Returns `None` when the user quits.
pub fn select_page(current: Page) -> Result<Option<Page>> {
    let mut items: Vec<&str> = Page::ALL.iter().map(|p| p.title()).collect();
    items.push("Quit");

    let default = Page::ALL.iter().position(|p| *p == current).unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Select an aspect of the analysis")
        .items(&items)
        .default(default)
        .interact_opt()?;

    Ok(choice.and_then(|i| Page::ALL.get(i).copied()))
}

/// Multi-select over the observed labels, pre-ticking the current selection
pub fn select_labels(
    prompt: &str,
    options: &[String],
    current: &BTreeSet<String>,
) -> Result<BTreeSet<String>> {
    let defaults: Vec<bool> = options.iter().map(|o| current.contains(o)).collect();
    let chosen = MultiSelect::new()
        .with_prompt(prompt)
        .items(options)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| options[i].clone()).collect())
}

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}
