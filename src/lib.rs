//! bikedash: Bike-share Strategy Dashboard Library
//!
//! Loads precomputed trip extracts once and derives the filtered metrics,
//! grouped counts and station rankings shown on each dashboard page.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
