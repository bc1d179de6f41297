//! Report module - page content, terminal rendering and JSON export

pub mod cache;
pub mod export;
pub mod pages;
pub mod render;

pub use cache::*;
pub use export::*;
pub use pages::*;
pub use render::*;
