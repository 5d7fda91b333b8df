#[macro_use] pub mod core;
#[macro_use] pub mod types;

pub mod cli;
pub mod companies;
pub mod config;
pub mod formats;
pub mod formatting;
pub mod report;
pub mod summary;
pub mod time;
