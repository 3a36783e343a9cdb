pub mod api;
pub mod app;
pub mod carousel;
pub mod components;
pub mod config;
pub mod gallery;
pub mod lead;
pub mod page;
pub mod stats;

pub use app::App;
