pub mod app;
pub mod config;
pub mod format;
pub mod gui;

mod util;
