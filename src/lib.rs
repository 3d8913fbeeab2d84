pub mod cli;
pub mod config;
pub mod filesystem;
pub mod logging;
pub mod offline;
pub mod tui;
pub mod vault;
pub mod view;
