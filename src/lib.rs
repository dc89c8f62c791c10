// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod confirm;
pub mod console;
pub mod employee;
pub mod menu;
pub mod records;
pub mod results_grid;
