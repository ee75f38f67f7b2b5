// Week Scheduler Library
// Exports all modules for testing and reuse

pub mod config;
pub mod layout;
pub mod models;
pub mod schedule;
pub mod services;
pub mod utils;
