// Service module exports
// SQLite-backed storage for schedule items, history and vacations

pub mod database;
pub mod item;
pub mod store;
pub mod vacation;

pub use store::SqliteStore;
