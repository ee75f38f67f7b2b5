// Module exports for models

pub mod history;
pub mod schedule_item;
pub mod vacation;
pub mod week;
