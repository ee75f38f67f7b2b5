//! Interactive side of the weekly schedule: the per-user item cache, the
//! drag-to-reschedule controller and the collaborator traits they use.

pub mod board;
pub mod drag;
mod error;
pub mod store;

pub use board::{BoardStatus, ScheduleBoard};
pub use drag::{
    plan_reschedule, DragContext, DragController, DragOrigin, DragPhase, PendingMove,
    ReschedulePlan, RescheduleOutcome,
};
pub use error::ScheduleError;
pub use store::{Clock, FixedClock, ItemStore, ItemUpdate, SystemClock};
