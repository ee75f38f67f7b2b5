use thiserror::Error;

/// Failures surfaced to the user by the schedule session.
///
/// Each one ends the action that triggered it; nothing is retried
/// automatically and other items are unaffected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("failed to load schedule for user {user_id}: {reason}")]
    FetchFailure { user_id: String, reason: String },

    #[error("item {item_id} could not be found; it may have been deleted")]
    StaleBaseRead { item_id: String },

    #[error("failed to save new dates for item {item_id}: {reason}")]
    UpdateFailure { item_id: String, reason: String },

    #[error("invalid drag gesture: {0}")]
    InvalidGesture(String),
}

impl ScheduleError {
    pub(crate) fn fetch(user_id: &str, err: &anyhow::Error) -> Self {
        ScheduleError::FetchFailure {
            user_id: user_id.to_string(),
            reason: format!("{:#}", err),
        }
    }

    pub(crate) fn update(item_id: &str, err: &anyhow::Error) -> Self {
        ScheduleError::UpdateFailure {
            item_id: item_id.to_string(),
            reason: format!("{:#}", err),
        }
    }
}
