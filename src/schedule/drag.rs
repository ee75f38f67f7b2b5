//! Drag-to-reschedule for the weekly schedule.
//!
//! A gesture moves through `Idle -> Dragging -> Committing -> Idle`, or
//! ends in `Failed` when the store rejects the write. Dropping outside any
//! day cancels straight back to `Idle` without touching the store.
//!
//! The drop applies the move to the board immediately. The commit then
//! re-reads the persisted record, recomputes the move from it (keeping its
//! duration), appends history for whatever changed and writes once. On
//! failure the board is restored to its pre-drag copy.

use chrono::{DateTime, Local, NaiveDate};

use super::board::ScheduleBoard;
use super::error::ScheduleError;
use super::store::{Clock, ItemStore, ItemUpdate};
use crate::layout::normalize;
use crate::models::history::HistoryEntry;
use crate::models::schedule_item::ScheduleItem;
use crate::utils::date::{add_days, format_range};

/// History field name used for date moves.
pub const DATES_FIELD: &str = "dates";

/// Where on the item the pointer went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOrigin {
    /// The draggable bar itself
    Body,
    /// A nested control (status badge, link) that keeps its own click behaviour
    Badge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragContext {
    pub item_id: String,
    pub original_start: NaiveDate,
    pub original_end: NaiveDate,
    pub hovered_date: Option<NaiveDate>,
}

impl DragContext {
    pub fn duration_days(&self) -> i64 {
        (self.original_end - self.original_start).num_days()
    }
}

/// A drop that has been applied locally and awaits the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    pub item_id: String,
    pub target_day: NaiveDate,
    /// Local copy before the optimistic move, restored on failure
    pub previous: ScheduleItem,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragPhase {
    Idle,
    Dragging(DragContext),
    Committing(PendingMove),
    Failed(ScheduleError),
}

/// New dates and history computed from the persisted record.
#[derive(Debug, Clone, PartialEq)]
pub struct ReschedulePlan {
    pub old_start: NaiveDate,
    pub old_end: NaiveDate,
    pub new_start: NaiveDate,
    pub new_end: NaiveDate,
    pub entries: Vec<HistoryEntry>,
}

impl ReschedulePlan {
    /// Whether the move lands on the persisted dates.
    pub fn is_noop(&self) -> bool {
        self.old_start == self.new_start && self.old_end == self.new_end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RescheduleOutcome {
    Moved {
        item_id: String,
        plan: ReschedulePlan,
    },
    /// Target matched the persisted dates; nothing was written
    Unchanged { item_id: String },
}

/// Duration-preserving move of `persisted` so it starts on `target_day`.
///
/// Returns `None` when the record has no usable dates.
pub fn plan_reschedule(
    persisted: &ScheduleItem,
    target_day: NaiveDate,
    actor: &str,
    now: DateTime<Local>,
    date_format: &str,
) -> Option<ReschedulePlan> {
    let interval = normalize(persisted)?;
    let new_start = target_day;
    let new_end = add_days(target_day, interval.duration_days());

    let mut plan = ReschedulePlan {
        old_start: interval.start,
        old_end: interval.end,
        new_start,
        new_end,
        entries: Vec::new(),
    };

    // Decided on dates; the display format may not tell two dates apart.
    if !plan.is_noop() {
        plan.entries.push(HistoryEntry::new(
            DATES_FIELD,
            format_range(plan.old_start, plan.old_end, date_format),
            format_range(plan.new_start, plan.new_end, date_format),
            actor,
            now,
        ));
    }

    Some(plan)
}

pub struct DragController {
    phase: DragPhase,
    actor: String,
    date_format: String,
}

impl DragController {
    pub fn new(actor: impl Into<String>, date_format: impl Into<String>) -> Self {
        Self {
            phase: DragPhase::Idle,
            actor: actor.into(),
            date_format: date_format.into(),
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    /// Pointer went down on an item. Returns whether a drag started.
    pub fn begin(&mut self, board: &ScheduleBoard, item_id: &str, origin: DragOrigin) -> bool {
        if let DragPhase::Failed(err) = &self.phase {
            log::debug!("Clearing previous drag failure: {}", err);
            self.phase = DragPhase::Idle;
        }

        if !self.is_idle() {
            log::warn!("Ignoring drag on {}: another drag is in progress", item_id);
            return false;
        }

        if origin != DragOrigin::Body {
            return false;
        }

        let Some(item) = board.item(item_id) else {
            log::warn!("Ignoring drag on unknown item {}", item_id);
            return false;
        };

        if !item.is_draggable() {
            log::debug!("Item {} cannot be dragged", item_id);
            return false;
        }

        let Some(interval) = normalize(item) else {
            return false;
        };

        log::debug!("Drag started for {}", item_id);
        self.phase = DragPhase::Dragging(DragContext {
            item_id: item_id.to_string(),
            original_start: interval.start,
            original_end: interval.end,
            hovered_date: Some(interval.start),
        });
        true
    }

    /// Pointer moved over a day column (or off the grid).
    pub fn hover(&mut self, date: Option<NaiveDate>) {
        if let DragPhase::Dragging(context) = &mut self.phase {
            context.hovered_date = date;
        }
    }

    /// Abandon the current drag without touching the store.
    pub fn cancel(&mut self) {
        if let DragPhase::Dragging(context) = &self.phase {
            log::debug!("Drag cancelled for {}", context.item_id);
            self.phase = DragPhase::Idle;
        }
    }

    /// Pointer released over `target` (`None` = outside every day).
    ///
    /// Returns `Ok(true)` when a move is now pending commit and `Ok(false)`
    /// when the drop was a cancellation.
    pub fn drop_on(
        &mut self,
        board: &mut ScheduleBoard,
        target: Option<NaiveDate>,
    ) -> Result<bool, ScheduleError> {
        let context = match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging(context) => context,
            other => {
                self.phase = other;
                return Err(ScheduleError::InvalidGesture(
                    "drop without an active drag".to_string(),
                ));
            }
        };

        let Some(target_day) = target else {
            log::debug!("Drop outside the grid; {} left in place", context.item_id);
            return Ok(false);
        };

        let Some(previous) = board.item(&context.item_id).cloned() else {
            return Err(ScheduleError::StaleBaseRead {
                item_id: context.item_id,
            });
        };

        let mut moved = previous.clone();
        moved.start = Some(target_day);
        moved.end = Some(add_days(target_day, context.duration_days()));
        board.replace_item(moved);

        self.phase = DragPhase::Committing(PendingMove {
            item_id: context.item_id,
            target_day,
            previous,
        });
        Ok(true)
    }

    /// Write the pending move through `store`.
    pub fn commit<S, C>(
        &mut self,
        board: &mut ScheduleBoard,
        store: &S,
        clock: &C,
    ) -> Result<RescheduleOutcome, ScheduleError>
    where
        S: ItemStore + ?Sized,
        C: Clock + ?Sized,
    {
        let pending = match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Committing(pending) => pending,
            other => {
                self.phase = other;
                return Err(ScheduleError::InvalidGesture(
                    "commit without a pending drop".to_string(),
                ));
            }
        };

        match self.write(&pending, board, store, clock) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                log::error!("Reschedule of {} failed: {}", pending.item_id, err);
                board.replace_item(pending.previous);
                self.phase = DragPhase::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Drop and commit in one step.
    pub fn finish<S, C>(
        &mut self,
        board: &mut ScheduleBoard,
        target: Option<NaiveDate>,
        store: &S,
        clock: &C,
    ) -> Result<Option<RescheduleOutcome>, ScheduleError>
    where
        S: ItemStore + ?Sized,
        C: Clock + ?Sized,
    {
        if !self.drop_on(board, target)? {
            return Ok(None);
        }
        self.commit(board, store, clock).map(Some)
    }

    /// Leave the `Failed` phase, returning the error that caused it.
    pub fn acknowledge_failure(&mut self) -> Option<ScheduleError> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Failed(err) => Some(err),
            other => {
                self.phase = other;
                None
            }
        }
    }

    fn write<S, C>(
        &self,
        pending: &PendingMove,
        board: &mut ScheduleBoard,
        store: &S,
        clock: &C,
    ) -> Result<RescheduleOutcome, ScheduleError>
    where
        S: ItemStore + ?Sized,
        C: Clock + ?Sized,
    {
        let item_id = pending.item_id.as_str();
        let persisted = store
            .read_for_update(item_id)
            .map_err(|err| ScheduleError::update(item_id, &err))?
            .ok_or_else(|| ScheduleError::StaleBaseRead {
                item_id: item_id.to_string(),
            })?;

        let now = clock.now();
        let plan = plan_reschedule(
            &persisted,
            pending.target_day,
            &self.actor,
            now,
            &self.date_format,
        )
        .ok_or_else(|| {
            ScheduleError::InvalidGesture(format!("item {} has no dates to move", item_id))
        })?;

        if plan.is_noop() {
            log::debug!("Item {} already starts on {}", item_id, plan.new_start);
            board.replace_item(persisted);
            return Ok(RescheduleOutcome::Unchanged {
                item_id: item_id.to_string(),
            });
        }

        let update = ItemUpdate {
            start: plan.new_start,
            end: plan.new_end,
            history_append: plan.entries.clone(),
            updated_at: now,
        };
        store
            .apply_update(item_id, &update)
            .map_err(|err| ScheduleError::update(item_id, &err))?;

        let mut updated = persisted;
        updated.start = Some(plan.new_start);
        updated.end = Some(plan.new_end);
        updated.history = updated.history.appended(&plan.entries);
        updated.updated_at = Some(now);
        board.replace_item(updated);

        log::info!(
            "Moved {} from {} ~ {} to {} ~ {} ({})",
            item_id,
            plan.old_start,
            plan.old_end,
            plan.new_start,
            plan.new_end,
            self.actor
        );

        Ok(RescheduleOutcome::Moved {
            item_id: item_id.to_string(),
            plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::history::AuditLog;
    use crate::models::week::WeekWindow;
    use crate::schedule::store::{FixedClock, MockItemStore};
    use anyhow::anyhow;
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2025, 1, 8, 10, 0, 0).unwrap())
    }

    fn task(id: &str, start: u32, end: u32) -> ScheduleItem {
        ScheduleItem::new(id, id, "u-1", "Alice", day(start), day(end)).unwrap()
    }

    fn board_with(items: Vec<ScheduleItem>) -> ScheduleBoard {
        let mut store = MockItemStore::new();
        store
            .expect_fetch_items()
            .returning(move |_| Ok(items.clone()));
        store.expect_fetch_vacations().returning(|_| Ok(Vec::new()));

        let mut board = ScheduleBoard::new("u-1", WeekWindow::containing(day(6)));
        board.refresh(&store).unwrap();
        board
    }

    fn controller() -> DragController {
        DragController::new("Bob", "%a %m/%d")
    }

    #[test]
    fn test_plan_preserves_duration() {
        let item = task("t-1", 7, 9);
        let plan = plan_reschedule(&item, day(10), "Bob", clock().now(), "%Y-%m-%d").unwrap();

        assert_eq!((plan.new_start, plan.new_end), (day(10), day(12)));
        assert_eq!(
            (plan.new_end - plan.new_start).num_days(),
            (plan.old_end - plan.old_start).num_days()
        );
        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.entries[0].field, "dates");
        assert_eq!(plan.entries[0].old_value, "2025-01-07 ~ 2025-01-09");
        assert_eq!(plan.entries[0].new_value, "2025-01-10 ~ 2025-01-12");
        assert_eq!(plan.entries[0].actor, "Bob");
    }

    #[test]
    fn test_plan_for_same_day_has_no_entries() {
        let item = task("t-1", 7, 9);
        let plan = plan_reschedule(&item, day(7), "Bob", clock().now(), "%Y-%m-%d").unwrap();
        assert!(plan.is_noop());
    }

    #[test]
    fn test_plan_detects_move_hidden_by_display_format() {
        // Tuesday to the following Tuesday reads the same under "%a"
        let item = task("t-1", 7, 9);
        let plan = plan_reschedule(&item, day(14), "Bob", clock().now(), "%a").unwrap();

        assert!(!plan.is_noop());
        assert_eq!((plan.new_start, plan.new_end), (day(14), day(16)));
        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.entries[0].old_value, plan.entries[0].new_value);
    }

    #[test]
    fn test_move_across_weeks_with_weekday_format_is_written() {
        let mut store = MockItemStore::new();
        store
            .expect_read_for_update()
            .returning(|_| Ok(Some(task("t-1", 7, 9))));
        store
            .expect_apply_update()
            .times(1)
            .withf(|_, update| update.start == day(14) && update.end == day(16))
            .returning(|_, _| Ok(()));

        let mut board = board_with(vec![task("t-1", 7, 9)]);
        let mut drag = DragController::new("Bob", "%a");
        assert!(drag.begin(&board, "t-1", DragOrigin::Body));

        let outcome = drag
            .finish(&mut board, Some(day(14)), &store, &clock())
            .unwrap();
        assert!(matches!(outcome, Some(RescheduleOutcome::Moved { .. })));
        assert_eq!(board.item("t-1").unwrap().start, Some(day(14)));
        assert_eq!(board.item("t-1").unwrap().history.len(), 1);
    }

    #[test]
    fn test_plan_for_legacy_deadline_item() {
        let mut item = task("t-1", 7, 7);
        item.start = None;
        item.end = None;
        item.deadline = Some(day(8));

        let plan = plan_reschedule(&item, day(10), "Bob", clock().now(), "%Y-%m-%d").unwrap();
        assert_eq!((plan.new_start, plan.new_end), (day(10), day(10)));
        assert_eq!(plan.entries[0].old_value, "2025-01-08");
    }

    #[test]
    fn test_begin_rejects_badge_origin() {
        let board = board_with(vec![task("t-1", 7, 9)]);
        let mut drag = controller();

        assert!(!drag.begin(&board, "t-1", DragOrigin::Badge));
        assert!(drag.is_idle());
        assert!(drag.begin(&board, "t-1", DragOrigin::Body));
        assert!(matches!(drag.phase(), DragPhase::Dragging(_)));
    }

    #[test]
    fn test_begin_rejects_vacations_and_unknown_items() {
        let mut vacation = task("vacation:1", 7, 7);
        vacation.status = crate::models::schedule_item::ItemStatus::Vacation;
        let board = board_with(vec![vacation]);
        let mut drag = controller();

        assert!(!drag.begin(&board, "vacation:1", DragOrigin::Body));
        assert!(!drag.begin(&board, "missing", DragOrigin::Body));
        assert!(drag.is_idle());
    }

    #[test]
    fn test_only_one_drag_at_a_time() {
        let board = board_with(vec![task("a", 6, 6), task("b", 7, 7)]);
        let mut drag = controller();

        assert!(drag.begin(&board, "a", DragOrigin::Body));
        assert!(!drag.begin(&board, "b", DragOrigin::Body));
    }

    #[test]
    fn test_drop_outside_grid_cancels_without_store_calls() {
        let mut board = board_with(vec![task("t-1", 7, 9)]);
        let store = MockItemStore::new(); // any call would panic
        let mut drag = controller();

        drag.begin(&board, "t-1", DragOrigin::Body);
        let outcome = drag.finish(&mut board, None, &store, &clock()).unwrap();

        assert!(outcome.is_none());
        assert!(drag.is_idle());
        assert_eq!(board.item("t-1").unwrap().start, Some(day(7)));
    }

    #[test]
    fn test_drop_applies_move_optimistically() {
        let mut board = board_with(vec![task("t-1", 7, 9)]);
        let mut drag = controller();

        drag.begin(&board, "t-1", DragOrigin::Body);
        drag.hover(Some(day(10)));
        assert!(drag.drop_on(&mut board, Some(day(10))).unwrap());

        let item = board.item("t-1").unwrap();
        assert_eq!((item.start, item.end), (Some(day(10)), Some(day(12))));
        assert!(matches!(drag.phase(), DragPhase::Committing(_)));
    }

    #[test]
    fn test_successful_move_appends_one_entry() {
        let mut board = board_with(vec![task("t-1", 7, 9)]);
        let mut store = MockItemStore::new();
        store
            .expect_read_for_update()
            .with(eq("t-1"))
            .times(1)
            .returning(|_| Ok(Some(task("t-1", 7, 9))));
        store
            .expect_apply_update()
            .withf(|id, update| {
                id == "t-1"
                    && update.start == day(10)
                    && update.end == day(12)
                    && update.history_append.len() == 1
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut drag = controller();
        drag.begin(&board, "t-1", DragOrigin::Body);
        let outcome = drag
            .finish(&mut board, Some(day(10)), &store, &clock())
            .unwrap()
            .unwrap();

        let RescheduleOutcome::Moved { plan, .. } = outcome else {
            panic!("expected a move");
        };
        assert_eq!(plan.entries[0].old_value, "Tue 01/07 ~ Thu 01/09");
        assert_eq!(plan.entries[0].new_value, "Fri 01/10 ~ Sun 01/12");

        let item = board.item("t-1").unwrap();
        assert_eq!((item.start, item.end), (Some(day(10)), Some(day(12))));
        assert_eq!(item.history.len(), 1);
        assert_eq!(item.updated_at, Some(clock().now()));
        assert!(drag.is_idle());
    }

    #[test]
    fn test_same_day_drop_skips_update() {
        let mut board = board_with(vec![task("t-1", 7, 9)]);
        let mut store = MockItemStore::new();
        store
            .expect_read_for_update()
            .returning(|_| Ok(Some(task("t-1", 7, 9))));
        store.expect_apply_update().never();

        let mut drag = controller();
        drag.begin(&board, "t-1", DragOrigin::Body);
        let outcome = drag
            .finish(&mut board, Some(day(7)), &store, &clock())
            .unwrap();

        assert_eq!(
            outcome,
            Some(RescheduleOutcome::Unchanged {
                item_id: "t-1".to_string()
            })
        );
        assert!(board.item("t-1").unwrap().history.is_empty());
    }

    #[test]
    fn test_duration_comes_from_persisted_record() {
        // Someone stretched the item to four days since the board was loaded
        let mut board = board_with(vec![task("t-1", 7, 7)]);
        let mut store = MockItemStore::new();
        store
            .expect_read_for_update()
            .returning(|_| Ok(Some(task("t-1", 6, 9))));
        store
            .expect_apply_update()
            .withf(|_, update| update.start == day(10) && update.end == day(13))
            .returning(|_, _| Ok(()));

        let mut drag = controller();
        drag.begin(&board, "t-1", DragOrigin::Body);
        drag.finish(&mut board, Some(day(10)), &store, &clock())
            .unwrap();

        assert_eq!(board.item("t-1").unwrap().end, Some(day(13)));
    }

    #[test]
    fn test_update_failure_reverts_board() {
        let mut original = task("t-1", 7, 9);
        original.history = AuditLog::from(vec![HistoryEntry::new(
            "status",
            "planned",
            "in_progress",
            "Alice",
            clock().now(),
        )]);
        let mut board = board_with(vec![original.clone()]);

        let mut store = MockItemStore::new();
        let persisted = original.clone();
        store
            .expect_read_for_update()
            .returning(move |_| Ok(Some(persisted.clone())));
        store
            .expect_apply_update()
            .returning(|_, _| Err(anyhow!("permission denied")));

        let mut drag = controller();
        drag.begin(&board, "t-1", DragOrigin::Body);
        let err = drag
            .finish(&mut board, Some(day(10)), &store, &clock())
            .unwrap_err();

        assert!(matches!(err, ScheduleError::UpdateFailure { .. }));
        assert_eq!(board.item("t-1").unwrap(), &original);
        assert!(matches!(drag.phase(), DragPhase::Failed(_)));

        assert_eq!(drag.acknowledge_failure(), Some(err));
        assert!(drag.is_idle());
    }

    #[test]
    fn test_deleted_record_is_stale_base_read() {
        let mut board = board_with(vec![task("t-1", 7, 9)]);
        let mut store = MockItemStore::new();
        store.expect_read_for_update().returning(|_| Ok(None));
        store.expect_apply_update().never();

        let mut drag = controller();
        drag.begin(&board, "t-1", DragOrigin::Body);
        let err = drag
            .finish(&mut board, Some(day(10)), &store, &clock())
            .unwrap_err();

        assert_eq!(
            err,
            ScheduleError::StaleBaseRead {
                item_id: "t-1".to_string()
            }
        );
        assert_eq!(board.item("t-1").unwrap().start, Some(day(7)));
    }

    #[test]
    fn test_failure_does_not_block_next_drag() {
        let mut board = board_with(vec![task("t-1", 7, 9)]);
        let mut store = MockItemStore::new();
        store.expect_read_for_update().returning(|_| Ok(None));

        let mut drag = controller();
        drag.begin(&board, "t-1", DragOrigin::Body);
        assert!(drag.finish(&mut board, Some(day(10)), &store, &clock()).is_err());

        assert!(drag.begin(&board, "t-1", DragOrigin::Body));
    }

    #[test]
    fn test_drop_and_commit_require_matching_phase() {
        let mut board = board_with(vec![task("t-1", 7, 9)]);
        let store = MockItemStore::new();
        let mut drag = controller();

        assert!(matches!(
            drag.drop_on(&mut board, Some(day(8))),
            Err(ScheduleError::InvalidGesture(_))
        ));
        assert!(matches!(
            drag.commit(&mut board, &store, &clock()),
            Err(ScheduleError::InvalidGesture(_))
        ));
        assert!(drag.is_idle());
    }
}
