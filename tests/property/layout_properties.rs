// Property-based tests for the weekly layout pipeline and rescheduling
// Exercises packing and clamping with random item sets

use chrono::{Duration, Local, NaiveDate, TimeZone};
use proptest::prelude::*;
use week_scheduler::layout::{build_week_layout, LayoutGeometry};
use week_scheduler::models::history::{AuditLog, HistoryEntry};
use week_scheduler::models::schedule_item::ScheduleItem;
use week_scheduler::models::week::WeekWindow;
use week_scheduler::schedule::plan_reschedule;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

/// Items starting anywhere from ten days before to ten days after the week
fn items_strategy() -> impl Strategy<Value = Vec<ScheduleItem>> {
    prop::collection::vec((-10i64..17, 0i64..10), 0..24).prop_map(|ranges| {
        ranges
            .into_iter()
            .enumerate()
            .map(|(index, (offset, length))| {
                let start = monday() + Duration::days(offset);
                let end = start + Duration::days(length);
                ScheduleItem::new(format!("t-{}", index), "Task", "u-1", "Alice", start, end)
                    .unwrap()
            })
            .collect()
    })
}

fn layout_of(items: &[ScheduleItem]) -> week_scheduler::layout::WeekLayout {
    build_week_layout(
        items,
        &WeekWindow::containing(monday()),
        &LayoutGeometry::default(),
        monday(),
    )
}

proptest! {
    /// Property: bars sharing a row never cover the same day
    #[test]
    fn prop_rows_never_overlap(items in items_strategy()) {
        let layout = layout_of(&items);

        for (i, a) in layout.bars.iter().enumerate() {
            for b in layout.bars.iter().skip(i + 1) {
                if a.row != b.row {
                    continue;
                }
                let a_end = a.day_offset + a.day_span - 1;
                let b_end = b.day_offset + b.day_span - 1;
                prop_assert!(
                    a_end < b.day_offset || b_end < a.day_offset,
                    "{} and {} overlap in row {}", a.item_id, b.item_id, a.row
                );
            }
        }
    }

    /// Property: every bar stays inside the seven day columns
    #[test]
    fn prop_bars_are_clamped_to_week(items in items_strategy()) {
        let layout = layout_of(&items);
        let week = WeekWindow::containing(monday());

        for bar in &layout.bars {
            prop_assert!(bar.day_offset >= 0);
            prop_assert!(bar.day_span >= 1);
            prop_assert!(bar.day_offset + bar.day_span <= 7);
            prop_assert_eq!(bar.continues_before, bar.start < week.start());
            prop_assert_eq!(bar.continues_after, bar.end > week.end());
        }

        let visible = items
            .iter()
            .filter(|item| item.start.unwrap() <= week.end() && item.end.unwrap() >= week.start())
            .count();
        prop_assert_eq!(layout.bars.len(), visible);
    }

    /// Property: row numbers are dense and bounded by the row count
    #[test]
    fn prop_row_count_matches_rows_used(items in items_strategy()) {
        let layout = layout_of(&items);
        let used = layout.bars.iter().map(|bar| bar.row + 1).max().unwrap_or(0);
        prop_assert_eq!(layout.row_count, used);
        for row in 0..layout.row_count {
            prop_assert!(!layout.row(row).is_empty());
        }
    }

    /// Property: input order does not change the layout
    #[test]
    fn prop_layout_is_order_independent(items in items_strategy()) {
        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(layout_of(&items), layout_of(&reversed));
    }

    /// Property: a move keeps the item's length and only logs real changes
    #[test]
    fn prop_reschedule_preserves_duration(
        offset in -30i64..30,
        length in 0i64..20,
        target in -30i64..30,
    ) {
        let start = monday() + Duration::days(offset);
        let end = start + Duration::days(length);
        let item = ScheduleItem::new("t", "Task", "u-1", "Alice", start, end).unwrap();
        let now = Local.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
        let target_day = monday() + Duration::days(target);

        let plan = plan_reschedule(&item, target_day, "Bob", now, "%Y-%m-%d").unwrap();

        prop_assert_eq!(plan.new_start, target_day);
        prop_assert_eq!(plan.new_end - plan.new_start, end - start);
        prop_assert_eq!(plan.entries.is_empty(), target_day == start);
        prop_assert!(plan.entries.len() <= 1);
    }

    /// Property: appending never rewrites earlier history
    #[test]
    fn prop_history_is_append_only(existing in 0usize..8, added in 0usize..8) {
        let now = Local.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
        let entry = |n: usize| {
            HistoryEntry::new("dates", format!("v{}", n), format!("v{}", n + 1), "Bob", now)
        };

        let log: AuditLog = (0..existing).map(entry).collect();
        let new_entries: Vec<HistoryEntry> = (existing..existing + added).map(entry).collect();
        let appended = log.appended(&new_entries);

        prop_assert_eq!(appended.len(), existing + added);
        prop_assert_eq!(&appended.entries()[..existing], log.entries());
        prop_assert_eq!(&appended.entries()[existing..], new_entries.as_slice());
    }
}
