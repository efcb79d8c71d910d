use chrono::{Timelike, Weekday};
use echampo::core::schedule::render_grid;
use echampo::core::timetable::{Cell, duration, entries_for_cell, is_block_start, layout, reschedule};
use echampo::models::{WeekFilter, WeekParity};

mod common;
use common::{hm, slot};

#[test]
fn test_cells_follow_half_open_interval() {
    let entries = vec![slot(1, Weekday::Mon, hm(9, 0), hm(11, 0), WeekParity::Both)];

    assert_eq!(entries_for_cell(&entries, Weekday::Mon, 9, WeekFilter::All).len(), 1);
    assert_eq!(entries_for_cell(&entries, Weekday::Mon, 10, WeekFilter::All).len(), 1);
    assert!(entries_for_cell(&entries, Weekday::Mon, 11, WeekFilter::All).is_empty());
    assert!(entries_for_cell(&entries, Weekday::Mon, 8, WeekFilter::All).is_empty());
    assert!(entries_for_cell(&entries, Weekday::Tue, 9, WeekFilter::All).is_empty());
}

#[test]
fn test_partial_hours_occupy_their_cells() {
    let entries = vec![slot(1, Weekday::Thu, hm(9, 30), hm(11, 15), WeekParity::Both)];

    for hour in [9, 10, 11] {
        assert_eq!(entries_for_cell(&entries, Weekday::Thu, hour, WeekFilter::All).len(), 1);
    }
    assert!(entries_for_cell(&entries, Weekday::Thu, 12, WeekFilter::All).is_empty());
}

#[test]
fn test_block_start_and_duration() {
    let e = slot(1, Weekday::Mon, hm(9, 0), hm(11, 0), WeekParity::Both);

    assert!(is_block_start(&e, 9));
    assert!(!is_block_start(&e, 10));
    assert!(!is_block_start(&e, 11));
    assert_eq!(duration(&e), 2);

    // minutes are ignored for the span
    let short = slot(2, Weekday::Mon, hm(9, 45), hm(10, 15), WeekParity::Both);
    assert_eq!(duration(&short), 1);
}

#[test]
fn test_reschedule_keeps_length() {
    let e = slot(7, Weekday::Mon, hm(9, 0), hm(11, 0), WeekParity::Week1);
    let moved = reschedule(&e, Weekday::Wed, 14).expect("moved");

    assert_eq!(moved.day, Weekday::Wed);
    assert_eq!(moved.start, hm(14, 0));
    assert_eq!(moved.end, hm(16, 0));
    assert_eq!(moved.id, 7);
    assert_eq!(moved.week, WeekParity::Week1);

    // original left alone
    assert_eq!(e.day, Weekday::Mon);
    assert_eq!(e.start, hm(9, 0));
}

#[test]
fn test_reschedule_keeps_minutes() {
    let e = slot(1, Weekday::Fri, hm(9, 30), hm(11, 45), WeekParity::Both);
    let moved = reschedule(&e, Weekday::Tue, 14).expect("moved");

    assert_eq!(moved.start, hm(14, 30));
    assert_eq!(moved.end, hm(16, 45));
    assert_eq!(moved.end.minute(), 45);
}

#[test]
fn test_reschedule_past_midnight_is_rejected() {
    let e = slot(1, Weekday::Mon, hm(9, 0), hm(11, 0), WeekParity::Both);

    assert!(reschedule(&e, Weekday::Mon, 22).is_none());
    assert!(reschedule(&e, Weekday::Mon, 24).is_none());
    assert!(reschedule(&e, Weekday::Mon, 21).is_some());
}

#[test]
fn test_layout_start_then_covered() {
    let entries = vec![slot(1, Weekday::Mon, hm(9, 0), hm(11, 0), WeekParity::Both)];
    let grid = layout(&entries, WeekFilter::All, 8, 12);

    assert_eq!(grid.rows.len(), 5);
    assert!(grid.rows.iter().all(|r| r.cells.len() == 7));

    let monday = |hour: u32| {
        grid.rows
            .iter()
            .find(|r| r.hour == hour)
            .map(|r| r.cells[0].clone())
            .expect("row")
    };

    assert_eq!(monday(8), Cell::Empty);
    assert!(matches!(monday(9), Cell::Start { span: 2, entry } if entry.id == 1));
    assert!(matches!(monday(10), Cell::Covered(entry) if entry.id == 1));
    assert_eq!(monday(11), Cell::Empty);

    // other days untouched
    assert_eq!(grid.rows[1].cells[1], Cell::Empty);
}

#[test]
fn test_layout_overlap_first_entry_wins() {
    let entries = vec![
        slot(1, Weekday::Tue, hm(10, 0), hm(12, 0), WeekParity::Both),
        slot(2, Weekday::Tue, hm(10, 0), hm(11, 0), WeekParity::Both),
    ];
    let grid = layout(&entries, WeekFilter::All, 10, 11);

    assert!(matches!(grid.rows[0].cells[1], Cell::Start { entry, .. } if entry.id == 1));
    assert!(matches!(grid.rows[1].cells[1], Cell::Covered(entry) if entry.id == 1));
}

#[test]
fn test_week_filter() {
    let entries = vec![
        slot(1, Weekday::Mon, hm(8, 0), hm(9, 0), WeekParity::Week1),
        slot(2, Weekday::Mon, hm(9, 0), hm(10, 0), WeekParity::Week2),
        slot(3, Weekday::Mon, hm(10, 0), hm(11, 0), WeekParity::Both),
    ];

    let ids = |filter: WeekFilter| -> Vec<i64> {
        (8..=10)
            .flat_map(|h| entries_for_cell(&entries, Weekday::Mon, h, filter))
            .map(|e| e.id)
            .collect()
    };

    assert_eq!(ids(WeekFilter::All), vec![1, 2, 3]);
    assert_eq!(ids(WeekFilter::Week1), vec![1, 3]);
    assert_eq!(ids(WeekFilter::Week2), vec![2, 3]);
}

#[test]
fn test_layout_is_repeatable() {
    let entries = vec![
        slot(1, Weekday::Mon, hm(9, 0), hm(11, 0), WeekParity::Both),
        slot(2, Weekday::Fri, hm(14, 0), hm(15, 30), WeekParity::Week2),
    ];

    let a = layout(&entries, WeekFilter::All, 7, 20);
    let b = layout(&entries, WeekFilter::All, 7, 20);

    assert_eq!(a.rows.len(), b.rows.len());
    for (ra, rb) in a.rows.iter().zip(b.rows.iter()) {
        assert_eq!(ra.hour, rb.hour);
        assert_eq!(ra.cells, rb.cells);
    }
}

#[test]
fn test_grid_keeps_badge_without_subject() {
    let entries = vec![slot(1, Weekday::Mon, hm(9, 0), hm(10, 0), WeekParity::Week2)];
    let out = render_grid(&entries, &[], WeekFilter::All, 9, 9);

    assert!(out.contains("S2"));
}
