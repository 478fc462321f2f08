//! FILENAME: app/tests/test_table_view.rs
//! PURPOSE: Command-level tests for filtering, sorting, summaries and the display window.

mod common;

use app_lib::commands;
use common::{FixtureJson, TestHarness, TransactionFixture};
use engine::{ScrollMetrics, SortDirection, SummaryKind};

fn column_index(view: &app_lib::TableViewData, id: &str) -> usize {
    view.headers.iter().position(|h| h.id == id).unwrap()
}

// ============================================================================
// LOADING
// ============================================================================

#[test]
fn test_load_shows_first_window() {
    let harness = TestHarness::with_transactions(300);
    let view = harness.view();

    assert_eq!(view.title, "Transaction Records Report");
    assert_eq!(view.headers.len(), 10);
    assert_eq!(view.rows.len(), 40);
    assert_eq!(view.visible_count, 40);
    assert_eq!(view.total_count, 300);
    assert_eq!(view.source_count, 300);
    assert!(view.has_more);
    assert_eq!(view.status.as_deref(), Some("Showing 40 of 300 entries"));
}

#[test]
fn test_rendered_cells() {
    let harness = TestHarness::new();
    let view = harness.load(
        r#"{"transactions": [{"BatchNo": 1, "Date": "2023-03-07T10:15:00.000Z", "Descr": "SBI TRANSACTION x1",
            "AC_Sub": "BANK", "ACNO": "x1", "Status": "pending", "Debit": "1500", "Credit": "250.5"}]}"#,
    );
    let row = &view.rows[0];
    assert_eq!(row[column_index(&view, "BatchNo")], "1.00");
    assert_eq!(row[column_index(&view, "Date")], "3/7/2023");
    assert_eq!(row[column_index(&view, "Status")], "Pending");
    assert_eq!(row[column_index(&view, "Debit")], "1,500.00");
    assert_eq!(row[column_index(&view, "balance")], "1,249.50 DR");
    assert_eq!(row[column_index(&view, "actions")], "View | Edit | Delete");
    assert!(view.status.is_none());
}

#[test]
fn test_invalid_json_keeps_previous_records() {
    let harness = TestHarness::with_transactions(5);
    assert!(commands::load_records(&harness.state, "{not json".to_string()).is_err());
    assert_eq!(harness.view().total_count, 5);
}

// ============================================================================
// FILTERING
// ============================================================================

#[test]
fn test_text_filter_is_case_insensitive() {
    let harness = TestHarness::with_transactions(70);
    let view = commands::set_filter(&harness.state, "Descr".into(), "sbi".into()).unwrap();

    // Every seventh transaction is an SBI one.
    assert_eq!(view.total_count, 10);
    let descr = column_index(&view, "Descr");
    assert!(view.rows.iter().all(|r| r[descr].starts_with("SBI")));

    let header = &view.headers[descr];
    assert_eq!(header.filter_text.as_deref(), Some("sbi"));
}

#[test]
fn test_numeric_filter_and_clear() {
    let harness = TestHarness::new();
    harness.load(r#"[{"Debit": "100", "Credit": "50"}, {"Debit": "0", "Credit": "200"}]"#);

    let view = commands::set_filter(&harness.state, "Debit".into(), ">50".into()).unwrap();
    assert_eq!(view.total_count, 1);
    assert_eq!(view.rows[0][column_index(&view, "Debit")], "100.00");

    // A bare operator hides nothing.
    let view = commands::set_filter(&harness.state, "Debit".into(), ">".into()).unwrap();
    assert_eq!(view.total_count, 2);

    commands::set_filter(&harness.state, "Debit".into(), "=0".into()).unwrap();
    let view = commands::clear_filters(&harness.state).unwrap();
    assert_eq!(view.total_count, 2);
}

#[test]
fn test_status_filter_matches_raw_value() {
    let harness = TestHarness::with_transactions(30);
    let view = commands::set_filter(&harness.state, "Status".into(), "PEND".into()).unwrap();
    assert_eq!(view.total_count, 10);
}

#[test]
fn test_unknown_column_is_rejected() {
    let harness = TestHarness::with_transactions(3);
    let err = commands::set_filter(&harness.state, "Nope".into(), "x".into()).unwrap_err();
    assert!(err.contains("Nope"));
    assert!(commands::toggle_sort(&harness.state, "Nope".into()).is_err());
}

// ============================================================================
// SORTING
// ============================================================================

#[test]
fn test_header_clicks_toggle_direction() {
    let harness = TestHarness::new();
    harness.load(
        r#"[{"Date": "2023-02-01", "Descr": "b"}, {"Date": "2023-01-01", "Descr": "a"}, {"Date": "2023-03-01", "Descr": "c"}]"#,
    );

    let view = commands::toggle_sort(&harness.state, "Date".into()).unwrap();
    let descr = column_index(&view, "Descr");
    let order: Vec<&str> = view.rows.iter().map(|r| r[descr].as_str()).collect();
    assert_eq!(order, vec!["a", "b", "c"]);
    let date_header = &view.headers[column_index(&view, "Date")];
    assert_eq!(date_header.sort_direction, Some(SortDirection::Asc));
    assert_eq!(date_header.sort_indicator.as_deref(), Some("↑"));

    let view = commands::toggle_sort(&harness.state, "Date".into()).unwrap();
    let order: Vec<&str> = view.rows.iter().map(|r| r[descr].as_str()).collect();
    assert_eq!(order, vec!["c", "b", "a"]);

    // Another column starts ascending and clears the marker on the first.
    let view = commands::toggle_sort(&harness.state, "Descr".into()).unwrap();
    assert_eq!(view.headers[descr].sort_direction, Some(SortDirection::Asc));
    assert_eq!(view.headers[column_index(&view, "Date")].sort_direction, None);
}

#[test]
fn test_balance_sorts_by_derived_value() {
    let harness = TestHarness::new();
    harness.load(
        r#"[{"ACNO": "a", "Debit": "10", "Credit": "0"}, {"ACNO": "b", "Debit": "0", "Credit": "5"}, {"ACNO": "c", "Debit": "100", "Credit": "0"}]"#,
    );
    let view = commands::toggle_sort(&harness.state, "balance".into()).unwrap();
    let acno = column_index(&view, "ACNO");
    let order: Vec<&str> = view.rows.iter().map(|r| r[acno].as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
}

// ============================================================================
// SUMMARIES
// ============================================================================

#[test]
fn test_default_summaries() {
    let harness = TestHarness::new();
    harness.load(r#"[{"BatchNo": 1, "Descr": "x", "Debit": "100", "Credit": "50"},
                     {"BatchNo": 2, "Descr": "y", "Debit": "20", "Credit": "150"},
                     {"BatchNo": 2, "Descr": "z", "Debit": "n/a", "Credit": "100"}]"#);
    let view = harness.view();

    let by_id = |id: &str| view.summaries.iter().find(|s| s.column_id == id).unwrap().clone();
    assert_eq!(by_id("BatchNo").kind, SummaryKind::Sum);
    assert_eq!(by_id("BatchNo").display, "5.00");
    assert_eq!(by_id("Descr").kind, SummaryKind::Count);
    assert_eq!(by_id("Descr").display, "3");
    assert_eq!(by_id("Debit").value, 120.0);
    assert_eq!(by_id("Credit").display, "300.00");
    assert_eq!(by_id("balance").value, 180.0);
    // Account No offers no summary.
    assert!(view.summaries.iter().all(|s| s.column_id != "ACNO"));
}

#[test]
fn test_select_summary() {
    let harness = TestHarness::new();
    harness.load(r#"[{"Credit": "50"}, {"Credit": "150"}, {"Credit": "100"}]"#);

    let view = commands::select_summary(&harness.state, "Credit".into(), "avg".into()).unwrap();
    let credit = view.summaries.iter().find(|s| s.column_id == "Credit").unwrap();
    assert_eq!(credit.kind, SummaryKind::Avg);
    assert_eq!(credit.value, 100.0);
    assert_eq!(credit.options, vec![SummaryKind::Sum, SummaryKind::Avg, SummaryKind::Max, SummaryKind::Min]);

    assert!(commands::select_summary(&harness.state, "Credit".into(), "count".into()).is_err());
    assert!(commands::select_summary(&harness.state, "Credit".into(), "median".into()).is_err());
}

#[test]
fn test_empty_data_summaries_are_zero() {
    let harness = TestHarness::new();
    harness.load("[]");
    commands::select_summary(&harness.state, "Debit".into(), "max".into()).unwrap();
    let view = harness.view();
    assert!(view.summaries.iter().all(|s| s.value == 0.0));
    assert!(view.rows.is_empty());
    assert!(!view.has_more);
}

#[test]
fn test_summary_covers_rows_outside_window() {
    let harness = TestHarness::with_transactions(100);
    let fixtures = TransactionFixture::generate(100);
    let expected: u64 = fixtures.iter().map(|t| t.debit).sum();

    let view = harness.view();
    assert_eq!(view.rows.len(), 40);
    let debit = view.summaries.iter().find(|s| s.column_id == "Debit").unwrap();
    assert_eq!(debit.value, expected as f64);
}

// ============================================================================
// DISPLAY WINDOW
// ============================================================================

#[test]
fn test_scroll_grows_window_until_exhausted() {
    let harness = TestHarness::with_window(4, 3);
    harness.load(&TransactionFixture::generate(9).to_json());

    let near_top = ScrollMetrics { scroll_top: 0.0, scroll_height: 1000.0, client_height: 300.0 };
    let near_bottom = ScrollMetrics { scroll_top: 500.0, scroll_height: 1000.0, client_height: 300.0 };

    assert_eq!(commands::handle_scroll(&harness.state, near_top).unwrap().visible_count, 4);
    assert_eq!(commands::handle_scroll(&harness.state, near_bottom).unwrap().visible_count, 7);
    assert_eq!(commands::handle_scroll(&harness.state, near_bottom).unwrap().visible_count, 9);
    let view = commands::handle_scroll(&harness.state, near_bottom).unwrap();
    assert_eq!(view.visible_count, 9);
    assert!(view.status.is_none());
}

#[test]
fn test_filter_change_resets_window() {
    let harness = TestHarness::with_window(4, 3);
    harness.load(&TransactionFixture::generate(30).to_json());
    commands::show_more(&harness.state).unwrap();
    assert_eq!(harness.view().visible_count, 7);

    // Sorting keeps the window.
    commands::toggle_sort(&harness.state, "Debit".into()).unwrap();
    assert_eq!(harness.view().visible_count, 7);

    let view = commands::set_filter(&harness.state, "AC_Sub".into(), "a".into()).unwrap();
    assert_eq!(view.visible_count, 4.min(view.total_count));
}

#[test]
fn test_reload_resets_window() {
    let harness = TestHarness::with_window(4, 3);
    harness.load(&TransactionFixture::generate(30).to_json());
    commands::show_more(&harness.state).unwrap();
    let view = harness.load(&TransactionFixture::generate(12).to_json());
    assert_eq!(view.visible_count, 4);
    assert_eq!(view.status.as_deref(), Some("Showing 4 of 12 entries"));
}

#[test]
fn test_reload_clears_filter_sort_and_summary_picks() {
    let harness = TestHarness::new();
    harness.load(r#"[{"Debit": "100"}, {"Debit": "0"}]"#);
    commands::set_filter(&harness.state, "Debit".into(), ">50".into()).unwrap();
    commands::toggle_sort(&harness.state, "Debit".into()).unwrap();
    commands::select_summary(&harness.state, "Debit".into(), "max".into()).unwrap();

    let view = harness.load(r#"[{"Debit": "1"}, {"Debit": "2"}, {"Debit": "3"}]"#);
    assert_eq!(view.total_count, 3);
    let debit = column_index(&view, "Debit");
    assert_eq!(view.headers[debit].filter_text, None);
    assert_eq!(view.headers[debit].sort_direction, None);
    let summary = view.summaries.iter().find(|s| s.column_id == "Debit").unwrap();
    assert_eq!(summary.kind, SummaryKind::Sum);
    assert_eq!(summary.value, 6.0);
}

#[test]
fn test_column_definitions() {
    let harness = TestHarness::new();
    let definitions = commands::get_column_definitions(&harness.state);
    let json = serde_json::to_value(&definitions).unwrap();
    assert_eq!(json[0]["id"], "BatchNo");
    assert_eq!(json[0]["type"], "number");
    assert_eq!(json[0]["defaultSummary"], "sum");
    assert_eq!(json[5]["type"], "custom");
    assert_eq!(json[5]["filter"], true);
}
