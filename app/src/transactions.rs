//! FILENAME: app/src/transactions.rs
// PURPOSE: The transaction report: its column layout, custom cell renderers
// and record loading.
// CONTEXT: Transactions arrive as JSON, either `{"transactions": [...]}` or a
// bare array. Debit and Credit usually come as numeric strings.

use engine::{
    format_number, ColumnSet, ColumnSpec, CustomColumn, DefinitionError, Record, SummaryKind,
    Value, ACTIONS_COLUMN_ID,
};
use serde::Deserialize;
use std::cmp::Ordering;
use std::path::Path;

pub const BALANCE_COLUMN_ID: &str = "balance";

const MONEY_SUMMARIES: [SummaryKind; 4] = [
    SummaryKind::Sum,
    SummaryKind::Avg,
    SummaryKind::Max,
    SummaryKind::Min,
];

// ============================================================================
// CUSTOM RENDERERS
// ============================================================================

/// Status badge text. Anything but active/pending shows as inactive.
pub fn render_status(record: &Record) -> String {
    let status = record.get("Status").display_value().to_lowercase();
    match status.as_str() {
        "active" => "Active",
        "pending" => "Pending",
        _ => "Inactive",
    }
    .to_string()
}

/// Credit minus debit, missing or non-numeric amounts as 0.
pub fn balance_of(record: &Record) -> f64 {
    record.get("Credit").to_number() - record.get("Debit").to_number()
}

/// `|balance|` with a CR suffix when credit covers debit, DR otherwise.
pub fn render_balance(record: &Record) -> String {
    let balance = balance_of(record);
    let side = if balance >= 0.0 { "CR" } else { "DR" };
    format!("{} {}", format_number(balance.abs()), side)
}

pub fn render_actions(_record: &Record) -> String {
    "View | Edit | Delete".to_string()
}

fn compare_balance(a: &Value, b: &Value) -> Ordering {
    a.to_number()
        .partial_cmp(&b.to_number())
        .unwrap_or(Ordering::Equal)
}

// ============================================================================
// COLUMN LAYOUT
// ============================================================================

pub fn transaction_columns() -> Result<ColumnSet, DefinitionError> {
    ColumnSet::new(vec![
        ColumnSpec::number("BatchNo", "Batch No")
            .with_summaries(&[SummaryKind::Sum, SummaryKind::Count])
            .with_default_summary(SummaryKind::Sum),
        ColumnSpec::date("Date", "Date"),
        ColumnSpec::text("Descr", "Description")
            .filterable()
            .with_summaries(&[SummaryKind::Count]),
        ColumnSpec::text("AC_Sub", "Account Sub")
            .filterable()
            .with_summaries(&[SummaryKind::Count]),
        ColumnSpec::text("ACNO", "Account No").filterable(),
        ColumnSpec::custom("Status", "Status", CustomColumn::new(render_status)).filterable(),
        ColumnSpec::number("Debit", "Debit")
            .with_summaries(&MONEY_SUMMARIES)
            .with_default_summary(SummaryKind::Sum),
        ColumnSpec::number("Credit", "Credit")
            .with_summaries(&MONEY_SUMMARIES)
            .with_default_summary(SummaryKind::Sum),
        ColumnSpec::custom(
            BALANCE_COLUMN_ID,
            "Balance",
            CustomColumn::new(render_balance).with_comparator(compare_balance),
        )
        .with_summaries(&[SummaryKind::Sum])
        .with_default_summary(SummaryKind::Sum)
        .with_accessor(|record: &Record| Value::Number(balance_of(record))),
        ColumnSpec::custom(ACTIONS_COLUMN_ID, "Actions", CustomColumn::new(render_actions)),
    ])
}

// ============================================================================
// LOADING
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum TransactionFile {
    Wrapped { transactions: Vec<Record> },
    Bare(Vec<Record>),
}

pub fn parse_transactions(json: &str) -> Result<Vec<Record>, String> {
    let file: TransactionFile =
        serde_json::from_str(json).map_err(|e| format!("Invalid transaction data: {}", e))?;
    Ok(match file {
        TransactionFile::Wrapped { transactions } => transactions,
        TransactionFile::Bare(records) => records,
    })
}

pub fn load_transactions(path: &Path) -> Result<Vec<Record>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
    parse_transactions(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::render_cell;

    fn record(debit: &str, credit: &str, status: &str) -> Record {
        Record::new()
            .with("Debit", debit)
            .with("Credit", credit)
            .with("Status", status)
    }

    #[test]
    fn test_layout() {
        let columns = transaction_columns().unwrap();
        assert_eq!(columns.len(), 10);
        let exported: Vec<_> = columns.exportable().map(|c| c.id.as_str()).collect();
        assert_eq!(
            exported,
            vec!["BatchNo", "Date", "Descr", "AC_Sub", "ACNO", "Debit", "Credit"]
        );
        let filterable: Vec<_> = columns.filterable().map(|c| c.id.as_str()).collect();
        assert_eq!(filterable, vec!["Descr", "AC_Sub", "ACNO", "Status"]);
    }

    #[test]
    fn test_status_badge() {
        assert_eq!(render_status(&record("0", "0", "ACTIVE")), "Active");
        assert_eq!(render_status(&record("0", "0", "pending")), "Pending");
        assert_eq!(render_status(&record("0", "0", "closed")), "Inactive");
        assert_eq!(render_status(&Record::new()), "Inactive");
    }

    #[test]
    fn test_balance_rendering() {
        let columns = transaction_columns().unwrap();
        let balance = columns.get(BALANCE_COLUMN_ID).unwrap();
        assert_eq!(render_cell(balance, &record("1500", "250.5", "active")), "1,249.50 DR");
        assert_eq!(render_cell(balance, &record("100", "100", "active")), "0.00 CR");
        assert_eq!(render_cell(balance, &Record::new().with("Credit", "42")), "42.00 CR");
    }

    #[test]
    fn test_balance_sorts_numerically() {
        let columns = transaction_columns().unwrap();
        let balance = columns.get(BALANCE_COLUMN_ID).unwrap();
        let data = [
            record("0", "900", "active"),
            record("50", "0", "active"),
            record("0", "1000", "active"),
        ];
        let rows: Vec<&Record> = data.iter().collect();
        let sorted = engine::sort_records(&rows, Some(balance), engine::SortDirection::Asc);
        let balances: Vec<f64> = sorted.iter().map(|r| balance_of(r)).collect();
        assert_eq!(balances, vec![-50.0, 900.0, 1000.0]);
    }

    #[test]
    fn test_parse_both_shapes() {
        let wrapped = r#"{"transactions": [{"BatchNo": 1, "Debit": "1200", "Credit": "300"}]}"#;
        let bare = r#"[{"BatchNo": 1}, {"BatchNo": 2, "Status": null}]"#;
        assert_eq!(parse_transactions(wrapped).unwrap()[0].get("Debit"), &Value::from("1200"));
        let records = parse_transactions(bare).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("Status"), &Value::Empty);
        assert!(parse_transactions(r#"{"rows": []}"#).is_err());
    }

    #[test]
    fn test_field_order_is_kept() {
        let records = parse_transactions(r#"[{"Descr": "x", "ACNO": "a1", "BatchNo": 3}]"#).unwrap();
        let keys: Vec<&str> = records[0].iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Descr", "ACNO", "BatchNo"]);
    }
}
