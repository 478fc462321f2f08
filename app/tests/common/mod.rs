//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for report host integration tests.

#![allow(dead_code)]

use app_lib::{commands, create_app_state_with, AppConfig, AppState, TableViewData};
use engine::WindowConfig;

const BANKS: [&str; 7] = ["SBI", "HDFC", "ICICI", "AXIS", "PNB", "BOB", "UNION"];
const ACCOUNT_TYPES: [&str; 7] = ["BANK", "LT", "ST", "CASH", "SAVINGS", "CURRENT", "LOAN"];
const STATUSES: [&str; 3] = ["active", "pending", "inactive"];

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Create a new harness with default configuration and no records.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        TestHarness {
            state: create_app_state_with(config).unwrap(),
        }
    }

    /// Create a harness with a small window, handy for window growth tests.
    pub fn with_window(initial_size: usize, growth_step: usize) -> Self {
        Self::with_config(AppConfig {
            window: WindowConfig {
                initial_size,
                growth_step,
                reveal_threshold: 0.75,
            },
            ..AppConfig::default()
        })
    }

    /// Create a harness loaded with `count` generated transactions.
    pub fn with_transactions(count: usize) -> Self {
        let harness = Self::new();
        harness.load(&TransactionFixture::generate(count).to_json());
        harness
    }

    pub fn load(&self, json: &str) -> TableViewData {
        commands::load_records(&self.state, json.to_string()).unwrap()
    }

    pub fn view(&self) -> TableViewData {
        commands::get_table_view(&self.state).unwrap()
    }
}

/// One generated transaction, shaped like the report's input file.
#[derive(Debug, Clone)]
pub struct TransactionFixture {
    pub batch_no: usize,
    pub date: String,
    pub descr: String,
    pub ac_sub: String,
    pub acno: String,
    pub status: String,
    pub debit: u64,
    pub credit: u64,
}

impl TransactionFixture {
    /// Deterministic transactions, ten per batch.
    pub fn generate(count: usize) -> Vec<TransactionFixture> {
        (0..count)
            .map(|i| {
                let acno = format!("ac{:04}", (i * 7919) % 10_000);
                TransactionFixture {
                    batch_no: i / 10 + 1,
                    date: format!("2023-{:02}-{:02}T10:15:00.000Z", i % 12 + 1, i % 28 + 1),
                    descr: format!("{} TRANSACTION {}", BANKS[i % BANKS.len()], acno),
                    ac_sub: ACCOUNT_TYPES[(i / 3) % ACCOUNT_TYPES.len()].to_string(),
                    acno,
                    status: STATUSES[i % STATUSES.len()].to_string(),
                    debit: 1000 + (i as u64 * 7_919) % 2_000_000,
                    credit: 100 + (i as u64 * 104_729) % 500_000,
                }
            })
            .collect()
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "BatchNo": self.batch_no,
            "Date": self.date,
            "Descr": self.descr,
            "AC_Sub": self.ac_sub,
            "ACNO": self.acno,
            "Status": self.status,
            "Debit": self.debit.to_string(),
            "Credit": self.credit.to_string(),
        })
    }
}

pub trait FixtureJson {
    fn to_json(&self) -> String;
}

impl FixtureJson for Vec<TransactionFixture> {
    /// The `{"transactions": [...]}` file shape.
    fn to_json(&self) -> String {
        let rows: Vec<serde_json::Value> = self.iter().map(TransactionFixture::to_value).collect();
        serde_json::json!({ "transactions": rows }).to_string()
    }
}
