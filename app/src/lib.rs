//! FILENAME: app/src/lib.rs
// PURPOSE: Application state and entry point for the transaction report.
// CONTEXT: Holds the loaded records and the per-view table state behind
// mutexes; commands in `commands` read and update them and return
// frontend-ready view data.

use engine::{Record, TableEngine, TableState};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[macro_use]
pub mod logging;

pub mod api_types;
pub mod commands;
pub mod config;
pub mod transactions;

pub use api_types::{ExportResult, HeaderData, TableViewData};
pub use config::{load_config, AppConfig, ExportScope};
pub use logging::{get_log_path, init_log_file, install_log_bridge, next_seq, write_log};
pub use transactions::{load_transactions, parse_transactions, transaction_columns};

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Lock order: records, then table_state, then config.
pub struct AppState {
    /// Column layout of the report. Fixed for the life of the state.
    pub engine: TableEngine,
    /// Loaded transactions, in load order.
    pub records: Mutex<Vec<Record>>,
    /// Filters, sort, summary selection and display window.
    pub table_state: Mutex<TableState>,
    pub config: Mutex<AppConfig>,
    /// Path of the most recent saved export.
    pub last_export: Mutex<Option<PathBuf>>,
}

pub fn create_app_state() -> Result<AppState, String> {
    create_app_state_with(AppConfig::default())
}

pub fn create_app_state_with(config: AppConfig) -> Result<AppState, String> {
    log_info!("SYS", "Creating AppState title={}", config.title);
    let columns = transaction_columns().map_err(|e| e.to_string())?;
    Ok(AppState {
        engine: TableEngine::new(columns),
        records: Mutex::new(Vec::new()),
        table_state: Mutex::new(TableState::new(config.window)),
        config: Mutex::new(config),
        last_export: Mutex::new(None),
    })
}

// ============================================================================
// ENTRY POINT
// ============================================================================

fn print_view(view: &TableViewData) {
    println!("{}", view.title);
    let headers: Vec<&str> = view.headers.iter().map(|h| h.header.as_str()).collect();
    println!("{}", headers.join(" | "));
    for row in &view.rows {
        println!("{}", row.join(" | "));
    }
    for summary in &view.summaries {
        println!("{} {}: {}", summary.column_id, summary.kind, summary.display);
    }
    if let Some(status) = &view.status {
        println!("{}", status);
    }
}

/// `app <transactions.json> [config.json]`: print the first window of the
/// report and save it as XLSX.
pub fn run(args: &[String]) -> Result<(), String> {
    let data_path = args
        .first()
        .ok_or("usage: app <transactions.json> [config.json]")?;
    let config = match args.get(1) {
        Some(path) => load_config(Path::new(path))?,
        None => AppConfig::default(),
    };

    if let Some(log_path) = &config.log_path {
        match init_log_file(log_path) {
            Ok(path) => log_info!("SYS", "Report host starting, log={}", path.display()),
            Err(e) => {
                eprintln!("[LOG_INIT] FAILED: {}", e);
                eprintln!("[LOG_INIT] Continuing with console-only logging");
            }
        }
    }
    if let Err(e) = install_log_bridge(log::LevelFilter::Info) {
        log_warn!("SYS", "log bridge not installed: {}", e);
    }

    let state = create_app_state_with(config)?;
    let view = commands::load_records_file(&state, data_path.clone())?;
    print_view(&view);

    let export = commands::export_report(&state, None)?;
    println!("Exported {} rows to {}", export.row_count, export.path);
    Ok(())
}
