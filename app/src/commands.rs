//! FILENAME: app/src/commands.rs
// PURPOSE: Commands the table frontend invokes.
// CONTEXT: Every state-changing command recomputes the table from the full
// current state and returns the new view data. Errors come back as strings.

use crate::api_types::{ExportResult, HeaderData, TableViewData};
use crate::config::{AppConfig, ExportScope};
use crate::transactions::{load_transactions, parse_transactions};
use crate::AppState;
use engine::{
    ColumnDefinition, Record, ScrollMetrics, SummaryKind, TableEngine, TableState,
};
use export::{save_report, write_report, ExportSheet};
use std::path::{Path, PathBuf};

// ============================================================================
// HELPERS
// ============================================================================

fn build_view(
    engine: &TableEngine,
    records: &[Record],
    table_state: &TableState,
    config: &AppConfig,
) -> TableViewData {
    let headers = engine
        .columns()
        .iter()
        .map(|column| HeaderData::new(column, table_state.filters.get(&column.id), &table_state.sort))
        .collect();
    let view = engine.calculate(records, table_state);
    TableViewData::from_view(&config.title, headers, &view)
}

/// Lock everything and render the current view.
fn current_view(state: &AppState) -> Result<TableViewData, String> {
    let records = state.records.lock().map_err(|e| e.to_string())?;
    let table_state = state.table_state.lock().map_err(|e| e.to_string())?;
    let config = state.config.lock().map_err(|e| e.to_string())?;
    Ok(build_view(&state.engine, &records, &table_state, &config))
}

fn replace_records(state: &AppState, new_records: Vec<Record>) -> Result<TableViewData, String> {
    let count = new_records.len();
    {
        let mut records = state.records.lock().map_err(|e| e.to_string())?;
        let mut table_state = state.table_state.lock().map_err(|e| e.to_string())?;
        *records = new_records;
        table_state.records_replaced();
    }
    log_info!("DATA", "loaded {} records", count);
    current_view(state)
}

// ============================================================================
// DATA
// ============================================================================

/// Load transactions from a JSON string.
pub fn load_records(state: &AppState, json: String) -> Result<TableViewData, String> {
    log_enter!("CMD", "load_records", "bytes={}", json.len());
    let records = parse_transactions(&json).map_err(|e| {
        log_error!("CMD", "load_records failed: {}", e);
        e
    })?;
    let view = replace_records(state, records)?;
    log_exit!("CMD", "load_records", "total={}", view.total_count);
    Ok(view)
}

/// Load transactions from a JSON file.
pub fn load_records_file(state: &AppState, path: String) -> Result<TableViewData, String> {
    log_enter!("CMD", "load_records_file", "path={}", path);
    let records = load_transactions(Path::new(&path)).map_err(|e| {
        log_error!("CMD", "load_records_file failed: {}", e);
        e
    })?;
    let view = replace_records(state, records)?;
    log_exit!("CMD", "load_records_file", "total={}", view.total_count);
    Ok(view)
}

pub fn get_table_view(state: &AppState) -> Result<TableViewData, String> {
    current_view(state)
}

/// The column layout in its serializable form.
pub fn get_column_definitions(state: &AppState) -> Vec<ColumnDefinition> {
    state
        .engine
        .columns()
        .iter()
        .map(ColumnDefinition::from_spec)
        .collect()
}

// ============================================================================
// FILTER / SORT / SUMMARY
// ============================================================================

/// Set one column filter. Empty text removes it.
pub fn set_filter(
    state: &AppState,
    column_id: String,
    text: String,
) -> Result<TableViewData, String> {
    log_enter!("CMD", "set_filter", "col={} text={:?}", column_id, text);
    {
        let mut table_state = state.table_state.lock().map_err(|e| e.to_string())?;
        let changed = table_state
            .set_filter(state.engine.columns(), &column_id, &text)
            .map_err(|e| {
                log_error!("CMD", "set_filter failed: {}", e);
                e.to_string()
            })?;
        log_debug!("CMD", "set_filter changed={}", changed);
    }
    let view = current_view(state)?;
    log_exit!("CMD", "set_filter", "total={}", view.total_count);
    Ok(view)
}

pub fn clear_filters(state: &AppState) -> Result<TableViewData, String> {
    log_enter!("CMD", "clear_filters");
    state
        .table_state
        .lock()
        .map_err(|e| e.to_string())?
        .clear_filters();
    let view = current_view(state)?;
    log_exit!("CMD", "clear_filters", "total={}", view.total_count);
    Ok(view)
}

/// Header click.
pub fn toggle_sort(state: &AppState, column_id: String) -> Result<TableViewData, String> {
    log_enter!("CMD", "toggle_sort", "col={}", column_id);
    {
        let mut table_state = state.table_state.lock().map_err(|e| e.to_string())?;
        table_state
            .toggle_sort(state.engine.columns(), &column_id)
            .map_err(|e| {
                log_error!("CMD", "toggle_sort failed: {}", e);
                e.to_string()
            })?;
        log_debug!("CMD", "sort now {:?}", table_state.sort);
    }
    let view = current_view(state)?;
    log_exit!("CMD", "toggle_sort");
    Ok(view)
}

/// Footer picker. `kind` is one of sum, avg, count, min, max.
pub fn select_summary(
    state: &AppState,
    column_id: String,
    kind: String,
) -> Result<TableViewData, String> {
    log_enter!("CMD", "select_summary", "col={} kind={}", column_id, kind);
    let kind = SummaryKind::parse(&kind).ok_or_else(|| {
        log_error!("CMD", "select_summary unknown kind {}", kind);
        format!("Unknown summary kind: {}", kind)
    })?;
    {
        let mut table_state = state.table_state.lock().map_err(|e| e.to_string())?;
        table_state
            .select_summary(state.engine.columns(), &column_id, kind)
            .map_err(|e| {
                log_error!("CMD", "select_summary failed: {}", e);
                e.to_string()
            })?;
    }
    let view = current_view(state)?;
    log_exit!("CMD", "select_summary");
    Ok(view)
}

// ============================================================================
// DISPLAY WINDOW
// ============================================================================

/// Scroll report from the row container. Grows the window past the threshold.
pub fn handle_scroll(state: &AppState, metrics: ScrollMetrics) -> Result<TableViewData, String> {
    log_enter!(
        "CMD",
        "handle_scroll",
        "top={} height={} client={}",
        metrics.scroll_top,
        metrics.scroll_height,
        metrics.client_height
    );
    let records = state.records.lock().map_err(|e| e.to_string())?;
    let mut table_state = state.table_state.lock().map_err(|e| e.to_string())?;
    let config = state.config.lock().map_err(|e| e.to_string())?;

    let total = state.engine.filter(&records, &table_state.filters).len();
    if table_state.on_scroll(&metrics, total) {
        log_debug!("WIN", "window grown to {} of {}", table_state.window.visible_len(total), total);
    }
    let view = build_view(&state.engine, &records, &table_state, &config);
    log_exit!("CMD", "handle_scroll", "visible={} of {}", view.visible_count, view.total_count);
    Ok(view)
}

/// Reveal the next step of rows regardless of scroll position.
pub fn show_more(state: &AppState) -> Result<TableViewData, String> {
    log_enter!("CMD", "show_more");
    let records = state.records.lock().map_err(|e| e.to_string())?;
    let mut table_state = state.table_state.lock().map_err(|e| e.to_string())?;
    let config = state.config.lock().map_err(|e| e.to_string())?;

    let total = state.engine.filter(&records, &table_state.filters).len();
    table_state.grow_window(total);
    let view = build_view(&state.engine, &records, &table_state, &config);
    log_exit!("CMD", "show_more", "visible={} of {}", view.visible_count, view.total_count);
    Ok(view)
}

// ============================================================================
// EXPORT
// ============================================================================

fn export_sheet(state: &AppState) -> Result<ExportSheet, String> {
    let records = state.records.lock().map_err(|e| e.to_string())?;
    let table_state = state.table_state.lock().map_err(|e| e.to_string())?;
    let config = state.config.lock().map_err(|e| e.to_string())?;

    let rows: Vec<&Record> = match config.export_scope {
        ExportScope::All => records.iter().collect(),
        ExportScope::Filtered => {
            state
                .engine
                .filtered_sorted(&records, &table_state.filters, &table_state.sort)
        }
    };
    ExportSheet::from_records(config.title.clone(), &rows, state.engine.columns())
        .map_err(|e| e.to_string())
}

/// Save the report as XLSX into `dir`, or the configured export directory.
pub fn export_report(state: &AppState, dir: Option<String>) -> Result<ExportResult, String> {
    log_enter!("CMD", "export_report", "dir={:?}", dir);
    let sheet = export_sheet(state)?;
    let dir = match dir {
        Some(dir) => PathBuf::from(dir),
        None => state.config.lock().map_err(|e| e.to_string())?.export_dir(),
    };

    let path = save_report(&sheet, &dir).map_err(|e| {
        log_error!("CMD", "export_report failed: {}", e);
        e.to_string()
    })?;
    *state.last_export.lock().map_err(|e| e.to_string())? = Some(path.clone());

    let result = ExportResult {
        path: path.display().to_string(),
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        row_count: sheet.row_count(),
        column_count: sheet.column_count(),
    };
    log_exit!("CMD", "export_report", "rows={} file={}", result.row_count, result.file_name);
    Ok(result)
}

/// The report as an in-memory XLSX file, for a browser-side download.
pub fn export_report_bytes(state: &AppState) -> Result<Vec<u8>, String> {
    log_enter!("CMD", "export_report_bytes");
    let sheet = export_sheet(state)?;
    let bytes = write_report(&sheet).map_err(|e| {
        log_error!("CMD", "export_report_bytes failed: {}", e);
        e.to_string()
    })?;
    log_exit!("CMD", "export_report_bytes", "bytes={}", bytes.len());
    Ok(bytes)
}
