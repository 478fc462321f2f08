//! FILENAME: core/export/src/xlsx_writer.rs

use crate::{ExportError, ExportSheet, REPORT_SHEET_NAME};
use chrono::{NaiveDate, Utc};
use engine::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use std::path::{Path, PathBuf};

const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 1;
const FIRST_DATA_ROW: u32 = 2;

/// Whitespace, path separators and characters file systems reject.
static UNSAFE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\s/\\:*?"<>|]+"#).unwrap());

/// `<title with unsafe runs as "_">_<YYYY-MM-DD>.xlsx`. The name never
/// contains a path separator, so it always lands directly in the target dir.
pub fn report_file_name(title: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}.xlsx",
        UNSAFE_RUN.replace_all(title, "_"),
        date.format("%Y-%m-%d")
    )
}

/// Render the report into an in-memory XLSX file.
pub fn write_report(sheet: &ExportSheet) -> Result<Vec<u8>, ExportError> {
    let mut workbook = build_workbook(sheet)?;
    let bytes = workbook.save_to_buffer()?;
    log::debug!(
        "report '{}' rendered: {} rows, {} bytes",
        sheet.title,
        sheet.row_count(),
        bytes.len()
    );
    Ok(bytes)
}

/// Save the report into `dir`, named after the title and today's UTC date.
pub fn save_report(sheet: &ExportSheet, dir: &Path) -> Result<PathBuf, ExportError> {
    save_report_dated(sheet, dir, Utc::now().date_naive())
}

pub fn save_report_dated(
    sheet: &ExportSheet,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(&sheet.title, date));

    let mut workbook = build_workbook(sheet)?;
    workbook.save(&path)?;
    log::info!("report '{}' saved to {}", sheet.title, path.display());
    Ok(path)
}

fn build_workbook(sheet: &ExportSheet) -> Result<Workbook, ExportError> {
    if sheet.columns.is_empty() {
        return Err(ExportError::NoExportableColumns);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(REPORT_SHEET_NAME)?;

    write_title(worksheet, sheet)?;

    let header_format = Format::new().set_bold();
    for (col, column) in sheet.columns.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, column.width())?;
        worksheet.write_string_with_format(HEADER_ROW, col, &column.header, &header_format)?;
    }

    for (offset, row) in sheet.rows.iter().enumerate() {
        let row_num = FIRST_DATA_ROW + offset as u32;
        for (col, column) in sheet.columns.iter().enumerate() {
            write_value(worksheet, row_num, col as u16, row.get(&column.header), column.numeric)?;
        }
    }

    Ok(workbook)
}

fn write_title(worksheet: &mut Worksheet, sheet: &ExportSheet) -> Result<(), ExportError> {
    let format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_align(FormatAlign::Center);

    let last_col = (sheet.columns.len() - 1) as u16;
    if last_col == 0 {
        // A one-cell range cannot be merged.
        worksheet.write_string_with_format(TITLE_ROW, 0, &sheet.title, &format)?;
    } else {
        worksheet.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, &sheet.title, &format)?;
    }
    Ok(())
}

fn write_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    numeric: bool,
) -> Result<(), ExportError> {
    if value.is_blank() {
        return Ok(());
    }

    let number = match value {
        Value::Number(n) => Some(*n),
        _ if numeric => value.parse_number(),
        _ => None,
    };

    match number {
        Some(n) => worksheet.write_number(row, col, n)?,
        None => worksheet.write_string(row, col, value.display_value())?,
    };
    Ok(())
}
