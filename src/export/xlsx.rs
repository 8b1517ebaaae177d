// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Styled single-sheet workbook. The last row is bolded when `total_last`
/// is set, so the grand total stands out.
pub(crate) fn export_xlsx(
    sheet_name: &str,
    headers: &[String],
    rows: &[Vec<String>],
    total_last: bool,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(to_export_error)?;

    if rows.is_empty() {
        worksheet.write(0, 0, "Veri yok").map_err(to_export_error)?;
        workbook.save(path).map_err(to_export_error)?;
        notify_export_success("XLSX (empty report)", path);
        return Ok(());
    }

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(to_export_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(h.as_str())).collect();

    let last = rows.len() - 1;
    for (i, values) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        let band = if i % 2 == 0 { Color::RGB(0xEAF3FB) } else { Color::RGB(0xFFFFFF) };
        let bold = total_last && i == last;

        for (col, v) in values.iter().enumerate() {
            write_cell(worksheet, row, col as u16, v, band, bold)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(v.as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Value to store as a number, if any. Column 0 holds the identity (or the
/// backlog date) and is always text; elsewhere only finite numbers qualify.
pub fn numeric_cell(col: u16, s: &str) -> Option<f64> {
    if col == 0 {
        return None;
    }
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numbers go in as numbers (right-aligned), everything else as text.
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color, bold: bool) -> AppResult<()> {
    let mut fmt = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);
    if bold {
        fmt = fmt.set_bold();
    }

    match numeric_cell(col, s) {
        Some(num) => {
            let fmt = fmt.set_align(FormatAlign::Right);
            ws.write_with_format(row, col, num, &fmt).map_err(to_export_error)?;
        }
        None => {
            ws.write_with_format(row, col, s, &fmt).map_err(to_export_error)?;
        }
    }
    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
