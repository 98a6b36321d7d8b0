//! Generates worksheet XML from a [`Sheet`].
//!
//! Text cells use inline strings (`t="inlineStr"`) so no shared string table
//! has to be built.

use crate::cell_ref::col_to_letter;
use crate::value::CellValue;
use crate::workbook::{CellData, Sheet};

use super::xml_escape;

/// Write a complete worksheet XML string from a `Sheet`.
///
/// `tab_selected` marks the sheet that opens first.
pub(crate) fn write_sheet_xml(sheet: &Sheet, tab_selected: bool) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    );
    out.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    out.push('\n');

    // <dimension>
    let (max_col, max_row) = (sheet.max_col(), sheet.max_row());
    if max_row > 0 && max_col > 0 {
        out.push_str(&format!(
            "<dimension ref=\"A1:{}{}\"/>\n",
            col_to_letter(max_col),
            max_row
        ));
    } else {
        out.push_str("<dimension ref=\"A1\"/>\n");
    }

    if tab_selected {
        out.push_str("<sheetViews><sheetView tabSelected=\"1\" workbookViewId=\"0\"/></sheetViews>\n");
    }

    // <sheetData>
    out.push_str("<sheetData>\n");
    write_sheet_data(&mut out, sheet);
    out.push_str("</sheetData>\n");

    // <mergeCells>
    let merges = sheet.merges();
    if !merges.is_empty() {
        out.push_str(&format!("<mergeCells count=\"{}\">\n", merges.len()));
        for merge in merges {
            out.push_str(&format!("<mergeCell ref=\"{}\"/>\n", merge.to_ref()));
        }
        out.push_str("</mergeCells>\n");
    }

    out.push_str("</worksheet>");
    out
}

/// Write all cell rows into `<sheetData>`.
fn write_sheet_data(out: &mut String, sheet: &Sheet) {
    let mut current_row = None;

    for (col, row, cell) in sheet.cells() {
        if current_row != Some(row) {
            if current_row.is_some() {
                out.push_str("</row>\n");
            }
            out.push_str(&format!("<row r=\"{row}\">"));
            current_row = Some(row);
        }
        write_cell(out, col, row, cell);
    }

    if current_row.is_some() {
        out.push_str("</row>\n");
    }
}

/// Write a single `<c>` element.
fn write_cell(out: &mut String, col: u32, row: u32, cell: &CellData) {
    let cell_ref = format!("{}{}", col_to_letter(col), row);
    out.push_str(&format!("<c r=\"{cell_ref}\""));

    // Style index; StyleId(0) is the workbook default and needs no attribute
    if let Some(style) = cell.style.filter(|s| s.0 > 0) {
        out.push_str(&format!(" s=\"{}\"", style.0));
    }

    match &cell.value {
        CellValue::Empty => out.push_str("/>"),
        CellValue::Text(s) => {
            out.push_str(" t=\"inlineStr\"><is><t xml:space=\"preserve\">");
            out.push_str(&xml_escape(s));
            out.push_str("</t></is></c>");
        }
        CellValue::Int(n) => out.push_str(&format!("><v>{n}</v></c>")),
        CellValue::Number(n) if n.is_finite() => out.push_str(&format!("><v>{n}</v></c>")),
        // NaN and infinities have no SpreadsheetML representation
        CellValue::Number(_) => out.push_str(" t=\"e\"><v>#NUM!</v></c>"),
        CellValue::Bool(b) => {
            let val = if *b { "1" } else { "0" };
            out.push_str(&format!(" t=\"b\"><v>{val}</v></c>"));
        }
    }
}
