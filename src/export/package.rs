//! Assembles the XLSX ZIP package.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ReportError, Result};
use crate::workbook::MemoryWorkbook;

use super::sheet_writer::write_sheet_xml;
use super::styles_writer::write_styles_xml;
use super::xml_escape;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

/// Write every part of the package and return the archive bytes.
pub(crate) fn write_package(workbook: &MemoryWorkbook) -> Result<Vec<u8>> {
    let sheets = workbook.sheets();
    if sheets.is_empty() {
        return Err(ReportError::Export("workbook has no sheets".to_string()));
    }
    let active = workbook.active_sheet().map_or(0, |id| id.0);

    // Build the stylesheet first so a bad color fails before any I/O
    let styles_xml = write_styles_xml(workbook.styles())?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    add_part(&mut writer, options, "[Content_Types].xml", &content_types_xml(sheets.len()))?;
    add_part(&mut writer, options, "_rels/.rels", RELS_XML)?;
    add_part(&mut writer, options, "xl/workbook.xml", &workbook_xml(workbook, active))?;
    add_part(
        &mut writer,
        options,
        "xl/_rels/workbook.xml.rels",
        &workbook_rels_xml(sheets.len()),
    )?;
    add_part(&mut writer, options, "xl/styles.xml", &styles_xml)?;

    for (idx, sheet) in sheets.iter().enumerate() {
        let path = format!("xl/worksheets/sheet{}.xml", idx + 1);
        add_part(&mut writer, options, &path, &write_sheet_xml(sheet, idx == active))?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

fn add_part(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
    path: &str,
    xml: &str,
) -> Result<()> {
    writer.start_file(path, options)?;
    writer.write_all(xml.as_bytes())?;
    Ok(())
}

fn content_types_xml(sheet_count: usize) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    );
    for i in 1..=sheet_count {
        out.push_str(&format!(
            "\n<Override PartName=\"/xl/worksheets/sheet{i}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>"
        ));
    }
    out.push_str("\n</Types>");
    out
}

fn workbook_xml(workbook: &MemoryWorkbook, active: usize) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    out.push_str(&format!(
        "\n<bookViews><workbookView activeTab=\"{active}\"/></bookViews>\n<sheets>"
    ));
    for (idx, sheet) in workbook.sheets().iter().enumerate() {
        out.push_str(&format!(
            "\n<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
            xml_escape(&sheet.name),
            idx + 1,
            idx + 1
        ));
    }
    out.push_str("\n</sheets>\n</workbook>");
    out
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for i in 1..=sheet_count {
        out.push_str(&format!(
            "\n<Relationship Id=\"rId{i}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{i}.xml\"/>"
        ));
    }
    out.push_str(&format!(
        "\n<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
        sheet_count + 1
    ));
    out.push_str("\n</Relationships>");
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_workbook_is_rejected() {
        match write_package(&MemoryWorkbook::new()) {
            Err(ReportError::Export(msg)) => assert_eq!(msg, "workbook has no sheets"),
            other => panic!("expected export error, got {other:?}"),
        }
    }

    #[test]
    fn test_workbook_rels_point_at_styles_last() {
        let rels = workbook_rels_xml(2);
        assert!(rels.contains("Id=\"rId2\""));
        assert!(rels.contains("Target=\"worksheets/sheet2.xml\""));
        assert!(rels.contains("Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\""));
    }

    #[test]
    fn test_content_types_list_every_sheet() {
        let types = content_types_xml(3);
        assert!(types.contains("/xl/worksheets/sheet3.xml"));
        assert!(!types.contains("/xl/worksheets/sheet4.xml"));
        assert!(types.contains("/xl/styles.xml"));
    }
}
