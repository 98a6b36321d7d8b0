//! XLSX export pipeline.
//!
//! Serializes a [`MemoryWorkbook`] into a minimal SpreadsheetML package:
//! workbook, one worksheet per sheet, and a stylesheet built from the
//! registered styles.

pub(crate) mod package;
pub(crate) mod sheet_writer;
pub(crate) mod styles_writer;

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::workbook::MemoryWorkbook;

impl MemoryWorkbook {
    /// Serialize the workbook to XLSX bytes.
    ///
    /// # Errors
    /// Fails when the workbook has no sheets, a style holds a malformed
    /// color, or the ZIP archive cannot be written.
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        let bytes = package::write_package(self)?;
        debug!(
            "exported {} sheet(s), {} style(s), {} bytes",
            self.sheets().len(),
            self.styles().len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Serialize the workbook and write it to `path`.
    ///
    /// # Errors
    /// See [`MemoryWorkbook::to_xlsx`]; I/O failures are returned as well.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_xlsx()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// XML escaping for attribute/text content.
pub(crate) fn xml_escape(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}
