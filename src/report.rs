//! Reports: a column forest plus optional header and body styles.

use std::fmt;

use log::debug;

use crate::column::{count_leaves, depth, Column};
use crate::error::{Region, ReportError, Result};
use crate::layout::{apply_range_style, render_headers, render_record};
use crate::style::{Style, StyleFn};
use crate::surface::{GridSurface, SheetId};

/// Style hooks for the two styled blocks of a report.
///
/// A missing hook still styles its block, with [`Style::default`].
#[derive(Default)]
pub struct Styles {
    pub header: Option<StyleFn>,
    pub body: Option<StyleFn>,
}

impl fmt::Debug for Styles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Styles")
            .field("header", &self.header.is_some())
            .field("body", &self.body.is_some())
            .finish()
    }
}

/// A tabular report over records of type `T`.
///
/// The report is immutable once built and can be rendered any number of
/// times, into any number of surfaces.
///
/// ```
/// use xlreport::{Column, MemoryWorkbook, Report};
///
/// struct Row {
///     name: &'static str,
///     age: u32,
/// }
///
/// let report = Report::new(vec![
///     Column::leaf("Name", |r: &Row| r.name),
///     Column::leaf("Age", |r: &Row| r.age),
/// ])
/// .with_header_style(|s| s.bold = Some(true));
///
/// let mut workbook = MemoryWorkbook::new();
/// let sheet = report
///     .render(&mut workbook, "People", &[Row { name: "X", age: 1 }])
///     .unwrap();
/// assert_eq!(workbook.sheet(sheet).unwrap().max_row(), 2);
/// ```
#[derive(Debug)]
pub struct Report<T> {
    columns: Vec<Column<T>>,
    styles: Styles,
}

impl<T> Report<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self::with_styles(columns, Styles::default())
    }

    pub fn with_styles(columns: Vec<Column<T>>, styles: Styles) -> Self {
        Self { columns, styles }
    }

    #[must_use]
    pub fn with_header_style(mut self, hook: impl Fn(&mut Style) + Send + Sync + 'static) -> Self {
        self.styles.header = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn with_body_style(mut self, hook: impl Fn(&mut Style) + Send + Sync + 'static) -> Self {
        self.styles.body = Some(Box::new(hook));
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Number of header rows.
    pub fn depth(&self) -> u32 {
        depth(&self.columns)
    }

    /// Number of data columns.
    pub fn leaf_count(&self) -> u32 {
        count_leaves(&self.columns)
    }

    /// Render into a new sheet named `sheet_name` and make it active.
    ///
    /// Headers fill rows `1..=depth`, record `i` fills row `depth + 1 + i`.
    /// The first failure aborts the render; the sheet may be partially
    /// written when that happens.
    ///
    /// # Errors
    /// Returns a [`ReportError`] naming the phase that failed (and the
    /// record index for data rows).
    pub fn render(
        &self,
        surface: &mut dyn GridSurface,
        sheet_name: &str,
        records: &[T],
    ) -> Result<SheetId> {
        let sheet = surface
            .create_sheet(sheet_name)
            .map_err(ReportError::Sheet)?;
        surface.set_active_sheet(sheet).map_err(ReportError::Sheet)?;

        let depth = self.depth();
        debug!(
            "rendering {sheet_name:?}: {} header rows, {} columns, {} records",
            depth,
            self.leaf_count(),
            records.len()
        );

        render_headers(surface, sheet, &self.columns, depth).map_err(ReportError::Header)?;
        apply_range_style(
            surface,
            sheet,
            &self.columns,
            self.styles.header.as_deref(),
            1,
            depth,
        )
        .map_err(|source| ReportError::Style {
            region: Region::Header,
            source,
        })?;

        let data_start = depth.saturating_add(1);
        let mut last_row = None;
        for (record_idx, record) in records.iter().enumerate() {
            let row = data_row(data_start, record_idx).ok_or(ReportError::RowOverflow {
                record: record_idx,
                depth,
            })?;
            render_record(surface, sheet, &self.columns, record, row).map_err(|source| {
                ReportError::Data {
                    record: record_idx,
                    source,
                }
            })?;
            last_row = Some(row);
        }

        if let Some(last_row) = last_row {
            apply_range_style(
                surface,
                sheet,
                &self.columns,
                self.styles.body.as_deref(),
                data_start,
                last_row,
            )
            .map_err(|source| ReportError::Style {
                region: Region::Body,
                source,
            })?;
        }

        debug!("rendered {sheet_name:?} as {sheet}");
        Ok(sheet)
    }
}

fn data_row(data_start: u32, record_idx: usize) -> Option<u32> {
    u32::try_from(record_idx)
        .ok()
        .and_then(|idx| data_start.checked_add(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_row() {
        assert_eq!(data_row(3, 0), Some(3));
        assert_eq!(data_row(3, 4), Some(7));
        assert_eq!(data_row(u32::MAX, 1), None);
    }

    #[test]
    fn test_builder_sets_hooks() {
        let report: Report<u32> = Report::new(vec![Column::leaf("N", |n: &u32| *n)])
            .with_body_style(|s| s.italic = Some(true));
        assert!(report.styles().header.is_none());
        assert!(report.styles().body.is_some());
        assert_eq!(report.leaf_count(), 1);
        assert_eq!(report.depth(), 1);
    }
}
