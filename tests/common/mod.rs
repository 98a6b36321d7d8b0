//! Common test utilities and assertion helpers.
//!
//! Provides a surface that fails on demand and helpers for inspecting a
//! rendered `MemoryWorkbook`.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use xlreport::workbook::{MergeRange, Sheet};
use xlreport::{
    CellAddress, CellValue, GridSurface, MemoryWorkbook, SheetId, Style, StyleId, SurfaceError,
};

// ============================================================================
// Failing surface
// ============================================================================

/// Which call a [`FailingSurface`] should reject.
#[derive(Debug, Clone, PartialEq)]
pub enum FailOn {
    CreateSheet,
    SetActiveSheet,
    /// Writing to this cell, e.g. `"B3"`.
    SetCell(String),
    Merge,
    /// The n-th `create_style` call, counting from 1.
    CreateStyle(usize),
    ApplyStyle,
}

/// Delegates to a `MemoryWorkbook` except for one kind of call.
#[derive(Debug)]
pub struct FailingSurface {
    pub inner: MemoryWorkbook,
    fail_on: FailOn,
    style_calls: usize,
}

impl FailingSurface {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            inner: MemoryWorkbook::new(),
            fail_on,
            style_calls: 0,
        }
    }

    fn injected() -> SurfaceError {
        SurfaceError::Other("injected failure".to_string())
    }
}

impl GridSurface for FailingSurface {
    fn set_cell_value(
        &mut self,
        sheet: SheetId,
        addr: &CellAddress,
        value: CellValue,
    ) -> Result<(), SurfaceError> {
        if self.fail_on == FailOn::SetCell(addr.to_string()) {
            return Err(Self::injected());
        }
        self.inner.set_cell_value(sheet, addr, value)
    }

    fn merge_cells(
        &mut self,
        sheet: SheetId,
        top_left: &CellAddress,
        bottom_right: &CellAddress,
    ) -> Result<(), SurfaceError> {
        if self.fail_on == FailOn::Merge {
            return Err(Self::injected());
        }
        self.inner.merge_cells(sheet, top_left, bottom_right)
    }

    fn create_style(&mut self, style: &Style) -> Result<StyleId, SurfaceError> {
        self.style_calls += 1;
        if self.fail_on == FailOn::CreateStyle(self.style_calls) {
            return Err(Self::injected());
        }
        self.inner.create_style(style)
    }

    fn apply_style(
        &mut self,
        sheet: SheetId,
        top_left: &CellAddress,
        bottom_right: &CellAddress,
        style: StyleId,
    ) -> Result<(), SurfaceError> {
        if self.fail_on == FailOn::ApplyStyle {
            return Err(Self::injected());
        }
        self.inner.apply_style(sheet, top_left, bottom_right, style)
    }

    fn create_sheet(&mut self, name: &str) -> Result<SheetId, SurfaceError> {
        if self.fail_on == FailOn::CreateSheet {
            return Err(Self::injected());
        }
        self.inner.create_sheet(name)
    }

    fn set_active_sheet(&mut self, sheet: SheetId) -> Result<(), SurfaceError> {
        if self.fail_on == FailOn::SetActiveSheet {
            return Err(Self::injected());
        }
        self.inner.set_active_sheet(sheet)
    }
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Create a workbook holding one sheet named `"S"`.
pub fn workbook_with_sheet() -> (MemoryWorkbook, SheetId) {
    let mut wb = MemoryWorkbook::new();
    let sheet = wb.create_sheet("S").unwrap();
    (wb, sheet)
}

pub fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

pub fn assert_cell_value(sheet: &Sheet, cell_ref: &str, expected: &CellValue) {
    let (col, row) = xlreport::cell_ref::parse_cell_ref(cell_ref).unwrap();
    assert_eq!(
        sheet.value(col, row),
        Some(expected),
        "unexpected value at {cell_ref}"
    );
}

/// Merge ranges of a sheet as `A1:B2` references, in creation order.
pub fn merge_refs(sheet: &Sheet) -> Vec<String> {
    sheet.merges().iter().map(MergeRange::to_ref).collect()
}

pub fn assert_merge_exists(sheet: &Sheet, range: &str) {
    let refs = merge_refs(sheet);
    assert!(
        refs.iter().any(|r| r == range),
        "merge {range} not found in {refs:?}"
    );
}
