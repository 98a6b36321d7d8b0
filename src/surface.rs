//! The grid surface a report is rendered onto.
//!
//! The layout engine only ever talks to a `&mut dyn GridSurface`. Anything
//! that can hold named sheets of cells, merges and range styles can
//! implement it; [`MemoryWorkbook`](crate::workbook::MemoryWorkbook) is the
//! implementation shipped with this crate.

use std::fmt;

use serde::Serialize;

pub use crate::cell_ref::CellAddress;
use crate::error::SurfaceError;
use crate::style::Style;
use crate::value::CellValue;

/// Handle to a sheet created by [`GridSurface::create_sheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SheetId(pub usize);

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sheet #{}", self.0)
    }
}

/// Handle to a style registered by [`GridSurface::create_style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StyleId(pub u32);

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "style #{}", self.0)
    }
}

/// Sheet, cell, merge and style primitives the layout engine depends on.
///
/// Every call either completes or fails; the engine never retries. Callers
/// must not render into the same sheet from two places at once.
pub trait GridSurface {
    /// Validate 1-based coordinates and turn them into an address.
    fn coordinate_to_address(&self, col: u32, row: u32) -> Result<CellAddress, SurfaceError> {
        CellAddress::new(col, row)
    }

    fn set_cell_value(
        &mut self,
        sheet: SheetId,
        addr: &CellAddress,
        value: CellValue,
    ) -> Result<(), SurfaceError>;

    /// Merge the inclusive rectangle spanned by two corners.
    fn merge_cells(
        &mut self,
        sheet: SheetId,
        top_left: &CellAddress,
        bottom_right: &CellAddress,
    ) -> Result<(), SurfaceError>;

    fn create_style(&mut self, style: &Style) -> Result<StyleId, SurfaceError>;

    /// Apply a registered style to every cell of the inclusive rectangle.
    fn apply_style(
        &mut self,
        sheet: SheetId,
        top_left: &CellAddress,
        bottom_right: &CellAddress,
        style: StyleId,
    ) -> Result<(), SurfaceError>;

    fn create_sheet(&mut self, name: &str) -> Result<SheetId, SurfaceError>;

    fn set_active_sheet(&mut self, sheet: SheetId) -> Result<(), SurfaceError>;
}
