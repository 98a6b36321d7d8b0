//! Data projection: one row of cells per record.
//!
//! Each node's projector runs on whatever its parent produced, so a leaf
//! nested under `g` writes `a(g(record))`. Only leaves advance the cursor.

use log::trace;

use crate::column::{count_leaves, Column, ColumnKind};
use crate::error::SurfaceError;
use crate::surface::{GridSurface, SheetId};
use crate::value::CellValue;

/// Writes consecutive cells of one data row, left to right from column 1.
pub(crate) struct RowWriter<'s> {
    surface: &'s mut dyn GridSurface,
    sheet: SheetId,
    row: u32,
    cursor: u32,
}

impl<'s> RowWriter<'s> {
    fn new(surface: &'s mut dyn GridSurface, sheet: SheetId, row: u32) -> Self {
        Self {
            surface,
            sheet,
            row,
            cursor: 1,
        }
    }

    pub(crate) fn write(&mut self, value: CellValue) -> Result<(), SurfaceError> {
        let addr = self.surface.coordinate_to_address(self.cursor, self.row)?;
        trace!("data {addr} = {value:?}");
        self.surface.set_cell_value(self.sheet, &addr, value)?;
        self.cursor = self.cursor.saturating_add(1);
        Ok(())
    }
}

/// Write every leaf of `forest` for one input, in leaf order.
///
/// An absent `input` skips the projectors and writes empty cells.
pub(crate) fn write_forest<T>(
    forest: &[Column<T>],
    input: Option<&T>,
    row: &mut RowWriter<'_>,
) -> Result<(), SurfaceError> {
    for column in forest {
        match &column.kind {
            ColumnKind::Leaf(project) => {
                let value = input.map(|input| project(input)).unwrap_or_default();
                row.write(value)?;
            }
            // A group without children still owns one header column
            ColumnKind::Group(group) if group.child_count() == 0 => row.write(CellValue::Empty)?,
            ColumnKind::Group(group) => group.write(input, row)?,
        }
    }
    Ok(())
}

/// Write the data row for `record` at `row`.
///
/// Returns the number of cells written, which always equals
/// `count_leaves(forest)`.
pub fn render_record<T>(
    surface: &mut dyn GridSurface,
    sheet: SheetId,
    forest: &[Column<T>],
    record: &T,
    row: u32,
) -> Result<u32, SurfaceError> {
    let mut writer = RowWriter::new(surface, sheet, row);
    write_forest(forest, Some(record), &mut writer)?;
    let written = writer.cursor.saturating_sub(1);
    debug_assert_eq!(written, count_leaves(forest));
    Ok(written)
}
