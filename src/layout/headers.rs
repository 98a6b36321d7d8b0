//! Header layout: titles, spans and merges for rows `1..=depth`.

use log::trace;

use crate::column::{header_children, HeaderNode};
use crate::error::SurfaceError;
use crate::surface::{GridSurface, SheetId};
use crate::value::CellValue;

/// Per-render header state. The cursor is the next free column.
struct HeaderLayout<'s> {
    surface: &'s mut dyn GridSurface,
    sheet: SheetId,
    depth: u32,
    cursor: u32,
}

impl HeaderLayout<'_> {
    fn render(&mut self, node: &dyn HeaderNode, row: u32) -> Result<(), SurfaceError> {
        let start = self.cursor;
        let addr = self.surface.coordinate_to_address(start, row)?;
        trace!("header {addr} = {:?}", node.title());
        self.surface
            .set_cell_value(self.sheet, &addr, CellValue::from(node.title()))?;

        if node.is_leaf() {
            // Leaves fill down through the remaining header rows
            if row < self.depth {
                self.merge(start, row, start, self.depth)?;
            }
            self.cursor = start.saturating_add(1);
        } else {
            let span = node.count_leaves();
            if span > 1 {
                self.merge(start, row, start.saturating_add(span - 1), row)?;
            }
            for child in header_children(node) {
                self.render(child, row.saturating_add(1))?;
            }
            self.cursor = start.saturating_add(span);
        }
        Ok(())
    }

    fn merge(&mut self, c1: u32, r1: u32, c2: u32, r2: u32) -> Result<(), SurfaceError> {
        let top_left = self.surface.coordinate_to_address(c1, r1)?;
        let bottom_right = self.surface.coordinate_to_address(c2, r2)?;
        trace!("merge {top_left}:{bottom_right}");
        self.surface.merge_cells(self.sheet, &top_left, &bottom_right)
    }
}

/// Lay out the header rows of `forest`, whose depth is `depth`.
///
/// Titles go at the top-left cell of their span. Groups merge across their
/// leaf count; leaves above the last header row merge down to it.
pub fn render_headers<N: HeaderNode>(
    surface: &mut dyn GridSurface,
    sheet: SheetId,
    forest: &[N],
    depth: u32,
) -> Result<(), SurfaceError> {
    let mut layout = HeaderLayout {
        surface,
        sheet,
        depth,
        cursor: 1,
    };
    for node in forest {
        layout.render(node, 1)?;
    }
    Ok(())
}
