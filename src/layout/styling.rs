//! Range styling over the full width of a report.

use log::trace;

use crate::column::{count_leaves, HeaderNode};
use crate::error::SurfaceError;
use crate::style::Style;
use crate::surface::{GridSurface, SheetId, StyleId};

/// Style rows `start_row..=end_row` across every data column of `forest`.
///
/// The style starts from [`Style::default`] and is passed through `hook`
/// when one is given. Returns `None` without touching the surface when the
/// forest has no leaves.
pub fn apply_range_style<N: HeaderNode>(
    surface: &mut dyn GridSurface,
    sheet: SheetId,
    forest: &[N],
    hook: Option<&(dyn Fn(&mut Style) + Send + Sync)>,
    start_row: u32,
    end_row: u32,
) -> Result<Option<StyleId>, SurfaceError> {
    let leaf_count = count_leaves(forest);
    if leaf_count == 0 {
        return Ok(None);
    }

    let mut style = Style::default();
    if let Some(hook) = hook {
        hook(&mut style);
    }

    let style_id = surface.create_style(&style)?;
    let top_left = surface.coordinate_to_address(1, start_row)?;
    let bottom_right = surface.coordinate_to_address(leaf_count, end_row)?;
    trace!("style {top_left}:{bottom_right} with {style_id}");
    surface.apply_style(sheet, &top_left, &bottom_right, style_id)?;

    Ok(Some(style_id))
}
