//! An in-memory workbook implementing [`GridSurface`].
//!
//! Cells are stored sparsely per sheet. Every successful mutation is also
//! appended to an operation log, which makes two renders easy to compare and
//! can be dumped as JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cell_ref::{col_to_letter, CellAddress};
use crate::error::SurfaceError;
use crate::style::Style;
use crate::surface::{GridSurface, SheetId, StyleId};
use crate::value::CellValue;

/// Maximum length of a sheet name (Excel limit).
pub const MAX_SHEET_NAME_LEN: usize = 31;

const INVALID_SHEET_NAME_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// One recorded surface mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum SurfaceOp {
    CreateSheet { sheet: SheetId, name: String },
    SetActiveSheet { sheet: SheetId },
    SetCellValue { sheet: SheetId, cell: String, value: CellValue },
    MergeCells { sheet: SheetId, range: String },
    CreateStyle { style: StyleId, spec: Style },
    ApplyStyle { sheet: SheetId, range: String, style: StyleId },
}

/// Inclusive, 1-based rectangle of merged cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRange {
    pub start_col: u32,
    pub start_row: u32,
    pub end_col: u32,
    pub end_row: u32,
}

impl MergeRange {
    /// Build from two corners given in any order.
    pub fn from_corners(a: &CellAddress, b: &CellAddress) -> Self {
        Self {
            start_col: a.col().min(b.col()),
            start_row: a.row().min(b.row()),
            end_col: a.col().max(b.col()),
            end_row: a.row().max(b.row()),
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.start_col <= other.end_col
            && other.start_col <= self.end_col
            && self.start_row <= other.end_row
            && other.start_row <= self.end_row
    }

    /// Range reference such as `"A1:C1"`.
    pub fn to_ref(&self) -> String {
        format!(
            "{}{}:{}{}",
            col_to_letter(self.start_col),
            self.start_row,
            col_to_letter(self.end_col),
            self.end_row
        )
    }
}

/// A stored cell: its value and the style applied to it, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CellData {
    pub value: CellValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleId>,
}

/// A single worksheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub name: String,
    /// Sparse cells keyed by `(row, col)` so iteration is row-major.
    #[serde(skip)]
    cells: BTreeMap<(u32, u32), CellData>,
    merges: Vec<MergeRange>,
}

impl Sheet {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: BTreeMap::new(),
            merges: Vec::new(),
        }
    }

    pub fn cell(&self, col: u32, row: u32) -> Option<&CellData> {
        self.cells.get(&(row, col))
    }

    pub fn value(&self, col: u32, row: u32) -> Option<&CellValue> {
        self.cell(col, row).map(|c| &c.value)
    }

    pub fn style_at(&self, col: u32, row: u32) -> Option<StyleId> {
        self.cell(col, row).and_then(|c| c.style)
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    /// Cells in row-major order as `(col, row, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &CellData)> {
        self.cells.iter().map(|(&(row, col), cell)| (col, row, cell))
    }

    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|&(row, _)| row).max().unwrap_or(0)
    }

    pub fn max_col(&self) -> u32 {
        self.cells.keys().map(|&(_, col)| col).max().unwrap_or(0)
    }

    /// Values of columns `1..=max_col` in `row`; missing cells are `Empty`.
    pub fn row_values(&self, row: u32) -> Vec<CellValue> {
        (1..=self.max_col())
            .map(|col| self.value(col, row).cloned().unwrap_or_default())
            .collect()
    }

    fn cell_mut(&mut self, addr: &CellAddress) -> &mut CellData {
        self.cells.entry((addr.row(), addr.col())).or_default()
    }
}

/// Workbook held entirely in memory.
///
/// Style `StyleId(0)` is the built-in default style and is always present.
#[derive(Debug, Clone)]
pub struct MemoryWorkbook {
    sheets: Vec<Sheet>,
    styles: Vec<Style>,
    active_sheet: Option<SheetId>,
    ops: Vec<SurfaceOp>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self {
            sheets: Vec::new(),
            styles: vec![Style::default()],
            active_sheet: None,
            ops: Vec::new(),
        }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, id: SheetId) -> Option<&Sheet> {
        self.sheets.get(id.0)
    }

    /// Look up a sheet by name, ignoring case as spreadsheet applications do.
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        let wanted = name.to_lowercase();
        self.sheets.iter().find(|s| s.name.to_lowercase() == wanted)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn active_sheet(&self) -> Option<SheetId> {
        self.active_sheet
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    pub fn style(&self, id: StyleId) -> Option<&Style> {
        usize::try_from(id.0).ok().and_then(|idx| self.styles.get(idx))
    }

    /// Every successful mutation so far, in call order.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    fn sheet_mut(&mut self, id: SheetId) -> Result<&mut Sheet, SurfaceError> {
        self.sheets
            .get_mut(id.0)
            .ok_or(SurfaceError::UnknownSheet(id))
    }
}

impl Default for MemoryWorkbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a sheet name against the workbook naming rules.
///
/// # Errors
/// Returns [`SurfaceError::InvalidSheetName`] describing the violated rule.
pub fn validate_sheet_name(name: &str) -> Result<(), SurfaceError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.chars().count() > MAX_SHEET_NAME_LEN {
        Some("name exceeds 31 characters")
    } else if name.contains(INVALID_SHEET_NAME_CHARS) {
        Some("name contains one of : \\ / ? * [ ]")
    } else if name.starts_with('\'') || name.ends_with('\'') {
        Some("name begins or ends with an apostrophe")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SurfaceError::InvalidSheetName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

impl GridSurface for MemoryWorkbook {
    fn set_cell_value(
        &mut self,
        sheet: SheetId,
        addr: &CellAddress,
        value: CellValue,
    ) -> Result<(), SurfaceError> {
        self.sheet_mut(sheet)?.cell_mut(addr).value = value.clone();
        self.ops.push(SurfaceOp::SetCellValue {
            sheet,
            cell: addr.to_string(),
            value,
        });
        Ok(())
    }

    fn merge_cells(
        &mut self,
        sheet: SheetId,
        top_left: &CellAddress,
        bottom_right: &CellAddress,
    ) -> Result<(), SurfaceError> {
        let range = MergeRange::from_corners(top_left, bottom_right);
        let target = self.sheet_mut(sheet)?;
        if let Some(existing) = target.merges.iter().find(|m| m.intersects(&range)) {
            return Err(SurfaceError::OverlappingMerge {
                requested: range.to_ref(),
                existing: existing.to_ref(),
            });
        }
        target.merges.push(range);
        self.ops.push(SurfaceOp::MergeCells {
            sheet,
            range: range.to_ref(),
        });
        Ok(())
    }

    fn create_style(&mut self, style: &Style) -> Result<StyleId, SurfaceError> {
        let id = u32::try_from(self.styles.len())
            .map(StyleId)
            .map_err(|_| SurfaceError::Other("style table is full".to_string()))?;
        self.styles.push(style.clone());
        self.ops.push(SurfaceOp::CreateStyle {
            style: id,
            spec: style.clone(),
        });
        Ok(id)
    }

    fn apply_style(
        &mut self,
        sheet: SheetId,
        top_left: &CellAddress,
        bottom_right: &CellAddress,
        style: StyleId,
    ) -> Result<(), SurfaceError> {
        if self.style(style).is_none() {
            return Err(SurfaceError::UnknownStyle(style));
        }
        let range = MergeRange::from_corners(top_left, bottom_right);
        let target = self.sheet_mut(sheet)?;
        for row in range.start_row..=range.end_row {
            for col in range.start_col..=range.end_col {
                target.cells.entry((row, col)).or_default().style = Some(style);
            }
        }
        self.ops.push(SurfaceOp::ApplyStyle {
            sheet,
            range: range.to_ref(),
            style,
        });
        Ok(())
    }

    fn create_sheet(&mut self, name: &str) -> Result<SheetId, SurfaceError> {
        validate_sheet_name(name)?;
        if self.sheet_by_name(name).is_some() {
            return Err(SurfaceError::DuplicateSheet(name.to_string()));
        }
        let id = SheetId(self.sheets.len());
        self.sheets.push(Sheet::new(name));
        if self.active_sheet.is_none() {
            self.active_sheet = Some(id);
        }
        self.ops.push(SurfaceOp::CreateSheet {
            sheet: id,
            name: name.to_string(),
        });
        Ok(id)
    }

    fn set_active_sheet(&mut self, sheet: SheetId) -> Result<(), SurfaceError> {
        self.sheet_mut(sheet)?;
        self.active_sheet = Some(sheet);
        self.ops.push(SurfaceOp::SetActiveSheet { sheet });
        Ok(())
    }
}
