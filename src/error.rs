//! Structured error types for xlreport.
//!
//! Grid surface failures are [`SurfaceError`]s. A render wraps them in a
//! [`ReportError`] that names the phase that failed.

use std::fmt;

use crate::surface::{SheetId, StyleId};

/// Failures reported by a [`GridSurface`](crate::surface::GridSurface).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// Column or row outside `1..=MAX_COLS` / `1..=MAX_ROWS`.
    #[error("Invalid coordinate: column {col}, row {row}")]
    InvalidCoordinate { col: u32, row: u32 },

    /// Sheet name rejected by the workbook naming rules.
    #[error("Invalid sheet name {name:?}: {reason}")]
    InvalidSheetName { name: String, reason: &'static str },

    /// A sheet with this name already exists.
    #[error("Sheet already exists: {0}")]
    DuplicateSheet(String),

    #[error("Unknown sheet: {0}")]
    UnknownSheet(SheetId),

    #[error("Unknown style: {0}")]
    UnknownStyle(StyleId),

    /// The requested merge intersects a merge already on the sheet.
    #[error("Merge {requested} overlaps existing merge {existing}")]
    OverlappingMerge { requested: String, existing: String },

    /// Catch-all for surface implementations outside this crate.
    #[error("{0}")]
    Other(String),
}

/// Which styled block of the report a styling failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Header,
    Body,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Body => f.write_str("body"),
        }
    }
}

/// All errors that can occur while building, rendering or exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Creating or activating the target sheet failed.
    #[error("Sheet setup failed: {0}")]
    Sheet(#[source] SurfaceError),

    /// Header layout failed.
    #[error("Header layout failed: {0}")]
    Header(#[source] SurfaceError),

    /// Writing the data row of one record failed.
    #[error("Data row for record {record} failed: {source}")]
    Data {
        record: usize,
        #[source]
        source: SurfaceError,
    },

    /// Registering or applying a range style failed.
    #[error("Styling the {region} block failed: {source}")]
    Style {
        region: Region,
        #[source]
        source: SurfaceError,
    },

    /// The record index does not fit in the sheet's row space.
    #[error("Record {record} does not fit below a {depth}-row header")]
    RowOverflow { record: usize, depth: u32 },

    /// A column definition was rejected while building the column tree.
    #[error("Invalid column {title:?}: {reason}")]
    InvalidColumn { title: String, reason: String },

    /// The workbook cannot be written as an XLSX package.
    #[error("Export error: {0}")]
    Export(String),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error from quick-xml.
    #[error("XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON report definition or record error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// The surface failure underneath a render error, if there is one.
    pub fn surface_error(&self) -> Option<&SurfaceError> {
        match self {
            Self::Sheet(e) | Self::Header(e) => Some(e),
            Self::Data { source, .. } | Self::Style { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;
