//! xlreport - nested-column reports for spreadsheets
//!
//! Renders a tree of column definitions into a grid:
//! - Multi-row headers, with group titles merged across their columns and
//!   leaf titles merged down to the last header row
//! - One data row per record, each nested column projecting from its
//!   parent's value rather than from the record
//! - Uniform styles over the header and body blocks
//! - An in-memory workbook surface with XLSX export
//!
//! # Usage
//!
//! ```
//! use xlreport::{Column, MemoryWorkbook, Report};
//!
//! struct Order {
//!     id: u32,
//!     customer: Customer,
//! }
//!
//! struct Customer {
//!     name: String,
//!     city: String,
//! }
//!
//! let report = Report::new(vec![
//!     Column::leaf("Id", |o: &Order| o.id),
//!     Column::group_ref(
//!         "Customer",
//!         |o: &Order| Some(&o.customer),
//!         vec![
//!             Column::leaf("Name", |c: &Customer| c.name.clone()),
//!             Column::leaf("City", |c: &Customer| c.city.clone()),
//!         ],
//!     ),
//! ])
//! .with_header_style(|s| s.bold = Some(true));
//!
//! let orders = vec![Order {
//!     id: 7,
//!     customer: Customer { name: "Ada".into(), city: "London".into() },
//! }];
//!
//! let mut workbook = MemoryWorkbook::new();
//! report.render(&mut workbook, "Orders", &orders)?;
//! let xlsx: Vec<u8> = workbook.to_xlsx()?;
//! # assert!(!xlsx.is_empty());
//! # Ok::<(), xlreport::ReportError>(())
//! ```

pub mod cell_ref;
pub mod column;
pub mod dynamic;
pub mod error;
mod export;
pub mod layout;
pub mod report;
pub mod style;
pub mod surface;
pub mod value;
pub mod workbook;

pub use column::{Column, HeaderNode};
pub use dynamic::{ColumnSpec, ReportSpec};
pub use error::{Region, ReportError, Result, SurfaceError};
pub use report::{Report, Styles};
pub use style::{Border, BorderStyle, HAlign, Style, StyleFn, UnderlineStyle, VAlign};
pub use surface::{CellAddress, GridSurface, SheetId, StyleId};
pub use value::CellValue;
pub use workbook::{MemoryWorkbook, SurfaceOp};

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
