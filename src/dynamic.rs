//! Report definitions loaded from JSON, over `serde_json::Value` records.
//!
//! A [`ColumnSpec`] names a title and an optional JSON pointer that selects
//! this column's value out of its parent's value:
//!
//! ```json
//! {
//!   "sheet": "Orders",
//!   "headerStyle": { "bold": true },
//!   "columns": [
//!     { "title": "Id", "path": "/id" },
//!     { "title": "Customer", "path": "/customer", "children": [
//!       { "title": "Name", "path": "/name" },
//!       { "title": "City", "path": "/address/city" }
//!     ]}
//!   ]
//! }
//! ```
//!
//! Definitions are checked when the column tree is built. A `null` or
//! missing group value is treated as absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::Column;
use crate::error::{ReportError, Result};
use crate::report::{Report, Styles};
use crate::style::Style;
use crate::value::CellValue;

/// One column of a JSON report definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub title: String,
    /// JSON pointer relative to the parent's value; `None` passes it through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ColumnSpec>,
}

impl ColumnSpec {
    /// Build the typed column tree for this definition.
    ///
    /// # Errors
    /// Returns [`ReportError::InvalidColumn`] for a malformed pointer
    /// anywhere in the subtree.
    pub fn build(&self) -> Result<Column<Value>> {
        let path = self.path.clone().unwrap_or_default();
        validate_pointer(&self.title, &path)?;

        if self.children.is_empty() {
            return Ok(Column::leaf(self.title.clone(), move |input: &Value| {
                select(input, &path).map_or(CellValue::Empty, CellValue::from)
            }));
        }

        let children = self
            .children
            .iter()
            .map(ColumnSpec::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(Column::group_ref(
            self.title.clone(),
            move |input: &Value| select(input, &path).filter(|v| !v.is_null()),
            children,
        ))
    }
}

/// A complete JSON report definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSpec {
    #[serde(default = "default_sheet_name")]
    pub sheet: String,
    pub columns: Vec<ColumnSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_style: Option<Style>,
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

impl ReportSpec {
    /// Parse a definition from JSON text.
    ///
    /// # Errors
    /// Returns [`ReportError::Json`] for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the report. Fixed styles become hooks that replace the default.
    ///
    /// # Errors
    /// Returns [`ReportError::InvalidColumn`] for a malformed column.
    pub fn build(&self) -> Result<Report<Value>> {
        let columns = self
            .columns
            .iter()
            .map(ColumnSpec::build)
            .collect::<Result<Vec<_>>>()?;
        let styles = Styles {
            header: self.header_style.clone().map(fixed_style),
            body: self.body_style.clone().map(fixed_style),
        };
        Ok(Report::with_styles(columns, styles))
    }
}

fn fixed_style(style: Style) -> crate::style::StyleFn {
    Box::new(move |target: &mut Style| *target = style.clone())
}

fn select<'a>(input: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        Some(input)
    } else {
        input.pointer(path)
    }
}

/// RFC 6901: empty, or `/`-prefixed with `~` only in `~0` / `~1`.
fn validate_pointer(title: &str, path: &str) -> Result<()> {
    let invalid = |reason: &str| ReportError::InvalidColumn {
        title: title.to_string(),
        reason: format!("{reason}: {path:?}"),
    };

    if path.is_empty() {
        return Ok(());
    }
    if !path.starts_with('/') {
        return Err(invalid("JSON pointer must start with '/'"));
    }
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        if c == '~' && !matches!(chars.next(), Some('0' | '1')) {
            return Err(invalid("'~' must be followed by '0' or '1'"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::column::{count_leaves, depth, HeaderNode};

    #[test]
    fn test_validate_pointer() {
        assert!(validate_pointer("t", "").is_ok());
        assert!(validate_pointer("t", "/a/b~1c/~0").is_ok());
        assert!(validate_pointer("t", "a/b").is_err());
        assert!(validate_pointer("t", "/a~2").is_err());
        assert!(validate_pointer("t", "/a~").is_err());
    }

    #[test]
    fn test_build_tree_shape() {
        let spec = ColumnSpec {
            title: "Customer".to_string(),
            path: Some("/customer".to_string()),
            children: vec![
                ColumnSpec {
                    title: "Name".to_string(),
                    path: Some("/name".to_string()),
                    children: Vec::new(),
                },
                ColumnSpec {
                    title: "City".to_string(),
                    path: Some("/address/city".to_string()),
                    children: Vec::new(),
                },
            ],
        };
        let column = spec.build().unwrap();
        assert_eq!(column.title(), "Customer");
        assert_eq!(column.count_leaves(), 2);
        assert_eq!(depth(&[column]), 2);
    }

    #[test]
    fn test_bad_nested_pointer_fails_at_build() {
        let json = r#"{"columns": [{"title": "G", "children": [{"title": "Bad", "path": "nope"}]}]}"#;
        let spec = ReportSpec::from_json(json).unwrap();
        assert_eq!(spec.sheet, "Sheet1");
        match spec.build() {
            Err(ReportError::InvalidColumn { title, .. }) => assert_eq!(title, "Bad"),
            other => panic!("expected invalid column, got {other:?}"),
        }
    }

    #[test]
    fn test_report_spec_styles_become_hooks() {
        let json = r#"{"sheet": "S", "columns": [{"title": "A"}], "bodyStyle": {"italic": true}}"#;
        let report = ReportSpec::from_json(json).unwrap().build().unwrap();
        assert_eq!(count_leaves(report.columns()), 1);
        assert!(report.styles().header.is_none());

        let hook = report.styles().body.as_ref().unwrap();
        let mut style = Style::default();
        hook(&mut style);
        assert_eq!(style.italic, Some(true));
    }
}
