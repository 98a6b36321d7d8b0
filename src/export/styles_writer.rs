//! Generates `xl/styles.xml` from the workbook's registered styles.
//!
//! Each registered [`Style`] becomes one `<xf>` in `cellXfs`, at the same
//! index as its `StyleId`. Fonts, fills, borders and number formats are
//! de-duplicated into their own tables.

use crate::error::{ReportError, Result};
use crate::style::{Border, Style};

use super::xml_escape;

const DEFAULT_FONT_NAME: &str = "Calibri";
const DEFAULT_FONT_SIZE: f64 = 11.0;

/// First id available for custom number formats.
const FIRST_CUSTOM_NUM_FMT: u32 = 164;

#[derive(Debug, Clone, PartialEq)]
struct FontEntry {
    name: String,
    size: String,
    color: Option<String>,
    bold: bool,
    italic: bool,
    strike: bool,
    underline: Option<&'static str>,
}

impl FontEntry {
    fn default_font() -> Self {
        Self {
            name: DEFAULT_FONT_NAME.to_string(),
            size: DEFAULT_FONT_SIZE.to_string(),
            color: None,
            bold: false,
            italic: false,
            strike: false,
            underline: None,
        }
    }

    fn from_style(style: &Style) -> Result<Self> {
        Ok(Self {
            name: style
                .font_family
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_NAME.to_string()),
            size: style.font_size.unwrap_or(DEFAULT_FONT_SIZE).to_string(),
            color: style.font_color.as_deref().map(argb).transpose()?,
            bold: style.bold.unwrap_or(false),
            italic: style.italic.unwrap_or(false),
            strike: style.strikethrough.unwrap_or(false),
            underline: style.underline.map(|u| u.as_ooxml()),
        })
    }

    fn write(&self, out: &mut String) {
        out.push_str("<font>");
        if self.bold {
            out.push_str("<b/>");
        }
        if self.italic {
            out.push_str("<i/>");
        }
        if self.strike {
            out.push_str("<strike/>");
        }
        if let Some(u) = self.underline {
            out.push_str(&format!("<u val=\"{u}\"/>"));
        }
        out.push_str(&format!("<sz val=\"{}\"/>", self.size));
        if let Some(ref color) = self.color {
            out.push_str(&format!("<color rgb=\"{color}\"/>"));
        }
        out.push_str(&format!(
            "<name val=\"{}\"/><family val=\"2\"/></font>",
            xml_escape(&self.name)
        ));
    }
}

#[derive(Debug, Clone, PartialEq)]
struct EdgeEntry {
    style: &'static str,
    color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct BorderEntry {
    left: Option<EdgeEntry>,
    right: Option<EdgeEntry>,
    top: Option<EdgeEntry>,
    bottom: Option<EdgeEntry>,
}

impl BorderEntry {
    fn from_style(style: &Style) -> Result<Self> {
        let edge = |border: &Option<Border>| -> Result<Option<EdgeEntry>> {
            border
                .as_ref()
                .map(|b| {
                    Ok(EdgeEntry {
                        style: b.style.as_ooxml(),
                        color: b.color.as_deref().map(argb).transpose()?,
                    })
                })
                .transpose()
        };
        Ok(Self {
            left: edge(&style.border_left)?,
            right: edge(&style.border_right)?,
            top: edge(&style.border_top)?,
            bottom: edge(&style.border_bottom)?,
        })
    }

    fn write(&self, out: &mut String) {
        out.push_str("<border>");
        for (tag, edge) in [
            ("left", &self.left),
            ("right", &self.right),
            ("top", &self.top),
            ("bottom", &self.bottom),
        ] {
            match edge {
                Some(EdgeEntry { style, color }) => {
                    out.push_str(&format!("<{tag} style=\"{style}\">"));
                    match color {
                        Some(color) => out.push_str(&format!("<color rgb=\"{color}\"/>")),
                        None => out.push_str("<color auto=\"1\"/>"),
                    }
                    out.push_str(&format!("</{tag}>"));
                }
                None => out.push_str(&format!("<{tag}/>")),
            }
        }
        out.push_str("<diagonal/></border>");
    }
}

/// One `<xf>` record.
#[derive(Debug, Clone, PartialEq)]
struct XfEntry {
    num_fmt_id: u32,
    font_id: usize,
    fill_id: usize,
    border_id: usize,
    alignment: Option<String>,
}

impl XfEntry {
    fn write(&self, out: &mut String) {
        out.push_str(&format!(
            "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"",
            self.num_fmt_id, self.font_id, self.fill_id, self.border_id
        ));
        if self.num_fmt_id > 0 {
            out.push_str(" applyNumberFormat=\"1\"");
        }
        if self.font_id > 0 {
            out.push_str(" applyFont=\"1\"");
        }
        if self.fill_id > 0 {
            out.push_str(" applyFill=\"1\"");
        }
        if self.border_id > 0 {
            out.push_str(" applyBorder=\"1\"");
        }
        match self.alignment {
            Some(ref alignment) => {
                out.push_str(" applyAlignment=\"1\">");
                out.push_str(alignment);
                out.push_str("</xf>");
            }
            None => out.push_str("/>"),
        }
    }
}

/// Tables collected from the registered styles.
#[derive(Debug)]
struct StyleTables {
    num_fmts: Vec<(u32, String)>,
    fonts: Vec<FontEntry>,
    /// Solid fill colors; fills 0 and 1 are the mandatory `none`/`gray125`.
    fills: Vec<String>,
    borders: Vec<BorderEntry>,
    xfs: Vec<XfEntry>,
}

impl StyleTables {
    fn build(styles: &[Style]) -> Result<Self> {
        let mut tables = Self {
            num_fmts: Vec::new(),
            fonts: vec![FontEntry::default_font()],
            fills: Vec::new(),
            borders: vec![BorderEntry::default()],
            xfs: Vec::with_capacity(styles.len()),
        };

        for style in styles {
            let xf = tables.xf_for(style)?;
            tables.xfs.push(xf);
        }
        Ok(tables)
    }

    fn xf_for(&mut self, style: &Style) -> Result<XfEntry> {
        let font_id = if style.has_font() {
            intern(&mut self.fonts, FontEntry::from_style(style)?)
        } else {
            0
        };
        let fill_id = match style.bg_color.as_deref() {
            Some(color) => intern(&mut self.fills, argb(color)?) + 2,
            None => 0,
        };
        let border_id = if style.has_border() {
            intern(&mut self.borders, BorderEntry::from_style(style)?)
        } else {
            0
        };
        let num_fmt_id = match style.num_format.as_deref() {
            Some(code) => self.num_fmt_id(code)?,
            None => 0,
        };

        Ok(XfEntry {
            num_fmt_id,
            font_id,
            fill_id,
            border_id,
            alignment: alignment_xml(style),
        })
    }

    fn num_fmt_id(&mut self, code: &str) -> Result<u32> {
        if let Some(id) = builtin_num_fmt(code) {
            return Ok(id);
        }
        if let Some((id, _)) = self.num_fmts.iter().find(|(_, c)| c == code) {
            return Ok(*id);
        }
        let id = u32::try_from(self.num_fmts.len())
            .ok()
            .and_then(|n| FIRST_CUSTOM_NUM_FMT.checked_add(n))
            .ok_or_else(|| ReportError::Export("too many number formats".to_string()))?;
        self.num_fmts.push((id, code.to_string()));
        Ok(id)
    }

    fn write(&self) -> String {
        let mut out = String::with_capacity(2048);
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        out.push('\n');
        out.push_str(
            r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );
        out.push('\n');

        if !self.num_fmts.is_empty() {
            out.push_str(&format!("<numFmts count=\"{}\">", self.num_fmts.len()));
            for (id, code) in &self.num_fmts {
                out.push_str(&format!(
                    "<numFmt numFmtId=\"{id}\" formatCode=\"{}\"/>",
                    xml_escape(code)
                ));
            }
            out.push_str("</numFmts>\n");
        }

        out.push_str(&format!("<fonts count=\"{}\">", self.fonts.len()));
        for font in &self.fonts {
            font.write(&mut out);
        }
        out.push_str("</fonts>\n");

        out.push_str(&format!("<fills count=\"{}\">", self.fills.len() + 2));
        out.push_str("<fill><patternFill patternType=\"none\"/></fill>");
        out.push_str("<fill><patternFill patternType=\"gray125\"/></fill>");
        for color in &self.fills {
            out.push_str(&format!(
                "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{color}\"/><bgColor indexed=\"64\"/></patternFill></fill>"
            ));
        }
        out.push_str("</fills>\n");

        out.push_str(&format!("<borders count=\"{}\">", self.borders.len()));
        for border in &self.borders {
            border.write(&mut out);
        }
        out.push_str("</borders>\n");

        out.push_str("<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>\n");

        out.push_str(&format!("<cellXfs count=\"{}\">", self.xfs.len()));
        for xf in &self.xfs {
            xf.write(&mut out);
        }
        out.push_str("</cellXfs>\n");

        out.push_str("<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>\n");
        out.push_str("</styleSheet>");
        out
    }
}

/// Write `xl/styles.xml` for `styles`, where `styles[i]` is `StyleId(i)`.
///
/// # Errors
/// Returns [`ReportError::Export`] for malformed colors or too many formats.
pub(crate) fn write_styles_xml(styles: &[Style]) -> Result<String> {
    Ok(StyleTables::build(styles)?.write())
}

fn intern<K: PartialEq>(table: &mut Vec<K>, key: K) -> usize {
    match table.iter().position(|k| *k == key) {
        Some(idx) => idx,
        None => {
            table.push(key);
            table.len() - 1
        }
    }
}

/// `#RRGGBB` (or `RRGGBB`) to the opaque `FFRRGGBB` form SpreadsheetML uses.
fn argb(color: &str) -> Result<String> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(format!("FF{}", hex.to_ascii_uppercase()))
    } else {
        Err(ReportError::Export(format!("invalid color {color:?}")))
    }
}

fn builtin_num_fmt(code: &str) -> Option<u32> {
    match code {
        "General" => Some(0),
        "0" => Some(1),
        "0.00" => Some(2),
        "#,##0" => Some(3),
        "#,##0.00" => Some(4),
        "0%" => Some(9),
        "0.00%" => Some(10),
        "0.00E+00" => Some(11),
        "mm-dd-yy" => Some(14),
        "d-mmm-yy" => Some(15),
        "h:mm" => Some(20),
        "h:mm:ss" => Some(21),
        "@" => Some(49),
        _ => None,
    }
}

fn alignment_xml(style: &Style) -> Option<String> {
    if !style.has_alignment() {
        return None;
    }
    let mut out = String::from("<alignment");
    if let Some(h) = style.align_h {
        out.push_str(&format!(" horizontal=\"{}\"", h.as_ooxml()));
    }
    if let Some(v) = style.align_v {
        out.push_str(&format!(" vertical=\"{}\"", v.as_ooxml()));
    }
    if style.wrap == Some(true) {
        out.push_str(" wrapText=\"1\"");
    }
    out.push_str("/>");
    Some(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::style::{HAlign, VAlign};

    #[test]
    fn test_default_only() {
        let xml = write_styles_xml(&[Style::default()]).unwrap();
        assert!(xml.contains("<fonts count=\"1\">"));
        assert!(xml.contains("<fills count=\"2\">"));
        assert!(xml.contains("<borders count=\"1\">"));
        assert!(xml.contains(
            "<cellXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/></cellXfs>"
        ));
        assert!(!xml.contains("numFmts"));
    }

    #[test]
    fn test_header_style_tables() {
        let mut header = Style {
            bold: Some(true),
            bg_color: Some("#ddebf7".to_string()),
            align_h: Some(HAlign::Center),
            align_v: Some(VAlign::Center),
            num_format: Some("0.0".to_string()),
            ..Style::default()
        };
        header.set_border(&Border::thin());

        let xml = write_styles_xml(&[Style::default(), header.clone(), header]).unwrap();
        // Identical styles share their font, fill and border entries
        assert!(xml.contains("<fonts count=\"2\">"));
        assert!(xml.contains("<fills count=\"3\">"));
        assert!(xml.contains("<borders count=\"2\">"));
        assert!(xml.contains("<fgColor rgb=\"FFDDEBF7\"/>"));
        assert!(xml.contains("<numFmts count=\"1\"><numFmt numFmtId=\"164\" formatCode=\"0.0\"/></numFmts>"));
        assert!(xml.contains("<left style=\"thin\"><color auto=\"1\"/></left>"));
        assert!(xml.contains(
            "<xf numFmtId=\"164\" fontId=\"1\" fillId=\"2\" borderId=\"1\" xfId=\"0\" applyNumberFormat=\"1\" applyFont=\"1\" applyFill=\"1\" applyBorder=\"1\" applyAlignment=\"1\"><alignment horizontal=\"center\" vertical=\"center\"/></xf>"
        ));
        assert!(xml.contains("<cellXfs count=\"3\">"));
    }

    #[test]
    fn test_builtin_number_format() {
        let style = Style {
            num_format: Some("#,##0.00".to_string()),
            ..Style::default()
        };
        let xml = write_styles_xml(&[style]).unwrap();
        assert!(xml.contains("numFmtId=\"4\""));
        assert!(!xml.contains("<numFmts"));
    }

    #[test]
    fn test_invalid_color() {
        let style = Style {
            font_color: Some("red".to_string()),
            ..Style::default()
        };
        match write_styles_xml(&[style]) {
            Err(ReportError::Export(msg)) => assert!(msg.contains("red")),
            other => panic!("expected export error, got {other:?}"),
        }
    }

    #[test]
    fn test_argb() {
        assert_eq!(argb("#1f4e78").unwrap(), "FF1F4E78");
        assert_eq!(argb("FFFFFF").unwrap(), "FFFFFFFF");
        assert!(argb("#12345").is_err());
    }
}
