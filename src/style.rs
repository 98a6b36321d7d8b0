//! Cell styles applied to the header and body blocks of a report.

use serde::{Deserialize, Serialize};

/// A cell style. Unset fields fall back to the workbook defaults.
///
/// Colors are `#RRGGBB` strings.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    // Font
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<UnderlineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,

    // Fill (solid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,

    // Borders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<Border>,

    // Alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_h: Option<HAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_v: Option<VAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,

    /// Number format code, e.g. `"#,##0.00"` or `"yyyy-mm-dd"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_format: Option<String>,
}

impl Style {
    /// Set the same border on all four edges.
    pub fn set_border(&mut self, border: &Border) {
        self.border_top = Some(border.clone());
        self.border_right = Some(border.clone());
        self.border_bottom = Some(border.clone());
        self.border_left = Some(border.clone());
    }

    pub fn has_font(&self) -> bool {
        self.font_family.is_some()
            || self.font_size.is_some()
            || self.font_color.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.underline.is_some()
            || self.strikethrough.is_some()
    }

    pub fn has_border(&self) -> bool {
        self.border_top.is_some()
            || self.border_right.is_some()
            || self.border_bottom.is_some()
            || self.border_left.is_some()
    }

    pub fn has_alignment(&self) -> bool {
        self.align_h.is_some() || self.align_v.is_some() || self.wrap.is_some()
    }
}

/// A hook that customizes a default [`Style`] before it is registered.
pub type StyleFn = Box<dyn Fn(&mut Style) + Send + Sync>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Border {
    pub style: BorderStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Border {
    pub fn thin() -> Self {
        Self {
            style: BorderStyle::Thin,
            color: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
    #[default]
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
}

impl BorderStyle {
    /// SpreadsheetML `style` attribute value.
    pub fn as_ooxml(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Thin => "thin",
            Self::Medium => "medium",
            Self::Thick => "thick",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Double => "double",
            Self::Hair => "hair",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterContinuous,
    Distributed,
}

impl HAlign {
    pub fn as_ooxml(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Fill => "fill",
            Self::Justify => "justify",
            Self::CenterContinuous => "centerContinuous",
            Self::Distributed => "distributed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    Top,
    Center, // Excel uses "center" not "middle"
    Bottom,
    Justify,
    Distributed,
}

impl VAlign {
    pub fn as_ooxml(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
            Self::Justify => "justify",
            Self::Distributed => "distributed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UnderlineStyle {
    Single,
    Double,
}

impl UnderlineStyle {
    pub fn as_ooxml(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_blank() {
        let style = Style::default();
        assert!(!style.has_font());
        assert!(!style.has_border());
        assert!(!style.has_alignment());
        assert_eq!(serde_json::to_string(&style).unwrap(), "{}");
    }

    #[test]
    fn test_set_border_covers_all_edges() {
        let mut style = Style::default();
        style.set_border(&Border::thin());
        assert!(style.has_border());
        assert_eq!(style.border_left, Some(Border::thin()));
        assert_eq!(style.border_bottom, Some(Border::thin()));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let style: Style =
            serde_json::from_str(r##"{"bold":true,"bgColor":"#DDEBF7","alignH":"center"}"##)
                .unwrap();
        assert_eq!(style.bold, Some(true));
        assert_eq!(style.bg_color.as_deref(), Some("#DDEBF7"));
        assert_eq!(style.align_h, Some(HAlign::Center));
    }
}
