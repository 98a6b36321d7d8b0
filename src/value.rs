//! Values written into grid cells.

use serde::Serialize;

/// A single cell value.
///
/// `Empty` is what an absent projection writes: a cell that exists (and can
/// carry a style) but holds nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for CellValue {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

macro_rules! int_cell_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                fn from(n: $t) -> Self {
                    Self::Int(i64::from(n))
                }
            }
        )*
    };
}

int_cell_value!(i8, i16, i32, i64, u8, u16, u32);

// Wider integers stay exact while they fit in an `Int`
macro_rules! wide_int_cell_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                #[allow(clippy::cast_precision_loss)]
                fn from(n: $t) -> Self {
                    i64::try_from(n).map_or(Self::Number(n as f64), Self::Int)
                }
            }
        )*
    };
}

wide_int_cell_value!(i128, isize, u64, u128, usize);

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map_or(Self::Empty, Into::into)
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(v: &serde_json::Value) -> Self {
        use serde_json::Value;

        match v {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Number))
                .unwrap_or(Self::Empty),
            Value::String(s) => Self::Text(s.clone()),
            // Nested structures land in a single cell as compact JSON
            Value::Array(_) | Value::Object(_) => Self::Text(v.to_string()),
        }
    }
}
