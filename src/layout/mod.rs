//! The layout engine.
//!
//! Headers and data rows are derived from the same column tree with two
//! different walks:
//! - [`headers`]: positional. Spans come from leaf counts.
//! - [`data`]: value chaining. Each node projects its parent's output.
//! - [`styling`]: rectangles over the header and body blocks.
//!
//! Every walk owns its cursor, so concurrent renders into different
//! surfaces never interfere.

pub mod data;
pub mod headers;
pub mod styling;

pub use data::render_record;
pub use headers::render_headers;
pub use styling::apply_range_style;
