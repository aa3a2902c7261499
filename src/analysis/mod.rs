pub mod color;
pub mod swing;

pub use color::{classify, CandleColor};
pub use swing::{annotate, extremes, swing_points, SwingKind, SwingPoint, SwingTags};
