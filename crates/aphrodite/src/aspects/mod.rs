pub mod calculator;
pub mod catalog;
pub mod patterns;
pub mod types;

pub use calculator::{aspect_motion, aspects_for_body, AspectCalculator};
pub use catalog::AspectCatalog;
pub use patterns::{chart_shape, ChartShape, Pattern, PatternDetector, PatternKind};
pub use types::{Aspect, AspectKind, AspectMotion, AspectTypeConfig, Harmony};
