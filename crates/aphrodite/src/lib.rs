//! Aspect, pattern and timing engine.
//!
//! Resolves angular aspects between bodies, finds multi-body patterns among
//! them, searches time for exact transits and maps dates through
//! progressions and solar-arc directions. Positions come from a caller
//! supplied [`PositionProvider`]; the engine itself does no astronomy.

pub mod angle;
pub mod aspects;
pub mod balance;
pub mod ephemeris;
pub mod error;
pub mod progressions;
pub mod synastry;
pub mod transits;

pub use aspects::{
    Aspect, AspectCalculator, AspectCatalog, AspectKind, AspectMotion, AspectTypeConfig,
    ChartShape, Harmony, Pattern, PatternDetector, PatternKind,
};
pub use balance::{element_balance, modality_balance, ElementBalance, ModalityBalance};
pub use ephemeris::{
    datetime_to_julian_day, julian_day_to_datetime, BodyPosition, ChartPositions,
    HousePositions, PositionProvider,
};
pub use error::{EngineError, ProviderError};
pub use progressions::{DirectedChart, ProgressionKind, ProgressionMapper};
pub use synastry::{compatibility_score, Composite, Synastry};
pub use transits::{
    ExactTransit, RefineStrategy, SearchSettings, TransitEvent, TransitScore, TransitSearcher,
};
