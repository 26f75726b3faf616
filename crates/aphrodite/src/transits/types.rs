use crate::aspects::types::{AspectKind, AspectMotion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A transiting body in aspect to a natal body at some instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitEvent {
    #[serde(rename = "transitingBody")]
    pub transiting_body: String,
    #[serde(rename = "natalBody")]
    pub natal_body: String,
    #[serde(rename = "aspectType")]
    pub aspect_type: AspectKind,
    pub instant: DateTime<Utc>,
    /// Deviation from the exact angle at `instant`
    pub orb: f64,
    pub exact: bool,
    pub motion: AspectMotion,
}

/// Best sample found by the exact-time search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactTransit {
    pub instant: DateTime<Utc>,
    #[serde(rename = "julianDay")]
    pub julian_day: f64,
    /// Deviation from the exact angle at the best sample
    pub difference: f64,
    /// Number of position lookups that succeeded
    pub samples: usize,
}

/// How the coarse optimum is refined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefineStrategy {
    /// Fixed fine grid around the coarse optimum
    #[default]
    Grid,
    /// Bisect the earliest bracketed crossing, grid when none is bracketed
    Bisection,
}

/// Step sizes for the exact-time search, in days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(rename = "coarseStepDays")]
    pub coarse_step_days: f64,
    #[serde(rename = "refineStepDays")]
    pub refine_step_days: f64,
    /// Half-width of the refine window around the coarse optimum
    #[serde(rename = "refineWindowDays")]
    pub refine_window_days: f64,
    pub strategy: RefineStrategy,
    #[serde(rename = "bisectionToleranceDays")]
    pub bisection_tolerance_days: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            coarse_step_days: 1.0,
            refine_step_days: 1.0 / 24.0,
            refine_window_days: 1.0,
            strategy: RefineStrategy::Grid,
            // about one second
            bisection_tolerance_days: 1e-5,
        }
    }
}

/// Importance rating of a transit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitScore {
    pub transit: TransitEvent,
    /// 0-100
    pub strength: f64,
    /// Slow outer body transiting
    pub major: bool,
}
