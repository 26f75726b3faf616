//! Chart comparison.

use crate::aspects::calculator::AspectCalculator;
use crate::aspects::types::{Aspect, Harmony};
use crate::ephemeris::julian::{datetime_to_julian_day, julian_day_to_datetime};
use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::types::{BodyPosition, ChartPositions};
use crate::error::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score of an empty aspect set
pub const NEUTRAL_SCORE: f64 = 50.0;
const HARMONIOUS_WEIGHT: f64 = 5.0;
const CHALLENGING_WEIGHT: f64 = 3.0;

/// Fold inter-chart aspects into a 0-100 compatibility score.
///
/// Harmonious aspects raise the score, challenging ones lower it, each in
/// proportion to its strength; neutral aspects do not count.
pub fn compatibility_score(aspects: &[Aspect]) -> f64 {
    let score = aspects.iter().fold(NEUTRAL_SCORE, |score, aspect| {
        let strength = AspectCalculator::strength(aspect);
        match aspect.kind().harmony() {
            Harmony::Harmonious => score + HARMONIOUS_WEIGHT * strength,
            Harmony::Challenging => score - CHALLENGING_WEIGHT * strength,
            Harmony::Neutral => score,
        }
    });
    score.clamp(0.0, 100.0)
}

/// Aspects between two charts and their compatibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synastry {
    /// Body from the first chart always comes first
    pub aspects: Vec<Aspect>,
    pub score: f64,
}

impl Synastry {
    pub fn calculate(
        calculator: &AspectCalculator,
        chart_a: &[BodyPosition],
        chart_b: &[BodyPosition],
    ) -> Result<Self, EngineError> {
        let aspects = calculator.resolve_between(chart_a, chart_b)?;
        let score = compatibility_score(&aspects);
        log::debug!(
            "Synastry: {} aspects between {} and {} bodies, score {:.1}",
            aspects.len(),
            chart_a.len(),
            chart_b.len(),
            score
        );
        Ok(Self { aspects, score })
    }

    pub fn harmonious(&self) -> impl Iterator<Item = &Aspect> {
        self.by_harmony(Harmony::Harmonious)
    }

    pub fn challenging(&self) -> impl Iterator<Item = &Aspect> {
        self.by_harmony(Harmony::Challenging)
    }

    fn by_harmony(&self, harmony: Harmony) -> impl Iterator<Item = &Aspect> {
        self.aspects
            .iter()
            .filter(move |a| a.kind().harmony() == harmony)
    }
}

/// Time-midpoint composite of two charts.
///
/// The sky at the instant halfway between both birth times. Houses need a
/// location and are left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    pub instant: DateTime<Utc>,
    #[serde(rename = "julianDay")]
    pub julian_day: f64,
    pub chart: ChartPositions,
    pub aspects: Vec<Aspect>,
}

impl Composite {
    pub fn calculate<P: PositionProvider>(
        provider: &P,
        calculator: &AspectCalculator,
        first: DateTime<Utc>,
        second: DateTime<Utc>,
        bodies: &[&str],
    ) -> Result<Self, EngineError> {
        let julian_day = (datetime_to_julian_day(first) + datetime_to_julian_day(second)) / 2.0;
        let chart = provider.chart_at(bodies, julian_day)?;
        let aspects = calculator.resolve_all(&chart.bodies)?;
        Ok(Self {
            instant: julian_day_to_datetime(julian_day)?,
            julian_day,
            chart,
            aspects,
        })
    }
}
