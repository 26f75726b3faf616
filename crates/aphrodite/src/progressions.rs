//! Symbolic time mappings: progressions and solar-arc directions.
//!
//! The mapping itself is arithmetic on Julian days; positions at the mapped
//! instant come from the caller's [`PositionProvider`].

use crate::angle::normalize_degrees;
use crate::aspects::calculator::AspectCalculator;
use crate::aspects::types::Aspect;
use crate::ephemeris::julian::{datetime_to_julian_day, julian_day_to_datetime};
use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::types::ChartPositions;
use crate::error::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_YEAR: f64 = 365.25;
/// Days in a lunar month as used by tertiary and minor progressions
pub const DAYS_PER_LUNAR_MONTH: f64 = 27.3;

/// Identifier the solar arc is measured from
pub const SOLAR_ARC_BODY: &str = "sun";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressionKind {
    /// One day after birth for each year of life
    #[default]
    Secondary,
    /// One day for each lunar month of life
    Tertiary,
    /// One lunar month for each year of life
    Minor,
}

pub fn age_in_years(birth_jd: f64, target_jd: f64) -> f64 {
    (target_jd - birth_jd) / DAYS_PER_YEAR
}

/// Julian day whose sky stands in for `target_jd` under `kind`
pub fn progressed_julian_day(kind: ProgressionKind, birth_jd: f64, target_jd: f64) -> f64 {
    let age = age_in_years(birth_jd, target_jd);
    match kind {
        ProgressionKind::Secondary => birth_jd + age,
        ProgressionKind::Tertiary => birth_jd + age * DAYS_PER_LUNAR_MONTH,
        ProgressionKind::Minor => birth_jd + age / DAYS_PER_LUNAR_MONTH,
    }
}

pub fn progressed_date(
    kind: ProgressionKind,
    birth: DateTime<Utc>,
    target: DateTime<Utc>,
) -> Result<DateTime<Utc>, EngineError> {
    julian_day_to_datetime(progressed_julian_day(
        kind,
        datetime_to_julian_day(birth),
        datetime_to_julian_day(target),
    ))
}

/// Natal chart moved uniformly by a directing arc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectedChart {
    /// Arc in degrees, 0-360
    pub arc: f64,
    pub chart: ChartPositions,
    /// Aspects among the directed bodies
    pub aspects: Vec<Aspect>,
}

/// Derives progressed and directed charts
pub struct ProgressionMapper<'a, P: PositionProvider> {
    provider: &'a P,
    calculator: &'a AspectCalculator,
}

impl<'a, P: PositionProvider> ProgressionMapper<'a, P> {
    pub fn new(provider: &'a P, calculator: &'a AspectCalculator) -> Self {
        Self {
            provider,
            calculator,
        }
    }

    /// Positions of `bodies` at the progressed instant.
    ///
    /// Bodies the provider cannot compute are left out.
    pub fn progressed_chart(
        &self,
        kind: ProgressionKind,
        birth: DateTime<Utc>,
        target: DateTime<Utc>,
        bodies: &[&str],
    ) -> Result<ChartPositions, EngineError> {
        let jd = progressed_julian_day(
            kind,
            datetime_to_julian_day(birth),
            datetime_to_julian_day(target),
        );
        log::debug!("{:?} progression of {} maps to JD {:.5}", kind, target, jd);
        self.provider.chart_at(bodies, jd)
    }

    /// Arc travelled by the secondary-progressed Sun since birth
    pub fn solar_arc_degrees(
        &self,
        natal: &ChartPositions,
        birth: DateTime<Utc>,
        target: DateTime<Utc>,
    ) -> Result<f64, EngineError> {
        let natal_sun = natal.get(SOLAR_ARC_BODY).ok_or_else(|| {
            EngineError::InvalidInput(format!(
                "natal chart has no {} position for a solar arc",
                SOLAR_ARC_BODY
            ))
        })?;
        let jd = progressed_julian_day(
            ProgressionKind::Secondary,
            datetime_to_julian_day(birth),
            datetime_to_julian_day(target),
        );
        let progressed_sun = self.provider.position(SOLAR_ARC_BODY, jd)?;
        Ok(normalize_degrees(progressed_sun.lon - natal_sun.lon))
    }

    /// Solar-arc directed chart: every natal body, cusp and axis advanced by
    /// the solar arc, with aspects resolved again on the result.
    pub fn solar_arc(
        &self,
        natal: &ChartPositions,
        birth: DateTime<Utc>,
        target: DateTime<Utc>,
    ) -> Result<DirectedChart, EngineError> {
        let arc = self.solar_arc_degrees(natal, birth, target)?;
        let chart = ChartPositions {
            bodies: natal.bodies.iter().map(|b| b.shifted(arc)).collect(),
            houses: natal.houses.as_ref().map(|h| h.shifted(arc)),
        };
        let aspects = self.calculator.resolve_all(&chart.bodies)?;
        Ok(DirectedChart {
            arc,
            chart,
            aspects,
        })
    }
}
