//! Exact-time search for transits.
//!
//! The default search is a two-stage grid: a coarse pass over the whole
//! interval, then a fine pass around the best coarse sample. It returns the
//! single best sample at the finest step searched, not a proven root. When
//! several passes fall inside the interval only the best-matching one is
//! reported, and an optimum lying outside the refine window is missed.

use crate::angle::{angular_distance, signed_separation};
use crate::aspects::calculator::AspectCalculator;
use crate::aspects::types::AspectKind;
use crate::ephemeris::julian::{datetime_to_julian_day, julian_day_to_datetime};
use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::types::BodyPosition;
use crate::error::EngineError;
use crate::transits::types::{ExactTransit, RefineStrategy, SearchSettings, TransitEvent};
use chrono::{DateTime, Datelike, Duration, Utc};

/// Days after the birthday searched for a return
pub const RETURN_SEARCH_WINDOW_DAYS: i64 = 5;
const MAX_BISECTION_ITERATIONS: usize = 64;

#[derive(Debug, Clone, Copy)]
struct Sample {
    jd: f64,
    lon: f64,
}

/// Best sample so far; ties keep the earliest
#[derive(Debug, Default)]
struct Best {
    jd: Option<f64>,
    diff: f64,
    successes: usize,
}

impl Best {
    fn offer(&mut self, jd: f64, diff: f64) {
        self.successes += 1;
        if self.jd.is_none() || diff < self.diff {
            self.jd = Some(jd);
            self.diff = diff;
        }
    }
}

/// Searches time for transit events using a position provider
pub struct TransitSearcher<'a, P: PositionProvider> {
    provider: &'a P,
    calculator: &'a AspectCalculator,
    settings: SearchSettings,
}

impl<'a, P: PositionProvider> TransitSearcher<'a, P> {
    pub fn new(provider: &'a P, calculator: &'a AspectCalculator) -> Self {
        Self {
            provider,
            calculator,
            settings: SearchSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: SearchSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Find the instant within `[start, end]` at which `body` is closest to
    /// forming `kind` with the fixed `reference_lon`.
    pub fn find_exact(
        &self,
        body: &str,
        reference_lon: f64,
        kind: AspectKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ExactTransit, EngineError> {
        let target = self.calculator.catalog().require(kind)?.angle;
        self.validate(reference_lon, start, end)?;

        let start_jd = datetime_to_julian_day(start);
        let end_jd = datetime_to_julian_day(end);
        let mut best = Best::default();

        let coarse = self.sample_grid(
            body,
            reference_lon,
            target,
            start_jd,
            end_jd,
            self.settings.coarse_step_days,
            &mut best,
        );
        let Some(coarse_jd) = best.jd else {
            return Err(EngineError::NoSamples {
                body: body.to_string(),
                start_jd,
                end_jd,
            });
        };
        log::debug!(
            "Coarse search for {} {} {:.4}: best JD {:.5} (diff {:.4}) from {} samples",
            body,
            kind,
            reference_lon,
            coarse_jd,
            best.diff,
            coarse.len()
        );

        if self.settings.strategy == RefineStrategy::Bisection {
            if let Some((t_a, t_b, offset)) = earliest_bracket(&coarse, reference_lon, target) {
                match self.bisect(body, reference_lon + offset, t_a, t_b) {
                    Ok((jd, lon, lookups)) => {
                        let difference = (angular_distance(lon, reference_lon) - target).abs();
                        return Ok(ExactTransit {
                            instant: julian_day_to_datetime(jd)?,
                            julian_day: jd,
                            difference,
                            samples: best.successes + lookups,
                        });
                    }
                    Err(e) => log::debug!("Bisection for {} abandoned: {}", body, e),
                }
            }
        }

        let window = self.settings.refine_window_days;
        self.sample_grid(
            body,
            reference_lon,
            target,
            coarse_jd - window,
            coarse_jd + window,
            self.settings.refine_step_days,
            &mut best,
        );

        // best.jd is set: the coarse pass succeeded at least once
        let jd = best.jd.unwrap_or(coarse_jd);
        Ok(ExactTransit {
            instant: julian_day_to_datetime(jd)?,
            julian_day: jd,
            difference: best.diff,
            samples: best.successes,
        })
    }

    /// Aspects from transiting bodies to a natal chart at one instant.
    ///
    /// Transiting bodies the provider cannot compute are left out.
    pub fn transits_at(
        &self,
        natal: &[BodyPosition],
        bodies: &[&str],
        instant: DateTime<Utc>,
    ) -> Result<Vec<TransitEvent>, EngineError> {
        let chart = self
            .provider
            .chart_at(bodies, datetime_to_julian_day(instant))?;
        let aspects = self.calculator.resolve_between(&chart.bodies, natal)?;
        Ok(aspects
            .into_iter()
            .map(|aspect| TransitEvent {
                aspect_type: aspect.kind(),
                transiting_body: aspect.body1,
                natal_body: aspect.body2,
                instant,
                orb: aspect.difference,
                exact: aspect.exact,
                motion: aspect.motion,
            })
            .collect())
    }

    /// Transit events sampled every `step_days` across `[start, end]`.
    ///
    /// Instants where no transiting position could be computed are skipped.
    pub fn transits_over_period(
        &self,
        natal: &[BodyPosition],
        bodies: &[&str],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step_days: f64,
    ) -> Result<Vec<TransitEvent>, EngineError> {
        if start > end {
            return Err(EngineError::InvalidInput(format!(
                "search start {} is after end {}",
                start, end
            )));
        }
        validate_step(step_days)?;

        let start_jd = datetime_to_julian_day(start);
        let end_jd = datetime_to_julian_day(end);
        let mut events = Vec::new();
        for jd in grid(start_jd, end_jd, step_days) {
            let instant = julian_day_to_datetime(jd)?;
            match self.transits_at(natal, bodies, instant) {
                Ok(found) => events.extend(found),
                Err(EngineError::NoSamples { .. }) => {
                    log::debug!("No transit positions at JD {:.5}, skipping", jd)
                }
                Err(e) => return Err(e),
            }
        }
        Ok(events)
    }

    /// Instant in `year` at which `body` returns to its natal longitude.
    ///
    /// Searches from the birthday to [`RETURN_SEARCH_WINDOW_DAYS`] after it,
    /// which suits the Sun; slower or faster bodies need their own window
    /// through [`find_exact`](Self::find_exact).
    pub fn find_return(
        &self,
        body: &str,
        natal_lon: f64,
        birth: DateTime<Utc>,
        year: i32,
    ) -> Result<ExactTransit, EngineError> {
        // Feb 29 birthdays fall back to Feb 28 in common years
        let start = birth
            .with_year(year)
            .or_else(|| birth.with_day(28).and_then(|d| d.with_year(year)))
            .ok_or_else(|| {
                EngineError::InvalidInput(format!("year {} is outside the calendar range", year))
            })?;
        let end = start
            .checked_add_signed(Duration::days(RETURN_SEARCH_WINDOW_DAYS))
            .ok_or_else(|| {
                EngineError::InvalidInput(format!(
                    "return window after {} is outside the calendar range",
                    start
                ))
            })?;
        self.find_exact(body, natal_lon, AspectKind::Conjunction, start, end)
    }

    fn validate(
        &self,
        reference_lon: f64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        if !reference_lon.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "reference longitude must be finite, got {}",
                reference_lon
            )));
        }
        if start > end {
            return Err(EngineError::InvalidInput(format!(
                "search start {} is after end {}",
                start, end
            )));
        }
        validate_step(self.settings.coarse_step_days)?;
        validate_step(self.settings.refine_step_days)?;
        let window = self.settings.refine_window_days;
        if !window.is_finite() || window < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "refine window must be non-negative, got {}",
                window
            )));
        }
        Ok(())
    }

    /// Sample the grid, feeding each success to `best`; failed lookups are
    /// skipped.
    #[allow(clippy::too_many_arguments)]
    fn sample_grid(
        &self,
        body: &str,
        reference_lon: f64,
        target: f64,
        from_jd: f64,
        to_jd: f64,
        step: f64,
        best: &mut Best,
    ) -> Vec<Sample> {
        let mut samples = Vec::new();
        for jd in grid(from_jd, to_jd, step) {
            match self.provider.position(body, jd) {
                Ok(pos) => {
                    let diff = (angular_distance(pos.lon, reference_lon) - target).abs();
                    best.offer(jd, diff);
                    samples.push(Sample { jd, lon: pos.lon });
                }
                Err(e) => log::debug!("Skipping sample for {} at JD {:.5}: {}", body, jd, e),
            }
        }
        samples
    }

    /// Bisect the zero of `signed_separation(lon, aim)` inside `[t_a, t_b]`.
    /// Returns the root, the longitude there and the number of lookups made.
    fn bisect(
        &self,
        body: &str,
        aim: f64,
        mut t_a: f64,
        mut t_b: f64,
    ) -> Result<(f64, f64, usize), EngineError> {
        let mut f_a = signed_separation(self.provider.position(body, t_a)?.lon, aim);
        let mut lookups = 1;
        let mut mid = (t_a + t_b) / 2.0;
        let mut lon = 0.0;

        for _ in 0..MAX_BISECTION_ITERATIONS {
            mid = (t_a + t_b) / 2.0;
            lon = self.provider.position(body, mid)?.lon;
            lookups += 1;
            let f_mid = signed_separation(lon, aim);
            if f_mid == 0.0 || (t_b - t_a) / 2.0 < self.settings.bisection_tolerance_days {
                break;
            }
            if f_a * f_mid < 0.0 {
                t_b = mid;
            } else {
                t_a = mid;
                f_a = f_mid;
            }
        }
        Ok((mid, lon, lookups))
    }
}

/// `from + i * step` up to and including `to`, without accumulated drift
fn grid(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = ((to - from) / step + 1e-9).floor().max(0.0) as usize;
    (0..=count).map(move |i| from + i as f64 * step)
}

fn validate_step(step: f64) -> Result<(), EngineError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "search step must be positive, got {}",
            step
        )));
    }
    Ok(())
}

/// Sign change of the separation from `reference + offset` that is a real
/// crossing rather than a jump across the ±180° seam.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

/// Earliest pair of adjacent coarse samples bracketing an exact pass.
/// Returns the bracket and the offset (±target) from the reference that
/// was crossed.
fn earliest_bracket(
    samples: &[Sample],
    reference_lon: f64,
    target: f64,
) -> Option<(f64, f64, f64)> {
    let offsets = if target == 0.0 || target == 180.0 {
        vec![target]
    } else {
        vec![target, -target]
    };

    samples.windows(2).find_map(|pair| {
        let (a, b) = (pair[0], pair[1]);
        offsets.iter().find_map(|offset| {
            let aim = reference_lon + offset;
            let f_a = signed_separation(a.lon, aim);
            let f_b = signed_separation(b.lon, aim);
            if f_a == 0.0 {
                Some((a.jd, a.jd, *offset))
            } else if is_genuine_crossing(f_a, f_b) {
                Some((a.jd, b.jd, *offset))
            } else {
                None
            }
        })
    })
}
