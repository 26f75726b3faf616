use crate::angle::angular_distance;
use crate::aspects::catalog::AspectCatalog;
use crate::aspects::types::{Aspect, AspectKind, AspectMotion, AspectTypeConfig};
use crate::ephemeris::types::BodyPosition;
use crate::error::EngineError;

/// Relative speeds below this (degrees/day) count as stationary
pub const STATIONARY_SPEED_THRESHOLD: f64 = 0.01;

/// Aspect calculator.
///
/// Owns the aspect catalog it resolves against; callers that want different
/// orbs keep their own calculator or adjust this one through
/// [`catalog_mut`](Self::catalog_mut).
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    catalog: AspectCatalog,
}

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new(catalog: AspectCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &AspectCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut AspectCatalog {
        &mut self.catalog
    }

    /// First enabled catalog entry whose orb window contains the distance
    /// between the two longitudes, with the deviation from its exact angle.
    pub fn check_aspect(&self, lon1: f64, lon2: f64) -> Option<(&AspectTypeConfig, f64)> {
        let distance = angular_distance(lon1, lon2);

        // Declaration order decides overlapping windows
        self.catalog.enabled().find_map(|config| {
            let difference = (distance - config.angle).abs();
            (difference <= config.default_orb).then_some((config, difference))
        })
    }

    /// Calculate the aspect formed by two bodies, if any
    pub fn resolve_pair(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
    ) -> Result<Option<Aspect>, EngineError> {
        validate_pair(a, b)?;
        Ok(self
            .check_aspect(a.lon, b.lon)
            .map(|(config, difference)| build_aspect(a, b, config, difference)))
    }

    /// Check only one aspect kind for a pair.
    ///
    /// Unlike [`resolve_pair`](Self::resolve_pair), asking for a kind that is
    /// missing or disabled is an error.
    pub fn resolve_kind(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        kind: AspectKind,
    ) -> Result<Option<Aspect>, EngineError> {
        validate_pair(a, b)?;
        let config = self.catalog.require(kind)?;
        let difference = (angular_distance(a.lon, b.lon) - config.angle).abs();
        if difference <= config.default_orb {
            Ok(Some(build_aspect(a, b, config, difference)))
        } else {
            Ok(None)
        }
    }

    /// Compute aspects among all bodies of one chart, pairs in input order
    pub fn resolve_all(&self, positions: &[BodyPosition]) -> Result<Vec<Aspect>, EngineError> {
        let mut aspects = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                if let Some(aspect) = self.resolve_pair(&positions[i], &positions[j])? {
                    aspects.push(aspect);
                }
            }
        }
        Ok(aspects)
    }

    /// Compute aspects between two charts (transits, synastry).
    ///
    /// Pairs of the same body ("sun" to natal "sun") are skipped.
    pub fn resolve_between(
        &self,
        moving: &[BodyPosition],
        fixed: &[BodyPosition],
    ) -> Result<Vec<Aspect>, EngineError> {
        let mut aspects = Vec::new();
        for a in moving {
            for b in fixed {
                validate_position(a)?;
                validate_position(b)?;
                // Skip if same body
                if a.id == b.id {
                    continue;
                }
                if let Some((config, difference)) = self.check_aspect(a.lon, b.lon) {
                    aspects.push(build_aspect(a, b, config, difference));
                }
            }
        }
        Ok(aspects)
    }

    /// Strength of an aspect from 1 (exact) down to 0 (edge of the orb)
    pub fn strength(aspect: &Aspect) -> f64 {
        if aspect.config.default_orb <= 0.0 {
            return if aspect.difference <= 0.0 { 1.0 } else { 0.0 };
        }
        (1.0 - aspect.difference / aspect.config.default_orb).max(0.0)
    }
}

/// Aspects that have `body` at either end, in their original order
pub fn aspects_for_body<'a>(aspects: &'a [Aspect], body: &str) -> Vec<&'a Aspect> {
    aspects.iter().filter(|a| a.involves(body)).collect()
}

/// Determine if an aspect is applying or separating.
///
/// First-order heuristic on the instantaneous speed difference: the faster
/// body is assumed to keep closing (or opening) the gap at its current rate.
pub fn aspect_motion(a: &BodyPosition, b: &BodyPosition, target_angle: f64) -> AspectMotion {
    let speed_diff = a.speed_lon - b.speed_lon;
    if speed_diff.abs() < STATIONARY_SPEED_THRESHOLD {
        return AspectMotion::Stationary;
    }

    let current = angular_distance(a.lon, b.lon);
    let applying = if speed_diff > 0.0 {
        current < target_angle
    } else {
        current > target_angle
    };
    if applying {
        AspectMotion::Applying
    } else {
        AspectMotion::Separating
    }
}

fn build_aspect(
    a: &BodyPosition,
    b: &BodyPosition,
    config: &AspectTypeConfig,
    difference: f64,
) -> Aspect {
    Aspect {
        body1: a.id.clone(),
        body2: b.id.clone(),
        config: *config,
        distance: angular_distance(a.lon, b.lon),
        difference,
        motion: aspect_motion(a, b, config.angle),
        exact: difference <= config.tight_orb,
    }
}

fn validate_position(pos: &BodyPosition) -> Result<(), EngineError> {
    if pos.id.is_empty() {
        return Err(EngineError::InvalidInput(
            "body position without identifier".to_string(),
        ));
    }
    if !pos.lon.is_finite() || !pos.speed_lon.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "non-finite longitude or speed for {}",
            pos.id
        )));
    }
    Ok(())
}

fn validate_pair(a: &BodyPosition, b: &BodyPosition) -> Result<(), EngineError> {
    validate_position(a)?;
    validate_position(b)?;
    if a.id == b.id {
        return Err(EngineError::SelfPair { body: a.id.clone() });
    }
    Ok(())
}
