//! Aspect pattern recognition.
//!
//! Patterns are inferred from an already resolved aspect set; the detector
//! never recomputes angles except for sign clusters, which only look at
//! longitudes.

use crate::angle::{normalize_degrees, sign_index, sign_name, FULL_CIRCLE};
use crate::aspects::types::{Aspect, AspectKind};
use crate::ephemeris::types::BodyPosition;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Minimum number of bodies sharing a sign to report a cluster
pub const CLUSTER_MIN_BODIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    /// Three bodies mutually joined by the same aspect (grand trine)
    ClosedTriangle,
    /// Opposition with a third body square to both ends (T-square)
    TensionCross,
    /// Three or more bodies in one sign (stellium)
    Cluster,
    /// Two oppositions squaring each other
    GrandCross,
    /// Sextile pair both quincunx a third body
    Yod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    /// Bodies involved, in discovery order
    pub bodies: Vec<String>,
    pub description: String,
}

/// Finds multi-body configurations in an aspect set
#[derive(Debug, Clone)]
pub struct PatternDetector {
    /// Aspect kind that closes a triangle
    pub triangle_kind: AspectKind,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self {
            triangle_kind: AspectKind::Trine,
        }
    }
}

/// Reported patterns keyed by kind and sorted body ids
#[derive(Default)]
struct Seen(HashSet<(PatternKind, Vec<String>)>);

impl Seen {
    /// True the first time this body set is seen for this kind
    fn insert(&mut self, kind: PatternKind, bodies: &[&str]) -> bool {
        let mut key: Vec<String> = bodies.iter().map(|b| b.to_string()).collect();
        key.sort();
        self.0.insert((kind, key))
    }
}

impl PatternDetector {
    pub fn new(triangle_kind: AspectKind) -> Self {
        Self { triangle_kind }
    }

    /// Find every pattern: triangles, tension crosses, sign clusters, grand
    /// crosses and yods, in that order.
    pub fn detect(&self, positions: &[BodyPosition], aspects: &[Aspect]) -> Vec<Pattern> {
        let mut patterns = self.find_closed_triangles(aspects);
        patterns.extend(find_tension_crosses(aspects));
        patterns.extend(find_clusters(positions));
        patterns.extend(find_grand_crosses(aspects));
        patterns.extend(find_yods(aspects));
        log::debug!(
            "Detected {} patterns from {} aspects over {} bodies",
            patterns.len(),
            aspects.len(),
            positions.len()
        );
        patterns
    }

    /// Triangles closed by `triangle_kind` on all three sides
    pub fn find_closed_triangles(&self, aspects: &[Aspect]) -> Vec<Pattern> {
        let kind = self.triangle_kind;
        let sides: Vec<&Aspect> = aspects.iter().filter(|a| a.kind() == kind).collect();
        let mut seen = Seen::default();
        let mut patterns = Vec::new();

        for (i, first) in sides.iter().enumerate() {
            for second in &sides[i + 1..] {
                // Must share exactly one body
                let shared = if second.involves(&first.body1) && !second.involves(&first.body2) {
                    first.body1.as_str()
                } else if second.involves(&first.body2) && !second.involves(&first.body1) {
                    first.body2.as_str()
                } else {
                    continue;
                };
                let (Some(x), Some(y)) = (first.other(shared), second.other(shared)) else {
                    continue;
                };

                if sides.iter().any(|closer| closer.connects(x, y)) {
                    let bodies = [shared, x, y];
                    if seen.insert(PatternKind::ClosedTriangle, &bodies) {
                        patterns.push(Pattern {
                            kind: PatternKind::ClosedTriangle,
                            bodies: owned_ids(&bodies),
                            description: triangle_description(kind, &bodies),
                        });
                    }
                }
            }
        }
        patterns
    }
}

fn owned_ids(bodies: &[&str]) -> Vec<String> {
    bodies.iter().map(|b| b.to_string()).collect()
}

fn triangle_description(kind: AspectKind, bodies: &[&str]) -> String {
    match kind {
        AspectKind::Trine => format!("Grand Trine: {}", bodies.join(", ")),
        other => format!("Closed {} triangle: {}", other, bodies.join(", ")),
    }
}

/// Oppositions whose ends are both squared by a third body
pub fn find_tension_crosses(aspects: &[Aspect]) -> Vec<Pattern> {
    let mut seen = Seen::default();
    let mut patterns = Vec::new();
    let squares: Vec<&Aspect> = aspects
        .iter()
        .filter(|a| a.kind() == AspectKind::Square)
        .collect();

    for opposition in aspects.iter().filter(|a| a.kind() == AspectKind::Opposition) {
        let (p1, p2) = (opposition.body1.as_str(), opposition.body2.as_str());
        for square in &squares {
            // One end on the opposition, the other outside it
            let (touched, apex) = if square.body1 == p1 || square.body1 == p2 {
                (square.body1.as_str(), square.body2.as_str())
            } else if square.body2 == p1 || square.body2 == p2 {
                (square.body2.as_str(), square.body1.as_str())
            } else {
                continue;
            };
            if apex == p1 || apex == p2 {
                continue;
            }
            let far_end = if touched == p1 { p2 } else { p1 };
            if squares.iter().any(|s| s.connects(apex, far_end)) {
                let bodies = [p1, p2, apex];
                if seen.insert(PatternKind::TensionCross, &bodies) {
                    patterns.push(Pattern {
                        kind: PatternKind::TensionCross,
                        bodies: owned_ids(&bodies),
                        description: format!(
                            "T-Square: {} opp {}, both square {}",
                            p1, p2, apex
                        ),
                    });
                }
            }
        }
    }
    patterns
}

/// Positions with a usable longitude; the rest are logged and left out
pub(crate) fn finite_positions(positions: &[BodyPosition]) -> impl Iterator<Item = &BodyPosition> {
    positions.iter().filter(|pos| {
        let finite = pos.lon.is_finite();
        if !finite {
            log::debug!("Ignoring {} with non-finite longitude {}", pos.id, pos.lon);
        }
        finite
    })
}

/// Signs holding at least [`CLUSTER_MIN_BODIES`] bodies, by sign order
pub fn find_clusters(positions: &[BodyPosition]) -> Vec<Pattern> {
    let mut buckets: Vec<Vec<&str>> = vec![Vec::new(); 12];
    for pos in finite_positions(positions) {
        buckets[sign_index(pos.lon)].push(&pos.id);
    }

    buckets
        .iter()
        .enumerate()
        .filter(|(_, members)| members.len() >= CLUSTER_MIN_BODIES)
        .map(|(sign, members)| Pattern {
            kind: PatternKind::Cluster,
            bodies: owned_ids(members),
            description: format!(
                "Stellium in {} ({} bodies)",
                sign_name(sign),
                members.len()
            ),
        })
        .collect()
}

/// Overall distribution of bodies around the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartShape {
    /// Every body inside one trine (120°)
    Bundle,
    /// Every body inside one half of the wheel
    Bowl,
    /// An empty arc of at least a trine
    Locomotive,
    /// Bodies spread all around
    Splash,
}

/// Fewer bodies than this always count as a splash
pub const SHAPE_MIN_BODIES: usize = 3;

/// Classify the spread of the bodies by the largest empty arc between
/// neighbours. The occupied span is what remains of the circle.
pub fn chart_shape(positions: &[BodyPosition]) -> ChartShape {
    let mut lons: Vec<f64> = finite_positions(positions)
        .map(|p| normalize_degrees(p.lon))
        .collect();
    if lons.len() < SHAPE_MIN_BODIES {
        return ChartShape::Splash;
    }
    lons.sort_by(f64::total_cmp);

    let wrap_gap = FULL_CIRCLE - lons[lons.len() - 1] + lons[0];
    let largest_gap = lons
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold(wrap_gap, f64::max);
    let span = FULL_CIRCLE - largest_gap;

    if span <= 120.0 {
        ChartShape::Bundle
    } else if span <= 180.0 {
        ChartShape::Bowl
    } else if largest_gap >= 120.0 {
        ChartShape::Locomotive
    } else {
        ChartShape::Splash
    }
}

/// Two oppositions with all four cross pairs square
pub fn find_grand_crosses(aspects: &[Aspect]) -> Vec<Pattern> {
    let oppositions: Vec<&Aspect> = aspects
        .iter()
        .filter(|a| a.kind() == AspectKind::Opposition)
        .collect();
    let squares: Vec<&Aspect> = aspects
        .iter()
        .filter(|a| a.kind() == AspectKind::Square)
        .collect();
    let is_square = |x: &str, y: &str| squares.iter().any(|s| s.connects(x, y));

    let mut seen = Seen::default();
    let mut patterns = Vec::new();
    for (i, first) in oppositions.iter().enumerate() {
        for second in &oppositions[i + 1..] {
            let (a, b) = (first.body1.as_str(), first.body2.as_str());
            let (c, d) = (second.body1.as_str(), second.body2.as_str());
            if second.involves(a) || second.involves(b) {
                continue;
            }
            if is_square(a, c) && is_square(a, d) && is_square(b, c) && is_square(b, d) {
                let bodies = [a, c, b, d];
                if seen.insert(PatternKind::GrandCross, &bodies) {
                    patterns.push(Pattern {
                        kind: PatternKind::GrandCross,
                        bodies: owned_ids(&bodies),
                        description: format!(
                            "Grand Cross: {} opp {}, {} opp {}",
                            a, b, c, d
                        ),
                    });
                }
            }
        }
    }
    patterns
}

/// Sextile pairs pointing by quincunx at a common apex
pub fn find_yods(aspects: &[Aspect]) -> Vec<Pattern> {
    let quincunxes: Vec<&Aspect> = aspects
        .iter()
        .filter(|a| a.kind() == AspectKind::Quincunx)
        .collect();

    let mut seen = Seen::default();
    let mut patterns = Vec::new();
    for sextile in aspects.iter().filter(|a| a.kind() == AspectKind::Sextile) {
        let (a, b) = (sextile.body1.as_str(), sextile.body2.as_str());
        for q in &quincunxes {
            let Some(apex) = q.other(a) else {
                continue;
            };
            if apex == b {
                continue;
            }
            if quincunxes.iter().any(|other| other.connects(b, apex)) {
                let bodies = [a, b, apex];
                if seen.insert(PatternKind::Yod, &bodies) {
                    patterns.push(Pattern {
                        kind: PatternKind::Yod,
                        bodies: owned_ids(&bodies),
                        description: format!(
                            "Yod: {} sextile {}, both quincunx {}",
                            a, b, apex
                        ),
                    });
                }
            }
        }
    }
    patterns
}
