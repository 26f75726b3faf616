//! Ranking and filtering of transit events.

use crate::aspects::types::AspectKind;
use crate::transits::types::{TransitEvent, TransitScore};

/// Slow bodies whose transits count as major
pub const OUTER_BODIES: &[&str] = &["jupiter", "saturn", "uranus", "neptune", "pluto"];

pub fn is_outer_body(body: &str) -> bool {
    OUTER_BODIES.iter().any(|b| b.eq_ignore_ascii_case(body))
}

fn strength(event: &TransitEvent) -> f64 {
    let mut strength = 50.0;
    if is_outer_body(&event.transiting_body) {
        strength += 20.0;
    }
    if event.exact {
        strength += 20.0;
    }
    if matches!(
        event.aspect_type,
        AspectKind::Conjunction | AspectKind::Opposition | AspectKind::Square
    ) {
        strength += 10.0;
    }
    // Tighter orb, stronger transit
    strength *= 1.0 - event.orb / 10.0;
    strength.clamp(0.0, 100.0)
}

/// Rate a transit from 0 to 100
pub fn score_transit(event: &TransitEvent) -> TransitScore {
    TransitScore {
        transit: event.clone(),
        strength: strength(event),
        major: is_outer_body(&event.transiting_body),
    }
}

pub fn score_all(events: &[TransitEvent]) -> Vec<TransitScore> {
    events.iter().map(score_transit).collect()
}

/// Highest scoring event; the first one wins ties
pub fn most_important(events: &[TransitEvent]) -> Option<&TransitEvent> {
    let mut best: Option<(&TransitEvent, f64)> = None;
    for event in events {
        let s = strength(event);
        match best {
            Some((_, top)) if s <= top => {}
            _ => best = Some((event, s)),
        }
    }
    best.map(|(event, _)| event)
}

/// Events whose transiting body is `body`
pub fn filter_by_body<'a>(events: &'a [TransitEvent], body: &str) -> Vec<&'a TransitEvent> {
    events
        .iter()
        .filter(|e| e.transiting_body == body)
        .collect()
}

pub fn filter_by_aspect(events: &[TransitEvent], kind: AspectKind) -> Vec<&TransitEvent> {
    events.iter().filter(|e| e.aspect_type == kind).collect()
}
