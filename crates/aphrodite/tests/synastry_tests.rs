mod common;

use aphrodite_core::{
    compatibility_score, julian_day_to_datetime, AspectCalculator, AspectKind, BodyPosition,
    Composite, EngineError, Synastry,
};
use chrono::Duration;
use common::{position, MeanMotionProvider, EPOCH_JD};

fn chart(prefix: &str, lon: f64, count: usize) -> Vec<BodyPosition> {
    (0..count)
        .map(|i| position(&format!("{}{}", prefix, i), lon))
        .collect()
}

#[test]
fn test_empty_set_scores_fifty() {
    assert_eq!(compatibility_score(&[]), 50.0);
}

#[test]
fn test_single_aspect_weights() {
    let calculator = AspectCalculator::default();

    let sun = [position("sun", 0.0)];

    let trine = Synastry::calculate(&calculator, &sun, &[position("moon", 120.0)]).unwrap();
    assert!((trine.score - 55.0).abs() < 1e-9);

    let square = Synastry::calculate(&calculator, &sun, &[position("moon", 90.0)]).unwrap();
    assert!((square.score - 47.0).abs() < 1e-9);

    let conjunction = Synastry::calculate(&calculator, &sun, &[position("moon", 0.0)]).unwrap();
    assert_eq!(conjunction.aspects.len(), 1);
    assert_eq!(conjunction.score, 50.0);
}

#[test]
fn test_strength_scales_contribution() {
    let calculator = AspectCalculator::default();
    // Trine 4° off with an 8° orb counts half
    let synastry =
        Synastry::calculate(&calculator, &[position("sun", 0.0)], &[position("moon", 124.0)])
            .unwrap();
    assert!((synastry.score - 52.5).abs() < 1e-9);
}

#[test]
fn test_score_is_bounded() {
    let calculator = AspectCalculator::default();

    let harmonious = Synastry::calculate(&calculator, &chart("a", 0.0, 20), &chart("b", 120.0, 20))
        .unwrap();
    assert_eq!(harmonious.aspects.len(), 400);
    assert_eq!(harmonious.score, 100.0);

    let challenging = Synastry::calculate(&calculator, &chart("a", 0.0, 20), &chart("b", 90.0, 20))
        .unwrap();
    assert_eq!(challenging.score, 0.0);
}

#[test]
fn test_harmony_views() {
    let calculator = AspectCalculator::default();
    let a = vec![position("sun", 0.0), position("venus", 45.0)];
    let b = vec![position("moon", 120.0), position("mars", 180.0)];

    let synastry = Synastry::calculate(&calculator, &a, &b).unwrap();
    let harmonious: Vec<AspectKind> = synastry.harmonious().map(|x| x.kind()).collect();
    let challenging: Vec<AspectKind> = synastry.challenging().map(|x| x.kind()).collect();
    assert_eq!(harmonious, vec![AspectKind::Trine]);
    assert_eq!(
        challenging,
        vec![AspectKind::Opposition, AspectKind::Sesquiquadrate]
    );
    assert!(synastry.score >= 0.0 && synastry.score <= 100.0);
}

#[test]
fn test_same_body_in_both_charts_is_skipped() {
    let calculator = AspectCalculator::default();
    let synastry =
        Synastry::calculate(&calculator, &[position("sun", 0.0)], &[position("sun", 120.0)])
            .unwrap();
    assert!(synastry.aspects.is_empty());
    assert_eq!(synastry.score, 50.0);
}

#[test]
fn test_composite_uses_time_midpoint() {
    let provider = MeanMotionProvider::new()
        .with_body("sun", 0.0, 1.0)
        .with_body("moon", 130.0, 0.0);
    let calculator = AspectCalculator::default();

    let first = julian_day_to_datetime(EPOCH_JD).unwrap();
    let second = first + Duration::days(20);
    let composite =
        Composite::calculate(&provider, &calculator, first, second, &["sun", "moon"]).unwrap();

    assert_eq!(composite.julian_day, EPOCH_JD + 10.0);
    assert_eq!(composite.instant, first + Duration::days(10));
    assert!(composite.chart.houses.is_none());
    assert!((composite.chart.get("sun").unwrap().lon - 10.0).abs() < 1e-9);
    assert_eq!(composite.aspects.len(), 1);
    assert_eq!(composite.aspects[0].kind(), AspectKind::Trine);

    // Argument order does not matter
    let swapped =
        Composite::calculate(&provider, &calculator, second, first, &["sun", "moon"]).unwrap();
    assert_eq!(swapped.julian_day, composite.julian_day);
}

#[test]
fn test_composite_without_positions_fails() {
    let provider = MeanMotionProvider::new();
    let calculator = AspectCalculator::default();
    let first = julian_day_to_datetime(EPOCH_JD).unwrap();
    let result = Composite::calculate(&provider, &calculator, first, first, &["sun"]);
    assert!(matches!(result, Err(EngineError::NoSamples { .. })));
}
