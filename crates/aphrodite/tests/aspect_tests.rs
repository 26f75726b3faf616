mod common;

use aphrodite_core::aspects::{
    aspects_for_body, AspectCalculator, AspectCatalog, AspectKind, AspectMotion,
};
use aphrodite_core::{BodyPosition, EngineError};
use common::position;

#[test]
fn test_stationary_exact_trine() {
    let calculator = AspectCalculator::default();
    let sun = position("sun", 0.0);
    let moon = position("moon", 120.0);

    let aspect = calculator.resolve_pair(&sun, &moon).unwrap().unwrap();
    assert_eq!(aspect.kind(), AspectKind::Trine);
    assert_eq!(aspect.difference, 0.0);
    assert!(aspect.exact);
    assert_eq!(aspect.motion, AspectMotion::Stationary);
}

#[test]
fn test_calculate_aspect_conjunction() {
    let calculator = AspectCalculator::default();
    let sun = BodyPosition::new("sun", 100.0, 1.0);
    let moon = BodyPosition::new("moon", 102.0, 13.0);

    let aspect = calculator.resolve_pair(&sun, &moon).unwrap().unwrap();
    assert_eq!(aspect.kind(), AspectKind::Conjunction);
    assert!((aspect.difference - 2.0).abs() < 1e-9);
    assert!(aspect.exact);
}

#[test]
fn test_calculate_aspect_opposition_across_zero() {
    let calculator = AspectCalculator::default();
    let a = position("mars", 355.0);
    let b = position("saturn", 180.0);

    let aspect = calculator.resolve_pair(&a, &b).unwrap().unwrap();
    assert_eq!(aspect.kind(), AspectKind::Opposition);
    assert!((aspect.distance - 175.0).abs() < 1e-9);
    assert!(!aspect.exact);
}

#[test]
fn test_no_aspect_outside_orbs() {
    let calculator = AspectCalculator::default();
    let a = position("sun", 0.0);
    let b = position("moon", 20.0);
    assert!(calculator.resolve_pair(&a, &b).unwrap().is_none());
}

#[test]
fn test_catalog_order_breaks_ties() {
    let catalog = AspectCatalog::default()
        .with_orb(AspectKind::Quincunx, 40.0)
        .unwrap()
        .with_orb(AspectKind::Sesquiquadrate, 20.0)
        .unwrap();
    let mut calculator = AspectCalculator::new(catalog);
    let a = position("venus", 0.0);
    let b = position("pluto", 145.0);

    let aspect = calculator.resolve_pair(&a, &b).unwrap().unwrap();
    assert_eq!(aspect.kind(), AspectKind::Quincunx);
    assert!((aspect.difference - 5.0).abs() < 1e-9);

    calculator
        .catalog_mut()
        .set_enabled(AspectKind::Quincunx, false)
        .unwrap();
    let aspect = calculator.resolve_pair(&a, &b).unwrap().unwrap();
    assert_eq!(aspect.kind(), AspectKind::Sesquiquadrate);
}

#[test]
fn test_resolution_is_symmetric() {
    let calculator = AspectCalculator::default();
    for (lon1, lon2) in [(10.0, 95.0), (350.0, 62.0), (0.0, 181.0), (200.0, 52.0)] {
        let a = position("a", lon1);
        let b = position("b", lon2);
        let forward = calculator.resolve_pair(&a, &b).unwrap();
        let backward = calculator.resolve_pair(&b, &a).unwrap();
        assert_eq!(
            forward.as_ref().map(|x| (x.kind(), x.difference)),
            backward.as_ref().map(|x| (x.kind(), x.difference))
        );
    }
}

#[test]
fn test_exact_never_exceeds_orbs() {
    let calculator = AspectCalculator::default();
    let sun = position("sun", 0.0);
    for step in 0..720 {
        let other = position("body", step as f64 * 0.5);
        if let Some(aspect) = calculator.resolve_pair(&sun, &other).unwrap() {
            assert!(aspect.difference <= aspect.config.default_orb);
            if aspect.exact {
                assert!(aspect.difference <= aspect.config.tight_orb);
            }
        }
    }
}

#[test]
fn test_self_pair_rejected() {
    let calculator = AspectCalculator::default();
    let sun = position("sun", 10.0);
    assert_eq!(
        calculator.resolve_pair(&sun, &sun),
        Err(EngineError::SelfPair {
            body: "sun".to_string()
        })
    );
}

#[test]
fn test_non_finite_longitude_rejected() {
    let calculator = AspectCalculator::default();
    let mut broken = position("moon", 0.0);
    broken.lon = f64::NAN;
    let sun = position("sun", 10.0);
    assert!(matches!(
        calculator.resolve_pair(&sun, &broken),
        Err(EngineError::InvalidInput(_))
    ));
}

#[test]
fn test_resolve_kind_reports_disabled_kind() {
    let catalog = AspectCatalog::default().without(AspectKind::Trine).unwrap();
    let calculator = AspectCalculator::new(catalog);
    let a = position("sun", 0.0);
    let b = position("moon", 120.0);

    assert!(calculator.resolve_pair(&a, &b).unwrap().is_none());
    assert!(matches!(
        calculator.resolve_kind(&a, &b, AspectKind::Trine),
        Err(EngineError::Configuration { .. })
    ));
}

#[test]
fn test_compute_all_aspects_in_input_order() {
    let calculator = AspectCalculator::default();
    let chart = vec![
        position("sun", 0.0),
        position("moon", 90.0),
        position("mars", 180.0),
    ];

    let aspects = calculator.resolve_all(&chart).unwrap();
    let pairs: Vec<(&str, &str, AspectKind)> = aspects
        .iter()
        .map(|a| (a.body1.as_str(), a.body2.as_str(), a.kind()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("sun", "moon", AspectKind::Square),
            ("sun", "mars", AspectKind::Opposition),
            ("moon", "mars", AspectKind::Square),
        ]
    );
    assert_eq!(calculator.resolve_all(&chart).unwrap(), aspects);
}

#[test]
fn test_between_charts_skips_same_body() {
    let calculator = AspectCalculator::default();
    let transiting = vec![position("sun", 1.0), position("mars", 121.0)];
    let natal = vec![position("sun", 0.0), position("moon", 240.0)];

    let aspects = calculator.resolve_between(&transiting, &natal).unwrap();
    let pairs: Vec<(&str, &str, AspectKind)> = aspects
        .iter()
        .map(|a| (a.body1.as_str(), a.body2.as_str(), a.kind()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("sun", "moon", AspectKind::Trine),
            ("mars", "sun", AspectKind::Trine),
            ("mars", "moon", AspectKind::Trine),
        ]
    );
}

#[test]
fn test_aspects_for_body() {
    let calculator = AspectCalculator::default();
    let chart = vec![
        position("sun", 0.0),
        position("moon", 90.0),
        position("mars", 180.0),
    ];
    let aspects = calculator.resolve_all(&chart).unwrap();

    let moon: Vec<&str> = aspects_for_body(&aspects, "moon")
        .iter()
        .map(|a| a.other("moon").unwrap())
        .collect();
    assert_eq!(moon, vec!["sun", "mars"]);
    assert!(aspects_for_body(&aspects, "pluto").is_empty());
}

#[test]
fn test_catalog_deserialization_is_validated() {
    let catalog = AspectCatalog::default().with_orb(AspectKind::Trine, 6.0).unwrap();
    let json = serde_json::to_string(&catalog).unwrap();
    let restored: AspectCatalog = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, catalog);

    let negative_and_duplicate = r#"[
        {"kind": "trine", "angle": 120.0, "defaultOrb": 8.0, "tightOrb": 3.0, "enabled": true, "major": true},
        {"kind": "trine", "angle": 120.0, "defaultOrb": -1.0, "tightOrb": 0.0, "enabled": true, "major": true}
    ]"#;
    assert!(serde_json::from_str::<AspectCatalog>(negative_and_duplicate).is_err());

    let tight_above_default = r#"[
        {"kind": "trine", "angle": 120.0, "defaultOrb": 2.0, "tightOrb": 5.0, "enabled": true, "major": true}
    ]"#;
    assert!(serde_json::from_str::<AspectCatalog>(tight_above_default).is_err());
}

#[test]
fn test_aspect_kind_parsing() {
    assert_eq!("Semi-Sextile".parse::<AspectKind>(), Ok(AspectKind::SemiSextile));
    assert_eq!("biquintile".parse::<AspectKind>(), Ok(AspectKind::BiQuintile));
    assert!("septile".parse::<AspectKind>().is_err());
}

#[test]
fn test_serialized_shape() {
    let calculator = AspectCalculator::default();
    let aspect = calculator
        .resolve_pair(&position("sun", 0.0), &position("moon", 60.0))
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&aspect).unwrap();
    assert_eq!(json["config"]["kind"], "sextile");
    assert_eq!(json["config"]["defaultOrb"], 6.0);
    assert_eq!(json["motion"], "stationary");

    let body = serde_json::to_value(position("sun", 10.0)).unwrap();
    assert!(body.get("speedLon").is_some());
}
