//! Angle helpers on the 0-360° ecliptic circle.

pub const FULL_CIRCLE: f64 = 360.0;
pub const SIGN_SPAN: f64 = 30.0;

const SIGN_NAMES: &[&str] = &[
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(FULL_CIRCLE);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= FULL_CIRCLE {
        0.0
    } else {
        normalized
    }
}

/// Minimal angular distance between two longitudes, always in [0, 180].
pub fn angular_distance(lon1: f64, lon2: f64) -> f64 {
    let diff = (normalize_degrees(lon1) - normalize_degrees(lon2)).abs();
    diff.min(FULL_CIRCLE - diff)
}

/// `lon1 - lon2` wrapped to (-180, 180].
pub fn signed_separation(lon1: f64, lon2: f64) -> f64 {
    let mut d = normalize_degrees(lon1 - lon2);
    if d > 180.0 {
        d -= FULL_CIRCLE;
    }
    d
}

/// Add an arc to a longitude and wrap the result.
pub fn shift_longitude(lon: f64, arc: f64) -> f64 {
    normalize_degrees(lon + arc)
}

/// Zodiac sign bucket (0 = Aries .. 11 = Pisces).
pub fn sign_index(lon: f64) -> usize {
    ((normalize_degrees(lon) / SIGN_SPAN).floor() as usize) % 12
}

pub fn sign_name(index: usize) -> &'static str {
    SIGN_NAMES[index % 12]
}

/// Degrees inside the sign, [0, 30).
pub fn sign_degree(lon: f64) -> f64 {
    normalize_degrees(lon) % SIGN_SPAN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!(normalize_degrees(-1e-20) < FULL_CIRCLE);
    }

    #[test]
    fn test_angular_distance_wraps() {
        assert_eq!(angular_distance(350.0, 10.0), 20.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
        assert_eq!(angular_distance(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_angular_distance_symmetric_and_bounded() {
        let mut a = -720.0;
        while a <= 720.0 {
            let mut b = -725.0;
            while b <= 725.0 {
                let d = angular_distance(a, b);
                assert_eq!(d, angular_distance(b, a), "a={} b={}", a, b);
                assert!((0.0..=180.0).contains(&d), "a={} b={} d={}", a, b, d);
                b += 12.5;
            }
            a += 7.25;
        }
        assert_eq!(angular_distance(-90.0, 450.0), 180.0);
        assert_eq!(angular_distance(725.0, -5.0), 10.0);
    }

    #[test]
    fn test_signed_separation() {
        assert_eq!(signed_separation(10.0, 350.0), 20.0);
        assert_eq!(signed_separation(350.0, 10.0), -20.0);
        assert_eq!(signed_separation(180.0, 0.0), 180.0);
    }

    #[test]
    fn test_sign_helpers() {
        assert_eq!(sign_index(0.0), 0);
        assert_eq!(sign_index(135.0), 4);
        assert_eq!(sign_name(sign_index(135.0)), "Leo");
        assert_eq!(sign_index(359.9), 11);
        assert!((sign_degree(45.5) - 15.5).abs() < 1e-12);
    }
}
