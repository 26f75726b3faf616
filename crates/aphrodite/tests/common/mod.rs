#![allow(dead_code)]

use aphrodite_core::angle::normalize_degrees;
use aphrodite_core::{BodyPosition, PositionProvider, ProviderError};
use std::collections::HashMap;

/// J2000.0
pub const EPOCH_JD: f64 = 2_451_545.0;

/// Bodies moving at constant speed from a longitude at [`EPOCH_JD`]
#[derive(Debug, Default)]
pub struct MeanMotionProvider {
    bodies: HashMap<String, (f64, f64)>,
    /// Julian-day ranges in which every lookup fails
    outages: Vec<(f64, f64)>,
}

impl MeanMotionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, id: &str, lon_at_epoch: f64, speed: f64) -> Self {
        self.bodies.insert(id.to_string(), (lon_at_epoch, speed));
        self
    }

    pub fn with_outage(mut self, from_jd: f64, to_jd: f64) -> Self {
        self.outages.push((from_jd, to_jd));
        self
    }
}

impl PositionProvider for MeanMotionProvider {
    fn position(&self, body: &str, jd: f64) -> Result<BodyPosition, ProviderError> {
        let (lon, speed) = self
            .bodies
            .get(body)
            .copied()
            .ok_or_else(|| ProviderError::UnknownBody(body.to_string()))?;
        if self.outages.iter().any(|(from, to)| jd >= *from && jd <= *to) {
            return Err(ProviderError::Failed {
                body: body.to_string(),
                jd,
                message: "simulated outage".to_string(),
            });
        }
        Ok(BodyPosition::new(
            body,
            normalize_degrees(lon + speed * (jd - EPOCH_JD)),
            speed,
        ))
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn position(id: &str, lon: f64) -> BodyPosition {
    BodyPosition::new(id, lon, 1.0)
}
