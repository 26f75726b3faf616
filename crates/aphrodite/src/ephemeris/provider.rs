use crate::ephemeris::types::{BodyPosition, ChartPositions};
use crate::error::{EngineError, ProviderError};

/// Source of body positions at a given instant.
///
/// Implementations must return a longitude already normalized to [0, 360)
/// and report failure through [`ProviderError`], never a sentinel value.
pub trait PositionProvider {
    fn position(&self, body: &str, jd: f64) -> Result<BodyPosition, ProviderError>;

    /// Positions for several bodies at one instant.
    ///
    /// Bodies whose lookup fails are left out of the chart. Fails only if no
    /// body could be computed.
    fn chart_at(&self, bodies: &[&str], jd: f64) -> Result<ChartPositions, EngineError> {
        let mut positions = Vec::with_capacity(bodies.len());
        for body in bodies {
            match self.position(body, jd) {
                Ok(pos) => positions.push(pos),
                Err(e) => log::warn!("Dropping {} from chart at JD {:.5}: {}", body, jd, e),
            }
        }
        if positions.is_empty() && !bodies.is_empty() {
            return Err(EngineError::NoSamples {
                body: bodies.join(","),
                start_jd: jd,
                end_jd: jd,
            });
        }
        Ok(ChartPositions::new(positions))
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for &P {
    fn position(&self, body: &str, jd: f64) -> Result<BodyPosition, ProviderError> {
        (**self).position(body, jd)
    }
}
