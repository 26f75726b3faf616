use crate::angle::{normalize_degrees, shift_longitude};
use serde::{Deserialize, Serialize};

/// Position snapshot of one body at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Body identifier: "sun", "moon", "asc", ...
    pub id: String,
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    #[serde(rename = "speedLon")]
    pub speed_lon: f64,
    /// Whether the body is retrograde
    pub retrograde: bool,
}

impl BodyPosition {
    /// Position with only longitude and speed known.
    pub fn new(id: impl Into<String>, lon: f64, speed_lon: f64) -> Self {
        Self {
            id: id.into(),
            lon: normalize_degrees(lon),
            lat: 0.0,
            distance: 0.0,
            speed_lon,
            retrograde: speed_lon < 0.0,
        }
    }

    /// Copy of this position moved along the ecliptic by `arc` degrees.
    pub fn shifted(&self, arc: f64) -> Self {
        Self {
            lon: shift_longitude(self.lon, arc),
            ..self.clone()
        }
    }
}

/// House cusps and chart axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePositions {
    /// House system name
    pub system: String,
    /// Cusps of houses 1..12, in order
    pub cusps: Vec<f64>,
    pub ascendant: f64,
    pub mc: f64,
}

impl HousePositions {
    pub fn shifted(&self, arc: f64) -> Self {
        Self {
            system: self.system.clone(),
            cusps: self.cusps.iter().map(|c| shift_longitude(*c, arc)).collect(),
            ascendant: shift_longitude(self.ascendant, arc),
            mc: shift_longitude(self.mc, arc),
        }
    }
}

/// Ordered set of body positions for one chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPositions {
    pub bodies: Vec<BodyPosition>,
    /// House positions (None if no location was used)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub houses: Option<HousePositions>,
}

impl ChartPositions {
    pub fn new(bodies: Vec<BodyPosition>) -> Self {
        Self { bodies, houses: None }
    }

    pub fn with_houses(mut self, houses: HousePositions) -> Self {
        self.houses = Some(houses);
        self
    }

    pub fn get(&self, id: &str) -> Option<&BodyPosition> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
