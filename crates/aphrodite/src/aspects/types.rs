use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named angular relationship between two longitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Quincunx,
    SemiSextile,
    SemiSquare,
    Sesquiquadrate,
    Quintile,
    BiQuintile,
}

/// Whether an aspect kind eases or strains the bodies it joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Harmony {
    Harmonious,
    Challenging,
    Neutral,
}

impl AspectKind {
    pub const ALL: [AspectKind; 11] = [
        AspectKind::Conjunction,
        AspectKind::Opposition,
        AspectKind::Trine,
        AspectKind::Square,
        AspectKind::Sextile,
        AspectKind::Quincunx,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::Sesquiquadrate,
        AspectKind::Quintile,
        AspectKind::BiQuintile,
    ];

    /// Exact angle in degrees
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Opposition => 180.0,
            AspectKind::Trine => 120.0,
            AspectKind::Square => 90.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Quincunx => 150.0,
            AspectKind::SemiSextile => 30.0,
            AspectKind::SemiSquare => 45.0,
            AspectKind::Sesquiquadrate => 135.0,
            AspectKind::Quintile => 72.0,
            AspectKind::BiQuintile => 144.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Opposition => "opposition",
            AspectKind::Trine => "trine",
            AspectKind::Square => "square",
            AspectKind::Sextile => "sextile",
            AspectKind::Quincunx => "quincunx",
            AspectKind::SemiSextile => "semi-sextile",
            AspectKind::SemiSquare => "semi-square",
            AspectKind::Sesquiquadrate => "sesquiquadrate",
            AspectKind::Quintile => "quintile",
            AspectKind::BiQuintile => "biquintile",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "☌",
            AspectKind::Opposition => "☍",
            AspectKind::Trine => "△",
            AspectKind::Square => "□",
            AspectKind::Sextile => "⚹",
            AspectKind::Quincunx => "⚻",
            AspectKind::SemiSextile => "⚺",
            AspectKind::SemiSquare => "∠",
            AspectKind::Sesquiquadrate => "⚼",
            AspectKind::Quintile => "Q",
            AspectKind::BiQuintile => "bQ",
        }
    }

    pub fn harmony(self) -> Harmony {
        match self {
            AspectKind::Trine
            | AspectKind::Sextile
            | AspectKind::Quintile
            | AspectKind::BiQuintile => Harmony::Harmonious,
            AspectKind::Square
            | AspectKind::Opposition
            | AspectKind::SemiSquare
            | AspectKind::Sesquiquadrate
            | AspectKind::Quincunx => Harmony::Challenging,
            AspectKind::Conjunction | AspectKind::SemiSextile => Harmony::Neutral,
        }
    }

    /// Ptolemaic aspects
    pub fn is_major(self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction
                | AspectKind::Opposition
                | AspectKind::Trine
                | AspectKind::Square
                | AspectKind::Sextile
        )
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectKind {
    type Err = String;

    /// Accepts the display name, with or without the hyphen, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect();
        AspectKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().replace('-', "") == wanted)
            .ok_or_else(|| format!("Unknown aspect type: {}", s))
    }
}

/// Catalog entry for one aspect kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectTypeConfig {
    pub kind: AspectKind,
    /// Target angle (0-180)
    pub angle: f64,
    /// Orb allowed for the pair to count as "in aspect"
    #[serde(rename = "defaultOrb")]
    pub default_orb: f64,
    /// Orb inside which the aspect counts as exact
    #[serde(rename = "tightOrb")]
    pub tight_orb: f64,
    pub enabled: bool,
    pub major: bool,
}

impl AspectTypeConfig {
    pub fn new(kind: AspectKind, default_orb: f64, tight_orb: f64) -> Self {
        Self {
            kind,
            angle: kind.angle(),
            default_orb,
            tight_orb,
            enabled: true,
            major: kind.is_major(),
        }
    }
}

/// Direction of an aspect relative to exactness.
///
/// Derived from instantaneous relative speed only; acceleration and stations
/// are not modelled, so `Applying` does not promise a future exact pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMotion {
    Applying,
    Separating,
    Stationary,
}

/// A detected aspect between two bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub body1: String,
    pub body2: String,
    /// Catalog entry that matched
    pub config: AspectTypeConfig,
    /// Raw angular distance between the bodies (0-180)
    pub distance: f64,
    /// Deviation from the exact angle
    pub difference: f64,
    pub motion: AspectMotion,
    pub exact: bool,
}

impl Aspect {
    pub fn kind(&self) -> AspectKind {
        self.config.kind
    }

    pub fn involves(&self, body: &str) -> bool {
        self.body1 == body || self.body2 == body
    }

    /// Other end of the aspect, if `body` is one of its ends.
    pub fn other(&self, body: &str) -> Option<&str> {
        if self.body1 == body {
            Some(&self.body2)
        } else if self.body2 == body {
            Some(&self.body1)
        } else {
            None
        }
    }

    /// Same two bodies, in either order.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.body1 == a && self.body2 == b) || (self.body1 == b && self.body2 == a)
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let motion = match self.motion {
            AspectMotion::Applying => "applying",
            AspectMotion::Separating => "separating",
            AspectMotion::Stationary => "stationary",
        };
        write!(
            f,
            "{} {} {} ({:.2}° {}{})",
            self.body1,
            self.config.kind,
            self.body2,
            self.difference,
            motion,
            if self.exact { ", exact" } else { "" }
        )
    }
}
