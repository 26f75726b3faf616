use crate::aspects::types::{AspectKind, AspectTypeConfig};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Default orbs, in declaration order: (kind, default orb, tight orb)
const DEFAULT_ORBS: &[(AspectKind, f64, f64)] = &[
    (AspectKind::Conjunction, 8.0, 3.0),
    (AspectKind::Opposition, 8.0, 3.0),
    (AspectKind::Trine, 8.0, 3.0),
    (AspectKind::Square, 8.0, 3.0),
    (AspectKind::Sextile, 6.0, 2.0),
    (AspectKind::Quincunx, 3.0, 1.0),
    (AspectKind::SemiSextile, 3.0, 1.0),
    (AspectKind::SemiSquare, 3.0, 1.0),
    (AspectKind::Sesquiquadrate, 3.0, 1.0),
    (AspectKind::Quintile, 2.0, 0.5),
    (AspectKind::BiQuintile, 2.0, 0.5),
];

/// Ordered table of aspect types with their orbs.
///
/// Order is significant: when orb windows overlap, the entry declared first
/// wins.
///
/// Serializes as the plain list of entries; deserializing goes through
/// [`from_entries`](Self::from_entries), so a loaded catalog is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AspectTypeConfig>", into = "Vec<AspectTypeConfig>")]
pub struct AspectCatalog {
    entries: Vec<AspectTypeConfig>,
}

impl Default for AspectCatalog {
    fn default() -> Self {
        Self {
            entries: default_entries(),
        }
    }
}

impl TryFrom<Vec<AspectTypeConfig>> for AspectCatalog {
    type Error = EngineError;

    fn try_from(entries: Vec<AspectTypeConfig>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<AspectCatalog> for Vec<AspectTypeConfig> {
    fn from(catalog: AspectCatalog) -> Self {
        catalog.entries
    }
}

fn default_entries() -> Vec<AspectTypeConfig> {
    DEFAULT_ORBS
        .iter()
        .map(|(kind, orb, tight)| AspectTypeConfig::new(*kind, *orb, *tight))
        .collect()
}

fn validate_orb(kind: AspectKind, orb: f64) -> Result<(), EngineError> {
    if !orb.is_finite() || orb < 0.0 {
        return Err(EngineError::Configuration {
            kind: kind.to_string(),
            reason: format!("orb must be a non-negative number, got {}", orb),
        });
    }
    Ok(())
}

impl AspectCatalog {
    /// Build a custom catalog. Declaration order is the order of `entries`.
    pub fn from_entries(entries: Vec<AspectTypeConfig>) -> Result<Self, EngineError> {
        for (i, entry) in entries.iter().enumerate() {
            validate_orb(entry.kind, entry.default_orb)?;
            validate_orb(entry.kind, entry.tight_orb)?;
            if entry.tight_orb > entry.default_orb {
                return Err(EngineError::Configuration {
                    kind: entry.kind.to_string(),
                    reason: format!(
                        "tight orb {} exceeds default orb {}",
                        entry.tight_orb, entry.default_orb
                    ),
                });
            }
            if !(0.0..=180.0).contains(&entry.angle) {
                return Err(EngineError::Configuration {
                    kind: entry.kind.to_string(),
                    reason: format!("angle {} is outside 0-180", entry.angle),
                });
            }
            if entries[..i].iter().any(|e| e.kind == entry.kind) {
                return Err(EngineError::Configuration {
                    kind: entry.kind.to_string(),
                    reason: "declared more than once".to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Entries in declaration order, disabled ones included
    pub fn entries(&self) -> &[AspectTypeConfig] {
        &self.entries
    }

    pub fn enabled(&self) -> impl Iterator<Item = &AspectTypeConfig> {
        self.entries.iter().filter(|e| e.enabled)
    }

    pub fn entry(&self, kind: AspectKind) -> Option<&AspectTypeConfig> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Declaration rank of a kind (0 = checked first)
    pub fn rank(&self, kind: AspectKind) -> Option<usize> {
        self.entries.iter().position(|e| e.kind == kind)
    }

    /// Entry for a kind that callers explicitly asked for.
    ///
    /// Missing and disabled kinds are configuration errors, distinct from an
    /// aspect that is simply absent from a chart.
    pub fn require(&self, kind: AspectKind) -> Result<&AspectTypeConfig, EngineError> {
        match self.entry(kind) {
            Some(entry) if entry.enabled => Ok(entry),
            Some(_) => Err(EngineError::Configuration {
                kind: kind.to_string(),
                reason: "disabled in the aspect catalog".to_string(),
            }),
            None => Err(EngineError::Configuration {
                kind: kind.to_string(),
                reason: "not present in the aspect catalog".to_string(),
            }),
        }
    }

    fn entry_mut(&mut self, kind: AspectKind) -> Result<&mut AspectTypeConfig, EngineError> {
        self.entries
            .iter_mut()
            .find(|e| e.kind == kind)
            .ok_or_else(|| EngineError::Configuration {
                kind: kind.to_string(),
                reason: "not present in the aspect catalog".to_string(),
            })
    }

    pub fn orb(&self, kind: AspectKind) -> Result<f64, EngineError> {
        self.entry(kind)
            .map(|e| e.default_orb)
            .ok_or_else(|| EngineError::Configuration {
                kind: kind.to_string(),
                reason: "not present in the aspect catalog".to_string(),
            })
    }

    /// Override the "in aspect" orb. The tight orb never exceeds it.
    pub fn set_orb(&mut self, kind: AspectKind, orb: f64) -> Result<(), EngineError> {
        validate_orb(kind, orb)?;
        let entry = self.entry_mut(kind)?;
        entry.default_orb = orb;
        entry.tight_orb = entry.tight_orb.min(orb);
        Ok(())
    }

    pub fn set_tight_orb(&mut self, kind: AspectKind, orb: f64) -> Result<(), EngineError> {
        validate_orb(kind, orb)?;
        let entry = self.entry_mut(kind)?;
        if orb > entry.default_orb {
            return Err(EngineError::Configuration {
                kind: kind.to_string(),
                reason: format!(
                    "tight orb {} exceeds default orb {}",
                    orb, entry.default_orb
                ),
            });
        }
        entry.tight_orb = orb;
        Ok(())
    }

    pub fn set_enabled(&mut self, kind: AspectKind, enabled: bool) -> Result<(), EngineError> {
        self.entry_mut(kind)?.enabled = enabled;
        Ok(())
    }

    /// Restore the default table
    pub fn reset(&mut self) {
        self.entries = default_entries();
    }

    pub fn with_orb(mut self, kind: AspectKind, orb: f64) -> Result<Self, EngineError> {
        self.set_orb(kind, orb)?;
        Ok(self)
    }

    /// Catalog with the given kind disabled
    pub fn without(mut self, kind: AspectKind) -> Result<Self, EngineError> {
        self.set_enabled(kind, false)?;
        Ok(self)
    }

    /// Only the Ptolemaic aspects stay enabled
    pub fn major_only(mut self) -> Self {
        for entry in &mut self.entries {
            entry.enabled = entry.enabled && entry.major;
        }
        self
    }

    /// Widest orb among enabled entries
    pub fn max_orb(&self) -> f64 {
        self.enabled().map(|e| e.default_orb).fold(0.0, f64::max)
    }
}
