use aphrodite_core::{AspectCatalog, AspectKind, RefineStrategy, SearchSettings};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Engine settings as read from `configs/aspects.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Per-aspect overrides keyed by aspect name ("trine", "semi-square", ...)
    #[serde(default)]
    pub orbs: BTreeMap<String, OrbOverride>,
    #[serde(default)]
    pub search: SearchToml,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrbOverride {
    #[serde(default)]
    pub orb: Option<f64>,
    #[serde(default)]
    pub tight_orb: Option<f64>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchToml {
    #[serde(default = "default_coarse_step")]
    pub coarse_step_days: f64,
    #[serde(default = "default_refine_step")]
    pub refine_step_days: f64,
    #[serde(default = "default_refine_window")]
    pub refine_window_days: f64,
    #[serde(default)]
    pub strategy: RefineStrategy,
    #[serde(default = "default_bisection_tolerance")]
    pub bisection_tolerance_days: f64,
}

impl Default for SearchToml {
    fn default() -> Self {
        Self {
            coarse_step_days: default_coarse_step(),
            refine_step_days: default_refine_step(),
            refine_window_days: default_refine_window(),
            strategy: RefineStrategy::default(),
            bisection_tolerance_days: default_bisection_tolerance(),
        }
    }
}

fn default_coarse_step() -> f64 {
    SearchSettings::default().coarse_step_days
}

fn default_refine_step() -> f64 {
    SearchSettings::default().refine_step_days
}

fn default_refine_window() -> f64 {
    SearchSettings::default().refine_window_days
}

fn default_bisection_tolerance() -> f64 {
    SearchSettings::default().bisection_tolerance_days
}

impl EngineConfig {
    /// Default catalog with the `[orbs.*]` overrides applied.
    pub fn build_catalog(&self) -> anyhow::Result<AspectCatalog> {
        let mut catalog = AspectCatalog::default();
        for (name, ov) in &self.orbs {
            let kind: AspectKind = name
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid [orbs.{name}] section: {e}"))?;
            // Orb first so a tight orb is checked against the new value
            if let Some(orb) = ov.orb {
                catalog
                    .set_orb(kind, orb)
                    .map_err(|e| anyhow::anyhow!("Invalid orbs.{name}.orb: {e}"))?;
            }
            if let Some(tight) = ov.tight_orb {
                catalog
                    .set_tight_orb(kind, tight)
                    .map_err(|e| anyhow::anyhow!("Invalid orbs.{name}.tight_orb: {e}"))?;
            }
            if let Some(enabled) = ov.enabled {
                catalog
                    .set_enabled(kind, enabled)
                    .map_err(|e| anyhow::anyhow!("Invalid orbs.{name}.enabled: {e}"))?;
            }
        }
        Ok(catalog)
    }

    pub fn search_settings(&self) -> anyhow::Result<SearchSettings> {
        let s = &self.search;
        for (key, value) in [
            ("coarse_step_days", s.coarse_step_days),
            ("refine_step_days", s.refine_step_days),
            ("bisection_tolerance_days", s.bisection_tolerance_days),
        ] {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("search.{key} must be a positive number of days, got {value}");
            }
        }
        if !s.refine_window_days.is_finite() || s.refine_window_days < 0.0 {
            anyhow::bail!(
                "search.refine_window_days must not be negative, got {}",
                s.refine_window_days
            );
        }
        if s.refine_step_days > s.coarse_step_days {
            anyhow::bail!(
                "search.refine_step_days ({}) is coarser than search.coarse_step_days ({})",
                s.refine_step_days,
                s.coarse_step_days
            );
        }
        Ok(SearchSettings {
            coarse_step_days: s.coarse_step_days,
            refine_step_days: s.refine_step_days,
            refine_window_days: s.refine_window_days,
            strategy: s.strategy,
            bisection_tolerance_days: s.bisection_tolerance_days,
        })
    }
}

/// Try the usual relative locations of `configs/aspects.toml`, from the
/// workspace root or from a crate directory.
pub fn read_engine_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/aspects.toml", "../../configs/aspects.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load aspects.toml from {:?}", paths);
}

pub fn parse_engine_config(text: &str) -> anyhow::Result<EngineConfig> {
    toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse aspects.toml: {e}"))
}

pub fn load_engine_config() -> anyhow::Result<EngineConfig> {
    parse_engine_config(&read_engine_toml_text()?)
}

pub fn load_engine_config_from(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_engine_config(&text)
}
