use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::domain::HazardKind;

/// Aggregation weights per hazard. The registry enforces that the registered
/// weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub fire: f64,
    pub flood: f64,
    pub windstorm: f64,
    pub earthquake: f64,
    pub construction: f64,
    pub claims: f64,
}

impl RiskWeights {
    pub const fn weight_for(&self, hazard: HazardKind) -> f64 {
        match hazard {
            HazardKind::Fire => self.fire,
            HazardKind::Flood => self.flood,
            HazardKind::Windstorm => self.windstorm,
            HazardKind::Earthquake => self.earthquake,
            HazardKind::Construction => self.construction,
            HazardKind::Claims => self.claims,
        }
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            fire: 0.25,
            flood: 0.30,
            windstorm: 0.20,
            earthquake: 0.10,
            construction: 0.10,
            claims: 0.05,
        }
    }
}

/// Whether a geocoding failure substitutes the sentinel coordinate or aborts
/// the run. Automated deployments default to aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocodeFallback {
    Enabled,
    Disabled,
}

const DEFAULT_STP_THRESHOLD: f64 = 50.0;
const DEFAULT_GEOCODE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_EVALUATOR_TIMEOUT_MS: u64 = 10_000;

/// Tunable options for an underwriting pipeline instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingConfig {
    pub weights: RiskWeights,
    pub stp_threshold: f64,
    pub geocode_fallback: GeocodeFallback,
    pub geocode_timeout_ms: u64,
    pub evaluator_timeout_ms: u64,
}

impl UnderwritingConfig {
    pub const fn geocode_timeout(&self) -> Duration {
        Duration::from_millis(self.geocode_timeout_ms)
    }

    pub const fn evaluator_timeout(&self) -> Duration {
        Duration::from_millis(self.evaluator_timeout_ms)
    }
}

impl Default for UnderwritingConfig {
    fn default() -> Self {
        Self {
            weights: RiskWeights::default(),
            stp_threshold: DEFAULT_STP_THRESHOLD,
            geocode_fallback: GeocodeFallback::Disabled,
            geocode_timeout_ms: DEFAULT_GEOCODE_TIMEOUT_MS,
            evaluator_timeout_ms: DEFAULT_EVALUATOR_TIMEOUT_MS,
        }
    }
}
