use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw caller-supplied property attributes. Immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    pub property_id: String,
    pub property_type: PropertyType,
    pub address: String,
    pub construction_type: ConstructionType,
    pub year_built: i32,
    pub floors: u16,
    pub has_basement: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Residential,
    Commercial,
    Industrial,
}

/// Construction classes recognized by the rating tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionType {
    Wood,
    Concrete,
    Steel,
    Masonry,
    Unknown,
}

impl ConstructionType {
    /// Vulnerability multiplier applied by fire scoring.
    pub const fn risk_factor(self) -> f64 {
        match self {
            ConstructionType::Wood => 1.2,
            ConstructionType::Concrete => 0.8,
            ConstructionType::Steel => 0.7,
            ConstructionType::Masonry => 1.0,
            ConstructionType::Unknown => 1.1,
        }
    }
}

/// Geographic point in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Validated input plus the derived fields evaluators consume.
/// Built once per run; never mutated after the geocode stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedProperty {
    pub property_id: String,
    pub property_type: PropertyType,
    pub address: String,
    pub construction_type: ConstructionType,
    pub year_built: i32,
    pub floors: u16,
    pub has_basement: bool,
    pub coordinates: Coordinates,
    pub construction_factor: f64,
}

impl NormalizedProperty {
    pub fn from_input(input: PropertyInput, coordinates: Coordinates) -> Self {
        let construction_factor = input.construction_type.risk_factor();
        Self {
            property_id: input.property_id,
            property_type: input.property_type,
            address: input.address,
            construction_type: input.construction_type,
            year_built: input.year_built,
            floors: input.floors,
            has_basement: input.has_basement,
            coordinates,
            construction_factor,
        }
    }
}

/// Hazard dimensions contributing to the composite score.
///
/// Declaration order is the canonical evaluation and reporting order, so
/// registry iteration and `BTreeMap` iteration agree everywhere.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    Fire,
    Windstorm,
    Flood,
    Earthquake,
    Construction,
    Claims,
}

impl HazardKind {
    pub const fn ordered() -> [HazardKind; 6] {
        [
            HazardKind::Fire,
            HazardKind::Windstorm,
            HazardKind::Flood,
            HazardKind::Earthquake,
            HazardKind::Construction,
            HazardKind::Claims,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            HazardKind::Fire => "fire",
            HazardKind::Windstorm => "windstorm",
            HazardKind::Flood => "flood",
            HazardKind::Earthquake => "earthquake",
            HazardKind::Construction => "construction",
            HazardKind::Claims => "claims",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            HazardKind::Fire => "Fire",
            HazardKind::Windstorm => "Windstorm",
            HazardKind::Flood => "Flood",
            HazardKind::Earthquake => "Earthquake",
            HazardKind::Construction => "Construction",
            HazardKind::Claims => "Claims",
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Native hazard score scale; every assessment is clamped into this range.
pub const HAZARD_SCALE_MAX: f64 = 5.0;

/// One evaluator's bounded output. Created by exactly one evaluator and
/// read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardAssessment {
    pub score: f64,
    pub confidence: f64,
    pub factors: BTreeMap<String, f64>,
    pub raw_data: BTreeMap<String, serde_json::Value>,
}

impl HazardAssessment {
    /// Construct an assessment with `score` clamped into [0, 5] and
    /// `confidence` clamped into [0, 1]. Evaluators go through this so the
    /// pipeline never has to re-check the bound.
    pub fn bounded(score: f64, confidence: f64) -> Self {
        Self {
            score: score.clamp(0.0, HAZARD_SCALE_MAX),
            confidence: confidence.clamp(0.0, 1.0),
            factors: BTreeMap::new(),
            raw_data: BTreeMap::new(),
        }
    }

    pub fn with_factor(mut self, name: &str, value: f64) -> Self {
        self.factors.insert(name.to_string(), value);
        self
    }

    pub fn with_raw(mut self, name: &str, value: serde_json::Value) -> Self {
        self.raw_data.insert(name.to_string(), value);
        self
    }
}

/// Per-hazard scores keyed by kind. Missing entries are legal (a failed
/// evaluator) and read as 0.0, which is an explicit policy rather than an
/// omission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreSet(BTreeMap<HazardKind, f64>);

impl RiskScoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hazard: HazardKind, score: f64) {
        self.0.insert(hazard, score);
    }

    /// Score for a hazard, defaulting to 0.0 when the evaluator never
    /// produced one.
    pub fn score(&self, hazard: HazardKind) -> f64 {
        self.0.get(&hazard).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, hazard: HazardKind) -> bool {
        self.0.contains_key(&hazard)
    }

    pub fn iter(&self) -> impl Iterator<Item = (HazardKind, f64)> + '_ {
        self.0.iter().map(|(kind, score)| (*kind, *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(HazardKind, f64)> for RiskScoreSet {
    fn from_iter<I: IntoIterator<Item = (HazardKind, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Routing outcome of the underwriting decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionStatus {
    #[serde(rename = "STP")]
    Stp,
    Referred,
}

impl DecisionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionStatus::Stp => "STP",
            DecisionStatus::Referred => "Referred",
        }
    }
}

/// Underwriting decision derived solely from the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub status: DecisionStatus,
    pub reason: String,
}

/// Audit record for a hazard whose evaluator failed or timed out. The
/// hazard's contribution defaults to 0 in the composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationFailure {
    pub hazard: HazardKind,
    pub cause: String,
}

/// Everything a completed run produces. Present even when individual hazard
/// evaluations failed; `evaluation_failures` distinguishes a fully-informed
/// decision from a degraded one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub property_id: String,
    pub coordinates: Coordinates,
    pub risk_scores: RiskScoreSet,
    pub assessments: BTreeMap<HazardKind, HazardAssessment>,
    pub composite_score: f64,
    pub decision: Decision,
    pub evaluation_failures: Vec<EvaluationFailure>,
    pub report: String,
}
