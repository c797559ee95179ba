use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use serde_json::json;

use super::{EvaluationError, HazardEvaluator};
use crate::workflows::underwriting::domain::{HazardAssessment, HazardKind, NormalizedProperty};
use crate::workflows::underwriting::providers::PropertyRecords;

const STRUCTURAL_REVIEW_AGE: i32 = 30;
const AGE_PENALTY: f64 = 0.5;

/// Building-condition base score with an age penalty for structures past the
/// structural-review threshold.
pub struct ConstructionRiskEvaluator {
    records: Arc<dyn PropertyRecords>,
}

impl ConstructionRiskEvaluator {
    pub fn new(records: Arc<dyn PropertyRecords>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl HazardEvaluator for ConstructionRiskEvaluator {
    fn hazard(&self) -> HazardKind {
        HazardKind::Construction
    }

    async fn evaluate(
        &self,
        property: &NormalizedProperty,
    ) -> Result<HazardAssessment, EvaluationError> {
        let condition = self.records.building_condition(&property.address).await?;

        let building_age = Utc::now().year() - property.year_built;
        let age_penalty = if building_age > STRUCTURAL_REVIEW_AGE {
            AGE_PENALTY
        } else {
            0.0
        };
        let score = condition.base_score() + age_penalty;

        Ok(HazardAssessment::bounded(score, 0.7)
            .with_factor("condition_score", condition.base_score())
            .with_factor("building_age", f64::from(building_age))
            .with_factor("age_penalty", age_penalty)
            .with_raw("condition", json!(condition.label())))
    }
}
