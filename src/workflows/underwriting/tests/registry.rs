use std::sync::Arc;

use super::common::*;
use crate::workflows::underwriting::config::RiskWeights;
use crate::workflows::underwriting::domain::HazardKind;
use crate::workflows::underwriting::evaluators::HazardEvaluator;
use crate::workflows::underwriting::providers::ProviderSet;
use crate::workflows::underwriting::registry::{ConfigError, EvaluatorRegistry};

fn entries_with_fire_weight(
    fire_weight: f64,
) -> Vec<(HazardKind, f64, Arc<dyn HazardEvaluator>)> {
    vec![
        (
            HazardKind::Fire,
            fire_weight,
            Arc::new(ScriptedEvaluator::new(HazardKind::Fire, 1.0)),
        ),
        (
            HazardKind::Flood,
            1.0 - 0.25,
            Arc::new(ScriptedEvaluator::new(HazardKind::Flood, 1.0)),
        ),
    ]
}

#[test]
fn weights_summing_below_one_are_rejected() {
    let result = EvaluatorRegistry::new(entries_with_fire_weight(0.24));
    match result {
        Err(ConfigError::WeightSum { sum }) => assert!((sum - 0.99).abs() < 1e-9),
        other => panic!("expected weight-sum error, got {:?}", other.err()),
    }
}

#[test]
fn weights_summing_above_one_are_rejected() {
    let result = EvaluatorRegistry::new(entries_with_fire_weight(0.26));
    assert!(matches!(result, Err(ConfigError::WeightSum { .. })));
}

#[test]
fn weights_summing_to_exactly_one_are_accepted() {
    let registry =
        EvaluatorRegistry::new(entries_with_fire_weight(0.25)).expect("weights sum to 1.0");
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.weight(HazardKind::Fire), Some(0.25));
}

#[test]
fn duplicate_hazards_are_rejected() {
    let entries: Vec<(HazardKind, f64, Arc<dyn HazardEvaluator>)> = vec![
        (
            HazardKind::Claims,
            0.5,
            Arc::new(ScriptedEvaluator::new(HazardKind::Claims, 1.0)),
        ),
        (
            HazardKind::Claims,
            0.5,
            Arc::new(ScriptedEvaluator::new(HazardKind::Claims, 2.0)),
        ),
    ];

    assert!(matches!(
        EvaluatorRegistry::new(entries),
        Err(ConfigError::DuplicateHazard(HazardKind::Claims))
    ));
}

#[test]
fn standard_registry_covers_all_hazards_in_canonical_order() {
    let registry = EvaluatorRegistry::standard(&ProviderSet::reference(), &RiskWeights::default())
        .expect("default weights are valid");

    let registered: Vec<HazardKind> = registry.entries().iter().map(|entry| entry.hazard).collect();
    assert_eq!(registered, HazardKind::ordered().to_vec());

    for entry in registry.entries() {
        assert_eq!(entry.evaluator.hazard(), entry.hazard);
    }
}

#[test]
fn lookup_by_hazard_kind() {
    let registry = scripted_registry(&scenario_scores(4.0));
    assert_eq!(registry.weight(HazardKind::Claims), Some(0.05));
    assert!(registry.evaluator(HazardKind::Earthquake).is_some());
}
