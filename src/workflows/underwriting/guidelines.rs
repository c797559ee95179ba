use async_trait::async_trait;

use super::providers::ProviderError;

/// Guideline-retrieval collaborator. Used only to enrich the rendered
/// report; the pipeline completes with an empty excerpt when it fails.
#[async_trait]
pub trait GuidelineRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Vec<String>, ProviderError>;
}

/// In-tree guideline library with the standard excerpt.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticGuidelineLibrary;

#[async_trait]
impl GuidelineRetriever for StaticGuidelineLibrary {
    async fn retrieve(&self, _query: &str) -> Result<Vec<String>, ProviderError> {
        Ok(vec![
            "Standard underwriting guidelines:\n\
             1. Properties in flood zones require additional inspection\n\
             2. Wood construction gets 20% higher risk factor\n\
             3. Buildings older than 30 years need structural review"
                .to_string(),
        ])
    }
}
