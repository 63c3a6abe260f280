use async_trait::async_trait;

use crate::provider::RelationshipProvider;
use crate::{ClassifyError, RelationshipClassification};

/// Deterministic rule-based provider for tests and offline development.
///
/// Approximates the real provider with lexical rules over the lower-cased
/// pair: equality is `similar`, a bare negation of the other statement is
/// `contradicts`, substring containment maps to `contains`/`contained-by`,
/// anything else is `unrelated`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicRelationshipProvider;

fn negates(a: &str, b: &str) -> bool {
    fn stripped(s: &str) -> Option<&str> {
        s.strip_prefix("not ").or_else(|| s.strip_prefix("no "))
    }
    stripped(a).is_some_and(|rest| rest == b) || stripped(b).is_some_and(|rest| rest == a)
}

#[async_trait]
impl RelationshipProvider for HeuristicRelationshipProvider {
    async fn classify(
        &self,
        existing: &str,
        new: &str,
    ) -> Result<RelationshipClassification, ClassifyError> {
        let existing = existing.trim().to_lowercase();
        let new = new.trim().to_lowercase();

        let label = if existing == new {
            RelationshipClassification::Similar
        } else if negates(&existing, &new) {
            RelationshipClassification::Contradicts
        } else if new.contains(existing.as_str()) {
            RelationshipClassification::Contains
        } else if existing.contains(new.as_str()) {
            RelationshipClassification::ContainedBy
        } else {
            RelationshipClassification::Unrelated
        };

        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn classify(existing: &str, new: &str) -> RelationshipClassification {
        HeuristicRelationshipProvider
            .classify(existing, new)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn equal_text_is_similar() {
        assert_eq!(
            classify("the sky is blue", "The sky is BLUE").await,
            RelationshipClassification::Similar
        );
    }

    #[tokio::test]
    async fn negation_contradicts_both_directions() {
        assert_eq!(
            classify("the api is stable", "not the api is stable").await,
            RelationshipClassification::Contradicts
        );
        assert_eq!(
            classify("not the api is stable", "the api is stable").await,
            RelationshipClassification::Contradicts
        );
    }

    #[tokio::test]
    async fn containment_follows_direction() {
        assert_eq!(
            classify("uses postgres", "the service uses postgres 16 in production").await,
            RelationshipClassification::Contains
        );
        assert_eq!(
            classify("the service uses postgres 16 in production", "uses postgres").await,
            RelationshipClassification::ContainedBy
        );
    }

    #[tokio::test]
    async fn disjoint_text_is_unrelated() {
        assert_eq!(
            classify("likes espresso", "deploys on fridays").await,
            RelationshipClassification::Unrelated
        );
    }
}
