//! End-to-end resolution flows over the fully in-process pipeline:
//! deterministic stub embeddings, heuristic relationship classification,
//! and the bundled in-memory store.

use memcore::{in_memory_pipeline, Decision, MemoryStore, ResolveRequest, ResolverConfig};

const PROJECT: &str = "Billing-Platform";

fn request(content: &str) -> ResolveRequest {
    ResolveRequest::new(content).with_project(PROJECT)
}

#[tokio::test]
async fn memory_lifecycle_through_every_decision() {
    let (resolver, store) = in_memory_pipeline(ResolverConfig::default()).unwrap();
    let partition = Some("billingplatform");

    // 1. Nothing stored yet: first fact inserts.
    let first = resolver
        .resolve_and_commit(&request("the billing service uses postgres"))
        .await
        .unwrap();
    assert_eq!(first.decision, Decision::Insert);
    let first_id = first.memory_id.expect("insert persists a record");
    assert_eq!(store.count(partition).await.unwrap(), 1);

    // 2. Resubmitting the same fact is a duplicate; nothing stored.
    let dup = resolver
        .resolve_and_commit(&request("the billing service uses postgres"))
        .await
        .unwrap();
    assert_eq!(dup.decision, Decision::Duplicate);
    assert_eq!(dup.matched, Some(first_id));
    assert!(dup.memory_id.is_none());
    assert_eq!(store.count(partition).await.unwrap(), 1);

    // 3. A more detailed statement subsumes the stored one: supersede.
    let extended = resolver
        .resolve_and_commit(&request(
            "the billing service uses postgres 16 in production",
        ))
        .await
        .unwrap();
    assert_eq!(extended.decision, Decision::Supersede);
    let extended_id = extended.memory_id.expect("supersede persists the replacement");
    assert_eq!(store.count(partition).await.unwrap(), 1);

    let old = store.get(first_id).await.unwrap().expect("old record kept");
    assert_eq!(old.superseded_by, Some(extended_id));

    // 4. The original fact is now a subset of what is stored: redundant.
    let redundant = resolver
        .resolve_and_commit(&request("the billing service uses postgres"))
        .await
        .unwrap();
    assert_eq!(redundant.decision, Decision::Redundant);
    assert_eq!(redundant.matched, Some(extended_id));
    assert_eq!(store.count(partition).await.unwrap(), 1);

    // 5. A negation of the stored fact is a conflict; storage untouched.
    let conflict = resolver
        .resolve_and_commit(&request(
            "not the billing service uses postgres 16 in production",
        ))
        .await
        .unwrap();
    assert_eq!(conflict.decision, Decision::Conflict);
    assert_eq!(conflict.matched, Some(extended_id));
    assert!(conflict.memory_id.is_none());
    assert_eq!(store.count(partition).await.unwrap(), 1);
    let live = store.get(extended_id).await.unwrap().unwrap();
    assert!(live.is_live(), "conflict must not mutate the stored record");

    // 6. An unrelated fact coexists in the same partition.
    let unrelated = resolver
        .resolve_and_commit(&request("the coffee machine lives on floor two"))
        .await
        .unwrap();
    assert_eq!(unrelated.decision, Decision::Insert);
    assert_eq!(store.count(partition).await.unwrap(), 2);
}

#[tokio::test]
async fn partitions_are_isolated_by_normalized_project_name() {
    let (resolver, store) = in_memory_pipeline(ResolverConfig::default()).unwrap();

    resolver
        .resolve_and_commit(&request("the billing service uses postgres"))
        .await
        .unwrap();

    // Same content, different project: no candidates cross the boundary.
    let other = resolver
        .resolve_and_commit(
            &ResolveRequest::new("the billing service uses postgres").with_project("Analytics"),
        )
        .await
        .unwrap();
    assert_eq!(other.decision, Decision::Insert);
    assert_eq!(other.candidates_considered, 0);

    // Differently formatted labels of the same project share a partition.
    let same = resolver
        .resolve_and_commit(
            &ResolveRequest::new("the billing service uses postgres")
                .with_project(" billing_platform! "),
        )
        .await
        .unwrap();
    assert_eq!(same.decision, Decision::Duplicate);

    assert_eq!(store.count(Some("billingplatform")).await.unwrap(), 1);
    assert_eq!(store.count(Some("analytics")).await.unwrap(), 1);
}

#[tokio::test]
async fn every_run_reports_stage_timings() {
    let (resolver, _store) = in_memory_pipeline(ResolverConfig::default()).unwrap();

    let outcome = resolver
        .resolve_and_commit(&request("a fact worth timing"))
        .await
        .unwrap();

    let stages = &outcome.timings.stages;
    assert!(stages.contains_key(memcore::EMBED_STAGE));
    assert!(stages.contains_key(memcore::SEARCH_STAGE));
    let max_stage = stages.values().fold(0.0f64, |acc, v| acc.max(*v));
    assert!(outcome.timings.total_ms >= max_stage);
}
