use memcore::{in_memory_pipeline, MemoryStore, ResolveRequest, ResolverConfig};

/// Walks a handful of memory submissions through the in-process pipeline and
/// prints each decision. Useful as a smoke test and a demo of the policy.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (resolver, store) = in_memory_pipeline(ResolverConfig::default())?;

    let submissions = [
        "the billing service uses postgres",
        "the billing service uses postgres",
        "the billing service uses postgres 16 with read replicas",
        "not the billing service uses postgres 16 with read replicas",
        "deploys happen every friday afternoon",
    ];

    for content in submissions {
        let outcome = resolver
            .resolve_and_commit(&ResolveRequest::new(content).with_project("demo"))
            .await?;
        println!(
            "{:<62} -> {:?} ({} candidates, {:.2} ms)",
            content,
            outcome.decision,
            outcome.candidates_considered,
            outcome.timings.total_ms
        );
    }

    println!(
        "live records in demo partition: {}",
        store.count(Some("demo")).await?
    );
    Ok(())
}
