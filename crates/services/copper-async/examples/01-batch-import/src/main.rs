//! Batch import example: create a company, import its people, and follow up.
//!
//! This example demonstrates:
//! - Reading credentials from `COPPER_API_KEY` / `COPPER_USER_EMAIL`
//! - Creating records and importing many at once with partial failures
//! - Fetching related records and checking the rate-limit budget
//!
//! Run with `RUST_LOG=copper_async=debug` to see each request and retry.

use copper_async::{
    Client,
    types::{BatchOptions, Company, EntityKind, PageRequest, Person, Task},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "copper_async=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = Client::new();

    let limits = client.rate_limits().get().await?;
    println!(
        "Rate limit: {}/hour, {} left",
        limits.requests_per_hour, limits.remaining.requests_this_hour
    );

    let company = client
        .companies()
        .create(&Company::new("Example Corp").with_email_domain("example.com"))
        .await?;
    let company_id = company.meta.id.unwrap_or_default();
    println!("Created company {company_id}");

    let people: Vec<Person> = ["Ada Lovelace", "Grace Hopper", ""]
        .into_iter()
        .map(|name| {
            let mut p = Person::new(name);
            p.company_id = Some(company_id);
            p
        })
        .collect();

    let report = client
        .batch()
        .create(&people, BatchOptions::default())
        .await?;
    println!(
        "Imported {}/{} people ({} failed)",
        report.summary.succeeded, report.summary.total, report.summary.failed
    );
    for item in report.results.iter().filter(|r| !r.success) {
        if let Some(err) = &item.error {
            println!("  failed: {}", err.message);
        }
    }

    if let Some(first) = report.results.iter().find_map(|r| r.id) {
        let task = Task::new("Send welcome pack").related_to("person", first);
        let task = client.tasks().create(&task).await?;
        println!("Created task {:?}", task.meta.id);
    }

    let related = client
        .related()
        .records::<Person>(EntityKind::Companies, company_id, &PageRequest::new(25, 1))
        .await?;
    println!("Company now has {} related people", related.data.len());

    Ok(())
}
