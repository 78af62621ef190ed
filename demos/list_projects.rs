//! Bitbucket REST client - project listing example
//!
//! Prints the server version, then every visible project with its
//! repositories and their default branches.
//!
//! ```bash
//! BITBUCKET_BASE_URL=https://bitbucket.example.com BITBUCKET_TOKEN=... \
//!     cargo run --example list_projects
//! ```

use bitbucket_rest_client::pagination::collect_all;
use bitbucket_rest_client::{BitbucketClient, Error, Limit, ProjectClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bitbucket_rest_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = BitbucketClient::from_env()?;

    let props = client.get_application_properties().await?;
    println!(
        "=== {} {} (build {}) ===\n",
        props.display_name().unwrap_or("Bitbucket"),
        props.version().unwrap_or("unknown"),
        props.build_number().unwrap_or("?"),
    );

    let projects = collect_all(Limit::first(100), None, |limit| client.projects().list(limit)).await?;
    println!("{} projects", projects.len());

    for project in &projects {
        println!("\n{} ({})", project.name, project.key);

        let repos = collect_all(Limit::first(100), None, |limit| {
            client.projects().repositories(&project.key, limit)
        })
        .await?;

        for repo in &repos {
            let default = match client
                .get_repository_default_branch(&project.key, &repo.slug)
                .await
            {
                Ok(Some(branch)) => branch.display_id,
                Ok(None) => "-".to_string(),
                Err(Error::Bitbucket(e)) => {
                    eprintln!("   {}: {}", repo.slug, e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let fork = if repo.is_fork() { " [fork]" } else { "" };
            println!("   {}{} default={}", repo.slug, fork, default);
        }
    }

    Ok(())
}
