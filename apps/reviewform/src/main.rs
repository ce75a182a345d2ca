use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reviewform::api_client::{ApiClient, TokenAuthenticator};
use reviewform::config::Config;
use reviewform::draft::ReviewDraft;
use reviewform::reference::{ReferenceDataLoader, ReferenceEvent};
use reviewform::session::ReviewSession;

#[derive(Parser, Debug)]
#[command(
    name = "reviewform",
    about = "Load a company's review form and submit employer reviews",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the reference data a company's review form needs and report what loaded
    Catalog {
        /// Company name as it appears in /company/<name>/review
        company: String,
    },
    /// Fill the review form from a JSON draft and submit it
    Submit {
        company: String,
        /// Path to the draft (camelCase fields: major, location, overallRating, pay, ...)
        #[arg(long)]
        draft: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting reviewform v{}", env!("CARGO_PKG_VERSION"));

    let client = ApiClient::new(
        config.api_base_url.clone(),
        config.access_token.clone(),
        config.request_timeout,
    );
    info!("API client initialized ({})", client.base_url());

    match cli.command {
        Command::Catalog { company } => run_catalog(client, &company, &config).await,
        Command::Submit { company, draft } => run_submit(client, &company, &draft, &config).await,
    }
}

async fn run_catalog(client: ApiClient, company: &str, config: &Config) -> Result<()> {
    let mut loader = ReferenceDataLoader::start(Arc::new(client), company, config.reference_timeout);

    while let Some(event) = loader.next_event().await {
        let resource = event.resource();
        let outcome = match event {
            ReferenceEvent::Company(result) => result.map(|c| format!("{} (id {})", c.name, c.id)),
            ReferenceEvent::Majors(result) => result.map(|m| format!("{} entries", m.len())),
            ReferenceEvent::Perks(result) => result.map(|p| format!("{} entries", p.len())),
            ReferenceEvent::PayTypes(result) => result.map(|p| format!("{} entries", p.len())),
            ReferenceEvent::CurrentUser(result) => result.map(|u| format!("user {}", u.id)),
        };
        match outcome {
            Ok(summary) => println!("{resource:<10} ready   {summary}"),
            Err(err) => println!("{resource:<10} failed  {err}"),
        }
    }

    Ok(())
}

async fn run_submit(
    client: ApiClient,
    company: &str,
    draft_path: &Path,
    config: &Config,
) -> Result<()> {
    let draft = ReviewDraft::from_file(draft_path)?;
    let auth = Arc::new(TokenAuthenticator::new(client.clone(), config.user_id));

    let mut session =
        ReviewSession::open(Arc::new(client), auth, company, config.reference_timeout)?;
    session.finish_loading().await;

    if let Some(reason) = session.reference().status.company.failure() {
        bail!("Could not load company '{company}': {reason}");
    }

    draft.fill(&mut session).await?;
    for prompt in session.field_prompts() {
        warn!("{:?}: {}", prompt.field, prompt.prompt);
    }

    if !session.can_submit() {
        bail!("Review form is not ready to submit (is the current user resolvable?)");
    }

    let route = session.submit().await?;
    println!("Review submitted; continue at {route}");
    Ok(())
}
