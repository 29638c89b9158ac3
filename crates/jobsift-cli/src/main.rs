use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jobsift_client::BrowserSession;
use jobsift_core::traits::RecordSink;
use jobsift_core::{CrawlConfig, CrawlService, CsvSink, SiteProfile};

#[derive(Parser)]
#[command(name = "jobsift", version, about = "Single-site job listing crawler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl paginated search results and write the listings to a CSV file
    Crawl {
        /// Search-results URL for page 1
        #[arg(
            short,
            long,
            env = "JOBSIFT_URL",
            default_value = "https://www.ibm.com/in-en/careers/search?job-search=jobs"
        )]
        url: String,

        /// Maximum number of result pages to extract
        #[arg(short, long, env = "JOBSIFT_MAX_PAGES", default_value_t = 5)]
        max_pages: u32,

        /// Company label stamped on every record
        #[arg(short, long, env = "JOBSIFT_COMPANY", default_value = "IBM")]
        company: String,

        /// Destination CSV path (overwritten on each run)
        #[arg(short, long, default_value = "ibm_jobs.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("jobsift_core=info".parse()?)
                .add_directive("jobsift_client=info".parse()?)
                .add_directive("jobsift_cli=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            url,
            max_pages,
            company,
            output,
        } => cmd_crawl(&url, max_pages, &company, &output).await?,
    }

    Ok(())
}

async fn cmd_crawl(url: &str, max_pages: u32, company: &str, output: &Path) -> Result<()> {
    let profile =
        SiteProfile::new(company, url).with_context(|| format!("Invalid base URL: {url}"))?;

    tracing::info!("Launching headless browser");
    let session = BrowserSession::launch()
        .await
        .context("Failed to launch headless browser")?;

    let service = CrawlService::new(session.clone(), profile);
    let config = CrawlConfig {
        base_url: url.to_string(),
        max_pages,
    };

    // The crawl itself never fails as a whole; whatever it collected is
    // written out after the browser is torn down.
    let outcome = service.crawl(&config).await;
    if let Err(e) = session.close().await {
        tracing::warn!("Browser teardown failed: {e}");
    }

    tracing::info!(
        pages = outcome.pages_visited,
        records = outcome.records.len(),
        "Crawl finished"
    );

    let written = CsvSink::new()
        .save(&outcome.records, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Saved {written} jobs to {}", output.display());
    Ok(())
}
