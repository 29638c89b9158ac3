/// Smoke-test for `BrowserSession`.
///
/// Launches a headless Chromium, opens the IBM careers search, and reports
/// how many listing cards the extractor finds on page 1.
///
/// Run with:
///   cargo run --example session_smoke
use jobsift_client::BrowserSession;
use jobsift_core::extract::extract_listings;
use jobsift_core::profile::SiteProfile;
use jobsift_core::traits::PageSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let url = "https://www.ibm.com/in-en/careers/search?job-search=jobs";
    let profile = SiteProfile::new("IBM", url)?;

    println!("Launching headless browser…");
    let session = BrowserSession::launch().await?;

    println!("Opening {url} …");
    let html = session.open(url).await?;
    let records = extract_listings(&html, &profile);

    session.close().await?;

    assert!(
        !records.is_empty(),
        "Expected at least one listing card on page 1"
    );
    println!(
        "OK — {} bytes of rendered HTML, {} listings on page 1",
        html.len(),
        records.len()
    );
    for record in records.iter().take(5) {
        println!("  {:?} ({:?})", record.title, record.job_id);
    }
    Ok(())
}
