use crate::extract::extract_listings;
use crate::models::JobRecord;
use crate::profile::SiteProfile;
use crate::traits::PageSession;

/// Externally variable knobs of a run. Everything else — timeouts, settle
/// delays, selectors, sentinel text — is fixed.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Search-results URL for page 1.
    pub base_url: String,
    /// Upper bound on result pages to extract.
    pub max_pages: u32,
}

/// What a finished run produced. A crawl never fails as a whole: fatal page
/// loads end it early and whatever was collected up to that point survives.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub records: Vec<JobRecord>,
    /// Pages that were fetched and handed to the extractor.
    pub pages_visited: u32,
}

/// Orchestrates the traversal: fetch → extract listings → advance, bounded
/// by the page budget and ended early by an empty page, a missing or
/// disabled next control, or a failed page load.
///
/// Generic over the browser session via [`PageSession`], so tests drive it
/// with a scripted mock instead of a real Chromium.
pub struct CrawlService<S: PageSession> {
    session: S,
    profile: SiteProfile,
}

impl<S: PageSession> CrawlService<S> {
    pub fn new(session: S, profile: SiteProfile) -> Self {
        Self { session, profile }
    }

    /// Run the traversal to completion and return everything collected.
    ///
    /// Page 1 is reached by navigating to the base URL; every later page is
    /// reached by clicking the next control, so the driver reads the tab's
    /// current content via [`PageSession::snapshot`] instead of re-navigating.
    pub async fn crawl(&self, config: &CrawlConfig) -> CrawlOutcome {
        let mut records: Vec<JobRecord> = Vec::new();
        let mut pages_visited = 0u32;
        let mut page_num = 1u32;

        while page_num <= config.max_pages {
            tracing::info!(page = page_num, "Scraping results page");

            let loaded = if page_num == 1 {
                self.session.open(&config.base_url).await
            } else {
                self.session.snapshot().await
            };
            let html = match loaded {
                Ok(html) => html,
                // The single fatal condition of the loop: keep what we have.
                Err(e) => {
                    tracing::error!(page = page_num, "Error loading page: {e}");
                    break;
                }
            };
            pages_visited += 1;

            let extracted = extract_listings(&html, &self.profile);
            if extracted.is_empty() {
                tracing::info!("No job listings found.");
                break;
            }

            let found = extracted.len();
            let before = records.len();
            records.extend(extracted.into_iter().filter(JobRecord::has_title));
            let kept = records.len() - before;
            if kept < found {
                tracing::warn!(
                    page = page_num,
                    skipped = found - kept,
                    "Skipped listings without a title"
                );
            }
            tracing::info!(page = page_num, kept, "Extracted listings");

            match self.session.advance().await {
                Ok(true) => page_num += 1,
                Ok(false) => break,
                // Missing/stale control is indistinguishable from the true
                // last page; log and end like the end-of-results case.
                Err(e) => {
                    tracing::info!("No more pages found ({e}).");
                    break;
                }
            }
        }

        CrawlOutcome {
            records,
            pages_visited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::testutil::MockSession;

    fn ibm_profile() -> SiteProfile {
        SiteProfile {
            company: "IBM".to_string(),
            origin: "https://www.ibm.com".to_string(),
        }
    }

    fn config(max_pages: u32) -> CrawlConfig {
        CrawlConfig {
            base_url: "https://www.ibm.com/in-en/careers/search?job-search=jobs".to_string(),
            max_pages,
        }
    }

    fn card(title: &str, href: &str) -> String {
        format!(
            r#"<div class="bx--card-group__cards__col">
                 <div class="bx--card">
                   <h4 class="bx--card__heading">{title}</h4>
                   <a class="bx--card__wrapper" href="{href}"></a>
                 </div>
               </div>"#
        )
    }

    fn listing_page(titles: &[(&str, &str)]) -> String {
        let cards: String = titles.iter().map(|(t, h)| card(t, h)).collect();
        format!("<html><body>{cards}</body></html>")
    }

    #[tokio::test]
    async fn one_page_with_disabled_next_control() {
        let page = listing_page(&[("Engineer", "/jobs/1"), ("Analyst", "/jobs/2")]);
        let session = MockSession::builder()
            .page(Ok(page))
            .advance(Ok(false))
            .build();
        let service = CrawlService::new(session.clone(), ibm_profile());

        let outcome = service.crawl(&config(5)).await;

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].title.as_deref(), Some("Engineer"));
        assert_eq!(outcome.records[1].title.as_deref(), Some("Analyst"));
        assert_eq!(outcome.pages_visited, 1);
        // Only page 1 is reached by URL.
        assert_eq!(
            session.opened_urls(),
            vec!["https://www.ibm.com/in-en/careers/search?job-search=jobs"]
        );
    }

    #[tokio::test]
    async fn job_link_and_id_from_relative_href() {
        let page = listing_page(&[("Engineer", "/jobs/123")]);
        let session = MockSession::builder()
            .page(Ok(page))
            .advance(Ok(false))
            .build();
        let service = CrawlService::new(session, ibm_profile());

        let outcome = service.crawl(&config(5)).await;

        let record = &outcome.records[0];
        assert_eq!(
            record.job_link.as_deref(),
            Some("https://www.ibm.com/jobs/123")
        );
        assert_eq!(record.job_id.as_deref(), Some("123"));
    }

    #[tokio::test]
    async fn titleless_listings_are_excluded() {
        let page = format!(
            "<html><body>{}{}</body></html>",
            card("Engineer", "/jobs/1"),
            r#"<div class="bx--card-group__cards__col"><div class="bx--card"></div></div>"#
        );
        let session = MockSession::builder()
            .page(Ok(page))
            .advance(Ok(false))
            .build();
        let service = CrawlService::new(session, ibm_profile());

        let outcome = service.crawl(&config(5)).await;

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].title.as_deref(), Some("Engineer"));
    }

    #[tokio::test]
    async fn traversal_respects_max_pages() {
        // Three pages available, budget of two: the third is never read even
        // though the control keeps advancing.
        let session = MockSession::builder()
            .page(Ok(listing_page(&[("One", "/jobs/1")])))
            .page(Ok(listing_page(&[("Two", "/jobs/2")])))
            .page(Ok(listing_page(&[("Three", "/jobs/3")])))
            .advance(Ok(true))
            .advance(Ok(true))
            .advance(Ok(true))
            .build();
        let service = CrawlService::new(session.clone(), ibm_profile());

        let outcome = service.crawl(&config(2)).await;

        assert_eq!(outcome.pages_visited, 2);
        let titles: Vec<_> = outcome
            .records
            .iter()
            .map(|r| r.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn failed_first_load_yields_empty_outcome() {
        let session = MockSession::builder()
            .page(Err(AppError::Timeout(15)))
            .build();
        let service = CrawlService::new(session.clone(), ibm_profile());

        let outcome = service.crawl(&config(5)).await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.pages_visited, 0);
        assert_eq!(session.advance_calls(), 0);
    }

    #[tokio::test]
    async fn failed_later_load_keeps_earlier_records() {
        let session = MockSession::builder()
            .page(Ok(listing_page(&[("Engineer", "/jobs/1")])))
            .page(Err(AppError::Navigation("net::ERR_FAILED".into())))
            .advance(Ok(true))
            .build();
        let service = CrawlService::new(session, ibm_profile());

        let outcome = service.crawl(&config(5)).await;

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.pages_visited, 1);
    }

    #[tokio::test]
    async fn empty_page_stops_before_advancing() {
        let session = MockSession::builder()
            .page(Ok("<html><body>nothing here</body></html>".to_string()))
            .build();
        let service = CrawlService::new(session.clone(), ibm_profile());

        let outcome = service.crawl(&config(5)).await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.pages_visited, 1);
        assert_eq!(session.advance_calls(), 0);
    }

    #[tokio::test]
    async fn advance_error_ends_run_like_last_page() {
        let session = MockSession::builder()
            .page(Ok(listing_page(&[("Engineer", "/jobs/1")])))
            .advance(Err(AppError::Pagination("stale element".into())))
            .build();
        let service = CrawlService::new(session, ibm_profile());

        let outcome = service.crawl(&config(5)).await;

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.pages_visited, 1);
    }
}
