use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use jobsift_core::error::AppError;
use jobsift_core::profile::{MARKER_SELECTOR, NEXT_BUTTON_SELECTOR};
use jobsift_core::traits::PageSession;

/// Upper bound on waiting for the page-loaded marker.
const MARKER_TIMEOUT: Duration = Duration::from_secs(15);
/// Extra wait after navigation or a pagination click so lazily rendered
/// content can settle. A heuristic, not a guarantee.
const SETTLE_DELAY: Duration = Duration::from_secs(2);
const MARKER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Headless-browser session over Chromium via the Chrome DevTools Protocol.
///
/// One Chromium process and one tab serve the whole run; pagination happens
/// in place by clicking the site's next-page control, so the tab's
/// navigation state is shared across all [`PageSession`] calls. Clones share
/// the same process and tab.
///
/// # Example
///
/// ```rust,no_run
/// use jobsift_client::BrowserSession;
/// use jobsift_core::traits::PageSession;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let session = BrowserSession::launch().await?;
/// let html = session.open("https://www.ibm.com/in-en/careers/search").await?;
/// println!("{}", &html[..200]);
/// session.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BrowserSession {
    browser: Arc<tokio::sync::Mutex<Browser>>,
    page: Page,
}

impl BrowserSession {
    /// Launches a headless Chromium and opens the single tab used for the
    /// whole run.
    ///
    /// Requires a Chromium / Chrome binary reachable via `$PATH` (or the
    /// default locations checked by `chromiumoxide`).
    pub async fn launch() -> Result<Self, AppError> {
        let mut builder = BrowserConfig::builder();
        builder = builder.no_sandbox().disable_default_args();

        // Snap-packaged Chromium exposes a wrapper that rejects standard
        // Chrome CLI flags (--headless, --disable-gpu, …).  We try to
        // locate the *real* binary buried inside the snap, falling back
        // to any other Chrome/Chromium the user may have installed.
        if let Some(bin) = Self::find_chrome_binary() {
            tracing::info!("Using Chrome binary: {}", bin.display());
            builder = builder.chrome_executable(bin);
        }

        let config = builder
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-popup-blocking")
            .arg("--disable-translate")
            .arg("--no-first-run")
            .build()
            .map_err(|e| AppError::Browser(format!("Browser config error: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AppError::Browser(format!("Failed to launch browser: {e}")))?;

        // The CDP handler must be polled continuously for the connection to work.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    tracing::warn!("Browser CDP handler error: {event:?}");
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| AppError::Browser(format!("Failed to open tab: {e}")))?;

        Ok(Self {
            browser: Arc::new(tokio::sync::Mutex::new(browser)),
            page,
        })
    }

    /// Shut the browser process down. Call exactly once, after the crawl,
    /// on every exit path.
    pub async fn close(&self) -> Result<(), AppError> {
        let mut browser = self.browser.lock().await;
        browser
            .close()
            .await
            .map_err(|e| AppError::Browser(format!("Failed to close browser: {e}")))?;
        let _ = browser.wait().await;
        Ok(())
    }

    /// Tries to locate the real Chrome/Chromium binary.
    ///
    /// Checks an explicit `CHROME_BIN` override first, then the snap and
    /// flatpak install paths whose wrappers strip headless flags, then
    /// well-known system locations. Returning `None` lets `chromiumoxide`
    /// do its own lookup.
    fn find_chrome_binary() -> Option<PathBuf> {
        if let Ok(p) = std::env::var("CHROME_BIN") {
            let path = PathBuf::from(&p);
            if path.exists() {
                return Some(path);
            }
        }

        let candidates: &[&str] = &[
            // Snap (Ubuntu default)
            "/snap/chromium/current/usr/lib/chromium-browser/chrome",
            // Flatpak
            "/var/lib/flatpak/exports/bin/org.chromium.Chromium",
            // Common apt / manual installs
            "/usr/bin/google-chrome-stable",
            "/usr/bin/google-chrome",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
        ];

        candidates.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Poll for the page-loaded marker until it appears or the wait bound
    /// elapses.
    async fn wait_for_marker(&self) -> Result<(), AppError> {
        let waited = tokio::time::timeout(MARKER_TIMEOUT, async {
            loop {
                if self.page.find_element(MARKER_SELECTOR).await.is_ok() {
                    return;
                }
                tokio::time::sleep(MARKER_POLL_INTERVAL).await;
            }
        })
        .await;

        waited.map_err(|_| AppError::Timeout(MARKER_TIMEOUT.as_secs()))
    }

    async fn rendered_html(&self) -> Result<String, AppError> {
        self.page
            .content()
            .await
            .map_err(|e| AppError::Navigation(format!("Failed to read page content: {e}")))
    }
}

impl PageSession for BrowserSession {
    async fn open(&self, url: &str) -> Result<String, AppError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::Navigation(format!("Failed to navigate to {url}: {e}")))?;

        self.wait_for_marker().await?;
        tokio::time::sleep(SETTLE_DELAY).await;
        self.rendered_html().await
    }

    async fn snapshot(&self) -> Result<String, AppError> {
        // The pagination click that brought us here already waited the
        // settle delay; only the marker needs re-checking.
        self.wait_for_marker().await?;
        self.rendered_html().await
    }

    async fn advance(&self) -> Result<bool, AppError> {
        let button = match self.page.find_element(NEXT_BUTTON_SELECTOR).await {
            Ok(button) => button,
            Err(_) => {
                tracing::info!("No next-page control on this page");
                return Ok(false);
            }
        };

        let disabled = button
            .attribute("disabled")
            .await
            .map_err(|e| AppError::Pagination(format!("Failed to inspect next control: {e}")))?;
        if disabled.is_some() {
            tracing::info!("Next-page control is disabled");
            return Ok(false);
        }

        button
            .click()
            .await
            .map_err(|e| AppError::Pagination(format!("Failed to click next control: {e}")))?;
        tokio::time::sleep(SETTLE_DELAY).await;
        Ok(true)
    }
}
