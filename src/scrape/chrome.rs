//! Chrome DevTools implementation of [`PageDriver`]

use crate::scrape::driver::PageDriver;
use crate::scrape::types::ScrapeOptions;
use crate::{ScrapeError, ScrapeResult};
use async_trait::async_trait;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const SCROLL_TO_BOTTOM_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";
const PAGE_HEIGHT_SCRIPT: &str = "document.body.scrollHeight";

/// Builds the launch configuration for one session
///
/// Sandboxing, GPU use, and `/dev/shm` use are disabled so the browser
/// stays up under headless and containerized execution. The page viewport
/// is emulated at the window size; chromiumoxide would otherwise lay pages
/// out at 800x600.
///
/// # Arguments
///
/// * `options` - Window size, headless flag, and optional executable path
///
/// # Returns
///
/// * `Ok(BrowserConfig)` - Ready to pass to `Browser::launch`
/// * `Err(ScrapeError::Launch)` - No Chrome executable could be resolved
pub fn browser_config(options: &ScrapeOptions) -> ScrapeResult<BrowserConfig> {
    let (width, height) = options.window_size;
    let mut builder = BrowserConfig::builder()
        .window_size(width, height)
        .viewport(Viewport {
            width,
            height,
            ..Viewport::default()
        })
        .no_sandbox()
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage");

    // with_head means NOT headless
    if !options.headless {
        builder = builder.with_head();
    }

    if let Some(path) = &options.chrome_executable {
        builder = builder.chrome_executable(path);
    }

    builder.build().map_err(ScrapeError::Launch)
}

/// One isolated browser process with a single page
pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeDriver {
    /// Launches a fresh browser session
    pub async fn launch(options: &ScrapeOptions) -> ScrapeResult<Self> {
        info!("Launching browser (headless={})", options.headless);

        let config = browser_config(options)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(ScrapeError::Browser(e.to_string()));
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    async fn evaluate<T: serde::de::DeserializeOwned>(&self, script: String) -> ScrapeResult<T> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| ScrapeError::Script(e.to_string()))?
            .into_value()
            .map_err(|e| ScrapeError::Script(e.to_string()))
    }
}

#[async_trait]
impl PageDriver for ChromeDriver {
    async fn navigate(&mut self, url: &str) -> ScrapeResult<()> {
        debug!("Navigating to {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn has_element(&mut self, selector: &str) -> ScrapeResult<bool> {
        let quoted = serde_json::to_string(selector)
            .map_err(|e| ScrapeError::InvalidSelector(e.to_string()))?;
        self.evaluate(format!("document.querySelector({}) !== null", quoted))
            .await
    }

    async fn page_source(&mut self) -> ScrapeResult<String> {
        self.page
            .content()
            .await
            .map_err(|e| ScrapeError::Browser(e.to_string()))
    }

    async fn scroll_to_bottom(&mut self) -> ScrapeResult<()> {
        self.page
            .evaluate(SCROLL_TO_BOTTOM_SCRIPT)
            .await
            .map_err(|e| ScrapeError::Script(e.to_string()))?;
        Ok(())
    }

    async fn page_height(&mut self) -> ScrapeResult<u64> {
        self.evaluate(PAGE_HEIGHT_SCRIPT.to_string()).await
    }

    async fn close(&mut self) -> ScrapeResult<()> {
        debug!("Closing browser");
        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| ScrapeError::Browser(e.to_string()));

        // A browser that refused to close may never exit on its own
        if closed.is_ok() {
            if let Err(e) = self.browser.wait().await {
                warn!("Browser process did not exit cleanly: {}", e);
            }
        } else if let Some(Err(e)) = self.browser.kill().await {
            warn!("Failed to kill browser process: {}", e);
        }
        self.handler.abort();

        closed
    }
}
