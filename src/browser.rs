//! Live page source backed by headless Chromium.

use chromiumoxide::browser::{Browser, BrowserConfig as CdpConfig, HeadlessMode};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::{self, JoinHandle};

use crate::config::BrowserConfig;
use crate::error::{Error, Result};
use crate::expand::TreeHost;

/// A rendered page in a browser owned by this process
pub struct LivePage {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl LivePage {
    /// Launch a browser and navigate to `url`.
    pub async fn open(url: &str, config: &BrowserConfig) -> Result<Self> {
        let mut builder = CdpConfig::builder()
            .request_timeout(config.navigation_timeout());
        builder = if config.headless {
            builder.headless_mode(HeadlessMode::default())
        } else {
            builder.with_head()
        };
        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder.build().map_err(Error::BrowserUnavailable)?;

        tracing::info!(url, headless = config.headless, "launching browser");
        let (browser, mut handler) = Browser::launch(cdp_config).await?;

        let handler = task::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    // Chrome emits CDP messages chromiumoxide cannot decode; none are fatal here
                    tracing::trace!(error = %e, "browser handler error");
                }
            }
            tracing::debug!("browser handler task completed");
        });

        let page = browser.new_page(url).await?;
        page.wait_for_navigation().await?;

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    /// The rendered document as serialized HTML.
    pub async fn html(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    /// The address the page ended up at after redirects.
    pub async fn url(&self) -> Result<Option<String>> {
        Ok(self.page.url().await?)
    }

    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        self.browser.wait().await?;
        if let Err(e) = self.handler.await {
            tracing::warn!(error = %e, "browser handler task did not shut down cleanly");
        }
        Ok(())
    }
}

impl TreeHost for LivePage {
    type Item = Element;

    async fn tree_items(&self, selector: &str) -> Result<Vec<Element>> {
        Ok(self.page.find_elements(selector).await?)
    }

    async fn classes(&self, item: &Element) -> Result<Vec<String>> {
        let class = item.attribute("class").await?;
        Ok(class
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default())
    }

    async fn activate(&self, item: &Element) -> Result<()> {
        // DOM click, so collapsed items outside the viewport still toggle
        item.call_js_fn("function() { this.click(); }", false)
            .await?;
        Ok(())
    }
}
