#[cfg(feature = "browser")]
mod browser;
mod config;
mod error;
pub mod expand;
pub mod export;
mod node;
mod notebook;
mod parser;
mod rules;

#[cfg(feature = "browser")]
pub use browser::LivePage;
pub use config::{BrowserConfig, Config, ContentConfig, ExportConfig, NotebookConfig, TocConfig};
pub use error::{Error, Result};
pub use expand::{ExpansionReport, TreeHost, expand_tree};
pub use node::{ContentNode, TagClass, TocItem};
pub use notebook::{Mode, Notebook, transcode};
pub use parser::toc_items;
pub use rules::{Action, Condition, Rule, RuleTable};

/// Parse an HTML page into the content nodes of its main region.
pub fn parse(html: &str, config: &Config) -> Result<Vec<ContentNode>> {
    parser::parse(html, &config.content)
}

/// Convert an HTML page to notebook text using default config.
pub fn html_to_notebook(html: &str) -> Result<String> {
    html_to_notebook_with_config(html, &Config::compiled_default())
}

/// Convert an HTML page to notebook text with custom config.
pub fn html_to_notebook_with_config(html: &str, config: &Config) -> Result<String> {
    let nodes = parse(html, config)?;
    let rules = RuleTable::from_config(&config.content);
    Ok(notebook::transcode(&nodes, &rules, &config.notebook))
}

/// Result of converting a live page.
#[derive(Debug)]
pub struct Conversion {
    pub notebook: String,
    /// Final page address, used to name the export
    pub page_url: Option<String>,
    pub expansion: Option<ExpansionReport>,
}

/// Open `url` in a browser, expand its table of contents, and convert it.
///
/// Expansion is awaited in full before the page is read.
#[cfg(feature = "browser")]
pub async fn convert_live(url: &str, config: &Config, expand: bool) -> Result<Conversion> {
    let page = LivePage::open(url, &config.browser).await?;

    let result = async {
        let expansion = if expand {
            Some(expand_tree(&page, &config.toc).await?)
        } else {
            None
        };
        let html = page.html().await?;
        let page_url = page.url().await?;
        Ok::<_, Error>((expansion, html, page_url))
    }
    .await;

    page.close().await?;
    let (expansion, html, page_url) = result?;

    Ok(Conversion {
        notebook: html_to_notebook_with_config(&html, config)?,
        page_url,
        expansion,
    })
}
