//! Table-of-contents expansion.
//!
//! Collapsed tree nodes hide part of the page until they are activated. Each
//! expandable item is activated after a fixed delay; the activations run
//! concurrently and in no particular order, and [`expand_tree`] returns only
//! once every one of them has settled, so transcoding never reads a
//! half-expanded page.

use std::future::Future;

use futures::future::join_all;

use crate::config::TocConfig;
use crate::error::Result;

/// A page whose table-of-contents items can be inspected and activated.
pub trait TreeHost {
    type Item;

    /// All elements matching `selector`, in document order.
    fn tree_items(&self, selector: &str) -> impl Future<Output = Result<Vec<Self::Item>>>;

    fn classes(&self, item: &Self::Item) -> impl Future<Output = Result<Vec<String>>>;

    /// Simulate a user click on the item.
    fn activate(&self, item: &Self::Item) -> impl Future<Output = Result<()>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    pub items: usize,
    pub expandable: usize,
    pub activated: usize,
    pub failed: usize,
}

/// Activate every expandable tree item and wait for all activations.
///
/// Failing to inspect or activate a single item is logged and counted; only a
/// failure to list the items at all is returned as an error.
pub async fn expand_tree<H: TreeHost>(host: &H, config: &TocConfig) -> Result<ExpansionReport> {
    let items = host.tree_items(&config.selector).await?;

    let mut report = ExpansionReport {
        items: items.len(),
        ..ExpansionReport::default()
    };

    let mut expandable = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match host.classes(item).await {
            Ok(classes) if classes.iter().any(|c| c == &config.expandable_class) => {
                expandable.push((index, item));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(index, error = %e, "could not read tree item classes");
                report.failed += 1;
            }
        }
    }
    report.expandable = expandable.len();

    let delay = config.expand_delay();
    let activations = expandable.iter().map(|&(index, item)| async move {
        tokio::time::sleep(delay).await;
        (index, host.activate(item).await)
    });

    for (index, result) in join_all(activations).await {
        match result {
            Ok(()) => report.activated += 1,
            Err(e) => {
                tracing::warn!(index, error = %e, "tree item activation failed");
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        items = report.items,
        expandable = report.expandable,
        activated = report.activated,
        failed = report.failed,
        "expanded table of contents"
    );
    Ok(report)
}
