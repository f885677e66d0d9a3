use scraper::{ElementRef, Html, Selector};

use crate::config::{ContentConfig, TocConfig};
use crate::error::{Error, Result};
use crate::node::{ContentNode, TagClass, TocItem};

fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Selector {
        selector: selector.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Collapse whitespace runs the way a browser's `innerText` does outside `pre`
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn to_content_node(element: ElementRef) -> ContentNode {
    let tag = TagClass::from_tag_name(element.value().name());
    let raw_text: String = element.text().collect();
    let text = match tag {
        TagClass::Preformatted => raw_text,
        _ => collapse_whitespace(&raw_text),
    };

    ContentNode {
        tag,
        classes: element.value().classes().map(str::to_string).collect(),
        text,
        markup: element.inner_html(),
    }
}

/// Parse an HTML document into the direct element children of its main content region
pub fn parse(html: &str, config: &ContentConfig) -> Result<Vec<ContentNode>> {
    let main_selector = compile_selector(&config.main_selector)?;
    let document = Html::parse_document(html);

    let main = document
        .select(&main_selector)
        .next()
        .ok_or_else(|| Error::MissingMain(config.main_selector.clone()))?;

    // Text and comment nodes directly under main are not content nodes
    let nodes: Vec<ContentNode> = main
        .children()
        .filter_map(ElementRef::wrap)
        .map(to_content_node)
        .collect();

    tracing::debug!(count = nodes.len(), "collected main content nodes");
    Ok(nodes)
}

/// List the table-of-contents items matched by the configured selector
pub fn toc_items(html: &str, config: &TocConfig) -> Result<Vec<TocItem>> {
    let selector = compile_selector(&config.selector)?;
    let document = Html::parse_document(html);

    let items = document
        .select(&selector)
        .map(|item| {
            let classes: Vec<String> = item.value().classes().map(str::to_string).collect();
            let expandable = classes.iter().any(|c| c == &config.expandable_class);
            TocItem {
                classes,
                text: collapse_whitespace(&item.text().collect::<String>()),
                expandable,
            }
        })
        .collect();

    Ok(items)
}
