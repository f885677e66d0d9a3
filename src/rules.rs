use std::sync::LazyLock;

use regex::Regex;

use crate::config::ContentConfig;
use crate::node::{ContentNode, TagClass};

/// Matches an opening paragraph tag up to the first `>`.
/// Also matches other tags that begin with `<p`, such as `<pre>`.
static PARAGRAPH_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p.*?>").expect("BUG: hardcoded paragraph tag pattern is invalid")
});

/// What to emit for a matched node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Skip,
    /// `#`-prefixed line built from the node's text
    Heading(u8),
    /// Quoted line built from the node's markup
    Callout,
    /// Markup with inline code converted to backticks
    RawMarkup,
    /// Verbatim text in a code cell
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Always,
    HasClass(String),
}

impl Condition {
    fn matches(&self, node: &ContentNode) -> bool {
        match self {
            Condition::Always => true,
            Condition::HasClass(class) => node.has_class(class),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub tag: TagClass,
    pub when: Condition,
    pub action: Action,
}

impl Rule {
    fn new(tag: TagClass, when: Condition, action: Action) -> Self {
        Self { tag, when, action }
    }
}

/// Ordered rule rows.
///
/// Every matching row contributes its action in table order, until a `Skip`
/// row matches; a `Skip` row ends evaluation for that node.
#[derive(Debug, Clone)]
pub struct RuleTable {
    pub rules: Vec<Rule>,
}

impl RuleTable {
    pub fn from_config(config: &ContentConfig) -> Self {
        use Action::*;
        use Condition::*;

        let has = |class: &str| HasClass(class.to_string());

        Self {
            rules: vec![
                Rule::new(TagClass::TopHeading, Always, Heading(1)),
                Rule::new(TagClass::SubHeading, Always, Heading(2)),
                Rule::new(TagClass::Block, has(&config.code_header_class), Skip),
                Rule::new(TagClass::Block, has(&config.alert_class), Callout),
                Rule::new(TagClass::Block, has(&config.table_wrapper_class), RawMarkup),
                Rule::new(TagClass::Block, Always, Skip),
                Rule::new(TagClass::Paragraph, Always, RawMarkup),
                Rule::new(TagClass::Preformatted, Always, Code),
            ],
        }
    }

    /// Actions to apply to `node`, in order. Empty when the node is skipped.
    pub fn actions_for(&self, node: &ContentNode) -> Vec<Action> {
        self.rules
            .iter()
            .filter(|rule| rule.tag == node.tag && rule.when.matches(node))
            .map(|rule| rule.action)
            .take_while(|action| *action != Action::Skip)
            .collect()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::from_config(&ContentConfig::default())
    }
}

/// Replace inline code tags with backticks.
///
/// Only the bare `<code>` and `</code>` tags are converted; a `<code>` carrying
/// attributes is left as markup.
pub fn code_to_backticks(markup: &str) -> String {
    markup.replace("<code>", "`").replace("</code>", "`")
}

/// Remove `<p…>` opening tags and `</p>` closing tags.
pub fn strip_paragraph_tags(markup: &str) -> String {
    PARAGRAPH_OPEN.replace_all(markup, "").replace("</p>", "")
}

/// Drop the first character (one Unicode scalar value).
///
/// For a leading character outside the Basic Multilingual Plane this drops the
/// whole character, where a UTF-16 `substring(1)` would leave half a surrogate pair.
pub fn drop_first_char(markup: &str) -> &str {
    let mut chars = markup.chars();
    chars.next();
    chars.as_str()
}

/// Render callout markup as a quoted line body
pub fn callout_body(markup: &str) -> String {
    strip_paragraph_tags(&code_to_backticks(drop_first_char(markup)))
}
