/// Tag classification of a direct child of the main content region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagClass {
    /// `h1`
    TopHeading,
    /// `h2`
    SubHeading,
    /// `div`
    Block,
    /// `p`
    Paragraph,
    /// `pre`
    Preformatted,
    /// Any other element, kept by lowercase name for logging
    Other(String),
}

impl TagClass {
    pub fn from_tag_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "h1" => TagClass::TopHeading,
            "h2" => TagClass::SubHeading,
            "div" => TagClass::Block,
            "p" => TagClass::Paragraph,
            "pre" => TagClass::Preformatted,
            other => TagClass::Other(other.to_string()),
        }
    }

    pub fn tag_name(&self) -> &str {
        match self {
            TagClass::TopHeading => "h1",
            TagClass::SubHeading => "h2",
            TagClass::Block => "div",
            TagClass::Paragraph => "p",
            TagClass::Preformatted => "pre",
            TagClass::Other(name) => name,
        }
    }
}

/// One direct child of the main content container
#[derive(Debug, Clone)]
pub struct ContentNode {
    pub tag: TagClass,
    pub classes: Vec<String>,
    /// Rendered inner text
    pub text: String,
    /// Serialized inner HTML
    pub markup: String,
}

impl ContentNode {
    pub fn new(tag: TagClass, text: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            text: text.into(),
            markup: markup.into(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// A list item found under the table-of-contents container
#[derive(Debug, Clone)]
pub struct TocItem {
    pub classes: Vec<String>,
    pub text: String,
    pub expandable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_are_case_insensitive() {
        assert_eq!(TagClass::from_tag_name("H1"), TagClass::TopHeading);
        assert_eq!(TagClass::from_tag_name("pre"), TagClass::Preformatted);
        assert_eq!(TagClass::from_tag_name("Div"), TagClass::Block);
        assert_eq!(
            TagClass::from_tag_name("H3"),
            TagClass::Other("h3".to_string())
        );
    }

    #[test]
    fn class_membership() {
        let node = ContentNode::new(TagClass::Block, "", "").with_class("alert");
        assert!(node.has_class("alert"));
        assert!(!node.has_class("codeHeader"));
    }
}
