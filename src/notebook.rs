use crate::config::NotebookConfig;
use crate::node::{ContentNode, TagClass};
use crate::rules::{self, Action, RuleTable};

/// Mode of the most recently processed node: `Code` after a `pre`, `Prose` after anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Prose,
    Code,
}

/// Append-only notebook text with cell sentinel bookkeeping
#[derive(Debug)]
pub struct Notebook<'a> {
    config: &'a NotebookConfig,
    out: String,
    mode: Mode,
    cells: usize,
}

impl<'a> Notebook<'a> {
    /// Start a document with the prose sentinel header.
    pub fn new(config: &'a NotebookConfig) -> Self {
        let mut notebook = Self {
            config,
            out: String::new(),
            mode: Mode::Prose,
            cells: 0,
        };
        notebook.push_marker(Mode::Prose);
        notebook
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    fn push_marker(&mut self, mode: Mode) {
        let config = self.config;
        let marker = match mode {
            Mode::Prose => &config.prose_marker,
            Mode::Code => &config.code_marker,
        };
        self.out.push_str(marker);
        self.out.push_str("\n\n");
        self.mode = mode;
        self.cells += 1;
    }

    /// Record the tag of the node just processed, whether or not it emitted anything.
    pub fn settle(&mut self, tag: &TagClass) {
        self.mode = match tag {
            TagClass::Preformatted => Mode::Code,
            _ => Mode::Prose,
        };
    }

    /// Open a prose cell only when the preceding node was a code block.
    pub fn ensure_prose(&mut self) {
        if self.mode == Mode::Code {
            self.push_marker(Mode::Prose);
        }
    }

    /// Every code block gets its own cell.
    pub fn begin_code(&mut self) {
        self.push_marker(Mode::Code);
    }

    /// Append a fragment followed by a blank line.
    pub fn push_fragment(&mut self, fragment: &str) {
        self.out.push_str(fragment);
        self.out.push_str("\n\n");
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Convert content nodes into notebook text
pub fn transcode(nodes: &[ContentNode], rules: &RuleTable, config: &NotebookConfig) -> String {
    let mut notebook = Notebook::new(config);

    for node in nodes {
        emit_node(node, &rules.actions_for(node), &mut notebook);
        notebook.settle(&node.tag);
    }

    tracing::info!(
        nodes = nodes.len(),
        cells = notebook.cells(),
        "transcoded main content"
    );
    let out = notebook.finish();
    tracing::debug!(length = out.len(), "notebook text complete");
    out
}

fn emit_node(node: &ContentNode, actions: &[Action], notebook: &mut Notebook) {
    if actions.is_empty() {
        tracing::debug!(
            tag = node.tag.tag_name(),
            classes = ?node.classes,
            "skipping node"
        );
    }

    for action in actions {
        match *action {
            Action::Skip => {}
            Action::Heading(level) => {
                notebook.ensure_prose();
                let hashes = "#".repeat(level as usize);
                notebook.push_fragment(&format!("{hashes} {}", node.text));
            }
            Action::Callout => {
                notebook.ensure_prose();
                notebook.push_fragment(&format!("> {}", rules::callout_body(&node.markup)));
            }
            Action::RawMarkup => {
                notebook.ensure_prose();
                notebook.push_fragment(&rules::code_to_backticks(&node.markup));
            }
            Action::Code => {
                notebook.begin_code();
                notebook.push_fragment(&node.text);
            }
        }
    }
}
