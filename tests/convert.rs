use std::fs;

use docs2dib::{Config, Error, TagClass, export, html_to_notebook, toc_items};
use pretty_assertions::assert_eq;

const RECORDS_PAGE: &str = include_str!("fixtures/records.html");
const RECORDS_URL: &str =
    "https://docs.microsoft.com/en-us/dotnet/fsharp/language-reference/records";

const RECORDS_NOTEBOOK: &str = "#!markdown

# Records

Records represent simple aggregates of named values, optionally with members. They can either be structs or reference types. They are reference types by default.

## Syntax

#!fsharp

[ attributes ]
type [accessibility-modifier] typename =
    { [ mutable ] label1 : type1;
      [ mutable ] label2 : type2; ... }


#!markdown

## Remarks

In the previous syntax, <em>typename</em> is the name of the record type. Use `{ }` to delimit fields.

> Note
Records are immutable unless marked `mutable`.


<table><tbody><tr><th>Field</th><th>Type</th></tr><tr><td>`X`</td><td>float</td></tr></tbody></table>

#!fsharp

type Point = { X: float; Y: float; Z: float; }

You can initialize a record by using the labels.

";

#[test]
fn converts_documentation_page() {
    assert_eq!(html_to_notebook(RECORDS_PAGE).unwrap(), RECORDS_NOTEBOOK);
}

#[test]
fn parses_only_main_children() {
    let nodes = docs2dib::parse(RECORDS_PAGE, &Config::compiled_default()).unwrap();
    assert_eq!(nodes.len(), 14);
    assert_eq!(nodes[0].tag, TagClass::TopHeading);
    assert_eq!(nodes[13].tag, TagClass::Block);
    assert!(nodes[13].has_class("metadata"));
}

#[test]
fn finds_table_of_contents_items() {
    let items = toc_items(RECORDS_PAGE, &Config::compiled_default().toc).unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items.iter().filter(|item| item.expandable).count(), 2);
}

#[test]
fn exports_under_topic_name() {
    let config = Config::compiled_default();
    let notebook = html_to_notebook(RECORDS_PAGE).unwrap();

    let topic = export::topic_name(RECORDS_URL, &config.export.origin_prefix).unwrap();
    let name = export::file_name(&topic, &config.export.extension);
    assert_eq!(name, "records.dib");

    let dir = tempfile::tempdir().unwrap();
    let path = export::save(&notebook, dir.path(), &name).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), RECORDS_NOTEBOOK);
}

#[test]
fn custom_config_changes_markers_and_classes() {
    let config: Config = toml::from_str(
        r##"
        [content]
        main_selector = "article"
        alert_class = "callout"

        [notebook]
        code_marker = "#!csharp"
        "##,
    )
    .unwrap();

    let html = "<article><div class=\"callout\">!<p>Heads up</p></div><pre>var x = 1;</pre></article>";
    let notebook = docs2dib::html_to_notebook_with_config(html, &config).unwrap();
    assert_eq!(
        notebook,
        "#!markdown\n\n> Heads up\n\n#!csharp\n\nvar x = 1;\n\n"
    );
}

#[test]
fn page_without_main_fails() {
    let err = html_to_notebook("<html><body><p>nothing</p></body></html>").unwrap_err();
    assert!(matches!(err, Error::MissingMain(_)));
}
