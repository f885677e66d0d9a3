//! Naming and writing the finished notebook.

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::error::{Error, Result};

/// Characters JavaScript's `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const DATA_URI_PREFIX: &str = "data:application/json;charset=utf-8,";

/// Derive a topic name from a page address.
///
/// The origin prefix is removed and the remaining path separators become dots,
/// so `<prefix>types/records` becomes `types.records`. An address outside the
/// origin falls back to its URL path.
pub fn topic_name(page_url: &str, origin_prefix: &str) -> Result<String> {
    let rest = match page_url.strip_prefix(origin_prefix) {
        Some(rest) => rest.to_string(),
        None => {
            let parsed = Url::parse(page_url)?;
            tracing::warn!(
                page_url,
                origin_prefix,
                "page address is outside the configured origin, naming from its path"
            );
            parsed.path().trim_start_matches('/').to_string()
        }
    };

    let topic = rest.trim_end_matches('/').replace('/', ".");
    if topic.is_empty() {
        return Err(Error::EmptyTopic(page_url.to_string()));
    }
    Ok(topic)
}

pub fn file_name(topic: &str, extension: &str) -> String {
    format!("{topic}.{extension}")
}

/// Encode notebook text as a downloadable data URI.
pub fn data_uri(text: &str) -> String {
    format!(
        "{DATA_URI_PREFIX}{}",
        utf8_percent_encode(text, URI_COMPONENT)
    )
}

/// Write the notebook into `dir` under `name`, creating the directory if needed.
pub fn save(text: &str, dir: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, text)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "saved notebook");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PREFIX: &str = "https://docs.microsoft.com/en-us/dotnet/fsharp/language-reference/";

    #[test]
    fn topic_from_prefixed_address() {
        let url = format!("{PREFIX}compiler-directives");
        assert_eq!(topic_name(&url, PREFIX).unwrap(), "compiler-directives");
    }

    #[test]
    fn nested_paths_use_dots() {
        let url = format!("{PREFIX}functions/lambda-expressions-the-fun-keyword");
        assert_eq!(
            topic_name(&url, PREFIX).unwrap(),
            "functions.lambda-expressions-the-fun-keyword"
        );
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let url = format!("{PREFIX}active-patterns/");
        assert_eq!(topic_name(&url, PREFIX).unwrap(), "active-patterns");
    }

    #[test]
    fn foreign_address_names_from_path() {
        let topic = topic_name("https://example.com/guide/intro?x=1", PREFIX).unwrap();
        assert_eq!(topic, "guide.intro");
    }

    #[test]
    fn bare_origin_is_an_error() {
        assert!(matches!(
            topic_name(PREFIX, PREFIX),
            Err(Error::EmptyTopic(_))
        ));
    }

    #[test]
    fn malformed_address_is_an_error() {
        assert!(matches!(
            topic_name("not a url", PREFIX),
            Err(Error::Url(_))
        ));
    }

    #[test]
    fn file_name_appends_extension() {
        assert_eq!(file_name("types.records", "dib"), "types.records.dib");
    }

    #[test]
    fn data_uri_matches_encode_uri_component() {
        assert_eq!(
            data_uri("#!markdown\n\n# A (b) 'c'*!~"),
            "data:application/json;charset=utf-8,%23!markdown%0A%0A%23%20A%20(b)%20'c'*!~"
        );
        assert_eq!(data_uri("é`"), "data:application/json;charset=utf-8,%C3%A9%60");
    }

    #[test]
    fn save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("notebooks");

        let path = save("#!markdown\n\n", &out_dir, "a.dib").unwrap();
        assert_eq!(path, out_dir.join("a.dib"));
        assert_eq!(fs::read_to_string(path).unwrap(), "#!markdown\n\n");
    }
}
