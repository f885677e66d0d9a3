use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub toc: TocConfig,
    pub content: ContentConfig,
    pub notebook: NotebookConfig,
    pub export: ExportConfig,
    pub browser: BrowserConfig,
}

/// Where the table-of-contents tree lives and which items can be expanded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    pub selector: String,
    pub expandable_class: String,
    pub expand_delay_ms: u64,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            selector: "#title-7-1 > ul li".to_string(),
            expandable_class: "tree-item".to_string(),
            expand_delay_ms: 300,
        }
    }
}

impl TocConfig {
    pub fn expand_delay(&self) -> Duration {
        Duration::from_millis(self.expand_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub main_selector: String,
    pub code_header_class: String,
    pub alert_class: String,
    pub table_wrapper_class: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            main_selector: "main".to_string(),
            code_header_class: "codeHeader".to_string(),
            alert_class: "alert".to_string(),
            table_wrapper_class: "table-scroll-wrapper".to_string(),
        }
    }
}

/// Sentinel lines that open prose and code cells.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotebookConfig {
    pub prose_marker: String,
    pub code_marker: String,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            prose_marker: "#!markdown".to_string(),
            code_marker: "#!fsharp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Leading part of the page address dropped when naming the output file.
    pub origin_prefix: String,
    pub extension: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            origin_prefix: "https://docs.microsoft.com/en-us/dotnet/fsharp/language-reference/"
                .to_string(),
            extension: "dib".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    pub navigation_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_executable: None,
            navigation_timeout_secs: 30,
        }
    }
}

impl BrowserConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

impl Config {
    /// The bundled default configuration (keys checked by the build script).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            tracing::error!(error = %e, "bundled default config does not deserialize");
            Self::default()
        })
    }

    /// Load config from a TOML file. Missing sections and keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_default_deserializes() {
        let parsed = toml::from_str::<Config>(DEFAULT_CONFIG);
        assert!(parsed.is_ok(), "bundled config: {:?}", parsed.err());
    }

    #[test]
    fn compiled_default_matches_struct_defaults() {
        let compiled = Config::compiled_default();
        let built = Config::default();
        assert_eq!(compiled.toc.selector, built.toc.selector);
        assert_eq!(compiled.toc.expand_delay_ms, 300);
        assert_eq!(compiled.content.alert_class, built.content.alert_class);
        assert_eq!(compiled.notebook.code_marker, "#!fsharp");
        assert_eq!(compiled.export.origin_prefix.len(), 66);
        assert_eq!(compiled.export.extension, "dib");
        assert!(compiled.browser.headless);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[notebook]\ncode_marker = \"#!csharp\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.notebook.code_marker, "#!csharp");
        assert_eq!(config.notebook.prose_marker, "#!markdown");
        assert_eq!(config.content.main_selector, "main");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Path::new("/nonexistent/docs2dib.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[toc\nselector = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }
}
