use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use docs2dib::{Config, export};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOCAL_CONFIG: &str = "docs2dib.toml";

#[derive(Parser)]
#[command(name = "docs2dib")]
#[command(about = "Convert a documentation page to a .dib notebook")]
struct Cli {
    /// Page address (http or https) or a saved HTML page
    input: String,

    /// Output file (defaults to a name derived from the page address)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the derived output file
    #[arg(short = 'd', long, default_value = ".")]
    out_dir: PathBuf,

    /// Config file (defaults to ./docs2dib.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page address to name the output after when converting a saved file
    #[arg(long)]
    page_url: Option<String>,

    /// Leading part of the page address dropped from the output name
    #[arg(long)]
    origin_prefix: Option<String>,

    /// Also write the notebook to stdout
    #[arg(long)]
    print: bool,

    /// Print the notebook as a data URI instead of writing a file
    #[arg(long)]
    data_uri: bool,

    /// Skip table-of-contents expansion
    #[arg(long)]
    no_expand: bool,
}

/// A converted page and the address it came from
struct Converted {
    notebook: String,
    page_url: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None if Path::new(LOCAL_CONFIG).exists() => Config::load(Path::new(LOCAL_CONFIG))?,
        None => Config::compiled_default(),
    };
    if let Some(prefix) = &cli.origin_prefix {
        config.export.origin_prefix = prefix.clone();
    }
    Ok(config)
}

fn is_address(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

#[cfg(feature = "browser")]
async fn convert_address(cli: &Cli, config: &Config) -> Result<Converted> {
    let conversion = docs2dib::convert_live(&cli.input, config, !cli.no_expand)
        .await
        .with_context(|| format!("converting {}", cli.input))?;

    Ok(Converted {
        notebook: conversion.notebook,
        page_url: conversion.page_url.or_else(|| Some(cli.input.clone())),
    })
}

#[cfg(not(feature = "browser"))]
async fn convert_address(cli: &Cli, _config: &Config) -> Result<Converted> {
    anyhow::bail!(
        "{} is a page address but this build has no browser support; save the page and pass the file instead",
        cli.input
    )
}

fn convert_file(cli: &Cli, config: &Config) -> Result<Converted> {
    let html = fs::read_to_string(&cli.input).with_context(|| format!("reading {}", cli.input))?;

    if !cli.no_expand {
        let items = docs2dib::toc_items(&html, &config.toc)?;
        let collapsed = items.iter().filter(|item| item.expandable).count();
        tracing::info!(
            items = items.len(),
            collapsed,
            "saved page cannot be expanded, converting as rendered"
        );
    }

    Ok(Converted {
        notebook: docs2dib::html_to_notebook_with_config(&html, config)?,
        page_url: cli.page_url.clone(),
    })
}

fn output_path(cli: &Cli, config: &Config, page_url: Option<&str>) -> Result<PathBuf> {
    if let Some(output) = &cli.output {
        return Ok(output.clone());
    }

    let extension = &config.export.extension;
    let name = match page_url {
        Some(url) => export::file_name(
            &export::topic_name(url, &config.export.origin_prefix)?,
            extension,
        ),
        None => Path::new(&cli.input)
            .with_extension(extension)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .context("input has no file name to derive the output from")?,
    };
    Ok(cli.out_dir.join(name))
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    let converted = if is_address(&cli.input) {
        convert_address(&cli, &config).await?
    } else {
        convert_file(&cli, &config)?
    };

    if cli.data_uri {
        println!("{}", export::data_uri(&converted.notebook));
        return Ok(());
    }
    if cli.print {
        print!("{}", converted.notebook);
    }

    let output = output_path(&cli, &config, converted.page_url.as_deref())?;
    let dir = output.parent().unwrap_or(Path::new("."));
    let name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("output path has no file name")?;
    let path = export::save(&converted.notebook, dir, &name)?;

    if !cli.print {
        println!("Created {}", path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
