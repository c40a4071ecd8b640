//! Convert a saved Tencent Docs page to Markdown.
//!
//! Reads the page HTML from a file or stdin, runs one conversion pass and
//! writes the Markdown to stdout or a file. Logs go to stderr so stdout stays
//! clean Markdown.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use docmark::{
    parse_html, suggested_file_name, ConversionResult, DocMarkService, Html, ImageRegistry,
    MindMapMode, Options,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docmark")]
#[command(about = "Convert a rendered Tencent Docs page to Markdown")]
#[command(version)]
struct Cli {
    /// Saved page HTML; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Write Markdown here instead of stdout; a directory gets a file named
    /// after the page title
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Options as a JSON file; flags override its values
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Mind-map handling: skip, simple or placeholder
    #[arg(long, value_name = "MODE")]
    mind_map: Option<String>,

    /// Selector of the content root
    #[arg(long, value_name = "SELECTOR")]
    root: Option<String>,

    /// Title used when the page has none
    #[arg(long)]
    title: Option<String>,

    /// Do not prefix the output with the page title
    #[arg(long)]
    no_title: bool,

    /// Link images at local placeholder paths for a later download
    #[arg(long)]
    collect_images: bool,

    /// Write the collected images as JSON (implies --collect-images)
    #[arg(long, value_name = "PATH")]
    images_manifest: Option<PathBuf>,

    /// Print the result as JSON: {"success": .., "markdown"|"error": ..}
    #[arg(long)]
    json: bool,

    /// Show debug logs (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let options = load_options(&cli)?;
    let html = read_input(cli.input.as_deref())?;
    let document = parse_html(&html);
    let service = DocMarkService::with_options(options);

    let pending = service.pending_images(&document);
    if pending > 0 {
        tracing::warn!(pending, "page saved while images were still loading");
    }

    let collect = cli.collect_images || cli.images_manifest.is_some();
    let mut images = ImageRegistry::new();
    let result = if collect {
        service.parse_with_images(&document, &mut images)
    } else {
        service.parse(&document)
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&result)?;
        write_output(cli.output.as_deref(), &service, &document, &json)?;
    }

    let markdown = match result {
        ConversionResult::Success(markdown) => markdown,
        ConversionResult::Failure(message) => bail!("Conversion failed: {}", message),
    };

    if !cli.json {
        write_output(cli.output.as_deref(), &service, &document, &markdown)?;
    }

    if let Some(path) = &cli.images_manifest {
        let manifest = serde_json::to_string_pretty(&images)?;
        fs::write(path, manifest)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(images = images.len(), path = %path.display(), "wrote image manifest");
    }

    Ok(())
}

fn load_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => Options::default(),
    };

    if let Some(mode) = &cli.mind_map {
        options.mind_map_mode = MindMapMode::from_config(mode);
    }
    if let Some(root) = &cli.root {
        options.content_root = root.clone();
    }
    if let Some(title) = &cli.title {
        options.page_title = Some(title.clone());
    }
    if cli.no_title {
        options.include_title = false;
    }

    Ok(options)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read stdin")?;
            Ok(html)
        }
    }
}

fn write_output(
    output: Option<&Path>,
    service: &DocMarkService,
    document: &Html,
    text: &str,
) -> Result<()> {
    let Some(output) = output else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        return Ok(());
    };

    let path = if output.is_dir() {
        let title = service.extract_title(document)?.unwrap_or_default();
        output.join(suggested_file_name(&title))
    } else {
        output.to_path_buf()
    };

    fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote markdown");
    Ok(())
}
