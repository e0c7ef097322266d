use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use seadex_import::utils::{logger, validation::Validate};
use seadex_import::{
    Catalog, CliConfig, ConfigProvider, EntityKind, ImportEngine, ImportResult, ParseOptions,
    RestStore,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "seadex-import")]
#[command(about = "CSV bulk-import tool for the seadex maritime business directory")]
struct Cli {
    #[command(flatten)]
    config: CliConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import a CSV file into one collection
    Import {
        /// Path of the file to upload
        #[arg(long)]
        file: PathBuf,

        /// Entity kind: business, category or review
        #[arg(long)]
        kind: String,
    },
    /// Print or save the CSV template for an entity kind
    Template {
        /// Entity kind: business, category or review
        #[arg(long)]
        kind: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load the fixed demonstration batch of 20 businesses
    Sample,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.config.verbose);
    tracing::info!("Starting seadex-import");

    if let Err(e) = cli.config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    let catalog = Catalog::new(cli.config.language())?;

    match cli.command {
        Command::Import { file, kind } => run_import(&cli.config, &catalog, &file, &kind).await,
        Command::Template { kind, output } => run_template(&catalog, &kind, output.as_deref()),
        Command::Sample => run_sample(&cli.config, &catalog).await,
    }
}

/// Template generation is local; only the store-facing subcommands need
/// an API key, so the check lives here rather than in `Validate`.
fn require_credentials(config: &CliConfig) {
    if let Err(e) = config.require_api_key() {
        tracing::error!("Missing credentials: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }
}

fn build_engine(config: &CliConfig) -> ImportEngine<RestStore> {
    ImportEngine::new(RestStore::from_config(config))
        .with_parse_options(ParseOptions {
            has_header: true,
            strict_columns: config.strict_columns(),
        })
        .with_retries(config.retries())
}

async fn run_import(
    config: &CliConfig,
    catalog: &Catalog,
    file: &std::path::Path,
    kind: &str,
) -> anyhow::Result<()> {
    let kind: EntityKind = kind.parse().map_err(anyhow::Error::msg)?;
    require_credentials(config);
    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;

    println!(
        "{}",
        catalog.render("import.in_progress", &[("kind", kind.to_string())])
    );

    let engine = build_engine(config);
    let bar = progress_bar();
    let outcome = engine
        .import_bytes(&bytes, kind, |p| bar.set_position(p as u64))
        .await;
    bar.finish_and_clear();

    match outcome {
        Ok(result) => {
            report(catalog, &result);
            Ok(())
        }
        Err(e) => {
            eprintln!(
                "❌ {}",
                catalog.render("import.failed", &[("reason", e.to_string())])
            );
            std::process::exit(1);
        }
    }
}

fn run_template(
    catalog: &Catalog,
    kind: &str,
    output: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let kind: EntityKind = kind.parse().map_err(anyhow::Error::msg)?;
    let text = seadex_import::core::template::template(kind)?;

    match output {
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
            println!(
                "✅ {}",
                catalog.render("template.written", &[("path", path.display().to_string())])
            );
        }
        None => print!("{}", text),
    }
    Ok(())
}

async fn run_sample(config: &CliConfig, catalog: &Catalog) -> anyhow::Result<()> {
    require_credentials(config);
    let engine = build_engine(config);
    let bar = progress_bar();
    let outcome = engine
        .load_sample_data(|p| bar.set_position(p as u64))
        .await;
    bar.finish_and_clear();

    match outcome {
        Ok(result) => {
            println!(
                "✅ {}",
                catalog.render("import.sample_done", &[("count", result.count.to_string())])
            );
            for error in &result.errors {
                eprintln!("  {}", error);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!(
                "❌ {}",
                catalog.render("import.failed", &[("reason", e.to_string())])
            );
            std::process::exit(1);
        }
    }
}

fn report(catalog: &Catalog, result: &ImportResult) {
    println!(
        "✅ {}",
        catalog.render("import.summary", &[("count", result.count.to_string())])
    );
    if !result.errors.is_empty() {
        eprintln!(
            "⚠️ {}",
            catalog.render(
                "import.failures",
                &[("count", result.errors.len().to_string())]
            )
        );
        for error in &result.errors {
            eprintln!("  {}", error);
        }
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    if let Ok(style) =
        ProgressStyle::default_bar().template("▕{bar:25}▏ {percent:>3}% • {pos}/{len}")
    {
        bar.set_style(style.progress_chars("█░ "));
    }
    bar
}
