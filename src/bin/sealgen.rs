use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sealgen", version, about = "Render company seals to transparent PNG files")]
struct Cli {
    /// Text file with company names separated by commas or new lines.
    #[arg(long)]
    names: Option<PathBuf>,

    /// Directory the PNG files are written to.
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    /// JSON file with seal options (camelCase keys). Flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Single company name; ignored when `--names` is given.
    #[arg(long)]
    company: Option<String>,

    /// Title drawn below the star.
    #[arg(long)]
    title: Option<String>,

    /// Regular weight font file.
    #[arg(long)]
    font_regular: Option<PathBuf>,

    /// Bold weight font file.
    #[arg(long)]
    font_bold: Option<PathBuf>,

    /// Apply the worn-ink aging effect.
    #[arg(long)]
    aging: bool,

    /// Aging intensity in [0, 1].
    #[arg(long)]
    aging_strength: Option<f64>,

    /// Seed for reproducible aging.
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the outer ring as dashes.
    #[arg(long)]
    dashed: bool,

    /// Render names concurrently.
    #[arg(long)]
    parallel: bool,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file_opts = match &cli.config {
        Some(path) => sealgen::SealOptions::from_path(path)?,
        None => sealgen::SealOptions::default(),
    };
    let opts = file_opts.merged_with(flag_options(&cli));
    // Fail on bad options before any font discovery.
    sealgen::SealConfig::resolve(&opts)?;

    let names = match &cli.names {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read names '{}'", path.display()))?;
            sealgen::parse_names(&text)
        }
        None => cli.company.iter().cloned().collect(),
    };

    let fonts = Arc::new(sealgen::FontSet::load(&sealgen::FontPaths {
        regular: cli.font_regular.clone(),
        bold: cli.font_bold.clone(),
    }));

    let written = sealgen::run_batch(
        &opts,
        fonts,
        &names,
        &sealgen::BatchOptions {
            out_dir: cli.out_dir.clone(),
            parallel: cli.parallel,
            threads: None,
        },
    )
    .context("render seals")?;

    for path in written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn flag_options(cli: &Cli) -> sealgen::SealOptions {
    sealgen::SealOptions {
        title: cli.title.clone(),
        aging: cli.aging.then_some(true),
        aging_strength: cli.aging_strength,
        aging_seed: cli.seed,
        border_style: cli.dashed.then_some(sealgen::BorderStyle::Dashed),
        ..sealgen::SealOptions::default()
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
