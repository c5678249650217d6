use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cli::{Overrides, Summary, build_bundle, format_table, notice_for, resolve_config};
use console::style;
use content_extractor::{ExtractLimits, ExtractorStack};
use core_types::config::{Palette, default_config_toml};
use export::{EMPTY_BATCH_NOTICE, Notice};
use indicatif::{ProgressBar, ProgressStyle};
use service::{BatchRunner, init_tracing_with_config};
use tracing::info;
use word_filter::StopwordSet;

/// Build a word cloud and frequency table from text, PDF and DOCX files.
#[derive(Parser, Debug)]
#[command(name = "insightcloud", version, about = "Word clouds from documents")]
struct Cli {
    /// Files to analyse (.txt, .pdf, .docx). Other types are reported and skipped.
    files: Vec<PathBuf>,
    /// TOML config file.
    #[arg(long, env = "INSIGHTCLOUD_CONFIG")]
    config: Option<PathBuf>,
    /// Directory for the exported files.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Leave the built-in list out of the words the cloud skips.
    #[arg(long)]
    no_default_stopwords: bool,
    /// Extra stopwords, comma separated.
    #[arg(long, value_name = "WORDS")]
    stopwords: Option<String>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    max_words: Option<usize>,
    #[arg(long, value_enum)]
    palette: Option<PaletteArg>,
    #[arg(long)]
    dark_mode: bool,
    /// Table rows to print.
    #[arg(long, default_value_t = 10)]
    top: usize,
    /// Skip the HTML report.
    #[arg(long)]
    no_html: bool,
    /// Print a JSON summary instead of the table.
    #[arg(long)]
    json: bool,
    /// Print the default config and exit.
    #[arg(long)]
    print_config: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PaletteArg {
    Coolwarm,
    Viridis,
    Plasma,
    Magma,
    Cividis,
}

impl From<PaletteArg> for Palette {
    fn from(arg: PaletteArg) -> Self {
        match arg {
            PaletteArg::Coolwarm => Self::Coolwarm,
            PaletteArg::Viridis => Self::Viridis,
            PaletteArg::Plasma => Self::Plasma,
            PaletteArg::Magma => Self::Magma,
            PaletteArg::Cividis => Self::Cividis,
        }
    }
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            out_dir: self.out_dir.clone(),
            no_default_stopwords: self.no_default_stopwords,
            stopwords: self.stopwords.clone(),
            width: self.width,
            height: self.height,
            max_words: self.max_words,
            palette: self.palette.map(Palette::from),
            dark_mode: self.dark_mode,
            no_html: self.no_html,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.print_config {
        print!("{}", default_config_toml()?);
        return Ok(());
    }

    let cfg = resolve_config(cli.config.as_deref(), &cli.overrides())?;
    let _guard = init_tracing_with_config(&cfg.logging)?;

    let stopwords = StopwordSet::from_config(&cfg.stopwords);
    let limits = ExtractLimits::from(&cfg.extract);
    info!(
        files = cli.files.len(),
        stopwords = stopwords.len(),
        out_dir = %cfg.output.dir,
        "batch started"
    );

    let stack = ExtractorStack::with_defaults();
    let mut runner = BatchRunner::new(&stack, limits);
    let progress = if cli.json || cli.files.is_empty() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(cli.files.len() as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
            .context("progress template")?,
    );
    for path in &cli.files {
        progress.set_message(core_types::display_name(path));
        let notice = notice_for(runner.ingest_path(path));
        if !cli.json {
            progress.println(styled(&notice));
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let report = runner.finish(&stopwords);
    let written = match build_bundle(&report, &cfg) {
        Some(bundle) => {
            let dir = cfg.output.dir_path();
            bundle
                .write_to(&dir)
                .with_context(|| format!("failed to write outputs to {}", dir.display()))?
        }
        None => Vec::new(),
    };

    if cli.json {
        let summary = Summary::new(&report, &stopwords, cli.top, &written);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("{}", styled(&Notice::Info(EMPTY_BATCH_NOTICE.to_string())));
        return Ok(());
    }

    println!();
    print!("{}", format_table(&report.word_counts, cli.top));
    println!();
    for path in &written {
        println!("{} {}", style("wrote").cyan(), path.display());
    }
    println!(
        "{}",
        style(format!(
            "{} file(s) processed, {} failed, {} distinct words",
            report.outcomes.len(),
            report.failed(),
            report.word_counts.len()
        ))
        .bold()
    );
    Ok(())
}

fn styled(notice: &Notice) -> String {
    match notice {
        Notice::Success(m) => format!("{} {m}", style("✓").green()),
        Notice::Error(m) => format!("{} {}", style("✗").red(), style(m).red()),
        Notice::Warning(m) => format!("{} {}", style("!").yellow(), style(m).yellow()),
        Notice::Info(m) => style(m).cyan().to_string(),
    }
}
