//! Helpers shared by the `insightcloud` binary: layering flags over the loaded
//! config, turning batch outcomes into notices, and assembling exports.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use content_extractor::FailureKind;
use core_types::config::{AppConfig, Palette};
use export::{
    CloudOptions, ExportBundle, Notice, ReportView, render_cloud, render_report, word_count_csv,
};
use serde::Serialize;
use service::{BatchReport, FileOutcome, OutcomeStatus};
use word_filter::{StopwordSet, WordCount, parse_custom_stopwords};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const REPORT_TITLE: &str = "InsightCloud";

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub out_dir: Option<PathBuf>,
    pub no_default_stopwords: bool,
    pub stopwords: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub max_words: Option<usize>,
    pub palette: Option<Palette>,
    pub dark_mode: bool,
    pub no_html: bool,
}

impl Overrides {
    /// Layer these values over `cfg`. Custom stopwords are appended.
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(dir) = &self.out_dir {
            cfg.output.dir = dir.display().to_string();
        }
        if self.no_default_stopwords {
            cfg.stopwords.use_default = false;
        }
        if let Some(raw) = &self.stopwords {
            cfg.stopwords.custom.extend(parse_custom_stopwords(raw));
        }
        if let Some(width) = self.width {
            cfg.cloud.width = width;
        }
        if let Some(height) = self.height {
            cfg.cloud.height = height;
        }
        if let Some(max_words) = self.max_words {
            cfg.cloud.max_words = max_words;
        }
        if let Some(palette) = self.palette {
            cfg.cloud.palette = palette;
        }
        if self.dark_mode {
            cfg.cloud.dark_mode = true;
        }
        if self.no_html {
            cfg.output.html = false;
        }
    }
}

/// Load, layer and validate the effective configuration.
pub fn resolve_config(path: Option<&std::path::Path>, overrides: &Overrides) -> Result<AppConfig> {
    let mut cfg = core_types::config::load_config(path)?;
    overrides.apply(&mut cfg);
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

pub fn notice_for(outcome: &FileOutcome) -> Notice {
    match &outcome.status {
        OutcomeStatus::Extracted { truncated: false, .. } => {
            Notice::Success(format!("{} uploaded successfully", outcome.name))
        }
        OutcomeStatus::Extracted { truncated: true, .. } => Notice::Warning(format!(
            "{} uploaded successfully (text truncated)",
            outcome.name
        )),
        OutcomeStatus::Empty => Notice::Warning(format!("{}: no text found", outcome.name)),
        OutcomeStatus::Failed {
            kind: FailureKind::Unsupported,
            ..
        } => Notice::Error(format!("{}: Unsupported file format!", outcome.name)),
        OutcomeStatus::Failed { message, .. } => {
            Notice::Error(format!("{}: could not be read ({message})", outcome.name))
        }
    }
}

/// Files to write for `report`, or `None` when there is nothing to render.
pub fn build_bundle(report: &BatchReport, cfg: &AppConfig) -> Option<ExportBundle> {
    if report.is_empty() {
        return None;
    }
    let cloud_stopwords = StopwordSet::cloud_from_config(&cfg.stopwords);
    let cloud_rows: Vec<WordCount> = report
        .word_counts
        .iter()
        .filter(|r| !cloud_stopwords.is_stopword(&r.word))
        .cloned()
        .collect();
    let cloud_svg = render_cloud(&cloud_rows, &CloudOptions::from(&cfg.cloud));
    let report_html = cfg.output.html.then(|| {
        let notices: Vec<Notice> = report.outcomes.iter().map(notice_for).collect();
        render_report(&ReportView {
            title: REPORT_TITLE,
            notices: &notices,
            filtered_text: &report.filtered_text,
            counts: &report.word_counts,
            cloud_svg: cloud_svg.as_deref(),
            dark_mode: cfg.cloud.dark_mode,
        })
    });
    Some(ExportBundle {
        filtered_text: report.filtered_text.clone(),
        csv: word_count_csv(&report.word_counts),
        cloud_svg,
        report_html,
    })
}

/// Fixed-width `Word | Count` table of the first `top` rows.
pub fn format_table(rows: &[WordCount], top: usize) -> String {
    let shown = &rows[..rows.len().min(top)];
    let width = shown
        .iter()
        .map(|r| r.word.chars().count())
        .max()
        .unwrap_or(0)
        .max("Word".len());
    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:>5}", "Word", "Count");
    let _ = writeln!(out, "{}  {}", "-".repeat(width), "-".repeat(5));
    for row in shown {
        let _ = writeln!(out, "{:<width$}  {:>5}", row.word, row.count);
    }
    if rows.len() > shown.len() {
        let _ = writeln!(out, "... {} more", rows.len() - shown.len());
    }
    out
}

/// Machine-readable run summary for `--json`.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub version: &'static str,
    pub files: &'a [FileOutcome],
    pub stopwords: usize,
    pub total_words: usize,
    pub distinct_words: usize,
    pub top: &'a [WordCount],
    pub written: Vec<String>,
}

impl<'a> Summary<'a> {
    pub fn new(
        report: &'a BatchReport,
        stopwords: &StopwordSet,
        top: usize,
        written: &[PathBuf],
    ) -> Self {
        Self {
            version: VERSION,
            files: &report.outcomes,
            stopwords: stopwords.len(),
            total_words: report.word_counts.iter().map(|r| r.count).sum(),
            distinct_words: report.word_counts.len(),
            top: &report.word_counts[..report.word_counts.len().min(top)],
            written: written.iter().map(|p| p.display().to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_extractor::ExtractLimits;
    use core_types::{MediaType, UploadedFile};
    use service::process_batch;

    fn report(files: &[UploadedFile]) -> BatchReport {
        process_batch(files, &StopwordSet::defaults(), ExtractLimits::default())
    }

    fn txt(name: &str, body: &str) -> UploadedFile {
        UploadedFile::new(name, MediaType::PlainText, body.as_bytes().to_vec())
    }

    #[test]
    fn overrides_layer_over_config() {
        let mut cfg = AppConfig::default();
        cfg.stopwords.custom = vec!["alpha".into()];
        Overrides {
            out_dir: Some(PathBuf::from("out")),
            no_default_stopwords: true,
            stopwords: Some(" Beta, ,GAMMA ".into()),
            width: Some(1000),
            palette: Some(Palette::Magma),
            dark_mode: true,
            no_html: true,
            ..Overrides::default()
        }
        .apply(&mut cfg);

        assert_eq!(cfg.output.dir, "out");
        assert!(!cfg.stopwords.use_default);
        assert_eq!(cfg.stopwords.custom, vec!["alpha", "beta", "gamma"]);
        assert_eq!(cfg.cloud.width, 1000);
        assert_eq!(cfg.cloud.height, 400);
        assert_eq!(cfg.cloud.palette, Palette::Magma);
        assert!(cfg.cloud.dark_mode);
        assert!(!cfg.output.html);
    }

    #[test]
    fn out_of_range_flag_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insightcloud.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = Overrides {
            max_words: Some(10),
            ..Overrides::default()
        };
        assert!(resolve_config(Some(&path), &overrides).is_err());
        assert!(resolve_config(Some(&path), &Overrides::default()).is_ok());
    }

    #[test]
    fn notices_follow_outcomes() {
        let r = report(&[
            txt("a.txt", "rust cloud"),
            UploadedFile::new("b.png", MediaType::parse("image/png"), vec![1, 2, 3]),
            txt("c.txt", " "),
        ]);
        let notices: Vec<Notice> = r.outcomes.iter().map(notice_for).collect();
        assert_eq!(notices[0], Notice::Success("a.txt uploaded successfully".into()));
        assert_eq!(notices[1], Notice::Error("b.png: Unsupported file format!".into()));
        assert!(matches!(notices[2], Notice::Warning(_)));
    }

    #[test]
    fn empty_batch_builds_no_bundle() {
        assert!(build_bundle(&report(&[]), &AppConfig::default()).is_none());
        let only_bad = report(&[UploadedFile::new("x.doc", MediaType::parse("application/msword"), vec![0])]);
        assert!(build_bundle(&only_bad, &AppConfig::default()).is_none());
    }

    #[test]
    fn bundle_carries_every_export() {
        let r = report(&[txt("a.txt", "the rust cloud rust")]);
        let bundle = build_bundle(&r, &AppConfig::default()).unwrap();
        assert_eq!(bundle.filtered_text, "rust cloud rust");
        assert_eq!(bundle.csv, "Word,Count\nrust,2\ncloud,1\n");
        assert!(bundle.cloud_svg.as_deref().unwrap().contains(">rust</text>"));
        assert!(bundle.report_html.as_deref().unwrap().contains("a.txt uploaded successfully"));

        let mut cfg = AppConfig::default();
        cfg.output.html = false;
        assert!(build_bundle(&r, &cfg).unwrap().report_html.is_none());
    }

    #[test]
    fn default_toggle_leaves_filtered_text_alone() {
        let files = [txt("a.txt", "The Quick fox and the FOX")];
        let mut cfg = AppConfig::default();
        Overrides {
            no_default_stopwords: true,
            ..Overrides::default()
        }
        .apply(&mut cfg);
        let stopwords = StopwordSet::from_config(&cfg.stopwords);
        let r = process_batch(&files, &stopwords, ExtractLimits::default());
        assert_eq!(r.filtered_text, "Quick fox FOX");

        let bundle = build_bundle(&r, &cfg).unwrap();
        let svg = bundle.cloud_svg.unwrap();
        assert!(svg.contains(">Quick</text>"));
        assert!(!svg.contains(">the</text>"));
    }

    #[test]
    fn table_shows_top_rows() {
        let rows = vec![
            WordCount::new("rust", 3),
            WordCount::new("cloud", 2),
            WordCount::new("svg", 1),
        ];
        let table = format_table(&rows, 2);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Word   Count");
        assert_eq!(lines[2], "rust       3");
        assert_eq!(lines[4], "... 1 more");
    }

    #[test]
    fn summary_counts_words() {
        let r = report(&[txt("a.txt", "rust cloud rust")]);
        let summary = Summary::new(&r, &StopwordSet::defaults(), 1, &[PathBuf::from("out/x")]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_words"], 3);
        assert_eq!(json["distinct_words"], 2);
        assert_eq!(json["top"][0]["word"], "rust");
        assert_eq!(json["files"][0]["status"], "extracted");
    }
}
