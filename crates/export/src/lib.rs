//! Sinks for filtered text: downloadable exports, the word-cloud SVG and a
//! single-file HTML report.

pub mod cloud;
pub mod csv;
pub mod link;
pub mod report;

pub use cloud::{CloudLayout, CloudOptions, PlacedWord, layout_cloud, render_cloud};
pub use csv::word_count_csv;
pub use link::download_link;
pub use report::{EMPTY_BATCH_NOTICE, Notice, ReportView, render_report};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

pub const FILTERED_TEXT_FILE: &str = "filtered_text.txt";
pub const WORD_COUNT_FILE: &str = "word_count.csv";
pub const CLOUD_FILE: &str = "word_cloud.svg";
pub const REPORT_FILE: &str = "report.html";

/// Everything one batch writes to disk.
#[derive(Debug, Clone, Default)]
pub struct ExportBundle {
    pub filtered_text: String,
    pub csv: String,
    pub cloud_svg: Option<String>,
    pub report_html: Option<String>,
}

impl ExportBundle {
    /// Write the bundle into `dir`, creating it if needed. Returns written paths.
    pub fn write_to(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(4);

        let mut put = |name: &str, body: &str| -> io::Result<()> {
            let path = dir.join(name);
            fs::write(&path, body)?;
            debug!(path = %path.display(), bytes = body.len(), "wrote export");
            written.push(path);
            Ok(())
        };

        put(FILTERED_TEXT_FILE, &self.filtered_text)?;
        put(WORD_COUNT_FILE, &self.csv)?;
        if let Some(svg) = &self.cloud_svg {
            put(CLOUD_FILE, svg)?;
        }
        if let Some(html) = &self.report_html {
            put(REPORT_FILE, html)?;
        }
        Ok(written)
    }
}

/// Escape text for XML/HTML element content and attribute values.
pub(crate) fn escape_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
