//! Single-file HTML report: notices, the inline cloud, download links and
//! the frequency table.

use std::fmt::Write as _;

use word_filter::WordCount;

use crate::{FILTERED_TEXT_FILE, WORD_COUNT_FILE, download_link, escape_markup, word_count_csv};

pub const EMPTY_BATCH_NOTICE: &str = "Upload files to start generating word clouds!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    Warning(String),
    Info(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Error(m) | Self::Warning(m) | Self::Info(m) => m,
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Error(_) => "error",
            Self::Warning(_) => "warning",
            Self::Info(_) => "info",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReportView<'a> {
    pub title: &'a str,
    pub notices: &'a [Notice],
    pub filtered_text: &'a str,
    pub counts: &'a [WordCount],
    pub cloud_svg: Option<&'a str>,
    pub dark_mode: bool,
}

impl<'a> ReportView<'a> {
    fn is_empty(&self) -> bool {
        self.counts.is_empty() && self.cloud_svg.is_none()
    }
}

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;margin:2rem;}\
.notice{padding:.5rem 1rem;margin:.25rem 0;border-radius:4px;}\
.success{background:#d4edda;color:#155724;}\
.error{background:#f8d7da;color:#721c24;}\
.warning{background:#fff3cd;color:#856404;}\
.info{background:#d1ecf1;color:#0c5460;}\
.downloads a{margin-right:1rem;}\
table{border-collapse:collapse;margin-top:1rem;}\
th,td{border:1px solid #999;padding:.25rem .75rem;text-align:left;}";

pub fn render_report(view: &ReportView<'_>) -> String {
    let mut html = String::with_capacity(4096 + view.filtered_text.len() * 2);
    let title = escape_markup(view.title);
    let (bg, fg) = if view.dark_mode {
        ("#0e1117", "#fafafa")
    } else {
        ("#ffffff", "#262730")
    };

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(
        html,
        "<style>{STYLE}body{{background:{bg};color:{fg};}}</style>"
    );
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");

    if view.is_empty() {
        push_notice(&mut html, &Notice::Info(EMPTY_BATCH_NOTICE.to_string()));
        html.push_str("</body>\n</html>\n");
        return html;
    }

    for notice in view.notices {
        push_notice(&mut html, notice);
    }

    if let Some(svg) = view.cloud_svg {
        html.push_str("<section class=\"cloud\">\n<h2>Word Cloud</h2>\n");
        html.push_str(svg);
        html.push_str("</section>\n");
    }

    let csv = word_count_csv(view.counts);
    html.push_str("<section class=\"downloads\">\n");
    let _ = writeln!(
        html,
        "{}",
        download_link(
            view.filtered_text.as_bytes(),
            FILTERED_TEXT_FILE,
            "Download Filtered Text"
        )
    );
    let _ = writeln!(
        html,
        "{}",
        download_link(csv.as_bytes(), WORD_COUNT_FILE, "Download Word Count CSV")
    );
    html.push_str("</section>\n");

    html.push_str("<section class=\"table\">\n<h2>Word Count Table</h2>\n<table>\n");
    html.push_str("<thead><tr><th>Word</th><th>Count</th></tr></thead>\n<tbody>\n");
    for row in view.counts {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_markup(&row.word),
            row.count
        );
    }
    html.push_str("</tbody>\n</table>\n</section>\n</body>\n</html>\n");
    html
}

fn push_notice(html: &mut String, notice: &Notice) {
    let _ = writeln!(
        html,
        "<div class=\"notice {}\">{}</div>",
        notice.class(),
        escape_markup(notice.message())
    );
}
