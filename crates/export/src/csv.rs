//! `Word,Count` table export.

use std::borrow::Cow;
use std::fmt::Write as _;

use word_filter::WordCount;

pub const HEADER: &str = "Word,Count";

/// Render rows in table order. Lines end with `\n`.
pub fn word_count_csv(rows: &[WordCount]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + rows.len() * 12);
    out.push_str(HEADER);
    out.push('\n');
    for row in rows {
        let _ = writeln!(out, "{},{}", field(&row.word), row.count);
    }
    out
}

/// RFC 4180 quoting, applied only when needed.
fn field(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}
