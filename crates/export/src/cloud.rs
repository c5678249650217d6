//! Word-cloud layout and SVG rendering.
//!
//! Words are sized linearly by count and dropped onto an Archimedean spiral
//! from the canvas centre; each takes the first spot where its estimated box
//! stays on the canvas and clear of every earlier box. Words that never fit
//! are skipped. Glyph metrics are estimated, not measured, so boxes are
//! padded a little.

use std::fmt::Write as _;

use core_types::config::{CloudConfig, Palette};
use word_filter::WordCount;

use crate::escape_markup;

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
/// Average advance width of a glyph, as a fraction of the font size.
const GLYPH_ASPECT: f64 = 0.6;
const LINE_HEIGHT: f64 = 1.1;
const BOX_PADDING: f64 = 2.0;
const SPIRAL_STEP: f64 = 0.15;
const SPIRAL_GROWTH: f64 = 1.5;
const MIN_FONT: f64 = 10.0;

const LIGHT_BACKGROUND: &str = "#ffffff";
const DARK_BACKGROUND: &str = "#0e1117";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudOptions {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub palette: Palette,
    pub dark_mode: bool,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self::from(&CloudConfig::default())
    }
}

impl From<&CloudConfig> for CloudOptions {
    fn from(cfg: &CloudConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            max_words: cfg.max_words,
            palette: cfg.palette,
            dark_mode: cfg.dark_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: f64,
    /// Box centre.
    pub x: f64,
    pub y: f64,
    pub box_width: f64,
    pub box_height: f64,
    pub color: String,
}

impl PlacedWord {
    pub fn left(&self) -> f64 {
        self.x - self.box_width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.box_width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.box_height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.box_height / 2.0
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloudLayout {
    pub width: u32,
    pub height: u32,
    pub background: &'static str,
    pub words: Vec<PlacedWord>,
}

impl CloudLayout {
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(256 + self.words.len() * 160);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        let _ = writeln!(
            svg,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            self.background
        );
        for word in &self.words {
            let _ = writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" font-family="{FONT_FAMILY}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                word.x,
                word.y,
                word.font_size,
                word.color,
                escape_markup(&word.word),
            );
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// Lay out the top `max_words` rows. `None` when there is nothing to draw.
pub fn layout_cloud(counts: &[WordCount], opts: &CloudOptions) -> Option<CloudLayout> {
    let rows: Vec<&WordCount> = counts
        .iter()
        .filter(|r| r.count > 0 && !r.word.is_empty())
        .take(opts.max_words)
        .collect();
    if rows.is_empty() || opts.width == 0 || opts.height == 0 {
        return None;
    }

    let width = f64::from(opts.width);
    let height = f64::from(opts.height);
    let max_font = (height / 4.0).max(MIN_FONT);
    let hi = rows.iter().map(|r| r.count).max().unwrap_or(1);
    let lo = rows.iter().map(|r| r.count).min().unwrap_or(1);
    let max_radius = width.hypot(height) / 2.0;

    let mut placed: Vec<PlacedWord> = Vec::with_capacity(rows.len());
    for (rank, row) in rows.iter().enumerate() {
        let glyphs = row.word.chars().count() as f64;
        let mut size = scale_font(row.count, lo, hi, MIN_FONT, max_font);
        // Long words shrink to fit the canvas width.
        let widest = (width - 2.0 * BOX_PADDING) / (glyphs * GLYPH_ASPECT);
        if size > widest {
            size = widest;
        }
        if size < 1.0 {
            continue;
        }

        let mut candidate = PlacedWord {
            word: row.word.clone(),
            count: row.count,
            font_size: size,
            x: width / 2.0,
            y: height / 2.0,
            box_width: glyphs * size * GLYPH_ASPECT + BOX_PADDING,
            box_height: size * LINE_HEIGHT,
            color: palette_color(opts.palette, rank, rows.len()),
        };

        let mut t: f64 = 0.0;
        loop {
            let r = SPIRAL_GROWTH * t;
            if r > max_radius {
                break;
            }
            candidate.x = width / 2.0 + r * t.cos() * (width / height);
            candidate.y = height / 2.0 + r * t.sin();
            if fits(&candidate, width, height) && !placed.iter().any(|p| p.overlaps(&candidate)) {
                placed.push(candidate);
                break;
            }
            t += SPIRAL_STEP;
        }
    }

    if placed.is_empty() {
        return None;
    }
    Some(CloudLayout {
        width: opts.width,
        height: opts.height,
        background: if opts.dark_mode {
            DARK_BACKGROUND
        } else {
            LIGHT_BACKGROUND
        },
        words: placed,
    })
}

/// SVG document for the cloud, or `None` when there are no words.
pub fn render_cloud(counts: &[WordCount], opts: &CloudOptions) -> Option<String> {
    layout_cloud(counts, opts).map(|layout| layout.to_svg())
}

fn fits(word: &PlacedWord, width: f64, height: f64) -> bool {
    word.left() >= 0.0 && word.top() >= 0.0 && word.right() <= width && word.bottom() <= height
}

fn scale_font(count: usize, lo: usize, hi: usize, min: f64, max: f64) -> f64 {
    if hi == lo {
        return (min + max) / 2.0;
    }
    let frac = (count - lo) as f64 / (hi - lo) as f64;
    min + (max - min) * frac
}

fn palette_stops(palette: Palette) -> &'static [(u8, u8, u8)] {
    match palette {
        Palette::Coolwarm => &[
            (0x3b, 0x4c, 0xc0),
            (0x7b, 0x9f, 0xf9),
            (0xb4, 0x9d, 0xc8),
            (0xee, 0x84, 0x68),
            (0xb4, 0x04, 0x26),
        ],
        Palette::Viridis => &[
            (0x44, 0x01, 0x54),
            (0x3b, 0x52, 0x8b),
            (0x21, 0x91, 0x8c),
            (0x5e, 0xc9, 0x62),
            (0xfd, 0xe7, 0x25),
        ],
        Palette::Plasma => &[
            (0x0d, 0x08, 0x87),
            (0x7e, 0x03, 0xa8),
            (0xcc, 0x47, 0x78),
            (0xf8, 0x95, 0x40),
            (0xf0, 0xf9, 0x21),
        ],
        Palette::Magma => &[
            (0x00, 0x00, 0x04),
            (0x51, 0x12, 0x7c),
            (0xb7, 0x37, 0x79),
            (0xfc, 0x89, 0x61),
            (0xfc, 0xfd, 0xbf),
        ],
        Palette::Cividis => &[
            (0x00, 0x22, 0x4e),
            (0x43, 0x4e, 0x6c),
            (0x7d, 0x7c, 0x78),
            (0xbc, 0xaf, 0x6f),
            (0xfe, 0xe8, 0x38),
        ],
    }
}

/// Colour for the word at `rank` of `total`, interpolated along the palette.
pub fn palette_color(palette: Palette, rank: usize, total: usize) -> String {
    let stops = palette_stops(palette);
    let frac = if total <= 1 {
        0.0
    } else {
        rank as f64 / (total - 1) as f64
    };
    let pos = frac * (stops.len() - 1) as f64;
    let i = (pos.floor() as usize).min(stops.len() - 2);
    let local = pos - i as f64;
    let (a, b) = (stops[i], stops[i + 1]);
    let mix = |x: u8, y: u8| -> u8 {
        (f64::from(x) + (f64::from(y) - f64::from(x)) * local).round() as u8
    };
    format!("#{:02x}{:02x}{:02x}", mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
