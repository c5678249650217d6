//! Layered application configuration: defaults, then `insightcloud.toml`,
//! then environment overrides. Command-line flags are applied by the caller.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "insightcloud.toml";
pub const ENV_LOG_LEVEL: &str = "INSIGHTCLOUD_LOG_LEVEL";
pub const ENV_OUT_DIR: &str = "INSIGHTCLOUD_OUT_DIR";

pub const WIDTH_RANGE: (u32, u32) = (400, 1200);
pub const HEIGHT_RANGE: (u32, u32) = (300, 800);
pub const MAX_WORDS_RANGE: (usize, usize) = (50, 300);

/// Per-file upload cap, 200 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 200 * 1024 * 1024;
pub const DEFAULT_MAX_CHARS: usize = 50_000_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub stopwords: StopwordConfig,
    pub cloud: CloudConfig,
    pub extract: ExtractConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Log file path; empty means stderr.
    pub file: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: String::new(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwordConfig {
    pub use_default: bool,
    pub custom: Vec<String>,
}

impl Default for StopwordConfig {
    fn default() -> Self {
        Self {
            use_default: true,
            custom: Vec::new(),
        }
    }
}

/// Colour maps offered for the cloud.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Coolwarm,
    Viridis,
    Plasma,
    Magma,
    Cividis,
}

impl Palette {
    pub const ALL: [Self; 5] = [
        Self::Coolwarm,
        Self::Viridis,
        Self::Plasma,
        Self::Magma,
        Self::Cividis,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Coolwarm => "coolwarm",
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Magma => "magma",
            Self::Cividis => "cividis",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub palette: Palette,
    pub dark_mode: bool,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            max_words: 150,
            palette: Palette::default(),
            dark_mode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub max_file_bytes: u64,
    pub max_chars: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub html: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "insightcloud-out".into(),
            html: true,
        }
    }
}

impl OutputConfig {
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }
}

impl AppConfig {
    /// Reject values outside the ranges offered by the cloud controls.
    pub fn validate(&self) -> Result<()> {
        let c = &self.cloud;
        check_range("cloud.width", c.width, WIDTH_RANGE)?;
        check_range("cloud.height", c.height, HEIGHT_RANGE)?;
        check_range("cloud.max_words", c.max_words, MAX_WORDS_RANGE)?;
        if self.extract.max_chars == 0 {
            bail!("extract.max_chars must be greater than zero");
        }
        if self.extract.max_file_bytes == 0 {
            bail!("extract.max_file_bytes must be greater than zero");
        }
        if self.output.dir.trim().is_empty() {
            bail!("output.dir must not be empty");
        }
        Ok(())
    }

    /// Apply `INSIGHTCLOUD_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    /// Apply overrides read through `lookup`. Blank values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(level) = present(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(dir) = present(ENV_OUT_DIR) {
            self.output.dir = dir;
        }
    }
}

fn check_range<T: PartialOrd + fmt::Display>(field: &str, value: T, (lo, hi): (T, T)) -> Result<()> {
    if value < lo || value > hi {
        bail!("{field} = {value} is outside the allowed range {lo}..={hi}");
    }
    Ok(())
}

/// Parse a config document without touching the environment.
pub fn parse_config(raw: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(raw).context("invalid configuration TOML")?;
    Ok(cfg)
}

/// Load configuration.
///
/// An explicit path must exist. Without one, `insightcloud.toml` in the working
/// directory is used when present, otherwise defaults. Environment overrides
/// are applied afterwards; validation is left to the caller so that CLI flags
/// can be layered on first.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut cfg = match path {
        Some(p) => read_config_file(p)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_config_file(default_path)?
            } else {
                AppConfig::default()
            }
        }
    };
    cfg.apply_env_overrides();
    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<AppConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Render the defaults as a TOML starting point.
pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&AppConfig::default()).context("serialize default config")
}
