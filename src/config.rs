use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::state::choice_list::DEFAULT_ERROR_TICKS;
use crate::theme::{apply_overrides, Theme, ThemeOverrides};

pub const DEFAULT_GAP_HALF_WIDTH: u16 = 2;
pub const DEFAULT_TAB_WIDTH: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct SplitdiffConfig {
    pub theme: Theme,
    /// Initial state of the matching-row highlight in each diff view.
    pub highlight: bool,
    pub gap_half_width: u16,
    pub tab_width: usize,
    pub error_ticks: u32,
    pub log_file: PathBuf,
}

impl Default for SplitdiffConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            highlight: true,
            gap_half_width: DEFAULT_GAP_HALF_WIDTH,
            tab_width: DEFAULT_TAB_WIDTH,
            error_ticks: DEFAULT_ERROR_TICKS,
            log_file: default_log_path(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    colors: Option<ThemeOverrides>,
    #[serde(default)]
    highlight: Option<bool>,
    #[serde(default)]
    gap_half_width: Option<u16>,
    #[serde(default)]
    tab_width: Option<usize>,
    #[serde(default)]
    error_ticks: Option<u32>,
    #[serde(default)]
    log_file: Option<PathBuf>,
}

/// A loaded configuration plus the reason it fell back to defaults, if it
/// did. Logging is not up yet while the config loads, so the reason is
/// reported by the caller afterwards.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: SplitdiffConfig,
    pub fallback_reason: Option<String>,
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

fn config_path() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("splitdiff");
    path.push("config.toml");
    path
}

pub fn default_log_path() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(std::env::temp_dir);
    path.push(".cache");
    path.push("splitdiff");
    path.push("splitdiff.log");
    path
}

fn parse(contents: &str) -> Result<SplitdiffConfig> {
    let file: ConfigFile = toml::from_str(contents)?;

    let mut config = SplitdiffConfig::default();
    if let Some(name) = file.theme.as_deref() {
        config.theme = Theme::from_name(name);
    }
    if let Some(ref overrides) = file.colors {
        apply_overrides(&mut config.theme, overrides);
    }
    if let Some(highlight) = file.highlight {
        config.highlight = highlight;
    }
    if let Some(gap) = file.gap_half_width {
        config.gap_half_width = gap;
    }
    if let Some(tab_width) = file.tab_width {
        config.tab_width = tab_width;
    }
    if let Some(ticks) = file.error_ticks {
        config.error_ticks = ticks.max(1);
    }
    if let Some(log_file) = file.log_file {
        config.log_file = log_file;
    }
    Ok(config)
}

/// Load the config named on the command line. Any failure is fatal.
pub fn load_explicit(path: &Path) -> Result<SplitdiffConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid config file {}", path.display()))
}

/// Load `~/.config/splitdiff/config.toml`, falling back to defaults when it
/// is missing or broken.
pub fn load_default() -> LoadedConfig {
    load_or_default(&config_path())
}

fn load_or_default(path: &Path) -> LoadedConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => {
            return LoadedConfig {
                config: SplitdiffConfig::default(),
                fallback_reason: None,
            }
        }
    };
    match parse(&contents) {
        Ok(config) => LoadedConfig {
            config,
            fallback_reason: None,
        },
        Err(err) => LoadedConfig {
            config: SplitdiffConfig::default(),
            fallback_reason: Some(format!("{}: {err:#}", path.display())),
        },
    }
}

/// Load the config file and apply command-line overrides (CLI wins).
pub fn load(cli: &Cli) -> Result<LoadedConfig> {
    let mut loaded = match cli.config.as_deref() {
        Some(path) => LoadedConfig {
            config: load_explicit(path)?,
            fallback_reason: None,
        },
        None => load_default(),
    };
    loaded.config.apply_cli(cli);
    Ok(loaded)
}

impl SplitdiffConfig {
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref name) = cli.theme {
            self.theme = Theme::from_name(name);
        }
        if cli.no_highlight {
            self.highlight = false;
        }
        if let Some(ref path) = cli.log_file {
            self.log_file = path.clone();
        }
    }
}
