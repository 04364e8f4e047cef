//! Command handlers behind the CLI
//!
//! Arguments win over config values; config wins over built-in defaults.

use crate::errors::UsageError;
use crate::tui::{self, TuiOptions};
use anyhow::{Context, Result};
use logsift_common::config::ColorMode;
use logsift_common::{AnalysisMode, Analyzer, LogsiftConfig, ReportFormat, Reporter};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Options for `logsift analyze`
#[derive(Debug, Default)]
pub struct AnalyzeArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub quick: bool,
    pub top: Option<usize>,
    pub color: Option<ColorMode>,
}

/// Options for `logsift tui`
#[derive(Debug, Default)]
pub struct TuiArgs {
    pub input: Option<PathBuf>,
    pub limit: Option<usize>,
}

/// `--input` if given, else the configured default
pub fn resolve_input(flag: Option<PathBuf>, config: &LogsiftConfig) -> Result<PathBuf, UsageError> {
    flag.or_else(|| config.analysis.default_input.clone())
        .ok_or(UsageError::MissingInput)
}

/// Whether the text report should carry ANSI colors
pub fn use_color(mode: ColorMode, to_file: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => !to_file && console::colors_enabled(),
    }
}

pub fn analyze(config: &LogsiftConfig, args: AnalyzeArgs) -> Result<()> {
    let input = resolve_input(args.input, config)?;
    let mode = if args.quick {
        AnalysisMode::Quick
    } else {
        AnalysisMode::Full
    };
    let format = if args.json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };

    info!(input = %input.display(), mode = mode.as_str(), "analyzing");

    let result = Analyzer::new(mode)
        .with_top_errors(args.top.unwrap_or(config.analysis.top_errors))
        .with_buffer_capacity(config.read_buffer_bytes())
        .analyze_file(&input)
        .with_context(|| format!("analysis of {} failed", input.display()))?;

    let color_mode = args.color.unwrap_or(config.output.color);
    let reporter = Reporter::new(format)
        .with_color(use_color(color_mode, args.output.is_some()))
        .with_source(input.display().to_string());

    match args.output {
        Some(path) => {
            reporter.write_to_path(&result, &path)?;
            info!(output = %path.display(), "report written");
        }
        None => {
            let rendered = reporter.render(&result)?;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write report to stdout")?;
        }
    }

    Ok(())
}

pub fn tui(config: &LogsiftConfig, args: TuiArgs) -> Result<()> {
    let input = resolve_input(args.input, config)?;
    let options = TuiOptions {
        limit: args.limit.filter(|n| *n > 0).or_else(|| config.tui_limit()),
        page_size: config.tui.page_size,
        buffer_capacity: config.read_buffer_bytes(),
    };

    info!(input = %input.display(), ?options, "starting browser");
    tui::run(&input, options)
}
