//! Command-line interface for the mindstem utility
//!
//! Renders indented outlines as SVG, PNG, clipboard images or terminal text.

use anyhow::{anyhow, bail, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::clipboard::{copy_image, CopyOutcome, ImageClipboard, SystemClipboard};
use crate::colorizer::colorize_rows;
use mindstem::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use mindstem::mindmap::{export_file_name, Inspection, MindMapPipeline, TextRenderer};
use mindstem::{CharacterSet, Debouncer, ExportOptions, RenderConfig, DEFAULT_QUIET_PERIOD};

/// How often `watch` looks at the input file
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Mindstem - Turn indented outlines into vertical mind maps
#[derive(Parser)]
#[command(name = "mindstem")]
#[command(about = "Turn indented outlines into vertical mind map images")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    /// JSON file overriding layout, theme, parser or export settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Raster settings shared by the image-producing commands
#[derive(clap::Args, Debug, Clone, Copy, Default, PartialEq)]
pub struct RasterArgs {
    /// Pixels per canvas unit (default from config, normally 2)
    #[arg(long)]
    pub scale: Option<f32>,

    /// Fill the background with white instead of leaving it transparent
    #[arg(long)]
    pub opaque: bool,

    /// Keep the full canvas instead of cropping to the visible content
    #[arg(long)]
    pub no_trim: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render an outline as SVG
    Render {
        /// Input outline file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output SVG file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export an outline as a PNG image
    Export {
        /// Input outline file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output PNG file (use - for stdout); generated from the first line when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for generated file names
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        #[command(flatten)]
        raster: RasterArgs,
    },

    /// Copy the rendered image to the clipboard
    Copy {
        /// Input outline file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        raster: RasterArgs,
    },

    /// Draw the mind map as text in the terminal
    Preview {
        /// Input outline file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Character set to draw with
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Print the parsed tree and its layout as JSON
    Inspect {
        /// Input outline file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output JSON file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-export a PNG whenever the outline file changes
    Watch {
        /// Outline file to watch
        #[arg(short, long)]
        input: PathBuf,

        /// PNG to keep up to date (default: input path with .png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quiet period after the last change before exporting
        #[arg(long, default_value_t = DEFAULT_QUIET_PERIOD.as_millis() as u64)]
        debounce_ms: u64,

        #[command(flatten)]
        raster: RasterArgs,
    },
}

/// Supported preview character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Summary printed by `inspect`
#[derive(Serialize)]
struct InspectReport {
    input_bytes: usize,
    node_count: usize,
    overflows_canvas: bool,
    #[serde(flatten)]
    inspection: Inspection,
}

/// Tracks the watched file between polls
#[derive(Debug)]
struct WatchState {
    last: Option<String>,
    debouncer: Debouncer,
}

impl WatchState {
    fn new(quiet: Duration) -> Self {
        Self {
            last: None,
            debouncer: Debouncer::new(quiet),
        }
    }

    /// Record the current content; returns true if it changed
    fn observe(&mut self, content: String, now: Instant) -> bool {
        if self.last.as_ref() == Some(&content) {
            return false;
        }
        // the first snapshot is exported right away
        let at = if self.last.is_none() {
            now.checked_sub(self.debouncer.quiet_period()).unwrap_or(now)
        } else {
            now
        };
        self.last = Some(content);
        self.debouncer.poke(at);
        true
    }

    /// Content to export, once the quiet period has passed
    fn take_due(&mut self, now: Instant) -> Option<String> {
        if self.debouncer.ready(now) {
            self.last.clone()
        } else {
            None
        }
    }
}

/// Main CLI application
pub struct MindstemApp {
    pipeline: MindMapPipeline,
}

impl MindstemApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            pipeline: MindMapPipeline::new(config),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));
        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Mindstem v{}", env!("CARGO_PKG_VERSION"));
        }

        if let Some(path) = &cli.config {
            let config = RenderConfig::from_json_file(path)?;
            debug!(path = %path.display(), "Loaded configuration");
            self.pipeline = MindMapPipeline::new(config);
        }

        match cli.command {
            Commands::Render { input, output } => self.render_command(input, output, cli.verbose),
            Commands::Export {
                input,
                output,
                out_dir,
                raster,
            } => self.export_command(input, output, out_dir, raster, cli.verbose),
            Commands::Copy { input, raster } => {
                self.copy_command(input, raster, &mut SystemClipboard, cli.verbose)
            }
            Commands::Preview {
                input,
                style,
                color,
            } => self.preview_command(input, style, color, cli.verbose),
            Commands::Inspect { input, output } => self.inspect_command(input, output, cli.verbose),
            Commands::Watch {
                input,
                output,
                debounce_ms,
                raster,
            } => self.watch_command(input, output, debounce_ms, raster),
        }
    }

    /// Configured export options with command-line overrides applied
    fn export_options(&self, raster: RasterArgs) -> ExportOptions {
        let mut options = self.pipeline.config().export;
        if let Some(scale) = raster.scale {
            options.scale = scale;
        }
        if raster.opaque {
            options.transparent = false;
        }
        if raster.no_trim {
            options.trim = false;
        }
        options
    }

    /// Handle the render command
    fn render_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let svg = self.pipeline.svg(&content)?;
        self.write_output(output, &svg)
    }

    /// Handle the export command
    fn export_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        out_dir: PathBuf,
        raster: RasterArgs,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let image = self
            .pipeline
            .export_with(&content, self.export_options(raster))?;
        let png = image.encode_png()?;

        match resolve_png_target(output, &out_dir, &content) {
            Some(path) => {
                self.write_bytes(&path, &png)?;
                if verbose {
                    eprintln!("Exported {}x{} image", image.width(), image.height());
                }
                println!("{}", path.display());
            }
            None => self.write_stdout_bytes(&png)?,
        }
        Ok(())
    }

    /// Handle the copy command
    ///
    /// A clipboard failure is reported with a hint and is not an error.
    fn copy_command(
        &self,
        input: Option<PathBuf>,
        raster: RasterArgs,
        clipboard: &mut dyn ImageClipboard,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let image = self
            .pipeline
            .export_with(&content, self.export_options(raster))?;
        match copy_image(clipboard, &image) {
            CopyOutcome::Copied => {
                if verbose {
                    eprintln!("Copied {}x{} image", image.width(), image.height());
                }
            }
            CopyOutcome::FellBack(hint) => eprintln!("{}", hint),
        }
        Ok(())
    }

    /// Handle the preview command
    fn preview_command(
        &self,
        input: Option<PathBuf>,
        style: StyleChoice,
        color: ColorChoice,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let Some(map) = self.pipeline.parse(&content) else {
            if verbose {
                eprintln!("Input is blank, nothing to preview");
            }
            return Ok(());
        };

        let canvas = TextRenderer::new(style.into()).render_canvas(&map);
        let text = if should_colorize(color) {
            colorize_rows(&canvas.spans(), &self.pipeline.config().theme)
        } else {
            canvas.to_string()
        };
        self.write_output(None, &text)
    }

    /// Handle the inspect command
    fn inspect_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let inspection = self.pipeline.inspect(&content)?;
        let report = InspectReport {
            input_bytes: content.len(),
            node_count: inspection.tree.as_ref().map_or(0, |t| t.node_count()),
            overflows_canvas: inspection.layout.as_ref().is_some_and(|l| l.overflows()),
            inspection,
        };
        let json = serde_json::to_string_pretty(&report)?;
        self.write_output(output, &json)
    }

    /// Handle the watch command; runs until interrupted
    fn watch_command(
        &self,
        input: PathBuf,
        output: Option<PathBuf>,
        debounce_ms: u64,
        raster: RasterArgs,
    ) -> Result<()> {
        let target = watch_target(&input, output)?;
        let options = self.export_options(raster);
        let mut state = WatchState::new(Duration::from_millis(debounce_ms));

        info!(input = %input.display(), output = %target.display(), debounce_ms, "Watching");
        eprintln!(
            "Watching {} -> {} (Ctrl-C to stop)",
            input.display(),
            target.display()
        );

        loop {
            let now = Instant::now();
            match fs::read_to_string(&input) {
                Ok(content) => {
                    if state.observe(content, now) {
                        debug!("Input changed");
                    }
                }
                Err(e) => warn!(error = %e, "Cannot read watched file"),
            }

            if let Some(content) = state.take_due(now) {
                let result = self
                    .pipeline
                    .export_with(&content, options)
                    .and_then(|image| image.encode_png())
                    .and_then(|png| self.write_bytes(&target, &png));
                match result {
                    Ok(()) => eprintln!("Updated {}", target.display()),
                    Err(e) => {
                        error!(error = %e, "Export failed, still watching");
                        eprintln!("Export failed: {}", e);
                    }
                }
            }

            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write text output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content)
                    .map_err(|e| anyhow!("Failed to write output file '{}': {}", path.display(), e))?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }

    /// Write binary output to a file
    pub fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(path, bytes)
            .map_err(|e| anyhow!("Failed to write output file '{}': {}", path.display(), e))
    }

    fn write_stdout_bytes(&self, bytes: &[u8]) -> Result<()> {
        if crossterm::tty::IsTty::is_tty(&io::stdout()) {
            bail!("Refusing to write PNG data to a terminal; use -o FILE or redirect stdout");
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn pipeline(&self) -> &MindMapPipeline {
        &self.pipeline
    }
}

impl Default for MindstemApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Where an exported PNG goes; `None` means stdout
fn resolve_png_target(output: Option<PathBuf>, out_dir: &Path, content: &str) -> Option<PathBuf> {
    match output {
        Some(path) if path.to_string_lossy() == "-" => None,
        Some(path) => Some(path),
        None => Some(out_dir.join(export_file_name(content, Local::now().naive_local()))),
    }
}

/// PNG path `watch` keeps up to date; never the watched file itself
fn watch_target(input: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
    if input.to_string_lossy() == "-" {
        bail!("watch needs a file to poll, not stdin");
    }
    let target = output.unwrap_or_else(|| input.with_extension("png"));
    let same = target.as_path() == input
        || matches!(
            (fs::canonicalize(&target), fs::canonicalize(input)),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        bail!(
            "watch would overwrite its input '{}'; pass -o with a different file",
            input.display()
        );
    }
    Ok(target)
}

/// Colorize only for terminals, unless forced
fn should_colorize(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var("NO_COLOR").is_err() && crossterm::tty::IsTty::is_tty(&io::stdout())
        }
    }
}
