use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use pubsweep::report::{ConsoleSink, PlainSink};
use pubsweep::{Analyzer, Config, MessageSink, Report, ReportFormat, Reporter};

/// pubsweep - find unused dependencies and orphaned files in Dart/Flutter projects
#[derive(Parser, Debug)]
#[command(name = "pubsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Glob patterns to ignore, relative to the project root (can be specified multiple times)
    #[arg(short, long)]
    ignore: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for yaml/json formats)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run extraction and the file scan on a thread pool
    #[arg(long)]
    parallel: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Yaml,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Yaml => ReportFormat::Yaml,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("pubsweep v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    run_analysis(&config, &cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    // stdout belongs to the report; logs go to stderr
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    // CLI patterns extend whatever the config file declares
    if !cli.ignore.is_empty() {
        config.ignore.extend(cli.ignore.clone());
    }

    Ok(config)
}

/// CLI flag wins, then the config file; `--output` without an explicit
/// format implies the structured YAML document
fn resolve_format(cli: &Cli, config: &Config) -> ReportFormat {
    if let Some(format) = cli.format {
        return format.into();
    }

    match config.report.format.to_lowercase().as_str() {
        "yaml" | "yml" => ReportFormat::Yaml,
        "json" => ReportFormat::Json,
        _ if cli.output.is_some() => ReportFormat::Yaml,
        _ => ReportFormat::Terminal,
    }
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<()> {
    let start_time = Instant::now();

    let project_root = cli
        .path
        .canonicalize()
        .into_diagnostic()
        .wrap_err_with(|| format!("Invalid project directory: {}", cli.path.display()))?;

    let spinner = if cli.quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Analyzing project...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let analyzer = Analyzer::new()
        .with_ignore_patterns(config.ignore.clone())
        .with_parallel(cli.parallel);
    let result = analyzer.analyze(&project_root);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let result = result?;

    info!(
        "Analysis found {} unused dependencies and {} unused files",
        result.unused_dependencies.len(),
        result.unused_files.len()
    );

    let report = Report::new(project_root, result);

    let mut sink: Box<dyn MessageSink> = if cli.no_color {
        Box::new(PlainSink)
    } else {
        Box::new(ConsoleSink)
    };

    let format = resolve_format(cli, config);
    let reporter = Reporter::new(format, cli.output.clone());
    reporter.report(&report, sink.as_mut())?;

    let elapsed = start_time.elapsed();
    if !cli.quiet && format == ReportFormat::Terminal {
        println!(
            "{}",
            format!("Analyzed in {:.2}s", elapsed.as_secs_f64()).dimmed()
        );
    }

    Ok(())
}
