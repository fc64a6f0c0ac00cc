mod json;
mod terminal;
mod yaml;

pub use terminal::{ConsoleSink, MessageLevel, MessageSink, PlainSink, TerminalReporter};

use crate::analysis::AnalysisResult;
use miette::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Yaml,
    Json,
}

/// Immutable snapshot of an analysis, ready for rendering
#[derive(Debug, Clone)]
pub struct Report {
    project_root: PathBuf,
    unused_dependencies: Vec<String>,
    unused_files: Vec<PathBuf>,
}

impl Report {
    pub fn new(project_root: PathBuf, result: AnalysisResult) -> Self {
        Self {
            project_root,
            unused_dependencies: result.unused_dependencies.into_iter().collect(),
            unused_files: result.unused_files.into_iter().collect(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dependency names in stable order
    pub fn unused_dependencies(&self) -> &[String] {
        &self.unused_dependencies
    }

    /// Paths relative to the project root, in stable order
    pub fn unused_files(&self) -> &[PathBuf] {
        &self.unused_files
    }

    pub fn is_clean(&self) -> bool {
        self.unused_dependencies.is_empty() && self.unused_files.is_empty()
    }
}

/// Wire form of the structured report.
///
/// Both keys are always present, even when their sequences are empty.
#[derive(Serialize)]
pub(crate) struct StructuredReport<'a> {
    unused_dependencies: &'a [String],
    unused_files: Vec<String>,
}

impl<'a> StructuredReport<'a> {
    pub(crate) fn from_report(report: &'a Report) -> Self {
        Self {
            unused_dependencies: report.unused_dependencies(),
            unused_files: report
                .unused_files()
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        }
    }
}

/// Reporter for rendering analysis results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
        }
    }

    /// Render `report` in the configured format.
    ///
    /// Terminal output goes through the injected sink; structured formats
    /// go to the configured file or stdout.
    pub fn report(&self, report: &Report, sink: &mut dyn MessageSink) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                TerminalReporter::new(sink).report(report);
                Ok(())
            }
            ReportFormat::Yaml => yaml::write(report, self.output_path.as_deref()),
            ReportFormat::Json => json::write(report, self.output_path.as_deref()),
        }
    }
}
