//! pubsweep - unused dependency and file detection for Dart/Flutter projects
//!
//! This library statically analyzes a project and reports two classes of
//! dead artifacts: pubspec dependencies that are never imported, and
//! source files that no other file references.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find all .dart files, split into production and test scope
//! 2. **Manifest Reading** - Collect the declared dependency names from pubspec.yaml
//! 3. **Import Extraction** - Pull referenced package names out of each file
//! 4. **Usage Analysis** - Diff declared against used, cross-reference file names
//! 5. **Reporting** - Render results as terminal text, YAML or JSON
//!
//! Matching is textual on purpose. There is no Dart parser here, and the
//! findings are a heuristic: good enough to point at dead weight, not a
//! proof of it.

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod parser;
pub mod report;

pub use analysis::{AnalysisResult, Analyzer};
pub use config::Config;
pub use discovery::{ClassifiedFiles, FileFinder, FileScope, SourceFile};
pub use parser::{read_declared_dependencies, ImportExtractor, ManifestError};
pub use report::{MessageLevel, MessageSink, Report, ReportFormat, Reporter};
