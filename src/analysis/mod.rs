use crate::discovery::{ClassifiedFiles, FileFinder, SourceFile};
use crate::parser::{pubspec, ImportExtractor};
use globset::{Glob, GlobSet, GlobSetBuilder};
use miette::{IntoDiagnostic, Result, WrapErr};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of a project analysis.
///
/// File paths are relative to the analyzed project root. Both sets are
/// ordered, so two runs over an unchanged tree render identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Declared dependencies never imported by any production or test file
    pub unused_dependencies: BTreeSet<String>,

    /// Production files whose base name appears in no other production file
    pub unused_files: BTreeSet<PathBuf>,
}

/// A production file with its contents held in memory for the
/// cross-reference scan
pub struct LoadedFile {
    /// Path relative to the project root
    pub rel_path: PathBuf,

    /// Base file name, the token peers are scanned for
    pub file_name: String,

    /// Full file text
    pub contents: String,
}

/// Usage analyzer orchestrating discovery, extraction and the
/// cross-reference scan
pub struct Analyzer {
    ignore: Vec<String>,
    parallel: bool,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            ignore: Vec::new(),
            parallel: false,
        }
    }

    /// Glob patterns, relative to the project root, excluded from analysis
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore = patterns;
        self
    }

    /// Run extraction and the cross-reference scan on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Analyze the project rooted at `project_dir`.
    ///
    /// Aborts with a user-facing error when `pubspec.yaml` is missing or
    /// malformed. Individual source files that cannot be read are skipped
    /// with a warning; one unreadable file does not hide findings about
    /// the rest of the project.
    pub fn analyze(&self, project_dir: &Path) -> Result<AnalysisResult> {
        let manifest_path = project_dir.join(pubspec::MANIFEST_FILE);
        let declared = pubspec::read_declared_dependencies(&manifest_path).into_diagnostic()?;
        debug!("Manifest declares {} dependencies", declared.len());

        let mut files = FileFinder::new().classify(project_dir);
        info!("Classified {} Dart files", files.total());

        let ignore_set = build_ignore_set(&self.ignore)?;
        if !ignore_set.is_empty() {
            retain_unignored(&mut files.production, project_dir, &ignore_set);
            retain_unignored(&mut files.test, project_dir, &ignore_set);
        }

        let used_names = self.collect_used_names(&files);
        debug!("Extracted {} referenced package names", used_names.len());

        let unused_dependencies: BTreeSet<String> = declared
            .into_iter()
            .filter(|name| !used_names.contains(name))
            .collect();

        let loaded = load_files(&files.production, project_dir);
        let unused_files = if self.parallel {
            par_cross_reference_scan(&loaded)
        } else {
            cross_reference_scan(&loaded)
        };

        info!(
            "Found {} unused dependencies and {} unused files",
            unused_dependencies.len(),
            unused_files.len()
        );

        Ok(AnalysisResult {
            unused_dependencies,
            unused_files,
        })
    }

    /// Union of package names referenced across production and test files.
    ///
    /// Test files count toward dependency usage even though they are
    /// excluded from the unused-file scan.
    fn collect_used_names(&self, files: &ClassifiedFiles) -> HashSet<String> {
        let extractor = ImportExtractor::new();
        let all: Vec<&SourceFile> = files.production.iter().chain(files.test.iter()).collect();

        if self.parallel {
            all.par_iter()
                .filter_map(|file| extract_or_warn(&extractor, file))
                .reduce(HashSet::new, |mut acc, set| {
                    acc.extend(set);
                    acc
                })
        } else {
            let mut used = HashSet::new();
            for file in &all {
                if let Some(set) = extract_or_warn(&extractor, file) {
                    used.extend(set);
                }
            }
            used
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_or_warn(extractor: &ImportExtractor, file: &SourceFile) -> Option<HashSet<String>> {
    match extractor.extract_file(&file.path) {
        Ok(set) => Some(set),
        Err(err) => {
            warn!("Skipping {}: {}", file.path.display(), err);
            None
        }
    }
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .into_diagnostic()
            .wrap_err_with(|| format!("Invalid ignore pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().into_diagnostic()
}

/// Drop files whose root-relative path matches an ignore pattern
fn retain_unignored(files: &mut Vec<SourceFile>, root: &Path, ignore_set: &GlobSet) {
    files.retain(|file| {
        let rel = file.path.strip_prefix(root).unwrap_or(&file.path);
        if ignore_set.is_match(rel) {
            debug!("Ignoring {}", rel.display());
            false
        } else {
            true
        }
    });
}

/// Read file contents for the scan; unreadable files drop out with a warning
fn load_files(files: &[SourceFile], root: &Path) -> Vec<LoadedFile> {
    files
        .iter()
        .filter_map(|file| match file.read_contents() {
            Ok(contents) => Some(LoadedFile {
                rel_path: file
                    .path
                    .strip_prefix(root)
                    .unwrap_or(&file.path)
                    .to_path_buf(),
                file_name: file.file_name().to_string(),
                contents,
            }),
            Err(err) => {
                warn!("Skipping {}: {}", file.path.display(), err);
                None
            }
        })
        .collect()
}

/// Find files whose base name appears in no other file's text.
///
/// Every candidate is checked against every peer with plain substring
/// containment over the full file text, short-circuiting on the first
/// hit. A name that only occurs in a comment or string literal still
/// counts as a reference. O(n² · L) in the file count n and average
/// file length L; this is the scaling limit of the tool.
pub fn cross_reference_scan(files: &[LoadedFile]) -> BTreeSet<PathBuf> {
    files
        .iter()
        .filter(|candidate| !is_referenced(candidate, files))
        .map(|candidate| candidate.rel_path.clone())
        .collect()
}

/// Parallel variant of [`cross_reference_scan`]; same result set
pub fn par_cross_reference_scan(files: &[LoadedFile]) -> BTreeSet<PathBuf> {
    files
        .par_iter()
        .filter(|candidate| !is_referenced(candidate, files))
        .map(|candidate| candidate.rel_path.clone())
        .collect()
}

fn is_referenced(candidate: &LoadedFile, files: &[LoadedFile]) -> bool {
    files.iter().any(|other| {
        other.rel_path != candidate.rel_path && other.contents.contains(&candidate.file_name)
    })
}
