use super::Report;
use colored::Colorize;
use std::path::Path;

/// Semantic level of a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Destination for human-readable output.
///
/// Whether output is colored is decided by which sink the caller
/// injects, not by process-global state.
pub trait MessageSink {
    fn emit(&mut self, level: MessageLevel, message: &str);
}

/// Sink that colors lines by level
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn emit(&mut self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Info => println!("{}", message.green()),
            MessageLevel::Warning => println!("{}", message.yellow()),
            MessageLevel::Error => eprintln!("{}", message.red().bold()),
        }
    }
}

/// Plain-text sink for `--no-color` and non-terminal destinations
pub struct PlainSink;

impl MessageSink for PlainSink {
    fn emit(&mut self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Error => eprintln!("{message}"),
            _ => println!("{message}"),
        }
    }
}

/// Terminal reporter with grouped, bulleted output
pub struct TerminalReporter<'a> {
    sink: &'a mut dyn MessageSink,
}

impl<'a> TerminalReporter<'a> {
    pub fn new(sink: &'a mut dyn MessageSink) -> Self {
        Self { sink }
    }

    pub fn report(&mut self, report: &Report) {
        if report.unused_dependencies().is_empty() {
            self.sink
                .emit(MessageLevel::Info, "No unused dependencies found.");
        } else {
            self.sink.emit(MessageLevel::Warning, "Unused dependencies:");
            for dep in report.unused_dependencies() {
                self.sink.emit(MessageLevel::Info, &format!("- {dep}"));
            }
        }

        self.sink.emit(MessageLevel::Info, "");

        if report.unused_files().is_empty() {
            self.sink.emit(MessageLevel::Info, "No unused files found.");
        } else {
            self.sink.emit(MessageLevel::Warning, "Unused files:");
            for file in report.unused_files() {
                let absolute = report.project_root().join(file);
                self.sink
                    .emit(MessageLevel::Info, &format!("- {}", display_path(&absolute)));
            }
        }
    }
}

/// Render a path relative to the current working directory when it lies
/// underneath it, falling back to the path as-is
fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).map(Path::to_path_buf).ok());

    match relative {
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
