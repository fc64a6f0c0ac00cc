use super::{Report, StructuredReport};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::Path;

/// Write the YAML document to `output_path`, or stdout when none is given
pub(crate) fn write(report: &Report, output_path: Option<&Path>) -> Result<()> {
    let doc = StructuredReport::from_report(report);
    let yaml = serde_yaml::to_string(&doc).into_diagnostic()?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &yaml)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write report to {}", path.display()))?;
            println!("Report written to: {}", path.display());
        }
        None => print!("{yaml}"),
    }

    Ok(())
}
