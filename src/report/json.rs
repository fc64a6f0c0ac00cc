use super::{Report, StructuredReport};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::Path;

/// Write the JSON document to `output_path`, or stdout when none is given
pub(crate) fn write(report: &Report, output_path: Option<&Path>) -> Result<()> {
    let doc = StructuredReport::from_report(report);
    let json = serde_json::to_string_pretty(&doc).into_diagnostic()?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &json)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write report to {}", path.display()))?;
            println!("Report written to: {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
