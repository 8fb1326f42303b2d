use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;

use fr_lang::{Diagnostic, Diagnostics, Dispatcher, Model, Options, Severity};

/// Outcome of validating one model snapshot.
#[derive(Debug)]
pub struct Report {
    pub model: Model,
    pub diagnostics: Diagnostics,
}

impl Report {
    /// Whether the run should end with a failing exit status.
    pub fn failed(&self, deny_warnings: bool) -> bool {
        self.diagnostics.has_errors() || (deny_warnings && self.diagnostics.warning_count() > 0)
    }
}

/// Load a JSON snapshot and run every checker over it.
pub fn check_file(path: &Path, options: Options) -> Result<Report> {
    let model = Model::load(path)?;
    tracing::debug!(
        domain = "cli",
        model = %model.name,
        interfaces = model.interfaces.len(),
        types = model.types.len(),
        "model loaded"
    );
    let diagnostics = Dispatcher::new(options).run(&model);
    Ok(Report { model, diagnostics })
}

/// One diagnostic line: `error[kind]: message (at interface I / method m)`.
pub fn format_diag(model: &Model, diag: &Diagnostic, color: bool) -> String {
    let location = model.describe(diag.node);
    if !color {
        return format!("{diag} (at {location})");
    }
    let code = match diag.severity {
        Severity::Error => "\x1b[1;31m",            // bold red
        Severity::Warning => "\x1b[1;38;5;208m",    // bold orange
    };
    format!(
        "{code}{}\x1b[0m[{}]: {} \x1b[2m(at {location})\x1b[0m",
        diag.severity.label(),
        diag.kind.code(),
        diag.message
    )
}

/// `N error(s), M warning(s)`, or `No issues found.`
pub fn summary(diagnostics: &Diagnostics) -> String {
    if diagnostics.is_empty() {
        return "No issues found.".to_string();
    }
    format!(
        "{} error(s), {} warning(s)",
        diagnostics.error_count(),
        diagnostics.warning_count()
    )
}

/// Print the diagnostics of `file`; `Ok(false)` when the run must fail.
pub fn run(file: &Path, options: Options, deny_warnings: bool, json: bool) -> Result<bool> {
    let report = check_file(file, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.diagnostics)?);
    } else {
        let color = std::io::stderr().is_terminal();
        for diag in &report.diagnostics {
            eprintln!("{}", format_diag(&report.model, diag, color));
        }
        if !report.diagnostics.is_empty() {
            eprintln!();
        }
        eprintln!("{}", summary(&report.diagnostics));
    }

    Ok(!report.failed(deny_warnings))
}
