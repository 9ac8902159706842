//! Report rendering.

use std::io::Write;

use clap::ValueEnum;
use protoval_core::ValidationReport;

/// How a report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Errors, then warnings, then a one-line summary.
    #[default]
    Text,
    /// The report's JSON wire form.
    Json,
}

/// Write `report` in `format`.
pub fn render(
    report: &ValidationReport,
    format: OutputFormat,
    pretty: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => render_text(report, out)?,
        OutputFormat::Json => writeln!(out, "{}", report.to_json(pretty)?)?,
    }
    Ok(())
}

/// Plain-text rendering.
pub fn render_text(report: &ValidationReport, out: &mut dyn Write) -> std::io::Result<()> {
    if !report.errors.is_empty() {
        writeln!(out, "Errors ({}):", report.errors.len())?;
        for issue in &report.errors {
            writeln!(out, "  - {issue}")?;
        }
    }
    if !report.warnings.is_empty() {
        writeln!(out, "Warnings ({}):", report.warnings.len())?;
        for issue in &report.warnings {
            writeln!(out, "  - {issue}")?;
        }
    }
    writeln!(out, "{}", summary(report))
}

/// One line stating the outcome and the counts.
pub fn summary(report: &ValidationReport) -> String {
    let salient = &report.salient;
    let verdict = if report.is_valid() { "VALID" } else { "INVALID" };
    format!(
        "{verdict}: {} error(s), {} warning(s) [{} container(s), {} tool(s), {} instruction(s)]",
        report.errors.len(),
        report.warnings.len(),
        salient.container_count,
        salient.tool_count,
        salient.instruction_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoval_core::{Findings, Issue, Salient};
    use serde_json::json;

    fn report() -> ValidationReport {
        let mut findings = Findings::new();
        findings.push_error(Issue::semantic("instruction #1: tool \"p10\" is not defined in the head"));
        findings.push_warning(Issue::structural("protocol does not define a \"info\" section"));
        ValidationReport::new(
            json!({}),
            Salient {
                container_count: 2,
                tool_count: 1,
                instruction_count: 1,
            },
            findings,
        )
    }

    fn rendered(format: OutputFormat, pretty: bool) -> String {
        let mut out = Vec::new();
        render(&report(), format, pretty, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_lists_errors_then_warnings() {
        let text = rendered(OutputFormat::Text, false);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Errors (1):");
        assert_eq!(lines[1], "  - instruction #1: tool \"p10\" is not defined in the head");
        assert_eq!(lines[2], "Warnings (1):");
        assert_eq!(
            lines[4],
            "INVALID: 1 error(s), 1 warning(s) [2 container(s), 1 tool(s), 1 instruction(s)]"
        );
    }

    #[test]
    fn test_clean_report_is_summary_only() {
        let clean = ValidationReport::new(json!({}), Salient::default(), Findings::new());
        let mut out = Vec::new();
        render_text(&clean, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "VALID: 0 error(s), 0 warning(s) [0 container(s), 0 tool(s), 0 instruction(s)]\n"
        );
    }

    #[test]
    fn test_json_is_wire_form() {
        let compact = rendered(OutputFormat::Json, false);
        assert_eq!(compact.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(value["salient"]["containerCount"], 2);
        assert_eq!(value["errors"][0], "instruction #1: tool \"p10\" is not defined in the head");

        let pretty = rendered(OutputFormat::Json, true);
        assert!(pretty.lines().count() > 1);
    }
}
