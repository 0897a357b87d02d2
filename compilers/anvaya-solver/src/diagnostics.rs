use std::fmt;

use anvaya_protocol::LineNumber;
use tracing::debug;

/// One rule violation, tied to the line of the row that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: LineNumber,
    pub rule: &'static str,
    pub message: String,
    /// Extra lines echoing the offending field values.
    pub details: Vec<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in line {} - {}", self.line, self.message)?;
        for detail in &self.details {
            write!(f, "\n{detail}")?;
        }
        Ok(())
    }
}

/// Append-only diagnostic stream. Reporting never fails and never stops a scan.
#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, line: LineNumber, rule: &'static str, message: impl Into<String>) {
        self.report_with_details(line, rule, message, Vec::new());
    }

    pub fn report_with_details(
        &mut self,
        line: LineNumber,
        rule: &'static str,
        message: impl Into<String>,
        details: Vec<String>,
    ) {
        let message = message.into();
        debug!(%line, rule, %message, "violation");
        self.diagnostics.push(Diagnostic {
            line,
            rule,
            message,
            details,
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_details() {
        let mut reporter = Reporter::new();
        reporter.report(LineNumber::new(4), "self-loop", "Self Loop Detected");
        reporter.report_with_details(
            LineNumber::new(5),
            "gender-color",
            "check the following details:",
            vec!["Morph Analysis: {पुं;3;एक}".into(), "bgcolor: N1".into()],
        );

        let lines: Vec<String> = reporter.diagnostics().iter().map(|d| d.to_string()).collect();
        assert_eq!(lines[0], "Error in line 4 - Self Loop Detected");
        assert_eq!(
            lines[1],
            "Error in line 5 - check the following details:\nMorph Analysis: {पुं;3;एक}\nbgcolor: N1"
        );
    }
}
