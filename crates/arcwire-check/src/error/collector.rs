//! Collector for accumulating diagnostics during a check run.
//!
//! A check run reports every finding instead of stopping at the first one;
//! the [`DiagnosticCollector`] gathers them in emission order.

use crate::error::{CheckError, Diagnostic};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Emit every diagnostic of a sequence, keeping its order.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(CheckError)` with all diagnostics,
    ///   warnings included.
    /// - Otherwise returns the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, CheckError> {
        if self.has_errors {
            Err(CheckError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert_eq!(collector.finish().unwrap(), Vec::new());
    }

    #[test]
    fn test_collector_emit_error_finish_err() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("test error"));

        assert!(collector.finish().is_err());
    }

    #[test]
    fn test_collector_warnings_are_returned() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::warning("warning 2"));

        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_collector_keeps_order_and_warnings_on_error() {
        let mut collector = DiagnosticCollector::new();

        collector.extend([
            Diagnostic::warning("first").with_code(ErrorCode::AC009),
            Diagnostic::error("second").with_code(ErrorCode::AC008),
        ]);

        let err = collector.finish().unwrap_err();
        let messages: Vec<_> = err.diagnostics().iter().map(|d| d.message()).collect();
        assert_eq!(messages, ["first", "second"]);
    }
}
