//! The CheckError type for wrapping the findings of a failed check run.

use std::fmt;

use crate::error::Diagnostic;

/// Error type for a check run that found at least one error.
///
/// Wraps every diagnostic of the run, warnings included, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckError {
    diagnostics: Vec<Diagnostic>,
}

impl CheckError {
    /// Create a new check error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of diagnostics with error severity.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity().is_error())
            .count()
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{first}")?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for CheckError {}

impl From<Diagnostic> for CheckError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for CheckError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_check_error_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::AC013);
        let err: CheckError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "test error");
    }

    #[test]
    fn test_error_count_ignores_warnings() {
        let err = CheckError::new(vec![
            Diagnostic::error("error 1"),
            Diagnostic::warning("warning 1"),
            Diagnostic::error("error 2"),
        ]);

        assert_eq!(err.error_count(), 2);
    }

    #[test]
    fn test_check_error_display_single() {
        let err: CheckError = Diagnostic::error("port not used").into();

        assert_eq!(err.to_string(), "error: port not used");
    }

    #[test]
    fn test_check_error_display_multiple() {
        let err: CheckError = vec![
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
            Diagnostic::error("third error"),
        ]
        .into();

        assert_eq!(err.to_string(), "error: first error (+2 more)");
    }
}
