//! Non-fatal extraction warnings.

use std::fmt;

/// The unit a warning was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningScope {
    /// Document properties
    Metadata,
    /// A whole page
    Page,
    /// A shape's connections
    Connection,
    /// A page-level media probe
    Media,
}

impl fmt::Display for WarningScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningScope::Metadata => "metadata",
            WarningScope::Page => "page",
            WarningScope::Connection => "connection",
            WarningScope::Media => "media",
        };
        f.write_str(name)
    }
}

/// A recovered failure: the affected unit contributed nothing and
/// processing continued with its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionWarning {
    /// Kind of unit that failed
    pub scope: WarningScope,
    /// Which unit failed (page name, shape id, probe name)
    pub subject: String,
    /// Reader's failure message
    pub message: String,
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.scope, self.subject, self.message)
    }
}

/// Warning sink threaded through extraction.
///
/// Every warning is forwarded to the `log` facade and kept for the caller.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<ExtractionWarning>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(
        &mut self,
        scope: WarningScope,
        subject: impl Into<String>,
        message: impl fmt::Display,
    ) {
        let warning = ExtractionWarning {
            scope,
            subject: subject.into(),
            message: message.to_string(),
        };
        log::warn!("Failed to extract {}", warning);
        self.warnings.push(warning);
    }

    /// Recorded warnings, in order.
    pub fn warnings(&self) -> &[ExtractionWarning] {
        &self.warnings
    }

    /// Consume the sink, returning its warnings.
    pub fn into_warnings(self) -> Vec<ExtractionWarning> {
        self.warnings
    }
}
