//! External error-reporting collaborator
//!
//! A reporter observes every record that passes the threshold, e.g. to forward
//! it as a breadcrumb or event to a crash-reporting service. Reporting is best
//! effort: failures never reach the caller of the logging API.

use super::error::Result;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity vocabulary of the reporting service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<LogLevel> for ReportSeverity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Alert | LogLevel::Notice | LogLevel::Info => ReportSeverity::Info,
            LogLevel::Debug => ReportSeverity::Debug,
            LogLevel::Error => ReportSeverity::Error,
            LogLevel::Emergency | LogLevel::Critical | LogLevel::Warning => {
                ReportSeverity::Warning
            }
        }
    }
}

impl fmt::Display for ReportSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportSeverity::Debug => "debug",
            ReportSeverity::Info => "info",
            ReportSeverity::Warning => "warning",
            ReportSeverity::Error => "error",
        };
        f.write_str(name)
    }
}

/// Receives finished messages for accepted records
pub trait Reporter: Send + Sync {
    fn capture_message(&self, severity: ReportSeverity, message: &str) -> Result<()>;
}

impl<F> Reporter for F
where
    F: Fn(ReportSeverity, &str) -> Result<()> + Send + Sync,
{
    fn capture_message(&self, severity: ReportSeverity, message: &str) -> Result<()> {
        self(severity, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        use LogLevel::*;
        let expected = [
            (Emergency, ReportSeverity::Warning),
            (Alert, ReportSeverity::Info),
            (Critical, ReportSeverity::Warning),
            (Error, ReportSeverity::Error),
            (Warning, ReportSeverity::Warning),
            (Notice, ReportSeverity::Info),
            (Info, ReportSeverity::Info),
            (Debug, ReportSeverity::Debug),
        ];
        for (level, severity) in expected {
            assert_eq!(ReportSeverity::from(level), severity, "{}", level);
        }
    }

    #[test]
    fn test_closure_reporter() {
        let reporter = |severity: ReportSeverity, message: &str| -> Result<()> {
            assert_eq!(severity, ReportSeverity::Error);
            assert_eq!(message, "boom");
            Ok(())
        };
        reporter.capture_message(ReportSeverity::Error, "boom").unwrap();
    }
}
