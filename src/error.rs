use std::fmt;

/// Error kinds surfaced by the summarizer and its collaborators.
///
/// Details (offending row, column name, value) travel as printable
/// attachments on the `error_stack::Report`, not inside the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryError {
    /// Empty path, negative/NaN tolerance or a non-finite coordinate.
    InvalidInput,
    /// The coordinate source or an output file could not be opened.
    Io,
    /// A requested coordinate column is not present in the header.
    MissingColumn,
    /// A row of the coordinate source has a non-numeric field.
    MalformedRow,
    /// The configuration file could not be parsed.
    Config,
    /// Writing a summary failed after the file was opened.
    Output,
}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SummaryError::InvalidInput => "invalid input",
            SummaryError::Io => "could not access file",
            SummaryError::MissingColumn => "coordinate column not found",
            SummaryError::MalformedRow => "malformed coordinate row",
            SummaryError::Config => "invalid configuration",
            SummaryError::Output => "failed to write summary",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for SummaryError {}

pub type Result<T> = error_stack::Result<T, SummaryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use error_stack::Report;

    #[test]
    fn test_report_keeps_kind() {
        let report = Report::new(SummaryError::InvalidInput)
            .attach_printable("path is empty");
        assert_eq!(*report.current_context(), SummaryError::InvalidInput);
        assert!(format!("{:?}", report).contains("path is empty"));
    }

    #[test]
    fn test_display() {
        assert_eq!(SummaryError::MalformedRow.to_string(), "malformed coordinate row");
    }
}
