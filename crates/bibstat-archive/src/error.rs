//! Error type for loading an article export

/// Error from reading or validating the article export.
///
/// Any of these aborts the load: there is no row-level recovery, a bad row
/// means the derived tables would be wrong.
#[derive(Debug)]
pub enum ArchiveError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// The header row lacks a column the aggregation cannot do without.
    MissingColumn(&'static str),
    /// A retained row is missing a mandatory value or holds a non-numeric one.
    /// `row` is the 1-based data row (header excluded).
    MalformedRow { row: usize, reason: String },
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO: {e}"),
            Self::Csv(e) => write!(f, "CSV: {e}"),
            Self::MissingColumn(c) => write!(f, "missing column {c:?}"),
            Self::MalformedRow { row, reason } => write!(f, "row {row}: {reason}"),
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::MissingColumn(_) | Self::MalformedRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for ArchiveError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl ArchiveError {
    pub(crate) fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            row,
            reason: reason.into(),
        }
    }
}
