//! Reading the bibliographic CSV export

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bibstat_core::{fmt_num, pct};

use crate::error::ArchiveError;
use crate::record::{Article, RawArticle};

/// Columns without which no summary can be built.
const REQUIRED_COLUMNS: [&str; 3] = ["Name", "Year", "NBN"];

/// Counters from one pass over the export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows read (header excluded)
    pub rows_scanned: usize,
    /// Rows whose NBN carries the institution marker
    pub retained: usize,
    /// Rows registered by other institutions
    pub excluded: usize,
}

impl LoadStats {
    pub fn log(&self) {
        log::info!(
            "Retained {} / {} rows ({:.1}%), {} from other institutions",
            fmt_num(self.retained),
            fmt_num(self.rows_scanned),
            pct(self.retained, self.rows_scanned),
            fmt_num(self.excluded)
        );
    }
}

/// Read articles from any CSV source, keeping rows whose NBN contains `marker`.
///
/// The first malformed retained row aborts the read. Excluded rows are not
/// validated.
pub fn read_articles<R: Read>(
    reader: R,
    marker: &str,
) -> Result<(Vec<Article>, LoadStats), ArchiveError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ArchiveError::MissingColumn(column));
        }
    }

    let mut stats = LoadStats::default();
    let mut articles = Vec::new();
    for (i, result) in rdr.deserialize::<RawArticle>().enumerate() {
        let raw = result?;
        stats.rows_scanned += 1;
        if !raw.is_retained(marker) {
            stats.excluded += 1;
            continue;
        }
        articles.push(raw.into_article(i + 1)?);
        stats.retained += 1;
    }
    Ok((articles, stats))
}

/// Read articles from a CSV file on disk.
pub fn load_articles(path: &Path, marker: &str) -> Result<(Vec<Article>, LoadStats), ArchiveError> {
    log::debug!("Reading {}", path.display());
    let file = File::open(path)?;
    read_articles(BufReader::new(file), marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "PID,Name,Title,Keywords,StartPage,EndPage,Year,NBN,Extra\n";

    #[test]
    fn reads_and_filters_by_marker() {
        let csv = format!(
            "{HEADER}\
             1,\"Smith, Jane;Doe, John\",Costume,folklore;textiles,10,14,1950,urn:nbn:se:nordiskamuseet:diva-1,x\n\
             2,\"Smith, Jane\",Copy,folklore,10,14,1950,urn:nbn:se:su:diva-9,x\n\
             3,\"Doe, John\",Houses,,,,1960,urn:nbn:se:nordiskamuseet:diva-3,x\n"
        );
        let (articles, stats) = read_articles(csv.as_bytes(), "nordiskamuseet").unwrap();
        assert_eq!(
            stats,
            LoadStats {
                rows_scanned: 3,
                retained: 2,
                excluded: 1
            }
        );
        assert_eq!(articles[0].authors, vec!["Smith, Jane", "Doe, John"]);
        assert_eq!(articles[0].page_count(), Some(5));
        assert!(articles[1].keywords.is_empty());
        assert_eq!(articles[1].pid, "3");
    }

    #[test]
    fn excluded_rows_are_not_validated() {
        let csv = format!("{HEADER}1,A,T,,,,,urn:nbn:se:su:diva-1,x\n");
        let (articles, stats) = read_articles(csv.as_bytes(), "nordiskamuseet").unwrap();
        assert!(articles.is_empty());
        assert_eq!(stats.excluded, 1);
    }

    #[test]
    fn malformed_retained_row_aborts() {
        let csv = format!(
            "{HEADER}\
             1,A,T,,,,1950,nordiskamuseet,x\n\
             2,B,T,,,,,nordiskamuseet,x\n"
        );
        let err = read_articles(csv.as_bytes(), "nordiskamuseet").unwrap_err();
        assert_eq!(err.to_string(), "row 2: missing Year");
    }

    #[test]
    fn padded_header_names_still_match() {
        let csv = "PID, Name, Title, Keywords, StartPage, EndPage, Year, NBN\n\
                   1,A,T,k,1,2,1950,nordiskamuseet\n";
        let (articles, stats) = read_articles(csv.as_bytes(), "nordiskamuseet").unwrap();
        assert_eq!(stats.retained, 1);
        assert_eq!(stats.excluded, 0);
        assert_eq!(articles[0].authors, vec!["A"]);
        assert_eq!(articles[0].year, 1950);
        assert_eq!(articles[0].page_count(), Some(2));
    }

    #[test]
    fn missing_required_column() {
        let csv = "Name,Title\nA,T\n";
        let err = read_articles(csv.as_bytes(), "nordiskamuseet").unwrap_err();
        assert!(matches!(err, ArchiveError::MissingColumn("Year")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_articles(&dir.path().join("nope.csv"), "x").unwrap_err();
        assert!(matches!(err, ArchiveError::Io(_)));
    }
}
