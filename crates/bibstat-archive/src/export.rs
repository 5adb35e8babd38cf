//! Derived CSV tables, written with atomic tmp→rename

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::aggregate::{SummaryTable, TokenSummary};
use crate::record::{Article, Field};

pub const ARTICLES_FILE: &str = "articles.csv";
pub const AUTHORS_FILE: &str = "authors.csv";
pub const KEYWORDS_FILE: &str = "keywords.csv";

const ARTICLE_HEADER: [&str; 9] = [
    "Name",
    "Title",
    "Keywords",
    "StartPage",
    "EndPage",
    "Pages",
    "Year",
    "NBN",
    "PID",
];

/// Buffered CSV writer that only replaces the target on `finalize`.
pub struct CsvSink {
    writer: csv::Writer<File>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    row_count: usize,
}

impl std::fmt::Debug for CsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("final_path", &self.final_path)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl CsvSink {
    /// Create `dir/filename.tmp` and write the header row.
    pub fn create(dir: &Path, filename: &str, header: &[&str]) -> io::Result<Self> {
        let final_path = dir.join(filename);
        let tmp_path = dir.join(format!("{filename}.tmp"));

        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let mut writer = csv::Writer::from_writer(File::create(&tmp_path)?);
        writer.write_record(header).map_err(io::Error::other)?;

        Ok(Self {
            writer,
            tmp_path,
            final_path,
            row_count: 0,
        })
    }

    pub fn write_row<I, T>(&mut self, record: I) -> io::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.row_count += 1;
        self.writer.write_record(record).map_err(io::Error::other)
    }

    /// Push buffered rows to the tmp file without touching the target.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Flush and atomically rename tmp → final. Returns rows written.
    pub fn finalize(mut self) -> io::Result<usize> {
        self.writer.flush()?;
        drop(self.writer);
        fs::rename(&self.tmp_path, &self.final_path)?;
        Ok(self.row_count)
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

/// `token (count); token (count)`
pub fn format_co_occurring(list: &[(String, usize)]) -> String {
    list.iter()
        .map(|(token, n)| format!("{token} ({n})"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Column headers of a summary table.
pub fn summary_header(field: Field) -> [&'static str; 8] {
    let (key, used) = match field {
        Field::Authors => ("Name", "KeywordsUsed"),
        Field::Keywords => ("Keyword", "AuthorsUsed"),
    };
    [
        key,
        "ArticlesTotal",
        "PagesTotal",
        "EarliestArticle",
        "LatestArticle",
        "ActiveYears",
        "ArticleMean",
        used,
    ]
}

fn summary_record(row: &TokenSummary) -> [String; 8] {
    [
        row.token.clone(),
        row.articles_total.to_string(),
        row.pages_total.to_string(),
        opt(row.earliest_article()),
        opt(row.latest_article()),
        opt(row.active_years()),
        row.article_mean.map(|m| format!("{m:.2}")).unwrap_or_default(),
        format_co_occurring(&row.co_occurring),
    ]
}

/// Write the cleaned article table.
pub fn write_articles(dir: &Path, articles: &[Article]) -> io::Result<usize> {
    articles_sink(dir, articles)?.finalize()
}

/// Write an author or keyword summary table to its conventional file name.
pub fn write_summaries(dir: &Path, table: &SummaryTable) -> io::Result<usize> {
    summaries_sink(dir, table)?.finalize()
}

/// Article table staged in its tmp file, not yet in place.
pub fn articles_sink(dir: &Path, articles: &[Article]) -> io::Result<CsvSink> {
    let mut sink = CsvSink::create(dir, ARTICLES_FILE, &ARTICLE_HEADER)?;
    for a in articles {
        sink.write_row([
            a.authors_raw.clone(),
            a.title.clone(),
            a.keywords_raw.clone(),
            opt(a.start_page),
            opt(a.end_page),
            opt(a.page_count()),
            a.year.to_string(),
            a.nbn.clone(),
            a.pid.clone(),
        ])?;
    }
    sink.flush()?;
    Ok(sink)
}

/// Summary table staged in its tmp file, not yet in place.
pub fn summaries_sink(dir: &Path, table: &SummaryTable) -> io::Result<CsvSink> {
    let filename = match table.field {
        Field::Authors => AUTHORS_FILE,
        Field::Keywords => KEYWORDS_FILE,
    };
    let mut sink = CsvSink::create(dir, filename, &summary_header(table.field))?;
    for row in &table.rows {
        sink.write_row(summary_record(row))?;
    }
    sink.flush()?;
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::record::RawArticle;
    use tempfile::TempDir;

    fn sample() -> Vec<Article> {
        vec![
            RawArticle {
                name: "Smith, Jane; Doe, John".into(),
                title: "Costume".into(),
                keywords: "folklore; textiles".into(),
                start_page: "10".into(),
                end_page: "14".into(),
                year: "1950".into(),
                nbn: "urn:nbn:se:nordiskamuseet:diva-1".into(),
                pid: "101".into(),
            }
            .into_article(1)
            .unwrap(),
        ]
    }

    #[test]
    fn co_occurring_format() {
        let list = vec![("folklore".to_string(), 3), ("textiles".to_string(), 1)];
        assert_eq!(format_co_occurring(&list), "folklore (3); textiles (1)");
        assert_eq!(format_co_occurring(&[]), "");
    }

    #[test]
    fn writes_article_table() {
        let dir = TempDir::new().unwrap();
        let n = write_articles(dir.path(), &sample()).unwrap();
        assert_eq!(n, 1);

        let text = std::fs::read_to_string(dir.path().join(ARTICLES_FILE)).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,Title,Keywords,StartPage,EndPage,Pages,Year,NBN,PID"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Smith, Jane; Doe, John\",Costume,folklore; textiles,10,14,5,1950,urn:nbn:se:nordiskamuseet:diva-1,101"
        );
        assert!(!dir.path().join("articles.csv.tmp").exists());
    }

    #[test]
    fn writes_summary_tables() {
        let dir = TempDir::new().unwrap();
        let s = aggregate(&sample());
        assert_eq!(write_summaries(dir.path(), &s.authors).unwrap(), 2);
        assert_eq!(write_summaries(dir.path(), &s.keywords).unwrap(), 2);

        let authors = std::fs::read_to_string(dir.path().join(AUTHORS_FILE)).unwrap();
        let mut lines = authors.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,ArticlesTotal,PagesTotal,EarliestArticle,LatestArticle,ActiveYears,ArticleMean,KeywordsUsed"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Smith, Jane\",1,5,1950-01-01,1950-12-31,1,1950.00,folklore (1); textiles (1)"
        );

        let keywords = std::fs::read_to_string(dir.path().join(KEYWORDS_FILE)).unwrap();
        assert!(keywords.starts_with("Keyword,"));
        assert!(keywords.contains("AuthorsUsed"));
    }

    #[test]
    fn rewrite_overwrites_previous_output() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(ARTICLES_FILE), "stale").unwrap();
        std::fs::write(dir.path().join("articles.csv.tmp"), "stale tmp").unwrap();
        write_articles(dir.path(), &sample()).unwrap();
        let text = std::fs::read_to_string(dir.path().join(ARTICLES_FILE)).unwrap();
        assert!(text.starts_with("Name,"));
    }
}
