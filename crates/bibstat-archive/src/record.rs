//! Article rows: raw CSV shape and the validated record

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ArchiveError;
use crate::tokenize;

/// Multi-value column a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Authors,
    Keywords,
}

impl Field {
    /// The other field (authors ↔ keywords).
    pub fn other(self) -> Self {
        match self {
            Self::Authors => Self::Keywords,
            Self::Keywords => Self::Authors,
        }
    }

    /// Column name in the source export.
    pub fn source_column(self) -> &'static str {
        match self {
            Self::Authors => "Name",
            Self::Keywords => "Keywords",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authors => write!(f, "authors"),
            Self::Keywords => write!(f, "keywords"),
        }
    }
}

/// One row of the export as read from CSV. Missing columns read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Keywords", default)]
    pub keywords: String,
    #[serde(rename = "StartPage", default)]
    pub start_page: String,
    #[serde(rename = "EndPage", default)]
    pub end_page: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "NBN", default)]
    pub nbn: String,
    #[serde(rename = "PID", default)]
    pub pid: String,
}

impl RawArticle {
    /// Whether the row belongs to the institution identified by `marker`.
    ///
    /// Other institutions register copies of the same chapters; their NBNs
    /// carry a different marker.
    pub fn is_retained(&self, marker: &str) -> bool {
        !self.nbn.is_empty() && self.nbn.contains(marker)
    }

    /// Validate into an [`Article`]. `row` is used for error messages only.
    pub fn into_article(self, row: usize) -> Result<Article, ArchiveError> {
        let year = parse_int(&self.year)
            .map_err(|v| ArchiveError::malformed(row, format!("non-numeric Year {v:?}")))?
            .ok_or_else(|| ArchiveError::malformed(row, "missing Year"))?;
        if !year_in_range(year) {
            return Err(ArchiveError::malformed(row, format!("Year {year} out of range")));
        }

        let authors = tokenize::tokens(&self.name);
        if authors.is_empty() {
            return Err(ArchiveError::malformed(row, "missing Name (authors)"));
        }

        let start_page = parse_int(&self.start_page)
            .map_err(|v| ArchiveError::malformed(row, format!("non-numeric StartPage {v:?}")))?;
        let end_page = parse_int(&self.end_page)
            .map_err(|v| ArchiveError::malformed(row, format!("non-numeric EndPage {v:?}")))?;
        for (column, page) in [("StartPage", start_page), ("EndPage", end_page)] {
            if let Some(p) = page.filter(|p| *p < 0) {
                return Err(ArchiveError::malformed(row, format!("negative {column} {p}")));
            }
        }
        if let (Some(start), Some(end)) = (start_page, end_page) {
            if end < start {
                log::debug!(
                    "PID {}: page range {start}-{end} is inverted, page count dropped",
                    self.pid.trim()
                );
            }
        }

        let keywords = tokenize::tokens(&self.keywords);

        Ok(Article {
            title: self.title.trim().to_string(),
            authors_raw: self.name,
            keywords_raw: self.keywords,
            authors,
            keywords,
            year,
            start_page,
            end_page,
            pid: self.pid.trim().to_string(),
            nbn: self.nbn.trim().to_string(),
        })
    }
}

/// Parse an integer cell. Empty and `nan` are `None`; `1950.0` is accepted
/// because spreadsheet round-trips write whole numbers that way.
fn parse_int(cell: &str) -> Result<Option<i32>, String> {
    let cell = cell.trim();
    if tokenize::is_absent(cell) {
        return Ok(None);
    }
    if let Ok(v) = cell.parse::<i32>() {
        return Ok(Some(v));
    }
    match cell.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v.abs() <= f64::from(i32::MAX) => Ok(Some(v as i32)),
        _ => Err(cell.to_string()),
    }
}

/// Whether both the first and the last day of `year` are representable dates.
fn year_in_range(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some() && NaiveDate::from_ymd_opt(year, 12, 31).is_some()
}

/// A retained, validated article.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    /// `Name` column as exported, for writing back out.
    pub authors_raw: String,
    /// `Keywords` column as exported, for writing back out.
    pub keywords_raw: String,
    pub authors: Vec<String>,
    pub keywords: Vec<String>,
    pub year: i32,
    pub start_page: Option<i32>,
    pub end_page: Option<i32>,
    pub pid: String,
    pub nbn: String,
}

impl Article {
    /// `EndPage - StartPage + 1`, or `None` if either page is missing or
    /// the range is inverted or wider than `i32`.
    pub fn page_count(&self) -> Option<i32> {
        match (self.start_page, self.end_page) {
            (Some(start), Some(end)) if end >= start => (end - start).checked_add(1),
            _ => None,
        }
    }

    /// Value tokens of `field`.
    pub fn tokens(&self, field: Field) -> &[String] {
        match field {
            Field::Authors => &self.authors,
            Field::Keywords => &self.keywords,
        }
    }

    /// The field as exported.
    pub fn raw(&self, field: Field) -> &str {
        match field {
            Field::Authors => &self.authors_raw,
            Field::Keywords => &self.keywords_raw,
        }
    }
}
