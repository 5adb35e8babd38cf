//! Read-only views over an [`Archive`]: rankings, per-year breakdowns,
//! co-occurrence lists and article links.

use std::collections::BTreeMap;

use crate::aggregate::{SummaryTable, TokenSummary};
use crate::archive::Archive;
use crate::record::{Article, Field};

/// Column a summary ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Most articles first
    Articles,
    /// Most pages first
    Pages,
    /// Earliest first
    Period,
}

/// Summary rows in ranking order, ties broken by token.
///
/// `limit` keeps only the first `n` rows.
pub fn ranked(table: &SummaryTable, key: SortKey, limit: Option<usize>) -> Vec<&TokenSummary> {
    let mut rows: Vec<&TokenSummary> = table.rows.iter().collect();
    match key {
        SortKey::Articles => rows.sort_by(|a, b| {
            b.articles_total
                .cmp(&a.articles_total)
                .then_with(|| a.token.cmp(&b.token))
        }),
        SortKey::Pages => rows.sort_by(|a, b| {
            b.pages_total
                .cmp(&a.pages_total)
                .then_with(|| a.token.cmp(&b.token))
        }),
        SortKey::Period => rows.sort_by(|a, b| {
            a.earliest_year
                .cmp(&b.earliest_year)
                .then_with(|| a.token.cmp(&b.token))
        }),
    }
    if let Some(n) = limit {
        rows.truncate(n);
    }
    rows
}

/// Articles and pages published in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBucket {
    pub year: i32,
    pub articles: usize,
    pub pages: i64,
}

/// Per-year totals, oldest year first.
pub fn by_year(articles: &[&Article]) -> Vec<YearBucket> {
    let mut years: BTreeMap<i32, YearBucket> = BTreeMap::new();
    for a in articles {
        let bucket = years.entry(a.year).or_insert(YearBucket {
            year: a.year,
            articles: 0,
            pages: 0,
        });
        bucket.articles += 1;
        bucket.pages += a.page_count().map_or(0, i64::from);
    }
    years.into_values().collect()
}

/// Co-occurring tokens of `token` in `field`; empty when the token is unknown.
pub fn co_occurring<'a>(archive: &'a Archive, field: Field, token: &str) -> &'a [(String, usize)] {
    archive
        .summaries(field)
        .get(token)
        .map(|row| row.co_occurring.as_slice())
        .unwrap_or(&[])
}

/// URL templates for an article. `{nbn}`, `{pid}` and `{pdf}` are replaced.
#[derive(Debug, Clone)]
pub struct LinkTemplates {
    pub resolver: String,
    pub pdf: String,
    pub voyant: String,
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self {
            resolver: "https://urn.kb.se/resolve?urn={nbn}".to_string(),
            pdf: "http://nordiskamuseet.diva-portal.org/smash/get/diva2:{pid}/FULLTEXT01.pdf"
                .to_string(),
            voyant: "http://voyant-tools.org/?input={pdf}&stopList=stop.se.swedish-long.txt\
                     &panels=cirrus,reader,trends,summary,contexts"
                .to_string(),
        }
    }
}

/// Outbound links for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    pub resolver: String,
    pub pdf: String,
    pub voyant: String,
}

impl LinkTemplates {
    pub fn render(&self, article: &Article) -> Links {
        let fill = |t: &str| t.replace("{nbn}", &article.nbn).replace("{pid}", &article.pid);
        let pdf = fill(&self.pdf);
        let voyant = fill(&self.voyant).replace("{pdf}", &pdf);
        Links {
            resolver: fill(&self.resolver),
            pdf,
            voyant,
        }
    }
}
