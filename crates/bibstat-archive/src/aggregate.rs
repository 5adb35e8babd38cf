//! Per-author and per-keyword summary tables.
//!
//! One pass over the article table. Every author token and every keyword
//! token gets an accumulator; each article updates the accumulators of all
//! its tokens and records the tokens of the other field as co-occurring.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use bibstat_core::fmt_num;

use crate::record::{Article, Field};
use crate::tally::Tally;
use crate::vocabulary::Vocabulary;

/// Aggregate statistics for one author or keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSummary {
    pub token: String,
    pub articles_total: usize,
    /// Sum of page counts over the articles that have one.
    pub pages_total: i64,
    pub earliest_year: Option<i32>,
    pub latest_year: Option<i32>,
    /// Mean publication year over all articles of the token.
    pub article_mean: Option<f64>,
    /// Tokens of the other field on the same articles, most frequent first.
    pub co_occurring: Vec<(String, usize)>,
}

impl TokenSummary {
    /// `latest - earliest + 1`.
    pub fn active_years(&self) -> Option<i32> {
        Some(self.latest_year? - self.earliest_year? + 1)
    }

    /// First day of the earliest publication year.
    pub fn earliest_article(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.earliest_year?, 1, 1)
    }

    /// Last day of the latest publication year.
    pub fn latest_article(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.latest_year?, 12, 31)
    }
}

/// Summary rows for every token of one field, in vocabulary order.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    pub field: Field,
    pub rows: Vec<TokenSummary>,
}

impl SummaryTable {
    pub fn get(&self, token: &str) -> Option<&TokenSummary> {
        self.rows.iter().find(|r| r.token == token)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Both summary tables.
#[derive(Debug, Clone)]
pub struct Summaries {
    pub authors: SummaryTable,
    pub keywords: SummaryTable,
}

#[derive(Debug, Default)]
struct TokenAccumulator {
    articles_total: usize,
    pages_total: i64,
    earliest: Option<i32>,
    latest: Option<i32>,
    year_sum: i64,
    co_occurring: Tally,
}

impl TokenAccumulator {
    fn record(&mut self, article: &Article, others: &[String]) {
        self.articles_total += 1;
        if let Some(pages) = article.page_count() {
            self.pages_total += i64::from(pages);
        }
        self.earliest = Some(self.earliest.map_or(article.year, |y| y.min(article.year)));
        self.latest = Some(self.latest.map_or(article.year, |y| y.max(article.year)));
        self.year_sum += i64::from(article.year);
        self.co_occurring.extend(others.iter().map(String::as_str));
    }

    /// `None` when no article was recorded.
    fn finish(self, token: &str) -> Option<TokenSummary> {
        if self.articles_total == 0 {
            return None;
        }
        Some(TokenSummary {
            token: token.to_string(),
            articles_total: self.articles_total,
            pages_total: self.pages_total,
            earliest_year: self.earliest,
            latest_year: self.latest,
            article_mean: Some(self.year_sum as f64 / self.articles_total as f64),
            co_occurring: self.co_occurring.ranked(),
        })
    }
}

/// Accumulators keyed by token, seeded from a vocabulary.
struct Accumulators {
    field: Field,
    index: FxHashMap<String, usize>,
    slots: Vec<(String, TokenAccumulator)>,
}

impl Accumulators {
    fn seeded(vocabulary: &Vocabulary) -> Self {
        let mut acc = Self {
            field: vocabulary.field,
            index: FxHashMap::default(),
            slots: Vec::with_capacity(vocabulary.len()),
        };
        for token in vocabulary.tokens() {
            acc.slot_mut(token);
        }
        acc
    }

    fn slot_mut(&mut self, token: &str) -> &mut TokenAccumulator {
        let i = match self.index.get(token) {
            Some(&i) => i,
            None => {
                let i = self.slots.len();
                self.index.insert(token.to_string(), i);
                self.slots.push((token.to_string(), TokenAccumulator::default()));
                i
            }
        };
        &mut self.slots[i].1
    }

    fn finish(self) -> SummaryTable {
        let field = self.field;
        let mut rows = Vec::with_capacity(self.slots.len());
        for (token, acc) in self.slots {
            match acc.finish(&token) {
                Some(row) => rows.push(row),
                None => log::debug!("{field}: vocabulary token {token:?} without articles dropped"),
            }
        }
        SummaryTable { field, rows }
    }
}

/// Aggregate over `articles`, with vocabularies taken from the same table.
pub fn aggregate(articles: &[Article]) -> Summaries {
    let authors = Vocabulary::build(articles, Field::Authors, &[]);
    let keywords = Vocabulary::build(articles, Field::Keywords, &[]);
    aggregate_with(articles, &authors, &keywords)
}

/// Aggregate over `articles` with accumulators seeded from the given
/// vocabularies.
///
/// Vocabulary tokens that no article carries produce no row. Tokens found
/// on articles but missing from a vocabulary are still summarised.
pub fn aggregate_with(
    articles: &[Article],
    author_vocabulary: &Vocabulary,
    keyword_vocabulary: &Vocabulary,
) -> Summaries {
    let mut authors = Accumulators::seeded(author_vocabulary);
    let mut keywords = Accumulators::seeded(keyword_vocabulary);

    for article in articles {
        for author in &article.authors {
            authors.slot_mut(author).record(article, &article.keywords);
        }
        for keyword in &article.keywords {
            keywords.slot_mut(keyword).record(article, &article.authors);
        }
    }

    let summaries = Summaries {
        authors: authors.finish(),
        keywords: keywords.finish(),
    };
    log::info!(
        "Aggregated {} authors and {} keywords from {} articles",
        fmt_num(summaries.authors.len()),
        fmt_num(summaries.keywords.len()),
        fmt_num(articles.len())
    );
    summaries
}
