//! Distinct tokens of a field with article frequencies

use crate::record::{Article, Field};
use crate::tally::Tally;

/// Tokens of one field, most frequent first.
///
/// Frequency is the number of articles carrying the token. Ties keep the
/// order in which the token first appears in the article table.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub field: Field,
    entries: Vec<(String, usize)>,
}

impl Vocabulary {
    /// Build the vocabulary of `field`, leaving out any token in `stop_list`.
    pub fn build(articles: &[Article], field: Field, stop_list: &[String]) -> Self {
        let mut tally = Tally::new();
        for article in articles {
            tally.extend(article.tokens(field).iter().map(String::as_str));
        }
        Self {
            field,
            entries: tally.ranked(),
        }
        .without(stop_list)
    }

    /// Copy with every token in `stop_list` removed, rank order kept.
    pub fn without(&self, stop_list: &[String]) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|(token, _)| !stop_list.iter().any(|s| s == token))
            .cloned()
            .collect();
        Self {
            field: self.field,
            entries,
        }
    }

    /// Vocabulary from explicit `(token, frequency)` pairs, kept in the given order.
    pub fn from_entries(field: Field, entries: Vec<(String, usize)>) -> Self {
        Self { field, entries }
    }

    /// `(token, frequency)` pairs in rank order.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Token projection, e.g. for a selection list.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
