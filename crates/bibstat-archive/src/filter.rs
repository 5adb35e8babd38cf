//! Token-set filtering of the article table

use crate::record::{Article, Field};

/// Articles whose `field` carries any of `tokens`.
///
/// Rows matching the first token come first in table order, then rows newly
/// matched by the second token, and so on. A row matching several tokens is
/// returned once. An empty `tokens` selects every row.
pub fn filter_by_tokens<'a, S: AsRef<str>>(
    articles: &[&'a Article],
    field: Field,
    tokens: &[S],
) -> Vec<&'a Article> {
    if tokens.is_empty() {
        return articles.to_vec();
    }
    let mut taken = vec![false; articles.len()];
    let mut out = Vec::new();
    for token in tokens {
        let token = token.as_ref();
        for (i, article) in articles.iter().enumerate() {
            if !taken[i] && article.tokens(field).iter().any(|t| t == token) {
                taken[i] = true;
                out.push(*article);
            }
        }
    }
    out
}

/// Token selection over both fields. Keywords narrow first, then authors.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
}

impl Selection {
    pub fn is_everything(&self) -> bool {
        self.keywords.is_empty() && self.authors.is_empty()
    }

    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        let all: Vec<&Article> = articles.iter().collect();
        let by_keyword = filter_by_tokens(&all, Field::Keywords, &self.keywords);
        filter_by_tokens(&by_keyword, Field::Authors, &self.authors)
    }
}
