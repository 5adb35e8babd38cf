//! Insertion-ordered frequency counter

use rustc_hash::FxHashMap;

/// Counts occurrences of string tokens, remembering first-seen order.
///
/// [`Tally::ranked`] orders by descending count; equal counts keep the order
/// in which tokens were first added.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    index: FxHashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `token`.
    pub fn add(&mut self, token: &str) {
        self.add_n(token, 1);
    }

    /// Count `n` occurrences of `token`. `n == 0` still registers the token.
    pub fn add_n(&mut self, token: &str, n: usize) {
        match self.index.get(token) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), n));
            }
        }
    }

    pub fn extend<'a>(&mut self, tokens: impl IntoIterator<Item = &'a str>) {
        for token in tokens {
            self.add(token);
        }
    }

    pub fn count(&self, token: &str) -> usize {
        self.index.get(token).map_or(0, |&i| self.entries[i].1)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(token, count)` pairs, most frequent first, ties by first-seen order.
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut out = self.entries.clone();
        // stable sort keeps insertion order among equal counts
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_occurrences() {
        let mut t = Tally::new();
        t.extend(["a", "b", "a"]);
        assert_eq!(t.count("a"), 2);
        assert_eq!(t.count("b"), 1);
        assert_eq!(t.count("c"), 0);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn ranked_ties_keep_first_seen_order() {
        let mut t = Tally::new();
        t.extend(["x", "y", "z", "z", "y"]);
        let ranked = t.ranked();
        assert_eq!(
            ranked,
            vec![
                ("y".to_string(), 2),
                ("z".to_string(), 2),
                ("x".to_string(), 1)
            ]
        );
    }

    #[test]
    fn zero_count_registers_token() {
        let mut t = Tally::new();
        t.add_n("ghost", 0);
        assert_eq!(t.len(), 1);
        assert_eq!(t.count("ghost"), 0);
    }

    #[test]
    fn empty_tally() {
        let t = Tally::new();
        assert!(t.is_empty());
        assert!(t.ranked().is_empty());
    }
}
