//! The immutable data bundle every view reads from

use std::path::Path;

use anyhow::{Context, Result};

use crate::aggregate::{Summaries, SummaryTable, aggregate_with};
use crate::error::ArchiveError;
use crate::export;
use crate::load::{LoadStats, load_articles};
use crate::manifest::ExportManifest;
use crate::record::{Article, Field};
use crate::vocabulary::Vocabulary;

/// Settings that shape how an export becomes an archive.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Substring an NBN must contain for its row to be kept.
    pub institution_marker: String,
    /// Author tokens hidden from the selection vocabulary.
    pub author_stop_words: Vec<String>,
    /// Keyword tokens hidden from the selection vocabulary.
    pub keyword_stop_words: Vec<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            institution_marker: "nordiskamuseet".to_string(),
            author_stop_words: Vec::new(),
            keyword_stop_words: Vec::new(),
        }
    }
}

/// Articles, both summary tables and the selection vocabularies.
///
/// Built once, then only read.
#[derive(Debug)]
pub struct Archive {
    articles: Vec<Article>,
    summaries: Summaries,
    author_vocabulary: Vocabulary,
    keyword_vocabulary: Vocabulary,
    stats: LoadStats,
}

impl Archive {
    /// Read the export at `path` and derive everything from it.
    pub fn load(path: &Path, config: &ArchiveConfig) -> Result<Self, ArchiveError> {
        let (articles, stats) = load_articles(path, &config.institution_marker)?;
        stats.log();
        Ok(Self::from_articles(articles, stats, config))
    }

    pub fn from_articles(articles: Vec<Article>, stats: LoadStats, config: &ArchiveConfig) -> Self {
        let authors = Vocabulary::build(&articles, Field::Authors, &[]);
        let keywords = Vocabulary::build(&articles, Field::Keywords, &[]);
        let summaries = aggregate_with(&articles, &authors, &keywords);
        let author_vocabulary = authors.without(&config.author_stop_words);
        let keyword_vocabulary = keywords.without(&config.keyword_stop_words);
        Self {
            articles,
            summaries,
            author_vocabulary,
            keyword_vocabulary,
            stats,
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn summaries(&self, field: Field) -> &SummaryTable {
        match field {
            Field::Authors => &self.summaries.authors,
            Field::Keywords => &self.summaries.keywords,
        }
    }

    /// Selection vocabulary (stop words removed).
    pub fn vocabulary(&self, field: Field) -> &Vocabulary {
        match field {
            Field::Authors => &self.author_vocabulary,
            Field::Keywords => &self.keyword_vocabulary,
        }
    }

    /// Article by PID.
    pub fn article(&self, pid: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.pid == pid)
    }

    /// Write the three derived tables and the manifest into `dir`,
    /// replacing any previous run.
    pub fn write_outputs(
        &self,
        dir: &Path,
        input_file: &Path,
        marker: &str,
    ) -> Result<ExportManifest> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output dir: {}", dir.display()))?;

        // Stage every table before replacing any of them
        let articles = export::articles_sink(dir, &self.articles)
            .with_context(|| format!("Failed to write {}", export::ARTICLES_FILE))?;
        let authors = export::summaries_sink(dir, &self.summaries.authors)
            .with_context(|| format!("Failed to write {}", export::AUTHORS_FILE))?;
        let keywords = export::summaries_sink(dir, &self.summaries.keywords)
            .with_context(|| format!("Failed to write {}", export::KEYWORDS_FILE))?;

        let mut counts = [0; 3];
        for (count, sink) in counts.iter_mut().zip([articles, authors, keywords]) {
            *count = sink.finalize().context("Failed to move derived table into place")?;
        }
        let [articles, authors, keywords] = counts;
        log::debug!("Wrote {articles} articles, {authors} authors, {keywords} keywords");

        let manifest = ExportManifest::new(
            input_file,
            marker,
            self.stats,
            (authors, keywords),
            dir,
            &[
                export::ARTICLES_FILE,
                export::AUTHORS_FILE,
                export::KEYWORDS_FILE,
            ],
        )?;
        manifest.write_to(dir)?;
        Ok(manifest)
    }
}
