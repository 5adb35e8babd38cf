//! Bibstat Archive - author and keyword statistics for a journal archive
//!
//! Reads a bibliographic CSV export, keeps the rows registered by one
//! institution, and derives per-author and per-keyword summary tables.
//!
//! # Example
//!
//! ```ignore
//! use bibstat_archive::{Archive, ArchiveConfig, Field};
//!
//! let archive = Archive::load("articles.csv".as_ref(), &ArchiveConfig::default())?;
//! let smith = archive.summaries(Field::Authors).get("Smith, Jane");
//! ```

pub mod aggregate;
pub mod archive;
pub mod error;
pub mod export;
pub mod filter;
pub mod load;
pub mod manifest;
pub mod record;
pub mod tally;
pub mod tokenize;
pub mod view;
pub mod vocabulary;

// Re-exports
pub use aggregate::{Summaries, SummaryTable, TokenSummary, aggregate, aggregate_with};
pub use archive::{Archive, ArchiveConfig};
pub use error::ArchiveError;
pub use filter::{Selection, filter_by_tokens};
pub use load::{LoadStats, load_articles, read_articles};
pub use manifest::ExportManifest;
pub use record::{Article, Field, RawArticle};
pub use view::{LinkTemplates, Links, SortKey, YearBucket};
pub use vocabulary::Vocabulary;
