//! End-to-end: export CSV on disk → archive → derived tables + manifest

use std::path::Path;

use bibstat_archive::view::{self, SortKey};
use bibstat_archive::{Archive, ArchiveConfig, ExportManifest, Field, Selection};
use tempfile::TempDir;

const EXPORT: &str = "\
PID,Name,Title,Keywords,StartPage,EndPage,Year,NBN
101,\"Smith, Jane;Doe, John\",Costume studies,folklore;textiles,10,14,1950,urn:nbn:se:nordiskamuseet:diva-101
102,\"Smith, Jane\",Costume studies,folklore;textiles,10,14,1950,urn:nbn:se:su:diva-9
103,\"Doe, John\",Farmhouses,folklore,20,39,1962,urn:nbn:se:nordiskamuseet:diva-103
104,\"Berg, Anna\",Annual report,nan,,,1971,urn:nbn:se:nordiskamuseet:diva-104
105,\"Smith, Jane\",Weaving,textiles,1,8,1935,urn:nbn:se:nordiskamuseet:diva-105
";

fn write_export(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("export.csv");
    std::fs::write(&path, EXPORT).unwrap();
    path
}

fn load(dir: &Path) -> Archive {
    Archive::load(&write_export(dir), &ArchiveConfig::default()).unwrap()
}

#[test]
fn other_institutions_are_excluded() {
    let dir = TempDir::new().unwrap();
    let archive = load(dir.path());

    let stats = archive.stats();
    assert_eq!(stats.rows_scanned, 5);
    assert_eq!(stats.retained, 4);
    assert_eq!(stats.excluded, 1);
    assert!(archive.article("102").is_none());

    // the excluded copy would have given Smith a second 1950 article
    let smith = archive.summaries(Field::Authors).get("Smith, Jane").unwrap();
    assert_eq!(smith.articles_total, 2);
}

#[test]
fn author_and_keyword_summaries() {
    let dir = TempDir::new().unwrap();
    let archive = load(dir.path());

    let smith = archive.summaries(Field::Authors).get("Smith, Jane").unwrap();
    assert_eq!(smith.pages_total, 5 + 8);
    assert_eq!(smith.earliest_year, Some(1935));
    assert_eq!(smith.latest_year, Some(1950));
    assert_eq!(smith.active_years(), Some(16));
    assert_eq!(
        smith.co_occurring,
        vec![("textiles".to_string(), 2), ("folklore".to_string(), 1)]
    );

    let berg = archive.summaries(Field::Authors).get("Berg, Anna").unwrap();
    assert_eq!(berg.articles_total, 1);
    assert_eq!(berg.pages_total, 0);
    assert!(berg.co_occurring.is_empty());

    let folklore = archive.summaries(Field::Keywords).get("folklore").unwrap();
    assert_eq!(folklore.articles_total, 2);
    assert_eq!(folklore.pages_total, 5 + 20);
    assert_eq!(
        folklore.co_occurring,
        vec![("Doe, John".to_string(), 2), ("Smith, Jane".to_string(), 1)]
    );
    assert!(archive.summaries(Field::Keywords).get("nan").is_none());

    let total: usize = archive
        .summaries(Field::Authors)
        .rows
        .iter()
        .map(|r| r.articles_total)
        .sum();
    let expected: usize = archive.articles().iter().map(|a| a.authors.len()).sum();
    assert_eq!(total, expected);
}

#[test]
fn explore_selection_and_rankings() {
    let dir = TempDir::new().unwrap();
    let archive = load(dir.path());

    let sel = Selection {
        keywords: vec!["folklore".into()],
        authors: Vec::new(),
    };
    let hits = sel.apply(archive.articles());
    let pids: Vec<_> = hits.iter().map(|a| a.pid.as_str()).collect();
    assert_eq!(pids, vec!["101", "103"]);

    let years = view::by_year(&hits);
    assert_eq!(years.len(), 2);
    assert_eq!(years[0].year, 1950);

    let top = view::ranked(archive.summaries(Field::Authors), SortKey::Articles, Some(1));
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].articles_total, 2);
}

#[test]
fn prepare_writes_tables_and_manifest() {
    let dir = TempDir::new().unwrap();
    let input = write_export(dir.path());
    let archive = Archive::load(&input, &ArchiveConfig::default()).unwrap();
    let out = dir.path().join("out");

    let manifest = archive
        .write_outputs(&out, &input, "nordiskamuseet")
        .unwrap();
    assert_eq!(manifest.retained, 4);
    assert_eq!(manifest.authors, 3);
    assert_eq!(manifest.keywords, 2);
    assert_eq!(manifest.file_hashes.len(), 3);

    for name in ["articles.csv", "authors.csv", "keywords.csv", "manifest.json"] {
        assert!(out.join(name).exists(), "{name} missing");
    }
    let articles = std::fs::read_to_string(out.join("articles.csv")).unwrap();
    assert_eq!(articles.lines().count(), 5);

    let back = ExportManifest::read_from(&out).unwrap();
    assert!(!back.is_stale(&input, "nordiskamuseet").unwrap());
    assert!(back.is_stale(&input, "su").unwrap());
    assert!(back.modified_outputs(&out).is_empty());

    // second run replaces output byte-for-byte
    let before = std::fs::read(out.join("authors.csv")).unwrap();
    archive
        .write_outputs(&out, &input, "nordiskamuseet")
        .unwrap();
    assert_eq!(before, std::fs::read(out.join("authors.csv")).unwrap());
}

#[test]
fn malformed_retained_row_aborts_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(
        &path,
        "PID,Name,Title,Keywords,StartPage,EndPage,Year,NBN\n\
         1,A,T,,,,,urn:nbn:se:nordiskamuseet:diva-1\n",
    )
    .unwrap();
    let err = Archive::load(&path, &ArchiveConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "row 1: missing Year");
}
