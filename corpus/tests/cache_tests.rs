use furqan_corpus::{load_corpus, CachePaths};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn seed_cache(dir: &std::path::Path) {
    let verses = json!([
        { "verse_key": "1:1", "text_uthmani": "arabic one" },
        { "verse_key": "1:2", "text_uthmani": "arabic two" },
        { "verse_key": "2:255", "text_uthmani": "arabic three" }
    ]);
    let english = json!([
        { "text": "In the name of Allah<sup foot_note=\"1\">1</sup>" },
        { "text": "All praise is due to Allah" },
        { "text": "Allah - there is no deity except Him" }
    ]);
    let urdu = json!([
        { "text": "urdu one" },
        { "text": "urdu two" }
    ]);
    fs::write(dir.join("verses.json"), verses.to_string()).unwrap();
    fs::write(dir.join("eng_translations.json"), english.to_string()).unwrap();
    fs::write(dir.join("urdu_translations.json"), urdu.to_string()).unwrap();
}

#[tokio::test]
async fn loads_from_a_complete_cache_without_network() {
    let dir = tempdir().unwrap();
    seed_cache(dir.path());

    let corpus = load_corpus(&CachePaths::new(dir.path())).await.unwrap();
    assert_eq!(corpus.len(), 3);

    let first = corpus.get(0).unwrap();
    assert_eq!(first.key.to_string(), "1:1");
    assert_eq!(first.arabic, "arabic one");
    // Footnote markup is stripped before indexing.
    assert_eq!(first.english, "In the name of Allah");

    // Urdu cache is one short; the last verse gets the placeholder.
    assert_eq!(corpus.get(2).unwrap().urdu, "Urdu translation not available");
}

#[tokio::test]
async fn duplicate_keys_in_cache_fail_the_load() {
    let dir = tempdir().unwrap();
    seed_cache(dir.path());
    let verses = serde_json::json!([
        { "verse_key": "1:1", "text_uthmani": "a" },
        { "verse_key": "1:1", "text_uthmani": "b" }
    ]);
    fs::write(dir.path().join("verses.json"), verses.to_string()).unwrap();

    let result = load_corpus(&CachePaths::new(dir.path())).await;
    assert!(result.is_err());
}
