//! Corpus loader: fetches the Quran text and its translations from
//! api.quran.com, caches the raw payloads on disk, strips markup from the
//! translation text, and assembles the ordered corpus the search core
//! indexes. The search core never sees any of this; it only consumes the
//! finished [`Corpus`].

use anyhow::{Context, Result};
use furqan_core::{Corpus, Verse, VerseKey};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const API_BASE: &str = "https://api.quran.com/api/v4";
/// Saheeh International.
const ENGLISH_TRANSLATION_ID: u32 = 131;
/// Ahmed Ali.
const URDU_TRANSLATION_ID: u32 = 54;

const ENGLISH_MISSING: &str = "English translation not available";
const URDU_MISSING: &str = "Urdu translation not available";

#[derive(Debug, Serialize, Deserialize)]
struct RawVerse {
    verse_key: String,
    text_uthmani: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawTranslation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct VersesResponse {
    verses: Vec<RawVerse>,
}

#[derive(Debug, Deserialize)]
struct TranslationsResponse {
    translations: Vec<RawTranslation>,
}

/// Locations of the cached raw payloads under one cache directory.
pub struct CachePaths {
    root: PathBuf,
}

impl CachePaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn verses(&self) -> PathBuf {
        self.root.join("verses.json")
    }

    fn english(&self) -> PathBuf {
        self.root.join("eng_translations.json")
    }

    fn urdu(&self) -> PathBuf {
        self.root.join("urdu_translations.json")
    }
}

lazy_static! {
    // Footnote markers lose their content too; other tags keep it.
    static ref SUP_ELEMENT: Regex = Regex::new(r"(?s)<sup[^>]*>.*?</sup>").expect("valid regex");
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]*>").expect("valid regex");
}

/// Strip markup from translation text: `<sup>` elements are removed
/// entirely, any other tag is dropped keeping its inner text.
pub fn clean_html_tags(text: &str) -> String {
    let without_sup = SUP_ELEMENT.replace_all(text, "");
    ANY_TAG.replace_all(&without_sup, "").into_owned()
}

/// Load the corpus, preferring the on-disk cache and falling back to the
/// API when the cache is absent or unreadable. The process serves nothing
/// until this returns.
pub async fn load_corpus(cache: &CachePaths) -> Result<Corpus> {
    let (verses, english, urdu) = match load_cached(cache) {
        Ok(data) => {
            tracing::info!(cache = %cache.root.display(), "loading Quran data from cache");
            data
        }
        Err(err) => {
            tracing::warn!(%err, "cache unavailable, fetching Quran data from API");
            fetch_and_cache(cache).await?
        }
    };
    assemble(verses, english, urdu)
}

fn load_cached(cache: &CachePaths) -> Result<(Vec<RawVerse>, Vec<RawTranslation>, Vec<RawTranslation>)> {
    let verses = read_json(cache.verses())?;
    let english = read_json(cache.english())?;
    let urdu = read_json(cache.urdu())?;
    Ok((verses, english, urdu))
}

fn read_json<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

async fn fetch_and_cache(
    cache: &CachePaths,
) -> Result<(Vec<RawVerse>, Vec<RawTranslation>, Vec<RawTranslation>)> {
    let client = reqwest::Client::builder().build()?;

    let verses: VersesResponse = fetch_json(&client, &format!("{API_BASE}/quran/verses/uthmani")).await?;
    let english: TranslationsResponse =
        fetch_json(&client, &format!("{API_BASE}/quran/translations/{ENGLISH_TRANSLATION_ID}")).await?;
    let urdu: TranslationsResponse =
        fetch_json(&client, &format!("{API_BASE}/quran/translations/{URDU_TRANSLATION_ID}")).await?;

    fs::create_dir_all(&cache.root)
        .with_context(|| format!("creating cache dir {}", cache.root.display()))?;
    fs::write(cache.verses(), serde_json::to_vec(&verses.verses)?)?;
    fs::write(cache.english(), serde_json::to_vec(&english.translations)?)?;
    fs::write(cache.urdu(), serde_json::to_vec(&urdu.translations)?)?;
    tracing::info!(cache = %cache.root.display(), "Quran data fetched and cached");

    Ok((verses.verses, english.translations, urdu.translations))
}

async fn fetch_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    tracing::debug!(url, "fetching");
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("requesting {url}"))?;
    response.json().await.with_context(|| format!("decoding {url}"))
}

/// Join verses with their translations by position, strip markup, and build
/// the corpus. A translation missing at some position becomes an explicit
/// placeholder rather than an empty field. Malformed or duplicate verse
/// keys abort the load.
fn assemble(
    raw_verses: Vec<RawVerse>,
    english: Vec<RawTranslation>,
    urdu: Vec<RawTranslation>,
) -> Result<Corpus> {
    let mut verses = Vec::with_capacity(raw_verses.len());
    for (position, raw) in raw_verses.into_iter().enumerate() {
        let key: VerseKey = raw
            .verse_key
            .parse()
            .with_context(|| format!("verse at position {position}"))?;
        let eng_translation = match english.get(position) {
            Some(t) => clean_html_tags(&t.text),
            None => ENGLISH_MISSING.to_string(),
        };
        let urdu_translation = match urdu.get(position) {
            Some(t) => clean_html_tags(&t.text),
            None => URDU_MISSING.to_string(),
        };
        verses.push(Verse {
            key,
            arabic: raw.text_uthmani,
            english: eng_translation,
            urdu: urdu_translation,
        });
    }
    Corpus::from_verses(verses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_sup_elements_with_their_content() {
        let cleaned = clean_html_tags("Guard the prayers<sup foot_note=\"77\">1</sup> strictly");
        assert_eq!(cleaned, "Guard the prayers strictly");
    }

    #[test]
    fn keeps_content_of_other_tags() {
        assert_eq!(clean_html_tags("<b>Allah</b> is <i>One</i>"), "Allah is One");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(clean_html_tags("no markup here"), "no markup here");
    }

    #[test]
    fn missing_translations_become_placeholders() {
        let raw = vec![
            RawVerse { verse_key: "1:1".into(), text_uthmani: "arabic one".into() },
            RawVerse { verse_key: "1:2".into(), text_uthmani: "arabic two".into() },
        ];
        let english = vec![RawTranslation { text: "only the first".into() }];
        let corpus = assemble(raw, english, Vec::new()).unwrap();
        assert_eq!(corpus.get(0).unwrap().english, "only the first");
        assert_eq!(corpus.get(1).unwrap().english, ENGLISH_MISSING);
        assert_eq!(corpus.get(0).unwrap().urdu, URDU_MISSING);
    }

    #[test]
    fn malformed_verse_key_fails_the_load() {
        let raw = vec![RawVerse { verse_key: "not-a-key".into(), text_uthmani: String::new() }];
        assert!(assemble(raw, Vec::new(), Vec::new()).is_err());
    }
}
