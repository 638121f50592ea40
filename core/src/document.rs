use anyhow::{anyhow, bail, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Canonical verse key in `chapter:verse` form. Both components are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerseKey {
    pub chapter: u32,
    pub verse: u32,
}

impl VerseKey {
    /// Returns `None` when either component is zero.
    pub fn new(chapter: u32, verse: u32) -> Option<Self> {
        if chapter == 0 || verse == 0 {
            return None;
        }
        Some(Self { chapter, verse })
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

impl FromStr for VerseKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (chapter, verse) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("invalid verse key: {s:?}"))?;
        let chapter: u32 = chapter.parse().map_err(|_| anyhow!("invalid chapter in {s:?}"))?;
        let verse: u32 = verse.parse().map_err(|_| anyhow!("invalid verse in {s:?}"))?;
        VerseKey::new(chapter, verse).ok_or_else(|| anyhow!("verse key components must be >= 1: {s:?}"))
    }
}

impl Serialize for VerseKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VerseKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// One verse of the corpus. The English translation is the ranking field;
/// the Arabic text and Urdu translation are carried for retrieval only.
/// Serialized field names match the public API wire format.
#[derive(Debug, Clone, Serialize)]
pub struct Verse {
    #[serde(rename = "verse_key")]
    pub key: VerseKey,
    pub arabic: String,
    #[serde(rename = "eng_translation")]
    pub english: String,
    #[serde(rename = "urdu_translation")]
    pub urdu: String,
}

/// The fixed, ordered set of verses being searched. Positions are 0-based
/// source order; the same order the lexical index is built in, so a ranked
/// position maps straight back to its verse.
#[derive(Debug)]
pub struct Corpus {
    verses: Vec<Verse>,
    by_key: HashMap<VerseKey, usize>,
}

impl Corpus {
    /// Build a corpus from verses in source order. Duplicate keys abort the
    /// load; the process must not start on a malformed corpus.
    pub fn from_verses(verses: Vec<Verse>) -> Result<Self> {
        let mut by_key = HashMap::with_capacity(verses.len());
        for (pos, verse) in verses.iter().enumerate() {
            if by_key.insert(verse.key, pos).is_some() {
                bail!("duplicate verse key {}", verse.key);
            }
        }
        Ok(Self { verses, by_key })
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Verse> {
        self.verses.get(position)
    }

    pub fn get_by_key(&self, key: VerseKey) -> Option<&Verse> {
        self.by_key.get(&key).map(|&pos| &self.verses[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Verse> {
        self.verses.iter()
    }
}
