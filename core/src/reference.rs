use crate::document::VerseKey;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // First run of digits, then the next run of digits, whatever sits
    // between them. "2:255", "2 255" and "Surah 2 verse 255" all name 2:255.
    static ref REFERENCE: Regex = Regex::new(r"(\d+)\D+(\d+)").expect("valid regex");
}

/// Extract the first `chapter:verse`-shaped reference from freeform text.
///
/// The grammar is deliberately loose: upstream callers feed this with
/// AI-generated prose, so anything that carries two digit groups in order
/// counts as a reference. Tightening it breaks those callers. Whether the
/// key actually exists in the corpus is the caller's concern; no match is
/// `None`, never an error.
pub fn resolve(text: &str) -> Option<VerseKey> {
    let caps = REFERENCE.captures(text)?;
    let chapter = caps[1].parse().ok()?;
    let verse = caps[2].parse().ok()?;
    VerseKey::new(chapter, verse)
}
