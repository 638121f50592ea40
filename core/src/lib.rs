//! Lexical search core for the Quran verse service: the corpus data model,
//! tokenizer, BM25 index, reference resolution, and the read-only search
//! facade composing them. Everything here is built once at startup and then
//! shared immutably across request handlers; no I/O happens in this crate.

pub mod document;
pub mod index;
pub mod reference;
pub mod search;
pub mod tokenizer;

pub use document::{Corpus, Verse, VerseKey};
pub use index::Bm25Index;
pub use search::SearchEngine;
