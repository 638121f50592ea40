use crate::document::{Corpus, Verse};
use crate::index::Bm25Index;
use crate::reference;
use crate::tokenizer::tokenize;
use std::cmp::Ordering;

/// Read-only search surface over a fully built corpus and index. Construct
/// once before serving, then share behind an `Arc`; nothing in here mutates
/// after construction, so concurrent readers need no locking.
pub struct SearchEngine {
    corpus: Corpus,
    index: Bm25Index,
}

impl SearchEngine {
    /// Tokenize every verse's English translation (the ranking field) and
    /// build the BM25 index over it, in corpus order.
    pub fn new(corpus: Corpus) -> Self {
        let tokenized: Vec<Vec<String>> = corpus.iter().map(|v| tokenize(&v.english)).collect();
        let index = Bm25Index::build(&tokenized);
        Self { corpus, index }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Rank the whole corpus against `query` and return the `top_n` best
    /// verses, highest score first. Equal scores keep corpus order (the
    /// sort is stable over ascending positions); a query that matches
    /// nothing degrades to the first `top_n` verses.
    pub fn search(&self, query: &str, top_n: usize) -> Vec<&Verse> {
        let terms = tokenize(query);
        let scores = self.index.scores(&terms);

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| {
            scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal)
        });
        order.truncate(top_n);
        order.into_iter().filter_map(|pos| self.corpus.get(pos)).collect()
    }

    /// Resolve a freeform reference and fetch the verse it names. `None`
    /// when no reference can be extracted or the key is not in the corpus.
    pub fn lookup(&self, text: &str) -> Option<&Verse> {
        let key = reference::resolve(text)?;
        self.corpus.get_by_key(key)
    }
}
