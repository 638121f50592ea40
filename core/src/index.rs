use std::collections::HashMap;

/// BM25 term-frequency saturation parameter. Fixed: changing it reorders
/// results.
pub const BM25_K1: f32 = 1.5;
/// BM25 length-normalization strength. Fixed alongside `BM25_K1`.
pub const BM25_B: f32 = 0.75;

/// One entry in a term's postings list.
#[derive(Debug, Clone)]
struct Posting {
    /// 0-based corpus position of the document.
    position: u32,
    /// Number of times the term occurs in that document.
    term_frequency: u32,
}

/// BM25 statistics over the whole corpus: per-term postings, per-document
/// lengths, and the corpus-wide averages the scoring formula needs. Built
/// once from the tokenized documents in corpus order and read-only after
/// that, so any number of threads may score against it concurrently.
pub struct Bm25Index {
    postings: HashMap<String, Vec<Posting>>,
    doc_lengths: Vec<u32>,
    avgdl: f32,
    num_docs: usize,
}

impl Bm25Index {
    /// Build the index from tokenized documents. Document order here is the
    /// positional order `scores` reports, which must be corpus order.
    /// An empty slice yields a degenerate index that scores nothing.
    pub fn build(documents: &[Vec<String>]) -> Self {
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        let mut doc_lengths = Vec::with_capacity(documents.len());
        let mut total_length: u64 = 0;

        for (position, terms) in documents.iter().enumerate() {
            doc_lengths.push(terms.len() as u32);
            total_length += terms.len() as u64;

            let mut frequencies: HashMap<&str, u32> = HashMap::new();
            for term in terms {
                *frequencies.entry(term.as_str()).or_insert(0) += 1;
            }
            for (term, term_frequency) in frequencies {
                postings.entry(term.to_owned()).or_default().push(Posting {
                    position: position as u32,
                    term_frequency,
                });
            }
        }

        let avgdl = if documents.is_empty() {
            0.0
        } else {
            total_length as f32 / documents.len() as f32
        };
        tracing::info!(
            num_docs = documents.len(),
            num_terms = postings.len(),
            avgdl,
            "lexical index built"
        );

        Self {
            postings,
            doc_lengths,
            avgdl,
            num_docs: documents.len(),
        }
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    /// BM25 score of the query against every document: exactly one entry per
    /// corpus position, zeros included. Terms outside the vocabulary
    /// contribute nothing. Uses the smoothed IDF
    /// `ln((N - df + 0.5) / (df + 0.5) + 1)`, so no contribution is ever
    /// negative.
    pub fn scores(&self, query_terms: &[String]) -> Vec<f32> {
        let mut scores = vec![0.0f32; self.num_docs];
        if self.num_docs == 0 {
            return scores;
        }

        let n = self.num_docs as f32;
        // Guards the degenerate all-empty corpus; dl/avgdl must stay finite.
        let avgdl = self.avgdl.max(1.0);

        for term in query_terms {
            if let Some(postings) = self.postings.get(term.as_str()) {
                let df = postings.len() as f32;
                let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
                for posting in postings {
                    let tf = posting.term_frequency as f32;
                    let dl = self.doc_lengths[posting.position as usize] as f32;
                    scores[posting.position as usize] += idf * (tf * (BM25_K1 + 1.0))
                        / (tf + BM25_K1 * (1.0 - BM25_B + BM25_B * dl / avgdl));
                }
            }
        }
        scores
    }
}
