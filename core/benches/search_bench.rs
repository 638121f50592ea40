use criterion::{criterion_group, criterion_main, Criterion};
use furqan_core::tokenizer::tokenize;
use furqan_core::{Corpus, SearchEngine, Verse, VerseKey};

fn synthetic_corpus(size: u32) -> Corpus {
    let words = [
        "mercy", "light", "guidance", "patience", "reward", "heavens", "earth",
        "believers", "prayer", "charity", "forgiveness", "truth",
    ];
    let verses = (0..size)
        .map(|i| {
            let english: Vec<&str> = (0..12)
                .map(|j| words[((i + j) as usize * 7 + j as usize) % words.len()])
                .collect();
            Verse {
                key: VerseKey::new(i / 20 + 1, i % 20 + 1).unwrap(),
                arabic: String::new(),
                english: english.join(" "),
                urdu: String::new(),
            }
        })
        .collect();
    Corpus::from_verses(verses).expect("unique keys")
}

fn bench_tokenize(c: &mut Criterion) {
    let text = "Indeed, in the creation of the heavens and the earth and the \
                alternation of the night and the day are signs for those of understanding.";
    c.bench_function("tokenize_verse", |b| b.iter(|| tokenize(text)));
}

fn bench_search(c: &mut Criterion) {
    let engine = SearchEngine::new(synthetic_corpus(6200));
    c.bench_function("search_top3", |b| b.iter(|| engine.search("mercy and guidance", 3)));
}

criterion_group!(benches, bench_tokenize, bench_search);
criterion_main!(benches);
