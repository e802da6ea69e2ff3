use criterion::{criterion_group, criterion_main, Criterion};
use searchcore::{query, tokenizer::tokenize_document, InvertedIndex};

const WORDS: &[&str] = &["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta"];

fn corpus() -> Vec<(String, String)> {
    (0..500)
        .map(|d| {
            let text: Vec<&str> = (0..200).map(|i| WORDS[(d * 7 + i * i) % WORDS.len()]).collect();
            (format!("doc{d}.txt"), text.join(" "))
        })
        .collect()
}

fn bench_index(c: &mut Criterion) {
    let docs = corpus();
    c.bench_function("load_500_docs", |b| {
        b.iter(|| {
            let mut idx = InvertedIndex::new();
            for (id, text) in &docs {
                idx.insert_document(id, tokenize_document(text));
            }
            idx
        })
    });

    let mut idx = InvertedIndex::new();
    for (id, text) in &docs {
        idx.insert_document(id, tokenize_document(text));
    }
    c.bench_function("query_single_term", |b| b.iter(|| query::resolve(&idx, &["gamma"])));
}

criterion_group!(benches, bench_index);
criterion_main!(benches);
