use searchcore::{query, DocStore, DocTerm, Error, InvertedIndex, SearchEngine};
use std::fs;
use tempfile::tempdir;

const EPS: f64 = 1e-12;

fn three_docs() -> InvertedIndex {
    let mut idx = InvertedIndex::new();
    for (doc, text) in [("d1", "the cat sat"), ("d2", "the cat ran"), ("d3", "the dog sat")] {
        for term in text.split_whitespace() {
            idx.insert(term, doc);
        }
    }
    idx
}

#[test]
fn round_trip_scores() {
    let idx = three_docs();
    assert_eq!(idx.document_count(), 3);
    assert!((idx.idf("cat") - (3f64 / 2f64).log10()).abs() < EPS);
    assert_eq!(idx.idf("the"), 0.0);

    let cat = query::resolve(&idx, &["cat"]).unwrap();
    let ids: Vec<&str> = cat.entries().iter().map(|e| e.doc_id.as_str()).collect();
    assert_eq!(ids, vec!["d1", "d2"]);
    for e in cat.entries() {
        assert!((e.score - 0.17609125905568124).abs() < 1e-9);
    }

    let dog = query::resolve(&idx, &["dog"]).unwrap();
    assert_eq!(dog.len(), 1);
    assert_eq!(dog.entries()[0].doc_id, "d3");
    assert!((dog.entries()[0].score - 0.47712125471966244).abs() < 1e-9);
}

#[test]
fn absent_term_uses_log_of_document_count() {
    let idx = three_docs();
    assert_eq!(idx.idf("zebra"), 3f64.log10());
}

#[test]
fn tf_accumulation_keeps_first_seen_order() {
    let mut idx = InvertedIndex::new();
    idx.insert("cat", "d1");
    idx.insert("cat", "d2");
    idx.insert("cat", "d1");
    idx.insert("cat", "d1");
    assert_eq!(idx.postings("cat").entries(), &[DocTerm::new("d1", 3.0), DocTerm::new("d2", 1.0)]);
    assert_eq!(idx.document_count(), 2);
}

#[test]
fn two_term_query_is_unsupported() {
    let idx = three_docs();
    assert!(matches!(
        query::resolve(&idx, &["cat", "sat"]),
        Err(Error::UnsupportedQueryShape { terms: 2 })
    ));
}

#[test]
fn reindex_isolates_selected_documents() {
    let dir = tempdir().unwrap();
    let store = DocStore::open(dir.path()).unwrap();
    store.create("d1.txt", "the cat sat").unwrap();
    store.create("d2.txt", "the cat ran").unwrap();
    let engine = SearchEngine::open(store).unwrap();
    assert_eq!(engine.snapshot().postings("cat").len(), 2);

    engine.reload(&["d2.txt"]).unwrap();
    let idx = engine.snapshot();
    assert!(!idx.contains_document("d1.txt"));
    assert!(idx.postings("cat").get("d1.txt").is_none());
    assert_eq!(idx.document_count(), 1);

    let all = engine.reload::<&str>(&[]).unwrap();
    assert_eq!(all.loaded, vec!["d1.txt", "d2.txt"]);
}

#[test]
fn search_text_applies_query_grammar() {
    let dir = tempdir().unwrap();
    let store = DocStore::open(dir.path()).unwrap();
    store.create("a.txt", "Rust is fast. rust is safe.").unwrap();
    store.create("b.txt", "Go is simple.").unwrap();
    let engine = SearchEngine::open(store).unwrap();

    let res = engine.search_text("RUST").unwrap();
    assert_eq!(res.term(), "rust");
    assert_eq!(res.entries()[0].doc_id, "a.txt");
    assert!((res.entries()[0].score - 2.0 * 2f64.log10()).abs() < EPS);

    assert!(matches!(engine.search_text("rust?"), Err(Error::Syntax(_))));
    assert!(matches!(engine.search_text("rust go"), Err(Error::UnsupportedQueryShape { .. })));
    assert!(engine.search_text("").unwrap().is_empty());
}

#[test]
fn undecodable_file_does_not_stop_loading() {
    let dir = tempdir().unwrap();
    let store = DocStore::open(dir.path()).unwrap();
    store.create("d1.txt", "the cat sat").unwrap();
    fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0x00, 0x63]).unwrap();

    let engine = SearchEngine::open(store).unwrap();
    assert_eq!(engine.snapshot().document_count(), 1);
    assert!(engine.snapshot().contains_document("d1.txt"));

    let summary = engine.reload(&["d1.txt", "bad.txt"]).unwrap();
    assert_eq!(summary.loaded, vec!["d1.txt"]);
    assert_eq!(summary.unreadable, vec!["bad.txt"]);
    assert!(summary.missing.is_empty());
    assert_eq!(engine.search(&["cat"]).unwrap().len(), 1);
}

#[test]
fn non_document_files_are_ignored_on_open() {
    let dir = tempdir().unwrap();
    let store = DocStore::open(dir.path()).unwrap();
    store.create("d1.txt", "readme notes").unwrap();
    fs::write(dir.path().join(".DS_Store"), [0u8, 0, 1]).unwrap();
    fs::write(dir.path().join("README.md"), "readme for the db").unwrap();

    let engine = SearchEngine::open(store).unwrap();
    let summary = engine.reload::<&str>(&[]).unwrap();
    assert_eq!(summary.loaded, vec!["d1.txt"]);
    assert!(summary.missing.is_empty());
    assert!(summary.unreadable.is_empty());

    let idx = engine.snapshot();
    assert!(!idx.contains_document("README.md"));
    assert!(!idx.contains_document(".DS_Store"));
    assert_eq!(idx.document_count(), 1);
    assert_eq!(idx.postings("readme").len(), 1);
}
