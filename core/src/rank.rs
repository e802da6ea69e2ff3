use crate::index::{DocTerm, DocumentList, Weighting};
use std::cmp::Ordering;

/// Weight every entry's term frequency by `idf`.
pub fn score(postings: &DocumentList, idf: f64) -> DocumentList {
    let entries = postings
        .entries()
        .iter()
        .map(|e| DocTerm::new(e.doc_id.clone(), tfidf(e.score, idf)))
        .collect();
    DocumentList::with_entries(postings.term(), Weighting::TfIdf { idf }, entries)
}

#[inline]
fn tfidf(tf: f64, idf: f64) -> f64 {
    tf * idf
}

/// Highest score first; equal scores fall back to document id ascending.
pub fn sort(list: &mut DocumentList) {
    list.entries_mut().sort_by(compare);
}

fn compare(a: &DocTerm, b: &DocTerm) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.doc_id.cmp(&b.doc_id))
}

/// Keep the first `n` entries of a sorted list.
pub fn top_n(list: &mut DocumentList, n: usize) {
    list.entries_mut().truncate(n);
}
