use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One (document, term) pair. The score is the raw term frequency while the
/// entry lives in the index and tf-idf once it has been weighted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTerm {
    pub doc_id: String,
    pub score: f64,
}

impl DocTerm {
    pub fn new(doc_id: impl Into<String>, score: f64) -> Self {
        Self { doc_id: doc_id.into(), score }
    }
}

impl fmt::Display for DocTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.4}", self.doc_id, self.score)
    }
}

/// How the scores of a [`DocumentList`] were produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Weighting {
    TermFrequency,
    TfIdf { idf: f64 },
}

/// The documents associated with one term.
///
/// Inside the index this is the term's posting list (raw term frequencies,
/// first-seen order). [`crate::rank::score`] turns it into a ranked list.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentList {
    term: String,
    weighting: Weighting,
    entries: Vec<DocTerm>,
}

impl DocumentList {
    pub fn new(term: impl Into<String>) -> Self {
        Self::with_entries(term, Weighting::TermFrequency, Vec::new())
    }

    pub fn with_entries(term: impl Into<String>, weighting: Weighting, entries: Vec<DocTerm>) -> Self {
        Self { term: term.into(), weighting, entries }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    pub fn entries(&self) -> &[DocTerm] {
        &self.entries
    }

    pub fn get(&self, doc_id: &str) -> Option<&DocTerm> {
        self.entries.iter().find(|e| e.doc_id == doc_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<DocTerm> {
        &mut self.entries
    }

    /// Add `tf` to the entry for `doc_id`, appending a new entry if the
    /// document is not in the list yet.
    fn add(&mut self, doc_id: &str, tf: f64) {
        // Loaders insert one document at a time, so the match is almost always last.
        match self.entries.iter().rposition(|e| e.doc_id == doc_id) {
            Some(pos) => self.entries[pos].score += tf,
            None => self.entries.push(DocTerm::new(doc_id, tf)),
        }
    }
}

impl fmt::Display for DocumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.term)?;
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, "]")
    }
}

/// Term → posting list, plus every document id ever inserted.
///
/// `docs` is a superset of the ids appearing in any posting list; its size is
/// the `N` of the idf formula.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, DocumentList>,
    docs: HashSet<String>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Record one occurrence of `term` in `doc_id`.
    pub fn insert(&mut self, term: &str, doc_id: &str) {
        match self.postings.get_mut(term) {
            Some(list) => list.add(doc_id, 1.0),
            None => {
                let mut list = DocumentList::new(term);
                list.add(doc_id, 1.0);
                self.postings.insert(term.to_string(), list);
            }
        }
        if !self.docs.contains(doc_id) {
            self.docs.insert(doc_id.to_string());
        }
    }

    /// Insert every term occurrence of one document, in order.
    pub fn insert_document<I, S>(&mut self, doc_id: &str, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            self.insert(term.as_ref(), doc_id);
        }
    }

    /// Posting list for `term`; an empty list carrying `term` when unseen.
    pub fn postings(&self, term: &str) -> DocumentList {
        self.postings
            .get(term)
            .cloned()
            .unwrap_or_else(|| DocumentList::new(term))
    }

    pub fn document_count(&self) -> usize {
        self.docs.len()
    }

    pub fn contains_document(&self, doc_id: &str) -> bool {
        self.docs.contains(doc_id)
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// `log10(N / n_t)`, with `n_t` floored at 1 so unseen terms score
    /// `log10(N)`. An empty index has no meaningful idf and yields 0.
    pub fn idf(&self, term: &str) -> f64 {
        let n = self.document_count();
        let n_t = self.postings.get(term).map_or(1, |l| l.len().max(1));
        let idf = if n == 0 { 0.0 } else { (n as f64 / n_t as f64).log10() };
        tracing::debug!(term, n, n_t, idf, "computed idf");
        idf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_term_frequency_per_document() {
        let mut idx = InvertedIndex::new();
        for _ in 0..3 {
            idx.insert("cat", "d1");
        }
        idx.insert("cat", "d2");

        let cat = idx.postings("cat");
        assert_eq!(cat.term(), "cat");
        assert_eq!(cat.weighting(), Weighting::TermFrequency);
        assert_eq!(cat.entries(), &[DocTerm::new("d1", 3.0), DocTerm::new("d2", 1.0)]);
    }

    #[test]
    fn repeated_inserts_do_not_change_document_count() {
        let mut idx = InvertedIndex::new();
        idx.insert("cat", "d1");
        assert_eq!(idx.document_count(), 1);
        for _ in 0..5 {
            idx.insert("cat", "d1");
        }
        assert_eq!(idx.document_count(), 1);
        assert_eq!(idx.postings("cat").get("d1").map(|e| e.score), Some(6.0));
    }

    #[test]
    fn unknown_term_gives_empty_list() {
        let mut idx = InvertedIndex::new();
        idx.insert("cat", "d1");
        let dog = idx.postings("dog");
        assert_eq!(dog.term(), "dog");
        assert!(dog.is_empty());
    }

    #[test]
    fn idf_floors_document_frequency_at_one() {
        let mut idx = InvertedIndex::new();
        idx.insert_document("d1", ["a", "b"]);
        idx.insert_document("d2", ["a"]);
        idx.insert_document("d3", ["c"]);
        idx.insert_document("d4", ["c"]);

        assert_eq!(idx.idf("missing"), 4f64.log10());
        assert_eq!(idx.idf("b"), 4f64.log10());
        assert_eq!(idx.idf("a"), 2f64.log10());
    }

    #[test]
    fn idf_of_empty_index_is_zero() {
        let idx = InvertedIndex::new();
        assert_eq!(idx.document_count(), 0);
        assert_eq!(idx.idf("anything"), 0.0);
    }

    #[test]
    fn tracks_documents_and_terms() {
        let mut idx = InvertedIndex::new();
        idx.insert_document("a.txt", ["x", "y", "x"]);
        assert!(idx.contains_document("a.txt"));
        assert!(!idx.contains_document("b.txt"));
        assert_eq!(idx.term_count(), 2);
    }

    #[test]
    fn weighting_serializes_with_kind_tag() {
        let tf = serde_json::to_value(Weighting::TermFrequency).unwrap();
        assert_eq!(tf, serde_json::json!({ "kind": "term_frequency" }));
        let tfidf = serde_json::to_value(Weighting::TfIdf { idf: 0.5 }).unwrap();
        assert_eq!(tfidf, serde_json::json!({ "kind": "tf_idf", "idf": 0.5 }));
        let entry = serde_json::to_value(DocTerm::new("d1.txt", 2.0)).unwrap();
        assert_eq!(entry, serde_json::json!({ "doc_id": "d1.txt", "score": 2.0 }));
    }

    #[test]
    fn display_lists_entries() {
        let mut idx = InvertedIndex::new();
        idx.insert_document("d1", ["cat", "cat"]);
        assert_eq!(idx.postings("cat").to_string(), "cat [d1: 2.0000]");
    }
}
