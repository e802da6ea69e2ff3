use crate::error::{Error, Result};
use crate::index::{DocumentList, InvertedIndex};
use crate::store::DocStore;
use crate::{query, tokenizer};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Outcome of a [`SearchEngine::reload`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadSummary {
    pub loaded: Vec<String>,
    pub missing: Vec<String>,
    /// Stored but not valid UTF-8.
    pub unreadable: Vec<String>,
    pub num_docs: usize,
}

/// Document store plus the index built from it.
///
/// Readers work on an `Arc` snapshot of the index. Writers are serialized by
/// `writer`; a reload builds its index aside and swaps it in with one write.
pub struct SearchEngine {
    store: DocStore,
    index: RwLock<Arc<InvertedIndex>>,
    writer: Mutex<()>,
}

impl SearchEngine {
    /// Index every document in `store`.
    pub fn open(store: DocStore) -> Result<Self> {
        let engine = Self {
            store,
            index: RwLock::new(Arc::new(InvertedIndex::new())),
            writer: Mutex::new(()),
        };
        engine.reload::<&str>(&[])?;
        Ok(engine)
    }

    pub fn store(&self) -> &DocStore {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<InvertedIndex> {
        Arc::clone(&self.index.read())
    }

    pub fn search<S: AsRef<str>>(&self, terms: &[S]) -> Result<DocumentList> {
        let index = self.snapshot();
        query::resolve(&index, terms)
    }

    /// Tokenize raw query text, then [`search`](Self::search).
    pub fn search_text(&self, text: &str) -> Result<DocumentList> {
        let tokens = tokenizer::tokenize_query(text)?;
        self.search(&tokenizer::query_terms(&tokens))
    }

    pub fn document_text(&self, doc_id: &str) -> Result<String> {
        self.store.read(doc_id)
    }

    /// Store a new document and index it.
    pub fn add_document(&self, doc_id: &str, text: &str) -> Result<()> {
        let _w = self.writer.lock();
        self.store.create(doc_id, text)?;
        let terms = tokenizer::tokenize_document(text);
        let mut live = self.index.write();
        Arc::make_mut(&mut live).insert_document(doc_id, &terms);
        tracing::info!(doc_id, terms = terms.len(), "added document");
        Ok(())
    }

    /// Replace the index with one built from `doc_ids`, or from every stored
    /// document when `doc_ids` is empty. Ids missing from the store and files
    /// that are not UTF-8 text are skipped and reported in the summary.
    pub fn reload<S: AsRef<str>>(&self, doc_ids: &[S]) -> Result<ReloadSummary> {
        let _w = self.writer.lock();
        let wanted: Vec<String> = if doc_ids.is_empty() {
            self.store.list()?
        } else {
            doc_ids.iter().map(|s| s.as_ref().to_string()).collect()
        };

        let mut next = InvertedIndex::new();
        let mut summary = ReloadSummary::default();
        for doc_id in wanted {
            if next.contains_document(&doc_id) || summary.loaded.contains(&doc_id) {
                continue;
            }
            match self.store.read(&doc_id) {
                Ok(text) => {
                    let terms = tokenizer::tokenize_document(&text);
                    tracing::debug!(doc_id = %doc_id, terms = terms.len(), "loaded document");
                    next.insert_document(&doc_id, &terms);
                    summary.loaded.push(doc_id);
                }
                Err(Error::DocumentNotFound(_)) | Err(Error::InvalidDocumentId(_)) => {
                    tracing::warn!(doc_id = %doc_id, "document does not exist, skipped");
                    summary.missing.push(doc_id);
                }
                Err(Error::UnreadableDocument(_)) => {
                    tracing::warn!(doc_id = %doc_id, "document is not valid UTF-8, skipped");
                    summary.unreadable.push(doc_id);
                }
                Err(e) => return Err(e),
            }
        }

        summary.num_docs = next.document_count();
        tracing::info!(
            num_docs = summary.num_docs,
            num_terms = next.term_count(),
            missing = summary.missing.len(),
            unreadable = summary.unreadable.len(),
            "index loaded"
        );
        *self.index.write() = Arc::new(next);
        Ok(summary)
    }
}
