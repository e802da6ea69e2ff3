use crate::error::{Error, Result};
use crate::tokenizer;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Flat directory of text documents; the file name is the document id.
#[derive(Debug, Clone)]
pub struct DocStore {
    root: PathBuf,
}

impl DocStore {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, doc_id: &str) -> PathBuf {
        self.root.join(doc_id)
    }

    /// Ids of the `<name>.txt` files directly under the root, sorted. Other
    /// files (hidden files, `README.md`, ...) are not documents.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            if entry.file_type().is_file() {
                match entry.file_name().to_str() {
                    Some(name) if tokenizer::is_document_id(name) => ids.push(name.to_string()),
                    _ => tracing::debug!(path = %entry.path().display(), "not a document, ignored"),
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub fn exists(&self, doc_id: &str) -> bool {
        tokenizer::is_document_id(doc_id) && self.path(doc_id).is_file()
    }

    pub fn read(&self, doc_id: &str) -> Result<String> {
        if doc_id.contains(['/', '\\']) || doc_id.starts_with('.') {
            return Err(Error::InvalidDocumentId(doc_id.to_string()));
        }
        fs::read_to_string(self.path(doc_id)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::DocumentNotFound(doc_id.to_string()),
            ErrorKind::InvalidData => Error::UnreadableDocument(doc_id.to_string()),
            _ => Error::Io(e),
        })
    }

    /// Write a new document. Never overwrites.
    pub fn create(&self, doc_id: &str, text: &str) -> Result<()> {
        if !tokenizer::is_document_id(doc_id) {
            return Err(Error::InvalidDocumentId(doc_id.to_string()));
        }
        let mut f = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.path(doc_id))
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Error::DocumentExists(doc_id.to_string()),
                _ => Error::Io(e),
            })?;
        f.write_all(text.as_bytes())?;
        Ok(())
    }
}
