pub mod command;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod rank;
pub mod store;
pub mod tokenizer;

pub use command::Command;
pub use engine::{ReloadSummary, SearchEngine};
pub use error::{Error, Result};
pub use index::{DocTerm, DocumentList, InvertedIndex, Weighting};
pub use store::DocStore;
