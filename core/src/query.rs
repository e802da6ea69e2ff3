use crate::error::{Error, Result};
use crate::index::{DocumentList, InvertedIndex};
use crate::rank;

/// Rank the documents matching a one-term query by tf-idf.
///
/// No terms gives an empty list for the empty term. More than one term is
/// rejected before anything is computed.
pub fn resolve<S: AsRef<str>>(index: &InvertedIndex, terms: &[S]) -> Result<DocumentList> {
    match terms {
        [] => Ok(DocumentList::new("")),
        [term] => {
            let term = term.as_ref();
            let postings = index.postings(term);
            let idf = index.idf(term);
            let mut ranked = rank::score(&postings, idf);
            rank::sort(&mut ranked);
            Ok(ranked)
        }
        _ => Err(Error::UnsupportedQueryShape { terms: terms.len() }),
    }
}
