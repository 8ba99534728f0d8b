//! Question translation.
//!
//! A [`QueryTranslator`] turns a natural-language question plus options
//! into a [`GraphQuery`] the retrieval step can execute. The built-in
//! [`KeywordTranslator`] keeps the question's meaningful terms.

use crate::error::{Error, Result};
use crate::options::QueryOptions;
use graphrag_graph::TextConfig;
use graphrag_graph::stopwords::StopwordFilter;

/// An executable graph query.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQuery {
    /// The original question.
    pub question: String,
    /// Normalized search terms, in question order.
    pub terms: Vec<String>,
    /// Maximum number of evidence items.
    pub limit: usize,
    /// Effective options.
    pub options: QueryOptions,
}

/// Trait for turning questions into graph queries.
pub trait QueryTranslator: Send + Sync {
    /// Translate a question.
    ///
    /// Returns `QueryTranslation` if the question cannot be expressed as
    /// a graph query.
    fn translate(&self, question: &str, limit: usize, options: &QueryOptions)
    -> Result<GraphQuery>;
}

/// Keyword translator: lowercase terms minus stopwords.
#[derive(Debug, Default)]
pub struct KeywordTranslator {
    filter: StopwordFilter,
}

impl KeywordTranslator {
    /// Create a translator using the given text configuration.
    pub fn new(config: &TextConfig) -> Self {
        Self {
            filter: StopwordFilter::new(config),
        }
    }
}

impl QueryTranslator for KeywordTranslator {
    fn translate(
        &self,
        question: &str,
        limit: usize,
        options: &QueryOptions,
    ) -> Result<GraphQuery> {
        if question.trim().is_empty() {
            return Err(Error::translation("question is empty"));
        }
        if limit == 0 {
            return Err(Error::translation("n_results must be at least 1"));
        }

        let terms = self.filter.terms(question);
        if terms.is_empty() {
            return Err(Error::translation(format!(
                "no searchable terms in question '{question}'"
            )));
        }

        log::debug!("Translated '{question}' to terms {terms:?}");
        Ok(GraphQuery {
            question: question.to_string(),
            terms,
            limit,
            options: options.clone(),
        })
    }
}
