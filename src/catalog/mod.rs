//! Documentation and code template catalog
//!
//! Both tables are built once at startup and never change afterwards.

mod builtin;
pub mod search;

use crate::config::Config;
use crate::error::{CatalogError, Result};

pub use builtin::API_BASE_URL_PLACEHOLDER;
pub use search::{ContextWindow, SearchHit, SearchOptions, SearchOutcome};

/// A documentation page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub key: String,
    pub title: String,

    /// Markdown body
    pub content: String,
}

/// A bot code template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub key: String,
    pub title: String,
    pub description: String,

    /// Code fence language (javascript, python, go)
    pub language: String,

    /// Source text
    pub code: String,
}

/// Immutable set of documents and templates, in fixed order
#[derive(Debug, Clone)]
pub struct Catalog {
    documents: Vec<Document>,
    templates: Vec<Template>,
}

impl Catalog {
    /// Build the bundled catalog, rendering the configured API base URL into the docs
    pub fn builtin(config: &Config) -> Self {
        let documents = builtin::DOCS
            .iter()
            .map(|src| Document {
                key: src.key.to_string(),
                title: src.title.to_string(),
                content: src
                    .content
                    .trim_end_matches('\n')
                    .replace(API_BASE_URL_PLACEHOLDER, &config.api_base_url),
            })
            .collect();

        let templates = builtin::TEMPLATES
            .iter()
            .map(|src| Template {
                key: src.key.to_string(),
                title: src.title.to_string(),
                description: src.description.to_string(),
                language: src.language.to_string(),
                code: src.code.to_string(),
            })
            .collect();

        Self::from_parts(documents, templates)
    }

    /// Build a catalog from explicit entries
    pub fn from_parts(documents: Vec<Document>, templates: Vec<Template>) -> Self {
        tracing::debug!(
            documents = documents.len(),
            templates = templates.len(),
            "catalog loaded"
        );
        Self {
            documents,
            templates,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn document_keys(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.key.clone()).collect()
    }

    pub fn template_keys(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.key.clone()).collect()
    }

    /// Look up a document by exact key
    pub fn document(&self, key: &str) -> Result<&Document> {
        self.documents
            .iter()
            .find(|d| d.key == key)
            .ok_or_else(|| {
                CatalogError::DocumentNotFound {
                    key: key.to_string(),
                    available: self.document_keys(),
                }
                .into()
            })
    }

    /// Look up a template by exact key
    pub fn template(&self, key: &str) -> Result<&Template> {
        self.templates
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| {
                CatalogError::TemplateNotFound {
                    key: key.to_string(),
                    available: self.template_keys(),
                }
                .into()
            })
    }

    /// Search all documents
    pub fn search(&self, query: &str, options: &SearchOptions) -> SearchOutcome {
        search::search_documents(&self.documents, query, options)
    }

    /// Every document's content, separated by horizontal rules
    pub fn full_text(&self) -> String {
        self.documents
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    }
}
