//! MCP resources exposing the catalog
//!
//! `solafon://docs/<key>`, `solafon://docs/full` and `solafon://templates/<key>`.

use crate::catalog::Catalog;
use crate::error::{McpError, Result};
use crate::mcp::types::{ReadResourceResult, Resource, ResourceContent};

const DOCS_PREFIX: &str = "solafon://docs/";
const TEMPLATES_PREFIX: &str = "solafon://templates/";
const FULL_DOCS_URI: &str = "solafon://docs/full";

const MARKDOWN: &str = "text/markdown";
const PLAIN_TEXT: &str = "text/plain";

/// Every resource the catalog provides
pub fn list_resources(catalog: &Catalog) -> Vec<Resource> {
    let docs = catalog.documents().iter().map(|d| Resource {
        uri: format!("{}{}", DOCS_PREFIX, d.key),
        name: format!("docs-{}", d.key),
        description: Some(d.title.clone()),
        mime_type: Some(MARKDOWN.to_string()),
    });

    let full = std::iter::once(Resource {
        uri: FULL_DOCS_URI.to_string(),
        name: "docs-full".to_string(),
        description: Some("Complete Solafon documentation".to_string()),
        mime_type: Some(MARKDOWN.to_string()),
    });

    let templates = catalog.templates().iter().map(|t| Resource {
        uri: format!("{}{}", TEMPLATES_PREFIX, t.key),
        name: format!("template-{}", t.key),
        description: Some(t.title.clone()),
        mime_type: Some(PLAIN_TEXT.to_string()),
    });

    docs.chain(full).chain(templates).collect()
}

/// Read a resource by URI
pub fn read_resource(catalog: &Catalog, uri: &str) -> Result<ReadResourceResult> {
    let (text, mime_type) = if uri == FULL_DOCS_URI {
        (catalog.full_text(), MARKDOWN)
    } else if let Some(key) = uri.strip_prefix(DOCS_PREFIX) {
        let doc = catalog.document(key).map_err(|_| unknown(uri))?;
        (doc.content.clone(), MARKDOWN)
    } else if let Some(key) = uri.strip_prefix(TEMPLATES_PREFIX) {
        let template = catalog.template(key).map_err(|_| unknown(uri))?;
        (template.code.clone(), PLAIN_TEXT)
    } else {
        return Err(unknown(uri).into());
    };

    Ok(ReadResourceResult {
        contents: vec![ResourceContent {
            uri: uri.to_string(),
            text: Some(text),
            mime_type: Some(mime_type.to_string()),
        }],
    })
}

fn unknown(uri: &str) -> McpError {
    McpError::UnknownResource {
        uri: uri.to_string(),
    }
}
