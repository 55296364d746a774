//! Read-only documents produced by the commands
//!
//! Virtual documents carry their whole content in the URI: the path of
//! `<scheme>:<path>` is the percent-encoded text. Untitled documents hold
//! plain text directly.

use crate::error::{ParserError, Result};
use std::borrow::Cow;

pub const LIST_SCHEME: &str = "chronicle";
pub const GET_SCHEME: &str = "chronicle.get";
pub const HISTORY_SCHEME: &str = "chronicle.history";

/// Resolves URIs of one scheme back into document text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualDocumentProvider {
    scheme: &'static str,
}

impl VirtualDocumentProvider {
    pub const fn new(scheme: &'static str) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    /// Build a fresh URI addressing `content`
    pub fn uri_for(&self, content: &str) -> String {
        format!("{}:{}", self.scheme, urlencoding::encode(content))
    }

    pub fn provide_content(&self, uri: &str) -> Result<String> {
        let (scheme, path) = split_uri(uri)?;
        if scheme != self.scheme {
            return Err(ParserError::Decode(format!(
                "document URI with scheme '{}' (expected '{}')",
                scheme, self.scheme
            )));
        }
        decode_path(path).map(Cow::into_owned)
    }
}

/// The three registered providers
#[derive(Debug, Clone)]
pub struct DocumentRegistry {
    providers: [VirtualDocumentProvider; 3],
}

impl Default for DocumentRegistry {
    fn default() -> Self {
        Self {
            providers: [
                VirtualDocumentProvider::new(LIST_SCHEME),
                VirtualDocumentProvider::new(GET_SCHEME),
                VirtualDocumentProvider::new(HISTORY_SCHEME),
            ],
        }
    }
}

impl DocumentRegistry {
    pub fn provider(&self, scheme: &str) -> Option<&VirtualDocumentProvider> {
        self.providers.iter().find(|p| p.scheme == scheme)
    }

    /// Content of any virtual document URI
    pub fn open(&self, uri: &str) -> Result<String> {
        let (scheme, _) = split_uri(uri)?;
        self.provider(scheme)
            .ok_or_else(|| ParserError::Decode(format!("document URI with unknown scheme '{}'", scheme)))?
            .provide_content(uri)
    }
}

/// A document ready to be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Virtual { uri: String },
    Untitled { content: String },
}

impl Document {
    pub fn list(content: &str) -> Self {
        Self::virtual_in(LIST_SCHEME, content)
    }

    pub fn get(content: &str) -> Self {
        Self::virtual_in(GET_SCHEME, content)
    }

    pub fn history(content: &str) -> Self {
        Self::virtual_in(HISTORY_SCHEME, content)
    }

    pub fn untitled(content: impl Into<String>) -> Self {
        Self::Untitled {
            content: content.into(),
        }
    }

    fn virtual_in(scheme: &'static str, content: &str) -> Self {
        Self::Virtual {
            uri: VirtualDocumentProvider::new(scheme).uri_for(content),
        }
    }

    pub fn scheme(&self) -> Option<&str> {
        match self {
            Self::Virtual { uri } => uri.split_once(':').map(|(scheme, _)| scheme),
            Self::Untitled { .. } => None,
        }
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Virtual { uri } => Some(uri),
            Self::Untitled { .. } => None,
        }
    }

    /// Text of the document, resolved through the registry for virtual ones
    pub fn content(&self, registry: &DocumentRegistry) -> Result<String> {
        match self {
            Self::Virtual { uri } => registry.open(uri),
            Self::Untitled { content } => Ok(content.clone()),
        }
    }
}

fn split_uri(uri: &str) -> Result<(&str, &str)> {
    uri.split_once(':')
        .ok_or_else(|| ParserError::Decode(format!("document URI without scheme: {}", uri)))
}

fn decode_path(path: &str) -> Result<Cow<'_, str>> {
    urlencoding::decode(path).map_err(|e| ParserError::Decode(format!("document URI: {}", e)))
}
