//! Indexed documents keyed by content fingerprint

use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Hex-encoded SHA-256 of a page's raw bytes
pub type Fingerprint = String;

/// Computes the content fingerprint of raw page bytes
pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    hex::encode(Sha256::digest(bytes))
}

/// A unique piece of indexed content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub fingerprint: Fingerprint,

    /// First URL observed with this content
    pub url: String,

    pub title: String,

    /// Filtered terms in page order, before stemming
    pub terms: Vec<String>,
}

impl Document {
    /// First `len` filtered terms, space-joined
    pub fn preview(&self, len: usize) -> String {
        self.terms
            .iter()
            .take(len)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Documents keyed by fingerprint with a stable insertion order
///
/// The insertion order is the column order of the frequency matrix, so it is
/// tracked explicitly rather than relying on map iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStore {
    order: Vec<Fingerprint>,
    documents: HashMap<Fingerprint, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a document unless its fingerprint is already present
    ///
    /// Returns true if the document was stored. An existing document is never
    /// overwritten.
    pub fn insert(&mut self, document: Document) -> bool {
        if self.documents.contains_key(&document.fingerprint) {
            return false;
        }

        self.order.push(document.fingerprint.clone());
        self.documents.insert(document.fingerprint.clone(), document);
        true
    }

    /// Document at a matrix column index
    pub fn get_index(&self, index: usize) -> Option<&Document> {
        self.order.get(index).and_then(|fp| self.documents.get(fp))
    }

    /// Documents in insertion (column) order
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.order.iter().filter_map(|fp| self.documents.get(fp))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
