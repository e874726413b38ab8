use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::page::PageDocument;
use super::scan::{ExtractOptions, scan};
use crate::candidate::Candidate;
use crate::search::{CandidateSource, SourceError};

/// In-process candidate source over a scanned page document.
///
/// The document sits behind a mutex because scanning registers element
/// slots. Share the same `Arc` with the highlight side so handles resolve
/// against one slot table.
pub struct DomSource {
    doc: Arc<Mutex<PageDocument>>,
    options: ExtractOptions,
}

impl DomSource {
    pub fn new(doc: Arc<Mutex<PageDocument>>) -> Self {
        Self {
            doc,
            options: ExtractOptions::default(),
        }
    }

    pub fn with_options(doc: Arc<Mutex<PageDocument>>, options: ExtractOptions) -> Self {
        Self { doc, options }
    }

    /// The shared document this source scans.
    pub fn document(&self) -> Arc<Mutex<PageDocument>> {
        Arc::clone(&self.doc)
    }
}

#[async_trait]
impl CandidateSource for DomSource {
    async fn collect(&self, _query: &str) -> Result<Vec<Candidate>, SourceError> {
        let mut doc = self.doc.lock();
        Ok(scan(&mut doc, None, &self.options))
    }
}

impl std::fmt::Debug for DomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomSource")
            .field("options", &self.options)
            .finish()
    }
}
