use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::traits::{CandidateSource, Highlighter, SourceError};
use crate::candidate::{Candidate, ElementHandle};

/// Candidate source that serves a fixed list, or fails on demand.
pub struct StaticSource {
    candidates: Vec<Candidate>,
    failure: Option<String>,
}

impl StaticSource {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            failure: None,
        }
    }

    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self {
            candidates: Vec::new(),
            failure: Some(detail.into()),
        }
    }
}

#[async_trait]
impl CandidateSource for StaticSource {
    async fn collect(&self, _query: &str) -> Result<Vec<Candidate>, SourceError> {
        match &self.failure {
            Some(detail) => Err(SourceError::Unreachable(detail.clone())),
            None => Ok(self.candidates.clone()),
        }
    }
}

/// Highlighter that records calls instead of touching a page.
///
/// Handles listed as stale fail their first `highlight`; href resolution
/// succeeds only for hrefs in the resolution map.
#[derive(Default)]
pub struct RecordingHighlighter {
    stale: Vec<ElementHandle>,
    resolutions: HashMap<String, ElementHandle>,
    highlighted: Mutex<Vec<ElementHandle>>,
    resolve_calls: Mutex<Vec<String>>,
}

impl RecordingHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a handle stale: `highlight` on it fails.
    pub fn with_stale(mut self, handle: ElementHandle) -> Self {
        self.stale.push(handle);
        self
    }

    /// Maps an href to the fresh handle `resolve_href` will return.
    pub fn with_resolution(mut self, href: impl Into<String>, handle: ElementHandle) -> Self {
        self.resolutions.insert(href.into(), handle);
        self
    }

    /// Handles that were successfully highlighted, in call order.
    pub fn highlighted(&self) -> Vec<ElementHandle> {
        self.highlighted.lock().clone()
    }

    /// Hrefs that were looked up, in call order.
    pub fn resolve_calls(&self) -> Vec<String> {
        self.resolve_calls.lock().clone()
    }
}

impl Highlighter for RecordingHighlighter {
    fn highlight(&self, handle: ElementHandle) -> bool {
        if self.stale.contains(&handle) {
            return false;
        }
        self.highlighted.lock().push(handle);
        true
    }

    fn resolve_href(&self, href: &str) -> Option<ElementHandle> {
        self.resolve_calls.lock().push(href.to_string());
        self.resolutions.get(href).copied()
    }
}
