use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::candidate::ElementHandle;

/// Viewport-relative rectangle reported by a [`LayoutProbe`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// A rendered box with zero width or height is treated as invisible.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Supplies rendered geometry for scanned elements.
///
/// Handles are assigned in scan order; implementers can correlate them with
/// elements via [`PageDocument::resolve`] or
/// [`ElementHandle::index`](crate::candidate::ElementHandle::index). Without
/// a probe the scanner assumes every element is rendered and classifies
/// non-landmark regions as `Body`.
pub trait LayoutProbe {
    /// Rendered box for the element, or `None` when it has no box.
    fn rect(&self, handle: ElementHandle) -> Option<Rect>;

    /// Viewport height, used for the top-quarter `Upper` classification.
    fn viewport_height(&self) -> f32;
}

/// A scanned page: parsed HTML plus the slot table behind element handles.
///
/// The slot table is the weak-reference side of the "stale handle,
/// re-resolve by href" contract: embedders that observe an element leaving
/// the page call [`invalidate`](PageDocument::invalidate), after which the
/// handle resolves to `None` and callers fall back to
/// [`find_by_href`](PageDocument::find_by_href).
pub struct PageDocument {
    html: Html,
    slots: Vec<Option<NodeId>>,
}

impl PageDocument {
    /// Parses an HTML document. No candidates exist until a scan runs.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            slots: Vec::new(),
        }
    }

    /// Records a node and returns its handle. Slots are append-only.
    pub(crate) fn register(&mut self, id: NodeId) -> ElementHandle {
        self.slots.push(Some(id));
        ElementHandle(self.slots.len() - 1)
    }

    /// Resolves a handle back to its element, or `None` when the slot was
    /// invalidated or never existed.
    pub fn resolve(&self, handle: ElementHandle) -> Option<ElementRef<'_>> {
        let id = (*self.slots.get(handle.0)?)?;
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    /// Whether the handle still points at a live element.
    #[inline]
    pub fn is_attached(&self, handle: ElementHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Marks a slot stale; subsequent resolves return `None`.
    pub fn invalidate(&mut self, handle: ElementHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            *slot = None;
        }
    }

    /// Re-resolves an element by exact `href`, registering a fresh handle.
    pub fn find_by_href(&mut self, href: &str) -> Option<ElementHandle> {
        let selector = Selector::parse("a[href]").ok()?;
        let id = self
            .html
            .select(&selector)
            .find(|el| el.value().attr("href").map(str::trim) == Some(href))
            .map(|el| el.id())?;
        Some(self.register(id))
    }

    /// Number of registered slots (including invalidated ones).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn html(&self) -> &Html {
        &self.html
    }
}

impl std::fmt::Debug for PageDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageDocument")
            .field("slots", &self.slots.len())
            .finish()
    }
}
