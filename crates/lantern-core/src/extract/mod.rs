//! Candidate extraction from parsed HTML.
//!
//! [`PageDocument`] owns the parsed page and the slot table behind
//! [`ElementHandle`](crate::candidate::ElementHandle)s; [`scan`] walks it and
//! produces a deduplicated, order-stable, capped candidate list. Parsed HTML
//! carries no rendered geometry, so the zero-size visibility filter and the
//! upper-viewport region classification only engage when the embedder
//! supplies a [`LayoutProbe`].

pub mod page;
pub mod scan;
pub mod source;


pub use page::{LayoutProbe, PageDocument, Rect};
pub use scan::{ExtractOptions, scan};
pub use source::DomSource;
