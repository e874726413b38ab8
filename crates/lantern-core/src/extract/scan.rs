use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::{ElementRef, Selector};

use super::page::{LayoutProbe, PageDocument};
use crate::candidate::{Candidate, CandidateKind, Region, normalize_text};
use crate::constants::MAX_EXTRACTED_CANDIDATES;

/// Tuning for one extraction pass.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Hard cap on produced candidates, bounding downstream cost.
    pub max_candidates: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_candidates: MAX_EXTRACTED_CANDIDATES,
        }
    }
}

/// Scans the page for link, button, and heading candidates.
///
/// Output is order-stable (document order within each kind pass, links then
/// buttons then headings), deduplicated on `(kind, href, text prefix)`, and
/// capped. Elements hidden by inline style, the `hidden` attribute, or
/// `aria-hidden` are excluded; when a [`LayoutProbe`] is supplied, elements
/// with no rendered box (or a zero-area one) are excluded too, while
/// off-screen-but-rendered elements stay in. Candidates with neither text
/// nor href are dropped.
pub fn scan(
    doc: &mut PageDocument,
    probe: Option<&dyn LayoutProbe>,
    options: &ExtractOptions,
) -> Vec<Candidate> {
    const PASSES: [(&str, CandidateKind); 3] = [
        ("a[href]", CandidateKind::Link),
        (
            "button, input[type=\"button\"], input[type=\"submit\"], [role=\"button\"]",
            CandidateKind::Button,
        ),
        (
            "h1, h2, h3, h4, h5, h6, [role=\"heading\"]",
            CandidateKind::Heading,
        ),
    ];

    let mut out: Vec<Candidate> = Vec::new();
    let mut seen: HashSet<(CandidateKind, Option<String>, String)> = HashSet::new();

    for (selector, kind) in PASSES {
        let Ok(selector) = Selector::parse(selector) else {
            continue;
        };
        let ids: Vec<NodeId> = doc.html().select(&selector).map(|el| el.id()).collect();

        for id in ids {
            if out.len() >= options.max_candidates {
                return out;
            }

            let Some((text, href, landmark)) = read_element(doc, id, kind) else {
                continue;
            };
            if text.is_empty() && href.is_none() {
                continue;
            }

            let handle = doc.register(id);

            let mut region = landmark;
            if let Some(probe) = probe {
                match probe.rect(handle) {
                    Some(rect) if !rect.is_empty() => {
                        if region.is_none() && rect.y < probe.viewport_height() / 4.0 {
                            region = Some(Region::Upper);
                        }
                    }
                    // No rendered box at all.
                    _ => continue,
                }
            }

            let mut candidate = Candidate::new(kind, text, href, region.unwrap_or(Region::Body));
            candidate.element = Some(handle);

            if !seen.insert(candidate.dedup_key()) {
                continue;
            }
            out.push(candidate);
        }
    }

    tracing::debug!(candidates = out.len(), "page scan complete");
    out
}

/// Pulls text, href, and landmark region out of one node. `None` means the
/// node is gone or hidden.
fn read_element(
    doc: &PageDocument,
    id: NodeId,
    kind: CandidateKind,
) -> Option<(String, Option<String>, Option<Region>)> {
    let el = doc.html().tree.get(id).and_then(ElementRef::wrap)?;
    if is_hidden(el) {
        return None;
    }

    let text = readable_text(el);
    let href = if kind == CandidateKind::Link {
        el.value()
            .attr("href")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
    } else {
        None
    };

    Some((text, href, landmark_region(el)))
}

/// The element itself plus its element ancestors, nearest first.
fn element_chain(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    std::iter::once(el).chain(el.ancestors().filter_map(ElementRef::wrap))
}

fn is_hidden(el: ElementRef<'_>) -> bool {
    element_chain(el).any(|e| {
        let value = e.value();
        value.attr("hidden").is_some()
            || value
                .attr("aria-hidden")
                .is_some_and(|a| a.eq_ignore_ascii_case("true"))
            || value.attr("style").is_some_and(inline_style_hides)
    })
}

/// Inline-style approximation of the computed visibility filter.
fn inline_style_hides(style: &str) -> bool {
    for declaration in style.split(';') {
        let mut parts = declaration.splitn(2, ':');
        let (Some(property), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim().to_ascii_lowercase();
        match property.as_str() {
            "display" if value == "none" => return true,
            "visibility" if value == "hidden" => return true,
            "opacity" => {
                if value.parse::<f32>().is_ok_and(|v| v == 0.0) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

/// Walks ancestors for the nearest semantic landmark.
fn landmark_region(el: ElementRef<'_>) -> Option<Region> {
    for e in element_chain(el) {
        let name = e.value().name();
        let role = e.value().attr("role").map(|r| r.to_ascii_lowercase());
        let region = match (name, role.as_deref()) {
            ("nav", _) | (_, Some("navigation")) => Some(Region::Nav),
            ("header", _) | (_, Some("banner")) => Some(Region::Header),
            ("footer", _) | (_, Some("contentinfo")) => Some(Region::Footer),
            _ => None,
        };
        if region.is_some() {
            return region;
        }
    }
    None
}

/// First non-empty of: rendered text, accessible label, title, alt, value.
fn readable_text(el: ElementRef<'_>) -> String {
    let rendered = normalize_text(&el.text().collect::<String>());
    if !rendered.is_empty() {
        return rendered;
    }
    for attr in ["aria-label", "title", "alt", "value"] {
        if let Some(raw) = el.value().attr(attr) {
            let value = normalize_text(raw);
            if !value.is_empty() {
                return value;
            }
        }
    }
    String::new()
}
