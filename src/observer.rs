//! One-shot intersection observation over the page viewport.
//!
//! Each watched element carries a visibility threshold and fires at most
//! once; fired entries are removed so the watch list only ever shrinks.

use crate::page::{ElementId, Page};

#[derive(Debug, Clone)]
struct Watched {
    element: ElementId,
    threshold: f64,
}

/// Fire-once visibility watcher
#[derive(Debug, Default)]
pub struct IntersectionObserver {
    watched: Vec<Watched>,
}

impl IntersectionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch an element until it first reaches `threshold` visibility.
    /// A threshold of 0.0 fires on any overlap at all.
    pub fn observe(&mut self, element: ElementId, threshold: f64) {
        self.watched.push(Watched {
            element,
            threshold: threshold.clamp(0.0, 1.0),
        });
    }

    /// Remove and return every watched element currently at or past its
    /// threshold.
    pub fn take_intersecting(&mut self, page: &Page) -> Vec<ElementId> {
        let mut fired = Vec::new();
        self.watched.retain(|watch| {
            let ratio = page.visible_ratio(watch.element);
            let visible = ratio > 0.0 && ratio >= watch.threshold;
            if visible {
                fired.push(watch.element);
            }
            !visible
        });
        fired
    }

    pub fn watched_len(&self) -> usize {
        self.watched.len()
    }
}
