//! Smooth-scroll anchor handling.
//!
//! In-page hash links scroll to their target instead of jumping. Links
//! whose fragment matches nothing keep default navigation, as does a
//! bare `#`.

use crate::page::{ElementId, Page, Selector};

pub struct SmoothScroll {
    anchors: Vec<ElementId>,
}

impl SmoothScroll {
    pub fn attach(page: &Page) -> Self {
        let anchors = Selector::parse(r##"a[href^="#"]"##)
            .map(|selector| page.select(&selector))
            .unwrap_or_default();
        tracing::debug!("bound {} in-page anchors", anchors.len());
        Self { anchors }
    }

    /// Returns the scroll offset to animate to when the click should be
    /// intercepted, or None to let default navigation stand.
    pub fn handle_click(&self, page: &Page, target: ElementId) -> Option<f64> {
        if !self.anchors.contains(&target) {
            return None;
        }
        let href = page.element(target).attr("href")?;
        let fragment = href.strip_prefix('#')?;
        if fragment.is_empty() {
            return None;
        }
        let destination = page.element_by_id(fragment)?;
        Some(page.element(destination).offset_top())
    }
}
