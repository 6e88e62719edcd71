//! Sticky header controller.
//!
//! Pure threshold-to-class mirror: past 80px of scroll the header is
//! sticky, under it it is not. No hysteresis, no debouncing; the toggle
//! is idempotent and cheap enough for high-frequency scroll delivery.

use crate::config::EnhanceConfig;
use crate::page::{ElementId, Page, Selector};

const STICKY_CLASS: &str = "sticky";

pub struct StickyHeader {
    header: Option<ElementId>,
    threshold: f64,
}

impl StickyHeader {
    /// Bind to the header element; inert when the selector matches nothing.
    pub fn attach(page: &Page, config: &EnhanceConfig) -> Self {
        let header = Selector::parse(&config.header_selector)
            .ok()
            .and_then(|selector| page.select_first(&selector));
        if header.is_none() {
            tracing::debug!("no header element; sticky controller inert");
        }
        Self {
            header,
            threshold: config.sticky_threshold,
        }
    }

    /// Re-derive the sticky state from the current scroll offset.
    pub fn update(&self, page: &mut Page) {
        if let Some(header) = self.header {
            page.toggle_class(header, STICKY_CLASS, page.scroll_y() > self.threshold);
        }
    }

    pub fn is_sticky(&self, page: &Page) -> bool {
        self.header
            .map(|h| page.element(h).has_class(STICKY_CLASS))
            .unwrap_or(false)
    }
}
