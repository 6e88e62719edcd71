//! Deferred image loading fallback.
//!
//! When the host supports native lazy loading the whole controller stays
//! inert. Otherwise each `img[data-src]` is watched and, on first
//! overlap with the viewport, promoted: `data-src` becomes `src` and the
//! deferred attribute disappears. Each image transitions exactly once.

use crate::config::EnhanceConfig;
use crate::observer::IntersectionObserver;
use crate::page::{Page, Selector};

pub struct LazyImageLoader {
    observer: IntersectionObserver,
}

impl LazyImageLoader {
    pub fn attach(page: &Page, config: &EnhanceConfig) -> Self {
        let mut observer = IntersectionObserver::new();

        if config.capabilities.native_lazy_loading {
            tracing::debug!("native lazy loading available; fallback loader inert");
            return Self { observer };
        }

        if let Ok(selector) = Selector::parse(&config.lazy_image_selector) {
            for image in page.select(&selector) {
                observer.observe(image, 0.0);
            }
        }
        tracing::debug!("watching {} deferred images", observer.watched_len());
        Self { observer }
    }

    /// Promote every watched image that just entered the viewport.
    pub fn check_visibility(&mut self, page: &mut Page) {
        for image in self.observer.take_intersecting(page) {
            let Some(source) = page.element(image).attr("data-src").map(str::to_string) else {
                continue;
            };
            page.set_attr(image, "src", &source);
            page.remove_attr(image, "data-src");
            tracing::debug!("loaded deferred image {}", source);
        }
    }

    pub fn pending(&self) -> usize {
        self.observer.watched_len()
    }
}
