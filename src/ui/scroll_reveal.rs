//! Reveal-on-scroll delegation.
//!
//! The site defers reveal animations to an external library when one is
//! loaded; the `reveal_library` capability stands in for that probe.
//! Without it this controller does nothing at all.

use crate::config::EnhanceConfig;
use crate::observer::IntersectionObserver;
use crate::page::{Page, Selector};

const REVEAL_CLASS: &str = "aos-animate";

pub struct ScrollReveal {
    observer: IntersectionObserver,
}

impl ScrollReveal {
    pub fn attach(page: &Page, config: &EnhanceConfig) -> Self {
        let mut observer = IntersectionObserver::new();

        if !config.capabilities.reveal_library {
            tracing::debug!("no reveal library loaded; scroll reveal inert");
            return Self { observer };
        }

        if let Ok(selector) = Selector::parse(&config.reveal_selector) {
            for element in page.select(&selector) {
                observer.observe(element, 0.0);
            }
        }
        Self { observer }
    }

    pub fn check_visibility(&mut self, page: &mut Page) {
        for element in self.observer.take_intersecting(page) {
            page.add_class(element, REVEAL_CLASS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <section data-aos="fade-up" data-offset-top="1000" data-height="400"></section>
        </body></html>
    "#;

    #[test]
    fn test_inert_without_library() {
        let mut page = Page::parse(PAGE).unwrap();
        let mut reveal = ScrollReveal::attach(&page, &EnhanceConfig::default());

        page.set_scroll_y(1000.0);
        reveal.check_visibility(&mut page);
        let section = page
            .select_first(&Selector::parse("[data-aos]").unwrap())
            .unwrap();
        assert!(!page.element(section).has_class("aos-animate"));
    }

    #[test]
    fn test_reveals_once_when_library_present() {
        let mut page = Page::parse(PAGE).unwrap();
        let mut config = EnhanceConfig::default();
        config.capabilities.reveal_library = true;
        let mut reveal = ScrollReveal::attach(&page, &config);
        let section = page
            .select_first(&Selector::parse("[data-aos]").unwrap())
            .unwrap();

        reveal.check_visibility(&mut page);
        assert!(!page.element(section).has_class("aos-animate"));

        page.set_scroll_y(800.0);
        reveal.check_visibility(&mut page);
        assert!(page.element(section).has_class("aos-animate"));

        // The class survives; nothing re-fires after removal either.
        page.remove_class(section, "aos-animate");
        reveal.check_visibility(&mut page);
        assert!(!page.element(section).has_class("aos-animate"));
    }
}
