//! Floating back-to-top control.
//!
//! The button is injected on attach if the page doesn't already carry
//! one. It stays in layout at all times; visibility is mirrored through
//! inline opacity/visibility, toggled at 400px of scroll.

use crate::config::EnhanceConfig;
use crate::page::{ElementId, Page};

const BUTTON_ID: &str = "back-to-top";

pub struct BackToTop {
    button: ElementId,
    threshold: f64,
}

impl BackToTop {
    /// Inject the control (or adopt an existing one) and hide it.
    pub fn attach(page: &mut Page, config: &EnhanceConfig) -> Self {
        let button = match page.element_by_id(BUTTON_ID) {
            Some(existing) => existing,
            None => {
                let button = page.create_element("button");
                page.set_element_id(button, BUTTON_ID);
                page.add_class(button, "back-to-top");
                page.set_text(button, "\u{2191}");
                for (property, value) in [
                    ("position", "fixed"),
                    ("bottom", "30px"),
                    ("right", "30px"),
                    ("width", "46px"),
                    ("height", "46px"),
                    ("border-radius", "50%"),
                    ("border", "none"),
                    ("background", "#ff6b35"),
                    ("color", "#fff"),
                    ("cursor", "pointer"),
                    ("z-index", "900"),
                ] {
                    page.set_style(button, property, value);
                }
                tracing::debug!("injected back-to-top control");
                button
            }
        };

        let control = Self {
            button,
            threshold: config.back_to_top_threshold,
        };
        control.update_visibility(page);
        control
    }

    /// Mirror the scroll offset into opacity/visibility.
    pub fn update_visibility(&self, page: &mut Page) {
        let visible = page.scroll_y() > self.threshold;
        page.set_style(self.button, "opacity", if visible { "1" } else { "0" });
        page.set_style(
            self.button,
            "visibility",
            if visible { "visible" } else { "hidden" },
        );
    }

    /// Returns true when the click was ours; the caller starts the
    /// scroll-to-top tween.
    pub fn handle_click(&self, target: ElementId) -> bool {
        target == self.button
    }

    pub fn is_visible(&self, page: &Page) -> bool {
        page.element(self.button).style("opacity") == Some("1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Page, BackToTop) {
        let mut page = Page::parse("<html><body></body></html>").unwrap();
        let control = BackToTop::attach(&mut page, &EnhanceConfig::default());
        (page, control)
    }

    #[test]
    fn test_injected_once() {
        let (mut page, control) = setup();
        assert_eq!(page.element_by_id(BUTTON_ID), Some(control.button));

        // A second attach adopts the existing button instead of duplicating.
        let again = BackToTop::attach(&mut page, &EnhanceConfig::default());
        assert_eq!(again.button, control.button);
    }

    #[test]
    fn test_fixed_visual_contract() {
        let (page, control) = setup();
        let button = page.element(control.button);
        assert_eq!(button.style("width"), Some("46px"));
        assert_eq!(button.style("height"), Some("46px"));
        assert_eq!(button.style("bottom"), Some("30px"));
        assert_eq!(button.style("right"), Some("30px"));
        assert_eq!(button.style("border-radius"), Some("50%"));
        assert_eq!(button.style("background"), Some("#ff6b35"));
    }

    #[test]
    fn test_visibility_threshold() {
        let (mut page, control) = setup();

        assert!(!control.is_visible(&page));
        assert_eq!(page.element(control.button).style("opacity"), Some("0"));

        page.set_scroll_y(500.0);
        control.update_visibility(&mut page);
        assert!(control.is_visible(&page));
        assert_eq!(page.element(control.button).style("opacity"), Some("1"));
        assert_eq!(
            page.element(control.button).style("visibility"),
            Some("visible")
        );

        page.set_scroll_y(400.0);
        control.update_visibility(&mut page);
        assert!(!control.is_visible(&page));
    }

    #[test]
    fn test_click_ownership() {
        let (mut page, control) = setup();
        assert!(control.handle_click(control.button));
        let other = page.create_element("div");
        assert!(!control.handle_click(other));
    }
}
