//! Off-canvas mobile menu controller.
//!
//! Open state is mirrored three ways at once: an `open` class on the
//! panel, an `open` class on the overlay, and an `overflow: hidden` lock
//! on the body. The three always flip together.

use crate::config::EnhanceConfig;
use crate::page::{ElementId, Page, Selector};

const OPEN_CLASS: &str = "open";

/// What a click meant to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuClick {
    /// Not a menu element; keep routing.
    NotHandled,
    /// Toggle, close control, or overlay; the click is spent.
    Consumed,
    /// A navigation link inside the panel: the menu closes but the link
    /// still navigates, so the click keeps routing.
    ClosedForNavigation,
}

pub struct OffCanvasMenu {
    panel: Option<ElementId>,
    overlay: Option<ElementId>,
    toggle: Option<ElementId>,
    close_control: Option<ElementId>,
    is_open: bool,
}

impl OffCanvasMenu {
    pub fn attach(page: &Page, config: &EnhanceConfig) -> Self {
        let find = |selector: &str| {
            Selector::parse(selector)
                .ok()
                .and_then(|s| page.select_first(&s))
        };
        let menu = Self {
            panel: find(&config.menu.panel),
            overlay: find(&config.menu.overlay),
            toggle: find(&config.menu.toggle),
            close_control: find(&config.menu.close),
            is_open: false,
        };
        if menu.panel.is_none() {
            tracing::debug!("no off-canvas panel; menu controller inert");
        }
        menu
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open the panel, show the overlay, lock page scrolling.
    pub fn open(&mut self, page: &mut Page) {
        let (Some(panel), Some(overlay)) = (self.panel, self.overlay) else {
            return;
        };
        self.is_open = true;
        page.add_class(panel, OPEN_CLASS);
        page.add_class(overlay, OPEN_CLASS);
        let body = page.body();
        page.set_style(body, "overflow", "hidden");
    }

    /// Reverse everything `open` did. Closing an already-closed menu is a
    /// no-op.
    pub fn close(&mut self, page: &mut Page) {
        let (Some(panel), Some(overlay)) = (self.panel, self.overlay) else {
            return;
        };
        self.is_open = false;
        page.remove_class(panel, OPEN_CLASS);
        page.remove_class(overlay, OPEN_CLASS);
        let body = page.body();
        page.remove_style(body, "overflow");
    }

    pub fn handle_click(&mut self, page: &mut Page, target: ElementId) -> MenuClick {
        if Some(target) == self.toggle {
            if self.is_open {
                self.close(page);
            } else {
                self.open(page);
            }
            return MenuClick::Consumed;
        }
        if Some(target) == self.close_control || Some(target) == self.overlay {
            self.close(page);
            return MenuClick::Consumed;
        }
        // Navigating from inside the panel closes it.
        if let Some(panel) = self.panel {
            if page.element(target).tag == "a" && page.is_descendant_of(target, panel) {
                self.close(page);
                return MenuClick::ClosedForNavigation;
            }
        }
        MenuClick::NotHandled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <button id="mobile-menu-toggle"></button>
            <div id="menu-overlay"></div>
            <nav id="mobile-menu">
                <button id="mobile-menu-close"></button>
                <a href="#fleet">Fleet</a>
            </nav>
        </body></html>
    "#;

    fn setup() -> (Page, OffCanvasMenu) {
        let page = Page::parse(PAGE).unwrap();
        let menu = OffCanvasMenu::attach(&page, &EnhanceConfig::default());
        (page, menu)
    }

    fn assert_invariant(page: &Page, menu: &OffCanvasMenu) {
        let panel = page.element_by_id("mobile-menu").unwrap();
        let overlay = page.element_by_id("menu-overlay").unwrap();
        assert_eq!(page.element(panel).has_class("open"), menu.is_open());
        assert_eq!(page.element(overlay).has_class("open"), menu.is_open());
        assert_eq!(page.is_scroll_locked(), menu.is_open());
    }

    #[test]
    fn test_open_close_mirror_all_three_states() {
        let (mut page, mut menu) = setup();
        assert_invariant(&page, &menu);

        menu.open(&mut page);
        assert!(menu.is_open());
        assert_invariant(&page, &menu);

        menu.close(&mut page);
        assert!(!menu.is_open());
        assert_invariant(&page, &menu);
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let (mut page, mut menu) = setup();
        menu.close(&mut page);
        menu.close(&mut page);
        assert_invariant(&page, &menu);
    }

    #[test]
    fn test_toggle_click_flips_state() {
        let (mut page, mut menu) = setup();
        let toggle = page.element_by_id("mobile-menu-toggle").unwrap();

        assert_eq!(menu.handle_click(&mut page, toggle), MenuClick::Consumed);
        assert!(menu.is_open());
        assert_eq!(menu.handle_click(&mut page, toggle), MenuClick::Consumed);
        assert!(!menu.is_open());
        assert_invariant(&page, &menu);
    }

    #[test]
    fn test_overlay_and_close_control_close() {
        let (mut page, mut menu) = setup();
        let overlay = page.element_by_id("menu-overlay").unwrap();
        let close = page.element_by_id("mobile-menu-close").unwrap();

        menu.open(&mut page);
        assert_eq!(menu.handle_click(&mut page, overlay), MenuClick::Consumed);
        assert!(!menu.is_open());

        menu.open(&mut page);
        assert_eq!(menu.handle_click(&mut page, close), MenuClick::Consumed);
        assert!(!menu.is_open());
        assert_invariant(&page, &menu);
    }

    #[test]
    fn test_panel_link_closes_but_still_navigates() {
        let (mut page, mut menu) = setup();
        let link = page
            .select_first(&Selector::parse(r##"a[href^="#"]"##).unwrap())
            .unwrap();

        menu.open(&mut page);
        assert_eq!(
            menu.handle_click(&mut page, link),
            MenuClick::ClosedForNavigation
        );
        assert!(!menu.is_open());
        assert_invariant(&page, &menu);
    }

    #[test]
    fn test_unrelated_click_not_handled() {
        let (mut page, mut menu) = setup();
        let body = page.body();
        assert_eq!(menu.handle_click(&mut page, body), MenuClick::NotHandled);
    }
}
