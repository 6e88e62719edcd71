//! Mutable page model backing the enhancement controllers.
//!
//! Site markup is parsed once with scraper, then flattened into an
//! id-indexed arena so controllers can toggle classes, inline styles, and
//! attributes without re-walking the document. Vertical geometry is
//! declared, not computed: elements may carry `data-offset-top` and
//! `data-height` attributes, or callers assign geometry through
//! [`Page::set_geometry`].

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::collections::HashMap;
use thiserror::Error;

/// Page model errors
#[derive(Error, Debug)]
pub enum PageError {
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("document has no body element")]
    MissingBody,
}

pub type PageResult<T> = Result<T, PageError>;

/// Handle to an element in the page arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// A single element: tag, identity, classes, attributes, inline style,
/// direct text content, tree links, and declared vertical geometry.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    styles: Vec<(String, String)>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    offset_top: f64,
    height: f64,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: HashMap::new(),
            styles: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            offset_top: 0.0,
            height: 0.0,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offset_top(&self) -> f64 {
        self.offset_top
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

static SELECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^([a-zA-Z][a-zA-Z0-9-]*)?(?:#([A-Za-z0-9_-]+))?(?:\.([A-Za-z0-9_-]+))?(?:\[([A-Za-z0-9_-]+)(?:(\^=|=)"?([^\]"]*)"?)?\])?$"#,
    )
    .expect("selector pattern is valid")
});

/// How a selector constrains one attribute
#[derive(Debug, Clone, PartialEq)]
enum AttrMatch {
    Present(String),
    Equals(String, String),
    StartsWith(String, String),
}

/// Parsed form of the small selector dialect the markup contract uses:
/// `tag`, `#id`, `.class`, `[attr]`, `[attr=value]`, `[attr^="value"]`,
/// and conjunctions of those on a single element (`input[type=tel]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    class: Option<String>,
    attr: Option<AttrMatch>,
}

impl Selector {
    pub fn parse(input: &str) -> PageResult<Self> {
        let trimmed = input.trim();
        let caps = SELECTOR_RE
            .captures(trimmed)
            .ok_or_else(|| PageError::InvalidSelector(input.to_string()))?;

        let tag = caps.get(1).map(|m| m.as_str().to_ascii_lowercase());
        let id = caps.get(2).map(|m| m.as_str().to_string());
        let class = caps.get(3).map(|m| m.as_str().to_string());
        let attr = match (caps.get(4), caps.get(5), caps.get(6)) {
            (Some(name), Some(op), Some(value)) => {
                let name = name.as_str().to_string();
                let value = value.as_str().to_string();
                Some(match op.as_str() {
                    "^=" => AttrMatch::StartsWith(name, value),
                    _ => AttrMatch::Equals(name, value),
                })
            }
            (Some(name), None, _) => Some(AttrMatch::Present(name.as_str().to_string())),
            _ => None,
        };

        if tag.is_none() && id.is_none() && class.is_none() && attr.is_none() {
            return Err(PageError::InvalidSelector(input.to_string()));
        }

        Ok(Self { tag, id, class, attr })
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(ref tag) = self.tag {
            if element.tag != *tag {
                return false;
            }
        }
        if let Some(ref id) = self.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if let Some(ref class) = self.class {
            if !element.has_class(class) {
                return false;
            }
        }
        if let Some(ref attr) = self.attr {
            match attr {
                AttrMatch::Present(name) => {
                    if element.attr(name).is_none() {
                        return false;
                    }
                }
                AttrMatch::Equals(name, value) => {
                    if element.attr(name) != Some(value.as_str()) {
                        return false;
                    }
                }
                AttrMatch::StartsWith(name, value) => match element.attr(name) {
                    Some(v) if v.starts_with(value.as_str()) => {}
                    _ => return false,
                },
            }
        }
        true
    }
}

/// The page: an element arena plus the scroll viewport state every
/// controller reads.
pub struct Page {
    elements: Vec<Element>,
    body: ElementId,
    scroll_y: f64,
    viewport_height: f64,
}

impl Page {
    /// Parse a full HTML document into a page model.
    pub fn parse(html: &str) -> PageResult<Self> {
        let document = Html::parse_document(html);

        let mut elements = Vec::new();
        let root = document.root_element();
        build_arena(&mut elements, root, None);

        let body = elements
            .iter()
            .position(|e| e.tag == "body")
            .map(ElementId)
            .ok_or(PageError::MissingBody)?;

        tracing::debug!("parsed page model with {} elements", elements.len());

        Ok(Self {
            elements,
            body,
            scroll_y: 0.0,
            viewport_height: 900.0,
        })
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// All elements matching a parsed selector, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| selector.matches(e))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    /// First element matching a parsed selector.
    pub fn select_first(&self, selector: &Selector) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| selector.matches(e))
            .map(ElementId)
    }

    /// Element with the given id attribute, for fragment lookup.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(ElementId)
    }

    /// Create a detached element and append it to the body.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let mut element = Element::new(tag);
        element.parent = Some(self.body);
        let id = ElementId(self.elements.len());
        self.elements.push(element);
        let body = self.body;
        self.element_mut(body).children.push(id);
        id
    }

    pub fn set_element_id(&mut self, element: ElementId, value: &str) {
        self.element_mut(element).id = Some(value.to_string());
    }

    pub fn add_class(&mut self, element: ElementId, class: &str) {
        let el = self.element_mut(element);
        if !el.has_class(class) {
            el.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, element: ElementId, class: &str) {
        self.element_mut(element).classes.retain(|c| c != class);
    }

    /// Add or remove a class to match a derived boolean state.
    pub fn toggle_class(&mut self, element: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(element, class);
        } else {
            self.remove_class(element, class);
        }
    }

    pub fn set_attr(&mut self, element: ElementId, name: &str, value: &str) {
        self.element_mut(element)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, element: ElementId, name: &str) {
        self.element_mut(element).attributes.remove(name);
    }

    pub fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        let el = self.element_mut(element);
        if let Some(slot) = el.styles.iter_mut().find(|(p, _)| p == property) {
            slot.1 = value.to_string();
        } else {
            el.styles.push((property.to_string(), value.to_string()));
        }
    }

    pub fn remove_style(&mut self, element: ElementId, property: &str) {
        self.element_mut(element).styles.retain(|(p, _)| p != property);
    }

    pub fn set_text(&mut self, element: ElementId, text: &str) {
        self.element_mut(element).text = text.to_string();
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        &self.element(element).children
    }

    /// True when `element` sits somewhere under `ancestor`.
    pub fn is_descendant_of(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut current = self.element(element).parent;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.element(id).parent;
        }
        false
    }

    pub fn set_geometry(&mut self, element: ElementId, offset_top: f64, height: f64) {
        let el = self.element_mut(element);
        el.offset_top = offset_top;
        el.height = height;
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
    }

    /// Fraction of the element's declared extent inside the viewport,
    /// in [0, 1]. Zero-height elements report 1.0 when their top edge is
    /// inside the viewport and 0.0 otherwise.
    pub fn visible_ratio(&self, element: ElementId) -> f64 {
        let el = self.element(element);
        let view_top = self.scroll_y;
        let view_bottom = self.scroll_y + self.viewport_height;

        if el.height <= 0.0 {
            return if el.offset_top >= view_top && el.offset_top < view_bottom {
                1.0
            } else {
                0.0
            };
        }

        let top = el.offset_top.max(view_top);
        let bottom = (el.offset_top + el.height).min(view_bottom);
        ((bottom - top) / el.height).clamp(0.0, 1.0)
    }

    /// Whether the body carries the overflow lock the off-canvas menu sets.
    pub fn is_scroll_locked(&self) -> bool {
        self.element(self.body).style("overflow") == Some("hidden")
    }
}

fn build_arena(
    elements: &mut Vec<Element>,
    node: ElementRef<'_>,
    parent: Option<ElementId>,
) -> ElementId {
    let value = node.value();
    let mut element = Element::new(value.name());
    element.parent = parent;

    for (name, attr_value) in value.attrs() {
        match name {
            "id" => element.id = Some(attr_value.to_string()),
            "class" => {
                element.classes = attr_value
                    .split_whitespace()
                    .map(str::to_string)
                    .collect();
            }
            "style" => element.styles = parse_inline_style(attr_value),
            _ => {
                element
                    .attributes
                    .insert(name.to_string(), attr_value.to_string());
            }
        }
    }

    if let Some(top) = element.attr("data-offset-top").and_then(|v| v.parse().ok()) {
        element.offset_top = top;
    }
    if let Some(height) = element.attr("data-height").and_then(|v| v.parse().ok()) {
        element.height = height;
    }

    // Direct text only; descendant text belongs to the child elements.
    element.text = node
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let id = ElementId(elements.len());
    elements.push(element);

    for child in node.children().filter_map(ElementRef::wrap) {
        let child_id = build_arena(elements, child, Some(id));
        elements[id.0].children.push(child_id);
    }

    id
}

fn parse_inline_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                None
            } else {
                Some((property.to_string(), value.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <header id="header" class="site-header"></header>
            <nav id="mobile-menu"><a href="#fleet">Fleet</a></nav>
            <section class="stats-section" data-offset-top="1200" data-height="400">
                <span class="stat" data-count="250">0</span>
            </section>
            <input type="tel" value="555">
            <img data-src="/assets/truck.jpg" alt="">
        </body></html>
    "#;

    #[test]
    fn test_parse_and_select() {
        let page = Page::parse(PAGE).unwrap();

        let header = Selector::parse("#header").unwrap();
        let header_id = page.select_first(&header).unwrap();
        assert_eq!(page.element(header_id).tag, "header");
        assert!(page.element(header_id).has_class("site-header"));

        let counters = Selector::parse("[data-count]").unwrap();
        assert_eq!(page.select(&counters).len(), 1);

        let tel = Selector::parse("input[type=tel]").unwrap();
        let field = page.select_first(&tel).unwrap();
        assert_eq!(page.element(field).attr("value"), Some("555"));

        let lazy = Selector::parse("img[data-src]").unwrap();
        assert_eq!(page.select(&lazy).len(), 1);
    }

    #[test]
    fn test_selector_prefix_match() {
        let page = Page::parse(PAGE).unwrap();
        let anchors = Selector::parse(r##"a[href^="#"]"##).unwrap();
        assert_eq!(page.select(&anchors).len(), 1);
    }

    #[test]
    fn test_invalid_selector_rejected() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("div > a").is_err());
    }

    #[test]
    fn test_geometry_from_attributes() {
        let page = Page::parse(PAGE).unwrap();
        let section = page
            .select_first(&Selector::parse(".stats-section").unwrap())
            .unwrap();
        assert_eq!(page.element(section).offset_top(), 1200.0);
        assert_eq!(page.element(section).height(), 400.0);
    }

    #[test]
    fn test_visible_ratio() {
        let mut page = Page::parse(PAGE).unwrap();
        page.set_viewport_height(900.0);
        let section = page
            .select_first(&Selector::parse(".stats-section").unwrap())
            .unwrap();

        // Viewport [0, 900) does not reach offset 1200.
        assert_eq!(page.visible_ratio(section), 0.0);

        // Viewport [500, 1400) covers half of [1200, 1600).
        page.set_scroll_y(500.0);
        assert!((page.visible_ratio(section) - 0.5).abs() < f64::EPSILON);

        // Fully inside.
        page.set_scroll_y(1200.0);
        assert_eq!(page.visible_ratio(section), 1.0);
    }

    #[test]
    fn test_class_and_style_mutation() {
        let mut page = Page::parse(PAGE).unwrap();
        let header = page
            .select_first(&Selector::parse("#header").unwrap())
            .unwrap();

        page.add_class(header, "sticky");
        page.add_class(header, "sticky");
        assert!(page.element(header).has_class("sticky"));
        page.remove_class(header, "sticky");
        assert!(!page.element(header).has_class("sticky"));

        page.set_style(header, "opacity", "0");
        assert_eq!(page.element(header).style("opacity"), Some("0"));
        page.set_style(header, "opacity", "1");
        assert_eq!(page.element(header).style("opacity"), Some("1"));
    }

    #[test]
    fn test_descendant_lookup() {
        let page = Page::parse(PAGE).unwrap();
        let panel = page
            .select_first(&Selector::parse("#mobile-menu").unwrap())
            .unwrap();
        let link = page.select_first(&Selector::parse("a").unwrap()).unwrap();
        assert!(page.is_descendant_of(link, panel));
        assert!(!page.is_descendant_of(panel, link));
    }

    #[test]
    fn test_scroll_lock_via_body_style() {
        let mut page = Page::parse(PAGE).unwrap();
        assert!(!page.is_scroll_locked());
        let body = page.body();
        page.set_style(body, "overflow", "hidden");
        assert!(page.is_scroll_locked());
        page.remove_style(body, "overflow");
        assert!(!page.is_scroll_locked());
    }

    #[test]
    fn test_injected_element_lands_in_body() {
        let mut page = Page::parse(PAGE).unwrap();
        let button = page.create_element("button");
        page.set_element_id(button, "back-to-top");
        assert_eq!(page.element_by_id("back-to-top"), Some(button));
        assert!(page.is_descendant_of(button, page.body()));
    }
}
