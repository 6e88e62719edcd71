//! Phone number input masking.
//!
//! Every keystroke re-derives the display from the digits alone:
//! non-digits are stripped, digits are hard-capped at ten, and the mask
//! grows with the digit count up to `(NNN) NNN-NNNN`.

use crate::config::EnhanceConfig;
use crate::page::{ElementId, Page, Selector};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("pattern is valid"));

/// Format a raw field value into the `(NNN) NNN-NNNN` mask.
pub fn format_phone(raw: &str) -> String {
    let digits: String = NON_DIGITS.replace_all(raw, "").chars().take(10).collect();
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

pub struct PhoneInputFormatter {
    fields: Vec<ElementId>,
}

impl PhoneInputFormatter {
    pub fn attach(page: &Page, config: &EnhanceConfig) -> Self {
        let fields = Selector::parse(&config.phone_selector)
            .map(|selector| page.select(&selector))
            .unwrap_or_default();
        Self { fields }
    }

    /// Reformat the field in place. Returns true when the target was one
    /// of ours.
    pub fn handle_input(&self, page: &mut Page, target: ElementId) -> bool {
        if !self.fields.contains(&target) {
            return false;
        }
        let current = page.element(target).attr("value").unwrap_or("").to_string();
        let formatted = format_phone(&current);
        if formatted != current {
            page.set_attr(target, "value", &formatted);
        }
        true
    }
}
