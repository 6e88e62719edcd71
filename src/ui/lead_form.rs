//! Quote/contact lead form controller.
//!
//! Collects the named fields, validates them, and hands a ready payload
//! back to the driver for submission. Invalid fields get a `field-error`
//! class and the submit is withheld; a confirmed submission marks the
//! form `lead-sent` and clears it.

use crate::config::EnhanceConfig;
use crate::page::{ElementId, Page, Selector};
use crate::services::leads::LeadPayload;
use crate::ui::phone_input;

const ERROR_CLASS: &str = "field-error";
const SENT_CLASS: &str = "lead-sent";

/// What a click meant to the lead form
#[derive(Debug, Clone, PartialEq)]
pub enum LeadClick {
    NotHandled,
    /// Ours, but validation failed; offending fields are flagged.
    Invalid,
    /// Ours and valid; the driver should POST this payload.
    Submit(LeadPayload),
}

pub struct LeadForm {
    form: Option<ElementId>,
    submit_control: Option<ElementId>,
    fields: Vec<(String, ElementId)>,
}

impl LeadForm {
    pub fn attach(page: &Page, config: &EnhanceConfig) -> Self {
        let form = Selector::parse(&config.lead_form_selector)
            .ok()
            .and_then(|s| page.select_first(&s));

        let Some(form_id) = form else {
            tracing::debug!("no lead form on this page");
            return Self {
                form: None,
                submit_control: None,
                fields: Vec::new(),
            };
        };

        let submit_control = Selector::parse(&config.lead_submit_selector)
            .ok()
            .and_then(|s| {
                page.select(&s)
                    .into_iter()
                    .find(|&el| page.is_descendant_of(el, form_id))
            });

        let named = Selector::parse("[name]").expect("static selector");
        let fields = page
            .select(&named)
            .into_iter()
            .filter(|&el| page.is_descendant_of(el, form_id))
            .filter_map(|el| {
                page.element(el)
                    .attr("name")
                    .map(|name| (name.to_string(), el))
            })
            .collect();

        Self {
            form,
            submit_control,
            fields,
        }
    }

    fn field_value(&self, page: &Page, name: &str) -> String {
        let Some((_, el)) = self.fields.iter().find(|(n, _)| n == name) else {
            return String::new();
        };
        let element = page.element(*el);
        let raw = if element.tag == "textarea" {
            element.text()
        } else {
            element.attr("value").unwrap_or("")
        };
        raw.trim().to_string()
    }

    fn flag(&self, page: &mut Page, name: &str, invalid: bool) {
        if let Some((_, el)) = self.fields.iter().find(|(n, _)| n == name) {
            page.toggle_class(*el, ERROR_CLASS, invalid);
        }
    }

    pub fn handle_click(&self, page: &mut Page, target: ElementId) -> LeadClick {
        if Some(target) != self.submit_control {
            return LeadClick::NotHandled;
        }

        let customer_name = self.field_value(page, "customer_name");
        let email = self.field_value(page, "email");
        let phone = self.field_value(page, "phone");

        let name_invalid = customer_name.is_empty();
        let email_invalid = !email.contains('@');
        let phone_digits = phone.chars().filter(char::is_ascii_digit).count();
        let phone_invalid = !phone.is_empty() && phone_digits != 10;

        self.flag(page, "customer_name", name_invalid);
        self.flag(page, "email", email_invalid);
        self.flag(page, "phone", phone_invalid);

        if name_invalid || email_invalid || phone_invalid {
            tracing::debug!("lead form validation failed");
            return LeadClick::Invalid;
        }

        LeadClick::Submit(LeadPayload {
            customer_name,
            email,
            phone: phone_input::format_phone(&phone),
            truck_id: self.field_value(page, "truck_id"),
            message: self.field_value(page, "message"),
        })
    }

    /// Confirmed by the backend: mark the form and clear every field.
    pub fn mark_sent(&self, page: &mut Page) {
        let Some(form) = self.form else {
            return;
        };
        page.add_class(form, SENT_CLASS);
        for (_, el) in &self.fields {
            if page.element(*el).tag == "textarea" {
                page.set_text(*el, "");
            } else {
                page.set_attr(*el, "value", "");
            }
        }
        tracing::debug!("lead form marked sent");
    }
}
