//! The enhancement suite: one controller per page behavior, wired
//! together by [`Enhancer`].
//!
//! Controllers are independent; none depends on another's side effects.
//! The enhancer owns dispatch order, the shared scroll tween (one page
//! has one scroll animation, and a newer request replaces it), and the
//! derived-state refresh that follows every scroll change.

pub mod back_to_top;
pub mod counters;
pub mod lazy_images;
pub mod lead_form;
pub mod offcanvas_menu;
pub mod phone_input;
pub mod scroll_reveal;
pub mod smooth_scroll;
pub mod sticky_header;

use crate::animation::Tween;
use crate::config::EnhanceConfig;
use crate::events::{EventResult, PageEvent};
use crate::page::{ElementId, Page, Selector};
use crate::services::fleet_stats::FleetStats;
use std::time::{Duration, Instant};

use self::{
    back_to_top::BackToTop,
    counters::CounterAnimator,
    lazy_images::LazyImageLoader,
    lead_form::{LeadClick, LeadForm},
    offcanvas_menu::{MenuClick, OffCanvasMenu},
    phone_input::PhoneInputFormatter,
    scroll_reveal::ScrollReveal,
    smooth_scroll::SmoothScroll,
    sticky_header::StickyHeader,
};

pub struct Enhancer {
    scroll_reveal: ScrollReveal,
    sticky_header: StickyHeader,
    menu: OffCanvasMenu,
    counters: CounterAnimator,
    phone_input: PhoneInputFormatter,
    lazy_images: LazyImageLoader,
    smooth_scroll: SmoothScroll,
    back_to_top: BackToTop,
    lead_form: LeadForm,

    stats_section_present: bool,
    scroll_duration: Duration,
    pending_scroll_target: Option<f64>,
    scroll_tween: Option<Tween>,
}

impl Enhancer {
    /// Bind every controller to the page. Controllers whose markup is
    /// absent come up inert; nothing here fails the attach.
    pub fn attach(page: &mut Page, config: &EnhanceConfig) -> Self {
        page.set_viewport_height(config.viewport_height);

        let stats_section_present = Selector::parse(&config.stats_section_selector)
            .ok()
            .and_then(|s| page.select_first(&s))
            .is_some();

        let enhancer = Self {
            scroll_reveal: ScrollReveal::attach(page, config),
            sticky_header: StickyHeader::attach(page, config),
            menu: OffCanvasMenu::attach(page, config),
            counters: CounterAnimator::attach(page, config),
            phone_input: PhoneInputFormatter::attach(page, config),
            lazy_images: LazyImageLoader::attach(page, config),
            smooth_scroll: SmoothScroll::attach(page),
            back_to_top: BackToTop::attach(page, config),
            lead_form: LeadForm::attach(page, config),
            stats_section_present,
            scroll_duration: Duration::from_millis(config.scroll_duration_ms),
            pending_scroll_target: None,
            scroll_tween: None,
        };
        tracing::info!("enhancement suite attached");
        enhancer
    }

    pub fn handle_event(&mut self, page: &mut Page, event: &PageEvent) -> EventResult {
        match event {
            PageEvent::Ready => {
                self.refresh_scroll_state(page);
                EventResult::Continue
            }
            PageEvent::Scrolled { y } => {
                // The visitor took over; drop any programmatic scroll.
                self.scroll_tween = None;
                self.pending_scroll_target = None;
                page.set_scroll_y(*y);
                self.refresh_scroll_state(page);
                EventResult::Continue
            }
            PageEvent::Clicked { target } => self.handle_click(page, *target),
            PageEvent::InputChanged { target } => {
                if self.phone_input.handle_input(page, *target) {
                    EventResult::Consumed
                } else {
                    EventResult::Continue
                }
            }
            PageEvent::Frame { now } => {
                self.advance_frame(page, *now);
                EventResult::Continue
            }
        }
    }

    fn handle_click(&mut self, page: &mut Page, target: ElementId) -> EventResult {
        match self.menu.handle_click(page, target) {
            MenuClick::Consumed => return EventResult::Consumed,
            MenuClick::ClosedForNavigation | MenuClick::NotHandled => {}
        }

        if self.back_to_top.handle_click(target) {
            self.pending_scroll_target = Some(0.0);
            return EventResult::Consumed;
        }

        match self.lead_form.handle_click(page, target) {
            LeadClick::Submit(payload) => return EventResult::SubmitLead(payload),
            LeadClick::Invalid => return EventResult::Consumed,
            LeadClick::NotHandled => {}
        }

        if let Some(offset) = self.smooth_scroll.handle_click(page, target) {
            self.pending_scroll_target = Some(offset);
            return EventResult::Consumed;
        }

        EventResult::Continue
    }

    fn advance_frame(&mut self, page: &mut Page, now: Instant) {
        if let Some(target) = self.pending_scroll_target.take() {
            self.scroll_tween = Some(Tween::new(
                now,
                self.scroll_duration,
                page.scroll_y(),
                target,
            ));
        }

        if let Some(tween) = self.scroll_tween.clone() {
            if tween.is_finished(now) {
                page.set_scroll_y(tween.target());
                self.scroll_tween = None;
            } else {
                page.set_scroll_y(tween.value(now));
            }
            self.refresh_scroll_state(page);
        }

        self.counters.on_frame(page, now);
    }

    /// Everything derived from the scroll offset, re-derived. Runs on
    /// ready, on every scroll event, and on tween-driven scroll frames.
    fn refresh_scroll_state(&mut self, page: &mut Page) {
        self.sticky_header.update(page);
        self.back_to_top.update_visibility(page);
        self.scroll_reveal.check_visibility(page);
        self.counters.check_visibility(page);
        self.lazy_images.check_visibility(page);
    }

    /// Whether the driver should bother fetching live fleet stats.
    pub fn wants_fleet_stats(&self) -> bool {
        self.stats_section_present
    }

    /// Fold a fetched stats payload into the zero-valued counters.
    pub fn apply_fleet_stats(&mut self, page: &mut Page, stats: &FleetStats) {
        let Some(total) = stats.total else {
            tracing::debug!("fleet stats carried no total; counters left alone");
            return;
        };
        self.counters.apply_total(page, total);
    }

    /// The driver confirmed a lead submission.
    pub fn mark_lead_sent(&mut self, page: &mut Page) {
        self.lead_form.mark_sent(page);
    }

    /// True while any animation still needs frames.
    pub fn is_animating(&self) -> bool {
        self.scroll_tween.is_some()
            || self.pending_scroll_target.is_some()
            || self.counters.any_running()
    }

    pub fn menu_is_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn header_is_sticky(&self, page: &Page) -> bool {
        self.sticky_header.is_sticky(page)
    }

    pub fn back_to_top_visible(&self, page: &Page) -> bool {
        self.back_to_top.is_visible(page)
    }
}
