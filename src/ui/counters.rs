//! Animated statistic counters.
//!
//! Each `[data-count]` element waits until half of it is visible, then
//! counts up from 0 over two seconds on an ease-out-cubic curve. The
//! final frame pins the text to the exact target so truncation can never
//! leave it one short. A counter fires once per page life.

use crate::animation::{ease_out_cubic, Tween};
use crate::config::EnhanceConfig;
use crate::observer::IntersectionObserver;
use crate::page::{ElementId, Page, Selector};
use std::time::{Duration, Instant};

#[derive(Debug)]
enum CounterState {
    /// Observed, not yet visible.
    Waiting,
    /// Became visible; the tween starts on the next frame.
    Armed,
    Running(Tween),
    Done,
}

#[derive(Debug)]
struct Counter {
    element: ElementId,
    target: u64,
    state: CounterState,
}

pub struct CounterAnimator {
    counters: Vec<Counter>,
    observer: IntersectionObserver,
    duration: Duration,
}

impl CounterAnimator {
    /// Register every counter element and read its target once.
    /// Missing or non-numeric `data-count` values become 0.
    pub fn attach(page: &Page, config: &EnhanceConfig) -> Self {
        let mut counters = Vec::new();
        let mut observer = IntersectionObserver::new();

        if let Ok(selector) = Selector::parse(&config.counter_selector) {
            for element in page.select(&selector) {
                let target = page
                    .element(element)
                    .attr("data-count")
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .unwrap_or(0);
                observer.observe(element, config.counter_visibility);
                counters.push(Counter {
                    element,
                    target,
                    state: CounterState::Waiting,
                });
            }
        }

        tracing::debug!("registered {} stat counters", counters.len());
        Self {
            counters,
            observer,
            duration: Duration::from_millis(config.counter_duration_ms),
        }
    }

    /// Arm counters that just became visible enough. Called on every
    /// scroll change and once on ready.
    pub fn check_visibility(&mut self, page: &Page) {
        for element in self.observer.take_intersecting(page) {
            if let Some(counter) = self.counters.iter_mut().find(|c| c.element == element) {
                counter.state = CounterState::Armed;
            }
        }
    }

    /// Advance all running counters to `now`; armed counters start here.
    pub fn on_frame(&mut self, page: &mut Page, now: Instant) {
        for counter in &mut self.counters {
            match &counter.state {
                CounterState::Armed => {
                    let tween = Tween::new(now, self.duration, 0.0, counter.target as f64);
                    page.set_text(counter.element, "0");
                    counter.state = CounterState::Running(tween);
                }
                CounterState::Running(tween) => {
                    if tween.is_finished(now) {
                        page.set_text(counter.element, &counter.target.to_string());
                        counter.state = CounterState::Done;
                    } else {
                        let progress = tween.progress(now);
                        let shown = (counter.target as f64 * ease_out_cubic(progress)) as u64;
                        page.set_text(counter.element, &shown.to_string());
                    }
                }
                CounterState::Waiting | CounterState::Done => {}
            }
        }
    }

    /// Refine zero-valued counters with a fetched fleet total. Targets of
    /// counters still waiting are replaced in place; counters that already
    /// settled get their text updated to match.
    pub fn apply_total(&mut self, page: &mut Page, total: u64) {
        let mut applied = 0;
        for counter in &mut self.counters {
            if counter.target != 0 {
                continue;
            }
            counter.target = total;
            page.set_attr(counter.element, "data-count", &total.to_string());
            if matches!(counter.state, CounterState::Done) {
                page.set_text(counter.element, &total.to_string());
            }
            applied += 1;
        }
        if applied > 0 {
            tracing::info!("applied fleet total {} to {} counters", total, applied);
        }
    }

    pub fn any_running(&self) -> bool {
        self.counters
            .iter()
            .any(|c| matches!(c.state, CounterState::Armed | CounterState::Running(_)))
    }
}
