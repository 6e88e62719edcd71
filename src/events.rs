//! Page events and dispatch results.
//!
//! Controllers are synchronous and run to completion; anything that needs
//! the network is handed back to the async driver as an [`EventResult`]
//! variant instead of being awaited inside dispatch.

use crate::page::ElementId;
use crate::services::leads::LeadPayload;
use std::time::Instant;

/// A discrete page interaction delivered to the enhancement suite.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// Document is ready; controllers bind and derive their initial state.
    Ready,
    /// The scroll offset changed to `y` (user scrolling, not tweens).
    Scrolled { y: f64 },
    /// An element was clicked.
    Clicked { target: ElementId },
    /// An input field's value changed.
    InputChanged { target: ElementId },
    /// Animation frame at `now`; running tweens advance.
    Frame { now: Instant },
}

/// Result of handling a page event
#[derive(Debug, Clone)]
pub enum EventResult {
    /// Nothing consumed the event; default behavior stands.
    Continue,
    /// A controller consumed the event (preventDefault analogue).
    Consumed,
    /// The lead form validated; the driver should POST this payload.
    SubmitLead(LeadPayload),
}
