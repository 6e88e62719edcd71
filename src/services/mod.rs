//! Network collaborators for the enhancement suite.
//!
//! Both services are fire-and-forget from the page's point of view:
//! failures are logged and swallowed, and the statically rendered page
//! stays the visible truth.

pub mod fleet_stats;
pub mod leads;

pub use fleet_stats::{FleetStats, FleetStatsService};
pub use leads::{LeadPayload, LeadService};
