//! Game state and blend lifecycle
//!
//! Platform-free: no DOM, no network, no timers. The controller hands out
//! tickets for blend requests and consumes their results, so the host
//! decides how to await the backend. Timing is tick-based and driven by
//! the host's frame loop.

pub mod controller;
pub mod selection;
pub mod state;

pub use controller::{BlendController, BlendOutcome, BlendTicket};
pub use selection::{Selection, SelectionChange, required_selection};
pub use state::{BLEND_SETTLE_TICKS, BlendPhase, FeedbackMessage, SessionState};
