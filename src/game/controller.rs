//! Blend session controller
//!
//! Owns the client-visible game state and drives the blend lifecycle.
//! Network I/O stays outside: `start_blend` hands the host a ticket, the
//! host awaits the REST call and feeds the outcome to `finish_blend`.
//! Tickets carry the session generation, so a completion that straddles a
//! reset is recognized as stale and dropped instead of overwriting the
//! fresh state.

use crate::color;
use crate::error::{GameError, Result};
use crate::game::selection::{Selection, SelectionChange, required_selection};
use crate::game::state::{BLEND_SETTLE_TICKS, BlendPhase, FeedbackMessage, SessionState};
use crate::session::{self, SessionStore};
use crate::types::{BlendResponse, GameObject, SessionResponse};

/// Handle for one issued blend request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendTicket {
    pub session_id: String,
    pub object_ids: Vec<u32>,
    generation: u64,
}

/// What a finished blend produced, for the host to react to
#[derive(Debug)]
pub enum BlendOutcome {
    /// Result merged into state
    Applied {
        /// Whether new systems or objects were revealed
        unlocked: bool,
    },
    /// Request failed; selection kept so the player can retry
    Failed(GameError),
    /// Completion arrived for a session that has since been reset
    Stale,
}

/// State machine over one play session
pub struct BlendController {
    session_id: String,
    state: SessionState,
    selection: Selection,
    available: Vec<GameObject>,
    phase: BlendPhase,
    feedback: Option<FeedbackMessage>,
    settle_ticks: u32,
    /// Bumped on every reset; stale blend completions carry the old value
    generation: u64,
}

impl BlendController {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            state: SessionState::default(),
            selection: Selection::new(),
            available: Vec::new(),
            phase: BlendPhase::Idle,
            feedback: None,
            settle_ticks: 0,
            generation: 0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn phase(&self) -> BlendPhase {
        self.phase
    }

    pub fn feedback(&self) -> Option<&FeedbackMessage> {
        self.feedback.as_ref()
    }

    pub fn available_objects(&self) -> &[GameObject] {
        &self.available
    }

    /// Objects required for the current round
    pub fn required_selection(&self) -> usize {
        required_selection(self.state.blend_count)
    }

    /// True while the UI should show the blending indicator
    pub fn is_blending(&self) -> bool {
        self.phase != BlendPhase::Idle
    }

    /// Ready to blend: selection complete and no blend active or settling
    pub fn can_blend(&self) -> bool {
        self.phase == BlendPhase::Idle && self.selection.is_complete(self.required_selection())
    }

    /// Merge a freshly loaded session. Replaces progress wholesale; the
    /// object history is client-local and starts empty.
    pub fn apply_session(&mut self, session: SessionResponse) {
        log::info!(
            "Loaded session {} with {} blends",
            session.session_id,
            session.blend_count
        );
        self.state.blend_count = session.blend_count;
        self.state.scores = session.scores;
        self.state.unlocked_systems = session.unlocked_systems;
        self.state.blended_objects.clear();
        if !session.available_objects.is_empty() {
            self.available = session.available_objects;
        }
    }

    /// Replace the object tray offered for the current round
    pub fn set_available(&mut self, objects: Vec<GameObject>) {
        self.available = objects;
    }

    /// Look up an offered object by id
    pub fn find_available(&self, id: u32) -> Option<&GameObject> {
        self.available.iter().find(|o| o.id == id)
    }

    /// Toggle an object in or out of the current selection
    pub fn toggle_select(&mut self, object: &GameObject) -> SelectionChange {
        let required = self.required_selection();
        self.selection.toggle(object, required)
    }

    /// Display color mixed from the currently selected objects
    pub fn mixed_color(&self) -> String {
        color::mix_colors(&self.selection.colors())
    }

    /// Begin a blend: clears the previous feedback, consumes nothing yet,
    /// and returns the ticket the host runs the REST call with.
    pub fn start_blend(&mut self) -> Result<BlendTicket> {
        if !self.can_blend() {
            return Err(GameError::Validation(format!(
                "select {} object(s) before blending",
                self.required_selection()
            )));
        }
        self.feedback = None;
        self.phase = BlendPhase::InFlight;
        Ok(BlendTicket {
            session_id: self.session_id.clone(),
            object_ids: self.selection.ids(),
            generation: self.generation,
        })
    }

    /// Apply the outcome of a blend request.
    ///
    /// On success the server values are trusted wholesale: blend count and
    /// cumulative totals are replaced, unlocked systems become the key set
    /// of the totals, and the submitted ids extend the history. On failure
    /// nothing in the session state changes and the selection is kept for
    /// retry. Either way the settle delay starts, holding `can_blend`
    /// false while the pour animation plays out.
    pub fn finish_blend(&mut self, ticket: &BlendTicket, result: Result<BlendResponse>) -> BlendOutcome {
        if ticket.generation != self.generation {
            log::info!("Dropping stale blend completion for {}", ticket.session_id);
            return BlendOutcome::Stale;
        }

        self.phase = BlendPhase::Settling;
        self.settle_ticks = BLEND_SETTLE_TICKS;

        match result {
            Ok(response) => {
                let unlocked = !response.newly_unlocked_systems.is_empty()
                    || !response.newly_unlocked_objects.is_empty();

                self.state.blend_count = response.blend_count;
                self.state.unlocked_systems = response.total_scores.keys().cloned().collect();
                self.state.scores = response.total_scores;
                self.state.blended_objects.extend_from_slice(&ticket.object_ids);
                self.selection.clear();
                self.feedback = Some(FeedbackMessage {
                    scores_added: response.scores_added,
                    new_systems: response.newly_unlocked_systems,
                    new_objects: response.newly_unlocked_objects,
                });

                log::info!("Blend {} applied", self.state.blend_count);
                BlendOutcome::Applied { unlocked }
            }
            Err(e) => {
                log::error!("Blend failed: {e}");
                BlendOutcome::Failed(e)
            }
        }
    }

    /// Advance the settle timer by one UI frame
    pub fn tick(&mut self) {
        if self.phase == BlendPhase::Settling {
            self.settle_ticks = self.settle_ticks.saturating_sub(1);
            if self.settle_ticks == 0 {
                self.phase = BlendPhase::Idle;
            }
        }
    }

    /// Start over: fresh session id, zeroed progress, empty selection and
    /// feedback. Valid from any phase; an in-flight blend for the old
    /// session will be dropped as stale when it completes.
    pub fn reset(&mut self, store: &mut impl SessionStore, now_ms: u64) {
        self.generation += 1;
        self.session_id = session::generate_session_id(now_ms);
        store.set(session::SESSION_KEY, &self.session_id);
        self.state = SessionState::default();
        self.selection.clear();
        self.feedback = None;
        self.phase = BlendPhase::Idle;
        self.settle_ticks = 0;
        log::info!("Session reset, new id {}", self.session_id);
    }
}
