//! Client-visible session state and blend lifecycle types
//!
//! All score/unlock data here mirrors the backend; the controller only
//! replaces it with server-reported values, never computes totals locally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::GameObject;

/// Current phase of the blend lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendPhase {
    /// No blend active; a complete selection may be blended
    Idle,
    /// Blend request issued, waiting on the backend
    InFlight,
    /// Result applied; cosmetic delay before the next blend is allowed
    Settling,
}

/// UI frames the blending indicator stays up after a result arrives
/// (1.5 s at 60 fps), pacing the pour animation
pub const BLEND_SETTLE_TICKS: u32 = 90;

/// One player's progress, keyed by the session id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Total successful blends; server-authoritative, +1 per blend
    pub blend_count: u32,
    /// Cumulative totals per scoring system
    pub scores: BTreeMap<String, f64>,
    /// Scoring systems revealed so far
    pub unlocked_systems: Vec<String>,
    /// Ids of every object blended this session, in order
    pub blended_objects: Vec<u32>,
}

/// Summary of the most recent blend, shown until the next blend starts
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackMessage {
    pub scores_added: BTreeMap<String, f64>,
    pub new_systems: Vec<String>,
    pub new_objects: Vec<GameObject>,
}

impl FeedbackMessage {
    /// Whether this blend revealed anything new
    pub fn has_unlocks(&self) -> bool {
        !self.new_systems.is_empty() || !self.new_objects.is_empty()
    }

    /// Display lines like `+5.0 chaos energy`, one per system scored
    pub fn score_lines(&self) -> Vec<String> {
        self.scores_added
            .iter()
            .map(|(system, value)| format!("+{value:.1} {}", system.replace('_', " ")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_lines_format() {
        let feedback = FeedbackMessage {
            scores_added: BTreeMap::from([
                ("chaos_energy".to_string(), 5.0),
                ("cuteness".to_string(), 2.25),
            ]),
            new_systems: Vec::new(),
            new_objects: Vec::new(),
        };
        assert_eq!(
            feedback.score_lines(),
            vec!["+5.0 chaos energy", "+2.2 cuteness"]
        );
        assert!(!feedback.has_unlocks());
    }
}
