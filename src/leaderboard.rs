//! Leaderboard modal state
//!
//! Ranking is the backend's job; this tracks which board is shown, the
//! fetched entries, and the submit flow with its client-side validation.

use std::collections::BTreeMap;

use crate::error::{GameError, Result};
use crate::types::LeaderboardEntry;

/// Entries requested per board
pub const LEADERBOARD_LIMIT: u32 = 50;

/// Maximum player name length accepted by the submit form
pub const MAX_PLAYER_NAME_LEN: usize = 50;

/// View state for the leaderboard modal
#[derive(Debug, Clone, Default)]
pub struct LeaderboardView {
    systems: Vec<String>,
    selected: Option<String>,
    entries: Vec<LeaderboardEntry>,
    submitted_as: Option<String>,
}

impl LeaderboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoring systems that have boards. When the backend has no
    /// boards yet, falls back to the session's own score keys so the tabs
    /// are never empty mid-game. Auto-selects the first system.
    pub fn apply_systems(&mut self, systems: Vec<String>, fallback_scores: &BTreeMap<String, f64>) {
        self.systems = if systems.is_empty() {
            fallback_scores.keys().cloned().collect()
        } else {
            systems
        };
        if self.selected.is_none() {
            self.selected = self.systems.first().cloned();
        }
    }

    /// Switch boards. Unknown systems are ignored; switching clears the
    /// stale entries until the new board loads.
    pub fn select_system(&mut self, system: &str) -> bool {
        if !self.systems.iter().any(|s| s == system) {
            return false;
        }
        if self.selected.as_deref() != Some(system) {
            self.selected = Some(system.to_string());
            self.entries.clear();
        }
        true
    }

    pub fn apply_entries(&mut self, entries: Vec<LeaderboardEntry>) {
        self.entries = entries;
    }

    pub fn systems(&self) -> &[String] {
        &self.systems
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn has_submitted(&self) -> bool {
        self.submitted_as.is_some()
    }

    pub fn submitted_as(&self) -> Option<&str> {
        self.submitted_as.as_deref()
    }

    /// Record a successful submit; the form is hidden afterwards
    pub fn mark_submitted(&mut self, player_name: &str) {
        self.submitted_as = Some(player_name.to_string());
    }
}

/// Validate a player name before any network call. Returns the trimmed
/// name or the validation failure to prompt the user with.
pub fn validate_player_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GameError::Validation("please enter your name".to_string()));
    }
    if trimmed.chars().count() > MAX_PLAYER_NAME_LEN {
        return Err(GameError::Validation(format!(
            "name is longer than {MAX_PLAYER_NAME_LEN} characters"
        )));
    }
    Ok(trimmed)
}

/// `chaos_energy` -> `CHAOS ENERGY` for tab labels
pub fn format_system_name(system: &str) -> String {
    system.replace('_', " ").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            player_name: name.to_string(),
            score,
            blend_count: 3,
            achieved_at: "2024-01-01T00:00:00Z".to_string(),
            rank: None,
        }
    }

    #[test]
    fn test_apply_systems_auto_selects_first() {
        let mut view = LeaderboardView::new();
        view.apply_systems(
            vec!["chaos_energy".to_string(), "cuteness".to_string()],
            &BTreeMap::new(),
        );
        assert_eq!(view.selected(), Some("chaos_energy"));
    }

    #[test]
    fn test_apply_systems_falls_back_to_session_scores() {
        let mut view = LeaderboardView::new();
        let scores = BTreeMap::from([("cuteness".to_string(), 1.5)]);
        view.apply_systems(Vec::new(), &scores);
        assert_eq!(view.systems(), ["cuteness"]);
        assert_eq!(view.selected(), Some("cuteness"));
    }

    #[test]
    fn test_select_system_clears_stale_entries() {
        let mut view = LeaderboardView::new();
        view.apply_systems(
            vec!["chaos_energy".to_string(), "cuteness".to_string()],
            &BTreeMap::new(),
        );
        view.apply_entries(vec![entry("ada", 9.0)]);

        assert!(!view.select_system("unknown"));
        assert_eq!(view.entries().len(), 1);

        assert!(view.select_system("cuteness"));
        assert!(view.entries().is_empty());
        assert_eq!(view.selected(), Some("cuteness"));
    }

    #[test]
    fn test_validate_player_name_trims() {
        assert_eq!(validate_player_name("  ada  ").expect("valid"), "ada");
    }

    #[test]
    fn test_validate_player_name_rejects_empty() {
        assert!(validate_player_name("").is_err());
        assert!(validate_player_name("   ").is_err());
    }

    #[test]
    fn test_validate_player_name_rejects_too_long() {
        let long = "x".repeat(MAX_PLAYER_NAME_LEN + 1);
        assert!(validate_player_name(&long).is_err());
        let max = "x".repeat(MAX_PLAYER_NAME_LEN);
        assert!(validate_player_name(&max).is_ok());
    }

    #[test]
    fn test_format_system_name() {
        assert_eq!(format_system_name("chaos_energy"), "CHAOS ENERGY");
    }

    #[test]
    fn test_submit_flow() {
        let mut view = LeaderboardView::new();
        assert!(!view.has_submitted());
        view.mark_submitted("ada");
        assert!(view.has_submitted());
        assert_eq!(view.submitted_as(), Some("ada"));
    }
}
