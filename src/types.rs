//! Wire types shared with the game backend
//!
//! Field names match the backend JSON exactly. Everything here is
//! immutable reference data once fetched - game state mutation lives in
//! `game::controller`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A selectable game object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: u32,
    pub name: String,
    pub category: String,
    /// Minimum blend count before this object can appear
    pub unlock_threshold: u32,
    pub sprite_path: String,
    /// Per-scoring-system score contributions
    pub scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rarity: String,
    /// Hex color used for blend feedback, when the backend provides one
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Scoring system reference data (display metadata only; totals live in
/// the session state)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSystem {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Whether the system is shown before any unlock
    pub visible_from_start: bool,
}

/// Body of `POST /api/scores/blend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendRequest {
    pub session_id: String,
    pub object_ids: Vec<u32>,
}

/// Result of a blend, as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendResponse {
    #[serde(default)]
    pub success: bool,
    /// Server-authoritative blend count after this blend
    pub blend_count: u32,
    pub scores_added: BTreeMap<String, f64>,
    /// Full cumulative totals - replaces client scores wholesale
    pub total_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub newly_unlocked_systems: Vec<String>,
    #[serde(default)]
    pub newly_unlocked_objects: Vec<GameObject>,
}

/// Result of `GET /api/scores/session/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub blend_count: u32,
    pub scores: BTreeMap<String, f64>,
    pub unlocked_systems: Vec<String>,
    #[serde(default)]
    pub available_objects: Vec<GameObject>,
}

/// One row of a leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: f64,
    pub blend_count: u32,
    pub achieved_at: String,
    #[serde(default)]
    pub rank: Option<u32>,
}

/// Result of `GET /api/leaderboard/{system}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub scoring_system: String,
    pub entries: Vec<LeaderboardEntry>,
    pub total_entries: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_object_parses_minimal_payload() {
        let json = r#"{
            "id": 7,
            "name": "Rubber Duck",
            "category": "toys",
            "unlock_threshold": 0,
            "sprite_path": "/sprites/duck.png",
            "scores": {"chaos_energy": 5.0}
        }"#;
        let obj: GameObject = serde_json::from_str(json).expect("parse");
        assert_eq!(obj.id, 7);
        assert_eq!(obj.scores["chaos_energy"], 5.0);
        assert_eq!(obj.color, None);
        assert_eq!(obj.rarity, "");
    }

    #[test]
    fn test_blend_response_parses_backend_shape() {
        let json = r#"{
            "success": true,
            "blend_count": 1,
            "scores_added": {"chaos_energy": 5.0},
            "total_scores": {"chaos_energy": 5.0},
            "newly_unlocked_systems": ["chaos_energy"],
            "newly_unlocked_objects": []
        }"#;
        let resp: BlendResponse = serde_json::from_str(json).expect("parse");
        assert!(resp.success);
        assert_eq!(resp.blend_count, 1);
        assert_eq!(resp.newly_unlocked_systems, vec!["chaos_energy"]);
        assert!(resp.newly_unlocked_objects.is_empty());
    }

    #[test]
    fn test_blend_request_serializes_expected_fields() {
        let req = BlendRequest {
            session_id: "session-1-abc".to_string(),
            object_ids: vec![3, 9],
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["session_id"], "session-1-abc");
        assert_eq!(json["object_ids"][1], 9);
    }
}
