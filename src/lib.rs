//! Chaos Blender - browser client for a casual blend game
//!
//! Core modules:
//! - `game`: Selection policy, session state, blend lifecycle controller
//! - `color`: Hex color mixing for blend feedback
//! - `api`: REST client for the game backend
//! - `session`: Session id persistence behind a store trait
//! - `leaderboard`: Leaderboard view state and submit validation
//! - `audio`: Procedural sound effects (WASM only)
//!
//! All scoring, unlock thresholds, and ranking live behind the REST API;
//! this crate only orchestrates selection, the blend lifecycle, and the
//! feedback shown for each result.

pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod color;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod session;
pub mod types;

pub use error::{GameError, Result};
pub use game::{BlendController, BlendPhase, Selection};

/// Game configuration constants
pub mod consts {
    /// Objects offered in the tray each round
    pub const OBJECT_CHOICES: u32 = 3;

    /// Gradient steps used for particle color ramps
    pub const PARTICLE_GRADIENT_STEPS: u32 = 3;

    /// How much darker the jar outline is than the mix (percent)
    pub const JAR_OUTLINE_DARKEN: f64 = -25.0;
}
