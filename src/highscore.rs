//! Persisted high score
//!
//! A single durable integer under a fixed key in the host's key-value
//! storage (LocalStorage in the browser). Read failures yield 0 and write
//! failures are swallowed; persistence never produces an error path.

use serde::{Deserialize, Serialize};

/// Versioned envelope for the stored value.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    score: u64,
}

/// Handle to the persisted high score. Constructed once at startup and
/// handed to the game state; there is no ambient global.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighScoreStore;

impl HighScoreStore {
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "astro_pinball_highscore";

    pub fn new() -> Self {
        Self
    }

    /// Load the stored high score (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn load(&self) -> u64 {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(record) = serde_json::from_str::<HighScoreRecord>(&json) {
                    log::info!("loaded high score: {}", record.score);
                    return record.score;
                }
            }
        }

        log::info!("no stored high score, starting fresh");
        0
    }

    /// Store a new high score (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self, score: u64) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(&HighScoreRecord { score }) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("high score saved: {}", score);
            }
        }
    }

    /// Native stubs: no durable storage outside the browser.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(&self) -> u64 {
        0
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, _score: u64) {}
}
