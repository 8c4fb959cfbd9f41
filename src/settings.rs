//! Simulation and presentation settings
//!
//! Persisted in LocalStorage on the web; read from the `BOUNCY_BALLS_SETTINGS`
//! environment variable (JSON) natively.

use serde::{Deserialize, Serialize};

use crate::consts::{BALL_COUNT, MAX_BALL_COUNT, MAX_RADIUS, MAX_SPEED, MIN_RADIUS, MIN_SPEED};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Population ===
    /// Number of balls scattered at startup
    pub ball_count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Initial speed range (pixels/s)
    pub min_speed: f32,
    pub max_speed: f32,
    /// Seed for the scatter RNG (None = pick one at startup)
    pub seed: Option<u64>,

    // === Physics ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Ball-ball repulsion
    pub collisions: bool,

    // === Lifecycle ===
    /// Stop simulated time when the window loses focus
    pub pause_on_blur: bool,

    // === Presentation ===
    /// CSS colour used to clear the canvas
    pub background: String,
    /// CSS colour used to fill balls
    pub ball_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_count: BALL_COUNT,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            seed: None,

            gravity: 0.0,
            collisions: true,

            pause_on_blur: true,

            background: "#000".to_string(),
            ball_color: "#fff".to_string(),
        }
    }
}

/// Replace a non-finite bound with its default.
fn finite_or(value: f32, default: f32) -> f32 {
    if value.is_finite() { value } else { default }
}

/// Order a range and clamp it to non-negative values.
fn ordered(a: f32, b: f32) -> (f32, f32) {
    let (a, b) = (a.max(0.0), b.max(0.0));
    if a <= b { (a, b) } else { (b, a) }
}

impl Settings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Fix up ranges so they are usable by the engine
    pub fn sanitized(mut self) -> Self {
        (self.min_radius, self.max_radius) = ordered(
            finite_or(self.min_radius, MIN_RADIUS),
            finite_or(self.max_radius, MAX_RADIUS),
        );
        (self.min_speed, self.max_speed) = ordered(
            finite_or(self.min_speed, MIN_SPEED),
            finite_or(self.max_speed, MAX_SPEED),
        );
        self.ball_count = self.ball_count.min(MAX_BALL_COUNT);
        if !self.gravity.is_finite() {
            self.gravity = 0.0;
        }
        self
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bouncy_balls_settings";

    /// Environment variable holding JSON settings (native only)
    pub const ENV_VAR: &'static str = "BOUNCY_BALLS_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the environment (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        if let Ok(json) = std::env::var(Self::ENV_VAR) {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::ENV_VAR);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring {}: {}", Self::ENV_VAR, e),
            }
        }
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_demo() {
        let settings = Settings::default();
        assert_eq!(settings.ball_count, 20);
        assert_eq!((settings.min_radius, settings.max_radius), (10.0, 60.0));
        assert_eq!((settings.min_speed, settings.max_speed), (50.0, 100.0));
        assert_eq!(settings.gravity, 0.0);
        assert!(settings.pause_on_blur);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"ball_count": 3, "seed": 7}"#).unwrap();
        assert_eq!(settings.ball_count, 3);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.background, "#000");
    }

    #[test]
    fn test_reversed_ranges_are_ordered() {
        let settings = Settings::from_json(r#"{"min_radius": 40, "max_radius": 5, "min_speed": -3}"#)
            .unwrap();
        assert_eq!((settings.min_radius, settings.max_radius), (5.0, 40.0));
        assert_eq!(settings.min_speed, 0.0);
    }

    #[test]
    fn test_overflowing_ranges_fall_back_to_defaults() {
        let settings = Settings::from_json(
            r#"{"min_radius": -1e39, "max_radius": 1e39, "min_speed": 1e39, "max_speed": 1e39}"#,
        )
        .unwrap();
        assert_eq!((settings.min_radius, settings.max_radius), (MIN_RADIUS, MAX_RADIUS));
        assert_eq!((settings.min_speed, settings.max_speed), (MIN_SPEED, MAX_SPEED));
    }

    #[test]
    fn test_ball_count_is_capped() {
        let settings = Settings {
            ball_count: usize::MAX,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.ball_count, MAX_BALL_COUNT);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{not json").is_err());
    }

    #[test]
    fn test_round_trip_through_json() {
        let settings = Settings {
            gravity: 98.0,
            collisions: false,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
