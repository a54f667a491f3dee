//! Game settings
//!
//! Every physics, hit, camera and arena constant is tunable here. Defaults
//! come from [`crate::consts`]. Settings persist as JSON.

use std::path::Path;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Rect;

/// Environment variable overriding the settings file location
pub const CONFIG_ENV: &str = "DOJO_CONFIG";
/// Settings file used when the environment variable is unset
pub const DEFAULT_CONFIG_PATH: &str = "dojo.json";

/// Player movement and jump tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Constant acceleration (pixels/s²)
    pub gravity: Vec2,
    /// Per-axis drag coefficient (s⁻¹)
    pub air_friction: Vec2,
    /// Charge when the pre-jump delay elapses (pixels/s)
    pub load_speed_init: f32,
    /// Charge gained per second of holding (pixels/s²)
    pub load_speed_rate: f32,
    /// Charge cap (pixels/s)
    pub load_speed_max: f32,
    /// Hold time before charging starts (seconds)
    pub pre_jump_delay: f32,
    /// Speed kept (reversed) when bouncing off a fixed opponent
    pub bounce_damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::from(GRAVITY),
            air_friction: Vec2::from(AIR_FRICTION),
            load_speed_init: LOAD_SPEED_INIT,
            load_speed_rate: LOAD_SPEED_RATE,
            load_speed_max: LOAD_SPEED_MAX,
            pre_jump_delay: PRE_JUMP_DELAY,
            bounce_damping: BOUNCE_DAMPING,
        }
    }
}

/// Hit detection and hit-pause tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitConfig {
    /// Hitbox size relative to the player box
    pub hitbox_ratio: f32,
    /// Freeze after a decisive hit (real seconds)
    pub hit_pause: f32,
    /// Freeze after a tie (real seconds)
    pub tie_pause: f32,
    /// Knockout flash (real seconds)
    pub blink_duration: f32,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self {
            hitbox_ratio: HITBOX_RATIO,
            hit_pause: HIT_PAUSE,
            tie_pause: TIE_PAUSE,
            blink_duration: BLINK_DURATION,
        }
    }
}

/// Camera and slow-motion tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Legs-to-opponent distance below which slow motion kicks in (pixels)
    pub proximity_threshold: f32,
    /// Time scale during slow motion
    pub slow_motion_ratio: f32,
    /// Pan/zoom speed (pixels/s)
    pub speed: f32,
    /// Disable slow motion and zoom entirely
    pub enabled: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: PROXIMITY_THRESHOLD,
            slow_motion_ratio: SLOW_MOTION_RATIO,
            speed: CAMERA_SPEED,
            enabled: true,
        }
    }
}

/// Room geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Background image size (pixels)
    pub room_size: IVec2,
    /// Inset of the playable border (pixels)
    pub border_margin: i32,
    /// Player bounding box (pixels)
    pub player_size: IVec2,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            room_size: IVec2::new(ROOM_WIDTH, ROOM_HEIGHT),
            border_margin: BORDER_MARGIN,
            player_size: IVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }
}

impl ArenaConfig {
    /// Full background rectangle
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(IVec2::ZERO, self.room_size)
    }

    /// Playable rectangle, inset from the bounds by the margin
    pub fn border(&self) -> Rect {
        let m = self.border_margin;
        Rect::new(m, m, self.room_size.x - 2 * m, self.room_size.y - 2 * m)
    }
}

/// All tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsConfig,
    pub hit: HitConfig,
    pub camera: CameraConfig,
    pub arena: ArenaConfig,
    /// Score to exceed (with a 2-point lead) to win the match
    pub scoring: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            hit: HitConfig::default(),
            camera: CameraConfig::default(),
            arena: ArenaConfig::default(),
            scoring: SCORING,
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `$DOJO_CONFIG` (or `dojo.json`), falling back to defaults.
    /// A missing file is not worth a warning; a broken one is.
    pub fn load_or_default() -> Self {
        let path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match Self::load(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {path}, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load {path}: {e}, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        let border = arena.border();
        if arena.player_size.x <= 0 || arena.player_size.y <= 0 {
            return Err(ConfigError::Invalid("player size must be positive".into()));
        }
        if border.w <= arena.player_size.x || border.h <= arena.player_size.y {
            return Err(ConfigError::Invalid(format!(
                "player {}x{} does not fit inside border {}x{}",
                arena.player_size.x, arena.player_size.y, border.w, border.h
            )));
        }
        if !(self.hit.hitbox_ratio > 0.0 && self.hit.hitbox_ratio <= 1.0) {
            return Err(ConfigError::Invalid("hitbox ratio must be in (0, 1]".into()));
        }
        if self.camera.speed <= 0.0 {
            return Err(ConfigError::Invalid("camera speed must be positive".into()));
        }
        if !(self.camera.slow_motion_ratio > 0.0 && self.camera.slow_motion_ratio <= 1.0) {
            return Err(ConfigError::Invalid(
                "slow motion ratio must be in (0, 1]".into(),
            ));
        }
        if self.physics.load_speed_max < self.physics.load_speed_init {
            return Err(ConfigError::Invalid(
                "maximum jump charge is below the initial charge".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.arena.border(), Rect::new(16, 16, 608, 328));
        assert_eq!(settings.scoring, 20);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "scoring": 5, "physics": { "gravity": [0.0, 500.0] } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.scoring, 5);
        assert_eq!(settings.physics.gravity, Vec2::new(0.0, 500.0));
        assert_eq!(settings.physics.load_speed_max, LOAD_SPEED_MAX);
        assert_eq!(settings.camera, CameraConfig::default());
    }

    #[test]
    fn test_rejects_oversized_player() {
        let mut settings = Settings::default();
        settings.arena.player_size = IVec2::new(700, 30);
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("dojo_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.camera.slow_motion_ratio = 0.5;
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/dojo.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
