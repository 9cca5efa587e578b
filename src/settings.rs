//! Game configuration and color palette
//!
//! Read once at startup from an optional JSON file. Missing keys fall back
//! to the defaults in [`crate::consts`].

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "BRICK_PONG_CONFIG";
/// Config file looked up in the working directory when the env var is unset
pub const DEFAULT_CONFIG_FILE: &str = "brick-pong.json";

/// How the ball leaves the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddleBounce {
    /// Outgoing angle depends on where the ball struck the paddle
    #[default]
    Angled,
    /// Vertical velocity is simply negated
    Flip,
}

impl PaddleBounce {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleBounce::Angled => "angled",
            PaddleBounce::Flip => "flip",
        }
    }
}

/// Errors raised while loading configuration
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {}", path.display(), source),
            Self::Parse { path, source } => {
                write!(f, "cannot parse {}: {}", path.display(), source)
            }
            Self::Invalid(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// Fixed game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Base ball speed; also the floor after a paddle bounce
    pub ball_speed: i32,
    pub paddle_speed: i32,
    /// Hits a block survives before it leaves play
    pub block_hit_capacity: u32,
    /// Maximum paddle deflection from vertical
    pub max_bounce_angle_deg: f64,
    pub paddle_bounce: PaddleBounce,

    pub paddle_width: i32,
    pub paddle_height: i32,
    pub paddle_y_offset: i32,
    pub ball_size: i32,

    pub block_count: usize,
    pub block_width: i32,
    pub block_height: i32,
    pub block_gap: i32,
    pub block_top: i32,
    pub block_shrink: i32,
    pub block_min_height: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ball_speed: BALL_SPEED,
            paddle_speed: PADDLE_SPEED,
            block_hit_capacity: BLOCK_HIT_CAPACITY,
            max_bounce_angle_deg: MAX_BOUNCE_ANGLE_DEG,
            paddle_bounce: PaddleBounce::Angled,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_y_offset: PADDLE_Y_OFFSET,
            ball_size: BALL_SIZE,

            block_count: BLOCK_COUNT,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_gap: BLOCK_GAP,
            block_top: BLOCK_TOP,
            block_shrink: BLOCK_SHRINK,
            block_min_height: BLOCK_MIN_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Maximum bounce angle in radians
    pub fn max_bounce_angle(&self) -> f64 {
        self.max_bounce_angle_deg.to_radians()
    }

    /// Total width of the block row including the leading gap, or `None`
    /// if it does not fit in an `i32`
    pub fn block_row_width(&self) -> Option<i32> {
        let count = i32::try_from(self.block_count).ok()?;
        let pitch = self.block_gap.checked_add(self.block_width)?;
        count.checked_mul(pitch)
    }

    /// Check that the configuration describes a playable screen
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ball_speed", self.ball_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v <= 0) {
            return Err(ConfigError::Invalid(format!("{} must be positive", name)));
        }
        if self.screen_width > MAX_SCREEN_SIZE || self.screen_height > MAX_SCREEN_SIZE {
            return Err(ConfigError::Invalid(format!(
                "screen {}x{} exceeds {} px per side",
                self.screen_width, self.screen_height, MAX_SCREEN_SIZE
            )));
        }
        if self.paddle_speed < 0 || self.block_gap < 0 || self.block_shrink < 0 {
            return Err(ConfigError::Invalid(
                "paddle_speed, block_gap and block_shrink must not be negative".into(),
            ));
        }

        // Per-tick steps never exceed one screen
        let short_side = self.screen_width.min(self.screen_height);
        if self.paddle_speed > self.screen_width {
            return Err(ConfigError::Invalid("paddle_speed is wider than the screen".into()));
        }
        if self.ball_speed > short_side {
            return Err(ConfigError::Invalid(format!(
                "ball_speed {} exceeds the shorter screen side ({} px)",
                self.ball_speed, short_side
            )));
        }

        if self.block_min_height < 1 {
            return Err(ConfigError::Invalid("block_min_height must be at least 1".into()));
        }
        if self.block_min_height > self.block_height {
            return Err(ConfigError::Invalid(
                "block_min_height is taller than block_height".into(),
            ));
        }
        if self.block_hit_capacity == 0 {
            return Err(ConfigError::Invalid("block_hit_capacity must be at least 1".into()));
        }
        if !(self.max_bounce_angle_deg > 0.0 && self.max_bounce_angle_deg < 90.0) {
            return Err(ConfigError::Invalid(format!(
                "max_bounce_angle_deg {} is outside (0, 90)",
                self.max_bounce_angle_deg
            )));
        }
        if self.paddle_width > self.screen_width {
            return Err(ConfigError::Invalid("paddle is wider than the screen".into()));
        }
        if self.ball_size > short_side {
            return Err(ConfigError::Invalid("ball is larger than the screen".into()));
        }
        match self.block_row_width() {
            Some(width) if width <= self.screen_width => {}
            Some(width) => {
                return Err(ConfigError::Invalid(format!(
                    "block row ({} px) is wider than the screen ({} px)",
                    width, self.screen_width
                )));
            }
            None => {
                return Err(ConfigError::Invalid(format!(
                    "block row of {} blocks is wider than the screen",
                    self.block_count
                )));
            }
        }
        if self.block_top < 0 || self.block_top > self.screen_height - self.block_height {
            return Err(ConfigError::Invalid("block_top puts the blocks off screen".into()));
        }
        // Paddle top is screen_height - paddle_y_offset
        if self.paddle_y_offset < 0
            || self.paddle_y_offset > self.screen_height
            || self.paddle_height > self.paddle_y_offset
        {
            return Err(ConfigError::Invalid("paddle_y_offset puts the paddle off screen".into()));
        }
        Ok(())
    }

    /// Parse a JSON document (call `validate` before use)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the startup configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(
            std::env::var_os(CONFIG_ENV).as_deref(),
            Path::new(DEFAULT_CONFIG_FILE),
        )
    }

    /// Resolve the config from an explicit path (usually `BRICK_PONG_CONFIG`)
    /// and the optional working-directory file.
    ///
    /// An explicitly named file must load cleanly. The working-directory
    /// file is optional; if it is broken we warn and use defaults.
    pub fn load_with(explicit: Option<&OsStr>, fallback: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(Path::new(path));
        }

        if fallback.exists() {
            match Self::load_from(fallback) {
                Ok(config) => return Ok(config),
                Err(e) => log::warn!("{}; using default config", e),
            }
        } else {
            log::info!("Using default config");
        }
        Ok(Self::default())
    }
}

/// RGBA color, components in 0..=1
pub type Rgba = [f32; 4];

/// What a drawn element represents; the palette decides its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorRole {
    Background,
    Paddle,
    Ball,
    /// Block with this many hits remaining
    Block(u32),
    Text,
    Accent,
}

/// Immutable color table handed to the render boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgba,
    pub paddle: Rgba,
    pub ball: Rgba,
    /// Indexed by hits remaining minus one, clamped to the last entry
    pub blocks: Vec<Rgba>,
    pub text: Rgba,
    pub accent: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0, 1.0],
            paddle: [1.0, 1.0, 1.0, 1.0],
            ball: [1.0, 1.0, 1.0, 1.0],
            blocks: vec![
                [0.86, 0.2, 0.2, 1.0],
                [0.86, 0.51, 0.12, 1.0],
                [0.86, 0.78, 0.12, 1.0],
            ],
            text: [1.0, 1.0, 1.0, 1.0],
            accent: [0.4, 0.7, 1.0, 1.0],
        }
    }
}

impl Palette {
    pub fn resolve(&self, role: ColorRole) -> Rgba {
        match role {
            ColorRole::Background => self.background,
            ColorRole::Paddle => self.paddle,
            ColorRole::Ball => self.ball,
            ColorRole::Block(hits) => {
                let idx = (hits.max(1) as usize - 1).min(self.blocks.len().saturating_sub(1));
                self.blocks.get(idx).copied().unwrap_or(self.text)
            }
            ColorRole::Text => self.text,
            ColorRole::Accent => self.accent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.block_row_width(), Some(650));
        assert!((config.max_bounce_angle() - std::f64::consts::FRAC_PI_3).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "ball_speed": 6, "paddle_bounce": "flip" }"#)
            .expect("valid json");
        assert_eq!(config.ball_speed, 6);
        assert_eq!(config.paddle_bounce, PaddleBounce::Flip);
        assert_eq!(config.screen_width, SCREEN_WIDTH);
        assert_eq!(config.block_hit_capacity, BLOCK_HIT_CAPACITY);
    }

    #[test]
    fn test_rejects_bad_angle() {
        let config = GameConfig {
            max_bounce_angle_deg: 90.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_row_wider_than_screen() {
        let config = GameConfig {
            block_count: 11,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("block row"));
    }

    #[test]
    fn test_rejects_zero_capacity_and_speed() {
        let config = GameConfig {
            block_hit_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            ball_speed: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = GameConfig::load_from(Path::new("/nonexistent/brick-pong.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/brick-pong.json"));
    }

    /// Write `contents` to a per-test file in the temp dir
    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("brick-pong-{}-{}.json", std::process::id(), name));
        std::fs::write(&path, contents).expect("write temp config");
        path
    }

    #[test]
    fn test_rejects_overflowing_block_row() {
        let config = GameConfig {
            block_count: 100_000_000,
            ..Default::default()
        };
        assert_eq!(config.block_row_width(), None);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("block row"));

        let config = GameConfig {
            block_gap: i32::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_speeds_beyond_screen() {
        let config = GameConfig {
            paddle_speed: i32::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            ball_speed: i32::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // One screen per tick is still accepted
        let config = GameConfig {
            paddle_speed: SCREEN_WIDTH,
            ball_speed: SCREEN_HEIGHT,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_oversized_screen_and_entities() {
        for config in [
            GameConfig {
                screen_width: i32::MAX,
                ..Default::default()
            },
            GameConfig {
                paddle_height: i32::MAX,
                ..Default::default()
            },
            GameConfig {
                paddle_y_offset: i32::MIN,
                ..Default::default()
            },
            GameConfig {
                block_top: i32::MAX,
                ..Default::default()
            },
            GameConfig {
                ball_size: i32::MAX,
                ..Default::default()
            },
            GameConfig {
                block_min_height: 16,
                ..Default::default()
            },
        ] {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn test_load_explicit_file() {
        let path = temp_config("explicit", r#"{ "ball_speed": 5 }"#);
        let config = GameConfig::load_with(Some(path.as_os_str()), Path::new("/nonexistent"))
            .expect("explicit config loads");
        assert_eq!(config.ball_speed, 5);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_explicit_file_must_exist() {
        let fallback = temp_config("unused-fallback", r#"{ "ball_speed": 5 }"#);
        let missing = OsStr::new("/nonexistent/brick-pong.json");
        let err = GameConfig::load_with(Some(missing), &fallback).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        std::fs::remove_file(fallback).ok();
    }

    #[test]
    fn test_load_explicit_malformed_is_parse_error() {
        let path = temp_config("malformed", "{ \"ball_speed\": ");
        let err = GameConfig::load_with(Some(path.as_os_str()), Path::new("/nonexistent"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("cannot parse"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_explicit_invalid_is_rejected() {
        let path = temp_config("invalid", r#"{ "block_hit_capacity": 0 }"#);
        let err = GameConfig::load_with(Some(path.as_os_str()), Path::new("/nonexistent"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_working_dir_file() {
        let path = temp_config("cwd", r#"{ "paddle_bounce": "flip" }"#);
        let config = GameConfig::load_with(None, &path).expect("cwd config loads");
        assert_eq!(config.paddle_bounce, PaddleBounce::Flip);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_broken_working_dir_file_falls_back() {
        let path = temp_config("cwd-broken", "not json");
        let config = GameConfig::load_with(None, &path).expect("falls back to defaults");
        assert_eq!(config, GameConfig::default());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_without_any_file_uses_defaults() {
        let config = GameConfig::load_with(None, Path::new("/nonexistent/brick-pong.json"))
            .expect("defaults");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_palette_block_colors_clamp() {
        let palette = Palette::default();
        assert_eq!(palette.resolve(ColorRole::Block(1)), palette.blocks[0]);
        assert_eq!(palette.resolve(ColorRole::Block(3)), palette.blocks[2]);
        assert_eq!(palette.resolve(ColorRole::Block(9)), palette.blocks[2]);

        let single = Palette {
            blocks: vec![[1.0, 1.0, 1.0, 1.0]],
            ..Palette::default()
        };
        assert_eq!(single.resolve(ColorRole::Block(2)), [1.0, 1.0, 1.0, 1.0]);
    }
}
