//! Game configuration types.
//!
//! Each rule set is configured at startup:
//! - `FlipConfig`: board size and who moves first in the capture game
//! - `GemConfig`: board size, token kinds and scoring for the match game
//! - `InkConfig`: board size, palette, life and difficulty for the ink game
//! - `EngineConfig`: all of the above plus the session seed, loadable from TOML
//!
//! Defaults reproduce the classic games: an 8x8 capture board, an 8x8 gem
//! board with seven gem kinds, and a medium 17x17 ink board with 30 moves.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::side::Side;

/// Largest board any game accepts, in cells.
pub const MAX_BOARD_CELLS: usize = 1 << 20;

/// Largest `base` or `per_extra` a scoring table accepts.
pub const MAX_POINTS: i64 = 1_000_000;

/// Reject boards whose cell count overflows or exceeds `MAX_BOARD_CELLS`.
fn check_board_size(section: &str, width: usize, height: usize) -> Result<(), ConfigError> {
    match width.checked_mul(height) {
        Some(cells) if cells <= MAX_BOARD_CELLS => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "{} board {}x{} exceeds {} cells",
            section, width, height, MAX_BOARD_CELLS
        ))),
    }
}

/// Who places the first disc.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartingSide {
    Black,
    White,
    /// Coin flip from the session RNG.
    #[default]
    Random,
}

impl StartingSide {
    /// The fixed side, if any.
    #[must_use]
    pub const fn fixed(self) -> Option<Side> {
        match self {
            StartingSide::Black => Some(Side::Black),
            StartingSide::White => Some(Side::White),
            StartingSide::Random => None,
        }
    }
}

/// Capture game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipConfig {
    pub width: usize,
    pub height: usize,
    pub first: StartingSide,
    /// Shuffle candidate moves before the automated policy ranks them.
    /// When false, ties go to the first move in row-major order.
    pub shuffle_candidates: bool,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            first: StartingSide::Random,
            shuffle_candidates: false,
        }
    }
}

impl FlipConfig {
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_first(mut self, first: StartingSide) -> Self {
        self.first = first;
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_candidates = shuffle;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 4 || self.height < 4 {
            return Err(ConfigError::Validation(
                "flip board must be at least 4x4".into(),
            ));
        }
        check_board_size("flip", self.width, self.height)
    }
}

/// Points awarded per matched group: `base + (len - 3) * per_extra`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    pub base: i64,
    pub per_extra: i64,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            base: 10,
            per_extra: 10,
        }
    }
}

impl Scoring {
    /// Points for one group of `len` tokens.
    #[must_use]
    pub fn points_for(&self, len: usize) -> i64 {
        let extra = i64::try_from(len.saturating_sub(3)).unwrap_or(i64::MAX);
        self.base.saturating_add(extra.saturating_mul(self.per_extra))
    }

    /// Both values must lie in `0..=MAX_POINTS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("base", self.base), ("per_extra", self.per_extra)] {
            if !(0..=MAX_POINTS).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "gems.scoring.{} must be in 0..={}",
                    name, MAX_POINTS
                )));
            }
        }
        Ok(())
    }
}

/// Match-three configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GemConfig {
    pub width: usize,
    pub height: usize,
    /// Number of distinct token kinds.
    pub kinds: u8,
    pub scoring: Scoring,
    /// Points lost per `tick` while the score is positive.
    pub decay_per_tick: i64,
}

impl Default for GemConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            kinds: 7,
            scoring: Scoring::default(),
            decay_per_tick: 1,
        }
    }
}

impl GemConfig {
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_kinds(mut self, kinds: u8) -> Self {
        self.kinds = kinds;
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Validate configuration values.
    ///
    /// Five kinds is the minimum for which a refill token can always avoid all
    /// four neighbors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::Validation(
                "gem board must be at least 3x3".into(),
            ));
        }
        check_board_size("gem", self.width, self.height)?;
        if self.kinds < 5 {
            return Err(ConfigError::Validation(
                "gems.kinds must be >= 5".into(),
            ));
        }
        if !(0..=MAX_POINTS).contains(&self.decay_per_tick) {
            return Err(ConfigError::Validation(format!(
                "gems.decay_per_tick must be in 0..={}",
                MAX_POINTS
            )));
        }
        self.scoring.validate()
    }
}

/// How much the ink board generator smooths random colors into patches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Board size presets of the ink game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InkPreset {
    Small,
    Medium,
    Large,
}

impl InkPreset {
    /// `(side length, max life)` for the preset.
    #[must_use]
    pub const fn dimensions(self) -> (usize, u32) {
        match self {
            InkPreset::Small => (6, 10),
            InkPreset::Medium => (17, 30),
            InkPreset::Large => (30, 64),
        }
    }
}

/// Ink spill configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InkConfig {
    pub width: usize,
    pub height: usize,
    pub max_life: u32,
    /// Number of palette colors.
    pub palette: u8,
    pub difficulty: Difficulty,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self::preset(InkPreset::Medium)
    }
}

impl InkConfig {
    /// Square board with the preset's size and life.
    #[must_use]
    pub fn preset(preset: InkPreset) -> Self {
        let (side, max_life) = preset.dimensions();
        Self {
            width: side,
            height: side,
            max_life,
            palette: 6,
            difficulty: Difficulty::Medium,
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: u8) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_max_life(mut self, max_life: u32) -> Self {
        self.max_life = max_life;
        self
    }

    /// Number of neighbor-copy passes the generator applies.
    #[must_use]
    pub fn smoothing_passes(&self) -> usize {
        let small = self.width <= InkPreset::Small.dimensions().0;
        match (self.difficulty, small) {
            (Difficulty::Easy, true) => 100,
            (Difficulty::Easy, false) => 1500,
            (Difficulty::Medium, true) => 5,
            (Difficulty::Medium, false) => 200,
            (Difficulty::Hard, _) => 0,
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(
                "ink board must have at least one cell".into(),
            ));
        }
        check_board_size("ink", self.width, self.height)?;
        if self.palette < 2 {
            return Err(ConfigError::Validation(
                "ink.palette must be >= 2".into(),
            ));
        }
        if self.max_life == 0 {
            return Err(ConfigError::Validation(
                "ink.max_life must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration, loadable from TOML.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Session seed; the same seed replays the same boards and refills.
    pub seed: u64,
    pub flip: FlipConfig,
    pub gems: GemConfig,
    pub ink: InkConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.flip.validate()?;
        self.gems.validate()?;
        self.ink.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.flip.width, 8);
        assert_eq!(config.gems.kinds, 7);
        assert_eq!(config.ink.width, 17);
        assert_eq!(config.ink.max_life, 30);
    }

    #[test]
    fn test_scoring() {
        let scoring = Scoring::default();
        assert_eq!(scoring.points_for(3), 10);
        assert_eq!(scoring.points_for(4), 20);
        assert_eq!(scoring.points_for(5), 30);
    }

    #[test]
    fn test_scoring_saturates() {
        let scoring = Scoring {
            base: i64::MAX,
            per_extra: i64::MAX,
        };
        assert_eq!(scoring.points_for(5), i64::MAX);
        assert_eq!(scoring.points_for(usize::MAX), i64::MAX);
        assert!(scoring.validate().is_err());
        assert!(Scoring::default().validate().is_ok());
    }

    #[test]
    fn test_board_size_limit() {
        assert!(check_board_size("gem", 1024, 1024).is_ok());
        assert!(check_board_size("gem", 1025, 1024).is_err());
        assert!(check_board_size("gem", usize::MAX, 2).is_err());
    }

    #[test]
    fn test_ink_presets() {
        let small = InkConfig::preset(InkPreset::Small);
        assert_eq!((small.width, small.height, small.max_life), (6, 6, 10));

        let large = InkConfig::preset(InkPreset::Large);
        assert_eq!((large.width, large.max_life), (30, 64));
    }

    #[test]
    fn test_smoothing_passes() {
        let small = InkConfig::preset(InkPreset::Small);
        assert_eq!(small.clone().with_difficulty(Difficulty::Easy).smoothing_passes(), 100);
        assert_eq!(small.clone().with_difficulty(Difficulty::Medium).smoothing_passes(), 5);
        assert_eq!(small.with_difficulty(Difficulty::Hard).smoothing_passes(), 0);

        let medium = InkConfig::preset(InkPreset::Medium);
        assert_eq!(medium.clone().with_difficulty(Difficulty::Easy).smoothing_passes(), 1500);
        assert_eq!(medium.smoothing_passes(), 200);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            seed = 99

            [gems]
            kinds = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 99);
        assert_eq!(config.gems.kinds, 5);
        assert_eq!(config.gems.width, 8);
        assert_eq!(config.flip, FlipConfig::default());
    }

    #[test]
    fn test_enum_fields_from_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            [flip]
            first = "White"

            [ink]
            difficulty = "Hard"
            "#,
        )
        .unwrap();

        assert_eq!(config.flip.first, StartingSide::White);
        assert_eq!(config.ink.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = EngineConfig::from_toml_str("[gems]\nkinds = 4\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = EngineConfig::from_toml_str("[ink]\nmax_life = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = EngineConfig::from_toml_str("[flip]\nwidth = 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EngineConfig::from_toml_str("seed = [").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}
