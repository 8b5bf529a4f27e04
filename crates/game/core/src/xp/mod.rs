//! Experience points and leveling.
//!
//! Everything here is a pure computation. The engine returns decisions
//! ([`XpAward`]) and the caller owns persisting totals and diamonds.
mod generator;
mod level;
mod profile;

pub use generator::{
    MultiChoicePerformance, MultiChoiceXpGenerator, WordlePerformance, WordleXpGenerator,
    XpGenerator,
};
pub use level::LevelCurve;
pub use profile::{UserProfile, XpAward, award_xp};

use crate::error::{ErrorSeverity, GameError};

/// Tunable XP coefficients.
///
/// Every field has a default, so a partial remote payload still deserializes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct XpConfig {
    pub multi_choice: MultiChoiceXpGenerator,
    pub wordle: WordleXpGenerator,
    pub level: LevelCurve,
    /// Diamonds granted when a level boundary is crossed.
    pub new_level_diamonds: i64,
    /// Diamond balance of a newly created profile.
    pub initial_diamonds: i64,
}

impl XpConfig {
    pub const DEFAULT_NEW_LEVEL_DIAMONDS: i64 = 10;
    pub const DEFAULT_INITIAL_DIAMONDS: i64 = 25;
}

impl Default for XpConfig {
    fn default() -> Self {
        Self {
            multi_choice: MultiChoiceXpGenerator::default(),
            wordle: WordleXpGenerator::default(),
            level: LevelCurve::default(),
            new_level_diamonds: Self::DEFAULT_NEW_LEVEL_DIAMONDS,
            initial_diamonds: Self::DEFAULT_INITIAL_DIAMONDS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XpError {
    #[error("no user profile to apply XP to")]
    ProfileNotFound,
}

impl GameError for XpError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ProfileNotFound => "XP_PROFILE_NOT_FOUND",
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn partial_remote_config_keeps_defaults() {
        let config: XpConfig =
            serde_json::from_str(r#"{"wordle":{"solved_xp":100},"new_level_diamonds":5}"#)
                .unwrap();
        assert_eq!(config.wordle.solved_xp, 100);
        assert_eq!(config.wordle.row_penalty_xp, 10);
        assert_eq!(config.new_level_diamonds, 5);
        assert_eq!(config.level, LevelCurve::default());
    }
}
