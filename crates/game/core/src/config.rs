use crate::xp::XpConfig;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of guess rows a word-guess session starts with.
    pub default_row_limit: usize,
    /// Number of questions fetched for a multi-choice session.
    pub question_count: usize,
    /// XP coefficients, level curve and diamond rewards.
    pub xp: XpConfig,
}

impl GameConfig {
    // ===== compile-time limits =====
    pub const MIN_WORD_LENGTH: usize = 1;
    pub const MAX_WORD_LENGTH: usize = 16;
    pub const MAX_ROW_LIMIT: usize = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROW_LIMIT: usize = 6;
    pub const DEFAULT_QUESTION_COUNT: usize = 10;
    /// Countdown per multi-choice question.
    pub const DEFAULT_QUESTION_COUNTDOWN_MS: u64 = 30_000;

    pub fn new() -> Self {
        Self {
            default_row_limit: Self::DEFAULT_ROW_LIMIT,
            question_count: Self::DEFAULT_QUESTION_COUNT,
            xp: XpConfig::default(),
        }
    }

    /// Resolves the row limit for a session, honouring a user override.
    ///
    /// Overrides are clamped to `1..=MAX_ROW_LIMIT`.
    pub fn row_limit(&self, override_limit: Option<usize>) -> usize {
        override_limit
            .unwrap_or(self.default_row_limit)
            .clamp(1, Self::MAX_ROW_LIMIT)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
