//! Deterministic quiz rules shared by the runtime and clients.
//!
//! `quiz-core` defines the canonical game logic (word verification, maze
//! unlocking, XP and leveling, multi-choice steps) as pure, synchronous APIs.
//! Word-guess state only changes through [`wordle::WordleEngine`], and
//! supporting crates depend on the types re-exported here.
pub mod config;
pub mod error;
pub mod maze;
pub mod multi_choice;
pub mod wordle;
pub mod xp;

pub use config::GameConfig;
pub use error::{ErrorSeverity, GameError};
pub use maze::{MazeError, MazeItem, MazeItemId, MazePayload, MazeTrack};
pub use multi_choice::{
    MultiChoiceError, MultiChoiceOutcome, MultiChoiceQuestion, MultiChoiceSession,
    MultiChoiceStep, QuestionDifficulty, SelectedAnswer,
};
pub use wordle::{
    SessionStatus, TargetWord, WordValidator, WordleChar, WordleEngine, WordleError, WordleInput,
    WordleItem, WordleOutcome, WordleQuizType, WordleRow, WordleSession,
};
pub use xp::{
    LevelCurve, MultiChoicePerformance, MultiChoiceXpGenerator, UserProfile, WordlePerformance,
    WordleXpGenerator, XpAward, XpConfig, XpError, XpGenerator, award_xp,
};
