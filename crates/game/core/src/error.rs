//! Common error infrastructure for quiz-core.
//!
//! Domain-specific errors (`WordleError`, `MazeError`, `XpError`,
//! `MultiChoiceError`) live next to the rules they guard. They all implement
//! [`GameError`] so callers can classify a failure without matching on every
//! variant.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each engine has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Non-fatal**: No rule violation in this crate corrupts session state

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the user can correct the input and resubmit
/// - **Validation**: the request itself is invalid and should not be retried as-is
/// - **Internal**: unexpected state inconsistency that requires investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with a corrected submission.
    ///
    /// Examples: incomplete row, hard-mode hints missing
    Recoverable,

    /// Validation error - invalid input or missing precondition.
    ///
    /// Examples: unsupported character, unknown maze item, missing profile
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all quiz-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for status codes shown on session snapshots and for tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
