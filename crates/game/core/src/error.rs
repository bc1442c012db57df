//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. [`SnapshotError`]) live next to the code that
//! produces them; this module only provides the classification shared by all
//! of them.
//!
//! # Design Principles
//!
//! - **Type Safety**: each layer has its own error enum with specific variants
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable Codes**: every variant maps to a static code usable in logs and tests

pub use crate::state::SnapshotError;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: temporary conditions; the next turn may succeed
/// - **Validation**: invalid input that must be rejected as a whole
/// - **Internal**: unexpected inconsistencies that indicate a bug
/// - **Fatal**: the process cannot continue (e.g. the input stream is gone)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or a dead process.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all errors surfaced by the engine crates.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep error codes stable; tests and log filters match on them
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
