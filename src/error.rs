//! Error taxonomy shared by the layout, registry, view and session layers
//!
//! Every error is recoverable: callers retry with corrected input or state.

use thiserror::Error;

/// Errors reported by stack building and session control
#[derive(Debug, Error)]
pub enum StackError {
    /// Layer capacity must be at least one
    #[error("invalid layer capacity {0}: must be positive")]
    InvalidCapacity(usize),

    /// A record's mastery level has no matching category
    #[error("stack {stack}: record {record_id} has mastery level {mastery_level} outside the category list")]
    InvalidCategory {
        stack: String,
        record_id: u32,
        mastery_level: u32,
    },

    /// Unknown stack (or a view that does not name a stack)
    #[error("stack not found: {0}")]
    NotFound(String),

    /// Unknown view name
    #[error("unknown view: {0}")]
    UnknownView(String),

    /// Session operation before the stack finished its initial build
    #[error("stack {0} has not been built yet")]
    NotReady(String),

    /// A countdown is already running on this stack
    #[error("a session is already running on stack {0}")]
    SessionAlreadyRunning(String),

    /// The stack's last session completed and it has not been reset
    #[error("session on stack {0} completed; reset before starting again")]
    SessionNotReset(String),

    /// Builder invoked on a definition that still holds placed units
    #[error("stack {0} is already built; clear it before building again")]
    AlreadyBuilt(String),

    /// Registry keys must be unique
    #[error("stack {0} is already registered")]
    DuplicateStack(String),

    /// A view selector needs at least one view
    #[error("view selector has no views")]
    EmptyViews,

    /// Settings could not be parsed or written
    #[error("settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Settings file could not be read
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
