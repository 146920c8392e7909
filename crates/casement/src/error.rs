//! Error types for the windowing layer.
//!
//! Only failures the application can act on become errors. Handles that
//! cannot be resolved during dispatch are logged and the message dropped;
//! capability operations a widget kind does not support are logged no-ops;
//! unbalanced graphics state is a debug assertion. None of those surface
//! here.

use thiserror::Error;

/// Errors surfaced to the application by [`crate::Shell`] operations.
#[derive(Error, Debug)]
pub enum ShellError {
    /// The native system refused to create a handle. The widget stays
    /// unmaterialized; the operation may be retried.
    #[error("native {kind} creation failed: {reason}")]
    Creation {
        kind: &'static str,
        reason: String,
    },

    /// The widget id is not (or no longer) in the arena.
    #[error("widget id is stale or was destroyed")]
    StaleWidget,

    /// The operation needs a live native handle and the widget has none.
    #[error("widget is not materialized")]
    NotMaterialized,

    /// The operation applies to a different widget kind.
    #[error("operation requires a {expected} widget")]
    WrongKind { expected: &'static str },

    /// A widget tree operation failed in the core model.
    #[error(transparent)]
    Core(#[from] casement_core::CoreError),
}

/// Result alias for windowing-layer operations.
pub type ShellResult<T> = std::result::Result<T, ShellError>;
