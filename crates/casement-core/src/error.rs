//! Error types for the core model.

use std::fmt;

/// Errors raised by the widget tree and related core structures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The widget id is not present in the arena.
    WidgetNotFound,
    /// Attaching would make a widget its own ancestor.
    WouldCycle,
    /// The widget already has a parent.
    AlreadyAttached,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WidgetNotFound => write!(f, "Widget not found in the arena"),
            Self::WouldCycle => {
                write!(f, "Attachment would create a cycle in the widget tree")
            }
            Self::AlreadyAttached => write!(f, "Widget is already attached to a parent"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Result alias for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
