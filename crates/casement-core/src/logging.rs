//! Logging and debugging facilities.
//!
//! Casement instruments itself with the `tracing` crate. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! The constants below name the per-subsystem targets so log output can be
//! filtered (`RUST_LOG=casement::dispatch=trace`). [`format_tree`] renders a
//! widget tree for debug dumps.

use std::fmt::Write as FmtWrite;

use crate::widget::{WidgetArena, WidgetId};

/// Span names used for tracing instrumentation.
pub mod span_names {
    /// Message pump span.
    pub const PUMP: &str = "casement::pump";
    /// Nested modal loop span.
    pub const MODAL: &str = "casement::modal";
    /// Signal emission span.
    pub const SIGNAL: &str = "casement::signal";
}

/// Target names for log filtering.
pub mod targets {
    /// Core model target.
    pub const CORE: &str = "casement_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "casement_core::signal";
    /// Widget tree target.
    pub const WIDGET: &str = "casement_core::widget";
    /// Message routing target.
    pub const DISPATCH: &str = "casement::dispatch";
    /// Adapter lifecycle target.
    pub const ADAPTER: &str = "casement::adapter";
    /// Window and dialog target.
    pub const WINDOW: &str = "casement::window";
    /// Menu tree target.
    pub const MENU: &str = "casement::menu";
    /// Timer registry target.
    pub const TIMER: &str = "casement::timer";
    /// Native resource cache target.
    pub const RESOURCE: &str = "casement::resource";
    /// Native system backend target.
    pub const SYSTEM: &str = "casement::system";
    /// Subsystem context target.
    pub const SHELL: &str = "casement::shell";
}

/// Render the subtree rooted at `root` as an indented tree, one widget per
/// line with kind, text, and bounds.
pub fn format_tree(arena: &WidgetArena, root: WidgetId) -> String {
    let mut out = String::new();
    if arena.contains(root) {
        format_node(arena, root, "", true, true, &mut out);
    } else {
        out.push_str("(stale widget id)\n");
    }
    out
}

fn format_node(
    arena: &WidgetArena,
    id: WidgetId,
    prefix: &str,
    is_last: bool,
    is_root: bool,
    out: &mut String,
) {
    let widget = match arena.get(id) {
        Some(w) => w,
        None => return,
    };

    let branch = if is_root {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };
    let b = widget.bounds;
    let _ = write!(out, "{prefix}{branch}{}", widget.kind().name());
    if !widget.text.is_empty() {
        let _ = write!(out, " {:?}", widget.text);
    }
    let _ = write!(out, " [{},{} {}x{}]", b.x, b.y, b.width, b.height);
    if !widget.visible {
        out.push_str(" (hidden)");
    }
    if !widget.enabled {
        out.push_str(" (disabled)");
    }
    out.push('\n');

    let child_prefix = if is_root {
        String::new()
    } else if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };
    let children = arena.children(id);
    for (i, &child) in children.iter().enumerate() {
        format_node(
            arena,
            child,
            &child_prefix,
            i + 1 == children.len(),
            false,
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    #[test]
    fn test_format_tree() {
        let mut arena = WidgetArena::new();
        let window = arena.insert(Widget::window("main"));
        let panel = arena.insert_child(Widget::panel(), window).unwrap();
        let mut hidden = Widget::button("ok");
        hidden.visible = false;
        arena.insert_child(hidden, panel).unwrap();
        arena.insert_child(Widget::label("status"), window).unwrap();

        let dump = format_tree(&arena, window);
        assert!(dump.starts_with("window \"main\""));
        assert!(dump.contains("├── panel"));
        assert!(dump.contains("└── button \"ok\""));
        assert!(dump.contains("(hidden)"));
        assert_eq!(dump.lines().count(), 4);
    }

    #[test]
    fn test_format_tree_stale() {
        let mut arena = WidgetArena::new();
        let id = arena.insert(Widget::panel());
        arena.remove(id);
        assert_eq!(format_tree(&arena, id), "(stale widget id)\n");
    }
}
