//! Modal dialog loops: input filtering, nesting, and what still flows
//! while a dialog blocks the rest of the UI.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use casement::system::codes;
use casement::{Message, MessageKind, Shell, WindowState};
use casement_core::{Color, Rect, Widget};

#[test]
fn test_dialog_suppresses_outside_input() {
    let mut shell = Shell::headless().unwrap();
    let main = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    let main_button = shell
        .add_child(
            Widget::button("outside").with_bounds(Rect::new(10, 10, 80, 24)),
            main,
        )
        .unwrap();
    let dialog = shell.add_root(Widget::dialog("ask").with_bounds(Rect::new(50, 50, 200, 120)));
    let ok = shell
        .add_child(
            Widget::button("ok").with_bounds(Rect::new(10, 60, 60, 24)),
            dialog,
        )
        .unwrap();

    let outside_clicks = Arc::new(AtomicUsize::new(0));
    {
        let outside_clicks = outside_clicks.clone();
        shell
            .widget(main_button)
            .unwrap()
            .signals
            .clicked
            .connect(move |_| {
                outside_clicks.fetch_add(1, Ordering::SeqCst);
            });
    }
    let ok_clicks = Arc::new(AtomicUsize::new(0));
    {
        let ok_clicks = ok_clicks.clone();
        let queue = shell.queue();
        shell.widget(ok).unwrap().signals.clicked.connect(move |_| {
            ok_clicks.fetch_add(1, Ordering::SeqCst);
            queue.close(dialog);
        });
    }

    shell.open_window(main).unwrap();
    let main_handle = shell.handle_of(main).unwrap();
    let btn_handle = shell.handle_of(main_button).unwrap();
    // Queued before the loop starts: a click for the window behind the
    // dialog, then the dialog's own ok click.
    shell
        .system_mut()
        .post(Message::command(main_handle, codes::ACTIVATED, Some(btn_handle)));
    let queue = shell.queue();
    queue.run(move |shell| {
        let dialog_handle = shell.handle_of(dialog).unwrap();
        let ok_handle = shell.handle_of(ok).unwrap();
        shell
            .system_mut()
            .post(Message::command(dialog_handle, codes::ACTIVATED, Some(ok_handle)));
    });

    shell.show_dialog(dialog).unwrap();

    assert_eq!(outside_clicks.load(Ordering::SeqCst), 0);
    assert_eq!(ok_clicks.load(Ordering::SeqCst), 1);
    assert_eq!(shell.window_state(dialog), Some(WindowState::Closed));
    assert_eq!(shell.window_state(main), Some(WindowState::Open));
}

#[test]
fn test_nested_dialogs_unwind_in_order() {
    let mut shell = Shell::headless().unwrap();
    let first = shell.add_root(Widget::dialog("first").with_bounds(Rect::new(40, 40, 220, 140)));
    let ok = shell
        .add_child(
            Widget::button("more").with_bounds(Rect::new(10, 80, 60, 24)),
            first,
        )
        .unwrap();
    let second = shell.add_root(Widget::dialog("second").with_bounds(Rect::new(80, 80, 180, 100)));

    let events: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    {
        let events = events.clone();
        let queue = shell.queue();
        shell.widget(ok).unwrap().signals.clicked.connect(move |_| {
            let events = events.clone();
            queue.run(move |shell| {
                events.lock().unwrap().push("second opening");
                shell.queue().close(second);
                shell.show_dialog(second).unwrap();
                events.lock().unwrap().push("second closed");
                shell.queue().close(first);
            });
        });
    }

    let queue = shell.queue();
    queue.run(move |shell| {
        let handle = shell.handle_of(first).unwrap();
        let ok_handle = shell.handle_of(ok).unwrap();
        shell
            .system_mut()
            .post(Message::command(handle, codes::ACTIVATED, Some(ok_handle)));
    });
    shell.show_dialog(first).unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec!["second opening", "second closed"]
    );
    assert_eq!(shell.window_state(first), Some(WindowState::Closed));
    assert_eq!(shell.window_state(second), Some(WindowState::Closed));
}

#[test]
fn test_paint_flows_while_modal() {
    let mut shell = Shell::headless().unwrap();
    let main = shell.add_root(
        Widget::window("main")
            .with_bounds(Rect::new(0, 0, 300, 200))
            .with_background(Color::new(240, 240, 240)),
    );
    let dialog = shell.add_root(Widget::dialog("busy").with_bounds(Rect::new(50, 50, 200, 120)));
    let ok = shell
        .add_child(
            Widget::button("ok").with_bounds(Rect::new(10, 60, 60, 24)),
            dialog,
        )
        .unwrap();
    {
        let queue = shell.queue();
        shell.widget(ok).unwrap().signals.clicked.connect(move |_| {
            queue.close(dialog);
        });
    }
    shell.open_window(main).unwrap();
    let main_handle = shell.handle_of(main).unwrap();

    let queue = shell.queue();
    queue.run(move |shell| {
        shell.headless_mut().unwrap().clear_draw_ops();
        // A repaint for the blocked window, then the click that ends the
        // loop.
        shell
            .system_mut()
            .post(Message::new(main_handle, MessageKind::Paint, 0, 0));
        let dialog_handle = shell.handle_of(dialog).unwrap();
        let ok_handle = shell.handle_of(ok).unwrap();
        shell
            .system_mut()
            .post(Message::command(dialog_handle, codes::ACTIVATED, Some(ok_handle)));
    });
    shell.show_dialog(dialog).unwrap();

    // The background fill proves the paint was dispatched despite the
    // modal filter.
    let sys = shell.headless_ref().unwrap();
    assert!(
        sys.draw_ops()
            .iter()
            .any(|op| matches!(op, casement::system::headless::DrawOp::FillRect(_))),
        "paint for the blocked window was suppressed"
    );
    assert_eq!(shell.window_state(dialog), Some(WindowState::Closed));
}
