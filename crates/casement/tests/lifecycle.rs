//! Handle lifecycle discipline: one native handle per widget, destroyed
//! exactly once, with native quirks visible through the logical tree.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use casement::system::codes;
use casement::{Message, Shell};
use casement_core::{Accelerator, Color, Key, Model, Modifiers, Rect, Widget};

#[test]
fn test_one_handle_per_widget() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 400, 300)));
    let panel = shell
        .add_child(Widget::panel().with_bounds(Rect::new(0, 0, 400, 260)), window)
        .unwrap();
    let label = shell
        .add_child(Widget::label("name").with_bounds(Rect::new(8, 8, 60, 18)), panel)
        .unwrap();
    let field = shell
        .add_child(
            Widget::text_field().with_bounds(Rect::new(72, 8, 160, 22)),
            panel,
        )
        .unwrap();
    shell.open_window(window).unwrap();

    let handles: HashSet<_> = [window, panel, label, field]
        .into_iter()
        .map(|id| shell.handle_of(id).unwrap())
        .collect();
    assert_eq!(handles.len(), 4);
    assert_eq!(shell.headless_ref().unwrap().live_handle_count(), 4);

    // Reopening an already-open tree creates nothing new.
    shell.open_window(window).unwrap();
    assert_eq!(shell.headless_ref().unwrap().live_handle_count(), 4);
}

#[test]
fn test_destroy_happens_exactly_once() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    shell
        .add_child(Widget::button("a").with_bounds(Rect::new(10, 10, 60, 24)), window)
        .unwrap();
    shell
        .add_child(Widget::button("b").with_bounds(Rect::new(80, 10, 60, 24)), window)
        .unwrap();
    shell.open_window(window).unwrap();
    shell.close_window(window).unwrap();
    shell.destroy_widget(window);

    let sys = shell.headless_ref().unwrap();
    assert_eq!(sys.live_handle_count(), 0);
    assert_eq!(sys.stale_handle_destroys(), 0);
    assert!(shell.widget(window).is_none());
}

#[test]
fn test_list_box_height_snaps_to_rows() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    let mut list = Widget::list_box().with_bounds(Rect::new(10, 10, 120, 75));
    if let Model::Items(items) = &mut list.model {
        items.values = vec!["one".into(), "two".into(), "three".into()];
    }
    let list = shell.add_child(list, window).unwrap();
    shell.open_window(window).unwrap();

    // The native control rounds its height down to whole rows and the
    // adapter reads the result back.
    let bounds = shell.bounds_of(list).unwrap();
    assert_eq!(bounds.height, 64);
    assert_eq!(bounds.width, 120);
}

#[test]
fn test_host_frame_handle_belongs_to_the_host() {
    let mut shell = Shell::headless().unwrap();
    // Another window stands in for the embedding host's native handle.
    let host = shell.add_root(Widget::window("host").with_bounds(Rect::new(0, 0, 400, 300)));
    shell.open_window(host).unwrap();
    let host_handle = shell.handle_of(host).unwrap();

    let frame = shell.add_root(
        Widget::host_frame(host_handle.0).with_bounds(Rect::new(0, 0, 200, 150)),
    );
    shell.open_window(frame).unwrap();
    assert_eq!(shell.headless_ref().unwrap().live_handle_count(), 2);

    // Destroying the logical widget releases the binding but leaves the
    // native handle to the host.
    shell.destroy_widget(frame);
    let sys = shell.headless_ref().unwrap();
    assert_eq!(sys.live_handle_count(), 2);
    assert_eq!(sys.stale_handle_destroys(), 0);
}

#[test]
fn test_accelerator_becomes_a_command() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    let save = shell
        .add_child(
            Widget::button("save")
                .with_bounds(Rect::new(10, 10, 60, 24))
                .with_command_id(42),
            window,
        )
        .unwrap();
    shell
        .widget_mut(window)
        .unwrap()
        .accelerators
        .push(Accelerator::new(Key::Char('s'), Modifiers::CTRL, 42));

    let activations = Arc::new(AtomicUsize::new(0));
    {
        let activations = activations.clone();
        shell
            .widget(save)
            .unwrap()
            .signals
            .activated
            .connect(move |_| {
                activations.fetch_add(1, Ordering::SeqCst);
            });
    }
    let key_events = Arc::new(AtomicUsize::new(0));
    {
        let key_events = key_events.clone();
        shell.widget(window).unwrap().signals.key.connect(move |_| {
            key_events.fetch_add(1, Ordering::SeqCst);
        });
    }
    shell.open_window(window).unwrap();

    let handle = shell.handle_of(window).unwrap();
    shell
        .system_mut()
        .post(Message::key_down(handle, Key::Char('s'), Modifiers::CTRL));
    shell.process_pending();

    // The keystroke was consumed by the translation, not delivered.
    assert_eq!(activations.load(Ordering::SeqCst), 1);
    assert_eq!(key_events.load(Ordering::SeqCst), 0);

    // Without the modifier the key reaches the window untranslated.
    shell
        .system_mut()
        .post(Message::key_down(handle, Key::Char('s'), Modifiers::empty()));
    shell.process_pending();
    assert_eq!(activations.load(Ordering::SeqCst), 1);
    assert_eq!(key_events.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unmatched_command_is_dropped_quietly() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    let button = shell
        .add_child(Widget::button("go").with_bounds(Rect::new(10, 10, 60, 24)), window)
        .unwrap();
    let clicks = Arc::new(AtomicUsize::new(0));
    {
        let clicks = clicks.clone();
        shell
            .widget(button)
            .unwrap()
            .signals
            .clicked
            .connect(move |_| {
                clicks.fetch_add(1, Ordering::SeqCst);
            });
    }
    shell.open_window(window).unwrap();

    let handle = shell.handle_of(window).unwrap();
    let btn_handle = shell.handle_of(button).unwrap();
    // An id nothing claims, then a real click. The drop must not disturb
    // the message after it.
    shell.system_mut().post(Message::command(handle, 999, None));
    shell
        .system_mut()
        .post(Message::command(handle, codes::ACTIVATED, Some(btn_handle)));
    shell.process_pending();

    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn test_released_colors_free_native_resources() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    shell.open_window(window).unwrap();

    let accent = Color::new(200, 30, 30);
    shell
        .with_graphics(window, |g| {
            g.set_color(accent);
            g.fill_rect(Rect::new(10, 10, 50, 50));
            g.draw_rect(Rect::new(10, 10, 50, 50));
        })
        .unwrap();
    let sys = shell.headless_ref().unwrap();
    assert!(sys.live_brush_count() >= 1);
    assert!(sys.live_pen_count() >= 1);

    shell.release_color(accent);
    let sys = shell.headless_ref().unwrap();
    assert_eq!(sys.live_brush_count(), 0);
    assert_eq!(sys.live_pen_count(), 0);
    assert_eq!(sys.stale_resource_deletes(), 0);
}
