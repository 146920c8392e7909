//! End-to-end scenarios over the headless system: widget trees opened into
//! native handles, native messages pumped back into signals.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use casement::system::codes;
use casement::{Message, Shell, WindowState};
use casement_core::{Font, Model, Point, Rect, Timer, Widget};

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let c = Arc::new(AtomicUsize::new(0));
    (c.clone(), c)
}

#[test]
fn test_button_click_round_trip() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    let button = shell
        .add_child(
            Widget::button("go").with_bounds(Rect::new(10, 10, 80, 24)),
            window,
        )
        .unwrap();
    let (clicks, clicks_reader) = counter();
    shell
        .widget(button)
        .unwrap()
        .signals
        .clicked
        .connect(move |_| {
            clicks.fetch_add(1, Ordering::SeqCst);
        });
    shell.open_window(window).unwrap();

    let win_handle = shell.handle_of(window).unwrap();
    let btn_handle = shell.handle_of(button).unwrap();
    shell
        .system_mut()
        .post(Message::command(win_handle, codes::ACTIVATED, Some(btn_handle)));
    shell.process_pending();

    assert_eq!(clicks_reader.load(Ordering::SeqCst), 1);

    // The programmatic press goes through the same path.
    shell.click(button).unwrap();
    assert_eq!(clicks_reader.load(Ordering::SeqCst), 2);
}

#[test]
fn test_text_measurement_is_deterministic() {
    let mut shell = Shell::headless().unwrap();
    let font = Font::new("Sans", 10);
    let size = shell.text_size(Some(&font), "Hello");
    // 5 characters at the fixed advance for a 10pt face.
    assert_eq!(size.width, 5 * 7);
    assert_eq!(size.height, 14);
    // Same inputs, same answer.
    assert_eq!(shell.text_size(Some(&font), "Hello"), size);

    let metrics = shell.text_metrics(Some(&font));
    assert_eq!(metrics.height, 14);
    assert!(metrics.ascent < metrics.height);
    assert!(metrics.average_char_width <= metrics.max_char_width);
    assert!(metrics.average_char_width > 0);
    assert_eq!(metrics.external_leading, 0);
}

#[test]
fn test_combo_selection_from_native() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    let mut combo = Widget::combo_box().with_bounds(Rect::new(10, 10, 120, 24));
    if let Model::Items(items) = &mut combo.model {
        items.values = vec!["red".into(), "green".into(), "blue".into()];
    }
    let combo = shell.add_child(combo, window).unwrap();
    let (changes, changes_reader) = counter();
    shell
        .widget(combo)
        .unwrap()
        .signals
        .selection_changed
        .connect(move |_| {
            changes.fetch_add(1, Ordering::SeqCst);
        });
    shell.open_window(window).unwrap();

    shell.set_selection(combo, Some(2)).unwrap();
    assert_eq!(shell.selection(combo).unwrap(), Some(2));
    // Programmatic selection is silent.
    assert_eq!(changes_reader.load(Ordering::SeqCst), 0);

    // A native selection change comes back as a command.
    let win_handle = shell.handle_of(window).unwrap();
    let combo_handle = shell.handle_of(combo).unwrap();
    shell.system_mut().set_selected_index(combo_handle, Some(0));
    shell.system_mut().post(Message::command(
        win_handle,
        codes::SELECTION_CHANGED,
        Some(combo_handle),
    ));
    shell.process_pending();
    assert_eq!(changes_reader.load(Ordering::SeqCst), 1);
    assert_eq!(shell.selection(combo).unwrap(), Some(0));
}

#[test]
fn test_popup_choice_fires_activation_once() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    shell.open_window(window).unwrap();

    let popup = shell.add_root(Widget::menu("context"));
    shell
        .add_child(Widget::menu_item("cut", 6), popup)
        .unwrap();
    let paste = shell
        .add_child(Widget::menu_item("paste", 7), popup)
        .unwrap();
    let (hits, hits_reader) = counter();
    shell
        .widget(paste)
        .unwrap()
        .signals
        .activated
        .connect(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        });

    shell.headless_mut().unwrap().script_popup_reply(7);
    let chosen = shell.open_popup(window, popup, Point::new(10, 10)).unwrap();
    assert_eq!(chosen, Some(7));
    assert_eq!(hits_reader.load(Ordering::SeqCst), 1);

    // The transient native menu is gone after the call.
    let sys = shell.headless_ref().unwrap();
    assert_eq!(sys.popup_opens(), 1);
    assert_eq!(sys.live_menu_count(), 0);

    // A dismissed popup chooses nothing.
    shell.headless_mut().unwrap().script_popup_reply(0);
    let chosen = shell.open_popup(window, popup, Point::new(40, 40)).unwrap();
    assert_eq!(chosen, None);
    assert_eq!(hits_reader.load(Ordering::SeqCst), 1);
}

#[test]
fn test_repeating_timer_fires_until_stopped() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    shell.open_window(window).unwrap();

    let timer = Timer::repeating(Duration::from_millis(20));
    let (ticks, ticks_reader) = counter();
    timer.fired.connect(move |_| {
        ticks.fetch_add(1, Ordering::SeqCst);
    });
    let id = shell.start_timer(window, timer).unwrap();
    assert_eq!(shell.active_timer_count(), 1);

    shell.headless_mut().unwrap().advance(Duration::from_millis(65));
    shell.process_pending();
    assert_eq!(ticks_reader.load(Ordering::SeqCst), 3);

    assert!(shell.stop_timer(id));
    assert_eq!(shell.active_timer_count(), 0);
    // Once stopped, the clock no longer produces messages.
    shell.headless_mut().unwrap().advance(Duration::from_millis(100));
    assert_eq!(shell.headless_ref().unwrap().pending_messages(), 0);
}

#[test]
fn test_one_shot_timer_unregisters_itself() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    shell.open_window(window).unwrap();

    let timer = Timer::one_shot(Duration::from_millis(10));
    let (ticks, ticks_reader) = counter();
    timer.fired.connect(move |_| {
        ticks.fetch_add(1, Ordering::SeqCst);
    });
    let id = shell.start_timer(window, timer).unwrap();

    shell.headless_mut().unwrap().advance(Duration::from_millis(15));
    shell.process_pending();
    assert_eq!(ticks_reader.load(Ordering::SeqCst), 1);
    assert_eq!(shell.active_timer_count(), 0);
    assert!(!shell.stop_timer(id));
}

#[test]
fn test_close_request_signals_then_closes() {
    let mut shell = Shell::headless().unwrap();
    let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
    let (closings, closings_reader) = counter();
    shell
        .widget(window)
        .unwrap()
        .signals
        .closing
        .connect(move |_| {
            closings.fetch_add(1, Ordering::SeqCst);
        });
    let (closeds, closeds_reader) = counter();
    shell
        .widget(window)
        .unwrap()
        .signals
        .closed
        .connect(move |_| {
            closeds.fetch_add(1, Ordering::SeqCst);
        });
    shell.open_window(window).unwrap();
    assert_eq!(shell.window_state(window), Some(WindowState::Open));

    let handle = shell.handle_of(window).unwrap();
    shell.system_mut().post(Message::close_request(handle));
    shell.process_pending();

    assert_eq!(closings_reader.load(Ordering::SeqCst), 1);
    assert_eq!(closeds_reader.load(Ordering::SeqCst), 1);
    assert_eq!(shell.window_state(window), Some(WindowState::Closed));
    // The logical widget survives the close.
    assert!(shell.widget(window).is_some());
}
