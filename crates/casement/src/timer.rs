//! The timer registry: native timer ids mapped to logical timers.
//!
//! Owned by the shell, consulted by the dispatcher when a timer-fired
//! message arrives. Non-repeating timers leave the registry when they
//! fire; repeating timers stay until stopped. The registry lives for the
//! subsystem, not for any single window, but each native timer is armed
//! against the window handle it was started with.

use std::collections::HashMap;

use casement_core::logging::targets;
use casement_core::{Timer, TimerId};
use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::system::{NativeSystem, RawHandle};

struct TimerEntry {
    timer: Timer,
    window: RawHandle,
    native_id: u64,
}

/// Maps native timer identifiers to logical [`Timer`]s.
#[derive(Default)]
pub struct TimerRegistry {
    entries: SlotMap<TimerId, TimerEntry>,
    by_native: HashMap<u64, TimerId>,
    next_native: u64,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            by_native: HashMap::new(),
            next_native: 1,
        }
    }

    /// Arm `timer` against `window` and take ownership of it.
    ///
    /// Connect to [`Timer::fired`] before starting; the registry owns the
    /// timer from here on.
    pub fn start(
        &mut self,
        system: &mut dyn NativeSystem,
        window: RawHandle,
        timer: Timer,
    ) -> TimerId {
        let native_id = self.next_native;
        self.next_native += 1;
        system.set_timer(window, native_id, timer.interval());
        let id = self.entries.insert(TimerEntry {
            timer,
            window,
            native_id,
        });
        self.by_native.insert(native_id, id);
        debug!(
            target: targets::TIMER,
            native_id,
            window = window.0,
            "timer started"
        );
        id
    }

    /// Stop a timer and remove its entry.
    ///
    /// Stopping a timer that already fired its last shot (or was never
    /// started) is a no-op returning `false`.
    pub fn stop(&mut self, system: &mut dyn NativeSystem, id: TimerId) -> bool {
        let Some(entry) = self.entries.remove(id) else {
            debug!(target: targets::TIMER, "stop of unknown timer ignored");
            return false;
        };
        self.by_native.remove(&entry.native_id);
        system.kill_timer(entry.window, entry.native_id);
        debug!(target: targets::TIMER, native_id = entry.native_id, "timer stopped");
        true
    }

    /// Route a native timer-fired message to its logical timer.
    ///
    /// Returns `false` when no entry matches, so the dispatcher can drop
    /// the message.
    pub fn on_fired(&mut self, system: &mut dyn NativeSystem, native_id: u64) -> bool {
        let Some(&id) = self.by_native.get(&native_id) else {
            return false;
        };
        trace!(target: targets::TIMER, native_id, "timer fired");
        let repeating = self.entries[id].timer.is_repeating();
        self.entries[id].timer.fired.emit(());
        if !repeating {
            if let Some(entry) = self.entries.remove(id) {
                self.by_native.remove(&entry.native_id);
                system.kill_timer(entry.window, entry.native_id);
            }
        }
        true
    }

    /// The logical timer behind `id`, while it is still registered.
    pub fn get(&self, id: TimerId) -> Option<&Timer> {
        self.entries.get(id).map(|e| &e.timer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kill every remaining native timer. Called once at subsystem
    /// teardown.
    pub fn teardown(&mut self, system: &mut dyn NativeSystem) {
        for (_, entry) in self.entries.drain() {
            system.kill_timer(entry.window, entry.native_id);
        }
        self.by_native.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::headless::HeadlessSystem;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counted_timer(timer: Timer) -> (Timer, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        timer.fired.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (timer, count)
    }

    #[test]
    fn test_one_shot_removed_on_fire() {
        let mut sys = HeadlessSystem::new();
        let mut registry = TimerRegistry::new();
        let (timer, count) = counted_timer(Timer::one_shot(Duration::from_millis(10)));
        registry.start(&mut sys, RawHandle(1), timer);
        assert!(registry.on_fired(&mut sys, 1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
        // A late message for the same id is unmatched.
        assert!(!registry.on_fired(&mut sys, 1));
    }

    #[test]
    fn test_repeating_stays_until_stopped() {
        let mut sys = HeadlessSystem::new();
        let mut registry = TimerRegistry::new();
        let (timer, count) = counted_timer(Timer::repeating(Duration::from_millis(10)));
        let id = registry.start(&mut sys, RawHandle(1), timer);
        for _ in 0..3 {
            assert!(registry.on_fired(&mut sys, 1));
        }
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(registry.len(), 1);
        assert!(registry.stop(&mut sys, id));
        assert!(!registry.stop(&mut sys, id));
        assert!(registry.is_empty());
    }
}
