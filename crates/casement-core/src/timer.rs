//! Logical timers.
//!
//! A [`Timer`] is pure description plus a `fired` signal. Nothing here
//! counts time: the windowing layer registers the timer with the native
//! system and routes native timer messages back to [`Timer::fired`].

use std::time::Duration;

use slotmap::new_key_type;

use crate::signal::Signal;

new_key_type! {
    /// Identifies a started timer in the windowing layer's registry.
    pub struct TimerId;
}

/// A logical timer.
///
/// Connect to [`Timer::fired`] before handing the timer to the windowing
/// layer; the timer is owned by the registry once started.
pub struct Timer {
    interval: Duration,
    repeating: bool,
    /// Emitted each time the native timer fires.
    pub fired: Signal<()>,
}

impl Timer {
    /// A timer that fires every `interval` until stopped.
    pub fn repeating(interval: Duration) -> Self {
        Self {
            interval,
            repeating: true,
            fired: Signal::new(),
        }
    }

    /// A timer that fires once after `interval` and is then discarded.
    pub fn one_shot(interval: Duration) -> Self {
        Self {
            interval,
            repeating: false,
            fired: Signal::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_description() {
        let t = Timer::repeating(Duration::from_millis(250));
        assert_eq!(t.interval(), Duration::from_millis(250));
        assert!(t.is_repeating());
        assert!(!Timer::one_shot(Duration::from_secs(1)).is_repeating());
    }
}
