use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    events_emitted: AtomicU64,
    listener_failures: AtomicU64,
    unlocks_recorded: AtomicU64,
    repeat_unlocks: AtomicU64,
    definitions_registered: AtomicU64,
}

impl Metrics {
    pub fn record_emit(&self) {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_listener_failure(&self) {
        self.listener_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unlock(&self) {
        self.unlocks_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_repeat_unlock(&self) {
        self.repeat_unlocks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_definition(&self) {
        self.definitions_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn unlocks_recorded(&self) -> u64 {
        self.unlocks_recorded.load(Ordering::Relaxed)
    }

    pub fn listener_failures(&self) -> u64 {
        self.listener_failures.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let events = self.events_emitted.load(Ordering::Relaxed);
        let failures = self.listener_failures.load(Ordering::Relaxed);
        let unlocks = self.unlocks_recorded.load(Ordering::Relaxed);
        let repeats = self.repeat_unlocks.load(Ordering::Relaxed);
        let definitions = self.definitions_registered.load(Ordering::Relaxed);

        format!(
            "# TYPE trivia_events_emitted_total counter\n\
trivia_events_emitted_total {}\n\
# TYPE trivia_listener_failures_total counter\n\
trivia_listener_failures_total {}\n\
# TYPE trivia_unlocks_recorded_total counter\n\
trivia_unlocks_recorded_total {}\n\
# TYPE trivia_repeat_unlocks_total counter\n\
trivia_repeat_unlocks_total {}\n\
# TYPE trivia_definitions_registered_total counter\n\
trivia_definitions_registered_total {}\n",
            events, failures, unlocks, repeats, definitions
        )
    }
}
