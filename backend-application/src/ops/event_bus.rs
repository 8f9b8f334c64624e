use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use backend_domain::{EventType, GameEvent};
use tracing::{debug, warn};

use crate::Metrics;

pub type Listener = Arc<dyn Fn(&GameEvent) -> anyhow::Result<()> + Send + Sync>;

/// What `emit` does when a listener returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log and count the failure, keep delivering to the remaining listeners.
    #[default]
    Isolate,
    /// Stop at the first failing listener and hand its error to the emitter.
    Propagate,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Isolate => "isolate",
            FailurePolicy::Propagate => "propagate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "isolate" => Some(FailurePolicy::Isolate),
            "propagate" => Some(FailurePolicy::Propagate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitReport {
    pub event_type: EventType,
    pub invoked: usize,
    pub failed: usize,
}

struct Registration {
    id: u64,
    listener: Listener,
}

#[derive(Default)]
struct ListenerTable {
    listeners: RwLock<HashMap<EventType, Vec<Registration>>>,
    next_id: AtomicU64,
}

impl ListenerTable {
    fn snapshot(&self, event_type: EventType) -> Vec<Listener> {
        let listeners = self.listeners.read().unwrap_or_else(|e| e.into_inner());
        listeners
            .get(&event_type)
            .map(|registered| {
                registered
                    .iter()
                    .map(|registration| registration.listener.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn remove(&self, event_type: EventType, id: u64) {
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        if let Some(registered) = listeners.get_mut(&event_type) {
            registered.retain(|registration| registration.id != id);
            if registered.is_empty() {
                listeners.remove(&event_type);
            }
        }
    }
}

/// Synchronous publish/subscribe channel for [`GameEvent`]s.
///
/// Listeners run on the emitter's stack, in registration order, and only for
/// the event type they registered under. The listener list is snapshotted at
/// the start of `emit`, so listeners added or removed while an emit is running
/// take effect from the next emit.
pub struct EventBus {
    table: Arc<ListenerTable>,
    policy: FailurePolicy,
    metrics: Arc<Metrics>,
}

impl EventBus {
    pub fn new(policy: FailurePolicy, metrics: Arc<Metrics>) -> Self {
        Self {
            table: Arc::new(ListenerTable::default()),
            policy,
            metrics,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn on<F>(&self, event_type: EventType, listener: F) -> Subscription
    where
        F: Fn(&GameEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = self.table.next_id.fetch_add(1, Ordering::Relaxed);
        {
            let mut listeners = self.table.listeners.write().unwrap_or_else(|e| e.into_inner());
            listeners.entry(event_type).or_default().push(Registration {
                id,
                listener: Arc::new(listener),
            });
        }
        debug!("listener {} registered for {}", id, event_type);
        Subscription {
            table: Arc::downgrade(&self.table),
            event_type,
            id,
        }
    }

    pub fn emit(&self, event: &GameEvent) -> anyhow::Result<EmitReport> {
        let event_type = event.event_type();
        let listeners = self.table.snapshot(event_type);
        self.metrics.record_emit();
        debug!(
            "emit {} user={} game={} listeners={}",
            event_type,
            event.user_id(),
            event.game_id(),
            listeners.len()
        );

        let mut report = EmitReport {
            event_type,
            invoked: 0,
            failed: 0,
        };
        for listener in listeners {
            report.invoked += 1;
            if let Err(err) = listener(event) {
                self.metrics.record_listener_failure();
                match self.policy {
                    FailurePolicy::Isolate => {
                        report.failed += 1;
                        warn!("listener for {} failed: {:#}", event_type, err);
                    }
                    FailurePolicy::Propagate => {
                        return Err(err.context(format!("listener for {} failed", event_type)));
                    }
                }
            }
        }
        Ok(report)
    }

    pub fn listener_count(&self, event_type: EventType) -> usize {
        let listeners = self.table.listeners.read().unwrap_or_else(|e| e.into_inner());
        listeners.get(&event_type).map(Vec::len).unwrap_or(0)
    }
}

/// Handle returned by [`EventBus::on`]. Unsubscribing is idempotent and
/// outliving the bus is harmless.
#[derive(Clone)]
pub struct Subscription {
    table: Weak<ListenerTable>,
    event_type: EventType,
    id: u64,
}

impl Subscription {
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn unsubscribe(&self) {
        if let Some(table) = self.table.upgrade() {
            table.remove(self.event_type, self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event_type", &self.event_type)
            .field("id", &self.id)
            .finish()
    }
}
