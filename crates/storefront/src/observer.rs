//! Observer System - components that react to cart events
//!
//! Every presentation surface (drawer, badge, toasts) is an observer. The
//! manager hands each event to every observer in registration order, one
//! after the other, so an earlier observer can leave a note for a later
//! one in the shared `DispatchContext`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::events::CartEvent;

/// One-shot "a notification was already shown" signal
///
/// Armed by a surface that confirmed the action inline; consumed by the
/// first toast `show` that sees it. Consuming always clears it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SuppressionFlag {
    armed: bool,
}

impl SuppressionFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn is_set(&self) -> bool {
        self.armed
    }

    /// Read and clear
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }
}

/// State shared by the observers of a single dispatch
#[derive(Debug, Default)]
pub struct DispatchContext {
    suppression: SuppressionFlag,
}

impl DispatchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The event has been confirmed inline; skip the next toast
    pub fn suppress_next_toast(&mut self) {
        self.suppression.arm();
    }

    pub fn suppression(&self) -> &SuppressionFlag {
        &self.suppression
    }

    pub fn suppression_mut(&mut self) -> &mut SuppressionFlag {
        &mut self.suppression
    }
}

/// Observer trait - reacts to cart events
#[async_trait]
pub trait CartObserver: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &str;

    /// Handle a cart event
    ///
    /// Called for EVERY event. The observer decides what to care about.
    async fn on_event(&self, event: &CartEvent, ctx: &mut DispatchContext);

    /// Optional: called at session shutdown to cancel timers
    async fn on_detach(&self) {}
}

/// Observer manager - dispatches events to all observers
pub struct ObserverManager {
    observers: Vec<Arc<dyn CartObserver>>,
}

impl ObserverManager {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Add an observer; it runs after every observer registered before it
    pub fn register(&mut self, observer: Arc<dyn CartObserver>) {
        tracing::debug!("Registered observer: {}", observer.name());
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver an event to every observer, in order
    ///
    /// Returns the context as the last observer left it.
    pub async fn dispatch(&self, event: &CartEvent) -> DispatchContext {
        let mut ctx = DispatchContext::new();
        for observer in &self.observers {
            observer.on_event(event, &mut ctx).await;
        }
        ctx
    }

    /// Detach all observers concurrently
    pub async fn detach_all(&self) {
        use futures_util::future::join_all;

        join_all(self.observers.iter().map(|o| o.on_detach())).await;
    }
}

impl Default for ObserverManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CartChange;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Recorder {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
        arms: bool,
    }

    #[async_trait]
    impl CartObserver for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        async fn on_event(&self, _event: &CartEvent, ctx: &mut DispatchContext) {
            let seen = ctx.suppression().is_set();
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, seen));
            if self.arms {
                ctx.suppress_next_toast();
            }
        }
    }

    struct Detacher(Arc<AtomicUsize>);

    #[async_trait]
    impl CartObserver for Detacher {
        fn name(&self) -> &str {
            "detacher"
        }

        async fn on_event(&self, _event: &CartEvent, _ctx: &mut DispatchContext) {}

        async fn on_detach(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_dispatch_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = ObserverManager::new();

        manager.register(Arc::new(Recorder {
            name: "drawer".into(),
            log: log.clone(),
            arms: true,
        }));
        manager.register(Arc::new(Recorder {
            name: "toast".into(),
            log: log.clone(),
            arms: false,
        }));

        let ctx = manager
            .dispatch(&CartEvent::changed(CartChange::Synced))
            .await;

        assert_eq!(*log.lock().unwrap(), vec!["drawer:false", "toast:true"]);
        assert!(ctx.suppression().is_set());
    }

    #[tokio::test]
    async fn test_each_dispatch_starts_unsuppressed() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = ObserverManager::new();
        manager.register(Arc::new(Recorder {
            name: "a".into(),
            log: log.clone(),
            arms: true,
        }));

        let event = CartEvent::changed(CartChange::Synced);
        manager.dispatch(&event).await;
        manager.dispatch(&event).await;

        assert_eq!(*log.lock().unwrap(), vec!["a:false", "a:false"]);
    }

    #[tokio::test]
    async fn test_detach_all() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut manager = ObserverManager::new();
        manager.register(Arc::new(Detacher(counter.clone())));
        manager.register(Arc::new(Detacher(counter.clone())));

        manager.detach_all().await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_suppression_flag_is_one_shot() {
        let mut flag = SuppressionFlag::new();
        assert!(!flag.take());

        flag.arm();
        assert!(flag.take());
        assert!(!flag.is_set());
        assert!(!flag.take());
    }
}
