use std::sync::{Arc, Mutex};

use flume::{Receiver, Sender};

use super::types::AppRoute;

/// Navigation side effect. The presentation layer subscribes through
/// `changes` and renders whatever route is current. Routes are only
/// queued for live subscribers.
#[derive(Clone, Default)]
pub struct Router {
    current: Arc<Mutex<AppRoute>>,
    subscribers: Arc<Mutex<Vec<Sender<AppRoute>>>>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("current", &self.current())
            .finish()
    }
}

impl Router {
    pub fn current(&self) -> AppRoute {
        self.current
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    pub fn navigate(&self, route: AppRoute) {
        log::debug!("navigate to {route}");
        if let Ok(mut current) = self.current.lock() {
            *current = route.clone();
        }
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|sender| sender.send(route.clone()).is_ok());
        }
    }

    /// Same as `navigate`, used when a response forces us away
    /// from the current view
    pub fn redirect(&self, route: AppRoute) {
        log::debug!("redirect from {} to {route}", self.current());
        self.navigate(route);
    }

    /// Every route navigated to from now on. Dropping the receiver
    /// unsubscribes.
    pub fn changes(&self) -> Receiver<AppRoute> {
        let (sender, receiver) = flume::unbounded();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(sender);
        }
        receiver
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or_default()
    }
}
