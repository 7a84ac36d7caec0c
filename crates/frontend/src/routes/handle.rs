use std::sync::Arc;

use futures::channel::mpsc::UnboundedSender;
use parking_lot::RwLock;

use super::table::Route;

/// Work item for the router queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRequest {
    /// Programmatic navigation; pushes a history entry once the route commits.
    Push(String),
    /// The history already moved (back/forward button): dispatch only.
    Pop(String),
    Back,
    Forward,
}

/// Cloneable navigation handle given to the app context and pages.
///
/// Requests are queued and handled by the router one cycle at a time, so
/// calling `navigate` from inside a render or a hook never interleaves with
/// the cycle in progress.
#[derive(Clone)]
pub struct RouterHandle {
    sender: UnboundedSender<NavRequest>,
    current: Arc<RwLock<Option<Route>>>,
}

impl RouterHandle {
    pub(crate) fn new(
        sender: UnboundedSender<NavRequest>,
        current: Arc<RwLock<Option<Route>>>,
    ) -> Self {
        Self { sender, current }
    }

    pub fn navigate(&self, path: impl Into<String>) {
        self.send(NavRequest::Push(path.into()));
    }

    pub fn back(&self) {
        self.send(NavRequest::Back);
    }

    pub fn forward(&self) {
        self.send(NavRequest::Forward);
    }

    pub(crate) fn history_changed(&self, path: String) {
        self.send(NavRequest::Pop(path));
    }

    /// Most recently committed route.
    pub fn current_route(&self) -> Option<Route> {
        self.current.read().clone()
    }

    fn send(&self, request: NavRequest) {
        if let Err(err) = self.sender.unbounded_send(request) {
            log::warn!(
                "router is not running; dropped {:?}",
                err.into_inner()
            );
        }
    }
}
