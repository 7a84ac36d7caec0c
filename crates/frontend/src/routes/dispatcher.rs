use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::future::LocalBoxFuture;
use futures::{FutureExt, StreamExt};
use parking_lot::RwLock;

use super::error::RouterError;
use super::guards::{GuardChain, GuardDeadline, GuardOutcome, NavigationContext, Next, Timer};
use super::handle::{NavRequest, RouterHandle};
use super::history::History;
use super::table::{Route, RouteTable};

pub const DEFAULT_MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Resolving,
    Guarding,
    Committed,
    Redirecting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Target equals the committed location; nothing ran.
    Unchanged,
    Committed(Route),
    /// A guard aborted; the current route is untouched.
    Blocked,
}

type AfterHook = Box<dyn Fn(&Route) -> LocalBoxFuture<'static, ()>>;

/// How a dispatch relates to the history entry the browser is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    /// In-app navigation: a new entry is pushed once the route commits.
    Push,
    /// The history already moved (start, popstate, back/forward).
    Current,
}

/// Route change dispatcher. Owns the current route; everything else only
/// reads it through [`Router::current_route`] or a [`RouterHandle`].
pub struct Router {
    table: RouteTable,
    guards: GuardChain,
    after_hooks: Vec<AfterHook>,
    history: Box<dyn History>,
    current: Arc<RwLock<Option<Route>>>,
    location: Option<String>,
    state: DispatchState,
    max_redirects: usize,
    deadline: Option<GuardDeadline>,
    sender: UnboundedSender<NavRequest>,
    requests: UnboundedReceiver<NavRequest>,
}

impl Router {
    pub fn new(history: impl History + 'static) -> Self {
        let (sender, requests) = mpsc::unbounded();
        Self {
            table: RouteTable::new(),
            guards: GuardChain::new(),
            after_hooks: Vec::new(),
            history: Box::new(history),
            current: Arc::new(RwLock::new(None)),
            location: None,
            state: DispatchState::Idle,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            deadline: None,
            sender,
            requests,
        }
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Aborts a navigation when a guard leaves its continuation unresolved
    /// for longer than `after`.
    pub fn with_guard_timeout(mut self, timer: impl Timer + 'static, after: Duration) -> Self {
        self.deadline = Some(GuardDeadline {
            timer: Box::new(timer),
            after,
        });
        self
    }

    pub fn add_route(&mut self, path: &str, module_id: &str, name: &str) {
        self.table.register(path, module_id, name);
    }

    pub fn before_each<G>(&mut self, guard: G)
    where
        G: Fn(&NavigationContext, Next) + 'static,
    {
        self.guards.add(guard);
    }

    /// Registers a hook run, and awaited, after every commit.
    pub fn after_each<F, Fut>(&mut self, hook: F)
    where
        F: Fn(&Route) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.after_hooks
            .push(Box::new(move |route: &Route| hook(route).boxed_local()));
    }

    pub fn handle(&self) -> RouterHandle {
        RouterHandle::new(self.sender.clone(), self.current.clone())
    }

    pub fn current_route(&self) -> Option<Route> {
        self.current.read().clone()
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Dispatches whatever path the history currently shows.
    pub async fn start(&mut self) -> Result<NavigationOutcome, RouterError> {
        let path = self.history.current_path();
        self.dispatch(path, Entry::Current).await
    }

    pub async fn navigate(&mut self, path: &str) -> Result<NavigationOutcome, RouterError> {
        if self.is_current(path) {
            log::debug!("already at {}", path);
            return Ok(NavigationOutcome::Unchanged);
        }
        self.dispatch(path.to_string(), Entry::Push).await
    }

    pub async fn back(&mut self) -> Result<NavigationOutcome, RouterError> {
        match self.history.back() {
            Some(path) => self.dispatch(path, Entry::Current).await,
            None => Ok(NavigationOutcome::Unchanged),
        }
    }

    pub async fn forward(&mut self) -> Result<NavigationOutcome, RouterError> {
        match self.history.forward() {
            Some(path) => self.dispatch(path, Entry::Current).await,
            None => Ok(NavigationOutcome::Unchanged),
        }
    }

    pub async fn process(&mut self, request: NavRequest) -> Result<NavigationOutcome, RouterError> {
        match request {
            NavRequest::Push(path) => self.navigate(&path).await,
            NavRequest::Pop(path) => self.dispatch(path, Entry::Current).await,
            NavRequest::Back => self.back().await,
            NavRequest::Forward => self.forward().await,
        }
    }

    /// Handles every request already queued, without waiting for new ones.
    pub async fn drain(&mut self) -> Vec<Result<NavigationOutcome, RouterError>> {
        let mut results = Vec::new();
        loop {
            let Some(Some(request)) = self.requests.next().now_or_never() else {
                break;
            };
            results.push(self.process(request).await);
        }
        results
    }

    /// Driver loop: processes queued requests one full cycle at a time.
    pub async fn run(mut self) {
        while let Some(request) = self.requests.next().await {
            if let Err(err) = self.process(request).await {
                log::error!("navigation failed: {}", err);
            }
        }
    }

    fn is_current(&self, path: &str) -> bool {
        self.location.as_deref() == Some(path)
    }

    fn transition(&mut self, next: DispatchState) {
        log::trace!("router: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    async fn dispatch(&mut self, path: String, entry: Entry) -> Result<NavigationOutcome, RouterError> {
        if self.is_current(&path) {
            return Ok(NavigationOutcome::Unchanged);
        }

        let requested = path.clone();
        let mut path = path;
        let mut redirects = 0;
        loop {
            self.transition(DispatchState::Resolving);
            let Some(route) = self.table.resolve(&path).cloned() else {
                log::error!("no route for {}", path);
                self.settle_rejected(entry);
                return Err(RouterError::NoRoute(path));
            };

            self.transition(DispatchState::Guarding);
            let ctx = NavigationContext {
                target: path.clone(),
                to: route.clone(),
                from: self.current_route(),
            };
            match self.guards.run(&ctx, self.deadline.as_ref()).await {
                GuardOutcome::Proceed => {
                    match entry {
                        Entry::Push => self.history.push(&path),
                        Entry::Current if path != requested => self.history.replace(&path),
                        Entry::Current => {}
                    }
                    self.commit(path, route.clone());
                    for hook in &self.after_hooks {
                        hook(&route).await;
                    }
                    self.transition(DispatchState::Idle);
                    return Ok(NavigationOutcome::Committed(route));
                }
                GuardOutcome::Abort => {
                    self.settle_rejected(entry);
                    return Ok(NavigationOutcome::Blocked);
                }
                GuardOutcome::Redirect(to) => {
                    self.transition(DispatchState::Redirecting);
                    redirects += 1;
                    if redirects > self.max_redirects {
                        log::error!("redirect loop detected at {}", to);
                        self.settle_rejected(entry);
                        return Err(RouterError::RedirectLoop {
                            path: to,
                            limit: self.max_redirects,
                        });
                    }
                    if self.is_current(&to) {
                        self.settle_rejected(entry);
                        return Ok(NavigationOutcome::Unchanged);
                    }
                    path = to;
                }
            }
        }
    }

    /// Ends a cycle that committed nothing. A pushed navigation never touched
    /// the history; one the browser already performed is pointed back at the
    /// committed location.
    fn settle_rejected(&mut self, entry: Entry) {
        if entry == Entry::Current {
            if let Some(location) = self.location.as_deref() {
                if self.history.current_path() != location {
                    self.history.replace(location);
                }
            }
        }
        self.transition(DispatchState::Idle);
    }

    fn commit(&mut self, path: String, route: Route) {
        self.transition(DispatchState::Committed);
        log::info!("navigated to {} ({})", path, route.name);
        *self.current.write() = Some(route);
        self.location = Some(path);
    }
}
