//! Navigation guards.
//!
//! A guard receives the navigation being attempted and a [`Next`]
//! continuation. It may resolve the continuation synchronously or hold on to
//! it and resolve it later (after a timer, a confirmation, ...). The chain
//! does not advance until the current guard has resolved.

use std::time::Duration;

use futures::channel::oneshot;
use futures::future::{self, Either, LocalBoxFuture};
use futures::FutureExt;

use super::table::Route;

/// One navigation attempt as seen by guards.
#[derive(Debug, Clone)]
pub struct NavigationContext {
    /// Path that was requested.
    pub target: String,
    /// Route the request resolved to (the wildcard route for unknown paths).
    pub to: Route,
    /// Committed route, `None` on the very first navigation.
    pub from: Option<Route>,
}

impl NavigationContext {
    pub fn to_path(&self) -> &str {
        &self.to.path
    }

    pub fn from_path(&self) -> Option<&str> {
        self.from.as_ref().map(|route| route.path.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Abort,
    Redirect(String),
}

/// Continuation handed to a guard. Consumed on use, so it resolves at most once.
/// Dropping it unresolved aborts the navigation.
#[derive(Debug)]
pub struct Next {
    tx: oneshot::Sender<GuardOutcome>,
}

impl Next {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<GuardOutcome>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    pub fn proceed(self) {
        self.resolve(GuardOutcome::Proceed);
    }

    pub fn abort(self) {
        self.resolve(GuardOutcome::Abort);
    }

    pub fn redirect(self, path: impl Into<String>) {
        self.resolve(GuardOutcome::Redirect(path.into()));
    }

    pub fn resolve(self, outcome: GuardOutcome) {
        if self.tx.send(outcome).is_err() {
            log::debug!("guard resolved after its navigation was abandoned");
        }
    }
}

pub type Guard = Box<dyn Fn(&NavigationContext, Next)>;

/// Source of sleep futures used to time out guards.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Browser timer backed by `setTimeout`.
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(duration).boxed_local()
    }
}

pub struct GuardDeadline {
    pub timer: Box<dyn Timer>,
    pub after: Duration,
}

#[derive(Default)]
pub struct GuardChain {
    guards: Vec<Guard>,
}

impl GuardChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<G>(&mut self, guard: G)
    where
        G: Fn(&NavigationContext, Next) + 'static,
    {
        self.guards.push(Box::new(guard));
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Runs guards in registration order. Stops at the first guard that
    /// aborts or redirects.
    pub async fn run(
        &self,
        ctx: &NavigationContext,
        deadline: Option<&GuardDeadline>,
    ) -> GuardOutcome {
        for (index, guard) in self.guards.iter().enumerate() {
            let (next, rx) = Next::channel();
            guard(ctx, next);

            let resolved = match deadline {
                Some(deadline) => {
                    match future::select(rx, deadline.timer.sleep(deadline.after)).await {
                        Either::Left((resolved, _)) => resolved,
                        Either::Right(_) => {
                            log::warn!(
                                "guard #{} timed out after {:?} on {}",
                                index,
                                deadline.after,
                                ctx.target
                            );
                            return GuardOutcome::Abort;
                        }
                    }
                }
                None => rx.await,
            };

            match resolved {
                Ok(GuardOutcome::Proceed) => continue,
                Ok(GuardOutcome::Abort) => {
                    log::debug!("guard #{} blocked navigation to {}", index, ctx.target);
                    return GuardOutcome::Abort;
                }
                Ok(GuardOutcome::Redirect(path)) => {
                    log::debug!("guard #{} redirected {} to {}", index, ctx.target, path);
                    return GuardOutcome::Redirect(path);
                }
                Err(oneshot::Canceled) => {
                    log::warn!(
                        "guard #{} dropped its continuation on {}; navigation aborted",
                        index,
                        ctx.target
                    );
                    return GuardOutcome::Abort;
                }
            }
        }
        GuardOutcome::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn route(path: &str) -> Route {
        Route {
            path: path.to_string(),
            module_id: path.trim_start_matches('/').to_string(),
            name: format!("{}-page", path.trim_start_matches('/')),
        }
    }

    fn ctx(path: &str) -> NavigationContext {
        NavigationContext {
            target: path.to_string(),
            to: route(path),
            from: None,
        }
    }

    struct ImmediateTimer;

    impl Timer for ImmediateTimer {
        fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
            future::ready(()).boxed_local()
        }
    }

    #[test]
    fn test_empty_chain_proceeds() {
        let chain = GuardChain::new();
        assert_eq!(block_on(chain.run(&ctx("/a"), None)), GuardOutcome::Proceed);
    }

    #[test]
    fn test_second_guard_waits_for_first_continuation() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let pending: Rc<RefCell<Option<Next>>> = Rc::new(RefCell::new(None));

        let mut chain = GuardChain::new();
        {
            let calls = calls.clone();
            let pending = pending.clone();
            chain.add(move |_, next| {
                calls.borrow_mut().push("g1");
                *pending.borrow_mut() = Some(next);
            });
        }
        {
            let calls = calls.clone();
            chain.add(move |_, next| {
                calls.borrow_mut().push("g2");
                next.proceed();
            });
        }

        let ctx = ctx("/a");
        let (outcome, ()) = block_on(async {
            futures::join!(chain.run(&ctx, None), async {
                assert_eq!(*calls.borrow(), vec!["g1"]);
                let next = pending.borrow_mut().take().unwrap();
                next.proceed();
            })
        });

        assert_eq!(outcome, GuardOutcome::Proceed);
        assert_eq!(*calls.borrow(), vec!["g1", "g2"]);
    }

    #[test]
    fn test_redirect_short_circuits() {
        let second_ran = Rc::new(RefCell::new(false));
        let mut chain = GuardChain::new();
        chain.add(|_, next| next.redirect("/other"));
        {
            let second_ran = second_ran.clone();
            chain.add(move |_, next| {
                *second_ran.borrow_mut() = true;
                next.proceed();
            });
        }

        let outcome = block_on(chain.run(&ctx("/a"), None));
        assert_eq!(outcome, GuardOutcome::Redirect("/other".to_string()));
        assert!(!*second_ran.borrow());
    }

    #[test]
    fn test_dropped_continuation_aborts() {
        let mut chain = GuardChain::new();
        chain.add(|_, next| drop(next));
        assert_eq!(block_on(chain.run(&ctx("/a"), None)), GuardOutcome::Abort);
    }

    #[test]
    fn test_stalled_guard_times_out() {
        let parked: Rc<RefCell<Vec<Next>>> = Rc::new(RefCell::new(Vec::new()));
        let mut chain = GuardChain::new();
        {
            let parked = parked.clone();
            chain.add(move |_, next| parked.borrow_mut().push(next));
        }
        let deadline = GuardDeadline {
            timer: Box::new(ImmediateTimer),
            after: Duration::from_millis(10),
        };

        let outcome = block_on(chain.run(&ctx("/a"), Some(&deadline)));
        assert_eq!(outcome, GuardOutcome::Abort);
        assert_eq!(parked.borrow().len(), 1);
    }

    #[test]
    fn test_context_paths() {
        let mut ctx = ctx("/dashboard");
        assert_eq!(ctx.to_path(), "/dashboard");
        assert_eq!(ctx.from_path(), None);
        ctx.from = Some(route("/"));
        assert_eq!(ctx.from_path(), Some("/"));
    }
}
