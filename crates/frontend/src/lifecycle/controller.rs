use std::cell::RefCell;
use std::rc::Rc;

use leptos::reactive::owner::Owner;

use super::content::{ContentRegion, LoadingIndicator};
use super::page::{Page, PageContext, PageError};
use super::registry::PageRegistry;
use crate::routes::{Route, Router};

pub const PAGE_LOAD_ERROR: &str = "페이지를 로드하는 중 오류가 발생했습니다.";

/// A mounted page and the reactive owner of everything it created.
struct LivePage<V> {
    page: Box<dyn Page<V>>,
    owner: Owner,
}

/// Keeps at most one page alive and swaps it on every committed route.
pub struct LifecycleController<V> {
    registry: PageRegistry<V>,
    region: Box<dyn ContentRegion<V>>,
    context: PageContext,
    current: RefCell<Option<LivePage<V>>>,
}

impl<V: 'static> LifecycleController<V> {
    pub fn new(
        registry: PageRegistry<V>,
        region: impl ContentRegion<V> + 'static,
        context: PageContext,
    ) -> Self {
        Self {
            registry,
            region: Box::new(region),
            context,
            current: RefCell::new(None),
        }
    }

    /// Registers [`LifecycleController::mount`] as a post-navigation hook.
    pub fn attach(self: Rc<Self>, router: &mut Router) {
        router.after_each(move |route| {
            let controller = self.clone();
            let route = route.clone();
            async move { controller.mount(&route).await }
        });
    }

    pub fn has_page(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Unmounts the live page, then loads, renders and mounts the page for
    /// `route`. Failures end in the error placeholder and are not returned.
    ///
    /// Each page is constructed under its own [`Owner`]; the owner is
    /// disposed once the page has unmounted and its view left the region.
    pub async fn mount(&self, route: &Route) {
        let previous = self.current.borrow_mut().take();
        let stale_owner = previous.map(|LivePage { mut page, owner }| {
            page.unmount();
            drop(page);
            log::debug!("unmounted page before {}", route.name);
            owner
        });

        let _loading = LoadingIndicator::show(self.region.as_ref());
        if let Some(owner) = stale_owner {
            owner.cleanup();
        }

        let owner = Owner::new();
        match self.load(route, &owner).await {
            Ok(page) => {
                *self.current.borrow_mut() = Some(LivePage { page, owner });
                log::debug!("mounted {}", route.name);
            }
            Err(err) => {
                owner.cleanup();
                log::error!("failed to load {} ({}): {}", route.name, route.module_id, err);
                self.region.show_error(PAGE_LOAD_ERROR);
            }
        }
    }

    async fn load(&self, route: &Route, owner: &Owner) -> Result<Box<dyn Page<V>>, PageError> {
        let mut page =
            owner.with(|| self.registry.construct(&route.module_id, self.context.clone()))?;
        let view = page.render().await?;
        self.region.replace(view);
        page.mounted();
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::bindings::Bindings;
    use crate::routes::{MemoryHistory, WILDCARD};
    use crate::shared::config::AppConfig;
    use crate::system::auth::storage::MemoryStore;
    use crate::system::app_context::AppContext;
    use crate::system::auth::guard::auth_guard;
    use async_trait::async_trait;
    use chrono::Utc;
    use contracts::system::auth::UserInfo;
    use futures::executor::block_on;
    use leptos::prelude::*;
    use std::cell::Cell;
    use std::sync::Arc;

    type Events = Rc<RefCell<Vec<String>>>;

    #[derive(Clone, Default)]
    struct RecordingRegion {
        events: Events,
        loading: Rc<Cell<bool>>,
        content: Rc<RefCell<Option<String>>>,
    }

    impl ContentRegion<String> for RecordingRegion {
        fn show_loading(&self) {
            self.events.borrow_mut().push("loading".to_string());
            self.loading.set(true);
            *self.content.borrow_mut() = None;
        }

        fn hide_loading(&self) {
            self.events.borrow_mut().push("loaded".to_string());
            self.loading.set(false);
        }

        fn show_error(&self, message: &str) {
            *self.content.borrow_mut() = Some(format!("error: {}", message));
        }

        fn replace(&self, view: String) {
            self.events.borrow_mut().push(format!("insert {}", view));
            *self.content.borrow_mut() = Some(view);
        }
    }

    struct TestPage {
        name: &'static str,
        events: Events,
        fail_render: bool,
        bindings: Bindings,
        counter: RwSignal<u32>,
    }

    #[async_trait(?Send)]
    impl Page<String> for TestPage {
        async fn render(&mut self) -> Result<String, PageError> {
            if self.fail_render {
                return Err(PageError::Render(format!("{} exploded", self.name)));
            }
            Ok(format!("<{}>", self.name))
        }

        fn mounted(&mut self) {
            self.counter.update(|n| *n += 1);
            self.events.borrow_mut().push(format!("mounted {}", self.name));
            let events = self.events.clone();
            let name = self.name;
            self.bindings
                .track(move || events.borrow_mut().push(format!("released {}", name)));
        }

        fn unmount(&mut self) {
            self.events.borrow_mut().push(format!("unmount {}", self.name));
        }
    }

    type Signals = Rc<RefCell<Vec<(&'static str, RwSignal<u32>)>>>;

    fn register(
        registry: &mut PageRegistry<String>,
        module_id: &str,
        name: &'static str,
        events: &Events,
        signals: &Signals,
    ) {
        let events = events.clone();
        let signals = signals.clone();
        registry.register(module_id, move |_ctx| {
            events.borrow_mut().push(format!("construct {}", name));
            let counter = RwSignal::new(0);
            signals.borrow_mut().push((name, counter));
            Ok(Box::new(TestPage {
                name,
                events: events.clone(),
                fail_render: name == "broken",
                bindings: Bindings::new(),
                counter,
            }))
        });
    }

    fn signal_of(signals: &Signals, name: &str) -> RwSignal<u32> {
        signals
            .borrow()
            .iter()
            .rev()
            .find(|(page, _)| *page == name)
            .map(|(_, signal)| *signal)
            .unwrap()
    }

    struct Fixture {
        router: Router,
        app: AppContext,
        region: RecordingRegion,
        controller: Rc<LifecycleController<String>>,
        events: Events,
        signals: Signals,
    }

    fn fixture() -> Fixture {
        let mut router = Router::new(MemoryHistory::new("/"));
        router.add_route("/", "login", "login-page");
        router.add_route("/dashboard", "dashboard", "dashboard-page");
        router.add_route("/broken", "broken", "broken-page");
        router.add_route("/ghost", "ghost", "ghost-page");
        router.add_route("/faulty", "faulty", "faulty-page");
        router.add_route(WILDCARD, "not_found", "not-found-page");

        let app = AppContext::new(
            Arc::new(AppConfig::default()),
            Arc::new(MemoryStore::default()),
            router.handle(),
        );
        router.before_each(auth_guard(app.auth.clone(), "/".to_string()));

        let region = RecordingRegion::default();
        let events = region.events.clone();
        let signals = Signals::default();
        let mut registry = PageRegistry::new();
        register(&mut registry, "login", "login", &events, &signals);
        register(&mut registry, "dashboard", "dashboard", &events, &signals);
        register(&mut registry, "broken", "broken", &events, &signals);
        register(&mut registry, "not_found", "not-found", &events, &signals);
        registry.register("faulty", |_ctx| {
            Err(PageError::Construct("missing dependency".to_string()))
        });

        let controller = Rc::new(LifecycleController::new(
            registry,
            region.clone(),
            PageContext {
                app: app.clone(),
                router: router.handle(),
            },
        ));
        controller.clone().attach(&mut router);

        Fixture {
            router,
            app,
            region,
            controller,
            events,
            signals,
        }
    }

    fn sign_in(app: &AppContext) {
        let user = UserInfo {
            email: "admin@kevinlab.co.kr".to_string(),
            name: "관리자".to_string(),
            role: "admin".to_string(),
        };
        app.auth.sign_in(user, "mock-token".to_string(), Utc::now());
    }

    fn count(events: &Events, entry: &str) -> usize {
        events.borrow().iter().filter(|e| e.as_str() == entry).count()
    }

    fn position(events: &Events, entry: &str) -> usize {
        events.borrow().iter().position(|e| e == entry).unwrap()
    }

    #[test]
    fn test_mount_order() {
        let mut fx = fixture();
        block_on(fx.router.start()).unwrap();

        assert_eq!(
            *fx.events.borrow(),
            vec!["loading", "construct login", "insert <login>", "mounted login", "loaded"]
        );
        assert!(!fx.region.loading.get());
        assert_eq!(fx.region.content.borrow().as_deref(), Some("<login>"));
        assert!(fx.controller.has_page());
    }

    #[test]
    fn test_unauthenticated_dashboard_mounts_login() {
        let mut fx = fixture();
        block_on(fx.router.navigate("/dashboard")).unwrap();

        assert_eq!(fx.router.current_route().unwrap().path, "/");
        assert_eq!(fx.region.content.borrow().as_deref(), Some("<login>"));
        assert_eq!(count(&fx.events, "construct dashboard"), 0);
    }

    #[test]
    fn test_authenticated_dashboard_replaces_login() {
        let mut fx = fixture();
        block_on(fx.router.start()).unwrap();
        sign_in(&fx.app);

        block_on(fx.router.navigate("/dashboard")).unwrap();

        assert_eq!(fx.router.current_route().unwrap().path, "/dashboard");
        assert_eq!(count(&fx.events, "mounted dashboard"), 1);
        assert_eq!(count(&fx.events, "unmount login"), 1);
        assert!(position(&fx.events, "unmount login") < position(&fx.events, "construct dashboard"));
        assert!(position(&fx.events, "released login") < position(&fx.events, "construct dashboard"));
        assert_eq!(fx.region.content.borrow().as_deref(), Some("<dashboard>"));
    }

    #[test]
    fn test_render_failure_shows_error_and_clears_loading() {
        let mut fx = fixture();
        sign_in(&fx.app);
        block_on(fx.router.navigate("/dashboard")).unwrap();
        block_on(fx.router.navigate("/broken")).unwrap();

        let expected = format!("error: {}", PAGE_LOAD_ERROR);
        assert_eq!(fx.region.content.borrow().as_deref(), Some(expected.as_str()));
        assert!(!fx.region.loading.get());
        assert_eq!(count(&fx.events, "mounted broken"), 0);
        assert_eq!(count(&fx.events, "unmount dashboard"), 1);
        assert!(!fx.controller.has_page());
        assert_eq!(fx.router.current_route().unwrap().path, "/broken");

        // The app stays usable after a failed page.
        block_on(fx.router.navigate("/dashboard")).unwrap();
        assert_eq!(fx.region.content.borrow().as_deref(), Some("<dashboard>"));
    }

    #[test]
    fn test_missing_module_and_failing_constructor() {
        let mut fx = fixture();
        sign_in(&fx.app);
        let expected = format!("error: {}", PAGE_LOAD_ERROR);

        block_on(fx.router.navigate("/ghost")).unwrap();
        assert_eq!(fx.region.content.borrow().as_deref(), Some(expected.as_str()));
        assert!(!fx.region.loading.get());

        block_on(fx.router.navigate("/faulty")).unwrap();
        assert_eq!(fx.region.content.borrow().as_deref(), Some(expected.as_str()));
        assert!(!fx.region.loading.get());
        assert!(!fx.controller.has_page());
    }

    #[test]
    fn test_unknown_path_mounts_wildcard_page() {
        let mut fx = fixture();
        sign_in(&fx.app);
        block_on(fx.router.navigate("/unknown-path")).unwrap();

        assert_eq!(fx.router.current_route().unwrap().path, WILDCARD);
        assert_eq!(fx.region.content.borrow().as_deref(), Some("<not-found>"));
    }

    #[test]
    fn test_logout_from_page_returns_to_login() {
        let mut fx = fixture();
        sign_in(&fx.app);
        block_on(fx.router.navigate("/dashboard")).unwrap();

        fx.app.logout();
        block_on(fx.router.drain());

        assert_eq!(fx.router.current_route().unwrap().path, "/");
        assert_eq!(count(&fx.events, "unmount dashboard"), 1);
        assert_eq!(fx.region.content.borrow().as_deref(), Some("<login>"));
    }

    #[test]
    fn test_page_signals_are_disposed_with_the_page() {
        let mut fx = fixture();
        block_on(fx.router.start()).unwrap();
        let login = signal_of(&fx.signals, "login");
        assert_eq!(login.get_untracked(), 1);

        sign_in(&fx.app);
        block_on(fx.router.navigate("/dashboard")).unwrap();
        assert!(login.is_disposed());
        let dashboard = signal_of(&fx.signals, "dashboard");
        assert!(!dashboard.is_disposed());

        block_on(fx.router.navigate("/broken")).unwrap();
        assert!(dashboard.is_disposed());
        assert!(signal_of(&fx.signals, "broken").is_disposed());
    }
}
