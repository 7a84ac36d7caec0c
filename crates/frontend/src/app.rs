use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::lifecycle::{LifecycleController, PageContext, SignalRegion};
use crate::pages;
use crate::routes::guards::GlooTimer;
use crate::routes::history::install_browser_listeners;
use crate::routes::{BrowserHistory, Router, WILDCARD};
use crate::shared::config::{load_config, AppConfig};
use crate::shared::theme::{apply_to_document, system_prefers_dark, watch_system_scheme};
use crate::system::app_context::AppContext;
use crate::system::auth::guard::auth_guard;
use crate::system::auth::storage::{KeyValueStore, LocalStore};

/// (path, module id, route name)
pub const ROUTES: [(&str, &str, &str); 8] = [
    ("/", "pages/login", "login-page"),
    ("/dashboard", "pages/dashboard", "dashboard-page"),
    ("/sales", "pages/sales", "sales-page"),
    ("/contracts", "pages/contracts", "contracts-page"),
    ("/backlog", "pages/backlog", "backlog-page"),
    ("/services", "pages/services", "services-page"),
    ("/settings", "pages/settings", "settings-page"),
    (WILDCARD, "pages/not-found", "not-found-page"),
];

fn build_router(config: &AppConfig) -> Router {
    let mut router = Router::new(BrowserHistory).with_max_redirects(config.router.max_redirects);
    if config.router.guard_timeout_ms > 0 {
        router = router.with_guard_timeout(
            GlooTimer,
            Duration::from_millis(config.router.guard_timeout_ms),
        );
    }
    for (path, module_id, name) in ROUTES {
        router.add_route(path, module_id, name);
    }
    router
}

#[component]
pub fn App() -> impl IntoView {
    let config = Arc::new(load_config().unwrap_or_else(|err| {
        log::error!("invalid configuration, using defaults: {:#}", err);
        AppConfig::default()
    }));
    let storage: Arc<dyn KeyValueStore> = Arc::new(LocalStore);

    let mut router = build_router(&config);
    let app = AppContext::new(config.clone(), storage, router.handle());

    app.auth.restore(Utc::now());
    let theme = app.theme.restore(system_prefers_dark());
    apply_to_document(theme);
    watch_system_scheme(app.theme.clone());

    router.before_each(auth_guard(
        app.auth.clone(),
        config.router.public_path.clone(),
    ));

    let region = SignalRegion::new();
    let controller = Rc::new(LifecycleController::new(
        pages::registry(),
        region,
        PageContext {
            app,
            router: router.handle(),
        },
    ));
    controller.attach(&mut router);

    install_browser_listeners(&router.handle());

    spawn_local(async move {
        if let Err(err) = router.start().await {
            log::error!("initial navigation failed: {}", err);
        }
        router.run().await;
    });

    view! {
        <div id="app" class="app">
            {move || region.render()}
        </div>
    }
}
