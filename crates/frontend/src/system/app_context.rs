use std::sync::Arc;

use chrono::{Local, Utc};
use contracts::shared::theme::Theme;
use contracts::system::auth::UserInfo;

use super::auth::session::AuthSession;
use super::auth::storage::KeyValueStore;
use crate::routes::RouterHandle;
use crate::shared::config::AppConfig;
use crate::shared::date_utils::current_week;
use crate::shared::theme::{apply_to_document, ThemeStore};

/// App-level state handed to every page: auth, theme, configuration and
/// the navigation handle. Cheap to clone.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub auth: AuthSession,
    pub theme: ThemeStore,
    storage: Arc<dyn KeyValueStore>,
    router: RouterHandle,
}

impl AppContext {
    pub fn new(config: Arc<AppConfig>, storage: Arc<dyn KeyValueStore>, router: RouterHandle) -> Self {
        Self {
            auth: AuthSession::new(storage.clone(), &config.auth),
            theme: ThemeStore::new(storage.clone(), &config.theme),
            config,
            storage,
            router,
        }
    }

    /// Signs in and moves to the home page.
    pub fn login(&self, user: UserInfo, token: String) {
        log::info!("signed in as {}", user.email);
        self.auth.sign_in(user, token, Utc::now());
        self.router.navigate(self.config.router.home_path.clone());
    }

    /// Signs out and moves to the public page.
    pub fn logout(&self) {
        self.auth.sign_out();
        self.router.navigate(self.config.router.public_path.clone());
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.auth.user()
    }

    pub fn toggle_theme(&self) -> Theme {
        let theme = self.theme.toggle();
        apply_to_document(theme);
        theme
    }

    pub fn page_title(&self, title: &str) -> String {
        format!("{} | {}", title, self.config.app.title_suffix)
    }

    pub fn current_week(&self) -> String {
        current_week(Local::now().date_naive())
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.storage
    }
}
