//! Theme management module for the application.
//!
//! The preference is persisted through the key/value store and applied as a
//! `dark-mode` class on the document element. Without a stored preference the
//! system colour scheme decides.

use std::sync::Arc;

use contracts::shared::theme::Theme;
use parking_lot::RwLock;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;

use crate::shared::config::ThemeSettings;
use crate::system::auth::storage::KeyValueStore;

const DARK_MODE_CLASS: &str = "dark-mode";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone)]
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    current: Arc<RwLock<Theme>>,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, settings: &ThemeSettings) -> Self {
        Self {
            storage,
            key: settings.storage_key.clone(),
            current: Arc::new(RwLock::new(Theme::default())),
        }
    }

    /// Loads the stored preference, falling back to the system scheme.
    pub fn restore(&self, prefers_dark: bool) -> Theme {
        let stored = self.storage.get(&self.key);
        let theme = match stored.as_deref().and_then(Theme::parse) {
            Some(theme) => theme,
            None => {
                if let Some(value) = stored {
                    log::warn!("ignoring unknown theme {:?}", value);
                }
                if prefers_dark {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
        };
        *self.current.write() = theme;
        theme
    }

    pub fn current(&self) -> Theme {
        *self.current.read()
    }

    pub fn has_stored_preference(&self) -> bool {
        self.storage.get(&self.key).is_some()
    }

    /// Sets the theme without persisting it (system scheme changes).
    pub fn follow(&self, theme: Theme) {
        *self.current.write() = theme;
    }

    pub fn set(&self, theme: Theme) {
        *self.current.write() = theme;
        self.storage.set(&self.key, theme.as_str());
    }

    /// Flips and persists the preference; returns the new theme.
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }
}

fn dark_scheme_query() -> Option<web_sys::MediaQueryList> {
    window()?.match_media(DARK_SCHEME_QUERY).ok()?
}

pub fn system_prefers_dark() -> bool {
    dark_scheme_query().is_some_and(|query| query.matches())
}

/// Apply theme by toggling the `dark-mode` class on `<html>`.
pub fn apply_to_document(theme: Theme) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    if let Err(err) = root
        .class_list()
        .toggle_with_force(DARK_MODE_CLASS, theme.is_dark())
    {
        log::warn!("failed to apply theme {}: {:?}", theme.as_str(), err);
    }
}

/// Follows system colour scheme changes until the user picks a theme.
/// The listener lives for the whole application lifetime.
pub fn watch_system_scheme(store: ThemeStore) {
    let Some(query) = dark_scheme_query() else {
        return;
    };
    let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        if store.has_stored_preference() {
            return;
        }
        let theme = if system_prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        };
        store.follow(theme);
        apply_to_document(theme);
    });
    if let Err(err) =
        query.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
    {
        log::warn!("failed to watch colour scheme: {:?}", err);
    }
    on_change.forget();
}
