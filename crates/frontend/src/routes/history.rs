//! History integration.
//!
//! `History` is the seam between the dispatcher and the browser session
//! history. The browser implementation talks to `window.history`; back and
//! forward there complete asynchronously through `popstate`, which
//! [`install_browser_listeners`] feeds back into the router queue.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, MouseEvent};

use super::handle::RouterHandle;

pub trait History {
    fn current_path(&self) -> String;
    fn push(&mut self, path: &str);
    fn replace(&mut self, path: &str);
    /// Moves back one entry. Returns the new path when the move completed
    /// synchronously and the caller must dispatch it itself.
    fn back(&mut self) -> Option<String>;
    fn forward(&mut self) -> Option<String>;
}

pub struct BrowserHistory;

fn browser_history() -> Option<web_sys::History> {
    web_sys::window()?.history().ok()
}

/// `location.pathname`, `/` when unavailable.
pub fn location_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

impl History for BrowserHistory {
    fn current_path(&self) -> String {
        location_path()
    }

    fn push(&mut self, path: &str) {
        if let Some(history) = browser_history() {
            if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
                log::warn!("pushState failed for {}: {:?}", path, err);
            }
        }
    }

    fn replace(&mut self, path: &str) {
        if let Some(history) = browser_history() {
            if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(path)) {
                log::warn!("replaceState failed for {}: {:?}", path, err);
            }
        }
    }

    fn back(&mut self) -> Option<String> {
        if let Some(history) = browser_history() {
            let _ = history.back();
        }
        None
    }

    fn forward(&mut self) -> Option<String> {
        if let Some(history) = browser_history() {
            let _ = history.forward();
        }
        None
    }
}

#[derive(Debug)]
struct MemoryEntries {
    entries: Vec<String>,
    index: usize,
}

/// In-memory session history. Clones share the same entries.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    inner: Rc<RefCell<MemoryEntries>>,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryEntries {
                entries: vec![initial.to_string()],
                index: 0,
            })),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.inner.borrow().entries.clone()
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        let inner = self.inner.borrow();
        inner.entries[inner.index].clone()
    }

    fn push(&mut self, path: &str) {
        let mut inner = self.inner.borrow_mut();
        let keep = inner.index + 1;
        inner.entries.truncate(keep);
        inner.entries.push(path.to_string());
        inner.index = keep;
    }

    fn replace(&mut self, path: &str) {
        let mut inner = self.inner.borrow_mut();
        let index = inner.index;
        inner.entries[index] = path.to_string();
    }

    fn back(&mut self) -> Option<String> {
        let mut inner = self.inner.borrow_mut();
        if inner.index == 0 {
            return None;
        }
        inner.index -= 1;
        Some(inner.entries[inner.index].clone())
    }

    fn forward(&mut self) -> Option<String> {
        let mut inner = self.inner.borrow_mut();
        if inner.index + 1 >= inner.entries.len() {
            return None;
        }
        inner.index += 1;
        Some(inner.entries[inner.index].clone())
    }
}

/// The parts of an anchor click that decide whether the router handles it.
#[derive(Debug, Clone, Default)]
pub struct LinkClick {
    pub href: String,
    pub origin: String,
    pub pathname: String,
    pub target: String,
    pub external: bool,
    pub download: bool,
    pub modified: bool,
    pub button: i16,
}

/// Returns the in-app path for clicks the router should take over, `None`
/// for clicks the browser should handle. Query and fragment are dropped.
pub fn intercept_path(click: &LinkClick) -> Option<String> {
    let same_origin = click.href == click.origin
        || click
            .href
            .strip_prefix(click.origin.as_str())
            .is_some_and(|rest| rest.starts_with(&['/', '?', '#'][..]));
    if click.href.is_empty()
        || !same_origin
        || click.external
        || click.download
        || click.target == "_blank"
        || click.modified
        || click.button != 0
    {
        return None;
    }

    let path = urlencoding::decode(&click.pathname)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| click.pathname.clone());
    if path.is_empty() {
        Some("/".to_string())
    } else {
        Some(path)
    }
}

fn closest_anchor(event: &MouseEvent) -> Option<HtmlAnchorElement> {
    let element = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    element.closest("a").ok()??.dyn_into::<HtmlAnchorElement>().ok()
}

/// Wires `popstate` and document-level anchor clicks to the router. The
/// listeners live for the whole application lifetime.
pub fn install_browser_listeners(handle: &RouterHandle) {
    let Some(window) = web_sys::window() else {
        log::warn!("no window; history integration disabled");
        return;
    };
    let origin = window.location().origin().unwrap_or_default();

    let popstate_handle = handle.clone();
    let on_popstate = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        popstate_handle.history_changed(location_path());
    });
    if let Err(err) =
        window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
    {
        log::warn!("failed to listen for popstate: {:?}", err);
    }
    on_popstate.forget();

    let Some(document) = window.document() else {
        return;
    };
    let click_handle = handle.clone();
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let Some(anchor) = closest_anchor(&event) else {
            return;
        };
        let click = LinkClick {
            href: anchor.href(),
            origin: origin.clone(),
            pathname: anchor.pathname(),
            target: anchor.target(),
            external: anchor.has_attribute("external"),
            download: anchor.has_attribute("download"),
            modified: event.ctrl_key() || event.meta_key() || event.shift_key() || event.alt_key(),
            button: event.button(),
        };
        if let Some(path) = intercept_path(&click) {
            event.prevent_default();
            click_handle.navigate(path);
        }
    });
    if let Err(err) =
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
    {
        log::warn!("failed to listen for link clicks: {:?}", err);
    }
    on_click.forget();
}
