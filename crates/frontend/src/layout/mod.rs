//! Chrome around authenticated pages.
//!
//! ```text
//! +-----------+------------------------------+
//! |           |  Header (menu, theme, user)  |
//! |  Sidebar  +------------------------------+
//! |           |  Content                     |
//! +-----------+------------------------------+
//! ```
//!
//! Sidebar entries are plain anchors; the router's document-level click
//! listener turns them into in-app navigations.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::lifecycle::Bindings;
use crate::routes::Route;
use crate::system::app_context::AppContext;

pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub url: &'static str,
}

pub const MENU: [MenuItem; 6] = [
    MenuItem { id: "dashboard", label: "대시보드", icon: "fa-chart-pie", url: "/dashboard" },
    MenuItem { id: "sales", label: "영업현황", icon: "fa-handshake", url: "/sales" },
    MenuItem { id: "contracts", label: "계약 관리", icon: "fa-file-signature", url: "/contracts" },
    MenuItem { id: "backlog", label: "수주잔", icon: "fa-coins", url: "/backlog" },
    MenuItem { id: "services", label: "서비스 현황", icon: "fa-server", url: "/services" },
    MenuItem { id: "settings", label: "설정", icon: "fa-cog", url: "/settings" },
];

pub const APP_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Menu id of a route: its name without the `-page` suffix.
pub fn active_page_id(route: Option<&Route>) -> String {
    route
        .map(|route| {
            route
                .name
                .strip_suffix("-page")
                .unwrap_or(&route.name)
                .to_string()
        })
        .unwrap_or_default()
}

/// Sets `document.title`.
pub fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

/// Per-page layout state.
#[derive(Clone, Copy)]
pub struct LayoutState {
    pub sidebar_open: RwSignal<bool>,
    pub dark: RwSignal<bool>,
}

impl LayoutState {
    pub fn new(dark: bool) -> Self {
        Self {
            sidebar_open: RwSignal::new(false),
            dark: RwSignal::new(dark),
        }
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_open.update(|open| *open = !*open);
    }

    /// Closes the mobile sidebar on Escape or on a click outside the
    /// sidebar and its toggle.
    pub fn bind(&self, bindings: &mut Bindings) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let sidebar_open = self.sidebar_open;

        bindings.listen(&document, "keydown", move |event| {
            let is_escape = event
                .dyn_ref::<web_sys::KeyboardEvent>()
                .is_some_and(|event| event.key() == "Escape");
            if is_escape && sidebar_open.get_untracked() {
                sidebar_open.set(false);
            }
        });

        bindings.listen(&document, "click", move |event| {
            if !sidebar_open.get_untracked() {
                return;
            }
            let inside = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                .and_then(|element| element.closest(".sidebar, .menu-toggle").ok().flatten())
                .is_some();
            if !inside {
                sidebar_open.set(false);
            }
        });
    }
}

fn sidebar(active: String) -> impl IntoView {
    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <div class="logo">
                    <img src="/public/logo.svg" alt="케빈랩 로고" class="logo-image" />
                </div>
            </div>
            <nav class="sidebar-nav">
                <ul class="nav-list">
                    {MENU
                        .iter()
                        .map(|item| {
                            let is_active = item.id == active;
                            view! {
                                <li class="nav-item" class:active=is_active>
                                    <a href=item.url class="nav-link">
                                        <i class=format!("fas {}", item.icon)></i>
                                        <span class="nav-label">{item.label}</span>
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
            <div class="sidebar-footer">
                <div class="version">{APP_VERSION}</div>
            </div>
        </aside>
    }
}

fn header(app: AppContext, state: LayoutState) -> impl IntoView {
    let dark = state.dark;
    let (name, email) = app
        .user()
        .map(|user| (user.name, user.email))
        .unwrap_or_else(|| ("사용자".to_string(), String::new()));

    let theme_app = app.clone();
    let toggle_theme = move |_| {
        let theme = theme_app.toggle_theme();
        dark.set(theme.is_dark());
    };
    let logout = move |_| app.logout();

    view! {
        <header class="header">
            <div class="header-left">
                <button class="menu-toggle" on:click=move |_| state.toggle_sidebar()>
                    <i class="fas fa-bars"></i>
                </button>
            </div>
            <div class="header-right">
                <div class="theme-toggle">
                    <button class="theme-toggle-button" on:click=toggle_theme>
                        <i class=move || if dark.get() { "fas fa-sun" } else { "fas fa-moon" }></i>
                    </button>
                </div>
                <div class="user-menu">
                    <div class="user-avatar">
                        <i class="fas fa-user"></i>
                    </div>
                    <div class="user-details">
                        <div class="user-name">{name}</div>
                        <div class="user-email">{email}</div>
                    </div>
                    <a href="/settings" class="user-menu-item">
                        <i class="fas fa-cog"></i>
                        <span>"설정"</span>
                    </a>
                    <button class="user-menu-item logout-button" on:click=logout>
                        <i class="fas fa-sign-out-alt"></i>
                        <span>"로그아웃"</span>
                    </button>
                </div>
            </div>
        </header>
    }
}

/// Wraps page content in the sidebar and header.
pub fn page_layout(app: AppContext, state: LayoutState, active: String, content: AnyView) -> AnyView {
    view! {
        <div class="layout" class:sidebar-open=move || state.sidebar_open.get()>
            {sidebar(active)}
            <div class="main">
                {header(app, state)}
                <div class="content">{content}</div>
            </div>
        </div>
    }
    .into_any()
}
