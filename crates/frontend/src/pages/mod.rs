//! Concrete page variants and the registry that maps module ids to them.

pub mod contracts;
pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod sales;
pub mod settings;

use leptos::children::ViewFn;
use leptos::prelude::*;

use crate::layout::{active_page_id, page_layout, set_document_title, LayoutState};
use crate::lifecycle::{Bindings, Page, PageContext, PageError, PageRegistry};

fn boxed<P>(page: P) -> Result<Box<dyn Page<ViewFn>>, PageError>
where
    P: Page<ViewFn> + 'static,
{
    Ok(Box::new(page))
}

pub fn registry() -> PageRegistry<ViewFn> {
    let mut registry = PageRegistry::new();
    registry.register(login::MODULE_ID, |ctx| boxed(login::LoginPage::new(ctx)));
    registry.register(dashboard::MODULE_ID, |ctx| boxed(dashboard::DashboardPage::new(ctx)));
    registry.register(sales::MODULE_ID, |ctx| boxed(sales::SalesPage::new(ctx)));
    registry.register(contracts::MODULE_ID, |ctx| boxed(contracts::ContractsPage::new(ctx)));
    registry.register(settings::MODULE_ID, |ctx| boxed(settings::SettingsPage::new(ctx)));
    registry.register(not_found::MODULE_ID, |ctx| boxed(not_found::NotFoundPage::new(ctx)));
    registry
}

/// Layout plumbing shared by the authenticated pages: the chrome around
/// the page body and the document listeners it needs while mounted.
pub(crate) struct Frame {
    pub ctx: PageContext,
    pub layout: LayoutState,
    bindings: Bindings,
}

impl Frame {
    pub fn new(ctx: PageContext) -> Self {
        let dark = ctx.app.theme.current().is_dark();
        Self {
            ctx,
            layout: LayoutState::new(dark),
            bindings: Bindings::new(),
        }
    }

    pub fn wrap<F>(&self, body: F) -> ViewFn
    where
        F: Fn() -> AnyView + Send + Sync + 'static,
    {
        let app = self.ctx.app.clone();
        let layout = self.layout;
        let active = active_page_id(self.ctx.router.current_route().as_ref());
        ViewFn::from(move || page_layout(app.clone(), layout, active.clone(), body()))
    }

    pub fn mounted(&mut self, title: &str) {
        set_document_title(&self.ctx.app.page_title(title));
        self.layout.bind(&mut self.bindings);
    }

    pub fn unmount(&mut self) {
        self.bindings.release_all();
    }
}

pub(crate) fn label_of(options: &[(&'static str, &'static str)], value: &str) -> &'static str {
    options
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, label)| *label)
        .unwrap_or("")
}

pub(crate) fn select_options(options: &'static [(&'static str, &'static str)], selected: &str) -> impl IntoView {
    options
        .iter()
        .map(|(value, label)| {
            let is_selected = *value == selected;
            view! { <option value=*value selected=is_selected>{*label}</option> }
        })
        .collect_view()
}
