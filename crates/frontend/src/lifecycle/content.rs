use leptos::children::ViewFn;
use leptos::prelude::*;

/// The application's content area as the lifecycle controller sees it.
pub trait ContentRegion<V> {
    /// Clears the region and shows the loading placeholder.
    fn show_loading(&self);
    fn hide_loading(&self);
    /// Replaces the content with an error placeholder.
    fn show_error(&self, message: &str);
    /// Clears the region and inserts a rendered page.
    fn replace(&self, view: V);
}

/// Loading placeholder held for the duration of a page load. Dropping it
/// hides the placeholder on every exit path.
pub struct LoadingIndicator<'a, V> {
    region: &'a dyn ContentRegion<V>,
}

impl<'a, V> LoadingIndicator<'a, V> {
    pub fn show(region: &'a dyn ContentRegion<V>) -> Self {
        region.show_loading();
        Self { region }
    }
}

impl<V> Drop for LoadingIndicator<'_, V> {
    fn drop(&mut self) {
        self.region.hide_loading();
    }
}

#[derive(Clone, Default)]
pub enum ContentBody {
    #[default]
    Empty,
    Error(String),
    Page(ViewFn),
}

#[derive(Clone, Default)]
pub struct ContentSlot {
    pub loading: bool,
    pub body: ContentBody,
}

/// Content region backed by a signal; the root view renders it reactively.
#[derive(Clone, Copy)]
pub struct SignalRegion {
    slot: RwSignal<ContentSlot>,
}

impl SignalRegion {
    pub fn new() -> Self {
        Self {
            slot: RwSignal::new(ContentSlot::default()),
        }
    }

    pub fn render(&self) -> AnyView {
        let slot = self.slot.get();
        if slot.loading {
            return view! {
                <div class="loading">
                    <div class="spinner"></div>
                    <p>"로딩 중..."</p>
                </div>
            }
            .into_any();
        }
        match slot.body {
            ContentBody::Empty => ().into_any(),
            ContentBody::Error(message) => view! {
                <div class="alert alert-danger">{message}</div>
            }
            .into_any(),
            ContentBody::Page(view) => view.run(),
        }
    }
}

impl Default for SignalRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRegion<ViewFn> for SignalRegion {
    fn show_loading(&self) {
        self.slot.set(ContentSlot {
            loading: true,
            body: ContentBody::Empty,
        });
    }

    fn hide_loading(&self) {
        self.slot.update(|slot| slot.loading = false);
    }

    fn show_error(&self, message: &str) {
        let message = message.to_string();
        self.slot.update(|slot| slot.body = ContentBody::Error(message));
    }

    fn replace(&self, view: ViewFn) {
        self.slot.update(|slot| slot.body = ContentBody::Page(view));
    }
}
