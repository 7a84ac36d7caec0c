use async_trait::async_trait;
use thiserror::Error;

use crate::routes::RouterHandle;
use crate::system::app_context::AppContext;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("no page module registered as {0:?}")]
    ModuleNotFound(String),
    #[error("page construction failed: {0}")]
    Construct(String),
    #[error("page render failed: {0}")]
    Render(String),
}

/// Everything a page receives at construction.
#[derive(Clone)]
pub struct PageContext {
    pub app: AppContext,
    pub router: RouterHandle,
}

/// Capabilities of a page variant. `V` is the renderable output type.
///
/// `render` is required; `mounted` runs once the output is in the content
/// region; `unmount` runs before the next page is constructed. Resources
/// held in a [`Bindings`](super::Bindings) field are released when the
/// page is dropped even if `unmount` is not overridden.
#[async_trait(?Send)]
pub trait Page<V> {
    async fn render(&mut self) -> Result<V, PageError>;

    fn mounted(&mut self) {}

    fn unmount(&mut self) {}
}
