//! Page lifecycle: the post-navigation hook that tears down the previous
//! page and mounts the page of the newly committed route.

pub mod bindings;
pub mod content;
pub mod controller;
pub mod page;
pub mod registry;

pub use bindings::Bindings;
pub use content::{ContentRegion, SignalRegion};
pub use controller::LifecycleController;
pub use page::{Page, PageContext, PageError};
pub use registry::PageRegistry;
