//! Client-side router.
//!
//! A navigation request flows through:
//! ```text
//! RouterHandle ──► queue ──► Router::process
//!                              ├─ RouteTable::resolve
//!                              ├─ GuardChain::run   (may abort / redirect)
//!                              ├─ commit current route
//!                              └─ post-navigation hooks (page lifecycle)
//! ```
//! Only one cycle runs at a time; requests issued while a cycle is in flight
//! wait in the queue.

pub mod dispatcher;
pub mod error;
pub mod guards;
pub mod handle;
pub mod history;
pub mod table;

pub use dispatcher::{DispatchState, NavigationOutcome, Router};
pub use error::RouterError;
pub use guards::{GuardOutcome, NavigationContext, Next};
pub use handle::{NavRequest, RouterHandle};
pub use history::{BrowserHistory, History, MemoryHistory};
pub use table::{Route, RouteTable, WILDCARD};
