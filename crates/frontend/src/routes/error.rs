use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("no route matches {0:?} and no wildcard route is registered")]
    NoRoute(String),
    #[error("redirect limit of {limit} exceeded while navigating to {path:?}")]
    RedirectLoop { path: String, limit: usize },
}
