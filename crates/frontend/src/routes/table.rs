use std::collections::HashMap;

/// Key of the fallback route used when no exact path matches.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub module_id: String,
    pub name: String,
}

/// Static path → route mapping. Paths are compared for exact equality.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<String, Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a route. A second registration under the same path replaces the first.
    pub fn register(&mut self, path: &str, module_id: &str, name: &str) {
        let route = Route {
            path: path.to_string(),
            module_id: module_id.to_string(),
            name: name.to_string(),
        };
        if let Some(previous) = self.routes.insert(path.to_string(), route) {
            log::debug!("route {} re-registered (was {})", path, previous.name);
        }
    }

    /// Exact match first, then the wildcard entry.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes
            .get(path)
            .or_else(|| self.routes.get(WILDCARD))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
