use std::collections::HashMap;

use super::page::{Page, PageContext, PageError};

pub type PageFactory<V> = Box<dyn Fn(PageContext) -> Result<Box<dyn Page<V>>, PageError>>;

/// Module id → page constructor. Filled once at startup.
pub struct PageRegistry<V> {
    factories: HashMap<String, PageFactory<V>>,
}

impl<V> Default for PageRegistry<V> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<V> PageRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, module_id: &str, factory: F)
    where
        F: Fn(PageContext) -> Result<Box<dyn Page<V>>, PageError> + 'static,
    {
        self.factories.insert(module_id.to_string(), Box::new(factory));
    }

    pub fn contains(&self, module_id: &str) -> bool {
        self.factories.contains_key(module_id)
    }

    pub fn construct(
        &self,
        module_id: &str,
        ctx: PageContext,
    ) -> Result<Box<dyn Page<V>>, PageError> {
        let factory = self
            .factories
            .get(module_id)
            .ok_or_else(|| PageError::ModuleNotFound(module_id.to_string()))?;
        factory(ctx)
    }
}
