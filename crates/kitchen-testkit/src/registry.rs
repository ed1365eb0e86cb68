//! Component registry
//!
//! Maps stable `(module, name)` identifiers to factories so tests can ask for
//! a component by name without reflection. The harness registers what it can
//! construct at startup; `safe_import` only hands out what was registered.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type Factory = Arc<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>;

/// Stable identifier of a registered component
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    pub module: String,
    pub name: String,
}

impl ComponentId {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// A registered component and the factory that builds it
#[derive(Clone)]
pub struct Component {
    id: ComponentId,
    factory: Factory,
}

impl Component {
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Build a fresh, type-erased instance
    pub fn instantiate(&self) -> Box<dyn Any + Send> {
        (self.factory)()
    }

    /// Build a fresh instance as `T`, or `None` if the factory produces
    /// something else
    pub fn create<T: Any>(&self) -> Option<T> {
        self.instantiate().downcast::<T>().ok().map(|boxed| *boxed)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component").field("id", &self.id).finish()
    }
}

/// Registry of component factories
#[derive(Default, Clone)]
pub struct ComponentRegistry {
    components: HashMap<ComponentId, Factory>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Register a factory under `module.name`.
    ///
    /// A later registration for the same identifier replaces the earlier one.
    pub fn register<T, F>(
        &mut self,
        module: impl Into<String>,
        name: impl Into<String>,
        factory: F,
    ) where
        T: Any + Send,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let id = ComponentId::new(module, name);
        let factory: Factory = Arc::new(move || Box::new(factory()) as Box<dyn Any + Send>);

        if self.components.insert(id.clone(), factory).is_some() {
            debug!(component = %id, "replaced registered component");
        }
    }

    /// Look up a component
    pub fn get(&self, module: &str, name: &str) -> Option<Component> {
        let id = ComponentId::new(module, name);
        self.components.get(&id).map(|factory| Component {
            id,
            factory: Arc::clone(factory),
        })
    }

    /// Check if a component is registered
    pub fn contains(&self, module: &str, name: &str) -> bool {
        self.components.contains_key(&ComponentId::new(module, name))
    }

    /// Identifiers registered under `module`, sorted by name
    pub fn components_in(&self, module: &str) -> Vec<&ComponentId> {
        let mut ids: Vec<_> = self
            .components
            .keys()
            .filter(|id| id.module == module)
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.components.keys().collect();
        ids.sort();
        f.debug_struct("ComponentRegistry")
            .field("components", &ids)
            .finish()
    }
}
