//! Best-effort imports
//!
//! `safe_import` lets the test suite keep going when part of the application
//! is missing: failures come back as an [`ImportError`] value and a warning,
//! never a panic.

use crate::error::ImportError;
use crate::locator::{LocatedModule, ModuleLocator};
use crate::registry::{Component, ComponentRegistry};
use tracing::warn;

/// Result of `safe_import`; check before use
pub type ImportOutcome = Result<Imported, ImportError>;

/// Something `safe_import` found
#[derive(Debug, Clone)]
pub enum Imported {
    /// A module located on disk
    Module(LocatedModule),
    /// A registered component of a located module
    Component {
        module: LocatedModule,
        component: Component,
    },
}

impl Imported {
    /// The located module, for either variant
    pub fn module(&self) -> &LocatedModule {
        match self {
            Self::Module(module) => module,
            Self::Component { module, .. } => module,
        }
    }

    /// The component, if one was requested
    pub fn component(&self) -> Option<&Component> {
        match self {
            Self::Module(_) => None,
            Self::Component { component, .. } => Some(component),
        }
    }
}

/// Import `module_name`, or `module_name.class_name` when a class is given.
///
/// The locator's search path is set up first. The module must exist on the
/// search path. A requested component is looked up under `module_name` as
/// given, then under the module's leaf name (`sales` for `modules.sales`).
pub fn safe_import(
    locator: &mut ModuleLocator,
    registry: &ComponentRegistry,
    module_name: &str,
    class_name: Option<&str>,
) -> ImportOutcome {
    locator.setup_module_imports();

    let outcome = locator
        .locate(module_name)
        .and_then(|module| match class_name {
            None => Ok(Imported::Module(module)),
            Some(class_name) => lookup_component(registry, &module, class_name)
                .map(|component| Imported::Component { module, component })
                .ok_or_else(|| ImportError::component_not_found(module_name, class_name)),
        });

    if let Err(err) = &outcome {
        let target = match class_name {
            Some(class_name) => format!("{}.{}", module_name, class_name),
            None => module_name.to_string(),
        };
        warn!(import = %target, error = %err, "could not import {}", target);
    }

    outcome
}

fn lookup_component(
    registry: &ComponentRegistry,
    module: &LocatedModule,
    class_name: &str,
) -> Option<Component> {
    registry.get(&module.name, class_name).or_else(|| {
        let leaf = module.name.rsplit('.').next()?;
        if leaf == module.name {
            return None;
        }
        registry.get(leaf, class_name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_config::ProjectLayout;
    use std::fs;
    use tempfile::TempDir;

    struct PricingEngine;

    fn project_with_module(name: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let modules = temp_dir.path().join("modules");
        fs::create_dir_all(&modules).unwrap();
        fs::write(modules.join(format!("{}.py", name)), "").unwrap();
        temp_dir
    }

    #[test]
    fn test_import_sets_up_search_path() {
        let temp_dir = project_with_module("pricing");
        let mut locator = ModuleLocator::for_layout(&ProjectLayout::new(temp_dir.path()));
        assert!(locator.search_path().is_empty());

        let imported = safe_import(&mut locator, &ComponentRegistry::new(), "pricing", None);

        assert!(imported.is_ok());
        assert_eq!(locator.search_path().len(), 3);
    }

    #[test]
    fn test_import_component() {
        let temp_dir = project_with_module("pricing");
        let mut locator = ModuleLocator::for_layout(&ProjectLayout::new(temp_dir.path()));
        let mut registry = ComponentRegistry::new();
        registry.register("pricing", "PricingEngine", || PricingEngine);

        let imported =
            safe_import(&mut locator, &registry, "pricing", Some("PricingEngine")).unwrap();

        assert_eq!(imported.module().name, "pricing");
        let component = imported.component().unwrap();
        assert!(component.create::<PricingEngine>().is_some());
    }

    #[test]
    fn test_unregistered_component() {
        let temp_dir = project_with_module("pricing");
        let mut locator = ModuleLocator::for_layout(&ProjectLayout::new(temp_dir.path()));

        let err = safe_import(&mut locator, &ComponentRegistry::new(), "pricing", Some("Nope"))
            .unwrap_err();

        assert_eq!(err, ImportError::component_not_found("pricing", "Nope"));
    }

    #[test]
    fn test_component_found_under_leaf_name() {
        let temp_dir = project_with_module("sales");
        let mut locator = ModuleLocator::for_layout(&ProjectLayout::new(temp_dir.path()));
        let mut registry = ComponentRegistry::new();
        registry.register("sales", "PricingEngine", || PricingEngine);

        let imported =
            safe_import(&mut locator, &registry, "modules.sales", Some("PricingEngine")).unwrap();

        assert_eq!(imported.module().name, "modules.sales");
        assert_eq!(
            imported.component().unwrap().id().to_string(),
            "sales.PricingEngine"
        );
    }

    #[test]
    fn test_dotted_registration_wins_over_leaf() {
        let temp_dir = project_with_module("sales");
        let mut locator = ModuleLocator::for_layout(&ProjectLayout::new(temp_dir.path()));
        let mut registry = ComponentRegistry::new();
        registry.register("sales", "Ledger", || 1u8);
        registry.register("modules.sales", "Ledger", || 2u8);

        let imported =
            safe_import(&mut locator, &registry, "modules.sales", Some("Ledger")).unwrap();

        assert_eq!(imported.component().unwrap().create::<u8>(), Some(2));
    }

    #[test]
    fn test_component_of_missing_module() {
        let temp_dir = TempDir::new().unwrap();
        let mut locator = ModuleLocator::for_layout(&ProjectLayout::new(temp_dir.path()));
        let mut registry = ComponentRegistry::new();
        registry.register("pricing", "PricingEngine", || PricingEngine);

        let err =
            safe_import(&mut locator, &registry, "pricing", Some("PricingEngine")).unwrap_err();
        assert!(matches!(err, ImportError::ModuleNotFound { .. }));
    }
}
