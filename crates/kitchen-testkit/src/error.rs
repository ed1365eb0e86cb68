/// Test kit error types
use kitchen_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

pub type TestkitResult<T> = Result<T, TestkitError>;

/// Failures that surface to the caller
#[derive(Debug, Error)]
pub enum TestkitError {
    #[error("I/O error at {path}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TestkitError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }
}

/// Why a module or component could not be imported.
///
/// Returned as a value by `safe_import`; never raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("Module not found: {module}")]
    ModuleNotFound {
        module: String,
        searched: Vec<PathBuf>,
    },

    #[error("Component '{component}' not found in module '{module}'")]
    ComponentNotFound { module: String, component: String },
}

impl ImportError {
    /// Create an invalid module name error
    pub fn invalid_name(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidModuleName {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a component not found error
    pub fn component_not_found(module: impl Into<String>, component: impl Into<String>) -> Self {
        Self::ComponentNotFound {
            module: module.into(),
            component: component.into(),
        }
    }

    /// Module name the failure refers to
    pub fn module(&self) -> &str {
        match self {
            Self::InvalidModuleName { name, .. } => name,
            Self::ModuleNotFound { module, .. } => module,
            Self::ComponentNotFound { module, .. } => module,
        }
    }
}
