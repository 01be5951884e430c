use crate::{error::ResourceError, value::Value};
use std::{
    fmt, fs,
    path::PathBuf,
    sync::Arc,
};

///
/// ResourceLoader
///
/// Capability handle used to locate a local resource byte stream holding
/// an aggregation package. The statement stores the handle untouched; the
/// execution layer reads and ships the package at send time.
///

pub trait ResourceLoader: Send + Sync {
    /// Read the resource bytes at `path`.
    fn load(&self, path: &str) -> Result<Vec<u8>, ResourceError>;
}

///
/// DirResourceLoader
/// Resolves resource paths against a base directory.
///

#[derive(Clone, Debug)]
pub struct DirResourceLoader {
    base: PathBuf,
}

impl DirResourceLoader {
    /// Create a loader rooted at `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl ResourceLoader for DirResourceLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
        let full = self.base.join(path);
        if !full.is_file() {
            return Err(ResourceError::NotFound {
                path: path.to_string(),
            });
        }

        fs::read(&full).map_err(|err| ResourceError::Read {
            path: path.to_string(),
            message: err.to_string(),
        })
    }
}

///
/// Aggregation
///
/// Server-side aggregation function reference for one request.
///
/// The two variants are the two construction modes: a package already
/// deployed on the server, or a package read from a local resource and
/// shipped with the request. One mode per variant keeps overlapping-field
/// states unrepresentable; replacing the whole value is the only way to
/// switch modes.
///

#[derive(Clone)]
pub enum Aggregation {
    /// Package pre-deployed on the server.
    PreDeployed {
        package: String,
        function: String,
        args: Vec<Value>,
    },

    /// Package read from a local resource and shipped with the request.
    FromResource {
        loader: Arc<dyn ResourceLoader>,
        path: String,
        package: String,
        function: String,
        args: Vec<Value>,
    },
}

impl Aggregation {
    /// Server package where the function resides.
    #[must_use]
    pub fn package(&self) -> &str {
        match self {
            Self::PreDeployed { package, .. } | Self::FromResource { package, .. } => package,
        }
    }

    /// Aggregation function name.
    #[must_use]
    pub fn function(&self) -> &str {
        match self {
            Self::PreDeployed { function, .. } | Self::FromResource { function, .. } => function,
        }
    }

    /// Arguments passed to the function, in call order.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        match self {
            Self::PreDeployed { args, .. } | Self::FromResource { args, .. } => args,
        }
    }

    /// Resource path, for the shipped-package mode only.
    #[must_use]
    pub fn resource_path(&self) -> Option<&str> {
        match self {
            Self::PreDeployed { .. } => None,
            Self::FromResource { path, .. } => Some(path),
        }
    }

    /// Resource loader, for the shipped-package mode only.
    #[must_use]
    pub fn resource_loader(&self) -> Option<&Arc<dyn ResourceLoader>> {
        match self {
            Self::PreDeployed { .. } => None,
            Self::FromResource { loader, .. } => Some(loader),
        }
    }
}

impl fmt::Debug for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreDeployed {
                package,
                function,
                args,
            } => f
                .debug_struct("PreDeployed")
                .field("package", package)
                .field("function", function)
                .field("args", args)
                .finish(),
            Self::FromResource {
                path,
                package,
                function,
                args,
                ..
            } => f
                .debug_struct("FromResource")
                .field("path", path)
                .field("package", package)
                .field("function", function)
                .field("args", args)
                .finish_non_exhaustive(),
        }
    }
}
