use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all deptrace operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DepTraceError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A package identifier did not parse into `<address>::<name>`.
    #[error("Malformed package identifier `{id}`")]
    #[diagnostic(help("Expected <address>::<PackageName>, e.g. 0x1::AptosFramework"))]
    MalformedIdentifier { id: String },

    /// The metadata provider could not produce metadata for a package.
    #[error("Failed to look up `{id}`: {message}")]
    Lookup { id: String, message: String },

    /// The address has a package registry, but not the requested package.
    #[error(
        "Package `{id}` not found in the registry for this address. Found: {}",
        .available.join(", ")
    )]
    #[diagnostic(help("Check the package name; names are case-sensitive"))]
    NotFoundInRegistry { id: String, available: Vec<String> },

    /// Network request failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Invalid or unreadable configuration.
    #[error("Config error: {message}")]
    #[diagnostic(help("Check ~/.deptrace/config.toml for syntax errors"))]
    Config { message: String },

    /// The local metadata cache could not be read or written.
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl DepTraceError {
    /// The package identifier this error is about, if any.
    pub fn package_id(&self) -> Option<&str> {
        match self {
            Self::MalformedIdentifier { id }
            | Self::Lookup { id, .. }
            | Self::NotFoundInRegistry { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Attach `id` to an error that does not already name a package.
    ///
    /// Errors that carry an identifier are returned unchanged; everything
    /// else becomes a [`DepTraceError::Lookup`] for `id`.
    pub fn for_package(self, id: &str) -> Self {
        if self.package_id().is_some() {
            return self;
        }
        Self::Lookup {
            id: id.to_string(),
            message: self.to_string(),
        }
    }
}
