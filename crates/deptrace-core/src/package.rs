use std::fmt;
use std::str::FromStr;

use deptrace_util::errors::DepTraceError;

/// Separator between the owning address and the package name.
pub const SEPARATOR: &str = "::";

/// An on-chain package identifier, `<address>::<name>`.
///
/// Equality is exact: `0x1::MoveStdlib` and `0x01::MoveStdlib` are different
/// packages as far as tracing is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId {
    pub address: String,
    pub name: String,
}

impl PackageId {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }

    /// Parse `"<address>::<name>"`.
    ///
    /// Both halves must be non-empty and the name must not contain another
    /// `::` (that would be a module path, not a package).
    pub fn parse(s: &str) -> Result<Self, DepTraceError> {
        let malformed = || DepTraceError::MalformedIdentifier { id: s.to_string() };
        let (address, name) = s.split_once(SEPARATOR).ok_or_else(malformed)?;
        if address.is_empty() || name.is_empty() || name.contains(SEPARATOR) {
            return Err(malformed());
        }
        Ok(Self::new(address, name))
    }

    /// Qualified name of a module published under this package's address.
    pub fn module_name(&self, module: &str) -> String {
        format!("{}{SEPARATOR}{module}", self.address)
    }
}

impl FromStr for PackageId {
    type Err = DepTraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.address, self.name)
    }
}
