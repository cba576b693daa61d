use crate::xml::Element;
use serde::{Deserialize, Serialize};

/// Predefined access rights.
///
/// Spellings outside the SVD set are kept verbatim in [`Access::Other`].
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Access {
    /// Read operations have an undefined result. Write access is permitted.
    WriteOnly,
    /// Read access is permitted. Write operations have an undefined result.
    ReadOnly,
    /// Read and write accesses are permitted. Writes affect the state of the
    /// register and reads return the register value.
    ReadWrite,
    /// Read operations have an undefined result. Only the first write after
    /// reset has an effect.
    WriteOnce,
    /// Read access is always permitted. Only the first write access after a
    /// reset will have an effect on the content. Other write operations have an
    /// undefined result.
    ReadWriteOnce,
    /// Any other spelling, as written in the source.
    Other(String),
}

impl Access {
    /// Returns the spelling used in the source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::WriteOnly => "write-only",
            Self::ReadOnly => "read-only",
            Self::ReadWrite => "read-write",
            Self::WriteOnce => "writeOnce",
            Self::ReadWriteOnce => "read-writeOnce",
            Self::Other(access) => access,
        }
    }
}

impl From<&str> for Access {
    fn from(s: &str) -> Self {
        match s {
            "write-only" => Self::WriteOnly,
            "read-only" => Self::ReadOnly,
            "read-write" => Self::ReadWrite,
            "writeOnce" => Self::WriteOnce,
            "read-writeOnce" => Self::ReadWriteOnce,
            _ => Self::Other(s.to_owned()),
        }
    }
}

impl From<String> for Access {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            access => access,
        }
    }
}

impl From<Access> for String {
    fn from(access: Access) -> Self {
        match access {
            Access::Other(access) => access,
            access => access.as_str().to_owned(),
        }
    }
}

pub(super) fn access(element: &Element) -> Option<Access> {
    element.child_text("access").map(Access::from)
}
