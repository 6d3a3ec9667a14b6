//! Identifiers for resources embedded in a module image.

use std::fmt;

/// A resource name or type: either a string or an integer id
/// (`MAKEINTRESOURCE` semantics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceId {
    Name(String),
    Id(u16),
}

impl ResourceId {
    /// Predefined `RT_RCDATA` type for raw binary resources.
    pub const RCDATA: ResourceId = ResourceId::Id(10);

    /// NUL-terminated wide name, or `None` for integer ids.
    pub fn to_wide(&self) -> Option<Vec<u16>> {
        match self {
            ResourceId::Name(name) => Some(crate::font::to_wide(name)),
            ResourceId::Id(_) => None,
        }
    }

    #[cfg(windows)]
    pub(crate) fn with_pcwstr<T>(&self, f: impl FnOnce(windows::core::PCWSTR) -> T) -> T {
        match self {
            ResourceId::Name(name) => {
                let wide = crate::font::to_wide(name);
                f(windows::core::PCWSTR(wide.as_ptr()))
            }
            ResourceId::Id(id) => f(windows::core::PCWSTR(*id as usize as *const u16)),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(name: &str) -> Self {
        ResourceId::Name(name.to_string())
    }
}

impl From<u16> for ResourceId {
    fn from(id: u16) -> Self {
        ResourceId::Id(id)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Name(name) => write!(f, "{}", name),
            ResourceId::Id(id) => write!(f, "#{}", id),
        }
    }
}
