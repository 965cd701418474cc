//! Sort order for search results.

use std::fmt;

use crate::error::{AzimuthError, Result};

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending order (lowest to highest).
    #[default]
    Asc,
    /// Descending order (highest to lowest).
    Desc,
}

impl SortOrder {
    /// Canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Resolve an order name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(AzimuthError::unsupported_value(format!(
                "unknown sort order [{name}]"
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_parsing() {
        assert_eq!(SortOrder::from_name("asc").unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::from_name("DESC").unwrap(), SortOrder::Desc);
        assert!(SortOrder::from_name("sideways").is_err());
    }

    #[test]
    fn test_default_is_ascending() {
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }
}
