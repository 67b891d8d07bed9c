//! Graph model configuration

use serde::{Deserialize, Serialize};

/// Configuration for the graph model's side effects
///
/// The structural invariants are not configurable; only the conveniences layered on
/// top of them are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// When a spouse relationship is added, make each spouse a parent of the other
    /// spouse's existing children
    /// Default: true
    #[serde(default = "default_link_spouse_children")]
    pub link_spouse_children: bool,
}

fn default_link_spouse_children() -> bool {
    true
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            link_spouse_children: true,
        }
    }
}

impl GraphConfig {
    /// Configuration without any automatic relationships
    ///
    /// Every relationship in the graph is one the user added explicitly.
    pub fn manual_links() -> Self {
        Self {
            link_spouse_children: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert!(GraphConfig::default().link_spouse_children);
        assert!(!GraphConfig::manual_links().link_spouse_children);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: GraphConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GraphConfig::default());
    }
}
