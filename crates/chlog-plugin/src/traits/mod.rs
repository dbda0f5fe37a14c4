//! Plugin traits.

pub mod filter;
pub mod formatter;
pub mod matcher;
pub mod parser;
pub mod source;

/// Base trait for named pipeline components.
pub trait Plugin: Send + Sync {
    /// Returns the plugin name.
    fn name(&self) -> &'static str;

    /// Returns the plugin version.
    fn version(&self) -> &'static str;

    /// Returns a short description of the plugin.
    fn description(&self) -> &'static str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MinimalPlugin;

    impl Plugin for MinimalPlugin {
        fn name(&self) -> &'static str {
            "minimal"
        }
        fn version(&self) -> &'static str {
            "1.0.0"
        }
    }

    struct CustomPlugin;

    impl Plugin for CustomPlugin {
        fn name(&self) -> &'static str {
            "custom"
        }
        fn version(&self) -> &'static str {
            "2.0.0"
        }
        fn description(&self) -> &'static str {
            "Custom description"
        }
    }

    #[test]
    fn test_default_description() {
        assert_eq!(MinimalPlugin.description(), "");
    }

    #[test]
    fn test_custom_description() {
        assert_eq!(CustomPlugin.description(), "Custom description");
        assert_eq!(CustomPlugin.name(), "custom");
        assert_eq!(CustomPlugin.version(), "2.0.0");
    }
}
