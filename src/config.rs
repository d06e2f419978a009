//! Router configuration

use crate::context::{Environment, DEFAULT_LINK_ATTRIBUTE};

/// Settings fixed at router construction
///
/// ```
/// use purnav::RouterConfig;
///
/// let config = RouterConfig::new("Acme")
///     .app_description("Things, delivered")
///     .mount_target("#root")
///     .active_class("is-active");
///
/// assert_eq!(config.app_title, "Acme");
/// assert_eq!(config.link_attribute, "data-link");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Document title when the route has none
    pub app_title: String,
    /// Document description when the route has none
    pub app_description: String,
    /// Renderer target receiving route views
    pub mount_target: String,
    /// Attribute that marks intercepted links
    pub link_attribute: String,
    /// Attribute naming a route action to dispatch on activation
    pub action_attribute: String,
    /// Class added to links pointing at the current path
    pub active_class: String,
    pub environment: Environment,
    /// Entries kept by the resolution cache
    pub cache_capacity: usize,
}

impl RouterConfig {
    pub const DEFAULT_CACHE_CAPACITY: usize = 256;

    pub fn new(app_title: impl Into<String>) -> Self {
        Self {
            app_title: app_title.into(),
            ..Self::default()
        }
    }

    pub fn app_description(mut self, description: impl Into<String>) -> Self {
        self.app_description = description.into();
        self
    }

    pub fn mount_target(mut self, target: impl Into<String>) -> Self {
        self.mount_target = target.into();
        self
    }

    pub fn link_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.link_attribute = attribute.into();
        self
    }

    pub fn action_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.action_attribute = attribute.into();
        self
    }

    pub fn active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Zero disables caching
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            app_title: String::new(),
            app_description: String::new(),
            mount_target: "#app".to_string(),
            link_attribute: DEFAULT_LINK_ATTRIBUTE.to_string(),
            action_attribute: "data-action".to_string(),
            active_class: "active".to_string(),
            environment: Environment::default(),
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();

        assert_eq!(config.mount_target, "#app");
        assert_eq!(config.link_attribute, "data-link");
        assert_eq!(config.action_attribute, "data-action");
        assert_eq!(config.active_class, "active");
        assert_eq!(config.cache_capacity, RouterConfig::DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn test_builder_overrides() {
        let config = RouterConfig::new("App")
            .link_attribute("data-nav")
            .action_attribute("data-do")
            .cache_capacity(0)
            .environment(Environment::new("test", 320, 640));

        assert_eq!(config.link_attribute, "data-nav");
        assert_eq!(config.action_attribute, "data-do");
        assert_eq!(config.cache_capacity, 0);
        assert!(config.environment.is_mobile());
    }
}
