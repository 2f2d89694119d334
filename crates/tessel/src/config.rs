//! Configuration types for the Tessel model manager.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining decorator and validation settings.
//! - [`DecoratorConfig`] - Which factories are registered and whether unresolved
//!   decorators are reported.
//! - [`ValidationConfig`] - Which optional checks the validation pass runs.
//!
//! # Example
//!
//! ```
//! # use tessel::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.decorators().builtin());
//! assert!(!config.decorators().warn_unresolved());
//! assert!(config.validation().type_references());
//! ```

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Decorator configuration section.
    #[serde(default)]
    decorators: DecoratorConfig,

    /// Validation configuration section.
    #[serde(default)]
    validation: ValidationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(decorators: DecoratorConfig, validation: ValidationConfig) -> Self {
        Self {
            decorators,
            validation,
        }
    }

    /// Returns the decorator configuration.
    pub fn decorators(&self) -> &DecoratorConfig {
        &self.decorators
    }

    /// Returns the validation configuration.
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }
}

/// Decorator resolution settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DecoratorConfig {
    /// Register the built-in `@Term` / `@Deprecated` factory first.
    #[serde(default = "default_true")]
    builtin: bool,

    /// Report a warning for every decorator no factory recognised.
    #[serde(default)]
    warn_unresolved: bool,
}

impl DecoratorConfig {
    pub fn new(builtin: bool, warn_unresolved: bool) -> Self {
        Self {
            builtin,
            warn_unresolved,
        }
    }

    pub fn builtin(&self) -> bool {
        self.builtin
    }

    pub fn warn_unresolved(&self) -> bool {
        self.warn_unresolved
    }
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self::new(true, false)
    }
}

/// Validation pass settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Check that super types, property types and type reference decorator
    /// arguments name declared types.
    #[serde(default = "default_true")]
    type_references: bool,
}

impl ValidationConfig {
    pub fn new(type_references: bool) -> Self {
        Self { type_references }
    }

    pub fn type_references(&self) -> bool {
        self.type_references
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").expect("empty config");

        assert!(config.decorators().builtin());
        assert!(!config.decorators().warn_unresolved());
        assert!(config.validation().type_references());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [decorators]
            warn_unresolved = true

            [validation]
            type_references = false
            "#,
        )
        .expect("valid config");

        assert!(config.decorators().builtin());
        assert!(config.decorators().warn_unresolved());
        assert!(!config.validation().type_references());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[decorators]\nbuiltin = \"yes\"");
        assert!(result.is_err());
    }
}
