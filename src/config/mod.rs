//! Configuration management for jiracli.
//!
//! Settings are layered from three sources with a fixed precedence:
//! built-in defaults, the user configuration file (`~/.jiracli`), and
//! command-line flags. The [`ConfigResolver`] merges them into one
//! [`EffectiveConfiguration`].

mod custom_field;
mod file;
mod resolver;
mod settings;

use thiserror::Error;

pub use custom_field::{
    compose_nested_field, parse_field_argument, CustomFieldError, CustomFieldMapping,
    FieldDescriptor, FieldKind, FieldMap, NESTED_OBJECT_KIND,
};
pub use file::{config_path, parse_bool, ConfigFile, CONFIG_FILE_NAME, CONFIG_PATH_ENV_VAR};
pub use resolver::{ConfigOverrides, ConfigResolver};
pub use settings::{ApiVersion, EffectiveConfiguration, Secret};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The user's home directory could not be determined.
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// The configuration file is not valid INI.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),

    /// A custom field key is not of the form `<key>.<attribute>`.
    #[error("Malformed custom field key '{0}': expected '<key>.<attribute>'")]
    Format(String),

    /// A required setting is absent after merging all sources.
    #[error("Please specify {what} either as parameter ({flag}) or in config file (~/.jiracli)!")]
    Missing {
        /// Human-readable name of the setting.
        what: &'static str,
        /// The command-line flag that supplies it.
        flag: &'static str,
    },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
